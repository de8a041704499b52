use glimt::config::runtime::{LogLevel, RuntimeConfig};
use glimt::grammar;
use glimt::logging::{self, codes};
use glimt::pipeline::{self, HighlightOptions, PipelineError, PipelineOutput, ThemeSelection};
use glimt::render::theme;
use glimt::utils::SourceMap;
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run 'glimt --help' for usage.");
            process::exit(2);
        }
    };

    match command {
        CliCommand::Help => print_help(),
        CliCommand::Version => println!("glimt {}", env!("CARGO_PKG_VERSION")),
        CliCommand::Run(run) => {
            init_logging(run.quiet);
            run_highlight(run);
        }
    }
}

fn init_logging(quiet: bool) {
    let mut config = RuntimeConfig::default();
    if quiet {
        config.logging.min_log_level = LogLevel::Error;
    }

    if let Err(message) = logging::config::init_runtime_preferences(config.logging) {
        eprintln!("error: {}", message);
        process::exit(1);
    }
    if let Err(message) = logging::init_global_logging() {
        eprintln!("error: {}", message);
        process::exit(1);
    }
}

fn run_highlight(run: CliRun) {
    match pipeline::highlight_file(&run.file, &run.options) {
        Ok(output) => {
            if !run.quiet {
                print_warnings(&output);
            }
            // The token dump replaces the highlighted text on stdout
            if let Some(dump) = &output.tokens_json {
                println!("{}", dump);
            } else {
                print!("{}", output.rendered);
            }
        }
        Err(error) => {
            let code = error.error_code();
            eprintln!("error[{}]: {}", code, error);
            if let PipelineError::UnknownLanguage { .. } = error {
                eprintln!("known languages: {}", known_language_names().join(", "));
            }
            eprintln!("hint: {}", codes::get_action(code.as_str()));
            process::exit(1);
        }
    }
}

/// Print caret diagnostics for tokenization warnings to stderr
fn print_warnings(output: &PipelineOutput) {
    if !logging::config::show_source_context() {
        return;
    }

    let map = SourceMap::new(&output.source);
    if let Some(span) = output.unterminated_comment {
        eprint!("{}", map.format_warning(&span, "unterminated block comment"));
    }
    if let Some(span) = output.first_unmatched {
        let message = format!(
            "{} byte(s) matched no highlighting rule",
            output.unmatched_bytes
        );
        eprint!("{}", map.format_warning(&span, &message));
    }
}

fn known_language_names() -> Vec<&'static str> {
    grammar::registry()
        .languages()
        .iter()
        .map(|language| language.info.name)
        .collect()
}

#[derive(Debug)]
enum CliCommand {
    Run(CliRun),
    Help,
    Version,
}

#[derive(Debug)]
struct CliRun {
    file: PathBuf,
    options: HighlightOptions,
    quiet: bool,
}

fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut file: Option<PathBuf> = None;
    let mut options = HighlightOptions::default();
    let mut quiet = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "-l" | "--language" => {
                i += 1;
                let value = args.get(i).ok_or("--language requires a name")?;
                options.language = Some(value.clone());
            }
            "-t" | "--theme" => {
                i += 1;
                let value = args.get(i).ok_or("--theme requires a name")?;
                options.theme = ThemeSelection::Named(value.clone());
            }
            "--theme-file" => {
                i += 1;
                let value = args.get(i).ok_or("--theme-file requires a path")?;
                options.theme = ThemeSelection::File(PathBuf::from(value));
            }
            "--tokens" => options.emit_tokens = true,
            "--no-color" => options.use_color = false,
            "-q" | "--quiet" => quiet = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{}'", other));
            }
            _ => {
                if file.is_some() {
                    return Err("expected exactly one file path".to_string());
                }
                file = Some(PathBuf::from(&args[i]));
            }
        }
        i += 1;
    }

    let file = file.ok_or("missing file path")?;
    Ok(CliCommand::Run(CliRun {
        file,
        options,
        quiet,
    }))
}

fn print_help() {
    println!("glimt {}", env!("CARGO_PKG_VERSION"));
    println!("Terminal syntax highlighter for Gleam and Odin");
    println!();
    println!("USAGE:");
    println!("    glimt [OPTIONS] <file>");
    println!();
    println!("ARGUMENTS:");
    println!("    <file>    Source file to highlight");
    println!();
    println!("OPTIONS:");
    println!("    -l, --language <name>    Select the language (default: by file extension)");
    println!("    -t, --theme <name>       Select a built-in theme (default: github)");
    println!("        --theme-file <path>  Load a theme from a TOML file");
    println!("        --tokens             Print the token dump as JSON instead of highlighted text");
    println!("        --no-color           Disable ANSI colors (also honors NO_COLOR)");
    println!("    -q, --quiet              Suppress warnings on stderr");
    println!("    -h, --help               Show this help message");
    println!("    -V, --version            Show the version");
    println!();
    println!("LANGUAGES:");
    for language in grammar::registry().languages() {
        let extensions: Vec<String> = language
            .info
            .extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect();
        println!("    {:<8} {}", language.info.name, extensions.join(", "));
    }
    println!();
    println!("THEMES:");
    println!("    {}", theme::builtin_names().join(", "));
    println!();
    println!("EXAMPLES:");
    println!("    glimt src/main.gleam");
    println!("    glimt --language odin --theme mono scratch.txt");
    println!("    glimt --tokens src/main.gleam > tokens.json");
}
