//! Rule-table tokenizer.
//!
//! [`Tokens`] walks the active mode's rules in declaration order at the
//! current position and takes the first match. Matched text becomes one
//! token, or one token per capture group for grouped rules. Input no rule
//! accepts is emitted as single-character error tokens, so every byte of
//! the input appears in exactly one token and iteration always terminates.

use crate::config::runtime::LexicalPreferences;
use crate::grammar::rules::{CompiledGrammar, ModeChange};
use crate::log_debug;
use crate::tokens::{Token, TokenCategory};
use crate::utils::{Position, Span};
use std::collections::VecDeque;

/// Counters accumulated while tokenizing one input.
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub operator_tokens: usize,
    pub comment_tokens: usize,
    pub string_tokens: usize,
    pub number_tokens: usize,
    pub whitespace_tokens: usize,
    pub error_tokens: usize,
    pub max_mode_depth: usize,
    /// Input ended with at least one pushed mode still open
    pub unterminated: bool,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token<'_>, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.category {
            TokenCategory::Keyword => self.keyword_tokens += 1,
            TokenCategory::Identifier => self.identifier_tokens += 1,
            TokenCategory::Operator(_) => self.operator_tokens += 1,
            TokenCategory::Comment(_) => self.comment_tokens += 1,
            TokenCategory::StringLiteral(_) | TokenCategory::Escape => self.string_tokens += 1,
            TokenCategory::Number(_) => self.number_tokens += 1,
            TokenCategory::Whitespace => {
                if preferences.include_trivia_in_counts {
                    self.whitespace_tokens += 1;
                }
            }
            TokenCategory::Error => self.error_tokens += 1,
            _ => {}
        }
    }

    fn record_mode_depth(&mut self, depth: usize) {
        self.max_mode_depth = self.max_mode_depth.max(depth);
    }
}

/// Lazy token iterator over one input.
///
/// Yielded tokens tile the input: concatenating their text reproduces the
/// source exactly. Diagnostic accessors ([`Tokens::unterminated_comment`],
/// [`Tokens::first_unmatched`]) are meaningful once iteration has finished.
pub struct Tokens<'a> {
    grammar: &'a CompiledGrammar,
    source: &'a str,
    preferences: LexicalPreferences,
    cursor: Position,
    /// Active mode indices. The root stays at the bottom for the whole run.
    mode_stack: Vec<usize>,
    /// Opener span per pushed mode, for unterminated-comment reporting
    opener_spans: Vec<Span>,
    /// Tokens already produced by a grouped match, not yet yielded
    pending: VecDeque<Token<'a>>,
    metrics: LexicalMetrics,
    first_unmatched: Option<Span>,
    unmatched_bytes: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(grammar: &'a CompiledGrammar, source: &'a str) -> Self {
        Self::with_preferences(grammar, source, LexicalPreferences::default())
    }

    pub fn with_preferences(
        grammar: &'a CompiledGrammar,
        source: &'a str,
        preferences: LexicalPreferences,
    ) -> Self {
        log_debug!("Starting lexical analysis",
            "language" => grammar.name,
            "bytes" => source.len()
        );

        Self {
            grammar,
            source,
            preferences,
            cursor: Position::start(),
            mode_stack: vec![grammar.root()],
            opener_spans: Vec::new(),
            pending: VecDeque::new(),
            metrics: LexicalMetrics::default(),
            first_unmatched: None,
            unmatched_bytes: 0,
        }
    }

    /// Number of modes pushed above the root right now
    pub fn mode_depth(&self) -> usize {
        self.mode_stack.len() - 1
    }

    /// Opener of the outermost block comment left unclosed, if any
    pub fn unterminated_comment(&self) -> Option<Span> {
        if self.mode_stack.len() > 1 {
            self.opener_spans.first().copied()
        } else {
            None
        }
    }

    /// Span of the first input no rule accepted, if any
    pub fn first_unmatched(&self) -> Option<Span> {
        self.first_unmatched
    }

    /// Total bytes covered by error tokens
    pub fn unmatched_bytes(&self) -> usize {
        self.unmatched_bytes
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            if self.cursor.offset >= self.source.len() {
                self.metrics.unterminated = self.mode_stack.len() > 1;
                return None;
            }

            let rest = &self.source[self.cursor.offset..];
            let mode_index = self.mode_stack.last().copied().unwrap_or(0);
            let mode = self.grammar.mode(mode_index);

            if let Some(hit) = mode.rules.iter().find_map(|rule| rule.apply(rest)) {
                let matched = &rest[..hit.len];

                let mut piece_start = self.cursor;
                for (category, text) in hit.pieces {
                    let span = Span::of(piece_start, text);
                    piece_start = span.end;
                    let token = Token::new(category, text, span);
                    self.metrics.record_token(&token, &self.preferences);
                    self.pending.push_back(token);
                }

                match hit.mode_change {
                    ModeChange::Push(target) => {
                        if let Some(index) = self.grammar.mode_named(target) {
                            self.mode_stack.push(index);
                            self.opener_spans.push(Span::of(self.cursor, matched));
                            self.metrics.record_mode_depth(self.mode_stack.len() - 1);
                        }
                    }
                    ModeChange::Pop => {
                        // Popping at the root is a no-op
                        if self.mode_stack.len() > 1 {
                            self.mode_stack.pop();
                            self.opener_spans.pop();
                        }
                    }
                    ModeChange::Switch(target) => {
                        if let Some(index) = self.grammar.mode_named(target) {
                            if let Some(top) = self.mode_stack.last_mut() {
                                *top = index;
                            }
                        }
                    }
                    ModeChange::None => {}
                }

                self.cursor = self.cursor.advance_str(matched);
                continue;
            }

            // No rule matched. Emit the next character as an error token
            // and keep going so the input stays fully covered.
            let char_len = rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            let text = &rest[..char_len];
            let span = Span::of(self.cursor, text);
            let token = Token::new(TokenCategory::Error, text, span);

            if self.first_unmatched.is_none() {
                self.first_unmatched = Some(span);
            }
            self.unmatched_bytes += char_len;
            self.metrics.record_token(&token, &self.preferences);
            self.cursor = span.end;

            return Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::rules::{Grammar, Mode, Rule};
    use crate::grammar::{gleam, odin};
    use crate::tokens::CommentKind;

    fn collect<'a>(tokens: &mut Tokens<'a>) -> Vec<Token<'a>> {
        tokens.by_ref().collect()
    }

    #[test]
    fn tokens_tile_the_input() {
        let compiled = gleam::grammar().compile().unwrap();
        let source = "pub fn go() {\n  list.map(items, run)\n}\n";
        let mut tokens = Tokens::new(&compiled, source);
        let collected = collect(&mut tokens);

        let rebuilt: String = collected.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);

        // Spans are contiguous and gap-free
        let mut expected_offset = 0;
        for token in &collected {
            assert_eq!(token.span.start.offset, expected_offset);
            expected_offset = token.span.end.offset;
        }
        assert_eq!(expected_offset, source.len());
    }

    #[test]
    fn terminates_and_covers_garbage_input() {
        let compiled = gleam::grammar().compile().unwrap();
        let source = "§§ let € ## \u{1}";
        let mut tokens = Tokens::new(&compiled, source);
        let collected = collect(&mut tokens);

        let rebuilt: String = collected.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);
        assert!(collected.iter().any(|t| t.category == TokenCategory::Error));
        assert!(tokens.unmatched_bytes() > 0);
        assert_eq!(tokens.first_unmatched().unwrap().start.offset, 0);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let compiled = gleam::grammar().compile().unwrap();
        let mut tokens = Tokens::new(&compiled, "");
        assert!(tokens.next().is_none());
        assert_eq!(tokens.metrics().total_tokens, 0);
        assert!(tokens.unterminated_comment().is_none());
    }

    #[test]
    fn nested_block_comment_stays_comment_and_unwinds() {
        let compiled = gleam::grammar().compile().unwrap();
        let source = "/* a /* b */ c */";
        let mut tokens = Tokens::new(&compiled, source);
        let collected = collect(&mut tokens);

        assert!(collected
            .iter()
            .all(|t| t.category == TokenCategory::Comment(CommentKind::Block)));
        let rebuilt: String = collected.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);

        assert_eq!(tokens.mode_depth(), 0);
        assert_eq!(tokens.metrics().max_mode_depth, 2);
        assert!(!tokens.metrics().unterminated);
        assert!(tokens.unterminated_comment().is_none());
    }

    #[test]
    fn unterminated_comment_reports_the_opener() {
        let compiled = odin::grammar().compile().unwrap();
        let source = "x := 1 /* still open";
        let mut tokens = Tokens::new(&compiled, source);
        let collected = collect(&mut tokens);

        let rebuilt: String = collected.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);

        let opener = tokens.unterminated_comment().unwrap();
        assert_eq!(opener.start.offset, 7);
        assert_eq!(opener.start.line, 1);
        assert_eq!(opener.start.column, 8);
        assert_eq!(opener.len(), 2);
        assert!(tokens.metrics().unterminated);
    }

    #[test]
    fn unterminated_nested_comment_reports_the_outermost_opener() {
        let compiled = gleam::grammar().compile().unwrap();
        let source = "/* outer /* inner */";
        let mut tokens = Tokens::new(&compiled, source);
        let _ = collect(&mut tokens);

        // The inner comment closed; the outer one did not
        let opener = tokens.unterminated_comment().unwrap();
        assert_eq!(opener.start.offset, 0);
        assert_eq!(tokens.mode_depth(), 1);
    }

    #[test]
    fn switch_replaces_the_active_mode_without_changing_depth() {
        let grammar = Grammar {
            name: "switchy",
            modes: vec![
                Mode {
                    name: "root",
                    rules: vec![
                        Rule::token(r"\s+", TokenCategory::Whitespace),
                        Rule::switch(r"begin\b", TokenCategory::Keyword, "body"),
                        Rule::token(r"[a-z]+", TokenCategory::Identifier),
                    ],
                },
                Mode {
                    name: "body",
                    rules: vec![
                        Rule::token(r"\s+", TokenCategory::Whitespace),
                        Rule::switch(r"end\b", TokenCategory::Keyword, "root"),
                        Rule::token(r"[a-z]+", TokenCategory::Constant),
                    ],
                },
            ],
        };
        let compiled = grammar.compile().unwrap();
        let source = "x begin y end z";
        let mut tokens = Tokens::new(&compiled, source);
        let collected = collect(&mut tokens);

        let categories: Vec<TokenCategory> = collected.iter().map(|t| t.category).collect();
        assert_eq!(
            categories,
            vec![
                TokenCategory::Identifier, // x, in root
                TokenCategory::Whitespace,
                TokenCategory::Keyword, // begin
                TokenCategory::Whitespace,
                TokenCategory::Constant, // y, in body
                TokenCategory::Whitespace,
                TokenCategory::Keyword, // end
                TokenCategory::Whitespace,
                TokenCategory::Identifier, // z, back in root
            ]
        );
        assert_eq!(tokens.mode_depth(), 0);
        assert_eq!(tokens.metrics().max_mode_depth, 0);
    }

    #[test]
    fn pop_at_root_is_ignored() {
        let grammar = Grammar {
            name: "poppy",
            modes: vec![Mode {
                name: "root",
                rules: vec![
                    Rule::token(r"\s+", TokenCategory::Whitespace),
                    Rule::pop(r"\*/", TokenCategory::Comment(CommentKind::Block)),
                    Rule::token(r"[a-z]+", TokenCategory::Identifier),
                ],
            }],
        };
        let compiled = grammar.compile().unwrap();
        let source = "*/ after";
        let mut tokens = Tokens::new(&compiled, source);
        let collected = collect(&mut tokens);

        let rebuilt: String = collected.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, source);
        assert_eq!(tokens.mode_depth(), 0);
        assert_eq!(
            collected[0].category,
            TokenCategory::Comment(CommentKind::Block)
        );
        assert_eq!(collected[2].category, TokenCategory::Identifier);
    }

    #[test]
    fn preferences_gate_detailed_metrics() {
        let compiled = gleam::grammar().compile().unwrap();
        let prefs = LexicalPreferences {
            collect_detailed_metrics: false,
            include_trivia_in_counts: false,
        };
        let mut tokens = Tokens::with_preferences(&compiled, "let x", prefs);
        let _ = collect(&mut tokens);

        assert_eq!(tokens.metrics().total_tokens, 3);
        assert_eq!(tokens.metrics().keyword_tokens, 0);
    }

    #[test]
    fn trivia_counting_is_opt_in() {
        let compiled = gleam::grammar().compile().unwrap();

        let mut without = Tokens::new(&compiled, "let x");
        let _ = collect(&mut without);
        assert_eq!(without.metrics().whitespace_tokens, 0);

        let prefs = LexicalPreferences {
            collect_detailed_metrics: true,
            include_trivia_in_counts: true,
        };
        let mut with = Tokens::with_preferences(&compiled, "let x", prefs);
        let _ = collect(&mut with);
        assert_eq!(with.metrics().whitespace_tokens, 1);
    }
}
