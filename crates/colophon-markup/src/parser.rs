//! Parser for the mini-markdown used in about texts.
//!
//! Two constructs are recognized:
//!
//! - `[text](target)` hyperlinks. Neither part may contain its closing
//!   delimiter, so nesting is not supported: `[a [b]](c)` is not a link
//!   around `a [b]`.
//! - The first line of the output (up to the first `\n`) is bold, unless
//!   disabled with [`MarkupParser::bold_first_line`].
//!
//! Anything that does not form a complete link, such as `[text](target`
//! with no closing parenthesis, is passed through as literal text.

use crate::style::{ParsedDocument, StyleRange};

/// Parses markup into plain text and sorted style ranges.
#[derive(Debug, Clone)]
pub struct MarkupParser {
    bold_first_line: bool,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    /// Creates a parser that emits links and the bold first line.
    pub fn new() -> Self {
        Self {
            bold_first_line: true,
        }
    }

    /// Sets whether the first output line is styled bold.
    pub fn bold_first_line(mut self, enabled: bool) -> Self {
        self.bold_first_line = enabled;
        self
    }

    /// Parses `raw` into a [`ParsedDocument`].
    ///
    /// Link ranges are recorded against the output text. When enabled, the
    /// bold range spans offset 0 up to the first line feed of the output; it
    /// is always present and has length 0 if the output has no line feed.
    /// Ranges are stably sorted by start, so a link at offset 0 precedes the
    /// bold range.
    pub fn parse(&self, raw: &str) -> ParsedDocument {
        let mut plain_text = String::with_capacity(raw.len());
        let mut styles = Vec::new();

        for token in Tokenizer::new(raw) {
            match token {
                Token::Text(text) => plain_text.push_str(text),
                Token::Link { text, target } => {
                    styles.push(StyleRange::hyperlink(plain_text.len(), text.len(), target));
                    plain_text.push_str(text);
                }
            }
        }

        if self.bold_first_line {
            let first_line = plain_text.find('\n').unwrap_or(0);
            styles.push(StyleRange::bold(0, first_line));
        }

        styles.sort_by_key(|s| s.start);

        tracing::trace!(
            input_len = raw.len(),
            output_len = plain_text.len(),
            ranges = styles.len(),
            "parsed markup"
        );

        ParsedDocument { plain_text, styles }
    }
}

/// Parses `raw` with the default parser (links plus bold first line).
pub fn parse(raw: &str) -> ParsedDocument {
    MarkupParser::new().parse(raw)
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Literal text, copied to the output unchanged.
    Text(&'a str),
    /// A complete `[text](target)` span.
    Link { text: &'a str, target: &'a str },
}

/// States of the link scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Literal,
    SawOpenBracket,
    InLinkText,
    SawCloseBracket,
    SawOpenParen,
    InLinkTarget,
}

/// A link found by [`scan_link`], borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LinkMatch<'a> {
    text: &'a str,
    target: &'a str,
    /// Byte offset just past the closing `)`.
    end: usize,
}

/// Tries to match a link starting at byte offset `at`.
///
/// Returns `None` if the input at `at` does not start a complete link.
fn scan_link(input: &str, at: usize) -> Option<LinkMatch<'_>> {
    let mut state = ScanState::Literal;
    let mut text_start = 0;
    let mut text_end = 0;
    let mut target_start = 0;

    for (offset, c) in input[at..].char_indices() {
        let i = at + offset;
        state = match (state, c) {
            (ScanState::Literal, '[') => {
                text_start = i + 1;
                ScanState::SawOpenBracket
            }
            (ScanState::Literal, _) => return None,
            (ScanState::SawOpenBracket | ScanState::InLinkText, ']') => {
                text_end = i;
                ScanState::SawCloseBracket
            }
            (ScanState::SawOpenBracket | ScanState::InLinkText, _) => ScanState::InLinkText,
            (ScanState::SawCloseBracket, '(') => {
                target_start = i + 1;
                ScanState::SawOpenParen
            }
            (ScanState::SawCloseBracket, _) => return None,
            (ScanState::SawOpenParen | ScanState::InLinkTarget, ')') => {
                return Some(LinkMatch {
                    text: &input[text_start..text_end],
                    target: &input[target_start..i],
                    end: i + 1,
                });
            }
            (ScanState::SawOpenParen | ScanState::InLinkTarget, _) => ScanState::InLinkTarget,
        };
    }

    None
}

/// Splits markup into literal text and links, left to right.
///
/// A `[` that does not start a complete link is literal; scanning resumes
/// right after it, so `[a] [b](c)` still finds the link `b`.
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    pending: Option<LinkMatch<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
        }
    }

    fn emit_link(&mut self, link: LinkMatch<'a>) -> Token<'a> {
        self.pos = link.end;
        Token::Link {
            text: link.text,
            target: link.target,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(link) = self.pending.take() {
            return Some(self.emit_link(link));
        }

        if self.pos >= self.input.len() {
            return None;
        }

        let mut search = self.pos;
        while let Some(found) = self.input[search..].find('[') {
            let open = search + found;
            if let Some(link) = scan_link(self.input, open) {
                if open == self.pos {
                    return Some(self.emit_link(link));
                }
                let text = &self.input[self.pos..open];
                self.pos = open;
                self.pending = Some(link);
                return Some(Token::Text(text));
            }
            search = open + 1;
        }

        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        Some(Token::Text(rest))
    }
}
