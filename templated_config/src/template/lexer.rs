//! Splits template source into literal text and tokenised actions.

use crate::numeric::Number;
use crate::{ConfigError, ConfigResult};

use super::Delimiters;

/// A run of literal text or one action between delimiters.
#[derive(Debug, PartialEq)]
pub(super) enum Segment {
    Text(String),
    Action { line: usize, items: Vec<Item> },
}

/// A token inside an action.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Item {
    Ident(String),
    Str(String),
    Number(String),
    Bool(bool),
    Dot,
    LeftParen,
    RightParen,
    Pipe,
}

pub(super) struct Lexer<'a> {
    template: &'a str,
    delimiters: &'a Delimiters,
    rest: &'a str,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub(super) const fn new(
        template: &'a str,
        source: &'a str,
        delimiters: &'a Delimiters,
    ) -> Self {
        Self {
            template,
            delimiters,
            rest: source,
            line: 1,
        }
    }

    pub(super) fn lex(mut self) -> ConfigResult<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut trim_next = false;
        let left = self.delimiters.left();
        while let Some(offset) = self.rest.find(left) {
            let (text, tail) = self.rest.split_at(offset);
            let inner = tail.strip_prefix(left).unwrap_or_default();
            let trim_before = has_trim_marker(inner);
            push_text(&mut segments, text, trim_next, trim_before);
            self.count_lines(text);
            self.rest = if trim_before {
                inner.strip_prefix('-').unwrap_or(inner)
            } else {
                inner
            };

            let line = self.line;
            let candidate = if trim_before {
                self.rest.trim_start()
            } else {
                self.rest
            };
            if candidate.starts_with("/*") {
                let skipped = self.rest.len() - candidate.len();
                let (space, _) = self.rest.split_at(skipped);
                self.count_lines(space);
                self.rest = candidate;
                trim_next = self.skip_comment(line)?;
            } else {
                let (items, trim_after) = self.lex_action(line)?;
                segments.push(Segment::Action { line, items });
                trim_next = trim_after;
            }
        }
        push_text(&mut segments, self.rest, trim_next, false);
        Ok(segments)
    }

    /// Consume a `/* ... */` comment and its closing delimiter.
    fn skip_comment(&mut self, line: usize) -> ConfigResult<bool> {
        let Some(end) = self.rest.find("*/") else {
            return Err(self.error(line, "unclosed comment"));
        };
        let (body, tail) = self.rest.split_at(end);
        self.count_lines(body);
        let after = tail.strip_prefix("*/").unwrap_or_default();
        let delimiters = self.delimiters;
        let right = delimiters.right();
        if let Some(rest) = after.strip_prefix(right) {
            self.rest = rest;
            return Ok(false);
        }
        let trimmed = after.trim_start();
        if trimmed.len() < after.len() {
            if let Some(rest) = trimmed
                .strip_prefix('-')
                .and_then(|marker| marker.strip_prefix(right))
            {
                self.rest = rest;
                return Ok(true);
            }
        }
        Err(self.error(line, "comment ends before closing delimiter"))
    }

    /// Tokenise one action, returning its items and whether the closing
    /// delimiter carried a trim marker.
    fn lex_action(&mut self, line: usize) -> ConfigResult<(Vec<Item>, bool)> {
        let mut items = Vec::new();
        loop {
            let skipped = self.skip_space();
            let delimiters = self.delimiters;
            let right = delimiters.right();
            if let Some(rest) = self.rest.strip_prefix(right) {
                self.rest = rest;
                return Ok((items, false));
            }
            if skipped {
                if let Some(rest) = self
                    .rest
                    .strip_prefix('-')
                    .and_then(|marker| marker.strip_prefix(right))
                {
                    self.rest = rest;
                    return Ok((items, true));
                }
            }
            let mut chars = self.rest.chars();
            let Some(current) = chars.next() else {
                return Err(self.error(line, "unclosed action"));
            };
            let next = chars.next();
            let item = match current {
                '"' => self.lex_quoted(line)?,
                '`' => self.lex_raw(line)?,
                '(' => self.single(current, Item::LeftParen),
                ')' => self.single(current, Item::RightParen),
                '|' => self.single(current, Item::Pipe),
                c if c.is_ascii_digit() => self.lex_number(line)?,
                '-' | '+' | '.' if next.is_some_and(|c| c.is_ascii_digit()) => {
                    self.lex_number(line)?
                }
                '.' if !next.is_some_and(|c| c.is_alphanumeric() || c == '_') => {
                    self.single(current, Item::Dot)
                }
                c if c.is_alphabetic() || c == '_' => self.lex_ident(),
                other => {
                    return Err(self.error(line, format!("unexpected {other:?} in action")));
                }
            };
            items.push(item);
        }
    }

    fn single(&mut self, current: char, item: Item) -> Item {
        self.advance(current.len_utf8());
        item
    }

    fn lex_quoted(&mut self, line: usize) -> ConfigResult<Item> {
        let source = self.rest;
        let mut chars = source.char_indices().skip(1);
        let mut out = String::new();
        while let Some((idx, c)) = chars.next() {
            match c {
                '"' => {
                    self.advance(idx + 1);
                    return Ok(Item::Str(out));
                }
                '\n' => break,
                '\\' => {
                    let Some((_, escape)) = chars.next() else {
                        break;
                    };
                    let decoded = match escape {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        'a' => '\u{7}',
                        'b' => '\u{8}',
                        'f' => '\u{c}',
                        'v' => '\u{b}',
                        '\\' | '"' | '\'' => escape,
                        'x' | 'u' | 'U' => {
                            let width = match escape {
                                'x' => 2,
                                'u' => 4,
                                _ => 8,
                            };
                            let digits: String =
                                chars.by_ref().take(width).map(|(_, d)| d).collect();
                            decode_hex(&digits, width).ok_or_else(|| {
                                self.error(line, format!("invalid escape \\{escape}{digits}"))
                            })?
                        }
                        other => {
                            return Err(
                                self.error(line, format!("unknown escape sequence \\{other}"))
                            );
                        }
                    };
                    out.push(decoded);
                }
                _ => out.push(c),
            }
        }
        Err(self.error(line, "unterminated quoted string"))
    }

    fn lex_raw(&mut self, line: usize) -> ConfigResult<Item> {
        let body = self.rest.strip_prefix('`').unwrap_or_default();
        let Some(end) = body.find('`') else {
            return Err(self.error(line, "unterminated raw string"));
        };
        let (raw, tail) = body.split_at(end);
        self.count_lines(raw);
        let item = Item::Str(raw.to_owned());
        self.rest = tail.strip_prefix('`').unwrap_or_default();
        Ok(item)
    }

    fn lex_number(&mut self, line: usize) -> ConfigResult<Item> {
        let mut prev: Option<char> = None;
        let len = self
            .rest
            .char_indices()
            .take_while(|&(idx, c)| {
                let accepted = c.is_ascii_alphanumeric()
                    || c == '.'
                    || c == '_'
                    || (matches!(c, '+' | '-')
                        && (idx == 0 || matches!(prev, Some('e' | 'E' | 'p' | 'P'))));
                prev = Some(c);
                accepted
            })
            .map(|(_, c)| c.len_utf8())
            .sum::<usize>();
        let (literal, rest) = self.rest.split_at(len);
        let Some(number) = Number::parse(literal) else {
            return Err(self.error(line, format!("bad number syntax: {literal:?}")));
        };
        self.rest = rest;
        Ok(Item::Number(number.to_string()))
    }

    fn lex_ident(&mut self) -> Item {
        let len = self
            .rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum::<usize>();
        let (word, rest) = self.rest.split_at(len);
        let item = match word {
            "true" => Item::Bool(true),
            "false" => Item::Bool(false),
            _ => Item::Ident(word.to_owned()),
        };
        self.rest = rest;
        item
    }

    /// Skip whitespace, returning `true` if any was consumed.
    fn skip_space(&mut self) -> bool {
        let trimmed = self.rest.trim_start();
        let skipped = self.rest.len() - trimmed.len();
        let (space, _) = self.rest.split_at(skipped);
        self.count_lines(space);
        self.rest = trimmed;
        skipped > 0
    }

    fn advance(&mut self, len: usize) {
        let (_, rest) = self.rest.split_at(len);
        self.rest = rest;
    }

    fn count_lines(&mut self, text: &str) {
        self.line += text.matches('\n').count();
    }

    fn error(&self, line: usize, message: impl Into<String>) -> ConfigError {
        ConfigError::TemplateParse {
            template: self.template.to_owned(),
            line,
            message: message.into(),
        }
    }
}

/// A trim marker is a `-` followed by whitespace directly after the left
/// delimiter.
fn has_trim_marker(inner: &str) -> bool {
    let mut chars = inner.chars();
    chars.next() == Some('-') && chars.next().is_some_and(char::is_whitespace)
}

fn push_text(segments: &mut Vec<Segment>, raw: &str, trim_start: bool, trim_end: bool) {
    let mut text = raw;
    if trim_start {
        text = text.trim_start();
    }
    if trim_end {
        text = text.trim_end();
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_owned()));
    }
}

fn decode_hex(digits: &str, width: usize) -> Option<char> {
    if digits.len() != width {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}
