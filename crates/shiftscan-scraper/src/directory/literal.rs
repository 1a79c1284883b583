//! Data-only reader for the inline location block.
//!
//! Accepts an array of flat records written either as strict JSON or as a
//! script literal: unquoted identifier keys, single- or double-quoted
//! strings, trailing commas and `//` / `/* */` comments. Record values must be
//! strings, numbers, `true`, `false` or `null`. Nothing in the text is ever
//! evaluated.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A flat record from the block, keyed in source order (last duplicate wins).
pub(crate) type Record = Map<String, Value>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{reason} at offset {offset}")]
pub(crate) struct LiteralError {
    pub offset: usize,
    pub reason: String,
}

/// Parses `text` as an array of flat records. Trailing text after the
/// closing bracket (other than whitespace and comments) is an error.
pub(crate) fn parse_records(text: &str) -> Result<Vec<Record>, LiteralError> {
    let mut reader = Reader { src: text, pos: 0 };
    let records = reader.array()?;
    reader.skip_trivia()?;
    if reader.pos < text.len() {
        return Err(reader.error("unexpected text after array"));
    }
    Ok(records)
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl Reader<'_> {
    fn error(&self, reason: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{want}', found '{c}'"))),
            None => Err(self.error(format!("expected '{want}', found end of input"))),
        }
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        let src = self.src;
        loop {
            let rest = &src[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                let end = body
                    .find("*/")
                    .ok_or_else(|| self.error("unterminated block comment"))?;
                self.pos += 2 + end + 2;
            } else {
                return Ok(());
            }
        }
    }

    /// Parses `[ record, ... ]`, allowing a trailing comma.
    fn array(&mut self) -> Result<Vec<Record>, LiteralError> {
        self.skip_trivia()?;
        self.expect('[')?;
        let mut records = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(records);
                }
                Some('{') => records.push(self.record()?),
                Some(c) => return Err(self.error(format!("expected a record, found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
            self.skip_trivia()?;
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(records),
                _ => return Err(self.error("expected ',' or ']' after record")),
            }
        }
    }

    fn record(&mut self) -> Result<Record, LiteralError> {
        self.expect('{')?;
        let mut record = Map::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(record);
            }
            let key = self.key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.scalar(&key)?;
            record.insert(key, value);

            self.skip_trivia()?;
            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(record),
                _ => return Err(self.error("expected ',' or '}' after value")),
            }
        }
    }

    fn key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.string(q),
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                {
                    self.bump();
                }
                Ok(self.src[start..self.pos].to_owned())
            }
            _ => Err(self.error("expected a record key")),
        }
    }

    fn scalar(&mut self, key: &str) -> Result<Value, LiteralError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.string(q).map(Value::String),
            Some('[' | '{') => Err(self.error(format!("nested value for key '{key}'"))),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => {
                let word = self.key()?;
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    other => Err(self.error(format!("unsupported value '{other}' for key '{key}'"))),
                }
            }
            _ => Err(self.error(format!("expected a value for key '{key}'"))),
        }
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        self.digits();
        if self.peek() == Some('.') {
            self.bump();
            self.digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('-' | '+')) {
                self.bump();
            }
            self.digits();
        }

        let text = self.src[start..self.pos].trim_start_matches('+');
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Value::Number(n.into()));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| LiteralError {
                offset: start,
                reason: format!("invalid number '{text}'"),
            })
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char, LiteralError> {
        let c = self.bump().ok_or_else(|| self.error("unterminated escape"))?;
        Ok(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'x' => {
                let code = self.hex(2)?;
                char::from_u32(code).ok_or_else(|| self.error("invalid \\x escape"))?
            }
            'u' => self.unicode_escape()?,
            other => other,
        })
    }

    fn unicode_escape(&mut self) -> Result<char, LiteralError> {
        let high = self.hex(4)?;
        if (0xD800..0xDC00).contains(&high) && self.src[self.pos..].starts_with("\\u") {
            self.pos += 2;
            let low = self.hex(4)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.error("invalid surrogate pair"));
            }
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).ok_or_else(|| self.error("invalid surrogate pair"));
        }
        char::from_u32(high).ok_or_else(|| self.error("invalid \\u escape"))
    }

    fn hex(&mut self, len: usize) -> Result<u32, LiteralError> {
        let digits = self
            .src
            .get(self.pos..self.pos + len)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid hex escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|e| self.error(e.to_string()))?;
        self.pos += len;
        Ok(code)
    }
}
