//! Parser for Doxygen `search/*.js` index files.
//!
//! The files are a single JavaScript assignment:
//!
//! ```text
//! var searchData=
//! [
//!   ['image_5fadd',['Image_add',['../namespacegalsim_1_1image.html#a0b5b',1,'galsim::image']]],
//!   ...
//! ];
//! ```
//!
//! Only the literal subset the generator emits is understood: quoted
//! strings, integers, `null`/`true`/`false` and nested arrays.

use thiserror::Error;

use crate::symbol::{IndexFragment, Locator, SymbolEntry};

/// Syntax or shape error in a search-data file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at byte {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum Literal {
    Str(String),
    Num,
    Null,
    Bool,
    List(Vec<(usize, Literal)>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Num => "number",
            Literal::Null => "null",
            Literal::Bool => "boolean",
            Literal::List(_) => "array",
        }
    }
}

/// Parse one search-data file into a fragment called `name`.
pub fn parse_search_data(name: &str, source: &str) -> Result<IndexFragment, ParseError> {
    let mut parser = Parser::new(source);
    parser.skip_assignment()?;

    let start = parser.pos;
    let top = parser.parse_value()?;
    parser.skip_ws();
    if parser.peek() == Some(b';') {
        parser.pos += 1;
    }
    parser.skip_ws();
    if parser.pos != source.len() {
        return Err(ParseError::new(parser.pos, "unexpected trailing content"));
    }

    let items = match top {
        Literal::List(items) => items,
        other => {
            return Err(ParseError::new(
                start,
                format!("expected array of entries, found {}", other.kind()),
            ))
        }
    };

    let entries = items
        .into_iter()
        .map(|(offset, item)| convert_entry(offset, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IndexFragment::new(name, entries))
}

/// `['key', ['Label', [url, flag, descriptor], ...]]`
fn convert_entry(offset: usize, item: Literal) -> Result<SymbolEntry, ParseError> {
    let mut parts = expect_list(offset, item)?.into_iter();

    let key = match parts.next() {
        Some((at, lit)) => expect_str(at, lit)?,
        None => return Err(ParseError::new(offset, "empty entry")),
    };

    let Some((body_at, body)) = parts.next() else {
        // Keyed entry without a body; rejected later as having no targets.
        return Ok(SymbolEntry::new(key, String::new(), Vec::new()));
    };

    let mut body = expect_list(body_at, body)?.into_iter();
    let label = match body.next() {
        Some((at, lit)) => decode_entities(&expect_str(at, lit)?),
        None => String::new(),
    };

    let targets = body
        .map(|(at, lit)| convert_target(at, lit))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SymbolEntry::new(key, label, targets))
}

/// `['../page.html#anchor', 1, 'scope::Name()']`
fn convert_target(offset: usize, item: Literal) -> Result<Locator, ParseError> {
    let mut parts = expect_list(offset, item)?.into_iter();

    let url = match parts.next() {
        Some((at, lit)) => expect_str(at, lit)?,
        None => return Err(ParseError::new(offset, "target without url")),
    };

    // Second slot is a generator flag, third the scope/signature.
    let descriptor = match parts.nth(1) {
        Some((at, lit)) => decode_entities(&expect_str(at, lit)?),
        None => String::new(),
    };

    let url = url.strip_prefix("../").unwrap_or(&url);
    let (path, anchor) = url.split_once('#').unwrap_or((url, ""));

    Ok(Locator::new(path, anchor, descriptor))
}

fn expect_list(offset: usize, lit: Literal) -> Result<Vec<(usize, Literal)>, ParseError> {
    match lit {
        Literal::List(items) => Ok(items),
        other => Err(ParseError::new(
            offset,
            format!("expected array, found {}", other.kind()),
        )),
    }
}

fn expect_str(offset: usize, lit: Literal) -> Result<String, ParseError> {
    match lit {
        Literal::Str(s) => Ok(s),
        other => Err(ParseError::new(
            offset,
            format!("expected string, found {}", other.kind()),
        )),
    }
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if self.src[self.pos..].starts_with("//") {
                match self.src[self.pos..].find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.bytes.len(),
                }
            } else {
                break;
            }
        }
    }

    /// Skip an optional `var name =` prefix.
    fn skip_assignment(&mut self) -> Result<(), ParseError> {
        self.skip_ws();
        if self.peek() == Some(b'[') {
            return Ok(());
        }

        match self.src[self.pos..].find('=') {
            Some(eq) => {
                self.pos += eq + 1;
                self.skip_ws();
                Ok(())
            }
            None => Err(ParseError::new(self.pos, "expected 'var searchData=' or '['")),
        }
    }

    fn parse_value(&mut self) -> Result<Literal, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some(b'[') => self.parse_list(),
            Some(q @ (b'\'' | b'"')) => self.parse_string(q).map(Literal::Str),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => self.parse_keyword(),
            None => Err(ParseError::new(self.pos, "unexpected end of input")),
        }
    }

    fn parse_list(&mut self) -> Result<Literal, ParseError> {
        self.pos += 1;
        let mut items = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Literal::List(items));
                }
                None => return Err(ParseError::new(self.pos, "unterminated array")),
                _ => {}
            }

            let at = self.pos;
            items.push((at, self.parse_value()?));

            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                Some(other) => {
                    return Err(ParseError::new(
                        self.pos,
                        format!("expected ',' or ']', found '{}'", other as char),
                    ))
                }
                None => return Err(ParseError::new(self.pos, "unterminated array")),
            }
        }
    }

    fn parse_string(&mut self, quote: u8) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            let rest = &self.src[self.pos..];
            let Some(ch) = rest.chars().next() else {
                return Err(ParseError::new(start, "unterminated string"));
            };

            if ch as u32 == quote as u32 {
                self.pos += 1;
                return Ok(out);
            }

            if ch == '\\' {
                self.pos += 1;
                let Some(escaped) = self.src[self.pos..].chars().next() else {
                    return Err(ParseError::new(start, "unterminated string"));
                };
                self.pos += escaped.len_utf8();
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'u' => out.push(self.parse_unicode_escape()?),
                    other => out.push(other),
                }
                continue;
            }

            out.push(ch);
            self.pos += ch.len_utf8();
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, ParseError> {
        let hex = self
            .src
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| ParseError::new(self.pos, "truncated \\u escape"))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| ParseError::new(self.pos, "invalid \\u escape"))?;
        self.pos += 4;
        Ok(char::from_u32(code).unwrap_or('\u{fffd}'))
    }

    fn parse_number(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }

        self.src[start..self.pos]
            .parse::<i64>()
            .map(|_| Literal::Num)
            .map_err(|_| ParseError::new(start, "invalid number"))
    }

    fn parse_keyword(&mut self) -> Result<Literal, ParseError> {
        let rest = &self.src[self.pos..];
        for (word, lit) in [
            ("null", Literal::Null),
            ("true", Literal::Bool),
            ("false", Literal::Bool),
        ] {
            if rest.starts_with(word) {
                self.pos += word.len();
                return Ok(lit);
            }
        }

        let found = rest.chars().next().unwrap_or(' ');
        Err(ParseError::new(self.pos, format!("unexpected character '{}'", found)))
    }
}

/// Decode the HTML entities the generator writes into labels and scopes.
///
/// Text that does not decode cleanly (a bare `&`, an unknown entity) is
/// returned unchanged.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    htmlescape::decode_html(text).unwrap_or_else(|_| text.to_string())
}
