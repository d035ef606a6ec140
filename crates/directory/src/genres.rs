//! Genre catalogue and the strict decoder for legacy encoded genre lists.
//!
//! Genres are stored normalized (one `genres` row per name, linked through
//! join tables). Older exports carry them inline as a single string, either
//! a bracketed list of quoted names (`['Jazz', "Rock n Roll"]`) or a
//! brace-delimited array literal (`{Jazz,"Rock n Roll"}`).
//! [`parse_encoded_genres`] accepts exactly those two shapes and nothing else.

use thiserror::Error;

/// Every genre a venue or artist may be tagged with.
pub const GENRE_CATALOGUE: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Look `name` up in the catalogue, ignoring case and surrounding whitespace.
pub fn canonical_genre(name: &str) -> Option<&'static str> {
    let name = name.trim();
    GENRE_CATALOGUE
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(name))
}

/// Canonicalise every name, dropping duplicates and keeping first-seen order.
///
/// Returns the unrecognised names as the error.
pub fn normalize_genres<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>, Vec<String>> {
    let mut known: Vec<String> = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();

    for name in names {
        match canonical_genre(name.as_ref()) {
            Some(genre) => {
                if !known.iter().any(|k| k == genre) {
                    known.push(genre.to_string());
                }
            }
            None => unknown.push(name.as_ref().trim().to_string()),
        }
    }

    if unknown.is_empty() {
        Ok(known)
    } else {
        Err(unknown)
    }
}

/// Why an encoded genre string was rejected, and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at offset {offset}")]
pub struct GenreParseError {
    /// Byte offset into the original input.
    pub offset: usize,
    pub reason: &'static str,
}

/// Decode a legacy inline genre list.
///
/// Blank input and empty lists decode to an empty vector. Names are trimmed;
/// an empty name is an error.
pub fn parse_encoded_genres(input: &str) -> Result<Vec<String>, GenreParseError> {
    let mut cur = Cursor { src: input, pos: 0 };
    cur.skip_ws();

    let close = match cur.peek() {
        None => return Ok(Vec::new()),
        Some('[') => ']',
        Some('{') => '}',
        Some(_) => return Err(cur.fail("expected '[' or '{'")),
    };
    cur.bump();

    let mut items = Vec::new();
    cur.skip_ws();
    if cur.peek() == Some(close) {
        cur.bump();
    } else {
        loop {
            cur.skip_ws();
            let start = cur.pos;
            let item = match cur.peek() {
                Some(quote @ ('\'' | '"')) if close == ']' => cur.quoted(quote)?,
                Some('"') => cur.quoted('"')?,
                _ if close == '}' => cur.bare(close)?,
                _ => return Err(cur.fail("expected a quoted genre name")),
            };

            let item = item.trim();
            if item.is_empty() {
                return Err(GenreParseError { offset: start, reason: "empty genre name" });
            }
            items.push(item.to_string());

            cur.skip_ws();
            match cur.peek() {
                Some(',') => {
                    cur.bump();
                }
                Some(c) if c == close => {
                    cur.bump();
                    break;
                }
                None => return Err(cur.fail("unterminated list")),
                Some(_) => return Err(cur.fail("expected ',' or end of list")),
            }
        }
    }

    cur.skip_ws();
    if cur.peek().is_some() {
        return Err(cur.fail("unexpected trailing input"));
    }
    Ok(items)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn fail(&self, reason: &'static str) -> GenreParseError {
        GenreParseError { offset: self.pos, reason }
    }

    /// A quoted name; `\` escapes the next character.
    fn quoted(&mut self, quote: char) -> Result<String, GenreParseError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(GenreParseError { offset: start, reason: "unterminated string" }),
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => {
                        return Err(GenreParseError { offset: start, reason: "unterminated string" })
                    }
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    /// An unquoted array element, running up to the next `,` or `close`.
    fn bare(&mut self, close: char) -> Result<String, GenreParseError> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.fail("unterminated list")),
                Some(c) if c == ',' || c == close => break,
                Some('"' | '\\' | '{' | '[' | ']') => {
                    return Err(self.fail("unexpected character in unquoted genre name"))
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        Ok(self.src[start..self.pos].to_string())
    }
}
