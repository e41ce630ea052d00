use std::borrow::Cow;

use crate::escape::unescape_string;

/// Failure while scanning a string literal or an atom.
///
/// Offsets are byte offsets into the scanned source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanError {
    UnterminatedString { start: usize },
    InvalidEscape { start: usize, end: usize },
}

/// The text of an atom with its escape sequences resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Atom<'a> {
    pub text: Cow<'a, str>,
    pub escaped: bool,
}

/// Whitespace that separates forms: space, tab, line feed, vertical tab,
/// form feed and carriage return.
///
/// Other unicode whitespace, such as the no-break space, is part of atoms.
#[inline]
pub(crate) fn is_whitespace(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\u{b}'
}

/// Cursor over the source text with a lookahead of one character.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Skip up to, but not including, the next line break.
    pub fn skip_line(&mut self) {
        match self.rest().find('\n') {
            Some(length) => self.offset += length,
            None => self.offset = self.source.len(),
        }
    }

    /// Scan a string literal starting at the opening double quote.
    pub fn string(&mut self) -> Result<Cow<'a, str>, ScanError> {
        let start = self.offset;
        self.bump();
        let body_start = self.offset;

        loop {
            match self.bump() {
                None => return Err(ScanError::UnterminatedString { start }),
                Some('"') => break,
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(ScanError::UnterminatedString { start });
                    }
                }
                Some(_) => {}
            }
        }

        let body = &self.source[body_start..self.offset - 1];

        unescape_string(body).map_err(|offset| {
            let start = body_start + offset;
            ScanError::InvalidEscape {
                start,
                end: escape_end(self.source, start),
            }
        })
    }

    /// Scan an atom up to the first character for which `is_end` holds.
    ///
    /// A backslash takes the character after it literally.
    pub fn atom(&mut self, is_end: impl Fn(char) -> bool) -> Result<Atom<'a>, ScanError> {
        let start = self.offset;
        let mut owned: Option<String> = None;

        while let Some(c) = self.peek() {
            if is_end(c) {
                break;
            }

            let backslash = self.offset;
            self.bump();

            if c != '\\' {
                if let Some(text) = &mut owned {
                    text.push(c);
                }
                continue;
            }

            let Some(escaped) = self.bump() else {
                return Err(ScanError::InvalidEscape {
                    start: backslash,
                    end: self.offset,
                });
            };

            owned
                .get_or_insert_with(|| self.source[start..backslash].to_string())
                .push(escaped);
        }

        Ok(match owned {
            Some(text) => Atom {
                text: Cow::Owned(text),
                escaped: true,
            },
            None => Atom {
                text: Cow::Borrowed(&self.source[start..self.offset]),
                escaped: false,
            },
        })
    }
}

/// End of the escape sequence starting with the backslash at `start`.
fn escape_end(source: &str, start: usize) -> usize {
    let after = start + 1;
    match source[after..].chars().next() {
        Some(c) => after + c.len_utf8(),
        None => after,
    }
}

#[cfg(test)]
mod test {
    use super::{is_whitespace, Atom, ScanError, Scanner};
    use std::borrow::Cow;

    fn is_end(c: char) -> bool {
        is_whitespace(c) || matches!(c, '(' | ')' | '"' | ';')
    }

    #[test]
    fn whitespace_is_ascii() {
        for c in [' ', '\t', '\n', '\u{b}', '\u{c}', '\r'] {
            assert!(is_whitespace(c), "{c:?}");
        }
        for c in ['\u{a0}', '\u{2028}', '\u{3000}', 'a'] {
            assert!(!is_whitespace(c), "{c:?}");
        }
    }

    #[test]
    fn scans_string_literal() {
        let mut scanner = Scanner::new(r#""a\"b" rest"#);
        assert_eq!("a\"b", scanner.string().unwrap());
        assert_eq!(" rest", scanner.rest());
    }

    #[test]
    fn unterminated_string() {
        let mut scanner = Scanner::new(r#"x "abc"#);
        scanner.bump();
        scanner.bump();
        assert_eq!(
            Err(ScanError::UnterminatedString { start: 2 }),
            scanner.string()
        );
    }

    #[test]
    fn string_ending_in_backslash() {
        let mut scanner = Scanner::new(r#""abc\"#);
        assert_eq!(
            Err(ScanError::UnterminatedString { start: 0 }),
            scanner.string()
        );
    }

    #[test]
    fn unknown_string_escape() {
        let mut scanner = Scanner::new(r#""ab\qc""#);
        assert_eq!(
            Err(ScanError::InvalidEscape { start: 3, end: 5 }),
            scanner.string()
        );
    }

    #[test]
    fn scans_plain_atom() {
        let mut scanner = Scanner::new("abc)");
        let atom = scanner.atom(is_end).unwrap();
        assert_eq!(
            Atom {
                text: Cow::Borrowed("abc"),
                escaped: false
            },
            atom
        );
        assert_eq!(Some(')'), scanner.peek());
    }

    #[test]
    fn scans_escaped_atom() {
        let mut scanner = Scanner::new(r"a\ b\(c d");
        let atom = scanner.atom(is_end).unwrap();
        assert_eq!("a b(c", atom.text);
        assert!(atom.escaped);
        assert_eq!(" d", scanner.rest());
    }

    #[test]
    fn atom_ending_in_backslash() {
        let mut scanner = Scanner::new(r"ab\");
        assert_eq!(
            Err(ScanError::InvalidEscape { start: 2, end: 3 }),
            scanner.atom(is_end)
        );
    }

    #[test]
    fn skips_line() {
        let mut scanner = Scanner::new("; comment\nnext");
        scanner.skip_line();
        assert_eq!("\nnext", scanner.rest());

        let mut scanner = Scanner::new("; no newline");
        scanner.skip_line();
        assert_eq!(None, scanner.peek());
    }
}
