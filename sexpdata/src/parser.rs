//! Parse values from s-expressions.
use smol_str::SmolStr;
use std::io::Read;
use std::ops::Range;

use crate::atom::classify;
use crate::delimiter::{DelimiterKind, DelimiterRegistry};
use crate::pos::{LineIndex, Position};
use crate::scanner::{is_whitespace, ScanError, Scanner};
use crate::util::{Delimited, Spanned, Value};

/// Options that control how atoms and string literals are read.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Atom that reads as the empty list. `None` disables the literal.
    pub nil: Option<SmolStr>,
    /// Atom that reads as `true`.
    pub true_: Option<SmolStr>,
    /// Atom that reads as `false`.
    pub false_: Option<SmolStr>,
    /// Character that starts a comment extending to the end of the line.
    pub line_comment: Option<char>,
    /// Conversion applied to the contents of every string literal.
    pub string_to: fn(SmolStr) -> Value,
    /// The delimiter kinds that open and close containers.
    pub delimiters: DelimiterRegistry,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            nil: Some("nil".into()),
            true_: Some("t".into()),
            false_: None,
            line_comment: Some(';'),
            string_to: Value::String,
            delimiters: DelimiterRegistry::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_nil(mut self, nil: Option<&str>) -> Self {
        self.nil = nil.map(SmolStr::from);
        self
    }

    pub fn with_true(mut self, true_: Option<&str>) -> Self {
        self.true_ = true_.map(SmolStr::from);
        self
    }

    pub fn with_false(mut self, false_: Option<&str>) -> Self {
        self.false_ = false_.map(SmolStr::from);
        self
    }

    pub fn with_line_comment(mut self, line_comment: Option<char>) -> Self {
        self.line_comment = line_comment;
        self
    }

    pub fn with_string_to(mut self, string_to: fn(SmolStr) -> Value) -> Self {
        self.string_to = string_to;
        self
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterRegistry) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Whether `c` terminates an atom.
    fn is_atom_end(&self, c: char) -> bool {
        is_whitespace(c)
            || c == '"'
            || Some(c) == self.line_comment
            || self.delimiters.is_delimiter(c)
    }
}

/// A container or quote whose contents are still being read.
#[derive(Debug)]
enum Frame {
    Container {
        kind: DelimiterKind,
        open: usize,
        items: Vec<Value>,
    },
    Quote {
        open: usize,
    },
}

/// Reads a source text into a sequence of top level values.
///
/// Nesting is tracked with an explicit stack of frames, so deeply nested
/// input does not grow the call stack.
pub struct Parser<'a, 'o> {
    source: &'a str,
    scanner: Scanner<'a>,
    options: &'o ParseOptions,
    stack: Vec<Frame>,
    forms: Vec<Spanned<Value>>,
}

impl<'a, 'o> Parser<'a, 'o> {
    pub fn new(source: &'a str, options: &'o ParseOptions) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            options,
            stack: Vec::new(),
            forms: Vec::new(),
        }
    }

    /// Read the whole source.
    pub fn parse(mut self) -> Result<Vec<Spanned<Value>>> {
        let options = self.options;

        while let Some(c) = self.scanner.peek() {
            let start = self.scanner.offset();

            if c == '"' {
                let body = self
                    .scanner
                    .string()
                    .map_err(|err| self.scan_error(err))?;
                self.emit((options.string_to)(SmolStr::from(body.as_ref())), start);
            } else if is_whitespace(c) {
                self.scanner.bump();
            } else if let Some(kind) = options.delimiters.kind_for_opener(c) {
                self.scanner.bump();
                self.stack.push(Frame::Container {
                    kind,
                    open: start,
                    items: Vec::new(),
                });
            } else if options.delimiters.is_closer(c) {
                self.close(c)?;
            } else if c == '\'' {
                self.scanner.bump();
                self.stack.push(Frame::Quote { open: start });
            } else if Some(c) == options.line_comment {
                self.scanner.skip_line();
            } else {
                let atom = self
                    .scanner
                    .atom(|c| options.is_atom_end(c))
                    .map_err(|err| self.scan_error(err))?;
                self.emit(classify(&atom.text, atom.escaped, options), start);
            }
        }

        match self.stack.pop() {
            None => Ok(self.forms),
            Some(Frame::Container { kind, open, .. }) => Err(ParseError::ExpectClosingBracket {
                got: None,
                expected: kind.closer,
                position: self.position(open),
            }),
            Some(Frame::Quote { open }) => Err(ParseError::ExpectSExp {
                position: self.position(open),
            }),
        }
    }

    /// Handle a registered closing character.
    fn close(&mut self, closer: char) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Container { kind, open, items }) if kind.closer == closer => {
                self.scanner.bump();
                self.emit(Value::Delimited(Delimited::new(kind, items)), open);
                Ok(())
            }
            Some(Frame::Container { kind, open, .. }) => Err(ParseError::ExpectClosingBracket {
                got: Some(closer),
                expected: kind.closer,
                position: self.position(open),
            }),
            Some(Frame::Quote { open }) => Err(ParseError::ExpectSExp {
                position: self.position(open),
            }),
            None => Err(ParseError::ExpectNothing {
                remaining: self.scanner.rest().to_string(),
                position: self.position(self.scanner.offset()),
            }),
        }
    }

    /// Add a completed value to the innermost open frame.
    ///
    /// Pending quotes bind to the value before it reaches its container.
    fn emit(&mut self, mut value: Value, mut start: usize) {
        while let Some(Frame::Quote { open }) = self.stack.last() {
            start = *open;
            self.stack.pop();
            value = Value::Quoted(Box::new(value));
        }

        match self.stack.last_mut() {
            Some(Frame::Container { items, .. }) => items.push(value),
            _ => {
                let end = self.scanner.offset();
                self.forms.push(Spanned::new(value, start..end));
            }
        }
    }

    fn position(&self, offset: usize) -> Position {
        LineIndex::new(self.source).position(offset)
    }

    fn scan_error(&self, err: ScanError) -> ParseError {
        match err {
            ScanError::UnterminatedString { start } => ParseError::UnterminatedString {
                position: self.position(start),
            },
            ScanError::InvalidEscape { start, end } => ParseError::InvalidEscape {
                sequence: self.source[start..end].to_string(),
                position: self.position(start),
            },
        }
    }
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },
    #[error("invalid escape sequence `{sequence}` at {position}")]
    InvalidEscape { sequence: String, position: Position },
    #[error(
        "expected `{expected}` to close the bracket opened at {position}, got {}",
        describe(.got)
    )]
    ExpectClosingBracket {
        got: Option<char>,
        expected: char,
        position: Position,
    },
    #[error("expected an s-expression after the quote at {position}")]
    ExpectSExp { position: Position },
    #[error("expected nothing after the s-expressions, got `{remaining}` at {position}")]
    ExpectNothing { remaining: String, position: Position },
    #[error("expected exactly one s-expression, found {found} (at {position})")]
    ExpectSingle { found: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnterminatedString { position }
            | ParseError::InvalidEscape { position, .. }
            | ParseError::ExpectClosingBracket { position, .. }
            | ParseError::ExpectSExp { position }
            | ParseError::ExpectNothing { position, .. }
            | ParseError::ExpectSingle { position, .. } => *position,
        }
    }
}

fn describe(got: &Option<char>) -> String {
    match got {
        Some(c) => format!("`{c}`"),
        None => "end of input".to_string(),
    }
}

/// Error while reading an s-expression from a [`Read`] source.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Shorthand for a result specialised to parse errors.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Span within a string.
pub type Span = Range<usize>;

/// Parse all top level s-expressions in `source`.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Vec<Value>> {
    let forms = parse_spanned(source, options)?;
    Ok(forms.into_iter().map(Spanned::into_inner).collect())
}

/// Parse all top level s-expressions in `source`, together with their spans.
pub fn parse_spanned(source: &str, options: &ParseOptions) -> Result<Vec<Spanned<Value>>> {
    tracing::debug!(len = source.len(), "parsing s-expressions");

    let result = Parser::new(source, options).parse();

    match &result {
        Ok(forms) => tracing::trace!(forms = forms.len(), "parsed s-expressions"),
        Err(err) => tracing::debug!(error = %err, "failed to parse s-expressions"),
    }

    result
}

/// Parse a source that contains exactly one s-expression.
pub fn load_one(source: &str, options: &ParseOptions) -> Result<Value> {
    let forms = parse_spanned(source, options)?;
    let found = forms.len();
    let mut forms = forms.into_iter();

    match (forms.next(), forms.next()) {
        (Some(form), None) => Ok(form.into_inner()),
        (None, _) => Err(ParseError::ExpectSingle {
            found,
            position: LineIndex::new(source).position(source.len()),
        }),
        (Some(_), Some(second)) => Err(ParseError::ExpectSingle {
            found,
            position: LineIndex::new(source).position(second.span.start),
        }),
    }
}

/// Parse s-expressions with the default [`ParseOptions`].
pub fn from_str(source: &str) -> Result<Vec<Value>> {
    parse(source, &ParseOptions::default())
}

/// Read the whole of `reader` and parse the single s-expression it contains.
///
/// The input must be valid UTF-8; anything else is reported as an I/O error.
pub fn from_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Value, ReadError> {
    let mut source = String::new();
    if let Err(err) = reader.read_to_string(&mut source) {
        tracing::debug!(error = %err, "failed to read s-expression source");
        return Err(err.into());
    }

    Ok(load_one(&source, options)?)
}
