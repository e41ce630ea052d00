//! Print values into s-expressions.
//!
//! Printing is double dispatch: a value implementing [`Print`] calls the
//! [`Printer`] method matching its kind, and the printer renders it according
//! to its [`SerializeOptions`]. Types outside the built in set can print
//! themselves by implementing [`Print`] directly, by converting into a
//! printable substitute through [`ToSexp`], or with `#[derive(Print)]`.
use smol_str::SmolStr;
use std::io::Write;
use std::str::FromStr;

use crate::atom::looks_like_number;
use crate::delimiter::{DelimiterKind, DelimiterRegistry};
use crate::escape::{escape_string, escape_symbol};
use crate::util::Symbol;

mod host;
mod pretty;
mod simple;

pub use pretty::to_string_pretty;
pub use simple::to_string;

/// How host strings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrAs {
    /// As a double quoted string literal.
    #[default]
    String,
    /// Verbatim, without quotes or escaping.
    Symbol,
}

impl FromStr for StrAs {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(StrAs::String),
            "symbol" => Ok(StrAs::Symbol),
            _ => Err(SerializeError::InvalidOption {
                option: "str_as",
                value: s.to_string(),
            }),
        }
    }
}

/// How host tuples are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TupleAs {
    #[default]
    List,
    Array,
}

impl TupleAs {
    pub fn kind(self) -> DelimiterKind {
        match self {
            TupleAs::List => DelimiterKind::PARENS,
            TupleAs::Array => DelimiterKind::BRACKETS,
        }
    }
}

impl FromStr for TupleAs {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(TupleAs::List),
            "array" => Ok(TupleAs::Array),
            _ => Err(SerializeError::InvalidOption {
                option: "tuple_as",
                value: s.to_string(),
            }),
        }
    }
}

/// Options that control how values are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializeOptions {
    pub str_as: StrAs,
    pub tuple_as: TupleAs,
    /// Token printed for `true`.
    pub true_as: SmolStr,
    /// Token printed for `false`.
    pub false_as: SmolStr,
    /// Token printed for `None`.
    pub none_as: SmolStr,
    /// Prefix of the symbols that name the keys of a mapping.
    pub key_marker: char,
    /// Break containers that do not fit within `width` over several lines.
    pub pretty_print: bool,
    /// Indentation added for every level of nesting when pretty printing.
    pub indent: SmolStr,
    /// Line width for pretty printing. A width of `0` breaks every container.
    pub width: usize,
    /// Characters of these delimiters are escaped within symbols.
    pub delimiters: DelimiterRegistry,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            str_as: StrAs::default(),
            tuple_as: TupleAs::default(),
            true_as: "t".into(),
            false_as: "()".into(),
            none_as: "()".into(),
            key_marker: ':',
            pretty_print: false,
            indent: "  ".into(),
            width: 80,
            delimiters: DelimiterRegistry::default(),
        }
    }
}

impl SerializeOptions {
    pub fn with_str_as(mut self, str_as: StrAs) -> Self {
        self.str_as = str_as;
        self
    }

    pub fn with_tuple_as(mut self, tuple_as: TupleAs) -> Self {
        self.tuple_as = tuple_as;
        self
    }

    pub fn with_true_as(mut self, true_as: &str) -> Self {
        self.true_as = true_as.into();
        self
    }

    pub fn with_false_as(mut self, false_as: &str) -> Self {
        self.false_as = false_as.into();
        self
    }

    pub fn with_none_as(mut self, none_as: &str) -> Self {
        self.none_as = none_as.into();
        self
    }

    pub fn with_key_marker(mut self, key_marker: char) -> Self {
        self.key_marker = key_marker;
        self
    }

    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterRegistry) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Whether a symbol with this text would read back as something else.
    fn is_reserved(&self, text: &str) -> bool {
        looks_like_number(text)
            || matches!(text, "nil" | "t")
            || [&self.true_as, &self.false_as, &self.none_as]
                .iter()
                .any(|token| token.as_str() == text)
    }
}

/// Error while serializing a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("value of type `{type_name}` can not be serialized: {reason}")]
    Unsupported {
        type_name: &'static str,
        reason: &'static str,
    },
    #[error("`{value}` is not a valid choice for `{option}`")]
    InvalidOption { option: &'static str, value: String },
}

impl SerializeError {
    pub fn unsupported<T: ?Sized>(reason: &'static str) -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>(),
            reason,
        }
    }
}

/// Error while writing an s-expression into a [`Write`] sink.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Trait for types that can print s-expressions.
///
/// Implementors provide the layout primitives; rendering of individual
/// atoms according to the [`SerializeOptions`] is shared.
pub trait Printer: Sized {
    type Error: From<SerializeError>;

    /// The options this printer renders with.
    fn options(&self) -> &SerializeOptions;

    /// Print a token verbatim.
    fn token(&mut self, token: &str) -> Result<(), Self::Error>;

    /// Print a quote followed by the value printed by `f`.
    fn quoted<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a container given a function that prints the contents.
    fn delimited<F>(&mut self, kind: DelimiterKind, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Print a symbol, escaping it where needed.
    fn symbol(&mut self, symbol: &str) -> Result<(), Self::Error> {
        if symbol.is_empty() {
            return Err(SerializeError::unsupported::<Symbol>("empty symbols have no text").into());
        }

        let options = self.options();
        let escaped = escape_symbol(symbol, &options.delimiters, |text| {
            options.is_reserved(text)
        });
        self.token(&escaped)
    }

    /// Print a string literal.
    fn string(&mut self, string: &str) -> Result<(), Self::Error> {
        self.token(&escape_string(string))
    }

    /// Print a host string according to [`SerializeOptions::str_as`].
    fn host_str(&mut self, string: &str) -> Result<(), Self::Error> {
        match self.options().str_as {
            StrAs::String => self.string(string),
            StrAs::Symbol => self.token(string),
        }
    }

    fn int(&mut self, int: i64) -> Result<(), Self::Error> {
        self.token(&int.to_string())
    }

    fn float(&mut self, float: f64) -> Result<(), Self::Error> {
        if !float.is_finite() {
            return Err(SerializeError::unsupported::<f64>("non-finite floats have no text").into());
        }

        // Debug formatting always includes a decimal point or an exponent.
        self.token(&format!("{float:?}"))
    }

    fn bool(&mut self, bool: bool) -> Result<(), Self::Error> {
        let options = self.options();
        let token = if bool {
            options.true_as.clone()
        } else {
            options.false_as.clone()
        };
        self.token(&token)
    }

    /// Print an absent value.
    fn none(&mut self) -> Result<(), Self::Error> {
        let token = self.options().none_as.clone();
        self.token(&token)
    }

    /// Print the key of a mapping entry as a marked symbol.
    fn keyword(&mut self, key: &str) -> Result<(), Self::Error> {
        let keyword = format!("{}{}", self.options().key_marker, key);
        self.symbol(&keyword)
    }

    /// Print a tuple according to [`SerializeOptions::tuple_as`].
    fn tuple<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        let kind = self.options().tuple_as.kind();
        self.delimited(kind, f)
    }

    /// Print a printable value.
    fn print<T: Print + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.print(self)
    }
}

/// Trait for types that can be printed as an s-expression.
pub trait Print {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error>;
}

/// Conversion into a substitute value that is printed in place of `self`.
///
/// Use [`impl_print_by_to_sexp`] to derive [`Print`] from this trait.
pub trait ToSexp {
    type Sexp: Print;

    fn to_sexp(&self) -> Self::Sexp;
}

/// Implement [`Print`] by printing the result of [`ToSexp::to_sexp`].
#[macro_export]
macro_rules! impl_print_by_to_sexp {
    ($($ident:ty),*) => {
        $(impl $crate::printer::Print for $ident {
            fn print<P: $crate::printer::Printer>(
                &self,
                printer: &mut P,
            ) -> ::std::result::Result<(), P::Error> {
                let sexp = $crate::printer::ToSexp::to_sexp(self);
                $crate::printer::Printer::print(printer, &sexp)
            }
        })*
    };
}

pub use impl_print_by_to_sexp;

/// Serialize a value into an s-expression string.
pub fn serialize<T: Print + ?Sized>(
    value: &T,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    if options.pretty_print {
        tracing::trace!(width = options.width, "serializing with the pretty printer");
        pretty::render(value, options)
    } else {
        tracing::trace!("serializing with the simple printer");
        simple::render(value, options)
    }
}

/// Serialize a value and write it into `writer`.
///
/// Nothing is written when the value can not be serialized.
pub fn to_writer<W: Write, T: Print + ?Sized>(
    mut writer: W,
    value: &T,
    options: &SerializeOptions,
) -> Result<(), WriteError> {
    let sexp = serialize(value, options)?;
    if let Err(err) = writer.write_all(sexp.as_bytes()) {
        tracing::debug!(error = %err, "failed to write s-expression");
        return Err(err.into());
    }
    Ok(())
}
