//! S-expressions as a data format.
//!
//! # Syntax
//!
//! This crate reads and writes Lisp-style s-expressions.
//! The syntax of the s-expressions is as follows:
//!
//! - **Containers** are sequences of values, delimited on the outside by a
//!   pair of characters and separated by ASCII whitespace. Lists use `(` and `)`,
//!   arrays use `[` and `]`. Further pairs can be registered in a
//!   [`DelimiterRegistry`].
//!
//! - **Strings** are enclosed within double quotes. Within strings, the following escaping rules apply:
//!
//!    - `\"` and `\\` are used to escape `"` and `\`.
//!    - `\b`, `\f`, `\n`, `\r` and `\t` stand for the backspace, form feed, newline,
//!      carriage return and tab characters.
//!    - `\u{HEX}` stands in for any unicode character where `HEX` is a codepoint in hexadecimal notation.
//!
//! - **Atoms** are any other runs of characters up to whitespace, a delimiter, a double quote
//!   or a comment. A backslash takes the next character literally, and an atom that contains
//!   one is always a symbol. Otherwise atoms read as the nil literal (the empty list), a
//!   boolean literal, an integer, a float or a symbol, in that order.
//!
//! - **Quotes** are an apostrophe followed by a single value, as in `'a` or `'(1 2)`.
//!   Host values are printed behind a quote by wrapping them in [`Quoted`].
//!
//! - **Comments** begin with a `;` and extend to the end of the line.
//!
//! The literals and the comment marker are configured through [`ParseOptions`];
//! the way host values print is configured through [`SerializeOptions`].
//!
//! # Example
//!
//! ```
//! use sexpdata::{from_str, to_string, Value};
//!
//! let forms = from_str(r#"(test "string" 123)"#).unwrap();
//! assert_eq!(
//!     vec![Value::list([Value::symbol("test"), Value::string("string"), Value::Int(123)])],
//!     forms
//! );
//! assert_eq!(r#"(test "string" 123)"#, to_string(&forms[0]).unwrap());
//! ```

pub(crate) mod atom;
pub mod delimiter;
pub(crate) mod escape;
pub mod parser;
pub mod pos;
pub mod printer;
pub(crate) mod scanner;
pub mod util;

pub use delimiter::{DelimiterKind, DelimiterRegistry, RegistryError};
pub use parser::{
    from_reader, from_str, load_one, parse, parse_spanned, ParseError, ParseOptions, ReadError,
};
pub use pos::Position;
pub use printer::{
    serialize, to_string, to_string_pretty, to_writer, Print, Printer, SerializeError,
    SerializeOptions, StrAs, ToSexp, TupleAs, WriteError,
};
pub use util::{Delimited, Quoted, Spanned, Symbol, Value};

#[cfg(feature = "derive")]
pub use sexpdata_derive::Print;
