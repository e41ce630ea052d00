use crate::delimiter::DelimiterKind;
use crate::printer::{Print, Printer};
use delegate::delegate;
use ordered_float::OrderedFloat;
use proptest::arbitrary::Arbitrary;
use smol_str::SmolStr;
use std::fmt::Display;

/// A bare identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Symbol(SmolStr);

impl Symbol {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> SmolStr {
        self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<SmolStr> for Symbol {
    fn from(value: SmolStr) -> Self {
        Self(value)
    }
}

/// A sequence of values enclosed by a pair of delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Delimited {
    kind: DelimiterKind,
    items: Vec<Value>,
}

impl Delimited {
    pub fn new(kind: DelimiterKind, items: Vec<Value>) -> Self {
        Self { kind, items }
    }

    /// A container delimited by parentheses.
    pub fn list(items: Vec<Value>) -> Self {
        Self::new(DelimiterKind::PARENS, items)
    }

    /// A container delimited by square brackets.
    pub fn array(items: Vec<Value>) -> Self {
        Self::new(DelimiterKind::BRACKETS, items)
    }

    #[inline]
    pub fn kind(&self) -> DelimiterKind {
        self.kind
    }

    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    delegate! {
        to self.items {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            pub fn iter(&self) -> std::slice::Iter<'_, Value>;
            pub fn get(&self, index: usize) -> Option<&Value>;
        }
    }
}

impl<'a> IntoIterator for &'a Delimited {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Delimited {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// An s-expression represented as a recursive enum.
///
/// Two values are equal only when they are the same variant holding equal
/// contents; a [`Value::Symbol`] never equals a [`Value::String`] with the
/// same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Symbol(Symbol),
    /// A double quoted string literal.
    String(SmolStr),
    /// A form preceded by an apostrophe.
    Quoted(Box<Value>),
    Delimited(Delimited),
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
}

impl Value {
    /// The empty list, which is what the nil literal reads as.
    pub fn nil() -> Self {
        Self::Delimited(Delimited::list(Vec::new()))
    }

    pub fn symbol(text: impl Into<SmolStr>) -> Self {
        Self::Symbol(Symbol::new(text))
    }

    pub fn string(text: impl Into<SmolStr>) -> Self {
        Self::String(text.into())
    }

    pub fn quoted(value: impl Into<Value>) -> Self {
        Self::Quoted(Box::new(value.into()))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Delimited(Delimited::list(items.into_iter().collect()))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Delimited(Delimited::array(items.into_iter().collect()))
    }

    pub fn float(float: f64) -> Self {
        Self::Float(OrderedFloat(float))
    }

    /// Whether this is an empty list.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Delimited(delimited)
            if delimited.kind() == DelimiterKind::PARENS && delimited.is_empty())
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_delimited(&self) -> Option<&Delimited> {
        match self {
            Value::Delimited(delimited) => Some(delimited),
            _ => None,
        }
    }
}

impl Print for Value {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Value::Symbol(symbol) => printer.symbol(symbol.as_str()),
            Value::String(string) => printer.string(string),
            Value::Quoted(inner) => printer.quoted(|printer| printer.print(inner.as_ref())),
            Value::Delimited(delimited) => delimited.print(printer),
            Value::Int(int) => printer.int(*int),
            Value::Float(float) => printer.float(float.into_inner()),
            Value::Bool(bool) => printer.bool(*bool),
        }
    }
}

impl Print for Symbol {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.symbol(self.as_str())
    }
}

impl Print for Delimited {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.delimited(self.kind, |printer| {
            for item in &self.items {
                printer.print(item)?;
            }
            Ok(())
        })
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Delimited> for Value {
    fn from(value: Delimited) -> Self {
        Self::Delimited(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        let finite = proptest::num::f64::NORMAL
            | proptest::num::f64::SUBNORMAL
            | proptest::num::f64::ZERO;

        let leaf = proptest::prop_oneof![
            any::<String>()
                .prop_filter("symbols are never empty", |text| !text.is_empty())
                .prop_map(Value::symbol),
            any::<String>().prop_map(Value::string),
            // Printable ASCII plus the control characters with escape sequences.
            "[ -~\\t\\n\\r\\x08\\x0b\\x0c]{1,8}".prop_map(Value::symbol),
            "[ -~\\t\\n\\r\\x08\\x0b\\x0c]*".prop_map(Value::string),
            any::<i64>().prop_map(Value::Int),
            finite.prop_map(Value::float),
            any::<bool>().prop_map(Value::Bool),
        ];

        leaf.prop_recursive(8, 256, 10, |inner| {
            proptest::prop_oneof![
                proptest::collection::vec(inner.clone(), 0..10).prop_map(Value::list),
                proptest::collection::vec(inner.clone(), 0..10).prop_map(Value::array),
                inner.prop_map(Value::quoted),
            ]
        })
        .boxed()
    }
}
