use logos::Logos;
use ordered_float::OrderedFloat;

use crate::parser::ParseOptions;
use crate::util::{Symbol, Value};

/// Lexer token for the numeric forms an atom may take.
#[derive(Debug, Clone, PartialEq, Logos)]
enum NumberToken {
    #[regex(r"[+-]?[0-9]+")]
    Int,
    #[regex(r"[+-]?([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    #[regex(r"[+-]?[0-9]+[eE][+-]?[0-9]+")]
    Float,
}

/// Determine which numeric form, if any, spans the whole of `token`.
fn number_token(token: &str) -> Option<NumberToken> {
    let mut lexer = NumberToken::lexer(token);
    match [lexer.next(), lexer.next()] {
        [Some(Ok(number)), None] => Some(number),
        _ => None,
    }
}

/// Whether the text of an atom has the shape of a number.
pub fn looks_like_number(token: &str) -> bool {
    number_token(token).is_some()
}

fn number(token: &str) -> Option<Value> {
    match number_token(token)? {
        NumberToken::Int => token.parse::<i64>().ok().map(Value::Int),
        NumberToken::Float => {
            let float = token.parse::<f64>().ok()?;
            float.is_finite().then(|| Value::Float(OrderedFloat(float)))
        }
    }
}

/// Classify the text of an atom.
///
/// Atoms that contained an escape sequence are always symbols.
pub fn classify(token: &str, escaped: bool, options: &ParseOptions) -> Value {
    if escaped {
        return Value::Symbol(Symbol::new(token));
    }

    if options.nil.as_deref() == Some(token) {
        Value::nil()
    } else if options.true_.as_deref() == Some(token) {
        Value::Bool(true)
    } else if options.false_.as_deref() == Some(token) {
        Value::Bool(false)
    } else if let Some(number) = number(token) {
        number
    } else {
        Value::Symbol(Symbol::new(token))
    }
}
