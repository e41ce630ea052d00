use logos::Logos;
use std::borrow::Cow;

use crate::delimiter::DelimiterRegistry;
use crate::scanner::is_whitespace;

/// Characters that are escaped within string literals, with their escape sequences.
pub const STRING_ESCAPES: &[(char, &str)] = &[
    ('"', r#"\""#),
    ('\\', r"\\"),
    ('\u{8}', r"\b"),
    ('\u{c}', r"\f"),
    ('\n', r"\n"),
    ('\r', r"\r"),
    ('\t', r"\t"),
];

/// Characters that are escaped with a backslash within symbols.
///
/// Whitespace and the characters of registered delimiters are escaped as well.
pub const SYMBOL_SPECIALS: &[char] = &['\\', '\'', '"', ';', '#', '(', ')', '[', ']'];

/// Lexer token for the body of a string literal.
#[derive(Debug, Clone, Logos)]
enum StringToken {
    #[token(r#"\""#, |_| '"')]
    #[token(r"\\", |_| '\\')]
    #[token(r"\b", |_| '\u{8}')]
    #[token(r"\f", |_| '\u{c}')]
    #[token(r"\n", |_| '\n')]
    #[token(r"\r", |_| '\r')]
    #[token(r"\t", |_| '\t')]
    Escaped(char),

    #[regex(r#"\\u\{[a-fA-F0-9]+\}"#, |lex| parse_unicode(lex.slice()))]
    Unicode(char),

    #[regex(r#"[^\\]+"#)]
    Literal,
}

/// Parses a unicode escape sequence of the form `\u{HEX}` where `HEX` is a
/// hexadecimal number representing a unicode codepoint.
fn parse_unicode(str: &str) -> Option<char> {
    // Skip the '\u{' prefix and '}' suffix
    let hex = str.get(3..str.len() - 1)?;
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code)
}

/// Replaces the escape sequences in the body of a string literal.
///
/// On failure returns the byte offset of the backslash that starts the
/// unknown escape sequence.
pub fn unescape_string(str: &str) -> Result<Cow<'_, str>, usize> {
    if !str.contains('\\') {
        return Ok(Cow::Borrowed(str));
    }

    let mut lexer = StringToken::lexer(str);
    let mut output = String::with_capacity(str.len());

    while let Some(token) = lexer.next() {
        let token = token.map_err(|()| lexer.span().start)?;

        match token {
            StringToken::Escaped(c) => output.push(c),
            StringToken::Unicode(c) => output.push(c),
            StringToken::Literal => output.push_str(lexer.slice()),
        }
    }

    Ok(Cow::Owned(output))
}

/// Render a string literal, including the surrounding double quotes.
pub fn escape_string(str: &str) -> String {
    let mut output = String::with_capacity(str.len() + 2);
    output.push('"');

    for c in str.chars() {
        match STRING_ESCAPES.iter().find(|(special, _)| *special == c) {
            Some((_, escaped)) => output.push_str(escaped),
            None => output.push(c),
        }
    }

    output.push('"');
    output
}

/// Whether `c` must be preceded by a backslash within a symbol.
pub fn needs_symbol_escape(c: char, delimiters: &DelimiterRegistry) -> bool {
    is_whitespace(c) || SYMBOL_SPECIALS.contains(&c) || delimiters.is_delimiter(c)
}

/// Render a symbol so that it reads back as the same symbol.
///
/// `reserved` identifies texts that would otherwise read back as something
/// other than a symbol, such as numbers or the nil literal. Those get their
/// first character escaped, since an atom containing an escape is always a
/// symbol.
pub fn escape_symbol<'s>(
    symbol: &'s str,
    delimiters: &DelimiterRegistry,
    reserved: impl FnOnce(&str) -> bool,
) -> Cow<'s, str> {
    let mut force = reserved(symbol);

    if !force && !symbol.chars().any(|c| needs_symbol_escape(c, delimiters)) {
        return Cow::Borrowed(symbol);
    }

    let mut output = String::with_capacity(symbol.len() + 2);

    for c in symbol.chars() {
        if force || needs_symbol_escape(c, delimiters) {
            output.push('\\');
        }
        force = false;
        output.push(c);
    }

    Cow::Owned(output)
}

#[cfg(test)]
mod test {
    use super::{escape_string, escape_symbol, unescape_string, STRING_ESCAPES};
    use crate::delimiter::{DelimiterKind, DelimiterRegistry};
    use rstest::rstest;

    #[rstest]
    #[case("string", "string")]
    #[case("\n", "\\\n")]
    #[case(r"\", r"\\")]
    #[case("hello world", r"hello\ world")]
    #[case("(a)", r"\(a\)")]
    #[case("[", r"\[")]
    #[case("'a", r"\'a")]
    #[case(r#"a"b"#, r#"a\"b"#)]
    #[case("a;b", r"a\;b")]
    #[case("#t", r"\#t")]
    #[case("日本語", "日本語")]
    #[case("a\u{a0}b", "a\u{a0}b")]
    #[case("a\u{b}b", "a\\\u{b}b")]
    fn test_escape_symbol(#[case] symbol: &str, #[case] expected: &str) {
        let registry = DelimiterRegistry::default();
        assert_eq!(expected, escape_symbol(symbol, &registry, |_| false));
    }

    #[test]
    fn escape_symbol_with_registered_delimiters() {
        let registry = DelimiterRegistry::default()
            .with(DelimiterKind::new('{', '}'))
            .unwrap();
        assert_eq!(r"\{a\}", escape_symbol("{a}", &registry, |_| false));
    }

    #[rstest]
    #[case("nil", r"\nil")]
    #[case("123", r"\123")]
    #[case("#t", r"\#t")]
    fn escape_reserved_symbol(#[case] symbol: &str, #[case] expected: &str) {
        let registry = DelimiterRegistry::default();
        assert_eq!(expected, escape_symbol(symbol, &registry, |_| true));
    }

    #[rstest]
    #[case("plain", "\"plain\"")]
    #[case("a\"b", r#""a\"b""#)]
    #[case("a\\b", r#""a\\b""#)]
    #[case("\u{8}\u{c}\n\r\t", r#""\b\f\n\r\t""#)]
    #[case("'(;)", "\"'(;)\"")]
    fn test_escape_string(#[case] string: &str, #[case] expected: &str) {
        assert_eq!(expected, escape_string(string));
    }

    #[rstest]
    #[case(r#"\""#, r#"""#)]
    #[case(r"a\\b", r"a\b")]
    #[case(r"\n\t", "\n\t")]
    #[case(r"\u{1F60A}", "\u{1F60A}")]
    #[case("no escapes", "no escapes")]
    fn test_unescape(#[case] escaped: &str, #[case] expected: &str) {
        assert_eq!(expected, unescape_string(escaped).unwrap());
    }

    #[rstest]
    #[case(r"\q", 0)]
    #[case(r"ab\z", 2)]
    #[case(r"\u{110000}", 0)]
    fn test_unescape_invalid(#[case] escaped: &str, #[case] offset: usize) {
        assert_eq!(Err(offset), unescape_string(escaped));
    }

    #[test]
    fn string_table_is_bidirectional() {
        for (c, _) in STRING_ESCAPES {
            let text = format!("x{c}y");
            let escaped = escape_string(&text);
            let body = &escaped[1..escaped.len() - 1];
            assert_eq!(text, unescape_string(body).unwrap());
        }
    }
}
