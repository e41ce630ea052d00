use crate::delimiter::DelimiterKind;

use super::{Print, Printer, SerializeError, SerializeOptions};
use pretty::DocAllocator as _;

type Doc<'a> = pretty::DocBuilder<'a, pretty::Arena<'a>>;

/// A pretty printer that uses the `pretty` crate to format the output.
struct PrettyPrinter<'a, 'o> {
    arena: &'a pretty::Arena<'a>,
    items: Vec<Doc<'a>>,
    depth: usize,
    options: &'o SerializeOptions,
}

impl<'a, 'o> PrettyPrinter<'a, 'o> {
    /// Drain the docs pushed by `f` after running it.
    fn collect<F>(&mut self, f: F) -> Result<Vec<Doc<'a>>, SerializeError>
    where
        F: FnOnce(&mut Self) -> Result<(), SerializeError>,
    {
        let position = self.items.len();
        f(self)?;
        Ok(self.items.drain(position..).collect())
    }
}

impl<'a, 'o> Printer for PrettyPrinter<'a, 'o> {
    type Error = SerializeError;

    #[inline]
    fn options(&self) -> &SerializeOptions {
        self.options
    }

    fn token(&mut self, token: &str) -> Result<(), Self::Error> {
        let doc = self.arena.text(token.to_string());
        self.items.push(doc);
        Ok(())
    }

    fn quoted<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        let items = self.collect(f)?;
        let doc = self.arena.text("'").append(self.arena.concat(items));
        self.items.push(doc);
        Ok(())
    }

    fn delimited<F>(&mut self, kind: DelimiterKind, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.depth += 1;
        let items = self.collect(f);
        self.depth -= 1;
        let items = items?;

        // Broken containers put each item on its own line, indented one level deeper.
        let separator = self
            .arena
            .hardline()
            .append(self.arena.text(self.options.indent.repeat(self.depth + 1)))
            .flat_alt(self.arena.space());

        let doc = self
            .arena
            .text(kind.opener.to_string())
            .append(self.arena.intersperse(items, separator))
            .append(self.arena.text(kind.closer.to_string()))
            .group();

        self.items.push(doc);
        Ok(())
    }
}

pub(super) fn render<T: Print + ?Sized>(
    value: &T,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    let arena = pretty::Arena::new();
    let mut printer = PrettyPrinter {
        arena: &arena,
        items: vec![],
        depth: 0,
        options,
    };

    printer.print(value)?;

    let doc = arena.concat(printer.items);
    let mut string = String::new();
    // Writing into a `String` never fails.
    let _ = doc.render_fmt(options.width, &mut string);
    Ok(string)
}

/// Pretty print a `T` into an s-expression string.
///
/// Containers that do not fit within `width` are broken over several lines,
/// using the otherwise default [`SerializeOptions`].
pub fn to_string_pretty<T: Print + ?Sized>(
    value: &T,
    width: usize,
) -> Result<String, SerializeError> {
    let options = SerializeOptions::default()
        .with_pretty_print(true)
        .with_width(width);
    render(value, &options)
}

#[cfg(test)]
mod test {
    use super::to_string_pretty;
    use crate::printer::{serialize, SerializeOptions};
    use crate::util::Value;

    fn sample() -> Value {
        Value::list([
            Value::symbol("define"),
            Value::list([Value::symbol("square"), Value::symbol("x")]),
            Value::list([Value::symbol("*"), Value::symbol("x"), Value::symbol("x")]),
        ])
    }

    #[test]
    fn fits_on_one_line() {
        assert_eq!(
            "(define (square x) (* x x))",
            to_string_pretty(&sample(), 80).unwrap()
        );
    }

    #[test]
    fn breaks_outer_container_first() {
        let expected = "(define\n  (square x)\n  (* x x))";
        assert_eq!(expected, to_string_pretty(&sample(), 20).unwrap());
    }

    #[test]
    fn zero_width_breaks_every_container() {
        let expected = "(define\n  (square\n    x)\n  (*\n    x\n    x))";
        assert_eq!(expected, to_string_pretty(&sample(), 0).unwrap());
    }

    #[test]
    fn custom_indent() {
        let options = SerializeOptions::default()
            .with_pretty_print(true)
            .with_width(0)
            .with_indent("\t");
        let value = Value::array([Value::Int(1), Value::Int(2)]);
        assert_eq!("[1\n\t2]", serialize(&value, &options).unwrap());
    }

    #[test]
    fn quote_stays_attached() {
        let value = Value::quoted(Value::list([Value::symbol("a"), Value::symbol("b")]));
        assert_eq!("'(a\n  b)", to_string_pretty(&value, 0).unwrap());
    }

    #[test]
    fn empty_containers() {
        let value = Value::list([Value::nil(), Value::array([])]);
        assert_eq!("(()\n  [])", to_string_pretty(&value, 0).unwrap());
    }
}
