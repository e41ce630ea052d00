use crate::delimiter::DelimiterKind;

use super::{Print, Printer, SerializeError, SerializeOptions};

/// Printer that writes everything on a single line.
struct SimplePrinter<'o> {
    needs_whitespace: bool,
    string: String,
    options: &'o SerializeOptions,
}

impl<'o> SimplePrinter<'o> {
    pub fn new(options: &'o SerializeOptions) -> Self {
        Self {
            needs_whitespace: false,
            string: String::new(),
            options,
        }
    }

    #[inline]
    fn separate(&mut self) {
        if self.needs_whitespace {
            self.string.push(' ');
        }
    }
}

impl<'o> Printer for SimplePrinter<'o> {
    type Error = SerializeError;

    #[inline]
    fn options(&self) -> &SerializeOptions {
        self.options
    }

    fn token(&mut self, token: &str) -> Result<(), Self::Error> {
        self.separate();
        self.string.push_str(token);
        self.needs_whitespace = true;
        Ok(())
    }

    fn quoted<F>(&mut self, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.separate();
        self.string.push('\'');
        self.needs_whitespace = false;
        f(self)
    }

    fn delimited<F>(&mut self, kind: DelimiterKind, f: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.separate();
        self.string.push(kind.opener);
        self.needs_whitespace = false;
        f(self)?;
        self.string.push(kind.closer);
        self.needs_whitespace = true;

        Ok(())
    }
}

pub(super) fn render<T: Print + ?Sized>(
    value: &T,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    let mut printer = SimplePrinter::new(options);
    printer.print(value)?;
    Ok(printer.string)
}

/// Print a `T` into an s-expression string with the default options.
///
/// This function does not produce any line breaks, indentation, or unnecessary whitespace.
/// Where human readability is a concern, consider using the [`to_string_pretty`] function instead.
///
/// [`to_string_pretty`]: `crate::printer::to_string_pretty`
pub fn to_string<T: Print + ?Sized>(value: &T) -> Result<String, SerializeError> {
    render(value, &SerializeOptions::default())
}
