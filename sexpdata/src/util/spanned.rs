use crate::{
    parser::Span,
    printer::{Print, Printer},
};

/// Records the source span around an inner type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub inner: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(inner: T, span: Span) -> Self {
        Self { inner, span }
    }

    /// Converts into the inner type.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Print> Print for Spanned<T> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        self.inner.print(printer)
    }
}
