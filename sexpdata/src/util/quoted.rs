use crate::printer::{Print, Printer};

/// Prints the wrapped host value behind a quote, as in `'value`.
///
/// The wrapped value is rendered with the same options as its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Quoted<T>(pub T);

impl<T> Quoted<T> {
    /// Converts into the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Print> Print for Quoted<T> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.quoted(|printer| printer.print(&self.0))
    }
}
