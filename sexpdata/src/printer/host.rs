//! [`Print`] implementations for standard library types.
use ordered_float::OrderedFloat;
use smol_str::SmolStr;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::delimiter::DelimiterKind;

use super::{Print, Printer, SerializeError};

impl<T: Print + ?Sized> Print for &T {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        (*self).print(printer)
    }
}

impl<T: Print + ?Sized> Print for Box<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

impl<T: Print + ?Sized> Print for Rc<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

impl<T: Print + ?Sized> Print for Arc<T> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.print(self.as_ref())
    }
}

fn print_seq<'t, T, P, I>(printer: &mut P, items: I) -> Result<(), P::Error>
where
    T: Print + 't,
    P: Printer,
    I: IntoIterator<Item = &'t T>,
{
    printer.delimited(DelimiterKind::PARENS, |printer| {
        for item in items {
            printer.print(item)?;
        }
        Ok(())
    })
}

impl<T: Print> Print for [T] {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        print_seq(printer, self)
    }
}

impl<T: Print, const N: usize> Print for [T; N] {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        print_seq(printer, self)
    }
}

impl<T: Print> Print for Vec<T> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        print_seq(printer, self)
    }
}

impl<T: Print> Print for VecDeque<T> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        print_seq(printer, self)
    }
}

fn print_map<'t, K, V, P, I>(printer: &mut P, entries: I) -> Result<(), P::Error>
where
    K: AsRef<str> + 't,
    V: Print + 't,
    P: Printer,
    I: IntoIterator<Item = (&'t K, &'t V)>,
{
    printer.delimited(DelimiterKind::PARENS, |printer| {
        for (key, value) in entries {
            printer.keyword(key.as_ref())?;
            printer.print(value)?;
        }
        Ok(())
    })
}

impl<K: AsRef<str>, V: Print> Print for BTreeMap<K, V> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        print_map(printer, self)
    }
}

/// Entries are printed in iteration order.
impl<K: AsRef<str>, V: Print, S> Print for HashMap<K, V, S> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        print_map(printer, self)
    }
}

macro_rules! impl_print_tuple {
    ($($name:ident),*) => {
        impl<$($name: Print),*> Print for ($($name,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
                let ($($name,)*) = self;
                printer.tuple(|printer| {
                    $(printer.print($name)?;)*
                    Ok(())
                })
            }
        }
    };
}

impl_print_tuple!();
impl_print_tuple!(A);
impl_print_tuple!(A, B);
impl_print_tuple!(A, B, C);
impl_print_tuple!(A, B, C, D);
impl_print_tuple!(A, B, C, D, E);
impl_print_tuple!(A, B, C, D, E, F);
impl_print_tuple!(A, B, C, D, E, F, G);
impl_print_tuple!(A, B, C, D, E, F, G, H);

impl Print for str {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.host_str(self)
    }
}

impl Print for String {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.host_str(self)
    }
}

impl Print for SmolStr {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.host_str(self)
    }
}

impl Print for Cow<'_, str> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.host_str(self)
    }
}

impl Print for char {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.host_str(self.encode_utf8(&mut [0; 4]))
    }
}

impl<T: Print> Print for Option<T> {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        match self {
            Some(value) => printer.print(value),
            None => printer.none(),
        }
    }
}

impl Print for bool {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.bool(*self)
    }
}

macro_rules! impl_print_int_lossless {
    ($($int:ty),*) => {
        $(impl Print for $int {
            #[inline]
            fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
                printer.int(i64::from(*self))
            }
        })*
    };
}

impl_print_int_lossless!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_print_int_checked {
    ($($int:ty),*) => {
        $(impl Print for $int {
            fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
                let int = i64::try_from(*self).map_err(|_| {
                    SerializeError::unsupported::<$int>("integer is outside the signed 64-bit range")
                })?;
                printer.int(int)
            }
        })*
    };
}

impl_print_int_checked!(isize, usize, u64, i128, u128);

impl Print for f32 {
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        if !self.is_finite() {
            return Err(SerializeError::unsupported::<f32>("non-finite floats have no text").into());
        }

        // Shortest text that reads back as the same `f32`.
        printer.token(&format!("{self:?}"))
    }
}

impl Print for f64 {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.float(*self)
    }
}

impl Print for OrderedFloat<f64> {
    #[inline]
    fn print<P: Printer>(&self, printer: &mut P) -> Result<(), P::Error> {
        printer.float(self.into_inner())
    }
}

#[cfg(test)]
mod test {
    use crate::printer::{serialize, to_string, SerializeError, SerializeOptions, StrAs, TupleAs};
    use crate::util::{Symbol, Value};
    use smol_str::SmolStr;
    use std::collections::{BTreeMap, HashMap, VecDeque};
    use std::rc::Rc;

    #[test]
    fn sequences_print_as_lists() {
        assert_eq!("(1 2 3)", to_string(&vec![1, 2, 3]).unwrap());
        assert_eq!("(1 2)", to_string(&[1u8, 2]).unwrap());
        assert_eq!("(1 2)", to_string(&VecDeque::from([1, 2])).unwrap());
        assert_eq!("()", to_string::<[i32]>(&[]).unwrap());
        assert_eq!(r#"(("a") ())"#, to_string(&vec![vec!["a"], vec![]]).unwrap());
    }

    #[test]
    fn maps_print_keywords() {
        let map = BTreeMap::from([("a", 1), ("b", 2)]);
        assert_eq!("(:a 1 :b 2)", to_string(&map).unwrap());

        let options = SerializeOptions::default().with_key_marker('&');
        let map = HashMap::from([(String::from("key"), "value")]);
        assert_eq!(r#"(&key "value")"#, serialize(&map, &options).unwrap());
    }

    #[test]
    fn map_keys_are_escaped() {
        let map = BTreeMap::from([("two words", 1)]);
        assert_eq!(r"(:two\ words 1)", to_string(&map).unwrap());
    }

    #[test]
    fn tuples() {
        assert_eq!("()", to_string(&()).unwrap());
        assert_eq!(r#"(1 "a" t)"#, to_string(&(1, "a", true)).unwrap());

        let options = SerializeOptions::default().with_tuple_as(TupleAs::Array);
        assert_eq!(r#"[1 "a"]"#, serialize(&(1, "a"), &options).unwrap());
        assert_eq!(
            "[1 2 3 4 5 6 7 8]",
            serialize(&(1, 2, 3, 4, 5, 6, 7, 8), &options).unwrap()
        );
    }

    #[test]
    fn host_strings() {
        let options = SerializeOptions::default().with_str_as(StrAs::Symbol);
        assert_eq!(r#""a b""#, to_string("a b").unwrap());
        assert_eq!("a b", serialize("a b", &options).unwrap());
        assert_eq!(r#""c""#, to_string(&'c').unwrap());
        assert_eq!(r#""s""#, to_string(&SmolStr::new("s")).unwrap());
        assert_eq!(r#""s""#, to_string(&String::from("s")).unwrap());
    }

    #[test]
    fn string_nodes_ignore_str_as() {
        let options = SerializeOptions::default().with_str_as(StrAs::Symbol);
        assert_eq!(r#""a b""#, serialize(&Value::string("a b"), &options).unwrap());
        assert_eq!(r"a\ b", serialize(&Symbol::new("a b"), &options).unwrap());
    }

    #[test]
    fn options_and_bools() {
        assert_eq!("()", to_string(&None::<i32>).unwrap());
        assert_eq!("5", to_string(&Some(5)).unwrap());
        assert_eq!("(t ())", to_string(&(true, false)).unwrap());

        let options = SerializeOptions::default()
            .with_true_as("#t")
            .with_false_as("#f")
            .with_none_as("nil");
        assert_eq!(
            "(#t #f nil)",
            serialize(&(true, false, None::<i32>), &options).unwrap()
        );
    }

    #[test]
    fn numbers() {
        assert_eq!("-128", to_string(&i8::MIN).unwrap());
        assert_eq!("4294967295", to_string(&u32::MAX).unwrap());
        assert_eq!("9223372036854775807", to_string(&(i64::MAX as u64)).unwrap());
        assert_eq!("0.5", to_string(&0.5f32).unwrap());
        assert_eq!("0.1", to_string(&0.1f32).unwrap());
        assert_eq!("-3.4028235e38", to_string(&f32::MIN).unwrap());
        assert_eq!("2.0", to_string(&2.0f64).unwrap());
    }

    #[test]
    fn integers_out_of_range() {
        let err = to_string(&u64::MAX).unwrap_err();
        assert_eq!(
            SerializeError::Unsupported {
                type_name: "u64",
                reason: "integer is outside the signed 64-bit range"
            },
            err
        );
        assert!(to_string(&i128::MIN).is_err());
    }

    #[test]
    fn non_finite_f32_is_unsupported() {
        let err = to_string(&f32::INFINITY).unwrap_err();
        assert!(matches!(err, SerializeError::Unsupported { type_name: "f32", .. }));
    }

    #[test]
    fn errors_propagate_out_of_containers() {
        let err = to_string(&vec![Some(1.0), Some(f64::NAN)]).unwrap_err();
        assert!(matches!(err, SerializeError::Unsupported { type_name: "f64", .. }));
    }

    #[test]
    fn smart_pointers() {
        assert_eq!("(1)", to_string(&Rc::new(vec![1])).unwrap());
        assert_eq!(r#""x""#, to_string(&Box::new("x")).unwrap());
    }
}
