use sexpdata::{
    impl_print_by_to_sexp, load_one, parse, serialize, to_string, DelimiterKind,
    DelimiterRegistry, ParseOptions, SerializeOptions, StrAs, ToSexp, Value,
};

struct Celsius(f64);

impl ToSexp for Celsius {
    type Sexp = Value;

    fn to_sexp(&self) -> Value {
        Value::list([Value::symbol("celsius"), Value::float(self.0)])
    }
}

struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl ToSexp for Color {
    type Sexp = (&'static str, [u8; 3]);

    fn to_sexp(&self) -> Self::Sexp {
        ("rgb", [self.red, self.green, self.blue])
    }
}

impl_print_by_to_sexp!(Celsius, Color);

#[test]
fn conversion_hook_substitutes_values() {
    assert_eq!("(celsius 21.5)", to_string(&Celsius(21.5)).unwrap());

    let color = Color {
        red: 255,
        green: 0,
        blue: 10,
    };
    assert_eq!(r#"("rgb" (255 0 10))"#, to_string(&color).unwrap());

    let options = SerializeOptions::default().with_str_as(StrAs::Symbol);
    assert_eq!("(rgb (255 0 10))", serialize(&color, &options).unwrap());
}

#[test]
fn converted_values_nest_in_host_containers() {
    let readings = vec![Celsius(1.0), Celsius(-3.25)];
    assert_eq!(
        "((celsius 1.0) (celsius -3.25))",
        to_string(&readings).unwrap()
    );
}

#[test]
fn printed_conversions_read_back() {
    let sexp = to_string(&Celsius(0.5)).unwrap();
    let value = load_one(&sexp, &ParseOptions::default()).unwrap();
    assert_eq!(Celsius(0.5).to_sexp(), value);
}

#[test]
fn registered_delimiters_round_trip() {
    let braces = DelimiterKind::new('{', '}');
    let registry = DelimiterRegistry::default().with(braces).unwrap();
    let parse_options = ParseOptions::default().with_delimiters(registry.clone());
    let serialize_options = SerializeOptions::default().with_delimiters(registry);

    let forms = parse("{a [b] (c {})} x\\}", &parse_options).unwrap();
    let expected = vec![
        Value::Delimited(sexpdata::Delimited::new(
            braces,
            vec![
                Value::symbol("a"),
                Value::array([Value::symbol("b")]),
                Value::list([
                    Value::symbol("c"),
                    Value::Delimited(sexpdata::Delimited::new(braces, vec![])),
                ]),
            ],
        )),
        Value::symbol("x}"),
    ];
    assert_eq!(expected, forms);

    let printed: Vec<String> = forms
        .iter()
        .map(|form| serialize(form, &serialize_options).unwrap())
        .collect();
    assert_eq!(vec!["{a [b] (c {})}", r"x\}"], printed);
}

#[test]
fn unregistered_characters_are_plain_atoms() {
    let forms = parse("{a}", &ParseOptions::default()).unwrap();
    assert_eq!(vec![Value::symbol("{a}")], forms);
}
