#![cfg(feature = "derive")]

use sexpdata::{serialize, to_string, to_string_pretty, Print, SerializeOptions, TupleAs};

#[derive(Print)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Print)]
struct Config {
    name: String,
    #[sexpr(rename = "max-depth")]
    max_depth: u32,
    tags: Vec<&'static str>,
    parent: Option<Box<Config>>,
    #[sexpr(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
}

#[derive(Print)]
struct Pair<A, B>(A, B);

#[derive(Print)]
struct Wrapper(#[sexpr(skip)] #[allow(dead_code)] u8, f64);

#[derive(Print)]
struct Marker;

#[derive(Print)]
struct Empty {}

#[test]
fn named_fields_print_as_keywords() {
    assert_eq!("(:x 1 :y -2)", to_string(&Point { x: 1, y: -2 }).unwrap());
}

#[test]
fn rename_and_skip() {
    let config = Config {
        name: "child".into(),
        max_depth: 3,
        tags: vec!["a", "b"],
        parent: Some(Box::new(Config {
            name: "root".into(),
            max_depth: 10,
            tags: vec![],
            parent: None,
            cache: vec![1, 2, 3],
        })),
        cache: vec![],
    };

    assert_eq!(
        r#"(:name "child" :max-depth 3 :tags ("a" "b") :parent (:name "root" :max-depth 10 :tags () :parent ()))"#,
        to_string(&config).unwrap()
    );
}

#[test]
fn tuple_structs_follow_tuple_as() {
    let pair = Pair("a", Point { x: 0, y: 0 });
    assert_eq!(r#"("a" (:x 0 :y 0))"#, to_string(&pair).unwrap());

    let options = SerializeOptions::default().with_tuple_as(TupleAs::Array);
    assert_eq!(r#"["a" (:x 0 :y 0)]"#, serialize(&pair, &options).unwrap());

    assert_eq!("(2.5)", to_string(&Wrapper(7, 2.5)).unwrap());
}

#[test]
fn unit_structs_print_their_name() {
    assert_eq!("Marker", to_string(&Marker).unwrap());
    assert_eq!("()", to_string(&Empty {}).unwrap());
}

#[test]
fn derived_values_pretty_print() {
    let points = vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
    assert_eq!(
        "((:x 1 :y 2)\n  (:x 3 :y 4))",
        to_string_pretty(&points, 16).unwrap()
    );
}

#[test]
fn errors_surface_from_fields() {
    let pair = Pair(u64::MAX, 1);
    assert!(to_string(&pair).is_err());
}
