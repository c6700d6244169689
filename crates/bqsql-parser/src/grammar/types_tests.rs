use super::Consume;
use crate::ast::{Constant, Identifier, NamedType, StructField, Type};
use crate::format::types::type_sql;
use crate::parser::Cursor;

fn parse_type(source: &str) -> Type {
    let mut cur = Cursor::new(source).unwrap();
    let ty = Type::parse(&mut cur).unwrap();
    assert!(cur.at_eof(), "trailing input after type in {source:?}");
    ty
}

#[test]
fn named_type() {
    assert_eq!(parse_type("INT64"), Type::named("INT64"));
}

#[test]
fn parameterized_type() {
    let Type::Named { name, params } = parse_type("NUMERIC(10, 2)") else {
        panic!("expected a named type");
    };

    assert_eq!(name.as_str(), "NUMERIC");
    assert_eq!(
        params.as_slice(),
        &[Constant::number("10"), Constant::number("2")]
    );
}

#[test]
fn any_type() {
    assert_eq!(parse_type("ANY TYPE"), Type::AnyType);
}

#[test]
fn nested_array_closes_both_brackets() {
    assert_eq!(
        parse_type("ARRAY<ARRAY<INT64>>"),
        Type::Array(Box::new(Type::Array(Box::new(Type::named("INT64")))))
    );
}

#[test]
fn struct_fields_named_and_unnamed() {
    let Type::Struct(fields) = parse_type("STRUCT<INT64, x STRING>") else {
        panic!("expected a struct type");
    };

    assert_eq!(
        fields.as_slice(),
        &[
            StructField {
                name: None,
                ty: Type::named("INT64"),
            },
            StructField {
                name: Some(Identifier::new("x")),
                ty: Type::named("STRING"),
            },
        ]
    );
}

#[test]
fn empty_struct() {
    assert_eq!(parse_type("STRUCT<>"), Type::Struct(Vec::new().into()));
    assert_eq!(parse_type("STRUCT< >"), Type::Struct(Vec::new().into()));
    assert_eq!(
        parse_type("ARRAY<STRUCT<>>"),
        Type::Array(Box::new(Type::Struct(Vec::new().into())))
    );
    assert_eq!(type_sql(&parse_type("STRUCT<>")), "STRUCT<>");
}

#[test]
fn type_text_round_trips() {
    for source in [
        "INT64",
        "STRING(10)",
        "ARRAY<STRUCT<a INT64, b ARRAY<STRING>>>",
        "STRUCT<`order` INT64, DATE>",
        "ANY TYPE",
    ] {
        assert_eq!(type_sql(&parse_type(source)), source);
    }
}

#[test]
fn named_type_requires_a_type() {
    let mut cur = Cursor::new("x").unwrap();

    let err = NamedType::parse(&mut cur).unwrap_err();

    assert_eq!(
        err.to_string(),
        "syntax error at 1..1: expected a type, found end of input"
    );
}

#[test]
fn unclosed_array_type() {
    let mut cur = Cursor::new("ARRAY<INT64").unwrap();

    let err = Type::parse(&mut cur).unwrap_err();

    assert_eq!(
        err.to_string(),
        "syntax error at 11..11: expected `>`, found end of input"
    );
}
