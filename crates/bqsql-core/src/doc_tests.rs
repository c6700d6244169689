use crate::Doc;

#[test]
fn append_flattens_line() {
    let doc = Doc::line([Doc::text("a"), Doc::text("b")]).append(Doc::text(","));
    assert_eq!(
        doc,
        Doc::Line(vec![Doc::text("a"), Doc::text("b"), Doc::text(",")])
    );
}

#[test]
fn append_wraps_non_line() {
    let doc = Doc::text("a").append(Doc::text(";"));
    assert_eq!(doc, Doc::Line(vec![Doc::text("a"), Doc::text(";")]));
}

#[test]
fn has_choice_looks_through_containers() {
    let nested = Doc::stack([
        Doc::text("x"),
        Doc::indent(Doc::wrap([Doc::choice(Doc::text("a"), Doc::text("b"))], " ")),
    ]);
    assert!(nested.has_choice());
    assert!(!Doc::line([Doc::text("a"), Doc::stack([Doc::text("b")])]).has_choice());
}

#[test]
fn conversions() {
    assert_eq!(Doc::from("x"), Doc::text("x"));
    assert_eq!(Doc::from(String::from("y")), Doc::Text("y".into()));
    assert_eq!(Doc::empty(), Doc::text(""));
}
