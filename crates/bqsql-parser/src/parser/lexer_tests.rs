use rowan::TextRange;

use super::lexer::{Comment, lex, token_text, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::Error;

/// Format tokens without trivia (default for most tests)
fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

/// Format tokens with trivia included
fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let tokens = lex(input);
    let mut out = String::new();
    for token in tokens {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) [ ] { } , ; . + - * / %"), @r#"
    ParenOpen "("
    ParenClose ")"
    BracketOpen "["
    BracketClose "]"
    BraceOpen "{"
    BraceClose "}"
    Comma ","
    Semicolon ";"
    Dot "."
    Plus "+"
    Minus "-"
    Star "*"
    Slash "/"
    Percent "%"
    "#);
}

#[test]
fn operators() {
    insta::assert_snapshot!(snapshot("= != <> < > <= >= << || | & ^ ~ @ ? :"), @r#"
    Eq "="
    NotEq "!="
    LtGt "<>"
    Lt "<"
    Gt ">"
    LtEq "<="
    GtEq ">="
    ShiftLeft "<<"
    Concat "||"
    Pipe "|"
    Ampersand "&"
    Caret "^"
    Tilde "~"
    At "@"
    Question "?"
    Colon ":"
    "#);
}

#[test]
fn shift_right_is_two_tokens() {
    insta::assert_snapshot!(snapshot("a >> b"), @r#"
    Word "a"
    Gt ">"
    Gt ">"
    Word "b"
    "#);
}

#[test]
fn nested_generic_closes_twice() {
    insta::assert_snapshot!(snapshot("ARRAY<ARRAY<INT64>>"), @r#"
    Word "ARRAY"
    Lt "<"
    Word "ARRAY"
    Lt "<"
    Word "INT64"
    Gt ">"
    Gt ">"
    "#);
}

#[test]
fn words_and_identifiers() {
    insta::assert_snapshot!(snapshot("SELECT a_1, _x, `my table` FROM t"), @r#"
    Word "SELECT"
    Word "a_1"
    Comma ","
    Word "_x"
    Comma ","
    QuotedIdent "`my table`"
    Word "FROM"
    Word "t"
    "#);
}

#[test]
fn numbers() {
    insta::assert_snapshot!(snapshot("1 1.5 1.5e3 2E-2 .5 0x1F 3."), @r#"
    Number "1"
    Number "1.5"
    Number "1.5e3"
    Number "2E-2"
    Number ".5"
    Number "0x1F"
    Number "3."
    "#);
}

#[test]
fn strings() {
    insta::assert_snapshot!(snapshot(r#"'abc' "d" r'\d+' b'xy' RB"z""#), @r#"
    String "'abc'"
    String "\"d\""
    String "r'\\d+'"
    String "b'xy'"
    String "RB\"z\""
    "#);
}

#[test]
fn string_with_escaped_quote() {
    insta::assert_snapshot!(snapshot(r"'it\'s' x"), @r#"
    String "'it\\'s'"
    Word "x"
    "#);
}

#[test]
fn triple_quoted_string_spans_lines() {
    let input = "\"\"\"\n  return x * 2;\n\"\"\" AS";
    let tokens: Vec<_> = lex(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .collect();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, SyntaxKind::String);
    assert_eq!(
        token_text(input, &tokens[0]),
        "\"\"\"\n  return x * 2;\n\"\"\""
    );
    assert_eq!(token_text(input, &tokens[1]), "AS");
}

#[test]
fn triple_quoted_string_keeps_inner_quotes() {
    insta::assert_snapshot!(snapshot("'''it's'''"), @r#"
    String "'''it's'''"
    "#);
}

#[test]
fn comments_are_trivia() {
    insta::assert_snapshot!(snapshot_raw("SELECT 1 -- one\n# two\n/* three */"), @r##"
    Word "SELECT"
    Whitespace " "
    Number "1"
    Whitespace " "
    LineComment "-- one"
    Whitespace "\n"
    LineComment "# two"
    Whitespace "\n"
    BlockComment "/* three */"
    "##);
}

#[test]
fn minus_is_not_a_comment() {
    insta::assert_snapshot!(snapshot("a - -b"), @r#"
    Word "a"
    Minus "-"
    Minus "-"
    Word "b"
    "#);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("a $$ b"), @r#"
    Word "a"
    Garbage "$$"
    Word "b"
    "#);
}

#[test]
fn garbage_at_end() {
    insta::assert_snapshot!(snapshot("a $"), @r#"
    Word "a"
    Garbage "$"
    "#);
}

#[test]
fn tokenize_moves_comments_aside() {
    let lexed = tokenize("-- lead\nSELECT /* mid */ 1").unwrap();

    let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::Word, SyntaxKind::Number]);
    assert_eq!(
        lexed.comments,
        vec![
            Comment {
                before: 0,
                span: TextRange::new(0.into(), 7.into()),
            },
            Comment {
                before: 1,
                span: TextRange::new(15.into(), 24.into()),
            },
        ]
    );
}

#[test]
fn tokenize_rejects_garbage() {
    let Err(Error::Lexical(err)) = tokenize("SELECT $") else {
        panic!("expected a lexical error");
    };

    assert_eq!(err.message, "unrecognized input `$`");
    assert_eq!(err.range, TextRange::new(7.into(), 8.into()));
}

#[test]
fn empty_input() {
    assert!(lex("").is_empty());
    let lexed = tokenize("   ").unwrap();
    assert!(lexed.tokens.is_empty());
    assert!(lexed.comments.is_empty());
}
