use super::Consume;
use crate::Result;
use crate::ast::{Constant, ConstantKind, Identifier, IdentifierPath};
use crate::parser::Cursor;
use crate::parser::keywords::is_reserved;
use crate::parser::syntax_kind::SyntaxKind;

impl Consume for Identifier {
    const EXPECTED: &'static str = "an identifier";

    /// A backquoted name or any word that is not reserved.
    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let accepted = match (cur.peek_kind(), cur.peek_text()) {
            (Some(SyntaxKind::QuotedIdent), _) => true,
            (Some(SyntaxKind::Word), Some(text)) => !is_reserved(text),
            _ => false,
        };
        Ok(if accepted {
            cur.bump().map(Identifier::new)
        } else {
            None
        })
    }
}

/// Any word, reserved or not. Used after `.`, where keywords are plain names.
pub(crate) fn name_segment(cur: &mut Cursor<'_>) -> Option<Identifier> {
    match cur.peek_kind() {
        Some(SyntaxKind::Word | SyntaxKind::QuotedIdent) => cur.bump().map(Identifier::new),
        _ => None,
    }
}

impl Consume for IdentifierPath {
    const EXPECTED: &'static str = "a name";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some(first) = Identifier::consume(cur)? else {
            return Ok(None);
        };
        let mut rest = Vec::new();
        while let Some(segment) = cur.attempt(|cur| {
            if cur.consume(".").is_none() {
                return Ok(None);
            }
            Ok(name_segment(cur))
        })? {
            rest.push(segment);
        }
        Ok(Some(IdentifierPath::new(first, rest)))
    }
}

/// `[AS] alias`. The implicit form only accepts non-reserved words.
pub(crate) fn alias(cur: &mut Cursor<'_>) -> Result<Option<Identifier>> {
    if cur.consume("AS").is_some() {
        return Identifier::parse(cur).map(Some);
    }
    Identifier::consume(cur)
}

impl Consume for Constant {
    const EXPECTED: &'static str = "a literal";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let constant = match cur.peek_kind() {
            Some(SyntaxKind::String) => cur.bump().map(|text| {
                let prefix = text.split(['\'', '"']).next().unwrap_or_default();
                let kind = if prefix.contains(['b', 'B']) {
                    ConstantKind::Bytes
                } else {
                    ConstantKind::String
                };
                Constant::new(kind, text)
            }),
            Some(SyntaxKind::Number) => cur.bump().map(Constant::number),
            Some(SyntaxKind::Word) => {
                if let Some(text) = cur.consume_any(&["TRUE", "FALSE"]) {
                    Some(Constant::new(ConstantKind::Boolean, text.to_ascii_uppercase()))
                } else {
                    cur.consume("NULL")
                        .map(|_| Constant::new(ConstantKind::Null, "NULL"))
                }
            }
            _ => None,
        };
        Ok(constant)
    }
}
