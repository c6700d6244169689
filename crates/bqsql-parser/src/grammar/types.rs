use super::{Consume, comma_separated};
use crate::Result;
use crate::ast::{Constant, Identifier, NamedType, NodeList, StructField, Type};
use crate::parser::Cursor;
use crate::parser::syntax_kind::SyntaxKind;

impl Consume for Type {
    const EXPECTED: &'static str = "a type";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cur.consume_seq(&["ANY", "TYPE"]).is_some() {
            return Ok(Some(Type::AnyType));
        }
        if cur.consume_seq(&["ARRAY", "<"]).is_some() {
            let element = cur.descend(Type::parse)?;
            cur.expect(">")?;
            return Ok(Some(Type::Array(Box::new(element))));
        }
        // `<>` lexes as one token.
        if cur.consume_seq(&["STRUCT", "<>"]).is_some() {
            return Ok(Some(Type::Struct(NodeList::new())));
        }
        if cur.consume_seq(&["STRUCT", "<"]).is_some() {
            return cur
                .descend(struct_fields)
                .map(|fields| Some(Type::Struct(fields)));
        }
        if cur.peek_kind() != Some(SyntaxKind::Word) {
            return Ok(None);
        }
        let Some(name) = cur.bump().map(Identifier::new) else {
            return Ok(None);
        };
        let params = if cur.peek("(") && cur.nth_kind(1) == Some(SyntaxKind::Number) {
            cur.expect("(")?;
            let params = comma_separated(cur, Constant::parse)?;
            cur.expect(")")?;
            params
        } else {
            NodeList::new()
        };
        Ok(Some(Type::Named { name, params }))
    }
}

/// Fields of `STRUCT<…>`, called after the opening `<`; consumes the closing `>`.
pub(crate) fn struct_fields(cur: &mut Cursor<'_>) -> Result<NodeList<StructField>> {
    if cur.consume(">").is_some() {
        return Ok(NodeList::new());
    }
    let fields = comma_separated(cur, struct_field)?;
    cur.expect(">")?;
    Ok(fields)
}

/// Two names in a row mean `name TYPE`; a lone name is the type itself.
fn struct_field(cur: &mut Cursor<'_>) -> Result<StructField> {
    let named = matches!(
        cur.peek_kind(),
        Some(SyntaxKind::Word | SyntaxKind::QuotedIdent)
    ) && cur.nth_kind(1) == Some(SyntaxKind::Word);
    let name = if named {
        cur.bump().map(Identifier::new)
    } else {
        None
    };
    let ty = Type::parse(cur)?;
    Ok(StructField { name, ty })
}

impl Consume for NamedType {
    const EXPECTED: &'static str = "a name and type";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some(name) = Identifier::consume(cur)? else {
            return Ok(None);
        };
        let ty = Type::parse(cur)?;
        Ok(Some(NamedType { name, ty }))
    }
}
