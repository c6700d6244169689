use super::NodeList;
use super::ident::{Constant, Identifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Scalar type, optionally parameterized: `INT64`, `NUMERIC(10, 2)`.
    Named {
        name: Identifier,
        params: NodeList<Constant>,
    },
    Array(Box<Type>),
    Struct(NodeList<StructField>),
    /// `ANY TYPE`, only meaningful for function parameters.
    AnyType,
}

impl Type {
    pub fn named(name: &str) -> Self {
        Type::Named {
            name: Identifier::new(name),
            params: NodeList::new(),
        }
    }
}

/// Field of a `STRUCT<…>` type. The name is optional: `STRUCT<INT64>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: Option<Identifier>,
    pub ty: Type,
}

/// `name TYPE`, as used by function parameters and column definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: Identifier,
    pub ty: Type,
}
