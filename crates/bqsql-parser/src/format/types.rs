use bqsql_core::Doc;

use super::{Format, text};
use crate::ast::{Constant, Identifier, IdentifierPath, NamedType, StructField, Type};

impl Format for Identifier {
    fn doc(&self, _compact: bool) -> Doc {
        text(self.as_str())
    }
}

impl Format for IdentifierPath {
    fn doc(&self, _compact: bool) -> Doc {
        text(self.dotted())
    }
}

impl Format for Constant {
    fn doc(&self, _compact: bool) -> Doc {
        text(self.text.as_str())
    }
}

/// Types always print on one line.
impl Format for Type {
    fn doc(&self, _compact: bool) -> Doc {
        text(type_sql(self))
    }
}

impl Format for NamedType {
    fn doc(&self, _compact: bool) -> Doc {
        text(format!("{} {}", self.name.as_str(), type_sql(&self.ty)))
    }
}

pub(crate) fn type_sql(ty: &Type) -> String {
    match ty {
        Type::Named { name, params } if params.is_empty() => name.as_str().to_owned(),
        Type::Named { name, params } => {
            let params: Vec<&str> = params.iter().map(|p| p.text.as_str()).collect();
            format!("{}({})", name.as_str(), params.join(", "))
        }
        Type::Array(inner) => format!("ARRAY<{}>", type_sql(inner)),
        Type::Struct(fields) => format!("STRUCT<{}>", struct_fields_sql(fields.as_slice())),
        Type::AnyType => "ANY TYPE".to_owned(),
    }
}

pub(crate) fn struct_fields_sql(fields: &[StructField]) -> String {
    let fields: Vec<String> = fields
        .iter()
        .map(|field| match &field.name {
            Some(name) => format!("{} {}", name.as_str(), type_sql(&field.ty)),
            None => type_sql(&field.ty),
        })
        .collect();
    fields.join(", ")
}
