use super::NodeList;
use super::expr::Expr;
use super::ident::{Constant, Identifier, IdentifierPath};
use super::query::Query;
use super::types::{NamedType, Type};

/// Root node: every statement of one input, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    pub statements: Vec<Statement>,
    /// Comments after the last statement terminator.
    pub trailing_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Query(QueryStatement),
    CreateFunction(Box<FunctionDef>),
    CreateTable(Box<CreateTable>),
    CreateView(Box<CreateView>),
    Insert(Box<Insert>),
}

impl Statement {
    /// Comments collected while parsing this statement, rendered above it.
    pub fn comments(&self) -> &[String] {
        match self {
            Statement::Query(stmt) => &stmt.comments,
            Statement::CreateFunction(def) => &def.comments,
            Statement::CreateTable(stmt) => &stmt.comments,
            Statement::CreateView(stmt) => &stmt.comments,
            Statement::Insert(stmt) => &stmt.comments,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Query(_) => "Query",
            Statement::CreateFunction(_) => "CreateFunction",
            Statement::CreateTable(_) => "CreateTable",
            Statement::CreateView(_) => "CreateView",
            Statement::Insert(_) => "Insert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStatement {
    pub comments: Vec<String>,
    pub query: Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempKeyword {
    Temp,
    Temporary,
}

impl TempKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            TempKeyword::Temp => "TEMP",
            TempKeyword::Temporary => "TEMPORARY",
        }
    }
}

/// `key = value` inside `OPTIONS(…)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub name: Identifier,
    pub value: Expr,
}

/// `CREATE [OR REPLACE] [TEMP] FUNCTION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub comments: Vec<String>,
    pub or_replace: bool,
    pub temporary: Option<TempKeyword>,
    pub name: IdentifierPath,
    pub params: NodeList<NamedType>,
    pub returns: Option<Type>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBody {
    /// `AS expr`
    Sql(Expr),
    /// `LANGUAGE lang AS """code""" [OPTIONS(…)]`. Options exist only here.
    Foreign {
        language: Identifier,
        code: Constant,
        options: NodeList<OptionItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub comments: Vec<String>,
    pub or_replace: bool,
    pub temporary: Option<TempKeyword>,
    pub if_not_exists: bool,
    pub name: IdentifierPath,
    pub columns: NodeList<NamedType>,
    pub options: NodeList<OptionItem>,
    pub query: Option<Query>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateView {
    pub comments: Vec<String>,
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: IdentifierPath,
    pub options: NodeList<OptionItem>,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    pub comments: Vec<String>,
    pub table: IdentifierPath,
    pub columns: NodeList<Identifier>,
    pub source: InsertSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertSource {
    Query(Box<Query>),
    Values(NodeList<NodeList<Expr>>),
}
