use super::{Consume, comma_separated, parenthesized};
use crate::Result;
use crate::ast::{
    Constant, CreateTable, CreateView, Expr, FunctionBody, FunctionDef, Identifier,
    IdentifierPath, Insert, InsertSource, NamedType, NodeList, OptionItem, Query, QueryStatement,
    Script, Statement, TempKeyword, Type,
};
use crate::parser::Cursor;
use crate::parser::syntax_kind::SyntaxKind;

/// Whole input: statements separated by `;`, trailing `;` optional.
pub(crate) fn script(cur: &mut Cursor<'_>) -> Result<Script> {
    let mut statements = Vec::new();
    loop {
        while cur.consume(";").is_some() {}
        if cur.at_eof() {
            break;
        }
        let start = cur.offset();
        let statement = Statement::parse(cur)?;
        tracing::debug!(
            kind = statement.kind_name(),
            start = u32::from(start),
            end = u32::from(cur.offset()),
            "parsed statement"
        );
        statements.push(statement);
        if cur.consume(";").is_none() {
            if !cur.at_eof() {
                return Err(cur.error("`;` or end of input"));
            }
            break;
        }
    }
    let trailing_comments = cur.get_comments();
    Ok(Script {
        statements,
        trailing_comments,
    })
}

type StatementRule = fn(&mut Cursor<'_>) -> Result<Option<Statement>>;

const STATEMENTS: &[(&str, StatementRule)] = &[
    ("CreateFunction", create_function),
    ("CreateTable", create_table),
    ("CreateView", create_view),
    ("Insert", insert),
    ("Query", query),
];

impl Consume for Statement {
    const EXPECTED: &'static str = "a statement";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        for (name, rule) in STATEMENTS {
            tracing::trace!(alternative = *name, "trying statement");
            if let Some(statement) = cur.attempt(*rule)? {
                return Ok(Some(statement));
            }
        }
        Ok(None)
    }
}

fn create_function(cur: &mut Cursor<'_>) -> Result<Option<Statement>> {
    Ok(FunctionDef::consume(cur)?.map(|def| Statement::CreateFunction(Box::new(def))))
}

fn query(cur: &mut Cursor<'_>) -> Result<Option<Statement>> {
    let Some(query) = Query::consume(cur)? else {
        return Ok(None);
    };
    let comments = cur.get_comments();
    Ok(Some(Statement::Query(QueryStatement { comments, query })))
}

/// `CREATE [OR REPLACE] [TEMP|TEMPORARY] <object>`, or `None` when the object differs.
fn create_header(cur: &mut Cursor<'_>, object: &str) -> Option<(bool, Option<TempKeyword>)> {
    cur.consume("CREATE")?;
    let or_replace = cur.consume_seq(&["OR", "REPLACE"]).is_some();
    let temporary = if cur.consume("TEMP").is_some() {
        Some(TempKeyword::Temp)
    } else if cur.consume("TEMPORARY").is_some() {
        Some(TempKeyword::Temporary)
    } else {
        None
    };
    cur.consume(object)?;
    Some((or_replace, temporary))
}

fn if_not_exists(cur: &mut Cursor<'_>) -> bool {
    cur.consume_seq(&["IF", "NOT", "EXISTS"]).is_some()
}

/// `OPTIONS(key = value, …)`, or an empty list when absent.
fn options(cur: &mut Cursor<'_>) -> Result<NodeList<OptionItem>> {
    if cur.consume("OPTIONS").is_none() {
        return Ok(NodeList::new());
    }
    parenthesized(cur, |cur| {
        let name = Identifier::parse(cur)?;
        cur.expect("=")?;
        let value = Expr::parse(cur)?;
        Ok(OptionItem { name, value })
    })
}

impl Consume for FunctionDef {
    const EXPECTED: &'static str = "`CREATE FUNCTION`";

    /// The body form is decided by what follows the signature: `LANGUAGE`
    /// selects a foreign-code body, otherwise `AS expr` is required.
    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some((or_replace, temporary)) = create_header(cur, "FUNCTION") else {
            return Ok(None);
        };
        let name = IdentifierPath::parse(cur)?;
        let params = parenthesized(cur, NamedType::parse)?;
        let returns = if cur.consume("RETURNS").is_some() {
            Some(Type::parse(cur)?)
        } else {
            None
        };

        let body = if cur.consume("LANGUAGE").is_some() {
            let language = Identifier::parse(cur)?;
            cur.expect("AS")?;
            if cur.peek_kind() != Some(SyntaxKind::String) {
                return Err(cur.error("a string literal"));
            }
            let code = Constant::parse(cur)?;
            let options = options(cur)?;
            FunctionBody::Foreign {
                language,
                code,
                options,
            }
        } else {
            cur.expect("AS")?;
            FunctionBody::Sql(Expr::parse(cur)?)
        };

        let comments = cur.get_comments();
        Ok(Some(FunctionDef {
            comments,
            or_replace,
            temporary,
            name,
            params,
            returns,
            body,
        }))
    }
}

fn create_table(cur: &mut Cursor<'_>) -> Result<Option<Statement>> {
    let Some((or_replace, temporary)) = create_header(cur, "TABLE") else {
        return Ok(None);
    };
    let if_not_exists = if_not_exists(cur);
    let name = IdentifierPath::parse(cur)?;
    let columns = if cur.peek("(") {
        parenthesized(cur, NamedType::parse)?
    } else {
        NodeList::new()
    };
    let options = options(cur)?;
    let query = if cur.consume("AS").is_some() {
        Some(Query::parse(cur)?)
    } else {
        None
    };
    let comments = cur.get_comments();
    Ok(Some(Statement::CreateTable(Box::new(CreateTable {
        comments,
        or_replace,
        temporary,
        if_not_exists,
        name,
        columns,
        options,
        query,
    }))))
}

fn create_view(cur: &mut Cursor<'_>) -> Result<Option<Statement>> {
    let Some((or_replace, None)) = create_header(cur, "VIEW") else {
        return Ok(None);
    };
    let if_not_exists = if_not_exists(cur);
    let name = IdentifierPath::parse(cur)?;
    let options = options(cur)?;
    cur.expect("AS")?;
    let query = Query::parse(cur)?;
    let comments = cur.get_comments();
    Ok(Some(Statement::CreateView(Box::new(CreateView {
        comments,
        or_replace,
        if_not_exists,
        name,
        options,
        query,
    }))))
}

fn insert(cur: &mut Cursor<'_>) -> Result<Option<Statement>> {
    if cur.consume("INSERT").is_none() {
        return Ok(None);
    }
    cur.consume("INTO");
    let table = IdentifierPath::parse(cur)?;
    let column_list =
        cur.peek("(") && !["SELECT", "WITH", "("].iter().any(|kw| cur.peek_nth(1, kw));
    let columns = if column_list {
        parenthesized(cur, Identifier::parse)?
    } else {
        NodeList::new()
    };
    let source = if cur.consume("VALUES").is_some() {
        InsertSource::Values(comma_separated(cur, |cur| parenthesized(cur, Expr::parse))?)
    } else {
        InsertSource::Query(Box::new(Query::parse(cur)?))
    };
    let comments = cur.get_comments();
    Ok(Some(Statement::Insert(Box::new(Insert {
        comments,
        table,
        columns,
        source,
    }))))
}
