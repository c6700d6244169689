use bqsql_core::Doc;

use super::types::type_sql;
use super::{Format, call, choice, clause, comma_line, comma_stack, comments_doc, docs, spaced, text};
use crate::ast::{
    CreateTable, CreateView, Expr, FunctionBody, FunctionDef, Insert, InsertSource, NodeList,
    OptionItem, Script, Statement, TempKeyword,
};

/// Layout of a whole script.
///
/// Statements are separated by `;` and, in the expanded form, a blank line.
/// A script with trailing comments keeps the `;` after its last statement
/// so those comments can't attach to it on a reparse.
pub fn script_doc(script: &Script, compact: bool) -> Doc {
    let count = script.statements.len();
    let terminate_last = !script.trailing_comments.is_empty();
    let mut parts = Vec::new();
    for (i, statement) in script.statements.iter().enumerate() {
        if i > 0 && !compact {
            parts.push(Doc::empty());
        }
        parts.extend(comments_doc(statement.comments()));
        let mut doc = statement.doc(compact);
        if i + 1 < count || terminate_last {
            doc = doc.append(text(";"));
        }
        parts.push(doc);
    }
    if count > 0 && terminate_last && !compact {
        parts.push(Doc::empty());
    }
    parts.extend(comments_doc(&script.trailing_comments));
    Doc::Stack(parts)
}

impl Format for Statement {
    fn doc(&self, compact: bool) -> Doc {
        match self {
            Statement::Query(stmt) => stmt.query.doc(compact),
            Statement::CreateFunction(def) => def.doc(compact),
            Statement::CreateTable(stmt) => stmt.doc(compact),
            Statement::CreateView(stmt) => stmt.doc(compact),
            Statement::Insert(stmt) => stmt.doc(compact),
        }
    }
}

fn create_head(or_replace: bool, temporary: Option<TempKeyword>, object: &str) -> String {
    let mut head = "CREATE".to_owned();
    if or_replace {
        head.push_str(" OR REPLACE");
    }
    if let Some(temp) = temporary {
        head.push(' ');
        head.push_str(temp.as_str());
    }
    head.push(' ');
    head.push_str(object);
    head
}

fn options_doc(options: &NodeList<OptionItem>, compact: bool) -> Option<Doc> {
    if options.is_empty() {
        return None;
    }
    Some(call("OPTIONS(", ")", compact, |c| docs(options, c)))
}

impl Format for OptionItem {
    fn doc(&self, compact: bool) -> Doc {
        Doc::line([
            text(format!("{} = ", self.name.as_str())),
            self.value.doc(compact),
        ])
    }
}

impl Format for FunctionDef {
    fn doc(&self, compact: bool) -> Doc {
        let head = format!(
            "{} {}(",
            create_head(self.or_replace, self.temporary, "FUNCTION"),
            self.name.dotted()
        );
        let parts = |c: bool| {
            let mut parts = vec![call(&head, ")", c, |c| docs(&self.params, c))];
            if let Some(returns) = &self.returns {
                parts.push(text(format!("RETURNS {}", type_sql(returns))));
            }
            match &self.body {
                FunctionBody::Sql(expr) => parts.push(clause("AS", c, |c| expr.doc(c))),
                FunctionBody::Foreign {
                    language,
                    code,
                    options,
                } => {
                    parts.push(text(format!("LANGUAGE {}", language.as_str())));
                    parts.push(text(format!("AS {}", code.text)));
                    parts.extend(options_doc(options, c));
                }
            }
            parts
        };
        choice(compact, spaced(parts(true)), || Doc::Stack(parts(false)))
    }
}

impl Format for CreateTable {
    fn doc(&self, compact: bool) -> Doc {
        let mut head = create_head(self.or_replace, self.temporary, "TABLE");
        if self.if_not_exists {
            head.push_str(" IF NOT EXISTS");
        }
        head.push(' ');
        head.push_str(&self.name.dotted());
        let parts = |c: bool| {
            let mut parts = Vec::new();
            if self.columns.is_empty() {
                parts.push(text(head.clone()));
            } else {
                parts.push(call(&format!("{head} ("), ")", c, |c| docs(&self.columns, c)));
            }
            parts.extend(options_doc(&self.options, c));
            if let Some(query) = &self.query {
                parts.push(clause("AS", c, |c| query.doc(c)));
            }
            parts
        };
        choice(compact, spaced(parts(true)), || Doc::Stack(parts(false)))
    }
}

impl Format for CreateView {
    fn doc(&self, compact: bool) -> Doc {
        let mut head = create_head(self.or_replace, None, "VIEW");
        if self.if_not_exists {
            head.push_str(" IF NOT EXISTS");
        }
        head.push(' ');
        head.push_str(&self.name.dotted());
        let parts = |c: bool| {
            let mut parts = vec![text(head.clone())];
            parts.extend(options_doc(&self.options, c));
            parts.push(clause("AS", c, |c| self.query.doc(c)));
            parts
        };
        choice(compact, spaced(parts(true)), || Doc::Stack(parts(false)))
    }
}

impl Format for Insert {
    fn doc(&self, compact: bool) -> Doc {
        let mut head = format!("INSERT INTO {}", self.table.dotted());
        if !self.columns.is_empty() {
            let columns: Vec<&str> = self.columns.iter().map(|c| c.as_str()).collect();
            head.push_str(&format!(" ({})", columns.join(", ")));
        }
        match &self.source {
            InsertSource::Query(query) => {
                let line = Doc::line([text(format!("{head} ")), query.doc(true)]);
                choice(compact, line, || Doc::stack([text(head.clone()), query.doc(false)]))
            }
            InsertSource::Values(rows) => {
                let rows_doc = |c: bool| {
                    let rows = rows.iter().map(|row| values_row(row, c)).collect();
                    if c { comma_line(rows) } else { comma_stack(rows) }
                };
                let line = Doc::line([text(format!("{head} VALUES ")), rows_doc(true)]);
                choice(compact, line, || {
                    Doc::stack([text(head.clone()), clause("VALUES", false, rows_doc)])
                })
            }
        }
    }
}

fn values_row(row: &NodeList<Expr>, compact: bool) -> Doc {
    call("(", ")", compact, |c| docs(row, c))
}
