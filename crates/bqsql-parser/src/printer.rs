use std::fmt::Write;

use crate::ast::{
    Analytic, CaseExpr, Constant, ConstantKind, Cte, Direction, Expr, FrameBound, FrameExtent,
    FrameUnit, FunctionBody, InTarget, InsertSource, JoinConstraint, NullsOrder, OptionItem,
    OrderItem, OrderLimitOffset, Query, Script, Select, SelectAs, SelectItem, SetExpr, Statement,
    TableExpr,
};
use crate::format::types::{struct_fields_sql, type_sql};

pub struct TreePrinter<'a> {
    script: &'a Script,
    comments: bool,
}

impl<'a> TreePrinter<'a> {
    pub fn new(script: &'a Script) -> Self {
        Self {
            script,
            comments: true,
        }
    }

    pub fn with_comments(mut self, value: bool) -> Self {
        self.comments = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String can't fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "Script")?;
        for statement in &self.script.statements {
            self.statement(w, statement, 1)?;
        }
        if self.comments {
            for comment in &self.script.trailing_comments {
                node(w, 1, &format!("Comment {comment:?}"))?;
            }
        }
        Ok(())
    }

    fn statement(
        &self,
        w: &mut impl Write,
        statement: &Statement,
        depth: usize,
    ) -> std::fmt::Result {
        let label = match statement {
            Statement::Query(_) => "QueryStatement".to_owned(),
            Statement::CreateFunction(def) => {
                let mut label = format!("CreateFunction {}", def.name.dotted());
                push_flag(&mut label, def.or_replace, "OR REPLACE");
                if let Some(temp) = def.temporary {
                    push_flag(&mut label, true, temp.as_str());
                }
                label
            }
            Statement::CreateTable(stmt) => {
                let mut label = format!("CreateTable {}", stmt.name.dotted());
                push_flag(&mut label, stmt.or_replace, "OR REPLACE");
                if let Some(temp) = stmt.temporary {
                    push_flag(&mut label, true, temp.as_str());
                }
                push_flag(&mut label, stmt.if_not_exists, "IF NOT EXISTS");
                label
            }
            Statement::CreateView(stmt) => {
                let mut label = format!("CreateView {}", stmt.name.dotted());
                push_flag(&mut label, stmt.or_replace, "OR REPLACE");
                push_flag(&mut label, stmt.if_not_exists, "IF NOT EXISTS");
                label
            }
            Statement::Insert(stmt) => format!("Insert {}", stmt.table.dotted()),
        };
        node(w, depth, &label)?;
        if self.comments {
            for comment in statement.comments() {
                node(w, depth + 1, &format!("Comment {comment:?}"))?;
            }
        }
        let depth = depth + 1;
        match statement {
            Statement::Query(stmt) => query(w, &stmt.query, depth),
            Statement::CreateFunction(def) => {
                for param in &def.params {
                    let label = format!("Param {} {}", param.name.as_str(), type_sql(&param.ty));
                    node(w, depth, &label)?;
                }
                if let Some(returns) = &def.returns {
                    node(w, depth, &format!("Returns {}", type_sql(returns)))?;
                }
                match &def.body {
                    FunctionBody::Sql(body) => {
                        node(w, depth, "Body")?;
                        expr(w, body, depth + 1)
                    }
                    FunctionBody::Foreign {
                        language,
                        code,
                        options,
                    } => {
                        node(w, depth, &format!("Language {}", language.as_str()))?;
                        node(w, depth, &format!("Code {:?}", code.text))?;
                        options_list(w, options.as_slice(), depth)
                    }
                }
            }
            Statement::CreateTable(stmt) => {
                for column in &stmt.columns {
                    let label = format!("Column {} {}", column.name.as_str(), type_sql(&column.ty));
                    node(w, depth, &label)?;
                }
                options_list(w, stmt.options.as_slice(), depth)?;
                match &stmt.query {
                    Some(q) => query(w, q, depth),
                    None => Ok(()),
                }
            }
            Statement::CreateView(stmt) => {
                options_list(w, stmt.options.as_slice(), depth)?;
                query(w, &stmt.query, depth)
            }
            Statement::Insert(stmt) => {
                if !stmt.columns.is_empty() {
                    let columns: Vec<&str> = stmt.columns.iter().map(|c| c.as_str()).collect();
                    node(w, depth, &format!("Columns {}", columns.join(", ")))?;
                }
                match &stmt.source {
                    InsertSource::Query(q) => query(w, q, depth),
                    InsertSource::Values(rows) => {
                        node(w, depth, "Values")?;
                        for row in rows {
                            node(w, depth + 1, "Row")?;
                            for item in row {
                                expr(w, item, depth + 2)?;
                            }
                        }
                        Ok(())
                    }
                }
            }
        }
    }
}

fn node(w: &mut impl Write, depth: usize, label: &str) -> std::fmt::Result {
    writeln!(w, "{}{}", "  ".repeat(depth), label)
}

fn push_flag(label: &mut String, set: bool, flag: &str) {
    if set {
        label.push(' ');
        label.push_str(flag);
    }
}

fn options_list(w: &mut impl Write, options: &[OptionItem], depth: usize) -> std::fmt::Result {
    for option in options {
        node(w, depth, &format!("Option {}", option.name.as_str()))?;
        expr(w, &option.value, depth + 1)?;
    }
    Ok(())
}

fn query(w: &mut impl Write, q: &Query, depth: usize) -> std::fmt::Result {
    node(w, depth, "Query")?;
    let depth = depth + 1;
    if let Some(with) = &q.with {
        node(w, depth, if with.recursive { "With RECURSIVE" } else { "With" })?;
        for c in &with.ctes {
            cte(w, c, depth + 1)?;
        }
    }
    set_expr(w, &q.body, depth)?;
    if let Some(olo) = &q.order_limit_offset {
        order_limit_offset(w, olo, depth)?;
    }
    Ok(())
}

fn cte(w: &mut impl Write, c: &Cte, depth: usize) -> std::fmt::Result {
    node(w, depth, &format!("Cte {}", c.name.as_str()))?;
    query(w, &c.query, depth + 1)
}

fn set_expr(w: &mut impl Write, set: &SetExpr, depth: usize) -> std::fmt::Result {
    match set {
        SetExpr::Select(s) => select(w, s, depth),
        SetExpr::Paren(q) => {
            node(w, depth, "Paren")?;
            query(w, q, depth + 1)
        }
        SetExpr::SetOperation {
            op,
            quantifier,
            left,
            right,
        } => {
            let mut label = format!("SetOperation {}", op.as_str());
            if let Some(quantifier) = quantifier {
                push_flag(&mut label, true, quantifier.as_str());
            }
            node(w, depth, &label)?;
            set_expr(w, left, depth + 1)?;
            set_expr(w, right, depth + 1)
        }
    }
}

fn select(w: &mut impl Write, s: &Select, depth: usize) -> std::fmt::Result {
    let mut label = "Select".to_owned();
    push_flag(&mut label, s.distinct, "DISTINCT");
    match s.select_as {
        Some(SelectAs::Struct) => push_flag(&mut label, true, "AS STRUCT"),
        Some(SelectAs::Value) => push_flag(&mut label, true, "AS VALUE"),
        None => {}
    }
    node(w, depth, &label)?;
    let depth = depth + 1;
    for item in &s.items {
        select_item(w, item, depth)?;
    }
    if let Some(from) = &s.from {
        node(w, depth, "From")?;
        table_expr(w, from, depth + 1)?;
    }
    if let Some(condition) = &s.where_clause {
        node(w, depth, "Where")?;
        expr(w, condition, depth + 1)?;
    }
    if !s.group_by.is_empty() {
        node(w, depth, "GroupBy")?;
        for e in &s.group_by {
            expr(w, e, depth + 1)?;
        }
    }
    if let Some(condition) = &s.having {
        node(w, depth, "Having")?;
        expr(w, condition, depth + 1)?;
    }
    if let Some(condition) = &s.qualify {
        node(w, depth, "Qualify")?;
        expr(w, condition, depth + 1)?;
    }
    Ok(())
}

fn select_item(w: &mut impl Write, item: &SelectItem, depth: usize) -> std::fmt::Result {
    match item {
        SelectItem::Wildcard {
            qualifier,
            except,
            replace,
        } => {
            let mut label = match qualifier {
                Some(path) => format!("Wildcard {}", path.dotted()),
                None => "Wildcard".to_owned(),
            };
            if !except.is_empty() {
                let names: Vec<&str> = except.iter().map(|n| n.as_str()).collect();
                label.push_str(&format!(" EXCEPT {}", names.join(", ")));
            }
            node(w, depth, &label)?;
            for item in replace {
                node(w, depth + 1, &format!("Replace {}", item.alias.as_str()))?;
                expr(w, &item.expr, depth + 2)?;
            }
            Ok(())
        }
        SelectItem::Expr { expr: e, alias } => {
            match alias {
                Some(alias) => node(w, depth, &format!("Item AS {}", alias.as_str()))?,
                None => node(w, depth, "Item")?,
            }
            expr(w, e, depth + 1)
        }
    }
}

fn with_alias(label: &str, alias: Option<&crate::ast::Identifier>) -> String {
    match alias {
        Some(alias) => format!("{label} AS {}", alias.as_str()),
        None => label.to_owned(),
    }
}

fn table_expr(w: &mut impl Write, table: &TableExpr, depth: usize) -> std::fmt::Result {
    match table {
        TableExpr::Table { name, alias } => {
            node(w, depth, &with_alias(&format!("Table {}", name.dotted()), alias.as_ref()))
        }
        TableExpr::Subquery { query: q, alias } => {
            node(w, depth, &with_alias("Subquery", alias.as_ref()))?;
            query(w, q, depth + 1)
        }
        TableExpr::Unnest {
            expr: e,
            alias,
            with_offset,
        } => {
            let mut label = with_alias("Unnest", alias.as_ref());
            if let Some(offset_alias) = with_offset {
                label = with_alias(&format!("{label} WITH OFFSET"), offset_alias.as_ref());
            }
            node(w, depth, &label)?;
            expr(w, e, depth + 1)
        }
        TableExpr::Join {
            left,
            kind,
            right,
            constraint,
        } => {
            node(w, depth, &format!("Join {}", kind.as_str()))?;
            table_expr(w, left, depth + 1)?;
            table_expr(w, right, depth + 1)?;
            match constraint {
                Some(JoinConstraint::On(condition)) => {
                    node(w, depth + 1, "On")?;
                    expr(w, condition, depth + 2)
                }
                Some(JoinConstraint::Using(columns)) => {
                    let names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
                    node(w, depth + 1, &format!("Using {}", names.join(", ")))
                }
                None => Ok(()),
            }
        }
    }
}

fn constant_label(constant: &Constant) -> String {
    let kind = match constant.kind {
        ConstantKind::String => "String",
        ConstantKind::Bytes => "Bytes",
        ConstantKind::Number => "Number",
        ConstantKind::Boolean => "Boolean",
        ConstantKind::Null => "Null",
    };
    format!("Constant {kind} {}", constant.text)
}

fn order_item(w: &mut impl Write, item: &OrderItem, depth: usize) -> std::fmt::Result {
    let mut label = "OrderItem".to_owned();
    match item.direction {
        Some(Direction::Asc) => push_flag(&mut label, true, "ASC"),
        Some(Direction::Desc) => push_flag(&mut label, true, "DESC"),
        None => {}
    }
    match item.nulls {
        Some(NullsOrder::First) => push_flag(&mut label, true, "NULLS FIRST"),
        Some(NullsOrder::Last) => push_flag(&mut label, true, "NULLS LAST"),
        None => {}
    }
    node(w, depth, &label)?;
    expr(w, &item.expr, depth + 1)
}

fn order_limit_offset(w: &mut impl Write, olo: &OrderLimitOffset, depth: usize) -> std::fmt::Result {
    if !olo.order_by.is_empty() {
        node(w, depth, "OrderBy")?;
        for item in &olo.order_by {
            order_item(w, item, depth + 1)?;
        }
    }
    if let Some(limit) = &olo.limit {
        node(w, depth, "Limit")?;
        expr(w, limit, depth + 1)?;
    }
    if let Some(offset) = &olo.offset {
        node(w, depth, "Offset")?;
        expr(w, offset, depth + 1)?;
    }
    Ok(())
}

fn bound_label(bound: &FrameBound) -> String {
    match bound {
        FrameBound::UnboundedPreceding => "UNBOUNDED PRECEDING".to_owned(),
        FrameBound::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_owned(),
        FrameBound::CurrentRow => "CURRENT ROW".to_owned(),
        FrameBound::Preceding(n) => format!("{} PRECEDING", n.text),
        FrameBound::Following(n) => format!("{} FOLLOWING", n.text),
    }
}

fn analytic(w: &mut impl Write, a: &Analytic, depth: usize) -> std::fmt::Result {
    node(w, depth, "Analytic")?;
    let depth = depth + 1;
    if !a.partition_by.is_empty() {
        node(w, depth, "PartitionBy")?;
        for e in &a.partition_by {
            expr(w, e, depth + 1)?;
        }
    }
    if !a.order_by.is_empty() {
        node(w, depth, "OrderBy")?;
        for item in &a.order_by {
            order_item(w, item, depth + 1)?;
        }
    }
    if let Some(frame) = &a.frame {
        let unit = match frame.unit {
            FrameUnit::Rows => "ROWS",
            FrameUnit::Range => "RANGE",
        };
        let extent = match &frame.extent {
            FrameExtent::Single(bound) => bound_label(bound),
            FrameExtent::Between(start, end) => {
                format!("BETWEEN {} AND {}", bound_label(start), bound_label(end))
            }
        };
        node(w, depth, &format!("Frame {unit} {extent}"))?;
    }
    Ok(())
}

fn case(w: &mut impl Write, c: &CaseExpr, depth: usize) -> std::fmt::Result {
    node(w, depth, "Case")?;
    let depth = depth + 1;
    if let Some(operand) = &c.operand {
        node(w, depth, "Operand")?;
        expr(w, operand, depth + 1)?;
    }
    for branch in &c.branches {
        node(w, depth, "When")?;
        expr(w, &branch.condition, depth + 1)?;
        expr(w, &branch.result, depth + 1)?;
    }
    if let Some(otherwise) = &c.else_result {
        node(w, depth, "Else")?;
        expr(w, otherwise, depth + 1)?;
    }
    Ok(())
}

fn labeled(w: &mut impl Write, label: &str, e: &Expr, depth: usize) -> std::fmt::Result {
    node(w, depth, label)?;
    expr(w, e, depth + 1)
}

fn expr(w: &mut impl Write, e: &Expr, depth: usize) -> std::fmt::Result {
    match e {
        Expr::Constant(constant) => node(w, depth, &constant_label(constant)),
        Expr::Path(path) => node(w, depth, &format!("Path {}", path.dotted())),
        Expr::Star => node(w, depth, "Star"),
        Expr::Function(call) => {
            let mut label = format!("Function {}", call.name.dotted());
            push_flag(&mut label, call.distinct, "DISTINCT");
            if let Some(nulls) = call.nulls {
                push_flag(&mut label, true, nulls.as_str());
            }
            node(w, depth, &label)?;
            for arg in &call.args {
                expr(w, arg, depth + 1)?;
            }
            Ok(())
        }
        Expr::ArrayLiteral(array) => {
            match &array.ty {
                Some(ty) => node(w, depth, &format!("ArrayLiteral {}", type_sql(ty)))?,
                None => node(w, depth, "ArrayLiteral")?,
            }
            for item in &array.items {
                expr(w, item, depth + 1)?;
            }
            Ok(())
        }
        Expr::ArraySelect(q) => {
            node(w, depth, "ArraySelect")?;
            query(w, q, depth + 1)
        }
        Expr::ArrayAgg(agg) => {
            let mut label = "ArrayAgg".to_owned();
            push_flag(&mut label, agg.distinct, "DISTINCT");
            if let Some(nulls) = agg.nulls {
                push_flag(&mut label, true, nulls.as_str());
            }
            node(w, depth, &label)?;
            expr(w, &agg.expr, depth + 1)?;
            if let Some(olo) = &agg.order_limit_offset {
                order_limit_offset(w, olo, depth + 1)?;
            }
            if let Some(a) = &agg.analytic {
                analytic(w, a, depth + 1)?;
            }
            if let Some(offset) = &agg.offset {
                labeled(w, "Offset", offset, depth + 1)?;
            }
            Ok(())
        }
        Expr::StringAgg(agg) => {
            let mut label = format!("StringAgg {}", agg.function.as_str());
            push_flag(&mut label, agg.distinct, "DISTINCT");
            if let Some(nulls) = agg.nulls {
                push_flag(&mut label, true, nulls.as_str());
            }
            node(w, depth, &label)?;
            expr(w, &agg.expr, depth + 1)?;
            if let Some(delimiter) = &agg.delimiter {
                node(w, depth + 1, &format!("Delimiter {}", delimiter.text))?;
            }
            if let Some(olo) = &agg.order_limit_offset {
                order_limit_offset(w, olo, depth + 1)?;
            }
            if let Some(a) = &agg.analytic {
                analytic(w, a, depth + 1)?;
            }
            if let Some(accessor) = &agg.accessor {
                let label = match &accessor.name {
                    Some(name) => format!("Accessor {}", name.as_str()),
                    None => "Accessor".to_owned(),
                };
                labeled(w, &label, &accessor.index, depth + 1)?;
            }
            Ok(())
        }
        Expr::WithAnalytic { expr: inner, analytic: a } => {
            node(w, depth, "WithAnalytic")?;
            expr(w, inner, depth + 1)?;
            analytic(w, a, depth + 1)
        }
        Expr::Binary { op, left, right } => {
            node(w, depth, &format!("Binary {}", op.as_str()))?;
            expr(w, left, depth + 1)?;
            expr(w, right, depth + 1)
        }
        Expr::Unary { op, expr: inner } => labeled(w, &format!("Unary {}", op.as_str()), inner, depth),
        Expr::Paren(inner) => labeled(w, "Paren", inner, depth),
        Expr::Subquery(q) => {
            node(w, depth, "Subquery")?;
            query(w, q, depth + 1)
        }
        Expr::Exists(q) => {
            node(w, depth, "Exists")?;
            query(w, q, depth + 1)
        }
        Expr::Struct(st) => {
            match &st.fields {
                Some(fields) => {
                    let fields = struct_fields_sql(fields.as_slice());
                    node(w, depth, &format!("Struct STRUCT<{fields}>"))?
                }
                None => node(w, depth, "Struct")?,
            }
            for item in &st.items {
                let label = match &item.alias {
                    Some(alias) => format!("StructItem AS {}", alias.as_str()),
                    None => "StructItem".to_owned(),
                };
                labeled(w, &label, &item.expr, depth + 1)?;
            }
            Ok(())
        }
        Expr::Cast { safe, expr: inner, ty } => {
            let name = if *safe { "SafeCast" } else { "Cast" };
            labeled(w, &format!("{name} {}", type_sql(ty)), inner, depth)
        }
        Expr::Extract {
            part,
            expr: inner,
            time_zone,
        } => {
            node(w, depth, "Extract")?;
            expr(w, part, depth + 1)?;
            expr(w, inner, depth + 1)?;
            if let Some(tz) = time_zone {
                labeled(w, "TimeZone", tz, depth + 1)?;
            }
            Ok(())
        }
        Expr::Case(c) => case(w, c, depth),
        Expr::Interval { value, unit } => {
            labeled(w, &format!("Interval {}", unit.as_str()), value, depth)
        }
        Expr::In {
            expr: inner,
            negated,
            target,
        } => {
            node(w, depth, if *negated { "In NOT" } else { "In" })?;
            expr(w, inner, depth + 1)?;
            match target {
                InTarget::List(items) => {
                    node(w, depth + 1, "List")?;
                    for item in items {
                        expr(w, item, depth + 2)?;
                    }
                    Ok(())
                }
                InTarget::Query(q) => query(w, q, depth + 1),
                InTarget::Unnest(array) => labeled(w, "Unnest", array, depth + 1),
            }
        }
        Expr::Between {
            expr: inner,
            negated,
            low,
            high,
        } => {
            node(w, depth, if *negated { "Between NOT" } else { "Between" })?;
            expr(w, inner, depth + 1)?;
            expr(w, low, depth + 1)?;
            expr(w, high, depth + 1)
        }
        Expr::Is {
            expr: inner,
            negated,
            value,
        } => {
            let label = if *negated {
                format!("Is NOT {}", value.as_str())
            } else {
                format!("Is {}", value.as_str())
            };
            labeled(w, &label, inner, depth)
        }
        Expr::Index {
            expr: inner,
            kind,
            index,
        } => {
            match kind {
                Some(kind) => node(w, depth, &format!("Index {}", kind.as_str()))?,
                None => node(w, depth, "Index")?,
            }
            expr(w, inner, depth + 1)?;
            expr(w, index, depth + 1)
        }
        Expr::Field { expr: inner, name } => {
            labeled(w, &format!("Field {}", name.as_str()), inner, depth)
        }
    }
}

/// Dump of a single expression, rooted at depth zero.
pub fn dump_expr(e: &Expr) -> String {
    let mut out = String::new();
    let _ = expr(&mut out, e, 0);
    out
}
