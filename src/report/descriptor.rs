//! Static per-entity report descriptions.
//!
//! A [`QueryDescriptor`] is pure configuration: the base table and its fixed
//! joins, the output columns, the filters an entity accepts, the default sort
//! and the summary statistics. The engine turns it into SQL; the encoders
//! read labels and formatters from it.

use rust_decimal::Decimal;
use serde::Serialize;

use super::filter::FilterSpec;
use super::value::Value;
use crate::format;
use crate::sql::{Expr, ExprExt, Join, OrderByExpr, Query, SelectExpr, SortDir, TableRef};

/// How a column's values are coerced and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    Text,
    Integer,
    /// Two decimals, no symbol.
    Money,
    /// Two decimals with the given symbol prefix.
    Currency(&'static str),
    Date,
    DateTime,
    Time,
    /// Status keyword; rendered verbatim, styled via `status-<slug>`.
    Status,
}

impl Formatter {
    /// Render a non-null value.
    pub fn render(&self, value: &Value) -> String {
        match (self, value) {
            (_, Value::Null) => String::new(),
            (Formatter::Money, v) if v.as_decimal().is_some() => {
                format::money(v.as_decimal().unwrap_or_default())
            }
            (Formatter::Currency(symbol), v) if v.as_decimal().is_some() => {
                format::currency(v.as_decimal().unwrap_or_default(), symbol)
            }
            (Formatter::Date, Value::DateTime(dt)) => format::date(dt.date()),
            (_, Value::Text(s)) => s.clone(),
            (_, Value::Integer(n)) => n.to_string(),
            (_, Value::Decimal(d)) => format::number(*d),
            (_, Value::Date(d)) => format::date(*d),
            (_, Value::DateTime(dt)) => format::datetime(*dt),
            (_, Value::Time(t)) => format::time(*t),
        }
    }

    /// Render an aggregate computed over this column.
    pub fn render_decimal(&self, value: Decimal) -> String {
        match self {
            Formatter::Money => format::money(value),
            Formatter::Currency(symbol) => format::currency(value, symbol),
            _ => format::number(value),
        }
    }
}

/// One output column.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct ColumnSpec {
    /// Output name; also the SELECT alias and the [`super::ReportRow`] key.
    pub name: &'static str,
    /// Header text.
    pub label: &'static str,
    pub source: Expr,
    pub formatter: Formatter,
    /// Rendered in place of a null value.
    pub null_placeholder: &'static str,
}

impl ColumnSpec {
    pub fn new(name: &'static str, label: &'static str, source: Expr) -> Self {
        Self {
            name,
            label,
            source,
            formatter: Formatter::Text,
            null_placeholder: "",
        }
    }

    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn null_as(mut self, placeholder: &'static str) -> Self {
        self.null_placeholder = placeholder;
        self
    }

    /// Display text for a cell of this column.
    pub fn display(&self, value: &Value) -> String {
        if value.is_null() {
            return self.null_placeholder.to_string();
        }
        self.formatter.render(value)
    }

    fn select_expr(&self) -> SelectExpr {
        SelectExpr::new(self.source.clone()).with_alias(self.name)
    }
}

/// A sort key in the default order.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub expr: Expr,
    pub dir: SortDir,
}

impl SortKey {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            dir: SortDir::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            dir: SortDir::Desc,
        }
    }

    fn to_order_by(&self) -> OrderByExpr {
        OrderByExpr::new(self.expr.clone(), self.dir)
    }
}

/// An aggregate over the filtered row set. Columns are referenced by output name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregate {
    /// Number of rows.
    Count,
    /// Rows whose column equals the keyword (ASCII case-insensitive).
    CountWhere {
        column: &'static str,
        equals: &'static str,
    },
    /// Distinct non-null values of a column.
    CountDistinct { column: &'static str },
    /// Sum of non-null values.
    Sum { column: &'static str },
    /// Mean of non-null values; zero over no values.
    Average { column: &'static str },
    /// Share of rows whose column equals the keyword, in percent.
    Percentage {
        column: &'static str,
        equals: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySpec {
    pub label: &'static str,
    pub aggregate: Aggregate,
}

impl SummarySpec {
    pub fn new(label: &'static str, aggregate: Aggregate) -> Self {
        Self { label, aggregate }
    }
}

/// Everything the engine needs to report on one entity.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct QueryDescriptor {
    /// URL and filename stem, e.g. `appointments`.
    pub entity: &'static str,
    pub title: &'static str,
    pub table: TableRef,
    pub primary_key: Expr,
    pub joins: Vec<Join>,
    pub columns: Vec<ColumnSpec>,
    pub filters: Vec<FilterSpec>,
    pub sort: Vec<SortKey>,
    pub summary: Vec<SummarySpec>,
}

impl QueryDescriptor {
    pub fn new(
        entity: &'static str,
        title: &'static str,
        table: TableRef,
        primary_key: Expr,
    ) -> Self {
        Self {
            entity,
            title,
            table,
            primary_key,
            joins: Vec::new(),
            columns: Vec::new(),
            filters: Vec::new(),
            sort: Vec::new(),
            summary: Vec::new(),
        }
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    pub fn filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, keys: Vec<SortKey>) -> Self {
        self.sort = keys;
        self
    }

    pub fn summary(mut self, specs: Vec<SummarySpec>) -> Self {
        self.summary = specs;
        self
    }

    /// Singular noun for one record: `doctor`, `staff member`.
    pub fn record_noun(&self) -> &'static str {
        match self.entity {
            "staff" => "staff member",
            other => other.strip_suffix('s').unwrap_or(other),
        }
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Declared sort, then the primary key so equal keys still order
    /// deterministically.
    pub fn order_by(&self) -> Vec<OrderByExpr> {
        let mut order: Vec<OrderByExpr> = self.sort.iter().map(SortKey::to_order_by).collect();
        if !self.sort.iter().any(|k| k.expr == self.primary_key) {
            let dir = self.sort.first().map(|k| k.dir).unwrap_or_default();
            order.push(
                SortKey {
                    expr: self.primary_key.clone(),
                    dir,
                }
                .to_order_by(),
            );
        }
        order
    }

    /// SELECT over the fixed relation with the given WHERE, in default order.
    pub fn select_query(&self, where_clause: Option<Expr>) -> Query {
        Query::new()
            .select(self.columns.iter().map(ColumnSpec::select_expr).collect::<Vec<_>>())
            .from(self.table.clone())
            .joins(self.joins.iter().cloned())
            .filter_opt(where_clause)
            .order_by(self.order_by())
    }

    /// SELECT a single record by primary key.
    pub fn record_query(&self, id: Expr) -> Query {
        Query::new()
            .select(self.columns.iter().map(ColumnSpec::select_expr).collect::<Vec<_>>())
            .from(self.table.clone())
            .joins(self.joins.iter().cloned())
            .filter(self.primary_key.clone().eq(id))
            .limit(1)
    }
}
