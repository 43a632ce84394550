//! Filter builder: untrusted request parameters to a bound WHERE clause.
//!
//! Each entity declares the filters it accepts as [`FilterSpec`]s. A request
//! is reduced to a [`FilterSet`] holding only the predicates whose values are
//! present and non-blank; the set then renders to a WHERE expression whose
//! every value is a placeholder, with parameters bound in predicate order.

use std::collections::HashMap;

use serde::Serialize;

use crate::sql::{all_of, any_of, Expr, ExprExt, ParamValue, Params};

/// Escape character used in every generated `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// How a predicate compares its target(s) with the request value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equals,
    LikeContains,
    Range,
    DateBetween,
}

/// Type a single value is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    #[default]
    Text,
    /// Bound as an integer when the value parses as one, as text otherwise.
    Integer,
}

/// Request parameter(s) a filter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterInput {
    Param(&'static str),
    Range {
        start: &'static str,
        end: &'static str,
    },
}

/// A filter an entity accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub comparison: Comparison,
    /// Columns the value is compared against; several are OR-ed.
    pub targets: Vec<Expr>,
    pub input: FilterInput,
    pub kind: ParamKind,
}

impl FilterSpec {
    /// Exact match on a text column (status, gender, role).
    pub fn equals(name: &'static str, label: &'static str, target: Expr) -> Self {
        Self {
            name,
            label,
            comparison: Comparison::Equals,
            targets: vec![target],
            input: FilterInput::Param(name),
            kind: ParamKind::Text,
        }
    }

    /// Exact match on an id column.
    pub fn equals_id(name: &'static str, label: &'static str, target: Expr) -> Self {
        Self {
            kind: ParamKind::Integer,
            ..Self::equals(name, label, target)
        }
    }

    /// Substring match across one or more columns.
    pub fn contains(name: &'static str, label: &'static str, targets: Vec<Expr>) -> Self {
        Self {
            name,
            label,
            comparison: Comparison::LikeContains,
            targets,
            input: FilterInput::Param(name),
            kind: ParamKind::Text,
        }
    }

    /// Inclusive date range read from two parameters.
    pub fn date_between(
        name: &'static str,
        label: &'static str,
        target: Expr,
        start: &'static str,
        end: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            comparison: Comparison::DateBetween,
            targets: vec![target],
            input: FilterInput::Range { start, end },
            kind: ParamKind::Text,
        }
    }

    /// Inclusive numeric range read from two parameters.
    pub fn range(
        name: &'static str,
        label: &'static str,
        target: Expr,
        start: &'static str,
        end: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            comparison: Comparison::Range,
            targets: vec![target],
            input: FilterInput::Range { start, end },
            kind: ParamKind::Integer,
        }
    }

    /// Request parameter names this filter reads.
    pub fn param_names(&self) -> Vec<&'static str> {
        match self.input {
            FilterInput::Param(p) => vec![p],
            FilterInput::Range { start, end } => vec![start, end],
        }
    }

    fn read(&self, raw: &HashMap<String, String>) -> Option<FilterValue> {
        match self.input {
            FilterInput::Param(p) => non_blank(raw, p).map(FilterValue::Single),
            FilterInput::Range { start, end } => {
                let start = non_blank(raw, start);
                let end = non_blank(raw, end);
                if start.is_none() && end.is_none() {
                    None
                } else {
                    Some(FilterValue::Between { start, end })
                }
            }
        }
    }
}

fn non_blank(raw: &HashMap<String, String>, name: &str) -> Option<String> {
    raw.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A predicate's value, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Between {
        start: Option<String>,
        end: Option<String>,
    },
}

/// An active filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub name: &'static str,
    pub label: &'static str,
    pub comparison: Comparison,
    pub value: FilterValue,
    targets: Vec<Expr>,
    kind: ParamKind,
}

impl Predicate {
    fn bind(&self, params: &mut Params, value: &str) -> Expr {
        params.bind(match self.kind {
            ParamKind::Integer => value
                .parse::<i64>()
                .map(ParamValue::Integer)
                .unwrap_or_else(|_| ParamValue::Text(value.to_string())),
            ParamKind::Text => ParamValue::Text(value.to_string()),
        })
    }

    fn to_expr(&self, params: &mut Params) -> Option<Expr> {
        match (&self.comparison, &self.value) {
            (Comparison::LikeContains, FilterValue::Single(v)) => {
                let pattern = format!("%{}%", escape_like(v));
                let mut clauses: Vec<Expr> = self
                    .targets
                    .iter()
                    .map(|t| {
                        let p = params.bind(pattern.as_str());
                        t.clone().like_escape(p, LIKE_ESCAPE)
                    })
                    .collect();
                if clauses.len() == 1 {
                    clauses.pop()
                } else {
                    any_of(clauses)
                }
            }
            (_, FilterValue::Single(v)) => {
                let clauses: Vec<Expr> = self
                    .targets
                    .iter()
                    .map(|t| {
                        let p = self.bind(params, v);
                        t.clone().eq(p)
                    })
                    .collect();
                if clauses.len() == 1 {
                    clauses.into_iter().next()
                } else {
                    any_of(clauses)
                }
            }
            (_, FilterValue::Between { start, end }) => {
                let target = self.targets.first()?.clone();
                match (start, end) {
                    (Some(s), Some(e)) => {
                        let lo = self.bind(params, s);
                        let hi = self.bind(params, e);
                        Some(target.between(lo, hi))
                    }
                    (Some(s), None) => Some(target.gte(self.bind(params, s))),
                    (None, Some(e)) => Some(target.lte(self.bind(params, e))),
                    (None, None) => None,
                }
            }
        }
    }

    /// Human-readable form for "Filters applied" lines.
    pub fn describe(&self) -> String {
        let value = match (&self.comparison, &self.value) {
            (_, FilterValue::Single(v)) => v.clone(),
            (Comparison::Range, FilterValue::Between { start, end }) => match (start, end) {
                (Some(s), Some(e)) => format!("{s} to {e}"),
                (Some(s), None) => format!("at least {s}"),
                (None, Some(e)) => format!("at most {e}"),
                (None, None) => String::new(),
            },
            (_, FilterValue::Between { start, end }) => match (start, end) {
                (Some(s), Some(e)) => format!("{s} to {e}"),
                (Some(s), None) => format!("from {s}"),
                (None, Some(e)) => format!("until {e}"),
                (None, None) => String::new(),
            },
        };
        format!("{}: {}", self.label, value)
    }
}

/// Escape LIKE wildcards so the value matches literally.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// The active predicates of one request, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    /// Keep a predicate for every declared filter whose value is present and
    /// non-blank. Parameters no filter reads are ignored.
    pub fn from_params(specs: &[FilterSpec], raw: &HashMap<String, String>) -> Self {
        let predicates = specs
            .iter()
            .filter_map(|spec| {
                spec.read(raw).map(|value| Predicate {
                    name: spec.name,
                    label: spec.label,
                    comparison: spec.comparison,
                    value,
                    targets: spec.targets.clone(),
                    kind: spec.kind,
                })
            })
            .collect();
        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// AND of every predicate; `None` when the set is empty.
    ///
    /// Parameters are appended to `params` in predicate order.
    pub fn where_clause(&self, params: &mut Params) -> Option<Expr> {
        all_of(
            self.predicates
                .iter()
                .filter_map(|p| p.to_expr(params))
                .collect(),
        )
    }

    /// `Status: completed; Date: 2024-01-01 to 2024-01-31`, or `None` when empty.
    pub fn describe(&self) -> Option<String> {
        if self.predicates.is_empty() {
            return None;
        }
        Some(
            self.predicates
                .iter()
                .map(Predicate::describe)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
