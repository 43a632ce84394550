//! Summary statistics folded over a row set.

use std::collections::HashSet;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use super::descriptor::{Aggregate, Formatter, QueryDescriptor};
use super::value::{ReportRow, Value};
use crate::format;

/// A computed aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SummaryValue {
    Count(u64),
    /// Sum or average, displayed with the source column's formatter.
    Amount {
        value: Decimal,
        #[serde(skip)]
        formatter: Formatter,
    },
    Percentage(Decimal),
}

impl SummaryValue {
    pub fn display(&self) -> String {
        match self {
            SummaryValue::Count(n) => n.to_string(),
            SummaryValue::Amount { value, formatter } => formatter.render_decimal(*value),
            SummaryValue::Percentage(p) => format::percentage(*p),
        }
    }
}

/// Ordered label -> aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryBlock {
    entries: IndexMap<String, SummaryValue>,
}

impl SummaryBlock {
    /// Fold the descriptor's summary specs over `rows`.
    ///
    /// Callers pass exactly the rows the detail output shows (or, for a
    /// paginated listing, every row matching the same filters).
    pub fn compute(descriptor: &QueryDescriptor, rows: &[ReportRow]) -> Self {
        let mut entries = IndexMap::with_capacity(descriptor.summary.len());
        for spec in &descriptor.summary {
            let value = match &spec.aggregate {
                Aggregate::Count => SummaryValue::Count(rows.len() as u64),
                Aggregate::CountWhere { column, equals } => {
                    SummaryValue::Count(count_matching(rows, column, equals))
                }
                Aggregate::CountDistinct { column } => {
                    let distinct: HashSet<String> = rows
                        .iter()
                        .map(|r| r.value(column))
                        .filter(|v| !v.is_null())
                        .map(|v| Formatter::Text.render(v))
                        .collect();
                    SummaryValue::Count(distinct.len() as u64)
                }
                Aggregate::Sum { column } => SummaryValue::Amount {
                    value: numbers(rows, column).sum(),
                    formatter: formatter_of(descriptor, column),
                },
                Aggregate::Average { column } => {
                    let values: Vec<Decimal> = numbers(rows, column).collect();
                    let value = if values.is_empty() {
                        Decimal::ZERO
                    } else {
                        values.iter().sum::<Decimal>() / Decimal::from(values.len() as u64)
                    };
                    SummaryValue::Amount {
                        value,
                        formatter: formatter_of(descriptor, column),
                    }
                }
                Aggregate::Percentage { column, equals } => {
                    let value = if rows.is_empty() {
                        Decimal::ZERO
                    } else {
                        Decimal::from(count_matching(rows, column, equals)) * Decimal::ONE_HUNDRED
                            / Decimal::from(rows.len() as u64)
                    };
                    SummaryValue::Percentage(value)
                }
            };
            entries.insert(spec.label.to_string(), value);
        }
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<&SummaryValue> {
        self.entries.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn count_matching(rows: &[ReportRow], column: &str, equals: &str) -> u64 {
    rows.iter()
        .filter(|r| matches!(r.value(column), Value::Text(s) if s.eq_ignore_ascii_case(equals)))
        .count() as u64
}

fn numbers<'a>(rows: &'a [ReportRow], column: &'a str) -> impl Iterator<Item = Decimal> + 'a {
    rows.iter().filter_map(move |r| r.value(column).as_decimal())
}

fn formatter_of(descriptor: &QueryDescriptor, column: &str) -> Formatter {
    descriptor
        .find_column(column)
        .map(|c| c.formatter)
        .unwrap_or(Formatter::Text)
}
