//! Typed report values and rows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use super::descriptor::{ColumnSpec, Formatter};
use crate::store::{Record, StoreError, StoreValue};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view used by aggregation.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce a raw store value into the shape the column's formatter expects.
    pub fn from_store(raw: StoreValue, column: &ColumnSpec) -> Result<Value, StoreError> {
        let decode = |reason: String| StoreError::Decode {
            column: column.name.to_string(),
            reason,
        };

        let value = match (raw, &column.formatter) {
            (StoreValue::Null, _) => Value::Null,

            (raw, Formatter::Money | Formatter::Currency(_)) => match raw {
                StoreValue::Text(s) => s
                    .trim()
                    .parse::<Decimal>()
                    .map(Value::Decimal)
                    .map_err(|e| decode(format!("{s:?} is not a decimal: {e}")))?,
                StoreValue::Integer(n) => Value::Decimal(Decimal::from(n)),
                StoreValue::Real(f) => Decimal::try_from(f)
                    .map(Value::Decimal)
                    .map_err(|e| decode(format!("{f} is not representable: {e}")))?,
                other => return Err(decode(format!("unexpected {other:?}"))),
            },

            (StoreValue::Text(s), Formatter::Date) => Value::Date(parse_date(&s).ok_or_else(|| {
                decode(format!("{s:?} is not a date"))
            })?),
            (StoreValue::Text(s), Formatter::DateTime) => {
                Value::DateTime(parse_datetime(&s).ok_or_else(|| {
                    decode(format!("{s:?} is not a timestamp"))
                })?)
            }
            (StoreValue::Text(s), Formatter::Time) => Value::Time(parse_time(&s).ok_or_else(|| {
                decode(format!("{s:?} is not a time of day"))
            })?),

            (StoreValue::Integer(n), Formatter::Integer) => Value::Integer(n),
            (StoreValue::Text(s), Formatter::Integer) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| decode(format!("{s:?} is not an integer: {e}")))?,

            (StoreValue::Text(s), _) => Value::Text(s),
            (StoreValue::Integer(n), _) => Value::Integer(n),
            (StoreValue::Real(f), _) => Decimal::try_from(f)
                .map(Value::Decimal)
                .map_err(|e| decode(format!("{f} is not representable: {e}")))?,
            (StoreValue::Blob(b), _) => Value::Text(String::from_utf8_lossy(&b).into_owned()),
        };

        Ok(value)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// One output record keyed by column name, in declared column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportRow {
    values: IndexMap<String, Value>,
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from a store record, coercing each declared column.
    pub fn from_record(mut record: Record, columns: &[ColumnSpec]) -> Result<Self, StoreError> {
        let mut row = ReportRow::new();
        for column in columns {
            let raw = record
                .swap_remove(column.name)
                .ok_or_else(|| StoreError::MissingColumn(column.name.to_string()))?;
            row.insert(column.name, Value::from_store(raw, column)?);
        }
        Ok(row)
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Builder-style [`ReportRow::insert`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Value for a column, `Null` when absent.
    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Null)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
