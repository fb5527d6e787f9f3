//! Search conditions.
//!
//! A [`RawCondition`] is the untyped `(field, operator, value)` triple that
//! arrives from outside. [`Condition::parse`] checks the field against the
//! entity's derive-generated column set, checks the operator against the
//! column kind, and coerces the JSON value into a typed [`Value`].
//!
//! `eq` with a JSON `null` on a nullable column means `IS NULL`.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use episodic_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, ColumnType, EntityTrait, Value, sea_query::SimpleExpr};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Comparison operator of a search condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    In,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
}

impl Operator {
    /// The wire token of this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::In => "in",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "in" => Ok(Self::In),
            "gt" => Ok(Self::Gt),
            "lt" => Ok(Self::Lt),
            "gte" => Ok(Self::Gte),
            "lte" => Ok(Self::Lte),
            "like" => Ok(Self::Like),
            other => Err(AppError::InvalidOperator(format!(
                "unsupported operator '{other}'"
            ))),
        }
    }
}

/// Kind of a searchable column, derived from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Timestamp,
}

impl FieldKind {
    /// Kind of the given column, or `None` if the column cannot be searched.
    #[must_use]
    pub fn of<C: ColumnTrait>(column: &C) -> Option<Self> {
        match column.def().get_column_type() {
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger => Some(Self::Integer),
            ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text => Some(Self::Text),
            ColumnType::DateTime | ColumnType::Timestamp | ColumnType::TimestampWithTimeZone => {
                Some(Self::Timestamp)
            }
            _ => None,
        }
    }

    /// Whether `op` may be used on a column of this kind.
    ///
    /// `like` is text-only; every other operator applies to every kind.
    #[must_use]
    pub const fn allows(self, op: Operator) -> bool {
        !matches!(op, Operator::Like) || matches!(self, Self::Text)
    }

    fn coerce(self, field: &str, value: &JsonValue) -> AppResult<Value> {
        let coerced = match (self, value) {
            (Self::Integer, JsonValue::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Value::from),
            (Self::Integer, JsonValue::String(s)) => s.trim().parse::<i32>().ok().map(Value::from),
            (Self::Text, JsonValue::String(s)) => Some(Value::from(s.clone())),
            (Self::Timestamp, JsonValue::String(s)) => {
                DateTime::parse_from_rfc3339(s.trim()).ok().map(Value::from)
            }
            _ => None,
        };

        coerced.ok_or_else(|| {
            AppError::InvalidValue(format!("{value} is not a valid value for '{field}'"))
        })
    }
}

/// An unvalidated search condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    pub field: String,
    pub op: String,
    pub value: JsonValue,
}

impl RawCondition {
    /// Create a raw condition.
    pub fn new(field: impl Into<String>, op: impl Into<String>, value: JsonValue) -> Self {
        Self {
            field: field.into(),
            op: op.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Eq(Value),
    IsNull,
    In(Vec<Value>),
    Gt(Value),
    Lt(Value),
    Gte(Value),
    Lte(Value),
    Like(String),
}

/// A validated condition on a column of entity `E`.
pub struct Condition<E: EntityTrait> {
    column: E::Column,
    predicate: Predicate,
}

impl<E: EntityTrait> Condition<E> {
    /// Validate a raw condition against the columns of `E`.
    pub fn parse(raw: &RawCondition) -> AppResult<Self> {
        let field = raw.field.as_str();
        let column = E::Column::from_str(field)
            .map_err(|_| AppError::InvalidField(format!("unknown field '{field}'")))?;
        let op: Operator = raw.op.parse()?;

        let kind = FieldKind::of(&column)
            .ok_or_else(|| AppError::InvalidField(format!("field '{field}' is not searchable")))?;
        if !kind.allows(op) {
            return Err(AppError::InvalidOperator(format!(
                "operator '{op}' does not apply to field '{field}'"
            )));
        }

        let predicate = match op {
            Operator::In => {
                let JsonValue::Array(items) = &raw.value else {
                    return Err(AppError::InvalidValue(format!(
                        "operator 'in' on '{field}' expects a list"
                    )));
                };
                if items.iter().any(JsonValue::is_null) {
                    return Err(AppError::InvalidValue(format!(
                        "operator 'in' on '{field}' cannot match null; use 'eq' with null"
                    )));
                }
                Predicate::In(
                    items
                        .iter()
                        .map(|item| kind.coerce(field, item))
                        .collect::<AppResult<_>>()?,
                )
            }
            Operator::Like => Predicate::Like(
                raw.value
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| {
                        AppError::InvalidValue(format!(
                            "operator 'like' on '{field}' expects a pattern string"
                        ))
                    })?,
            ),
            Operator::Eq if raw.value.is_null() => {
                if !column.def().is_null() {
                    return Err(AppError::InvalidValue(format!(
                        "field '{field}' is not nullable"
                    )));
                }
                Predicate::IsNull
            }
            Operator::Eq => Predicate::Eq(kind.coerce(field, &raw.value)?),
            Operator::Gt => Predicate::Gt(kind.coerce(field, &raw.value)?),
            Operator::Lt => Predicate::Lt(kind.coerce(field, &raw.value)?),
            Operator::Gte => Predicate::Gte(kind.coerce(field, &raw.value)?),
            Operator::Lte => Predicate::Lte(kind.coerce(field, &raw.value)?),
        };

        Ok(Self { column, predicate })
    }

    /// Validate a list of raw conditions, stopping at the first error.
    pub fn parse_all(raws: &[RawCondition]) -> AppResult<Vec<Self>> {
        raws.iter().map(Self::parse).collect()
    }

    /// `column = value`.
    pub fn eq(column: E::Column, value: impl Into<Value>) -> Self {
        Self {
            column,
            predicate: Predicate::Eq(value.into()),
        }
    }

    /// `column IN (values...)`.
    pub fn is_in<V, I>(column: E::Column, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self {
            column,
            predicate: Predicate::In(values.into_iter().map(Into::into).collect()),
        }
    }

    /// The column this condition applies to.
    pub const fn column(&self) -> E::Column {
        self.column
    }

    /// The operator of this condition.
    pub const fn operator(&self) -> Operator {
        match self.predicate {
            Predicate::Eq(_) | Predicate::IsNull => Operator::Eq,
            Predicate::In(_) => Operator::In,
            Predicate::Gt(_) => Operator::Gt,
            Predicate::Lt(_) => Operator::Lt,
            Predicate::Gte(_) => Operator::Gte,
            Predicate::Lte(_) => Operator::Lte,
            Predicate::Like(_) => Operator::Like,
        }
    }

    /// The filter expression for this condition.
    pub fn expr(&self) -> SimpleExpr {
        let column = self.column;
        match &self.predicate {
            Predicate::Eq(v) => column.eq(v.clone()),
            Predicate::IsNull => column.is_null(),
            Predicate::In(values) => column.is_in(values.iter().cloned()),
            Predicate::Gt(v) => column.gt(v.clone()),
            Predicate::Lt(v) => column.lt(v.clone()),
            Predicate::Gte(v) => column.gte(v.clone()),
            Predicate::Lte(v) => column.lte(v.clone()),
            Predicate::Like(pattern) => column.like(pattern.as_str()),
        }
    }
}

impl<E: EntityTrait> Clone for Condition<E> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            predicate: self.predicate.clone(),
        }
    }
}

impl<E: EntityTrait> fmt::Debug for Condition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("column", &self.column)
            .field("op", &self.operator())
            .field("predicate", &self.predicate)
            .finish()
    }
}
