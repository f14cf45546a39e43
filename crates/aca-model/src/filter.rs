//! Query filters sent to the `queryArticles` endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Field a query filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterField {
    City,
    Topic,
    Month,
    MaxAttendees,
}

impl FilterField {
    /// Fields in the order the filter editor offers them.
    pub const ALL: [FilterField; 4] = [
        FilterField::City,
        FilterField::Topic,
        FilterField::Month,
        FilterField::MaxAttendees,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::City => "CITY",
            FilterField::Topic => "TOPIC",
            FilterField::Month => "MONTH",
            FilterField::MaxAttendees => "MAX_ATTENDEES",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::City => "City",
            FilterField::Topic => "Topic",
            FilterField::Month => "Start month",
            FilterField::MaxAttendees => "Max Attendees",
        }
    }
}

impl Default for FilterField {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FilterField {
    type Err = ModelError;

    /// Accepts either the wire name or the display label, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilterField::ALL
            .into_iter()
            .find(|field| {
                field.as_str().eq_ignore_ascii_case(trimmed)
                    || field.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// Comparison operator of a query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
    Gt,
    Gteq,
    Lt,
    Lteq,
    Ne,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 6] = [
        FilterOperator::Eq,
        FilterOperator::Gt,
        FilterOperator::Gteq,
        FilterOperator::Lt,
        FilterOperator::Lteq,
        FilterOperator::Ne,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "EQ",
            FilterOperator::Gt => "GT",
            FilterOperator::Gteq => "GTEQ",
            FilterOperator::Lt => "LT",
            FilterOperator::Lteq => "LTEQ",
            FilterOperator::Ne => "NE",
        }
    }

    /// Symbol shown in the operator picker.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Gt => ">",
            FilterOperator::Gteq => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lteq => "<=",
            FilterOperator::Ne => "!=",
        }
    }

    /// Every operator except equality is an inequality on the server.
    pub fn is_inequality(&self) -> bool {
        !matches!(self, FilterOperator::Eq)
    }
}

impl Default for FilterOperator {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for FilterOperator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(trimmed) || op.label() == trimmed)
            .ok_or_else(|| ModelError::UnknownOperator(s.to_string()))
    }
}

/// A complete predicate as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: String,
}

impl QueryFilter {
    pub fn new(field: FilterField, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field.as_str(), self.operator.as_str(), self.value)
    }
}

impl FromStr for QueryFilter {
    type Err = ModelError;

    /// Parses `FIELD:OP:VALUE`; the value may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(field), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ModelError::MalformedFilter(s.to_string()));
        };
        Ok(Self {
            field: field.parse()?,
            operator: operator.parse()?,
            value: value.to_string(),
        })
    }
}

/// Request body of `queryArticles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
}

impl QueryPayload {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

impl fmt::Display for QueryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
