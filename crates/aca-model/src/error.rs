use thiserror::Error;

/// Errors raised while parsing model values from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown filter field: {0}")]
    UnknownField(String),
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),
    #[error("unknown author rights level: {0}")]
    UnknownRights(String),
    #[error("unknown article view: {0}")]
    UnknownView(String),
    #[error("unknown listing tab: {0}")]
    UnknownTab(String),
    #[error("malformed filter expression: {0}")]
    MalformedFilter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
