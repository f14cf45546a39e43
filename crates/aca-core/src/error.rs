//! Error types for screen actions.

use thiserror::Error;

use aca_client::RpcError;

/// A form that cannot be submitted; no call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a title is required")]
    TitleRequired,
}

/// Errors raised by view-model actions before any call is issued.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no article at index {index} ({len} listed)")]
    NoSuchArticle { index: usize, len: usize },

    #[error("the article has not been loaded")]
    ArticleNotLoaded,

    #[error("sign-in is required")]
    SignInRequired,

    #[error("a change to this article is still in progress")]
    ChangePending,

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl CoreError {
    /// Text suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(ValidationError::TitleRequired) => {
                "Please enter a title for the article".to_string()
            }
            CoreError::NoSuchArticle { .. } => "That article is no longer listed".to_string(),
            CoreError::ArticleNotLoaded => "The article is still loading".to_string(),
            CoreError::SignInRequired => "Please sign in first".to_string(),
            CoreError::ChangePending => "That article is still being updated".to_string(),
            CoreError::Rpc(err) => err.user_message().to_string(),
        }
    }

    pub fn is_sign_in_required(&self) -> bool {
        match self {
            CoreError::SignInRequired => true,
            CoreError::Rpc(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}

/// Result type for view-model actions.
pub type Result<T> = std::result::Result<T, CoreError>;
