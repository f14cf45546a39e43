//! Data model shared by the Art Crime Archive client crates.
//!
//! Everything here mirrors a message shape owned by the remote API; field
//! names follow the server's camelCase wire format through serde renames.

pub mod article;
pub mod enums;
pub mod error;
pub mod filter;
pub mod profile;

pub use article::{
    ArticleCollection, ArticleDraft, ArticleKey, ArticleKeyRequest, ArticleRef, ArticleSummary,
    BooleanMessage, DEFAULT_TAGS, FeaturedKey, FeaturedKeyCollection,
};
pub use enums::{ArticleView, UserRights};
pub use error::{ModelError, Result};
pub use filter::{FilterField, FilterOperator, QueryFilter, QueryPayload};
pub use profile::{Profile, ProfileUpdate};
