//! Type-safe enumerations for values the archive API exchanges as strings.
//!
//! Wire names are carried by serde renames; the text shown to users lives in
//! `label()` so display wording never leaks into requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Author-rights level attached to a signed-in profile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRights {
    /// Same as a visitor who is not signed in.
    #[default]
    None,
    Author,
    Featured,
    Fellow,
    /// Older server builds emit `FULL_ADMIN` for this level.
    #[serde(alias = "FULL_ADMIN")]
    Administrator,
}

impl UserRights {
    /// Every level in ascending order, as offered by the profile page.
    pub const ALL: [UserRights; 5] = [
        UserRights::None,
        UserRights::Author,
        UserRights::Featured,
        UserRights::Fellow,
        UserRights::Administrator,
    ];

    /// Wire name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRights::None => "NONE",
            UserRights::Author => "AUTHOR",
            UserRights::Featured => "FEATURED",
            UserRights::Fellow => "FELLOW",
            UserRights::Administrator => "ADMINISTRATOR",
        }
    }

    /// Human-readable description for selection lists.
    pub fn label(&self) -> &'static str {
        match self {
            UserRights::None => "No author rights",
            UserRights::Author => "Normal author rights",
            UserRights::Featured => "Featured Author",
            UserRights::Fellow => "Fellow",
            UserRights::Administrator => "Administrator",
        }
    }

    /// Returns true when the level may curate the featured list.
    pub fn can_curate(&self) -> bool {
        matches!(self, UserRights::Fellow | UserRights::Administrator)
    }
}

impl fmt::Display for UserRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for UserRights {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(UserRights::None),
            "AUTHOR" => Ok(UserRights::Author),
            "FEATURED" => Ok(UserRights::Featured),
            "FELLOW" => Ok(UserRights::Fellow),
            "ADMINISTRATOR" | "FULL_ADMIN" | "ADMIN" => Ok(UserRights::Administrator),
            _ => Err(ModelError::UnknownRights(s.to_string())),
        }
    }
}

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleView {
    Published,
    NotPublished,
    Redacted,
}

impl ArticleView {
    pub const ALL: [ArticleView; 3] = [
        ArticleView::Published,
        ArticleView::NotPublished,
        ArticleView::Redacted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleView::Published => "PUBLISHED",
            ArticleView::NotPublished => "NOT_PUBLISHED",
            ArticleView::Redacted => "REDACTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArticleView::Published => "Published",
            ArticleView::NotPublished => "Preview",
            ArticleView::Redacted => "Redacted",
        }
    }
}

impl fmt::Display for ArticleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ArticleView {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "PUBLISHED" => Ok(ArticleView::Published),
            "NOT_PUBLISHED" | "PREVIEW" => Ok(ArticleView::NotPublished),
            "REDACTED" => Ok(ArticleView::Redacted),
            _ => Err(ModelError::UnknownView(s.to_string())),
        }
    }
}
