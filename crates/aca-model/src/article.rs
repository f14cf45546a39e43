//! Article records and the request/response envelopes around them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::ArticleView;

/// Opaque, URL-safe identifier issued by the server for an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleKey(String);

impl ArticleKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ArticleKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for ArticleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display fields of one article as returned by list and detail endpoints.
///
/// Fetched records are never edited locally; a new query replaces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleSummary {
    pub websafe_article_key: ArticleKey,
    pub title: Option<String>,
    pub embed: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    #[serde(rename = "authorID")]
    pub author_id: Option<String>,
    #[serde(rename = "articleID")]
    pub article_id: Option<String>,
    pub tags: Vec<String>,
    pub date_created: Option<String>,
    pub websafe_author_key: Option<String>,
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ArticleView>,
}

impl ArticleSummary {
    /// Key of the article.
    pub fn key(&self) -> &ArticleKey {
        &self.websafe_article_key
    }

    /// Title, or an empty string for untitled records.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Calendar date the article was created, when the server sent a parseable timestamp.
    ///
    /// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS[.ffffff]` form the server emits.
    pub fn created_on(&self) -> Option<NaiveDate> {
        let raw = self.date_created.as_deref()?.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.date_naive());
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(timestamp.date());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// List envelope; the server omits `items` for empty results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCollection {
    #[serde(default)]
    pub items: Vec<ArticleSummary>,
}

/// One entry of the featured-key listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedKey {
    pub websafe_key: ArticleKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedKeyCollection {
    #[serde(default)]
    pub items: Vec<FeaturedKey>,
}

impl FeaturedKeyCollection {
    pub fn into_keys(self) -> Vec<ArticleKey> {
        self.items.into_iter().map(|item| item.websafe_key).collect()
    }
}

/// Argument record of every endpoint addressed by article key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleKeyRequest {
    pub websafe_article_key: ArticleKey,
}

impl ArticleKeyRequest {
    pub fn new(key: ArticleKey) -> Self {
        Self {
            websafe_article_key: key,
        }
    }
}

/// Route parameters of the article detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    #[serde(rename = "authorID")]
    pub author_id: String,
    #[serde(rename = "articleID")]
    pub article_id: String,
}

impl ArticleRef {
    pub fn new(author_id: impl Into<String>, article_id: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            article_id: article_id.into(),
        }
    }
}

/// Default tag candidates offered on the create page.
pub const DEFAULT_TAGS: [&str; 3] = ["Graffiti", "Drugs", "Music"];

/// Body of `createArticle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub embed: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ArticleDraft {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.embed.trim().is_empty()
            && self.description.trim().is_empty()
            && self.tags.is_empty()
    }
}

/// Boolean envelope returned by the favorite endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanMessage {
    #[serde(default)]
    pub data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_on_handles_server_formats() {
        let mut article = ArticleSummary {
            date_created: Some("2015-06-01 12:34:56.123456".to_string()),
            ..Default::default()
        };
        assert_eq!(article.created_on(), NaiveDate::from_ymd_opt(2015, 6, 1));

        article.date_created = Some("2016-02-29T08:00:00Z".to_string());
        assert_eq!(article.created_on(), NaiveDate::from_ymd_opt(2016, 2, 29));

        article.date_created = Some("yesterday".to_string());
        assert_eq!(article.created_on(), None);
    }

    #[test]
    fn featured_keys_flatten() {
        let collection = FeaturedKeyCollection {
            items: vec![
                FeaturedKey {
                    websafe_key: "a1".into(),
                },
                FeaturedKey {
                    websafe_key: "b2".into(),
                },
            ],
        };
        assert_eq!(
            collection.into_keys(),
            vec![ArticleKey::from("a1"), ArticleKey::from("b2")]
        );
    }
}
