//! Signed-in author profile.

use serde::{Deserialize, Serialize};

use crate::article::ArticleKey;
use crate::enums::UserRights;

/// Profile of the signed-in author, fetched once per page load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(rename = "authorID")]
    pub author_id: Option<String>,
    pub display_name: Option<String>,
    pub main_email: Option<String>,
    pub websafe_author_key: Option<String>,
    pub organizations: Vec<String>,
    pub favorite_articles: Vec<ArticleKey>,
    pub user_rights: UserRights,
}

impl Profile {
    pub fn is_favorite(&self, key: &ArticleKey) -> bool {
        self.favorite_articles.contains(key)
    }

    /// Snapshot of the fields the profile page lets the user edit.
    pub fn editable(&self) -> ProfileUpdate {
        ProfileUpdate {
            display_name: self.display_name.clone(),
            main_email: self.main_email.clone(),
            organizations: self.organizations.clone(),
            user_rights: self.user_rights,
        }
    }

    /// Copies edited fields back onto the profile.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        self.display_name.clone_from(&update.display_name);
        self.main_email.clone_from(&update.main_email);
        self.organizations.clone_from(&update.organizations);
        self.user_rights = update.user_rights;
    }
}

/// Body of `updateMyProfile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_email: Option<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub user_rights: UserRights,
}
