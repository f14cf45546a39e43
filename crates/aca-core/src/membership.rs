//! Favorite and featured membership toggling.
//!
//! Both memberships share one decision rule: a key already in the set is
//! removed, any other key is added. Local sets change only after the server
//! confirmed the call, so a rejected call leaves them untouched.

use std::fmt;

use aca_client::Endpoint;
use aca_model::ArticleKey;

/// Which membership set a toggle operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipKind {
    /// Per-user favorites, stored on the profile.
    Favorites,
    /// Editorial promotion, shared by all users.
    Featured,
}

impl MembershipKind {
    pub fn add_endpoint(&self) -> Endpoint {
        match self {
            MembershipKind::Favorites => Endpoint::AddArticleToFavorites,
            MembershipKind::Featured => Endpoint::AddFeaturedArticle,
        }
    }

    pub fn remove_endpoint(&self) -> Endpoint {
        match self {
            MembershipKind::Favorites => Endpoint::RemoveArticleFromFavorites,
            MembershipKind::Featured => Endpoint::RemoveFeaturedArticle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipKind::Favorites => "favorites",
            MembershipKind::Featured => "featured",
        }
    }
}

impl fmt::Display for MembershipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleAction {
    Add,
    Remove,
}

/// Outcome of the decision rule: what to do and which endpoint does it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleDecision {
    pub kind: MembershipKind,
    pub action: ToggleAction,
    pub endpoint: Endpoint,
}

impl ToggleDecision {
    /// Pairs `action` with the matching endpoint of `kind`.
    pub fn new(kind: MembershipKind, action: ToggleAction) -> Self {
        let endpoint = match action {
            ToggleAction::Add => kind.add_endpoint(),
            ToggleAction::Remove => kind.remove_endpoint(),
        };
        Self {
            kind,
            action,
            endpoint,
        }
    }
}

/// Decides whether toggling `key` adds or removes it.
pub fn decide(kind: MembershipKind, members: &[ArticleKey], key: &ArticleKey) -> ToggleDecision {
    let action = if members.contains(key) {
        ToggleAction::Remove
    } else {
        ToggleAction::Add
    };
    ToggleDecision::new(kind, action)
}

/// Applies a confirmed action. Adding a present key or removing an absent
/// one changes nothing.
pub fn apply(members: &mut Vec<ArticleKey>, action: ToggleAction, key: &ArticleKey) {
    match action {
        ToggleAction::Add => {
            if !members.contains(key) {
                members.push(key.clone());
            }
        }
        ToggleAction::Remove => members.retain(|member| member != key),
    }
}

/// Decides and applies in one step, as if the server confirmed immediately.
pub fn toggle(kind: MembershipKind, members: &mut Vec<ArticleKey>, key: &ArticleKey) -> ToggleDecision {
    let decision = decide(kind, members, key);
    apply(members, decision.action, key);
    decision
}

/// Drops repeated keys from a server-provided set, keeping first occurrences.
pub fn dedup_keys(keys: Vec<ArticleKey>) -> Vec<ArticleKey> {
    let mut unique = Vec::with_capacity(keys.len());
    for key in keys {
        if !unique.contains(&key) {
            unique.push(key);
        }
    }
    unique
}
