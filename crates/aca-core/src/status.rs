//! Status line shown after a remote call completes.
//!
//! [`project`] is pure: it neither logs nor performs I/O. Callers decide
//! whether a status is worth logging.

use std::fmt;

use aca_client::RpcError;
use aca_model::{ArticleRef, QueryPayload};

use crate::membership::{MembershipKind, ToggleAction};

/// How a status message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.label(), self.text)
    }
}

/// The user action a status message reports on.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    LoadArticles,
    LoadProfile,
    LoadArticle(&'a ArticleRef),
    QueryArticles(&'a QueryPayload),
    CreateArticle { title: &'a str },
    UpdateProfile,
    Membership(MembershipKind, ToggleAction),
    SignIn { email: &'a str },
    SignOut,
}

/// Completion of a call, reduced to what the status line needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    Success,
    /// Failed, with the server's error text when it sent one.
    Failure(Option<&'a str>),
}

impl<'a> Outcome<'a> {
    pub fn from_result<T>(result: &'a Result<T, RpcError>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(err) => Outcome::Failure(err.server_message()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Maps a completed call onto a status message.
///
/// Successes report with [`Severity::Success`], failures with
/// [`Severity::Warning`] and the server's text appended when present.
pub fn project(operation: Operation<'_>, outcome: Outcome<'_>) -> StatusMessage {
    match outcome {
        Outcome::Success => StatusMessage::success(success_text(operation)),
        Outcome::Failure(detail) => {
            let prefix = failure_text(operation);
            match detail.map(str::trim).filter(|text| !text.is_empty()) {
                Some(detail) => StatusMessage::warning(format!("{prefix} : {detail}")),
                None => StatusMessage::warning(prefix),
            }
        }
    }
}

fn success_text(operation: Operation<'_>) -> String {
    match operation {
        Operation::LoadArticles => "Success".to_string(),
        Operation::LoadProfile => "Profile loaded".to_string(),
        Operation::LoadArticle(_) => "Success".to_string(),
        Operation::QueryArticles(payload) => format!("Query succeeded : {payload}"),
        Operation::CreateArticle { title } => format!("The article has been created : {title}"),
        Operation::UpdateProfile => "The profile has been updated".to_string(),
        Operation::Membership(kind, action) => match (kind, action) {
            (MembershipKind::Favorites, ToggleAction::Add) => "Added article to favorites",
            (MembershipKind::Favorites, ToggleAction::Remove) => "Removed article from favorites",
            (MembershipKind::Featured, ToggleAction::Add) => "Added article to featured articles",
            (MembershipKind::Featured, ToggleAction::Remove) => {
                "Removed article from featured articles"
            }
        }
        .to_string(),
        Operation::SignIn { email } => format!("Logged in with {email}"),
        Operation::SignOut => "Logged out".to_string(),
    }
}

fn failure_text(operation: Operation<'_>) -> String {
    match operation {
        Operation::LoadArticles => "Failed to get articles".to_string(),
        Operation::LoadProfile => "Failed to get the profile".to_string(),
        Operation::LoadArticle(article) => format!(
            "Failed to get the article : {}/{}",
            article.author_id, article.article_id
        ),
        Operation::QueryArticles(_) => "Failed to query articles".to_string(),
        Operation::CreateArticle { .. } => "Failed to create an article".to_string(),
        Operation::UpdateProfile => "Failed to update a profile".to_string(),
        Operation::Membership(kind, action) => match (kind, action) {
            (MembershipKind::Favorites, ToggleAction::Add) => "Failed to add article to favorites",
            (MembershipKind::Favorites, ToggleAction::Remove) => {
                "Failed to remove article from favorites"
            }
            (MembershipKind::Featured, ToggleAction::Add) => {
                "Failed to add article to featured articles"
            }
            (MembershipKind::Featured, ToggleAction::Remove) => {
                "Failed to remove article from featured articles"
            }
        }
        .to_string(),
        Operation::SignIn { .. } => "Failed to sign in".to_string(),
        Operation::SignOut => "Failed to sign out".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_title_is_reported() {
        let status = project(
            Operation::CreateArticle { title: "Stolen Vermeer" },
            Outcome::Success,
        );
        assert_eq!(status.severity, Severity::Success);
        assert_eq!(status.text, "The article has been created : Stolen Vermeer");
    }

    #[test]
    fn server_text_is_appended_to_warning() {
        let result: Result<(), RpcError> = Err(RpcError::Server {
            code: 400,
            message: "quota exceeded".to_string(),
        });
        let status = project(
            Operation::CreateArticle { title: "" },
            Outcome::from_result(&result),
        );
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.text, "Failed to create an article : quota exceeded");
    }

    #[test]
    fn missing_server_text_uses_generic_message() {
        let result: Result<(), RpcError> = Err(RpcError::Transport("reset".to_string()));
        let status = project(Operation::LoadArticles, Outcome::from_result(&result));
        assert_eq!(status, StatusMessage::warning("Failed to get articles"));

        let blank = project(Operation::LoadArticles, Outcome::Failure(Some("  ")));
        assert_eq!(blank.text, "Failed to get articles");
    }

    #[test]
    fn membership_messages() {
        let added = project(
            Operation::Membership(MembershipKind::Favorites, ToggleAction::Add),
            Outcome::Success,
        );
        assert_eq!(added.text, "Added article to favorites");

        let rejected = project(
            Operation::Membership(MembershipKind::Favorites, ToggleAction::Remove),
            Outcome::Failure(None),
        );
        assert!(rejected.is_warning());
        assert_eq!(rejected.text, "Failed to remove article from favorites");
    }

    #[test]
    fn session_messages() {
        let status = project(Operation::SignIn { email: "ana@example.org" }, Outcome::Success);
        assert_eq!(status.to_string(), "[Success] Logged in with ana@example.org");
        assert_eq!(project(Operation::SignOut, Outcome::Success).text, "Logged out");
    }
}
