//! One view model per screen.
//!
//! Each view model owns its state, implements [`ViewModel`](crate::ViewModel)
//! and exposes action methods that return the [`Task`] to drive. Completion
//! messages carry the [`Ticket`] of the call they answer, so a superseded or
//! closed call never writes.

mod article_detail;
mod create_article;
mod find_articles;
mod home;
mod profile;
mod session;

use std::hash::Hash;
use std::sync::Arc;

use aca_client::{Gateway, RpcError};
use aca_model::ArticleKey;

use crate::call::Ticket;
use crate::membership::ToggleDecision;
use crate::screen::Screen;
use crate::status::Operation;
use crate::task::Task;

pub use article_detail::{ArticleDetailCall, ArticleDetailMessage, ArticleDetailViewModel};
pub use create_article::{CreateArticleCall, CreateArticleMessage, CreateArticleViewModel};
pub use find_articles::{FindArticlesCall, FindArticlesMessage, FindArticlesViewModel, Tab};
pub use home::{HomeCall, HomeMessage, HomeViewModel};
pub use profile::{ProfileCall, ProfileMessage, ProfileViewModel};
pub use session::{SessionCall, SessionMessage, SessionViewModel};

/// Result carried by completion messages.
pub type RpcResult<T> = Result<T, RpcError>;

/// Issues the membership call chosen by `decision`.
fn membership_task<M: Send + 'static>(
    gateway: Arc<Gateway>,
    decision: ToggleDecision,
    key: ArticleKey,
    map: impl FnOnce(RpcResult<bool>) -> M + Send + 'static,
) -> Task<M> {
    Task::perform(
        async move { gateway.set_membership(decision.endpoint, &key).await },
        map,
    )
}

/// Settles a membership completion. Returns true when the server confirmed
/// the change and the local set should follow.
fn settle_membership<S: Clone + Eq + Hash + std::fmt::Debug>(
    screen: &mut Screen<S>,
    ticket: &Ticket<S>,
    decision: ToggleDecision,
    result: &RpcResult<bool>,
) -> bool {
    let operation = Operation::Membership(decision.kind, decision.action);
    match result {
        Ok(false) => {
            screen.settle_rejected(ticket, operation);
            false
        }
        _ => screen.settle(ticket, operation, result) && result.is_ok(),
    }
}
