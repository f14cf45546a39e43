//! Presentation logic for the Art Crime Archive.
//!
//! This crate holds everything between the remote gateway and whatever
//! renders the screens:
//!
//! - [`list`]: the displayed article list and its pagination
//! - [`membership`]: the favorite/featured toggle rule
//! - [`filter`]: editable query filters and the payload builder
//! - [`status`]: the pure projection of call outcomes onto a status line
//! - [`call`]: per-call tickets that keep superseded responses from writing
//! - [`view`]: one owned view model per screen, driven by messages
//!
//! # Driving a screen
//!
//! ```no_run
//! use aca_core::{AppContext, HomeMessage, HomeViewModel, dispatch};
//!
//! async fn show_home(ctx: AppContext) {
//!     let mut home = HomeViewModel::new(ctx);
//!     dispatch(&mut home, HomeMessage::Load).await;
//!     for (index, article) in home.articles().page_items() {
//!         println!("{index}: {}", article.title_or_default());
//!     }
//! }
//! ```

pub mod call;
pub mod error;
pub mod filter;
pub mod list;
pub mod membership;
pub mod screen;
pub mod status;
pub mod task;
pub mod view;

pub use call::{CallState, CallTracker, LoadingSet, Ticket};
pub use error::{CoreError, Result, ValidationError};
pub use filter::{FilterDraft, FilterList};
pub use list::{ArticleList, DEFAULT_PAGE_SIZE, Pagination, page_count};
pub use membership::{MembershipKind, ToggleAction, ToggleDecision};
pub use screen::{AppContext, Screen};
pub use status::{Operation, Outcome, Severity, StatusMessage, project};
pub use task::{Task, ViewModel, dispatch, run_until_idle};
pub use view::{
    ArticleDetailMessage, ArticleDetailViewModel, CreateArticleMessage, CreateArticleViewModel,
    FindArticlesMessage, FindArticlesViewModel, HomeMessage, HomeViewModel, ProfileMessage,
    ProfileViewModel, RpcResult, SessionMessage, SessionViewModel, Tab,
};
