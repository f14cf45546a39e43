//! Article detail screen.

use aca_model::{ArticleRef, ArticleSummary, Profile};

use super::{RpcResult, membership_task, settle_membership};
use crate::call::Ticket;
use crate::error::{CoreError, Result};
use crate::membership::{self, MembershipKind, ToggleAction, ToggleDecision};
use crate::screen::{AppContext, Screen};
use crate::status::{Operation, StatusMessage};
use crate::task::{Task, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArticleDetailCall {
    Article,
    Profile,
    Favorite,
}

#[derive(Debug, Clone)]
pub enum ArticleDetailMessage {
    Load,
    ArticleLoaded(Ticket<ArticleDetailCall>, RpcResult<ArticleSummary>),
    ProfileLoaded(Ticket<ArticleDetailCall>, RpcResult<Profile>),
    AddToFavorites,
    RemoveFromFavorites,
    FavoriteChanged(Ticket<ArticleDetailCall>, ToggleAction, RpcResult<bool>),
    Close,
}

#[derive(Debug)]
pub struct ArticleDetailViewModel {
    ctx: AppContext,
    screen: Screen<ArticleDetailCall>,
    route: ArticleRef,
    article: Option<ArticleSummary>,
    profile: Option<Profile>,
    /// Membership confirmed by the last favorite change, if any.
    confirmed_favorite: Option<bool>,
}

impl ArticleDetailViewModel {
    pub fn new(ctx: AppContext, route: ArticleRef) -> Self {
        Self {
            ctx,
            screen: Screen::default(),
            route,
            article: None,
            profile: None,
            confirmed_favorite: None,
        }
    }

    /// Loads the article, and the profile when signed in.
    pub fn load(&mut self) -> Task<ArticleDetailMessage> {
        let mut tasks = Vec::with_capacity(2);
        let ticket = self.screen.begin(ArticleDetailCall::Article);
        let gateway = self.ctx.gateway.clone();
        let route = self.route.clone();
        tasks.push(Task::perform(
            async move { gateway.get_article(&route).await },
            move |result| ArticleDetailMessage::ArticleLoaded(ticket, result),
        ));
        if self.ctx.signed_in() {
            let ticket = self.screen.begin(ArticleDetailCall::Profile);
            let gateway = self.ctx.gateway.clone();
            tasks.push(Task::perform(
                async move { gateway.get_my_profile().await },
                move |result| ArticleDetailMessage::ProfileLoaded(ticket, result),
            ));
        }
        Task::batch(tasks)
    }

    pub fn add_to_favorites(&mut self) -> Result<Task<ArticleDetailMessage>> {
        self.change_favorite(ToggleAction::Add)
    }

    pub fn remove_from_favorites(&mut self) -> Result<Task<ArticleDetailMessage>> {
        self.change_favorite(ToggleAction::Remove)
    }

    /// Whether the loaded article is among the user's favorites.
    pub fn is_favorite(&self) -> bool {
        if let Some(favorite) = self.confirmed_favorite {
            return favorite;
        }
        match (&self.article, &self.profile) {
            (Some(article), Some(profile)) => profile.is_favorite(article.key()),
            _ => false,
        }
    }

    pub fn route(&self) -> &ArticleRef {
        &self.route
    }

    pub fn article(&self) -> Option<&ArticleSummary> {
        self.article.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.screen.status()
    }

    pub fn login_requested(&self) -> bool {
        self.screen.login_requested()
    }

    pub fn close(&mut self) {
        self.screen.close();
    }

    fn change_favorite(&mut self, action: ToggleAction) -> Result<Task<ArticleDetailMessage>> {
        if !self.ctx.signed_in() {
            return Err(CoreError::SignInRequired);
        }
        let Some(article) = &self.article else {
            return Err(CoreError::ArticleNotLoaded);
        };
        let key = article.key().clone();
        let decision = ToggleDecision::new(MembershipKind::Favorites, action);
        self.screen.ensure_idle(&ArticleDetailCall::Favorite)?;
        let ticket = self.screen.begin(ArticleDetailCall::Favorite);
        Ok(membership_task(
            self.ctx.gateway.clone(),
            decision,
            key,
            move |result| ArticleDetailMessage::FavoriteChanged(ticket, action, result),
        ))
    }

    /// Shows the favorite notice once both the article and profile are known.
    fn note_favorite(&mut self) {
        if self.is_favorite() {
            self.screen
                .set_status(StatusMessage::info("This article is in your Favorites"));
        }
    }
}

impl ViewModel for ArticleDetailViewModel {
    type Message = ArticleDetailMessage;

    fn update(&mut self, message: ArticleDetailMessage) -> Task<ArticleDetailMessage> {
        match message {
            ArticleDetailMessage::Load => self.load(),

            ArticleDetailMessage::ArticleLoaded(ticket, result) => {
                let route = self.route.clone();
                if self
                    .screen
                    .settle_reporting_errors(&ticket, Operation::LoadArticle(&route), &result)
                    && let Ok(article) = result
                {
                    self.article = Some(article);
                    self.note_favorite();
                }
                Task::none()
            }

            ArticleDetailMessage::ProfileLoaded(ticket, result) => {
                if self.screen.settle_quietly(&ticket, &result)
                    && let Ok(mut profile) = result
                {
                    profile.favorite_articles = membership::dedup_keys(profile.favorite_articles);
                    self.profile = Some(profile);
                    self.note_favorite();
                }
                Task::none()
            }

            ArticleDetailMessage::AddToFavorites => {
                self.add_to_favorites().unwrap_or_else(|err| {
                    self.screen.report(&err);
                    Task::none()
                })
            }

            ArticleDetailMessage::RemoveFromFavorites => {
                self.remove_from_favorites().unwrap_or_else(|err| {
                    self.screen.report(&err);
                    Task::none()
                })
            }

            ArticleDetailMessage::FavoriteChanged(ticket, action, result) => {
                let decision = ToggleDecision::new(MembershipKind::Favorites, action);
                if settle_membership(&mut self.screen, &ticket, decision, &result) {
                    self.confirmed_favorite = Some(action == ToggleAction::Add);
                    if let (Some(article), Some(profile)) = (&self.article, &mut self.profile) {
                        membership::apply(&mut profile.favorite_articles, action, article.key());
                    }
                }
                Task::none()
            }

            ArticleDetailMessage::Close => {
                self.close();
                Task::none()
            }
        }
    }
}
