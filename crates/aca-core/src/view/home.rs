//! Home screen: featured articles and the signed-in user's favorites.

use std::num::NonZeroUsize;

use aca_model::{ArticleKey, ArticleSummary, Profile};

use super::{RpcResult, membership_task, settle_membership};
use crate::call::Ticket;
use crate::error::{CoreError, Result};
use crate::list::ArticleList;
use crate::membership::{self, MembershipKind, ToggleAction, ToggleDecision};
use crate::screen::{AppContext, Screen};
use crate::status::{Operation, StatusMessage};
use crate::task::{Task, ViewModel};

/// Call slots of the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HomeCall {
    Profile,
    Featured,
    Favorite(ArticleKey),
    Unfeature(ArticleKey),
}

#[derive(Debug, Clone)]
pub enum HomeMessage {
    Load,
    ProfileLoaded(Ticket<HomeCall>, RpcResult<Profile>),
    FeaturedLoaded(Ticket<HomeCall>, RpcResult<Vec<ArticleSummary>>),
    ToggleFavorite(usize),
    FavoriteToggled(Ticket<HomeCall>, ToggleDecision, RpcResult<bool>),
    RemoveFeatured(usize),
    FeaturedRemoved(Ticket<HomeCall>, RpcResult<bool>),
    SelectPage(usize),
    Close,
}

#[derive(Debug)]
pub struct HomeViewModel {
    ctx: AppContext,
    screen: Screen<HomeCall>,
    profile: Option<Profile>,
    articles: ArticleList,
}

impl HomeViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            screen: Screen::default(),
            profile: None,
            articles: ArticleList::new(),
        }
    }

    pub fn with_page_size(ctx: AppContext, page_size: NonZeroUsize) -> Self {
        Self {
            articles: ArticleList::with_page_size(page_size),
            ..Self::new(ctx)
        }
    }

    /// Loads the featured list, and the profile when signed in.
    pub fn load(&mut self) -> Task<HomeMessage> {
        let mut tasks = Vec::with_capacity(2);
        if self.ctx.signed_in() {
            let ticket = self.screen.begin(HomeCall::Profile);
            let gateway = self.ctx.gateway.clone();
            tasks.push(Task::perform(
                async move { gateway.get_my_profile().await },
                move |result| HomeMessage::ProfileLoaded(ticket, result),
            ));
        }
        let ticket = self.screen.begin(HomeCall::Featured);
        let gateway = self.ctx.gateway.clone();
        tasks.push(Task::perform(
            async move { gateway.get_featured_articles().await },
            move |result| HomeMessage::FeaturedLoaded(ticket, result),
        ));
        Task::batch(tasks)
    }

    /// Adds or removes the article at `index` from the user's favorites.
    pub fn toggle_favorite(&mut self, index: usize) -> Result<Task<HomeMessage>> {
        let key = self.key_at(index)?;
        let Some(profile) = &self.profile else {
            return Err(CoreError::SignInRequired);
        };
        let decision = membership::decide(
            MembershipKind::Favorites,
            &profile.favorite_articles,
            &key,
        );
        let slot = HomeCall::Favorite(key.clone());
        self.screen.ensure_idle(&slot)?;
        let ticket = self.screen.begin(slot);
        Ok(membership_task(
            self.ctx.gateway.clone(),
            decision,
            key,
            move |result| HomeMessage::FavoriteToggled(ticket, decision, result),
        ))
    }

    /// Withdraws the article at `index` from the featured list.
    pub fn remove_featured(&mut self, index: usize) -> Result<Task<HomeMessage>> {
        let key = self.key_at(index)?;
        let decision = ToggleDecision::new(MembershipKind::Featured, ToggleAction::Remove);
        let slot = HomeCall::Unfeature(key.clone());
        self.screen.ensure_idle(&slot)?;
        let ticket = self.screen.begin(slot);
        Ok(membership_task(
            self.ctx.gateway.clone(),
            decision,
            key,
            move |result| HomeMessage::FeaturedRemoved(ticket, result),
        ))
    }

    /// Stops accepting completions.
    pub fn close(&mut self) {
        self.screen.close();
    }

    pub fn articles(&self) -> &ArticleList {
        &self.articles
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_favorite(&self, article: &ArticleSummary) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.is_favorite(article.key()))
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

    pub fn screen(&self) -> &Screen<HomeCall> {
        &self.screen
    }

    fn key_at(&self, index: usize) -> Result<ArticleKey> {
        self.articles
            .get(index)
            .map(|article| article.key().clone())
            .ok_or(CoreError::NoSuchArticle {
                index,
                len: self.articles.len(),
            })
    }

    fn or_report(&mut self, action: Result<Task<HomeMessage>>) -> Task<HomeMessage> {
        action.unwrap_or_else(|err| {
            self.screen.report(&err);
            Task::none()
        })
    }
}

impl ViewModel for HomeViewModel {
    type Message = HomeMessage;

    fn update(&mut self, message: HomeMessage) -> Task<HomeMessage> {
        match message {
            HomeMessage::Load => self.load(),

            HomeMessage::ProfileLoaded(ticket, result) => {
                if self.screen.settle_quietly(&ticket, &result)
                    && let Ok(mut profile) = result
                {
                    profile.favorite_articles = membership::dedup_keys(profile.favorite_articles);
                    self.profile = Some(profile);
                }
                Task::none()
            }

            HomeMessage::FeaturedLoaded(ticket, result) => {
                if self
                    .screen
                    .settle_reporting_errors(&ticket, Operation::LoadArticles, &result)
                    && let Ok(articles) = result
                {
                    tracing::info!(count = articles.len(), "Featured articles loaded");
                    self.articles.replace(articles);
                }
                Task::none()
            }

            HomeMessage::ToggleFavorite(index) => {
                let action = self.toggle_favorite(index);
                self.or_report(action)
            }

            HomeMessage::FavoriteToggled(ticket, decision, result) => {
                if settle_membership(&mut self.screen, &ticket, decision, &result)
                    && let Some(profile) = &mut self.profile
                    && let HomeCall::Favorite(key) = ticket.slot()
                {
                    membership::apply(&mut profile.favorite_articles, decision.action, key);
                }
                Task::none()
            }

            HomeMessage::RemoveFeatured(index) => {
                let action = self.remove_featured(index);
                self.or_report(action)
            }

            HomeMessage::FeaturedRemoved(ticket, result) => {
                let decision = ToggleDecision::new(MembershipKind::Featured, ToggleAction::Remove);
                if settle_membership(&mut self.screen, &ticket, decision, &result)
                    && let HomeCall::Unfeature(key) = ticket.slot()
                {
                    self.articles.remove_key(key);
                }
                Task::none()
            }

            HomeMessage::SelectPage(page) => {
                self.articles.set_page(page);
                Task::none()
            }

            HomeMessage::Close => {
                self.close();
                Task::none()
            }
        }
    }
}
