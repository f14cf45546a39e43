//! Find screen: tabbed article listings, filters and curation toggles.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use aca_client::Endpoint;
use aca_model::{
    ArticleKey, ArticleSummary, FilterField, FilterOperator, ModelError, Profile, QueryPayload,
};

use super::{RpcResult, membership_task, settle_membership};
use crate::call::Ticket;
use crate::error::{CoreError, Result};
use crate::filter::FilterList;
use crate::list::ArticleList;
use crate::membership::{self, MembershipKind, ToggleAction, ToggleDecision};
use crate::screen::{AppContext, Screen};
use crate::status::{Operation, StatusMessage};
use crate::task::{Task, ViewModel};

/// Listing shown on the find screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    All,
    #[default]
    Featured,
    MyArticles,
    MyFavorites,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::All, Tab::Featured, Tab::MyArticles, Tab::MyFavorites];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "ALL",
            Tab::Featured => "FEATURED",
            Tab::MyArticles => "MY_ARTICLES",
            Tab::MyFavorites => "MY_FAVORITES",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Featured => "Featured",
            Tab::MyArticles => "You have created",
            Tab::MyFavorites => "You have favorited",
        }
    }

    /// Tabs listing the user's own records need a signed-in user.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Tab::MyArticles | Tab::MyFavorites)
    }

    /// Listing endpoint backing the tab.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Tab::All => Endpoint::GetAllArticles,
            Tab::Featured => Endpoint::GetFeaturedArticles,
            Tab::MyArticles => Endpoint::GetMyArticles,
            Tab::MyFavorites => Endpoint::GetMyFavoriteArticles,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = ModelError;

    /// Accepts wire names plus the short forms `mine` and `favorites`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "ALL" => Ok(Tab::All),
            "FEATURED" => Ok(Tab::Featured),
            "MY_ARTICLES" | "MINE" => Ok(Tab::MyArticles),
            "MY_FAVORITES" | "FAVORITES" => Ok(Tab::MyFavorites),
            _ => Err(ModelError::UnknownTab(s.to_string())),
        }
    }
}

/// Call slots of the find screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FindArticlesCall {
    Profile,
    FeaturedKeys,
    Articles,
    Login,
    Membership(MembershipKind, ArticleKey),
}

#[derive(Debug, Clone)]
pub enum FindArticlesMessage {
    Init,
    ProfileLoaded(Ticket<FindArticlesCall>, RpcResult<Profile>),
    FeaturedKeysLoaded(Ticket<FindArticlesCall>, RpcResult<Vec<ArticleKey>>),
    SelectTab(Tab),
    LoginFinished(Ticket<FindArticlesCall>, Tab, RpcResult<()>),
    Query,
    QueryWithFilters,
    ArticlesLoaded(Ticket<FindArticlesCall>, Option<QueryPayload>, RpcResult<Vec<ArticleSummary>>),
    AddFilter,
    RemoveFilter(usize),
    ClearFilters,
    SetFilterField(usize, Option<FilterField>),
    SetFilterOperator(usize, Option<FilterOperator>),
    SetFilterValue(usize, String),
    ToggleFavorite(usize),
    ToggleFeatured(usize),
    RemoveFeatured(usize),
    MembershipChanged(Ticket<FindArticlesCall>, ToggleDecision, RpcResult<bool>),
    FeaturedRemoved(Ticket<FindArticlesCall>, RpcResult<bool>),
    SelectPage(usize),
    Close,
}

#[derive(Debug)]
pub struct FindArticlesViewModel {
    ctx: AppContext,
    screen: Screen<FindArticlesCall>,
    selected_tab: Tab,
    profile: Option<Profile>,
    featured_keys: Vec<ArticleKey>,
    filters: FilterList,
    articles: ArticleList,
}

impl FindArticlesViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            screen: Screen::default(),
            selected_tab: Tab::default(),
            profile: None,
            featured_keys: Vec::new(),
            filters: FilterList::new(),
            articles: ArticleList::new(),
        }
    }

    pub fn with_page_size(ctx: AppContext, page_size: NonZeroUsize) -> Self {
        Self {
            articles: ArticleList::with_page_size(page_size),
            ..Self::new(ctx)
        }
    }

    /// Starts on `tab` instead of the featured listing.
    #[must_use]
    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }

    /// Loads the featured keys, the profile when signed in, and the
    /// selected tab's listing.
    pub fn init(&mut self) -> Task<FindArticlesMessage> {
        let mut tasks = Vec::with_capacity(3);
        if self.ctx.signed_in() {
            let ticket = self.screen.begin(FindArticlesCall::Profile);
            let gateway = self.ctx.gateway.clone();
            tasks.push(Task::perform(
                async move { gateway.get_my_profile().await },
                move |result| FindArticlesMessage::ProfileLoaded(ticket, result),
            ));
        }
        let ticket = self.screen.begin(FindArticlesCall::FeaturedKeys);
        let gateway = self.ctx.gateway.clone();
        tasks.push(Task::perform(
            async move { gateway.get_featured_article_keys().await },
            move |result| FindArticlesMessage::FeaturedKeysLoaded(ticket, result),
        ));
        tasks.push(self.select_tab(self.selected_tab));
        Task::batch(tasks)
    }

    /// Switches tabs and loads the tab's listing.
    ///
    /// Tabs that need a signed-in user open the login prompt first when
    /// nobody is signed in; the listing loads once sign-in completes.
    pub fn select_tab(&mut self, tab: Tab) -> Task<FindArticlesMessage> {
        self.selected_tab = tab;
        if tab.requires_sign_in() && !self.ctx.signed_in() {
            tracing::info!(tab = tab.as_str(), "Sign-in required, showing login prompt");
            let ticket = self.screen.begin(FindArticlesCall::Login);
            let auth = self.ctx.auth.clone();
            return Task::perform(
                async move { auth.show_login_modal().await },
                move |result| FindArticlesMessage::LoginFinished(ticket, tab, result),
            );
        }
        self.load_listing(tab.endpoint())
    }

    /// Reloads the selected tab's listing.
    pub fn query_articles(&mut self) -> Task<FindArticlesMessage> {
        self.select_tab(self.selected_tab)
    }

    /// Queries all articles with the complete filter rows, in row order.
    pub fn query_with_filters(&mut self) -> Task<FindArticlesMessage> {
        let payload = self.filters.build();
        tracing::debug!(filters = %payload, "Querying articles");
        let ticket = self.screen.begin(FindArticlesCall::Articles);
        let gateway = self.ctx.gateway.clone();
        let sent = payload.clone();
        Task::perform(
            async move { gateway.query_articles(&sent).await },
            move |result| FindArticlesMessage::ArticlesLoaded(ticket, Some(payload), result),
        )
    }

    pub fn add_filter(&mut self) -> usize {
        self.filters.add()
    }

    pub fn remove_filter(&mut self, index: usize) {
        self.filters.remove(index);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filters_mut(&mut self) -> &mut FilterList {
        &mut self.filters
    }

    /// Adds or removes the article at `index` from the user's favorites.
    pub fn toggle_favorite(&mut self, index: usize) -> Result<Task<FindArticlesMessage>> {
        let key = self.key_at(index)?;
        let Some(profile) = &self.profile else {
            return Err(CoreError::SignInRequired);
        };
        self.screen
            .ensure_idle(&FindArticlesCall::Membership(MembershipKind::Favorites, key.clone()))?;
        let decision = membership::decide(
            MembershipKind::Favorites,
            &profile.favorite_articles,
            &key,
        );
        Ok(self.membership_call(decision, key))
    }

    /// Adds or removes the article at `index` from the featured set.
    pub fn toggle_featured(&mut self, index: usize) -> Result<Task<FindArticlesMessage>> {
        let key = self.key_at(index)?;
        self.screen
            .ensure_idle(&FindArticlesCall::Membership(MembershipKind::Featured, key.clone()))?;
        let decision = membership::decide(MembershipKind::Featured, &self.featured_keys, &key);
        Ok(self.membership_call(decision, key))
    }

    /// Withdraws the article at `index` from the featured set. The row
    /// leaves the list only while the featured tab is shown.
    pub fn remove_featured(&mut self, index: usize) -> Result<Task<FindArticlesMessage>> {
        let key = self.key_at(index)?;
        let decision = ToggleDecision::new(MembershipKind::Featured, ToggleAction::Remove);
        let slot = FindArticlesCall::Membership(MembershipKind::Featured, key.clone());
        self.screen.ensure_idle(&slot)?;
        let ticket = self.screen.begin(slot);
        Ok(membership_task(
            self.ctx.gateway.clone(),
            decision,
            key,
            move |result| FindArticlesMessage::FeaturedRemoved(ticket, result),
        ))
    }

    pub fn close(&mut self) {
        self.screen.close();
    }

    pub fn selected_tab(&self) -> Tab {
        self.selected_tab
    }

    pub fn articles(&self) -> &ArticleList {
        &self.articles
    }

    pub fn filters(&self) -> &FilterList {
        &self.filters
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn featured_keys(&self) -> &[ArticleKey] {
        &self.featured_keys
    }

    pub fn is_favorite(&self, article: &ArticleSummary) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.is_favorite(article.key()))
    }

    pub fn is_featured(&self, article: &ArticleSummary) -> bool {
        self.featured_keys.contains(article.key())
    }

    /// Whether the signed-in user may curate the featured set.
    pub fn can_curate(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.user_rights.can_curate())
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

    pub fn screen(&self) -> &Screen<FindArticlesCall> {
        &self.screen
    }

    fn load_listing(&mut self, endpoint: Endpoint) -> Task<FindArticlesMessage> {
        tracing::debug!(%endpoint, "Loading listing");
        let ticket = self.screen.begin(FindArticlesCall::Articles);
        let gateway = self.ctx.gateway.clone();
        Task::perform(
            async move { gateway.list_articles(endpoint).await },
            move |result| FindArticlesMessage::ArticlesLoaded(ticket, None, result),
        )
    }

    fn membership_call(
        &mut self,
        decision: ToggleDecision,
        key: ArticleKey,
    ) -> Task<FindArticlesMessage> {
        let ticket = self
            .screen
            .begin(FindArticlesCall::Membership(decision.kind, key.clone()));
        membership_task(self.ctx.gateway.clone(), decision, key, move |result| {
            FindArticlesMessage::MembershipChanged(ticket, decision, result)
        })
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

    fn or_report(&mut self, action: Result<Task<FindArticlesMessage>>) -> Task<FindArticlesMessage> {
        action.unwrap_or_else(|err| {
            self.screen.report(&err);
            Task::none()
        })
    }

    fn on_articles_loaded(
        &mut self,
        ticket: &Ticket<FindArticlesCall>,
        payload: Option<&QueryPayload>,
        result: RpcResult<Vec<ArticleSummary>>,
    ) {
        let settled = match payload {
            Some(payload) => {
                self.screen
                    .settle(ticket, Operation::QueryArticles(payload), &result)
            }
            None => self
                .screen
                .settle_reporting_errors(ticket, Operation::LoadArticles, &result),
        };
        if settled && let Ok(articles) = result {
            tracing::info!(count = articles.len(), tab = self.selected_tab.as_str(), "Articles loaded");
            self.articles.replace(articles);
        }
    }
}

impl ViewModel for FindArticlesViewModel {
    type Message = FindArticlesMessage;

    fn update(&mut self, message: FindArticlesMessage) -> Task<FindArticlesMessage> {
        match message {
            FindArticlesMessage::Init => self.init(),

            FindArticlesMessage::ProfileLoaded(ticket, result) => {
                if self.screen.settle_quietly(&ticket, &result)
                    && let Ok(mut profile) = result
                {
                    profile.favorite_articles = membership::dedup_keys(profile.favorite_articles);
                    self.profile = Some(profile);
                }
                Task::none()
            }

            FindArticlesMessage::FeaturedKeysLoaded(ticket, result) => {
                if self.screen.settle_quietly(&ticket, &result)
                    && let Ok(keys) = result
                {
                    self.featured_keys = membership::dedup_keys(keys);
                }
                Task::none()
            }

            FindArticlesMessage::SelectTab(tab) => self.select_tab(tab),

            FindArticlesMessage::LoginFinished(ticket, tab, result) => {
                if !self.screen.settle_quietly(&ticket, &result) {
                    return Task::none();
                }
                match result {
                    // Sign-in may have been for another tab the user has since left.
                    Ok(()) if tab == self.selected_tab => {
                        let ticket = self.screen.begin(FindArticlesCall::Profile);
                        let gateway = self.ctx.gateway.clone();
                        let profile = Task::perform(
                            async move { gateway.get_my_profile().await },
                            move |result| FindArticlesMessage::ProfileLoaded(ticket, result),
                        );
                        Task::batch([profile, self.load_listing(tab.endpoint())])
                    }
                    Ok(()) => Task::none(),
                    Err(err) => {
                        self.screen.report(&CoreError::Rpc(err));
                        Task::none()
                    }
                }
            }

            FindArticlesMessage::Query => self.query_articles(),

            FindArticlesMessage::QueryWithFilters => self.query_with_filters(),

            FindArticlesMessage::ArticlesLoaded(ticket, payload, result) => {
                self.on_articles_loaded(&ticket, payload.as_ref(), result);
                Task::none()
            }

            FindArticlesMessage::AddFilter => {
                self.add_filter();
                Task::none()
            }

            FindArticlesMessage::RemoveFilter(index) => {
                self.remove_filter(index);
                Task::none()
            }

            FindArticlesMessage::ClearFilters => {
                self.clear_filters();
                Task::none()
            }

            FindArticlesMessage::SetFilterField(index, field) => {
                if let Some(draft) = self.filters.get_mut(index) {
                    draft.field = field;
                }
                Task::none()
            }

            FindArticlesMessage::SetFilterOperator(index, operator) => {
                if let Some(draft) = self.filters.get_mut(index) {
                    draft.operator = operator;
                }
                Task::none()
            }

            FindArticlesMessage::SetFilterValue(index, value) => {
                if let Some(draft) = self.filters.get_mut(index) {
                    draft.value = value;
                }
                Task::none()
            }

            FindArticlesMessage::ToggleFavorite(index) => {
                let action = self.toggle_favorite(index);
                self.or_report(action)
            }

            FindArticlesMessage::ToggleFeatured(index) => {
                let action = self.toggle_featured(index);
                self.or_report(action)
            }

            FindArticlesMessage::RemoveFeatured(index) => {
                let action = self.remove_featured(index);
                self.or_report(action)
            }

            FindArticlesMessage::MembershipChanged(ticket, decision, result) => {
                if !settle_membership(&mut self.screen, &ticket, decision, &result) {
                    return Task::none();
                }
                let FindArticlesCall::Membership(kind, key) = ticket.slot() else {
                    return Task::none();
                };
                match kind {
                    MembershipKind::Favorites => {
                        if let Some(profile) = &mut self.profile {
                            membership::apply(&mut profile.favorite_articles, decision.action, key);
                        }
                    }
                    MembershipKind::Featured => {
                        membership::apply(&mut self.featured_keys, decision.action, key);
                    }
                }
                Task::none()
            }

            FindArticlesMessage::FeaturedRemoved(ticket, result) => {
                let decision = ToggleDecision::new(MembershipKind::Featured, ToggleAction::Remove);
                if settle_membership(&mut self.screen, &ticket, decision, &result)
                    && let FindArticlesCall::Membership(_, key) = ticket.slot()
                {
                    membership::apply(&mut self.featured_keys, ToggleAction::Remove, key);
                    if self.selected_tab == Tab::Featured {
                        self.articles.remove_key(key);
                    }
                }
                Task::none()
            }

            FindArticlesMessage::SelectPage(page) => {
                self.articles.set_page(page);
                Task::none()
            }

            FindArticlesMessage::Close => {
                self.close();
                Task::none()
            }
        }
    }
}
