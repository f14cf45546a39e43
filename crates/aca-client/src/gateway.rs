//! Uniform request/response contract over the remote API.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;

use aca_model::{
    ArticleCollection, ArticleDraft, ArticleKey, ArticleKeyRequest, ArticleRef, ArticleSummary,
    FeaturedKeyCollection, Profile, ProfileUpdate, QueryPayload,
};

use crate::config::ApiDescriptor;
use crate::endpoint::Endpoint;
use crate::error::{Result, RpcError};
use crate::transport::RpcTransport;

/// Gateway to the remote API.
///
/// The underlying transport is initialized lazily, exactly once, on the first
/// call. Concurrent first callers wait on the same initialization; a failed
/// initialization is attempted again by the next call.
pub struct Gateway {
    transport: Arc<dyn RpcTransport>,
    api: ApiDescriptor,
    ready: OnceCell<()>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("api", &self.api)
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(transport: Arc<dyn RpcTransport>, api: ApiDescriptor) -> Self {
        Self {
            transport,
            api,
            ready: OnceCell::new(),
        }
    }

    pub fn api(&self) -> &ApiDescriptor {
        &self.api
    }

    /// Returns true once the transport has been initialized.
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Initializes the transport if no earlier call has done so.
    pub async fn ensure_ready(&self) -> Result<()> {
        self.ready
            .get_or_try_init(|| async {
                tracing::debug!(
                    "Initializing API client for {} {}",
                    self.api.service,
                    self.api.version
                );
                self.transport.initialize(&self.api).await
            })
            .await?;
        Ok(())
    }

    /// Issues a call and returns the raw result payload.
    ///
    /// Errors are returned as the transport classified them; nothing is retried.
    pub async fn call(&self, endpoint: Endpoint, args: Option<Value>) -> Result<Value> {
        self.ensure_ready().await?;
        tracing::debug!("Calling {}", endpoint);
        let result = self.transport.invoke(endpoint, args).await;
        if let Err(err) = &result {
            tracing::debug!("{} failed: {}", endpoint, err);
        }
        result
    }

    /// Issues a call with a typed argument record and decodes the result.
    pub async fn call_typed<A, R>(&self, endpoint: Endpoint, args: Option<&A>) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let args = args.map(serde_json::to_value).transpose()?;
        let value = self.call(endpoint, args).await?;
        serde_json::from_value(value)
            .map_err(|e| RpcError::Decode(format!("{endpoint} returned an unexpected shape: {e}")))
    }

    pub async fn get_my_profile(&self) -> Result<Profile> {
        self.call_typed::<Value, _>(Endpoint::GetMyProfile, None).await
    }

    pub async fn update_my_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        self.call_typed(Endpoint::UpdateMyProfile, Some(update)).await
    }

    /// Fetches one of the argument-less article listings.
    pub async fn list_articles(&self, endpoint: Endpoint) -> Result<Vec<ArticleSummary>> {
        let collection: ArticleCollection = self.call_typed::<Value, _>(endpoint, None).await?;
        Ok(collection.items)
    }

    pub async fn get_featured_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.list_articles(Endpoint::GetFeaturedArticles).await
    }

    pub async fn get_all_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.list_articles(Endpoint::GetAllArticles).await
    }

    pub async fn get_my_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.list_articles(Endpoint::GetMyArticles).await
    }

    pub async fn get_my_favorite_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.list_articles(Endpoint::GetMyFavoriteArticles).await
    }

    pub async fn get_featured_article_keys(&self) -> Result<Vec<ArticleKey>> {
        let keys: FeaturedKeyCollection = self
            .call_typed::<Value, _>(Endpoint::GetFeaturedArticleKeys, None)
            .await?;
        Ok(keys.into_keys())
    }

    pub async fn get_article(&self, article: &ArticleRef) -> Result<ArticleSummary> {
        self.call_typed(Endpoint::GetArticle, Some(article)).await
    }

    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleSummary> {
        self.call_typed(Endpoint::CreateArticle, Some(draft)).await
    }

    pub async fn query_articles(&self, payload: &QueryPayload) -> Result<Vec<ArticleSummary>> {
        let collection: ArticleCollection =
            self.call_typed(Endpoint::QueryArticles, Some(payload)).await?;
        Ok(collection.items)
    }

    /// Calls one of the key-addressed membership endpoints.
    ///
    /// Returns the server's boolean verdict; a payload without one counts as success.
    pub async fn set_membership(&self, endpoint: Endpoint, key: &ArticleKey) -> Result<bool> {
        let request = ArticleKeyRequest::new(key.clone());
        let value = self
            .call(endpoint, Some(serde_json::to_value(&request)?))
            .await?;
        let verdict = match &value {
            Value::Bool(data) => *data,
            Value::Object(map) => map.get("data").and_then(Value::as_bool).unwrap_or(true),
            _ => true,
        };
        Ok(verdict)
    }

    pub async fn add_article_to_favorites(&self, key: &ArticleKey) -> Result<bool> {
        self.set_membership(Endpoint::AddArticleToFavorites, key)
            .await
    }

    pub async fn remove_article_from_favorites(&self, key: &ArticleKey) -> Result<bool> {
        self.set_membership(Endpoint::RemoveArticleFromFavorites, key)
            .await
    }

    pub async fn add_featured_article(&self, key: &ArticleKey) -> Result<bool> {
        self.set_membership(Endpoint::AddFeaturedArticle, key).await
    }

    pub async fn remove_featured_article(&self, key: &ArticleKey) -> Result<bool> {
        self.set_membership(Endpoint::RemoveFeaturedArticle, key)
            .await
    }
}
