//! The fixed set of remote methods the client may call.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

/// A named remote method exposed by the archive API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetMyProfile,
    UpdateMyProfile,
    GetFeaturedArticles,
    GetAllArticles,
    GetMyArticles,
    GetMyFavoriteArticles,
    GetFeaturedArticleKeys,
    GetArticle,
    CreateArticle,
    AddArticleToFavorites,
    RemoveArticleFromFavorites,
    AddFeaturedArticle,
    RemoveFeaturedArticle,
    QueryArticles,
}

impl Endpoint {
    pub const ALL: [Endpoint; 14] = [
        Endpoint::GetMyProfile,
        Endpoint::UpdateMyProfile,
        Endpoint::GetFeaturedArticles,
        Endpoint::GetAllArticles,
        Endpoint::GetMyArticles,
        Endpoint::GetMyFavoriteArticles,
        Endpoint::GetFeaturedArticleKeys,
        Endpoint::GetArticle,
        Endpoint::CreateArticle,
        Endpoint::AddArticleToFavorites,
        Endpoint::RemoveArticleFromFavorites,
        Endpoint::AddFeaturedArticle,
        Endpoint::RemoveFeaturedArticle,
        Endpoint::QueryArticles,
    ];

    /// Method name as published in the API discovery document.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GetMyProfile => "getMyProfile",
            Endpoint::UpdateMyProfile => "updateMyProfile",
            Endpoint::GetFeaturedArticles => "getFeaturedArticles",
            Endpoint::GetAllArticles => "getAllArticles",
            Endpoint::GetMyArticles => "getMyArticles",
            Endpoint::GetMyFavoriteArticles => "getMyFavoriteArticles",
            Endpoint::GetFeaturedArticleKeys => "getFeaturedArticleKeys",
            Endpoint::GetArticle => "getArticle",
            Endpoint::CreateArticle => "createArticle",
            Endpoint::AddArticleToFavorites => "addArticleToFavorites",
            Endpoint::RemoveArticleFromFavorites => "removeArticleFromFavorites",
            Endpoint::AddFeaturedArticle => "addFeaturedArticle",
            Endpoint::RemoveFeaturedArticle => "removeFeaturedArticle",
            Endpoint::QueryArticles => "queryArticles",
        }
    }

    pub fn http_method(&self) -> Method {
        match self {
            Endpoint::UpdateMyProfile
            | Endpoint::CreateArticle
            | Endpoint::AddArticleToFavorites
            | Endpoint::AddFeaturedArticle
            | Endpoint::QueryArticles => Method::POST,
            Endpoint::RemoveArticleFromFavorites | Endpoint::RemoveFeaturedArticle => {
                Method::DELETE
            }
            _ => Method::GET,
        }
    }

    /// REST path relative to the service root. `{name}` segments are filled
    /// from the argument record of the call.
    pub fn path_template(&self) -> &'static str {
        match self {
            Endpoint::GetMyProfile | Endpoint::UpdateMyProfile => "myProfile",
            Endpoint::GetFeaturedArticles => "featuredArticles",
            Endpoint::GetAllArticles => "articles",
            Endpoint::GetMyArticles => "myArticles",
            Endpoint::GetMyFavoriteArticles => "articles/favorites",
            Endpoint::GetFeaturedArticleKeys => "featuredArticleKeys",
            Endpoint::GetArticle => "article/{authorID}/{articleID}",
            Endpoint::CreateArticle => "article",
            Endpoint::AddArticleToFavorites | Endpoint::RemoveArticleFromFavorites => {
                "articles/favorites/{websafeArticleKey}"
            }
            Endpoint::AddFeaturedArticle | Endpoint::RemoveFeaturedArticle => {
                "featuredArticles/{websafeArticleKey}"
            }
            Endpoint::QueryArticles => "queryArticles",
        }
    }

    /// Returns true for methods that change server state.
    pub fn is_mutation(&self) -> bool {
        self.http_method() != Method::GET && *self != Endpoint::QueryArticles
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == s)
            .ok_or_else(|| format!("unknown endpoint: {s}"))
    }
}
