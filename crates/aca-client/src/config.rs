//! Configuration types for the API client.

use serde::{Deserialize, Serialize};

/// Identity of the remote API, used once to initialize the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDescriptor {
    /// Service name in the discovery directory.
    pub service: String,
    /// API version.
    pub version: String,
    /// Path under the host where the API and its discovery document live.
    pub discovery_base_path: String,
}

impl Default for ApiDescriptor {
    fn default() -> Self {
        Self {
            service: "aca".to_string(),
            version: "v1".to_string(),
            discovery_base_path: "/_ah/api".to_string(),
        }
    }
}

impl ApiDescriptor {
    /// Discovery document URL relative to the host.
    #[must_use]
    pub fn discovery_path(&self) -> String {
        format!(
            "{}/discovery/v1/apis/{}/{}/rest",
            self.discovery_base_path.trim_end_matches('/'),
            self.service,
            self.version
        )
    }

    /// Service root relative to the host, used when discovery does not say otherwise.
    #[must_use]
    pub fn service_path(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.discovery_base_path.trim_end_matches('/'),
            self.service,
            self.version
        )
    }
}

/// Connection settings for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Scheme and host of the archive, e.g. `https://artcrimearchive.appspot.com`.
    pub base_url: String,

    /// OAuth2 access token sent as a bearer credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Email of the account the token belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Transport-level request timeout. Unset means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    pub api: ApiDescriptor,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            access_token: None,
            email: None,
            timeout_secs: None,
            api: ApiDescriptor::default(),
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|token| !token.trim().is_empty());
        self
    }
}
