//! HTTP transport for the archive's REST surface.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{ApiDescriptor, ClientSettings};
use crate::endpoint::Endpoint;
use crate::error::{Result, RpcError};
use crate::transport::RpcTransport;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("aca-client/", env!("CARGO_PKG_VERSION"));

/// Transport speaking JSON over HTTP to the archive API.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
    api_root: OnceLock<Url>,
}

impl HttpTransport {
    /// Creates a transport for the host in `settings`. No request is sent until
    /// [`RpcTransport::initialize`].
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| RpcError::Request(format!("invalid base URL {}: {e}", settings.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| RpcError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            access_token: settings.access_token.clone(),
            api_root: OnceLock::new(),
        })
    }

    /// Service root resolved during initialization.
    pub fn api_root(&self) -> Option<&Url> {
        self.api_root.get()
    }

    /// Builds the request URL, consuming path parameters from `args`.
    ///
    /// For body-less methods the remaining fields become query parameters.
    fn request_url(
        root: &Url,
        endpoint: Endpoint,
        args: &mut Map<String, Value>,
    ) -> Result<Url> {
        let mut url = root.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| RpcError::Request(format!("service root cannot hold a path: {root}")))?;
            segments.pop_if_empty();
            for segment in endpoint.path_template().split('/') {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        let value = args.remove(name).ok_or_else(|| {
                            RpcError::Request(format!("{endpoint} requires `{name}`"))
                        })?;
                        segments.push(&scalar_to_string(&value));
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        if !has_body(&endpoint.http_method()) && !args.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in args.iter() {
                pairs.append_pair(name, &scalar_to_string(value));
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn initialize(&self, api: &ApiDescriptor) -> Result<()> {
        if self.api_root.get().is_some() {
            return Ok(());
        }

        let discovery_url = join(&self.base_url, &api.discovery_path())?;
        let fallback = join(&self.base_url, &api.service_path())?;

        tracing::debug!("Loading API discovery document from {}", discovery_url);

        let response = self.client.get(discovery_url).send().await?;
        let status = response.status();
        let root = if status.is_success() {
            let document: DiscoveryDocument = response.json().await?;
            document.api_root().unwrap_or(fallback)
        } else if status == StatusCode::NOT_FOUND {
            tracing::warn!(
                "No discovery document for {} {}, using {}",
                api.service,
                api.version,
                fallback
            );
            fallback
        } else {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::from_response(status.as_u16(), &body));
        };

        tracing::info!("API {} {} ready at {}", api.service, api.version, root);
        // A concurrent initializer may have won; both resolved the same root.
        let _ = self.api_root.set(root);
        Ok(())
    }

    async fn invoke(&self, endpoint: Endpoint, args: Option<Value>) -> Result<Value> {
        let root = self
            .api_root
            .get()
            .ok_or_else(|| RpcError::NotInitialized(format!("{endpoint} called before initialize")))?;

        let mut fields = match args {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(RpcError::Request(format!(
                    "{endpoint} arguments must be an object, got {other}"
                )));
            }
        };

        let method = endpoint.http_method();
        let url = Self::request_url(root, endpoint, &mut fields)?;
        tracing::debug!("{} {} ({})", method, url, endpoint);

        let mut request = self.client.request(method.clone(), url);
        if has_body(&method) {
            request = request.json(&Value::Object(fields));
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RpcError::from_response(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// The part of the discovery document that locates the service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveryDocument {
    root_url: Option<String>,
    service_path: Option<String>,
}

impl DiscoveryDocument {
    fn api_root(&self) -> Option<Url> {
        let root = self.root_url.as_deref()?;
        let service = self.service_path.as_deref()?;
        let separator = if root.ends_with('/') { "" } else { "/" };
        Url::parse(&format!("{root}{separator}{service}")).ok()
    }
}

fn has_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| RpcError::Request(format!("invalid API path {path}: {e}")))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> Url {
        Url::parse("http://localhost:8080/_ah/api/aca/v1/").unwrap()
    }

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn transport_creation() {
        let transport = HttpTransport::new(&ClientSettings::default());
        assert!(transport.is_ok());
        assert!(transport.unwrap().api_root().is_none());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let settings = ClientSettings::default().with_base_url("not a url");
        assert!(matches!(
            HttpTransport::new(&settings),
            Err(RpcError::Request(_))
        ));
    }

    #[test]
    fn path_parameters_are_consumed() {
        let mut args = fields(json!({"websafeArticleKey": "ag1abc"}));
        let url =
            HttpTransport::request_url(&root(), Endpoint::AddArticleToFavorites, &mut args).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/_ah/api/aca/v1/articles/favorites/ag1abc"
        );
        assert!(args.is_empty());
    }

    #[test]
    fn get_article_fills_both_ids() {
        let mut args = fields(json!({"authorID": "42", "articleID": "a b"}));
        let url = HttpTransport::request_url(&root(), Endpoint::GetArticle, &mut args).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/_ah/api/aca/v1/article/42/a%20b"
        );
    }

    #[test]
    fn missing_path_parameter_is_a_request_error() {
        let mut args = Map::new();
        let err =
            HttpTransport::request_url(&root(), Endpoint::RemoveFeaturedArticle, &mut args)
                .unwrap_err();
        assert!(matches!(err, RpcError::Request(message) if message.contains("websafeArticleKey")));
    }

    #[test]
    fn leftover_fields_become_query_for_get() {
        let mut args = fields(json!({"limit": 5}));
        let url = HttpTransport::request_url(&root(), Endpoint::GetAllArticles, &mut args).unwrap();
        assert_eq!(url.query(), Some("limit=5"));
    }

    #[test]
    fn discovery_root_concatenation() {
        let document = DiscoveryDocument {
            root_url: Some("https://example.org/_ah/api/".to_string()),
            service_path: Some("aca/v1/".to_string()),
        };
        assert_eq!(
            document.api_root().unwrap().as_str(),
            "https://example.org/_ah/api/aca/v1/"
        );

        let partial = DiscoveryDocument {
            root_url: None,
            service_path: Some("aca/v1/".to_string()),
        };
        assert!(partial.api_root().is_none());
    }

    #[tokio::test]
    async fn invoke_before_initialize_fails() {
        let transport = HttpTransport::new(&ClientSettings::default()).unwrap();
        let err = transport
            .invoke(Endpoint::GetAllArticles, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::NotInitialized(_)));
    }
}
