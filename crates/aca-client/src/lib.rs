//! Remote procedure gateway for the Art Crime Archive API.
//!
//! This crate wraps the archive's named remote methods behind one contract:
//! call an [`Endpoint`] with an optional argument record and receive either
//! the server's result payload or a classified [`RpcError`].
//!
//! # Overview
//!
//! - [`Gateway`] initializes its transport lazily, exactly once, then forwards calls
//! - [`HttpTransport`] speaks JSON over HTTP and resolves the service root
//!   from the API discovery document
//! - [`Authenticator`] exposes sign-in state and the login prompt used to
//!   recover from unauthorized responses
//!
//! Nothing in this crate retries or times out on its own; timeouts belong to
//! the transport configuration.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aca_client::{ClientSettings, Gateway, HttpTransport};
//!
//! async fn featured() -> aca_client::Result<()> {
//!     let settings = ClientSettings::default();
//!     let transport = Arc::new(HttpTransport::new(&settings)?);
//!     let gateway = Gateway::new(transport, settings.api.clone());
//!
//!     for article in gateway.get_featured_articles().await? {
//!         println!("{}", article.title_or_default());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fake;
pub mod gateway;
pub mod http;
pub mod transport;

pub use auth::{Authenticator, StaticAuthenticator};
pub use config::{ApiDescriptor, ClientSettings};
pub use endpoint::Endpoint;
pub use error::{Result, RpcError};
pub use fake::{RecordedCall, ScriptedTransport};
pub use gateway::Gateway;
pub use http::HttpTransport;
pub use transport::RpcTransport;
