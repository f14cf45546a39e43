//! Transport seam between the gateway and the wire.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiDescriptor;
use crate::endpoint::Endpoint;
use crate::error::Result;

/// Carries calls to the remote API.
///
/// Implementations own transport and authentication. The gateway guarantees
/// `initialize` has succeeded before the first `invoke`.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Loads the API description. Called once per gateway lifetime unless it fails.
    async fn initialize(&self, api: &ApiDescriptor) -> Result<()>;

    /// Issues one call and returns the server's result payload.
    async fn invoke(&self, endpoint: Endpoint, args: Option<Value>) -> Result<Value>;
}
