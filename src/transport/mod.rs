use std::sync::Arc;

use alloy_primitives::Address;
use anyhow::Result;

use crate::external::ProviderConnection;
use crate::models::NetworkInfo;

pub mod jrpc;
pub mod models;

/// Typed chain queries on top of a raw provider handle
#[cfg_attr(not(feature = "non_threadsafe"), async_trait::async_trait)]
#[cfg_attr(feature = "non_threadsafe", async_trait::async_trait(?Send))]
pub trait ChainReader: Send + Sync {
    async fn get_network(&self) -> Result<NetworkInfo>;

    /// Address of the account which signs on behalf of the user
    async fn get_signer_address(&self) -> Result<Address>;

    /// Reverse name lookup. Returns `None` if the address has no primary name
    async fn lookup_address(&self, address: &Address) -> Result<Option<String>>;
}

/// Wraps a raw provider handle into a [`ChainReader`]
pub trait ChainReaderFactory: Send + Sync {
    fn wrap(&self, connection: Arc<dyn ProviderConnection>) -> Arc<dyn ChainReader>;
}

impl<F> ChainReaderFactory for F
where
    F: Fn(Arc<dyn ProviderConnection>) -> Arc<dyn ChainReader> + Send + Sync,
{
    fn wrap(&self, connection: Arc<dyn ProviderConnection>) -> Arc<dyn ChainReader> {
        self(connection)
    }
}
