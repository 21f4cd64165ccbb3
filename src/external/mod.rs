use std::sync::Arc;

use anyhow::Result;

use crate::models::NetworkName;

/// Raw provider handle yielded by the wallet (EIP-1193 style).
///
/// Carries exactly one JSON-RPC request per call and returns the raw response.
#[cfg_attr(not(feature = "non_threadsafe"), async_trait::async_trait)]
#[cfg_attr(feature = "non_threadsafe", async_trait::async_trait(?Send))]
pub trait ProviderConnection: Send + Sync {
    async fn post(&self, data: &str) -> Result<String>;
}

/// Wallet chooser which lets the user pick and authorize a wallet
#[cfg_attr(not(feature = "non_threadsafe"), async_trait::async_trait)]
#[cfg_attr(feature = "non_threadsafe", async_trait::async_trait(?Send))]
pub trait WalletConnector: Send + Sync {
    /// Suspends until the user approves or rejects the connection.
    ///
    /// `network` is the network the chooser is configured for.
    async fn connect(&self, network: NetworkName) -> Result<Arc<dyn ProviderConnection>>;
}
