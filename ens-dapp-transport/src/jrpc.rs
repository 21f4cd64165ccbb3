use std::sync::Arc;

use anyhow::{Context, Result};
use ens_dapp::external::{ProviderConnection, WalletConnector};
use ens_dapp::models::NetworkName;
use reqwest::{IntoUrl, Url};

/// JSON-RPC over HTTP, e.g. to a node with unlocked accounts
pub struct JrpcClient {
    client: reqwest::Client,
    url: Url,
}

impl JrpcClient {
    pub fn new<U: IntoUrl>(endpoint: U) -> Result<Arc<Self>> {
        let url = endpoint.into_url()?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Arc::new(Self { client, url }))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[cfg_attr(not(feature = "non_threadsafe"), async_trait::async_trait)]
#[cfg_attr(feature = "non_threadsafe", async_trait::async_trait(?Send))]
impl ProviderConnection for JrpcClient {
    async fn post(&self, data: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url.clone())
            .body(data.to_owned())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Wallet connector without a chooser: always yields the same endpoint
pub struct JrpcConnector {
    client: Arc<JrpcClient>,
}

impl JrpcConnector {
    pub fn new(client: Arc<JrpcClient>) -> Self {
        Self { client }
    }
}

#[cfg_attr(not(feature = "non_threadsafe"), async_trait::async_trait)]
#[cfg_attr(feature = "non_threadsafe", async_trait::async_trait(?Send))]
impl WalletConnector for JrpcConnector {
    async fn connect(&self, network: NetworkName) -> Result<Arc<dyn ProviderConnection>> {
        log::debug!("Connecting to {} for {network}", self.client.url());
        Ok(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(JrpcClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn connector_yields_configured_client() {
        let client = JrpcClient::new("http://127.0.0.1:8545").unwrap();
        let connector = JrpcConnector::new(client.clone());

        let connection = connector.connect(NetworkName::Goerli).await.unwrap();
        let expected: Arc<dyn ProviderConnection> = client;
        assert!(Arc::ptr_eq(&connection, &expected));
    }

    #[cfg(feature = "integration_test")]
    #[tokio::test]
    async fn jrpc_client_works() {
        use ens_dapp::transport::jrpc::JrpcTransport;
        use ens_dapp::transport::ChainReader;

        let client = JrpcClient::new("https://ethereum-sepolia-rpc.publicnode.com").unwrap();
        let transport = JrpcTransport::new(client);

        let network = transport.get_network().await.unwrap();
        assert_eq!(network.name, Some(NetworkName::Sepolia));
    }
}
