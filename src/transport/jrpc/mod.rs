use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolCall;
use anyhow::Result;
use quick_cache::sync::Cache;
use serde::de::DeserializeOwned;
use serde_json::Value;

use self::models::*;
use super::models::{JrpcRequest, JrpcResponse, JrpcResponseError, METHOD_NOT_FOUND};
use super::{ChainReader, ChainReaderFactory};
use crate::core::ens::{self, EnsRegistry, EnsResolver};
use crate::external::ProviderConnection;
use crate::models::NetworkInfo;

mod models;

/// [`ChainReader`] which speaks Ethereum JSON-RPC through the wallet provider
pub struct JrpcTransport {
    connection: Arc<dyn ProviderConnection>,
    registry: Address,
    request_id: AtomicU64,
    lookup_cache: Option<Cache<Address, Option<String>>>,
}

impl JrpcTransport {
    pub fn new(connection: Arc<dyn ProviderConnection>) -> Self {
        Self {
            connection,
            registry: ens::ENS_REGISTRY_ADDRESS,
            request_id: AtomicU64::new(1),
            lookup_cache: None,
        }
    }

    pub fn with_registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }

    /// Remembers up to `capacity` reverse lookup results, including misses
    pub fn with_lookup_cache(mut self, capacity: usize) -> Self {
        self.lookup_cache = Some(Cache::new(capacity));
        self
    }

    pub fn reset_cache(&self) {
        if let Some(lookup_cache) = &self.lookup_cache {
            lookup_cache.clear();
        }
    }

    /// Forward resolution of `name` to the address in its `addr` record
    pub async fn resolve_name(&self, name: &str) -> Result<Option<Address>> {
        if !ens::validate_name(name) {
            return Err(JrpcTransportError::InvalidName.into());
        }

        let node = ens::namehash(&ens::normalize_name(name));
        let resolver = match self.get_resolver(node).await? {
            Some(resolver) => resolver,
            None => return Ok(None),
        };

        let address = self.call(&resolver, EnsResolver::addrCall { node }).await?;
        Ok(address.filter(|address| !address.is_zero()))
    }

    async fn lookup_address_uncached(&self, address: &Address) -> Result<Option<String>> {
        let node = ens::namehash(&ens::reverse_address(address));
        let resolver = match self.get_resolver(node).await? {
            Some(resolver) => resolver,
            None => return Ok(None),
        };

        let name = match self.call(&resolver, EnsResolver::nameCall { node }).await? {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(None),
        };

        if !ens::validate_name(&name) {
            log::debug!("Ignoring malformed reverse record {name:?} of {address}");
            return Ok(None);
        }

        // The reverse record is set by the account itself, so it is only
        // trusted when the name resolves back to the same account
        match self.resolve_name(&name).await? {
            Some(resolved) if resolved == *address => Ok(Some(name)),
            _ => {
                log::debug!("Reverse record {name} does not resolve back to {address}");
                Ok(None)
            }
        }
    }

    async fn get_resolver(&self, node: B256) -> Result<Option<Address>> {
        let resolver = self
            .call(&self.registry, EnsRegistry::resolverCall { node })
            .await?;
        Ok(resolver.filter(|resolver| !resolver.is_zero()))
    }

    /// Empty output means there is no contract at `to`
    async fn call<C>(&self, to: &Address, call: C) -> Result<Option<C::Return>>
    where
        C: SolCall,
    {
        let data = call.abi_encode();
        let call = serde_json::to_value(EthCall { to, data: &data })?;
        let params = serde_json::json!([call, "latest"]);
        let HexData(output) = self.request("eth_call", params).await?;

        if output.is_empty() {
            return Ok(None);
        }
        Ok(Some(C::abi_decode_returns(&output)?))
    }

    async fn request<T>(&self, method: &str, params: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = serde_json::to_string(&JrpcRequest::new(id, method, &params))?;

        log::trace!("Sending {method} request #{id}");
        let response = self.connection.post(&request).await?;

        let response = match serde_json::from_str::<JrpcResponse<T>>(&response) {
            Ok(response) => response,
            Err(e) => {
                return Err(JrpcTransportError::InvalidResponse(format!(
                    "Failed parsing {method} response: {e}. Response data: {response}"
                ))
                .into())
            }
        };

        match response.id {
            Some(response_id) if response_id != id => {
                Err(JrpcTransportError::InvalidResponse(format!(
                    "{method} response #{response_id} does not match request #{id}"
                ))
                .into())
            }
            _ => Ok(response.into_result()?),
        }
    }
}

#[cfg_attr(not(feature = "non_threadsafe"), async_trait::async_trait)]
#[cfg_attr(feature = "non_threadsafe", async_trait::async_trait(?Send))]
impl ChainReader for JrpcTransport {
    async fn get_network(&self) -> Result<NetworkInfo> {
        let Quantity(chain_id) = self.request("eth_chainId", serde_json::json!([])).await?;
        Ok(NetworkInfo::new(chain_id))
    }

    async fn get_signer_address(&self) -> Result<Address> {
        let accounts: Vec<Address> = match self
            .request("eth_requestAccounts", serde_json::json!([]))
            .await
        {
            Ok(accounts) => accounts,
            Err(e) if is_method_not_found(&e) => {
                self.request("eth_accounts", serde_json::json!([])).await?
            }
            Err(e) => return Err(e),
        };

        accounts
            .into_iter()
            .next()
            .ok_or_else(|| JrpcTransportError::NoAccounts.into())
    }

    async fn lookup_address(&self, address: &Address) -> Result<Option<String>> {
        if let Some(lookup_cache) = &self.lookup_cache {
            if let Some(name) = lookup_cache.get(address) {
                return Ok(name);
            }
        }

        let name = self.lookup_address_uncached(address).await?;

        if let Some(lookup_cache) = &self.lookup_cache {
            lookup_cache.insert(*address, name.clone());
        }

        Ok(name)
    }
}

/// Creates a [`JrpcTransport`] for each provider handle
#[derive(Debug, Clone, Copy)]
pub struct JrpcTransportFactory {
    pub registry: Address,
    pub lookup_cache_capacity: Option<usize>,
}

impl Default for JrpcTransportFactory {
    fn default() -> Self {
        Self {
            registry: ens::ENS_REGISTRY_ADDRESS,
            lookup_cache_capacity: None,
        }
    }
}

impl ChainReaderFactory for JrpcTransportFactory {
    fn wrap(&self, connection: Arc<dyn ProviderConnection>) -> Arc<dyn ChainReader> {
        let mut transport = JrpcTransport::new(connection).with_registry(self.registry);
        if let Some(capacity) = self.lookup_cache_capacity {
            transport = transport.with_lookup_cache(capacity);
        }
        Arc::new(transport)
    }
}

fn is_method_not_found(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<JrpcResponseError>(),
        Some(e) if e.code() == Some(METHOD_NOT_FOUND)
    )
}

#[derive(thiserror::Error, Debug)]
pub enum JrpcTransportError {
    #[error("Provider returned no accounts")]
    NoAccounts,
    #[error("Invalid name")]
    InvalidName,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
