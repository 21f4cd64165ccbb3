use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

pub use ens_dapp_utils::NetworkName;

/// Chain identifier as reported by `eth_chainId`
pub type NetworkId = u64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// What the page shows for the connected account
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "data")]
pub enum Identity {
    /// Name found by the reverse lookup
    Name(String),
    /// Raw account address, used when the account has no primary name
    Address(Address),
}

impl Identity {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Address(_) => None,
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            // Checksummed form
            Self::Address(address) => std::fmt::Display::fmt(address, f),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub chain_id: NetworkId,
    /// Filled for the networks known by name
    pub name: Option<NetworkName>,
}

impl NetworkInfo {
    pub fn new(chain_id: NetworkId) -> Self {
        Self {
            chain_id,
            name: NetworkName::from_chain_id(chain_id),
        }
    }
}
