use std::sync::Arc;

use alloy_primitives::Address;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::external::WalletConnector;
use crate::models::{ConnectionState, Identity, NetworkId, NetworkName};
use crate::transport::jrpc::JrpcTransportFactory;
use crate::transport::{ChainReader, ChainReaderFactory};

/// Connection to the user's wallet and the identity of the connected account.
///
/// The session starts disconnected and becomes connected after the first
/// successful [`WalletSession::connect`]. There is no way back: a new
/// session must be created (e.g. on page reload).
pub struct WalletSession {
    config: WalletSessionConfig,
    connector: Arc<dyn WalletConnector>,
    reader_factory: Arc<dyn ChainReaderFactory>,
    handler: Arc<dyn WalletSessionHandler>,
    state: RwLock<SessionState>,
    connect_guard: tokio::sync::Mutex<()>,
}

impl WalletSession {
    pub fn builder(
        connector: Arc<dyn WalletConnector>,
        handler: Arc<dyn WalletSessionHandler>,
    ) -> WalletSessionBuilder {
        WalletSessionBuilder::new(connector, handler)
    }

    pub fn config(&self) -> &WalletSessionConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state.read().connection_state
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.read().identity.clone()
    }

    pub fn address(&self) -> Option<Address> {
        self.state.read().address
    }

    /// Reader bound to the connected wallet, for further chain queries
    pub fn chain_reader(&self) -> Option<Arc<dyn ChainReader>> {
        self.state.read().chain_reader.clone()
    }

    /// Connects the wallet, validates its network and resolves the account identity.
    ///
    /// Does nothing if the session is already connected. Concurrent calls are
    /// serialized, so the wallet chooser is never shown twice at once.
    pub async fn connect(&self) -> Result<(), ConnectionError> {
        let _guard = self.connect_guard.lock().await;

        if self.state().is_connected() {
            log::debug!("Wallet is already connected");
            return Ok(());
        }

        let connected = match self.try_connect().await {
            Ok(connected) => connected,
            Err(e) => {
                log::warn!("Failed to connect wallet: {e}");
                self.handler.on_connection_failed(&e);
                return Err(e);
            }
        };

        log::info!("Wallet connected as {}", connected.identity);

        let identity = connected.identity.clone();
        *self.state.write() = SessionState {
            connection_state: ConnectionState::Connected,
            address: Some(connected.address),
            identity: Some(connected.identity),
            chain_reader: Some(connected.chain_reader),
        };

        self.handler.on_identity_resolved(&identity);
        self.handler.on_state_changed(ConnectionState::Connected);

        Ok(())
    }

    async fn try_connect(&self) -> Result<Connected, ConnectionError> {
        let connection = self
            .connector
            .connect(self.config.network)
            .await
            .map_err(ConnectionError::ConnectionFailure)?;
        let chain_reader = self.reader_factory.wrap(connection);

        let network = chain_reader
            .get_network()
            .await
            .map_err(ConnectionError::ConnectionFailure)?;

        let expected = self.config.allowed_chain_id();
        if network.chain_id != expected {
            return Err(ConnectionError::WrongNetwork {
                expected,
                actual: network.chain_id,
            });
        }

        let address = chain_reader
            .get_signer_address()
            .await
            .map_err(ConnectionError::ConnectionFailure)?;
        let identity = resolve_identity(chain_reader.as_ref(), &address).await;

        Ok(Connected {
            chain_reader,
            address,
            identity,
        })
    }
}

/// Picks what to show for `address`: its primary name if it has one, the address otherwise.
///
/// Lookup failures fall back to the address.
pub async fn resolve_identity(chain_reader: &dyn ChainReader, address: &Address) -> Identity {
    match chain_reader.lookup_address(address).await {
        Ok(Some(name)) if !name.is_empty() => Identity::Name(name),
        Ok(_) => Identity::Address(*address),
        Err(e) => {
            log::warn!("Reverse lookup of {address} failed: {e:?}");
            Identity::Address(*address)
        }
    }
}

pub struct WalletSessionBuilder {
    config: WalletSessionConfig,
    connector: Arc<dyn WalletConnector>,
    reader_factory: Arc<dyn ChainReaderFactory>,
    handler: Arc<dyn WalletSessionHandler>,
}

impl WalletSessionBuilder {
    pub fn new(
        connector: Arc<dyn WalletConnector>,
        handler: Arc<dyn WalletSessionHandler>,
    ) -> Self {
        Self {
            config: Default::default(),
            connector,
            reader_factory: Arc::new(JrpcTransportFactory::default()),
            handler,
        }
    }

    pub fn with_config(mut self, config: WalletSessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reader_factory(mut self, reader_factory: Arc<dyn ChainReaderFactory>) -> Self {
        self.reader_factory = reader_factory;
        self
    }

    pub fn build(self) -> WalletSession {
        WalletSession {
            config: self.config,
            connector: self.connector,
            reader_factory: self.reader_factory,
            handler: self.handler,
            state: Default::default(),
            connect_guard: Default::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletSessionConfig {
    /// Network the wallet chooser is configured for
    pub network: NetworkName,
    /// The only accepted chain id. Defaults to the id of `network`
    pub allowed_chain_id: Option<NetworkId>,
}

impl WalletSessionConfig {
    pub fn allowed_chain_id(&self) -> NetworkId {
        self.allowed_chain_id
            .unwrap_or_else(|| self.network.chain_id())
    }
}

impl Default for WalletSessionConfig {
    fn default() -> Self {
        Self {
            network: NetworkName::Goerli,
            allowed_chain_id: None,
        }
    }
}

pub trait WalletSessionHandler: Send + Sync {
    /// Called when the session switches to a new connection state
    fn on_state_changed(&self, state: ConnectionState);

    /// Called when the identity of the connected account is known,
    /// right before the session becomes connected
    fn on_identity_resolved(&self, identity: &Identity);

    /// Called when a connection attempt fails. The session stays disconnected
    fn on_connection_failed(&self, error: &ConnectionError);
}

#[derive(thiserror::Error, Debug)]
pub enum ConnectionError {
    #[error("Change the network to {}", network_label(.expected))]
    WrongNetwork {
        expected: NetworkId,
        actual: NetworkId,
    },
    #[error("Failed to connect wallet: {0:#}")]
    ConnectionFailure(anyhow::Error),
}

fn network_label(chain_id: &NetworkId) -> String {
    match NetworkName::from_chain_id(*chain_id) {
        Some(network) => network.display_name().to_owned(),
        None => format!("chain {chain_id}"),
    }
}

#[derive(Default)]
struct SessionState {
    connection_state: ConnectionState,
    address: Option<Address>,
    identity: Option<Identity>,
    chain_reader: Option<Arc<dyn ChainReader>>,
}

struct Connected {
    chain_reader: Arc<dyn ChainReader>,
    address: Address,
    identity: Identity,
}
