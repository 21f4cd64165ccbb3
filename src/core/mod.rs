pub use self::wallet_session::{
    resolve_identity, ConnectionError, WalletSession, WalletSessionBuilder, WalletSessionConfig,
    WalletSessionHandler,
};

pub mod ens;
pub mod page;
pub mod wallet_session;
