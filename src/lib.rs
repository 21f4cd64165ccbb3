//! Wallet connection and ENS identity resolution for a single-page dapp.
//!
//! The host provides a [`external::WalletConnector`] (the wallet chooser) and
//! renders [`core::page::PageView`]; everything in between lives here.

pub mod core;
pub mod external;
pub mod models;
pub mod transport;
