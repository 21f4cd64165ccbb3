use serde::{Deserialize, Serialize};

crate::define_string_enum!(
    /// Networks the wallet chooser knows by name
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum NetworkName {
        Mainnet => "mainnet",
        Goerli => "goerli",
        Sepolia => "sepolia",
    }
);

impl NetworkName {
    pub const fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Goerli => 5,
            Self::Sepolia => 11155111,
        }
    }

    /// Capitalized name for user-facing messages
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Goerli => "Goerli",
            Self::Sepolia => "Sepolia",
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        [Self::Mainnet, Self::Goerli, Self::Sepolia]
            .into_iter()
            .find(|network| network.chain_id() == chain_id)
    }
}

impl Default for NetworkName {
    fn default() -> Self {
        Self::Goerli
    }
}
