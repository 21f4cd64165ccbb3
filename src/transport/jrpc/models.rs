use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use ens_dapp_utils::*;

#[derive(Serialize)]
pub struct EthCall<'a> {
    pub to: &'a Address,
    #[serde(with = "serde_hex_data")]
    pub data: &'a [u8],
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(with = "serde_quantity")] pub u64);

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct HexData(#[serde(with = "serde_hex_data")] pub Vec<u8>);

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_serialize_eth_call() {
        let to = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");
        let call = EthCall {
            to: &to,
            data: &[0x01, 0x78, 0xb8, 0xbf],
        };
        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(
            value["to"].as_str().unwrap().to_lowercase(),
            "0x00000000000c2e074ec69a0dfb2997ba6c7d2e1e"
        );
        assert_eq!(value["data"], "0x0178b8bf");
    }

    #[test]
    fn test_deserialize_results() {
        let Quantity(chain_id) = serde_json::from_str(r#""0x5""#).unwrap();
        assert_eq!(chain_id, 5);

        let HexData(data) = serde_json::from_str(r#""0x""#).unwrap();
        assert!(data.is_empty());
    }
}
