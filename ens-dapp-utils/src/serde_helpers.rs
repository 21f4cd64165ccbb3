use std::borrow::Cow;

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Parses a JSON-RPC quantity (`0x`-prefixed hex) or a plain decimal string
pub fn parse_quantity(value: &str) -> Result<u64, std::num::ParseIntError> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

/// Decodes hex data with an optional `0x` prefix
pub fn parse_hex_data(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value)
}

struct QuantityOrNumber(u64);

impl Serialize for QuantityOrNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format!("0x{:x}", self.0))
        } else {
            serializer.serialize_u64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for QuantityOrNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Value<'a> {
            String(#[serde(borrow)] Cow<'a, str>),
            Number(u64),
        }

        match Value::deserialize(deserializer)? {
            Value::String(str) => parse_quantity(str.as_ref())
                .map(Self)
                .map_err(|_| D::Error::custom("Invalid quantity")),
            Value::Number(value) => Ok(Self(value)),
        }
    }
}

pub mod serde_quantity {
    use super::*;

    pub fn serialize<S>(data: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        QuantityOrNumber(*data).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        QuantityOrNumber::deserialize(deserializer).map(|QuantityOrNumber(x)| x)
    }
}

pub mod serde_hex_data {
    use super::*;

    pub fn serialize<S>(data: &dyn AsRef<[u8]>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(data.as_ref())))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = <Cow<'de, str>>::deserialize(deserializer)?;
        parse_hex_data(data.as_ref()).map_err(|_| D::Error::custom("Invalid hex data"))
    }
}
