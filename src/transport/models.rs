use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";

/// Error code for methods the provider does not implement
pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Serialize)]
pub struct JrpcRequest<'a, T: ?Sized> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a T,
}

impl<'a, T: Serialize + ?Sized> JrpcRequest<'a, T> {
    pub fn new(id: u64, method: &'a str, params: &'a T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

#[derive(Deserialize)]
pub struct JrpcResponse<T> {
    /// Missing or `null` when the provider could not read the request id
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JrpcError>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct JrpcError {
    pub code: i64,
    pub message: String,
}

impl<T> JrpcResponse<T> {
    pub fn into_result(self) -> Result<T, JrpcResponseError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(JrpcResponseError::Rpc(error)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(JrpcResponseError::Empty),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum JrpcResponseError {
    #[error("JSON-RPC error {}: {}", .0.code, .0.message)]
    Rpc(JrpcError),
    #[error("Response contains neither result nor error")]
    Empty,
}

impl JrpcResponseError {
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc(error) => Some(error.code),
            Self::Empty => None,
        }
    }
}
