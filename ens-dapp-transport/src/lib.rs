pub use self::jrpc::{JrpcClient, JrpcConnector};

mod jrpc;
