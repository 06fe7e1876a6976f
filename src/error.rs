use thiserror::Error;

/// Failure raised by the JSON-RPC transport.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node returned error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),
}

/// Failure raised by a chain bridge query.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("delegation lock missing")]
    LockMissing,

    #[error("unexpected response size; expected {expected} bytes, received {received} bytes")]
    ResponseSize { expected: usize, received: usize },
}
