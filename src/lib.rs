//! Bridge to the staking (SFC) API of an Opera/Lachesis style full node.
//!
//! Every query packs its arguments into an ABI-encoded view call, sends it
//! through a JSON-RPC transport and decodes the returned words. The crate
//! keeps no state of its own; contract semantics, lock accounting and reward
//! accrual all live inside the deployed contracts.
//!
//! Prefer a local loopback endpoint between this bridge and the node. A
//! remote RPC connection works but pays the extra networking overhead, and a
//! node RPC interface should never be left openly reachable on the Internet.

pub mod bridge;
pub mod config;
pub mod contracts;
pub mod error;
pub mod models;
pub mod services;

pub use crate::bridge::ChainBridge;
pub use crate::config::SfcConfig;
pub use crate::error::{BridgeError, RpcError};
pub use crate::models::{DelegationLock, PendingRewards};
pub use crate::services::eth_rpc::{CallRequest, ContractCaller, EthRpcClient};
