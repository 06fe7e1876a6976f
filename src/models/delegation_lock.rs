use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Delegation lock state as reported by the SFC contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationLock {
    pub locked_amount: U256,
    pub locked_from_epoch: u64,
    pub locked_until: u64,
    pub duration: u64,
}
