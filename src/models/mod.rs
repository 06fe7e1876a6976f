mod delegation_lock;
mod pending_rewards;

pub use delegation_lock::DelegationLock;
pub use pending_rewards::PendingRewards;
