use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Delegation rewards waiting to be claimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRewards {
    pub address: Address,
    pub validator_id: U256,
    pub amount: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_serialize_as_hex_quantities() {
        let rewards = PendingRewards {
            address: "0x1111111111111111111111111111111111111111"
                .parse()
                .unwrap(),
            validator_id: U256::from(7),
            amount: U256::from(42),
        };

        let json = serde_json::to_value(&rewards).unwrap();
        assert_eq!(json["validator_id"], "0x7");
        assert_eq!(json["amount"], "0x2a");
        assert_eq!(json["address"], "0x1111111111111111111111111111111111111111");
    }
}
