use std::env;

use alloy_primitives::Address;

#[derive(Debug, Clone)]
pub struct SfcConfig {
    pub sfc_contract: Address,
    pub tokenizer_contract: Address,
    pub primary_rpc: String,
    pub secondary_rpc: String,
}

impl SfcConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            sfc_contract: env::var("SFC_CONTRACT")
                .unwrap_or_else(|_| "0xFC00FACE00000000000000000000000000000000".to_string())
                .parse()
                .expect("SFC_CONTRACT must be a valid address"),
            tokenizer_contract: env::var("TOKENIZER_CONTRACT")
                .expect("TOKENIZER_CONTRACT must be set")
                .parse()
                .expect("TOKENIZER_CONTRACT must be a valid address"),
            primary_rpc: env::var("PRIMARY_RPC").expect("PRIMARY_RPC must be set"),
            secondary_rpc: env::var("SECONDARY_RPC").expect("SECONDARY_RPC must be set"),
        }
    }
}
