use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use log::{debug, error};

use crate::config::SfcConfig;
use crate::contracts::{ISfc, SfcContract, SfcTokenizer};
use crate::error::BridgeError;
use crate::models::{DelegationLock, PendingRewards};
use crate::services::eth_rpc::{CallRequest, ContractCaller, EthRpcClient};

/// Stateless accessor over the SFC and tokenizer contracts.
///
/// Holds the contract addresses and the call transport; every method packs
/// one query, issues it as a view call and decodes the answer.
pub struct ChainBridge<C> {
    config: SfcConfig,
    caller: C,
}

impl ChainBridge<EthRpcClient> {
    /// Connects the bridge through the endpoints carried by the configuration.
    pub fn connect(config: SfcConfig) -> Self {
        let caller = EthRpcClient::connect(&config.primary_rpc, &config.secondary_rpc);
        Self::new(config, caller)
    }
}

impl<C: ContractCaller> ChainBridge<C> {
    pub fn new(config: SfcConfig, caller: C) -> Self {
        Self { config, caller }
    }

    fn sfc_contract(&self) -> SfcContract<'_> {
        SfcContract::new(self.config.sfc_contract, &self.caller)
    }

    fn tokenizer_contract(&self) -> SfcTokenizer<'_> {
        SfcTokenizer::new(self.config.tokenizer_contract, &self.caller)
    }

    /// Returns the current amount at stake for the given staker address and target validator.
    pub async fn amount_staked(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<U256, BridgeError> {
        debug!("verifying amount staked by {} to {}", addr, validator_id);
        self.sfc_contract().get_stake(*addr, *validator_id).await
    }

    /// Returns the current locked amount at stake for the given staker address and target validator.
    pub async fn amount_stake_locked(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<U256, BridgeError> {
        self.sfc_contract()
            .get_locked_stake(*addr, *validator_id)
            .await
    }

    /// Returns the current unlocked amount at stake for the given staker address and target validator.
    pub async fn amount_stake_unlocked(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<U256, BridgeError> {
        self.sfc_contract()
            .get_unlocked_stake(*addr, *validator_id)
            .await
    }

    /// Returns the expected penalty of a premature stake unlock.
    pub async fn stake_unlock_penalty(
        &self,
        addr: &Address,
        validator_id: &U256,
        amount: &U256,
    ) -> Result<U256, BridgeError> {
        let data = ISfc::unlockStakeCall {
            toValidatorID: *validator_id,
            amount: *amount,
        }
        .abi_encode();

        // run unlockStake as a view call to obtain the penalty without touching state
        let raw = self
            .caller
            .eth_call(CallRequest {
                from: Some(*addr),
                to: self.config.sfc_contract,
                data,
            })
            .await
            .map_err(|e| {
                error!(
                    "penalty for unlocking {} of {} to {} not available; {}",
                    amount, addr, validator_id, e
                );
                BridgeError::from(e)
            })?;

        // we expect a single big integer value
        if raw.len() != 32 {
            error!(
                "penalty for unlocking {} of {} to {} response not valid; expected 32 bytes, received {} bytes",
                amount, addr, validator_id, raw.len()
            );
            return Err(BridgeError::ResponseSize {
                expected: 32,
                received: raw.len(),
            });
        }

        Ok(U256::from_be_slice(&raw))
    }

    /// Returns the detail of delegation rewards waiting to be claimed.
    pub async fn pending_rewards(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<PendingRewards, BridgeError> {
        let amount = self
            .sfc_contract()
            .pending_rewards(*addr, *validator_id)
            .await?;
        Ok(PendingRewards {
            address: *addr,
            validator_id: *validator_id,
            amount,
        })
    }

    /// Like [`Self::pending_rewards`], but swallows the query failure and reports
    /// a zero amount, for callers preferring a degraded answer over an error.
    pub async fn pending_rewards_or_zero(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> PendingRewards {
        match self.pending_rewards(addr, validator_id).await {
            Ok(rewards) => rewards,
            Err(e) => {
                error!(
                    "can not calculate pending rewards of {} to {}; {}",
                    addr, validator_id, e
                );
                PendingRewards {
                    address: *addr,
                    validator_id: *validator_id,
                    amount: U256::ZERO,
                }
            }
        }
    }

    /// Returns delegation lock information from the SFC contract.
    pub async fn delegation_lock(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<DelegationLock, BridgeError> {
        let lock = self
            .sfc_contract()
            .get_lockup_info(*addr, *validator_id)
            .await
            .map_err(|e| {
                error!("delegation lock query failed; {}", e);
                e
            })?;

        // a zeroed lockup tuple means no lock exists for the delegation
        if lock.fromEpoch.is_zero() || lock.endTime.is_zero() {
            error!("delegation lock details not available");
            return Err(BridgeError::LockMissing);
        }

        Ok(DelegationLock {
            locked_amount: lock.lockedStake,
            locked_from_epoch: lock.fromEpoch.saturating_to::<u64>(),
            locked_until: lock.endTime.saturating_to::<u64>(),
            duration: lock.duration.saturating_to::<u64>(),
        })
    }

    /// Returns the amount of tokenized stake outstanding for the delegation
    /// identified by the delegator address and the validator id.
    pub async fn delegation_outstanding_scoin(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<U256, BridgeError> {
        debug!("checking outstanding of {} to {}", addr, validator_id);
        self.tokenizer_contract()
            .outstanding_scoin(*addr, *validator_id)
            .await
            .map_err(|e| {
                error!(
                    "failed to get outstanding tokenized stake of {} to {}; {}",
                    addr, validator_id, e
                );
                e
            })
    }

    /// Returns the status of the tokenizer lock for a delegation identified
    /// by the delegator address and the validator id.
    pub async fn delegation_tokenizer_unlocked(
        &self,
        addr: &Address,
        validator_id: &U256,
    ) -> Result<bool, BridgeError> {
        debug!("checking tokenizer lock of {} to {}", addr, validator_id);
        self.tokenizer_contract()
            .allowed_to_withdraw_stake(*addr, *validator_id)
            .await
            .map_err(|e| {
                error!(
                    "failed to get tokenizer lock status of {} to {}; {}",
                    addr, validator_id, e
                );
                e
            })
    }
}
