use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};

use crate::error::BridgeError;
use crate::services::eth_rpc::{CallRequest, ContractCaller};

sol! {
    /// Staking and delegation queries exposed by the SFC contract.
    interface ISfc {
        function getStake(address delegator, uint256 toValidatorID) external view returns (uint256);
        function getLockedStake(address delegator, uint256 toValidatorID) external view returns (uint256);
        function getUnlockedStake(address delegator, uint256 toValidatorID) external view returns (uint256);
        function pendingRewards(address delegator, uint256 toValidatorID) external view returns (uint256);
        function getLockupInfo(address delegator, uint256 toValidatorID) external view
            returns (uint256 lockedStake, uint256 fromEpoch, uint256 endTime, uint256 duration);
        function unlockStake(uint256 toValidatorID, uint256 amount) external returns (uint256);
    }

    /// Tokenizer wrapping staked positions as transferable tokens.
    interface ISfcTokenizer {
        function outstandingSCoin(address delegator, uint256 toValidatorID) external view returns (uint256);
        function allowedToWithdrawStake(address sender, uint256 toValidatorID) external view returns (bool);
    }
}

async fn view_call<C: SolCall>(
    caller: &dyn ContractCaller,
    to: Address,
    call: C,
) -> Result<C::Return, BridgeError> {
    let raw = caller
        .eth_call(CallRequest {
            from: None,
            to,
            data: call.abi_encode(),
        })
        .await?;
    Ok(C::abi_decode_returns(&raw, true)?)
}

/// SFC contract binding: the contract address plus the caller used to reach it.
pub struct SfcContract<'a> {
    address: Address,
    caller: &'a dyn ContractCaller,
}

impl<'a> SfcContract<'a> {
    pub fn new(address: Address, caller: &'a dyn ContractCaller) -> Self {
        Self { address, caller }
    }

    pub async fn get_stake(
        &self,
        delegator: Address,
        validator_id: U256,
    ) -> Result<U256, BridgeError> {
        let ret = view_call(
            self.caller,
            self.address,
            ISfc::getStakeCall {
                delegator,
                toValidatorID: validator_id,
            },
        )
        .await?;
        Ok(ret._0)
    }

    pub async fn get_locked_stake(
        &self,
        delegator: Address,
        validator_id: U256,
    ) -> Result<U256, BridgeError> {
        let ret = view_call(
            self.caller,
            self.address,
            ISfc::getLockedStakeCall {
                delegator,
                toValidatorID: validator_id,
            },
        )
        .await?;
        Ok(ret._0)
    }

    pub async fn get_unlocked_stake(
        &self,
        delegator: Address,
        validator_id: U256,
    ) -> Result<U256, BridgeError> {
        let ret = view_call(
            self.caller,
            self.address,
            ISfc::getUnlockedStakeCall {
                delegator,
                toValidatorID: validator_id,
            },
        )
        .await?;
        Ok(ret._0)
    }

    pub async fn pending_rewards(
        &self,
        delegator: Address,
        validator_id: U256,
    ) -> Result<U256, BridgeError> {
        let ret = view_call(
            self.caller,
            self.address,
            ISfc::pendingRewardsCall {
                delegator,
                toValidatorID: validator_id,
            },
        )
        .await?;
        Ok(ret._0)
    }

    pub async fn get_lockup_info(
        &self,
        delegator: Address,
        validator_id: U256,
    ) -> Result<ISfc::getLockupInfoReturn, BridgeError> {
        view_call(
            self.caller,
            self.address,
            ISfc::getLockupInfoCall {
                delegator,
                toValidatorID: validator_id,
            },
        )
        .await
    }
}

/// SFC tokenizer binding.
pub struct SfcTokenizer<'a> {
    address: Address,
    caller: &'a dyn ContractCaller,
}

impl<'a> SfcTokenizer<'a> {
    pub fn new(address: Address, caller: &'a dyn ContractCaller) -> Self {
        Self { address, caller }
    }

    pub async fn outstanding_scoin(
        &self,
        delegator: Address,
        validator_id: U256,
    ) -> Result<U256, BridgeError> {
        let ret = view_call(
            self.caller,
            self.address,
            ISfcTokenizer::outstandingSCoinCall {
                delegator,
                toValidatorID: validator_id,
            },
        )
        .await?;
        Ok(ret._0)
    }

    pub async fn allowed_to_withdraw_stake(
        &self,
        sender: Address,
        validator_id: U256,
    ) -> Result<bool, BridgeError> {
        let ret = view_call(
            self.caller,
            self.address,
            ISfcTokenizer::allowedToWithdrawStakeCall {
                sender,
                toValidatorID: validator_id,
            },
        )
        .await?;
        Ok(ret._0)
    }
}
