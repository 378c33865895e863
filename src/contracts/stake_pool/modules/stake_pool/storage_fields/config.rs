use ink::{env::DefaultEnvironment, primitives::AccountId};
use launchpad_common::math::{mul_bps, BPS_DENOMINATOR};
use pendzl::{math::errors::MathError, traits::Balance};

use crate::modules::stake_pool::{
    errors::StakePoolError,
    events::{FeeRecipientChanged, WithdrawalFeeChanged},
};

#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct PoolConfigData {
    #[lazy]
    stake_token: AccountId,
    #[lazy]
    withdrawal_fee_bps: u16,
    #[lazy]
    fee_recipient: AccountId,
}

impl PoolConfigData {
    pub fn new(stake_token: &AccountId, fee_recipient: &AccountId) -> Self {
        let mut instance = Self::default();
        instance.stake_token.set(stake_token);
        instance.set_fee_recipient(fee_recipient);
        ink::env::emit_event::<DefaultEnvironment, FeeRecipientChanged>(FeeRecipientChanged {
            recipient: *fee_recipient,
        });
        instance
    }
}

impl PoolConfigData {
    pub fn stake_token(&self) -> AccountId {
        self.stake_token.get().unwrap_or(AccountId::from([0u8; 32]))
    }

    pub fn withdrawal_fee_bps(&self) -> u16 {
        self.withdrawal_fee_bps.get().unwrap_or_default()
    }

    pub fn fee_recipient(&self) -> AccountId {
        self.fee_recipient.get().unwrap_or(AccountId::from([0u8; 32]))
    }

    pub fn set_withdrawal_fee_bps(&mut self, fee_bps: u16) -> Result<(), StakePoolError> {
        if fee_bps > BPS_DENOMINATOR {
            return Err(StakePoolError::InvalidParameter);
        }
        self.withdrawal_fee_bps.set(&fee_bps);
        ink::env::emit_event::<DefaultEnvironment, WithdrawalFeeChanged>(WithdrawalFeeChanged {
            fee_bps,
        });
        Ok(())
    }

    pub fn set_fee_recipient(&mut self, recipient: &AccountId) {
        self.fee_recipient.set(recipient);
    }

    /// Splits a withdrawal into `(fee, rest)`.
    pub fn split_fee(&self, amount: Balance) -> Result<(Balance, Balance), MathError> {
        let fee = mul_bps(amount, self.withdrawal_fee_bps())?;
        Ok((fee, amount - fee))
    }
}
