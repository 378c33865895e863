use ink::{contract_ref, env::DefaultEnvironment, prelude::vec::Vec};
use launchpad_common::BalanceInfo;
use pendzl::traits::{AccountId, Balance, Timestamp};

use super::{
    errors::StakePoolError,
    structs::{Tier, TierId},
};

pub type StakePoolViewRef = contract_ref!(StakePoolView, DefaultEnvironment);

#[ink::trait_definition]
/// Staking into tiers.
pub trait StakePool {
    /// Stakes `amount` rounded down to the tier's unit amount. Only the rounded amount is pulled from the caller.
    ///
    /// If the tier has a lock duration, the whole locked stake of the caller in the tier becomes unlocked `lock_duration` after now.
    ///
    /// On success emits `Staked` event and returns the staked amount.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tier doesn't exist.
    /// Returns `BelowMinimum` if `amount` is lower than the tier's unit amount.
    /// Returns `PSP22Error` if the transfer of the stake token fails.
    #[ink(message)]
    fn stake(&mut self, tier_id: TierId, amount: Balance) -> Result<Balance, StakePoolError>;

    /// Withdraws `amount` from the unlocked stake of the caller.
    /// The withdrawal fee is sent to the fee recipient, the rest to the caller.
    ///
    /// On success emits `Withdrawn` event and returns the amount received by the caller.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tier doesn't exist.
    /// Returns `InvalidParameter` if `amount` is zero.
    /// Returns `InsufficientUnlocked` if `amount` exceeds the unlocked stake.
    #[ink(message)]
    fn withdraw(&mut self, tier_id: TierId, amount: Balance) -> Result<Balance, StakePoolError>;

    /// Withdraws the whole unlocked stake of the caller. Does nothing if nothing is unlocked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tier doesn't exist.
    #[ink(message)]
    fn withdraw_all(&mut self, tier_id: TierId) -> Result<Balance, StakePoolError>;
}

#[ink::trait_definition]
/// Operator functions. Every message returns `Unauthorized` when not called by the operator.
pub trait StakePoolManage {
    /// Appends a tier and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `unit_amount` is zero.
    #[ink(message)]
    fn add_tier(
        &mut self,
        unit_amount: Balance,
        allocation: u128,
        lock_duration: Timestamp,
    ) -> Result<TierId, StakePoolError>;

    #[ink(message)]
    fn set_allocation(&mut self, tier_id: TierId, allocation: u128) -> Result<(), StakePoolError>;

    /// # Errors
    ///
    /// Returns `InvalidParameter` if `unit_amount` is zero.
    #[ink(message)]
    fn set_unit_amount(
        &mut self,
        tier_id: TierId,
        unit_amount: Balance,
    ) -> Result<(), StakePoolError>;

    /// Applies to stakes made after the change.
    #[ink(message)]
    fn set_lock_duration(
        &mut self,
        tier_id: TierId,
        lock_duration: Timestamp,
    ) -> Result<(), StakePoolError>;

    /// # Errors
    ///
    /// Returns `InvalidParameter` if `fee_bps` exceeds 10_000.
    #[ink(message)]
    fn set_withdrawal_fee(&mut self, fee_bps: u16) -> Result<(), StakePoolError>;

    #[ink(message)]
    fn set_fee_recipient(&mut self, recipient: AccountId) -> Result<(), StakePoolError>;
}

#[ink::trait_definition]
pub trait StakePoolView {
    #[ink(message)]
    fn tier_count(&self) -> TierId;

    #[ink(message)]
    fn tier(&self, tier_id: TierId) -> Option<Tier>;

    /// Sum of the allocations of all tiers.
    #[ink(message)]
    fn total_allocation(&self) -> u128;

    /// Stake of `account` in the tier as of now.
    #[ink(message)]
    fn balance_of(&self, tier_id: TierId, account: AccountId) -> BalanceInfo;

    /// Sum of the unlocked stakes of all participants of the tier.
    #[ink(message)]
    fn total_available(&self, tier_id: TierId) -> Balance;

    #[ink(message)]
    fn user_count(&self, tier_id: TierId) -> u32;

    #[ink(message)]
    fn users(&self, tier_id: TierId) -> Vec<AccountId>;

    /// Sum of all stakes in all tiers.
    #[ink(message)]
    fn total_supply(&self) -> Balance;

    #[ink(message)]
    fn stake_token(&self) -> AccountId;

    /// Withdrawal fee in basis points.
    #[ink(message)]
    fn withdrawal_fee(&self) -> u16;

    #[ink(message)]
    fn fee_recipient(&self) -> AccountId;
}
