use ink::{contract_ref, env::DefaultEnvironment, prelude::vec::Vec};
use launchpad_common::BalanceInfo;
use pendzl::traits::{AccountId, Balance, Timestamp};

use super::errors::LockerError;

pub type LockerRef = contract_ref!(Locker, DefaultEnvironment);

#[ink::trait_definition]
/// Time-lock custody of PSP22 tokens and native coin.
pub trait Locker {
    /// Locks `amount` of `asset` for `beneficiary` for `duration` milliseconds.
    /// `asset == None` locks native coin which must be sent along with the call.
    ///
    /// Locking again for the same beneficiary and asset moves the unlock time of
    /// everything still locked to `now + duration`.
    ///
    /// On success emits `Locked` event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `amount` is zero or the transferred value doesn't match.
    /// Returns `PSP22Error` if pulling the tokens from the caller fails.
    #[ink(message, payable)]
    fn lock(
        &mut self,
        asset: Option<AccountId>,
        amount: Balance,
        beneficiary: AccountId,
        duration: Timestamp,
    ) -> Result<(), LockerError>;

    /// Sends everything the caller has unlocked for `asset` to the caller.
    ///
    /// On success emits `Unlocked` event.
    ///
    /// # Errors
    ///
    /// Returns `NothingUnlocked` if no part of the caller's balance has matured.
    #[ink(message)]
    fn unlock(&mut self, asset: Option<AccountId>) -> Result<Balance, LockerError>;
}

#[ink::trait_definition]
pub trait LockerView {
    #[ink(message)]
    fn balance_of(&self, beneficiary: AccountId, asset: Option<AccountId>) -> BalanceInfo;

    /// Assets ever locked for `beneficiary`, in order of the first lock.
    #[ink(message)]
    fn assets_of(&self, beneficiary: AccountId) -> Vec<Option<AccountId>>;
}
