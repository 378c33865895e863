pub use ink::primitives::AccountId;
pub use pendzl::traits::{Balance, Timestamp};

use super::structs::TierId;

#[ink::event]
pub struct TierAdded {
    #[ink(topic)]
    pub tier_id: TierId,
    pub unit_amount: Balance,
    pub allocation: u128,
    pub lock_duration: Timestamp,
}

#[ink::event]
pub struct TierUpdated {
    #[ink(topic)]
    pub tier_id: TierId,
    pub unit_amount: Balance,
    pub allocation: u128,
    pub lock_duration: Timestamp,
}

#[ink::event]
pub struct Staked {
    #[ink(topic)]
    pub tier_id: TierId,
    #[ink(topic)]
    pub account: AccountId,
    pub amount: Balance,
    pub unlock_time: Timestamp,
}

#[ink::event]
pub struct Withdrawn {
    #[ink(topic)]
    pub tier_id: TierId,
    #[ink(topic)]
    pub account: AccountId,
    pub amount: Balance,
    pub fee: Balance,
}

#[ink::event]
pub struct WithdrawalFeeChanged {
    pub fee_bps: u16,
}

#[ink::event]
pub struct FeeRecipientChanged {
    #[ink(topic)]
    pub recipient: AccountId,
}
