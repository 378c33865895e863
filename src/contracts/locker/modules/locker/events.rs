pub use ink::primitives::AccountId;
pub use pendzl::traits::{Balance, Timestamp};

#[ink::event]
pub struct Locked {
    #[ink(topic)]
    pub beneficiary: AccountId,
    #[ink(topic)]
    pub asset: Option<AccountId>,
    pub locker: AccountId,
    pub amount: Balance,
    pub unlock_time: Timestamp,
}

#[ink::event]
pub struct Unlocked {
    #[ink(topic)]
    pub beneficiary: AccountId,
    #[ink(topic)]
    pub asset: Option<AccountId>,
    pub amount: Balance,
}
