pub use ink::primitives::AccountId;
pub use pendzl::traits::{Balance, Timestamp};

#[ink::event]
pub struct SupplyDeposited {
    pub amount: Balance,
    pub total_supply_deposited: Balance,
}

#[ink::event]
pub struct Invested {
    #[ink(topic)]
    pub investor: AccountId,
    pub amount: Balance,
}

#[ink::event]
pub struct LiquidityAdded {
    #[ink(topic)]
    pub pair: AccountId,
    pub want_amount: Balance,
    pub invest_amount: Balance,
    pub liquidity: Balance,
    pub unlock_time: Timestamp,
}

#[ink::event]
pub struct LiquidityProvided {
    #[ink(topic)]
    pub pair: AccountId,
    pub asset: AccountId,
    pub amount: Balance,
    pub native_amount: Balance,
    pub liquidity: Balance,
}

#[ink::event]
pub struct ClaimEnabledChanged {
    pub enabled: bool,
}

#[ink::event]
pub struct Claimed {
    #[ink(topic)]
    pub investor: AccountId,
    pub amount: Balance,
}

#[ink::event]
pub struct WantTokenWithdrawn {
    #[ink(topic)]
    pub to: AccountId,
    pub amount: Balance,
}

#[ink::event]
pub struct InvestTokenWithdrawn {
    #[ink(topic)]
    pub to: AccountId,
    pub amount: Balance,
}

#[ink::event]
pub struct PresaleFeeWithdrawn {
    #[ink(topic)]
    pub to: AccountId,
    pub amount: Balance,
}

#[ink::event]
pub struct RouterChanged {
    #[ink(topic)]
    pub router: AccountId,
}

#[ink::event]
pub struct ScheduleChanged {
    pub start_time: Timestamp,
    pub duration: Timestamp,
}
