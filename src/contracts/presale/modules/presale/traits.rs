use ink::{contract_ref, env::DefaultEnvironment, prelude::vec::Vec};
use pendzl::traits::{AccountId, Balance, Timestamp};

use super::{
    errors::{PresaleError, RouterError},
    structs::{Investment, SaleParams, SalePhase, SaleTotals},
};

pub type LiquidityRouterRef = contract_ref!(LiquidityRouter, DefaultEnvironment);

/// Automated market the raised funds are listed on.
#[ink::trait_definition]
pub trait LiquidityRouter {
    /// Value of `amount_in` of `asset_in` expressed in `asset_out` at the current pool price.
    #[ink(message)]
    fn quote(
        &self,
        asset_in: Option<AccountId>,
        amount_in: Balance,
        asset_out: Option<AccountId>,
    ) -> Balance;

    /// Adds both amounts to the pool of the pair, creating it if needed.
    /// PSP22 sides are pulled from the caller (approve first), a native side is sent as transferred value.
    ///
    /// Returns the pool (liquidity token) address and the amount of liquidity minted to the caller.
    #[ink(message, payable)]
    fn provision_liquidity(
        &mut self,
        asset_a: Option<AccountId>,
        amount_a: Balance,
        asset_b: Option<AccountId>,
        amount_b: Balance,
    ) -> Result<(AccountId, Balance), RouterError>;
}

#[ink::trait_definition]
/// Investor facing functions.
pub trait Presale {
    /// Invests the transferred native value. Only for sales accepting the native coin.
    ///
    /// On success emits `Invested` event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the sale accepts a PSP22 token or nothing was transferred.
    /// Returns `NotOpen` if the sale hasn't started or has ended.
    /// Returns `ExceedsAllowance` if the value exceeds `investable` of the caller.
    /// Returns `ExceedsHardCap` if the value would push the raise over the hard cap.
    #[ink(message, payable)]
    fn invest(&mut self) -> Result<(), PresaleError>;

    /// Invests `amount` of the PSP22 invest asset. Only for sales accepting a PSP22 token.
    ///
    /// On success emits `Invested` event.
    ///
    /// # Errors
    ///
    /// Same as `invest`. Additionally returns `PSP22Error` if the transfer from the caller fails.
    #[ink(message)]
    fn invest_with_token(&mut self, amount: Balance) -> Result<(), PresaleError>;

    /// Sends the caller's claimable sale tokens and returns the amount.
    ///
    /// # Errors
    ///
    /// Returns `ClaimNotEnabled` if the operator hasn't enabled claiming.
    #[ink(message)]
    fn claim(&mut self) -> Result<Balance, PresaleError>;
}

#[ink::trait_definition]
/// Operator functions. Every message returns `Unauthorized` when not called by the operator.
pub trait PresaleManage {
    /// Pulls `amount` of the sale token from the caller into the sale supply.
    ///
    /// # Errors
    ///
    /// Returns `ClaimAlreadyEnabled` once claiming has been enabled.
    /// Returns `InvalidParameter` if `amount` is zero.
    #[ink(message)]
    fn deposit(&mut self, amount: Balance) -> Result<(), PresaleError>;

    /// Lists the sale token. Takes the liquidity share of the raised funds and the matching amount of sale token
    /// (pulled from the caller) into the router and locks the minted liquidity for the keeper.
    ///
    /// With `use_native_value` a PSP22 raise is valued in the native coin before applying the listing price.
    ///
    /// On success emits `LiquidityAdded` event.
    ///
    /// # Errors
    ///
    /// Returns `NotClosed` if the sale hasn't ended.
    /// Returns `SoftCapNotMet` if less than the soft cap was raised.
    /// Returns `AlreadySeeded` if liquidity was already added.
    /// Returns `InsufficientWantAmount` if `want_amount` is below the required sale token amount.
    /// Returns `RouterError` or `LockerError` if a collaborator fails.
    #[ink(message)]
    fn add_liquidity(
        &mut self,
        use_native_value: bool,
        want_amount: Balance,
    ) -> Result<(), PresaleError>;

    /// Enables or disables claiming. With `distribute` set (and claiming enabled) pays out every investor right away.
    ///
    /// # Errors
    ///
    /// Returns `NotClosed` if the sale hasn't ended.
    #[ink(message)]
    fn set_claim_enabled(&mut self, enabled: bool, distribute: bool) -> Result<(), PresaleError>;

    /// Pays out investors `offset..offset + limit` (in order of first investment).
    /// Returns the number of investors processed.
    ///
    /// # Errors
    ///
    /// Returns `ClaimNotEnabled` if claiming isn't enabled.
    #[ink(message)]
    fn distribute(&mut self, offset: u32, limit: u32) -> Result<u32, PresaleError>;

    /// Sends the unsold part of the supply to the caller. Only the first call transfers anything.
    ///
    /// # Errors
    ///
    /// Returns `NotClosed` if the sale hasn't ended.
    #[ink(message)]
    fn withdraw_want_token(&mut self) -> Result<Balance, PresaleError>;

    /// Sends the raised funds left after the liquidity share and the fee to the caller. Only the first call transfers anything.
    ///
    /// # Errors
    ///
    /// Returns `NotClosed` if the sale hasn't ended.
    #[ink(message)]
    fn withdraw_invest_token(&mut self) -> Result<Balance, PresaleError>;

    /// Sends the presale fee to the caller. Only the first call transfers anything.
    ///
    /// # Errors
    ///
    /// Returns `NotClosed` if the sale hasn't ended.
    #[ink(message)]
    fn withdraw_presale_fee(&mut self) -> Result<Balance, PresaleError>;

    /// Pairs `amount` of the PSP22 `asset`, pulled from the caller, with the native coin sent along
    /// in a new or existing pool. The minted liquidity goes to the caller.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `amount` or the sent value is zero.
    #[ink(message, payable)]
    fn add_liquidity_directly(
        &mut self,
        asset: AccountId,
        amount: Balance,
    ) -> Result<Balance, PresaleError>;

    /// # Errors
    ///
    /// Returns `AlreadySeeded` if liquidity was already added.
    #[ink(message)]
    fn set_router(&mut self, router: AccountId) -> Result<(), PresaleError>;

    /// Moves the sale window.
    ///
    /// # Errors
    ///
    /// Returns `ClaimAlreadyEnabled` or `AlreadySeeded` once the sale has been settled.
    /// Returns `AlreadyClosed` once the sale window has ended.
    /// Returns `InvalidParameter` if `duration` is zero.
    #[ink(message)]
    fn set_schedule(
        &mut self,
        start_time: Timestamp,
        duration: Timestamp,
    ) -> Result<(), PresaleError>;
}

#[ink::trait_definition]
pub trait PresaleView {
    /// Amount `account` may invest in total, derived from its unlocked stakes at the moment of the call.
    #[ink(message)]
    fn total_investable(&self, account: AccountId) -> Balance;

    /// `total_investable` minus what `account` has already invested.
    #[ink(message)]
    fn investable(&self, account: AccountId) -> Balance;

    #[ink(message)]
    fn claimable(&self, account: AccountId) -> Balance;

    #[ink(message)]
    fn invested(&self, account: AccountId) -> Balance;

    #[ink(message)]
    fn investment_of(&self, account: AccountId) -> Investment;

    #[ink(message)]
    fn investors(&self) -> Vec<AccountId>;

    #[ink(message)]
    fn investor_count(&self) -> u32;

    #[ink(message)]
    fn investor_at(&self, index: u32) -> Option<AccountId>;

    #[ink(message)]
    fn phase(&self) -> SalePhase;

    #[ink(message)]
    fn sale_params(&self) -> SaleParams;

    #[ink(message)]
    fn sale_totals(&self) -> SaleTotals;

    /// Value of `amount` of `asset` in the native coin, as quoted by the router.
    #[ink(message)]
    fn native_value(&self, asset: Option<AccountId>, amount: Balance) -> Balance;

    /// Sale token amount `add_liquidity` would take at the moment.
    #[ink(message)]
    fn required_want_amount(&self, use_native_value: bool) -> Result<Balance, PresaleError>;

    #[ink(message)]
    fn liquidity_pair(&self) -> Option<AccountId>;

    #[ink(message)]
    fn supplied_liquidity(&self) -> Balance;

    /// Total allocation of the stake pool tiers.
    #[ink(message)]
    fn total_allocation(&self) -> u128;

    /// Unsold part of the deposited supply.
    #[ink(message)]
    fn residual_supply(&self) -> Balance;

    #[ink(message)]
    fn stake_pool(&self) -> AccountId;

    #[ink(message)]
    fn locker(&self) -> AccountId;

    #[ink(message)]
    fn router(&self) -> AccountId;
}
