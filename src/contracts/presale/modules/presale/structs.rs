use ink::primitives::AccountId;
use launchpad_common::math::BPS_DENOMINATOR;
use pendzl::{
    math::errors::MathError,
    traits::{Balance, Timestamp},
};

use super::errors::PresaleError;

/// Sale configuration fixed at deployment (the schedule can be moved by the operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct SaleParams {
    /// PSP22 token being sold.
    pub sale_token: AccountId,
    /// Asset accepted from investors. `None` for the native coin.
    pub invest_asset: Option<AccountId>,
    pub start_time: Timestamp,
    pub duration: Timestamp,
    pub hard_cap: Balance,
    pub soft_cap: Balance,
    /// Sale tokens listed per unit of invested value, scaled by 10^12.
    pub listing_price: u128,
    /// Part of the raised funds put into the liquidity pool.
    pub liquidity_allocation_bps: u16,
    pub liquidity_lock_duration: Timestamp,
    pub presale_fee_bps: u16,
    /// Beneficiary of the locked liquidity tokens.
    pub keeper: AccountId,
}

impl Default for SaleParams {
    fn default() -> Self {
        Self {
            sale_token: AccountId::from([0u8; 32]),
            invest_asset: None,
            start_time: 0,
            duration: 0,
            hard_cap: 0,
            soft_cap: 0,
            listing_price: 0,
            liquidity_allocation_bps: 0,
            liquidity_lock_duration: 0,
            presale_fee_bps: 0,
            keeper: AccountId::from([0u8; 32]),
        }
    }
}

impl SaleParams {
    pub fn validate(&self) -> Result<(), PresaleError> {
        let bps = (self.liquidity_allocation_bps as u32) + (self.presale_fee_bps as u32);
        if self.hard_cap == 0
            || self.soft_cap > self.hard_cap
            || self.duration == 0
            || self.listing_price == 0
            || bps > BPS_DENOMINATOR as u32
        {
            return Err(PresaleError::InvalidParameter);
        }
        self.end_time()?;
        Ok(())
    }

    pub fn end_time(&self) -> Result<Timestamp, MathError> {
        self.start_time
            .checked_add(self.duration)
            .ok_or(MathError::Overflow)
    }

    pub fn phase(&self, now: Timestamp) -> SalePhase {
        if now < self.start_time {
            return SalePhase::Pending;
        }
        match self.end_time() {
            Ok(end_time) if now >= end_time => SalePhase::Closed,
            _ => SalePhase::Open,
        }
    }

    /// Part of the raised funds left to the operator after liquidity and fee.
    pub fn operator_share_bps(&self) -> u16 {
        BPS_DENOMINATOR - self.liquidity_allocation_bps - self.presale_fee_bps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum SalePhase {
    Pending,
    Open,
    Closed,
}

/// Running totals and one-shot flags of the sale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct SaleTotals {
    pub total_supply_deposited: Balance,
    pub total_invested: Balance,
    pub claim_enabled: bool,
    pub liquidity_added: bool,
    pub want_withdrawn: bool,
    pub invest_withdrawn: bool,
    pub fee_withdrawn: bool,
    pub liquidity_pair: Option<AccountId>,
    pub supplied_liquidity: Balance,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Investment {
    pub invested: Balance,
    /// Sale tokens already paid out.
    pub claimed: Balance,
}
