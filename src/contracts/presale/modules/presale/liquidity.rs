use ink::codegen::TraitCallBuilder;
use ink::primitives::AccountId;
use launchpad_common::{
    math::{mul_bps, mul_denom_e12},
    Asset,
};
use pendzl::{
    math::operations::Rounding,
    traits::Balance,
};

use super::{
    errors::PresaleError,
    structs::SaleParams,
    traits::{LiquidityRouter, LiquidityRouterRef},
};

/// The two capabilities of the market the sale needs.
pub trait LiquidityMarket {
    fn quote(&self, asset_in: Asset, amount_in: Balance, asset_out: Asset) -> Balance;

    /// Returns the pool address and the minted liquidity.
    fn provision(
        &mut self,
        asset_a: Asset,
        amount_a: Balance,
        asset_b: Asset,
        amount_b: Balance,
    ) -> Result<(AccountId, Balance), PresaleError>;
}

/// Market backed by a deployed liquidity router.
pub struct RouterMarket(pub LiquidityRouterRef);

impl From<AccountId> for RouterMarket {
    fn from(router: AccountId) -> Self {
        Self(router.into())
    }
}

impl LiquidityMarket for RouterMarket {
    fn quote(&self, asset_in: Asset, amount_in: Balance, asset_out: Asset) -> Balance {
        self.0
            .call()
            .quote(asset_in, amount_in, asset_out)
            .call_v1()
            .invoke()
    }

    fn provision(
        &mut self,
        asset_a: Asset,
        amount_a: Balance,
        asset_b: Asset,
        amount_b: Balance,
    ) -> Result<(AccountId, Balance), PresaleError> {
        let value = match (asset_a, asset_b) {
            (None, _) => amount_a,
            (_, None) => amount_b,
            _ => 0,
        };
        let provisioned = self
            .0
            .call_mut()
            .provision_liquidity(asset_a, amount_a, asset_b, amount_b)
            .call_v1()
            .transferred_value(value)
            .invoke()?;
        Ok(provisioned)
    }
}

/// Amounts going into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityPlan {
    /// Raised funds put into the pool.
    pub invest_amount: Balance,
    /// Sale tokens matching `invest_amount` at the listing price.
    pub want_amount: Balance,
}

/// Value of `amount` of `asset` in the native coin.
pub fn native_value<M: LiquidityMarket>(market: &M, asset: Asset, amount: Balance) -> Balance {
    match asset {
        Some(_) => market.quote(asset, amount, None),
        None => amount,
    }
}

/// `invest_amount` is the liquidity share of `total_invested`. `want_amount` is its value (in the invest asset,
/// or in the native coin when `use_native_value` is set for a PSP22 raise) times the listing price, rounded up.
pub fn plan_liquidity<M: LiquidityMarket>(
    market: &M,
    params: &SaleParams,
    total_invested: Balance,
    use_native_value: bool,
) -> Result<LiquidityPlan, PresaleError> {
    let invest_amount = mul_bps(total_invested, params.liquidity_allocation_bps)?;

    let value = if use_native_value {
        native_value(market, params.invest_asset, invest_amount)
    } else {
        invest_amount
    };
    let want_amount = mul_denom_e12(value, params.listing_price, Rounding::Up)?;
    ink::env::debug_println!(
        "liquidity: invest {} valued {} -> want {}",
        invest_amount,
        value,
        want_amount
    );

    Ok(LiquidityPlan {
        invest_amount,
        want_amount,
    })
}
