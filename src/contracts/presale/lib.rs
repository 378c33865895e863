// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod modules;

pub use modules::presale::{
    errors::{PresaleError, RouterError},
    structs::{Investment, SaleParams, SalePhase, SaleTotals},
    traits::{LiquidityRouter, LiquidityRouterRef, Presale, PresaleManage, PresaleView},
};

/// Sale of a PSP22 token to stakers of the stake pool.
///
/// How much an account may invest follows from its unlocked stakes in the pool tiers, recomputed on every call.
/// After the sale window ends the operator lists the token (part of the raise goes into a liquidity pool and the
/// minted liquidity is locked in the locker for the keeper), enables claiming and withdraws the rest of the raise,
/// the fee and the unsold supply.
#[pendzl::implementation(AccessControl)]
#[ink::contract]
pub mod presale {
    use crate::modules::presale::{
        allocation::{total_investable, StakeLedgerView},
        errors::PresaleError,
        events::{
            ClaimEnabledChanged, Claimed, InvestTokenWithdrawn, Invested, LiquidityAdded,
            LiquidityProvided, PresaleFeeWithdrawn, RouterChanged, ScheduleChanged,
            SupplyDeposited, WantTokenWithdrawn,
        },
        liquidity::{native_value, plan_liquidity, LiquidityMarket},
        storage_fields::{
            collaborators::CollaboratorsData, investors::InvestorsData, sale::SaleStorage,
        },
        structs::{Investment, SaleParams, SalePhase, SaleTotals},
        traits::{Presale, PresaleManage, PresaleView},
    };
    use ink::{codegen::TraitCallBuilder, prelude::vec::Vec};
    use launchpad_common::asset::{approve, transfer_in, transfer_out};
    use launchpad_locker::Locker;
    use pendzl::math::errors::MathError;

    const ADMIN: RoleType = 0;

    #[ink(storage)]
    #[derive(StorageFieldGetter)]
    pub struct PresaleContract {
        #[storage_field]
        access: AccessControlData,
        #[storage_field]
        sale: SaleStorage,
        #[storage_field]
        investors: InvestorsData,
        #[storage_field]
        collaborators: CollaboratorsData,
    }

    impl PresaleContract {
        #[ink(constructor)]
        pub fn new(
            params: SaleParams,
            stake_pool: AccountId,
            locker: AccountId,
            router: AccountId,
        ) -> Result<Self, PresaleError> {
            let instance = Self {
                access: AccessControlData::new(Some(Self::env().caller())),
                sale: SaleStorage::new(&params)?,
                investors: Default::default(),
                collaborators: CollaboratorsData::new(&stake_pool, &locker, &router),
            };
            Self::env().emit_event(ScheduleChanged {
                start_time: params.start_time,
                duration: params.duration,
            });
            Self::env().emit_event(RouterChanged { router });
            Ok(instance)
        }

        fn _invest(&mut self, investor: AccountId, amount: Balance) -> Result<(), PresaleError> {
            let now = self.env().block_timestamp();
            self.sale.ensure_open(now)?;
            if amount == 0 {
                return Err(PresaleError::InvalidParameter);
            }

            let total = total_investable(
                &self.collaborators.stake_pool(),
                self.sale.params().hard_cap,
                &investor,
            )?;
            let investable = self.sale.investable(&investor, total);
            let first = self
                .sale
                .record_investment(&investor, amount, investable, now)?;
            if first {
                self.investors.push(&investor)?;
            }

            self.env().emit_event(Invested { investor, amount });
            Ok(())
        }

        fn _claim_for(&mut self, investor: AccountId) -> Result<Balance, PresaleError> {
            let amount = self.sale.record_claim(&investor)?;
            if amount > 0 {
                transfer_out(&Some(self.sale.params().sale_token), investor, amount)?;
                self.env().emit_event(Claimed { investor, amount });
            }
            Ok(amount)
        }

        fn _distribute(&mut self, offset: u32, limit: u32) -> Result<u32, PresaleError> {
            if !self.sale.totals().claim_enabled {
                return Err(PresaleError::ClaimNotEnabled);
            }
            let investors = self.investors.slice(offset, limit);
            for investor in investors.iter() {
                self._claim_for(*investor)?;
            }
            Ok(investors.len() as u32)
        }
    }

    impl Presale for PresaleContract {
        #[ink(message, payable)]
        fn invest(&mut self) -> Result<(), PresaleError> {
            if self.sale.params().invest_asset.is_some() {
                return Err(PresaleError::InvalidParameter);
            }
            self._invest(self.env().caller(), self.env().transferred_value())
        }

        #[ink(message)]
        fn invest_with_token(&mut self, amount: Balance) -> Result<(), PresaleError> {
            let invest_asset = self.sale.params().invest_asset;
            if invest_asset.is_none() {
                return Err(PresaleError::InvalidParameter);
            }
            let investor = self.env().caller();
            self._invest(investor, amount)?;
            transfer_in(&invest_asset, investor, amount)?;
            Ok(())
        }

        #[ink(message)]
        fn claim(&mut self) -> Result<Balance, PresaleError> {
            self._claim_for(self.env().caller())
        }
    }

    impl PresaleManage for PresaleContract {
        #[ink(message)]
        fn deposit(&mut self, amount: Balance) -> Result<(), PresaleError> {
            let caller = self.env().caller();
            self._ensure_has_role(ADMIN, Some(caller))?;

            let total_supply_deposited = self.sale.deposit(amount)?;
            transfer_in(&Some(self.sale.params().sale_token), caller, amount)?;

            self.env().emit_event(SupplyDeposited {
                amount,
                total_supply_deposited,
            });
            Ok(())
        }

        #[ink(message)]
        fn add_liquidity(
            &mut self,
            use_native_value: bool,
            want_amount: Balance,
        ) -> Result<(), PresaleError> {
            let caller = self.env().caller();
            self._ensure_has_role(ADMIN, Some(caller))?;

            let now = self.env().block_timestamp();
            self.sale.ensure_can_seed(now)?;

            let params = self.sale.params();
            let mut router = self.collaborators.router();
            let plan = plan_liquidity(
                &router,
                &params,
                self.sale.totals().total_invested,
                use_native_value,
            )?;
            if want_amount < plan.want_amount {
                return Err(PresaleError::InsufficientWantAmount);
            }

            let sale_token = Some(params.sale_token);
            transfer_in(&sale_token, caller, plan.want_amount)?;

            let router_id = self.collaborators.router_id();
            approve(&sale_token, router_id, plan.want_amount)?;
            approve(&params.invest_asset, router_id, plan.invest_amount)?;
            let (pair, liquidity) = router.provision(
                sale_token,
                plan.want_amount,
                params.invest_asset,
                plan.invest_amount,
            )?;
            self.sale.record_liquidity(&pair, liquidity)?;

            approve(&Some(pair), self.collaborators.locker_id(), liquidity)?;
            self.collaborators
                .locker()
                .call_mut()
                .lock(
                    Some(pair),
                    liquidity,
                    params.keeper,
                    params.liquidity_lock_duration,
                )
                .call_v1()
                .invoke()?;

            let unlock_time = now
                .checked_add(params.liquidity_lock_duration)
                .ok_or(MathError::Overflow)?;
            self.env().emit_event(LiquidityAdded {
                pair,
                want_amount: plan.want_amount,
                invest_amount: plan.invest_amount,
                liquidity,
                unlock_time,
            });
            Ok(())
        }

        #[ink(message)]
        fn set_claim_enabled(&mut self, enabled: bool, distribute: bool) -> Result<(), PresaleError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;

            self.sale
                .set_claim_enabled(enabled, self.env().block_timestamp())?;
            self.env().emit_event(ClaimEnabledChanged { enabled });

            if enabled && distribute {
                self._distribute(0, self.investors.count())?;
            }
            Ok(())
        }

        #[ink(message)]
        fn distribute(&mut self, offset: u32, limit: u32) -> Result<u32, PresaleError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            self._distribute(offset, limit)
        }

        #[ink(message)]
        fn withdraw_want_token(&mut self) -> Result<Balance, PresaleError> {
            let caller = self.env().caller();
            self._ensure_has_role(ADMIN, Some(caller))?;

            let amount = self
                .sale
                .take_residual_supply(self.env().block_timestamp())?;
            ink::env::debug_println!("residual supply: {}", amount);
            transfer_out(&Some(self.sale.params().sale_token), caller, amount)?;

            self.env()
                .emit_event(WantTokenWithdrawn { to: caller, amount });
            Ok(amount)
        }

        #[ink(message)]
        fn withdraw_invest_token(&mut self) -> Result<Balance, PresaleError> {
            let caller = self.env().caller();
            self._ensure_has_role(ADMIN, Some(caller))?;

            let amount = self
                .sale
                .take_invest_withdrawal(self.env().block_timestamp())?;
            transfer_out(&self.sale.params().invest_asset, caller, amount)?;

            self.env()
                .emit_event(InvestTokenWithdrawn { to: caller, amount });
            Ok(amount)
        }

        #[ink(message)]
        fn withdraw_presale_fee(&mut self) -> Result<Balance, PresaleError> {
            let caller = self.env().caller();
            self._ensure_has_role(ADMIN, Some(caller))?;

            let amount = self.sale.take_presale_fee(self.env().block_timestamp())?;
            transfer_out(&self.sale.params().invest_asset, caller, amount)?;

            self.env()
                .emit_event(PresaleFeeWithdrawn { to: caller, amount });
            Ok(amount)
        }

        #[ink(message, payable)]
        fn add_liquidity_directly(
            &mut self,
            asset: AccountId,
            amount: Balance,
        ) -> Result<Balance, PresaleError> {
            let caller = self.env().caller();
            self._ensure_has_role(ADMIN, Some(caller))?;

            let native_amount = self.env().transferred_value();
            if amount == 0 || native_amount == 0 {
                return Err(PresaleError::InvalidParameter);
            }

            let token = Some(asset);
            transfer_in(&token, caller, amount)?;
            approve(&token, self.collaborators.router_id(), amount)?;
            let (pair, liquidity) =
                self.collaborators
                    .router()
                    .provision(token, amount, None, native_amount)?;
            transfer_out(&Some(pair), caller, liquidity)?;

            self.env().emit_event(LiquidityProvided {
                pair,
                asset,
                amount,
                native_amount,
                liquidity,
            });
            Ok(liquidity)
        }

        #[ink(message)]
        fn set_router(&mut self, router: AccountId) -> Result<(), PresaleError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            if self.sale.totals().liquidity_added {
                return Err(PresaleError::AlreadySeeded);
            }

            self.collaborators.set_router(&router);
            self.env().emit_event(RouterChanged { router });
            Ok(())
        }

        #[ink(message)]
        fn set_schedule(
            &mut self,
            start_time: Timestamp,
            duration: Timestamp,
        ) -> Result<(), PresaleError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;

            self.sale
                .set_schedule(start_time, duration, self.env().block_timestamp())?;
            self.env().emit_event(ScheduleChanged {
                start_time,
                duration,
            });
            Ok(())
        }
    }

    impl PresaleView for PresaleContract {
        #[ink(message)]
        fn total_investable(&self, account: AccountId) -> Balance {
            total_investable(
                &self.collaborators.stake_pool(),
                self.sale.params().hard_cap,
                &account,
            )
            .unwrap_or_default()
        }

        #[ink(message)]
        fn investable(&self, account: AccountId) -> Balance {
            self.sale
                .investable(&account, PresaleView::total_investable(self, account))
        }

        #[ink(message)]
        fn claimable(&self, account: AccountId) -> Balance {
            self.sale.claimable(&account).unwrap_or_default()
        }

        #[ink(message)]
        fn invested(&self, account: AccountId) -> Balance {
            self.sale.investment(&account).invested
        }

        #[ink(message)]
        fn investment_of(&self, account: AccountId) -> Investment {
            self.sale.investment(&account)
        }

        #[ink(message)]
        fn investors(&self) -> Vec<AccountId> {
            self.investors.all()
        }

        #[ink(message)]
        fn investor_count(&self) -> u32 {
            self.investors.count()
        }

        #[ink(message)]
        fn investor_at(&self, index: u32) -> Option<AccountId> {
            self.investors.at(index)
        }

        #[ink(message)]
        fn phase(&self) -> SalePhase {
            self.sale.phase(self.env().block_timestamp())
        }

        #[ink(message)]
        fn sale_params(&self) -> SaleParams {
            self.sale.params()
        }

        #[ink(message)]
        fn sale_totals(&self) -> SaleTotals {
            self.sale.totals()
        }

        #[ink(message)]
        fn native_value(&self, asset: Option<AccountId>, amount: Balance) -> Balance {
            native_value(&self.collaborators.router(), asset, amount)
        }

        #[ink(message)]
        fn required_want_amount(&self, use_native_value: bool) -> Result<Balance, PresaleError> {
            let plan = plan_liquidity(
                &self.collaborators.router(),
                &self.sale.params(),
                self.sale.totals().total_invested,
                use_native_value,
            )?;
            Ok(plan.want_amount)
        }

        #[ink(message)]
        fn liquidity_pair(&self) -> Option<AccountId> {
            self.sale.totals().liquidity_pair
        }

        #[ink(message)]
        fn supplied_liquidity(&self) -> Balance {
            self.sale.totals().supplied_liquidity
        }

        #[ink(message)]
        fn total_allocation(&self) -> u128 {
            StakeLedgerView::total_allocation(&self.collaborators.stake_pool())
        }

        #[ink(message)]
        fn residual_supply(&self) -> Balance {
            self.sale.residual_supply().unwrap_or_default()
        }

        #[ink(message)]
        fn stake_pool(&self) -> AccountId {
            self.collaborators.stake_pool_id()
        }

        #[ink(message)]
        fn locker(&self) -> AccountId {
            self.collaborators.locker_id()
        }

        #[ink(message)]
        fn router(&self) -> AccountId {
            self.collaborators.router_id()
        }
    }

}
