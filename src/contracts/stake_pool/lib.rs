// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod modules;

pub use modules::stake_pool::{
    errors::StakePoolError,
    structs::{Tier, TierId},
    traits::{StakePool, StakePoolManage, StakePoolView, StakePoolViewRef},
};

/// Tiered stake ledger.
/// Participants stake the stake token into tiers. Each tier carries an allocation weight that decides
/// which share of a sale's capacity the tier's stakers are entitled to invest.
#[pendzl::implementation(AccessControl)]
#[ink::contract]
pub mod stake_pool {
    use crate::modules::stake_pool::{
        errors::StakePoolError,
        events::{FeeRecipientChanged, Staked, TierAdded, TierUpdated, Withdrawn},
        storage_fields::{config::PoolConfigData, stakes::StakesData, tiers::TiersData},
        structs::{Tier, TierId},
        traits::{StakePool, StakePoolManage, StakePoolView},
    };
    use ink::prelude::vec::Vec;
    use launchpad_common::{
        asset::{transfer_in, transfer_out},
        BalanceInfo,
    };

    const ADMIN: RoleType = 0;

    #[ink(storage)]
    #[derive(StorageFieldGetter)]
    pub struct StakePoolContract {
        #[storage_field]
        access: AccessControlData,
        #[storage_field]
        tiers: TiersData,
        #[storage_field]
        stakes: StakesData,
        #[storage_field]
        config: PoolConfigData,
    }

    impl StakePoolContract {
        /// `initial_tiers` are `(unit_amount, allocation, lock_duration)` added in order.
        #[ink(constructor)]
        pub fn new(
            stake_token: AccountId,
            fee_recipient: AccountId,
            initial_tiers: Vec<(Balance, u128, Timestamp)>,
        ) -> Result<Self, StakePoolError> {
            let mut instance = Self {
                access: AccessControlData::new(Some(Self::env().caller())),
                tiers: Default::default(),
                stakes: Default::default(),
                config: PoolConfigData::new(&stake_token, &fee_recipient),
            };

            for (unit_amount, allocation, lock_duration) in initial_tiers {
                instance._add_tier(Tier {
                    unit_amount,
                    allocation,
                    lock_duration,
                })?;
            }

            Ok(instance)
        }

        fn _add_tier(&mut self, tier: Tier) -> Result<TierId, StakePoolError> {
            let tier_id = self.tiers.add_tier(&tier)?;
            Self::env().emit_event(TierAdded {
                tier_id,
                unit_amount: tier.unit_amount,
                allocation: tier.allocation,
                lock_duration: tier.lock_duration,
            });
            Ok(tier_id)
        }

        fn _emit_tier_updated(&self, tier_id: TierId, tier: Tier) {
            self.env().emit_event(TierUpdated {
                tier_id,
                unit_amount: tier.unit_amount,
                allocation: tier.allocation,
                lock_duration: tier.lock_duration,
            });
        }

        fn _withdraw(
            &mut self,
            account: AccountId,
            tier_id: TierId,
            amount: Balance,
        ) -> Result<Balance, StakePoolError> {
            self.stakes
                .withdraw(tier_id, &account, amount, self.env().block_timestamp())?;

            let (fee, rest) = self.config.split_fee(amount)?;
            ink::env::debug_println!("withdraw {} from tier {}: fee {}", amount, tier_id, fee);

            let stake_token = Some(self.config.stake_token());
            transfer_out(&stake_token, self.config.fee_recipient(), fee)?;
            transfer_out(&stake_token, account, rest)?;

            self.env().emit_event(Withdrawn {
                tier_id,
                account,
                amount,
                fee,
            });
            Ok(rest)
        }
    }

    impl StakePool for StakePoolContract {
        #[ink(message)]
        fn stake(&mut self, tier_id: TierId, amount: Balance) -> Result<Balance, StakePoolError> {
            let tier = self.tiers.tier_or_err(tier_id)?;
            let amount = tier.floor_stake(amount)?;

            let account = self.env().caller();
            let balance = self.stakes.stake(
                tier_id,
                &account,
                amount,
                tier.lock_duration,
                self.env().block_timestamp(),
            )?;

            transfer_in(&Some(self.config.stake_token()), account, amount)?;

            self.env().emit_event(Staked {
                tier_id,
                account,
                amount,
                unlock_time: balance.unlock_time,
            });
            Ok(amount)
        }

        #[ink(message)]
        fn withdraw(&mut self, tier_id: TierId, amount: Balance) -> Result<Balance, StakePoolError> {
            self.tiers.tier_or_err(tier_id)?;
            if amount == 0 {
                return Err(StakePoolError::InvalidParameter);
            }
            self._withdraw(self.env().caller(), tier_id, amount)
        }

        #[ink(message)]
        fn withdraw_all(&mut self, tier_id: TierId) -> Result<Balance, StakePoolError> {
            self.tiers.tier_or_err(tier_id)?;
            let account = self.env().caller();
            let unlocked = self
                .stakes
                .unlocked(tier_id, &account, self.env().block_timestamp())?;
            if unlocked == 0 {
                return Ok(0);
            }
            self._withdraw(account, tier_id, unlocked)
        }
    }

    impl StakePoolManage for StakePoolContract {
        #[ink(message)]
        fn add_tier(
            &mut self,
            unit_amount: Balance,
            allocation: u128,
            lock_duration: Timestamp,
        ) -> Result<TierId, StakePoolError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            self._add_tier(Tier {
                unit_amount,
                allocation,
                lock_duration,
            })
        }

        #[ink(message)]
        fn set_allocation(&mut self, tier_id: TierId, allocation: u128) -> Result<(), StakePoolError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            let tier = self.tiers.set_allocation(tier_id, allocation)?;
            self._emit_tier_updated(tier_id, tier);
            Ok(())
        }

        #[ink(message)]
        fn set_unit_amount(
            &mut self,
            tier_id: TierId,
            unit_amount: Balance,
        ) -> Result<(), StakePoolError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            let tier = self.tiers.set_unit_amount(tier_id, unit_amount)?;
            self._emit_tier_updated(tier_id, tier);
            Ok(())
        }

        #[ink(message)]
        fn set_lock_duration(
            &mut self,
            tier_id: TierId,
            lock_duration: Timestamp,
        ) -> Result<(), StakePoolError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            let tier = self.tiers.set_lock_duration(tier_id, lock_duration)?;
            self._emit_tier_updated(tier_id, tier);
            Ok(())
        }

        #[ink(message)]
        fn set_withdrawal_fee(&mut self, fee_bps: u16) -> Result<(), StakePoolError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            self.config.set_withdrawal_fee_bps(fee_bps)
        }

        #[ink(message)]
        fn set_fee_recipient(&mut self, recipient: AccountId) -> Result<(), StakePoolError> {
            self._ensure_has_role(ADMIN, Some(self.env().caller()))?;
            self.config.set_fee_recipient(&recipient);
            self.env().emit_event(FeeRecipientChanged { recipient });
            Ok(())
        }
    }

    impl StakePoolView for StakePoolContract {
        #[ink(message)]
        fn tier_count(&self) -> TierId {
            self.tiers.tier_count()
        }

        #[ink(message)]
        fn tier(&self, tier_id: TierId) -> Option<Tier> {
            self.tiers.tier(tier_id)
        }

        #[ink(message)]
        fn total_allocation(&self) -> u128 {
            self.tiers.total_allocation()
        }

        #[ink(message)]
        fn balance_of(&self, tier_id: TierId, account: AccountId) -> BalanceInfo {
            self.stakes
                .balance_of(tier_id, &account, self.env().block_timestamp())
                .unwrap_or_default()
        }

        #[ink(message)]
        fn total_available(&self, tier_id: TierId) -> Balance {
            // bounded by total_supply, so the sum can't overflow
            self.stakes
                .total_available(tier_id, self.env().block_timestamp())
                .unwrap_or_default()
        }

        #[ink(message)]
        fn user_count(&self, tier_id: TierId) -> u32 {
            self.stakes.user_count(tier_id)
        }

        #[ink(message)]
        fn users(&self, tier_id: TierId) -> Vec<AccountId> {
            self.stakes.users(tier_id)
        }

        #[ink(message)]
        fn total_supply(&self) -> Balance {
            self.stakes.total_supply()
        }

        #[ink(message)]
        fn stake_token(&self) -> AccountId {
            self.config.stake_token()
        }

        #[ink(message)]
        fn withdrawal_fee(&self) -> u16 {
            self.config.withdrawal_fee_bps()
        }

        #[ink(message)]
        fn fee_recipient(&self) -> AccountId {
            self.config.fee_recipient()
        }
    }

}
