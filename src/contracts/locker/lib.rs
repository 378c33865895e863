// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod modules;

pub use modules::locker::{
    errors::LockerError,
    traits::{Locker, LockerRef, LockerView},
};

/// Time-lock vault.
/// Anyone can lock PSP22 tokens or native coin for any beneficiary. Only the beneficiary can take the funds out,
/// and only the part whose unlock time has passed.
/// The vault doesn't care why a lock was created - the Presale uses it to lock the seeded liquidity for its keeper.
#[ink::contract]
pub mod locker {
    use crate::modules::locker::{
        errors::LockerError,
        events::{Locked, Unlocked},
        storage_fields::locks::LocksData,
        traits::{Locker, LockerView},
    };
    use ink::prelude::vec::Vec;
    use launchpad_common::{
        asset::{transfer_in, transfer_out},
        BalanceInfo,
    };

    #[ink(storage)]
    #[derive(Default)]
    pub struct LockerContract {
        locks: LocksData,
    }

    impl LockerContract {
        #[ink(constructor)]
        pub fn new() -> Self {
            Default::default()
        }
    }

    impl Locker for LockerContract {
        #[ink(message, payable)]
        fn lock(
            &mut self,
            asset: Option<AccountId>,
            amount: Balance,
            beneficiary: AccountId,
            duration: Timestamp,
        ) -> Result<(), LockerError> {
            // native coin sent along a token lock would be stranded
            if asset.is_some() && self.env().transferred_value() != 0 {
                return Err(LockerError::InvalidParameter);
            }

            let locker = self.env().caller();
            let record = self.locks.lock(
                &beneficiary,
                &asset,
                amount,
                duration,
                self.env().block_timestamp(),
            )?;

            transfer_in(&asset, locker, amount)?;

            self.env().emit_event(Locked {
                beneficiary,
                asset,
                locker,
                amount,
                unlock_time: record.unlock_time,
            });
            Ok(())
        }

        #[ink(message)]
        fn unlock(&mut self, asset: Option<AccountId>) -> Result<Balance, LockerError> {
            let beneficiary = self.env().caller();
            let amount =
                self.locks
                    .release_unlocked(&beneficiary, &asset, self.env().block_timestamp())?;

            ink::env::debug_println!("unlocking {} for {:?}", amount, beneficiary);
            transfer_out(&asset, beneficiary, amount)?;

            self.env().emit_event(Unlocked {
                beneficiary,
                asset,
                amount,
            });
            Ok(amount)
        }
    }

    impl LockerView for LockerContract {
        #[ink(message)]
        fn balance_of(&self, beneficiary: AccountId, asset: Option<AccountId>) -> BalanceInfo {
            self.locks
                .balance_of(&beneficiary, &asset, self.env().block_timestamp())
                .unwrap_or_default()
        }

        #[ink(message)]
        fn assets_of(&self, beneficiary: AccountId) -> Vec<Option<AccountId>> {
            self.locks.assets_of(&beneficiary)
        }
    }

}
