use ink::{prelude::vec::Vec, storage::Mapping};
use launchpad_common::{Asset, BalanceInfo, TimedBalance};
use pendzl::{
    math::errors::MathError,
    traits::{AccountId, Balance, Timestamp},
};

use crate::modules::locker::errors::LockerError;

#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct LocksData {
    records: Mapping<(AccountId, Asset), TimedBalance>,
    assets: Mapping<AccountId, Vec<Asset>>,
}

impl LocksData {
    pub fn record(&self, beneficiary: &AccountId, asset: &Asset) -> TimedBalance {
        self.records.get((*beneficiary, *asset)).unwrap_or_default()
    }

    pub fn balance_of(
        &self,
        beneficiary: &AccountId,
        asset: &Asset,
        now: Timestamp,
    ) -> Result<BalanceInfo, MathError> {
        self.record(beneficiary, asset).info(now)
    }

    pub fn assets_of(&self, beneficiary: &AccountId) -> Vec<Asset> {
        self.assets.get(beneficiary).unwrap_or_default()
    }

    /// Credits `amount` to the record and returns the updated record.
    pub fn lock(
        &mut self,
        beneficiary: &AccountId,
        asset: &Asset,
        amount: Balance,
        duration: Timestamp,
        now: Timestamp,
    ) -> Result<TimedBalance, LockerError> {
        if amount == 0 {
            return Err(LockerError::InvalidParameter);
        }

        let mut record = self.record(beneficiary, asset);
        record.credit(amount, duration, now)?;
        self.records.insert((*beneficiary, *asset), &record);

        let mut assets = self.assets_of(beneficiary);
        if !assets.contains(asset) {
            assets.push(*asset);
            self.assets.insert(beneficiary, &assets);
        }

        Ok(record)
    }

    /// Removes the whole matured balance from the record and returns it.
    pub fn release_unlocked(
        &mut self,
        beneficiary: &AccountId,
        asset: &Asset,
        now: Timestamp,
    ) -> Result<Balance, LockerError> {
        let mut record = self.record(beneficiary, asset).effective(now)?;
        let amount = record.unlocked;
        if amount == 0 {
            return Err(LockerError::NothingUnlocked);
        }

        record.debit_unlocked(amount, now)?;
        if record.is_empty() {
            self.records.remove((*beneficiary, *asset));
        } else {
            self.records.insert((*beneficiary, *asset), &record);
        }
        Ok(amount)
    }
}
