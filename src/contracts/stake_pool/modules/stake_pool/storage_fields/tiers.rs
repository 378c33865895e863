use ink::storage::Mapping;
use pendzl::{
    math::errors::MathError,
    traits::{Balance, Timestamp},
};

use crate::modules::stake_pool::{
    errors::StakePoolError,
    structs::{Tier, TierId},
};

/// Append-only tier table. `total_allocation` always equals the sum of the tiers' allocations.
#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct TiersData {
    #[lazy]
    tier_count: TierId,
    #[lazy]
    total_allocation: u128,
    tiers: Mapping<TierId, Tier>,
}

impl TiersData {
    pub fn tier_count(&self) -> TierId {
        self.tier_count.get().unwrap_or_default()
    }

    pub fn total_allocation(&self) -> u128 {
        self.total_allocation.get().unwrap_or_default()
    }

    pub fn tier(&self, tier_id: TierId) -> Option<Tier> {
        self.tiers.get(tier_id)
    }

    pub fn tier_or_err(&self, tier_id: TierId) -> Result<Tier, StakePoolError> {
        self.tier(tier_id).ok_or(StakePoolError::NotFound)
    }

    pub fn add_tier(&mut self, tier: &Tier) -> Result<TierId, StakePoolError> {
        if tier.unit_amount == 0 {
            return Err(StakePoolError::InvalidParameter);
        }

        let tier_id = self.tier_count();
        let total_allocation = self
            .total_allocation()
            .checked_add(tier.allocation)
            .ok_or(MathError::Overflow)?;

        self.tiers.insert(tier_id, tier);
        self.total_allocation.set(&total_allocation);
        self.tier_count
            .set(&(tier_id.checked_add(1).ok_or(MathError::Overflow)?));
        Ok(tier_id)
    }

    pub fn set_allocation(
        &mut self,
        tier_id: TierId,
        allocation: u128,
    ) -> Result<Tier, StakePoolError> {
        let mut tier = self.tier_or_err(tier_id)?;
        let total_allocation = self
            .total_allocation()
            .checked_sub(tier.allocation)
            .ok_or(MathError::Underflow)?
            .checked_add(allocation)
            .ok_or(MathError::Overflow)?;

        tier.allocation = allocation;
        self.tiers.insert(tier_id, &tier);
        self.total_allocation.set(&total_allocation);
        Ok(tier)
    }

    pub fn set_unit_amount(
        &mut self,
        tier_id: TierId,
        unit_amount: Balance,
    ) -> Result<Tier, StakePoolError> {
        if unit_amount == 0 {
            return Err(StakePoolError::InvalidParameter);
        }
        let mut tier = self.tier_or_err(tier_id)?;
        tier.unit_amount = unit_amount;
        self.tiers.insert(tier_id, &tier);
        Ok(tier)
    }

    pub fn set_lock_duration(
        &mut self,
        tier_id: TierId,
        lock_duration: Timestamp,
    ) -> Result<Tier, StakePoolError> {
        let mut tier = self.tier_or_err(tier_id)?;
        tier.lock_duration = lock_duration;
        self.tiers.insert(tier_id, &tier);
        Ok(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(unit_amount: Balance, allocation: u128) -> Tier {
        Tier {
            unit_amount,
            allocation,
            lock_duration: 0,
        }
    }

    fn allocation_sum(tiers: &TiersData) -> u128 {
        (0..tiers.tier_count())
            .filter_map(|id| tiers.tier(id))
            .map(|tier| tier.allocation)
            .sum()
    }

    #[ink::test]
    fn tiers_get_consecutive_ids() {
        let mut tiers = TiersData::default();
        assert_eq!(tiers.add_tier(&tier(100, 10)), Ok(0));
        assert_eq!(tiers.add_tier(&tier(200, 15)), Ok(1));

        assert_eq!(tiers.tier_count(), 2);
        assert_eq!(tiers.tier(1), Some(tier(200, 15)));
        assert_eq!(tiers.tier(2), None);
    }

    #[ink::test]
    fn total_allocation_tracks_every_edit() {
        let mut tiers = TiersData::default();
        tiers.add_tier(&tier(1, 10)).unwrap();
        tiers.add_tier(&tier(1, 15)).unwrap();
        tiers.add_tier(&tier(1, 0)).unwrap();
        assert_eq!(tiers.total_allocation(), 25);

        tiers.set_allocation(0, 4).unwrap();
        tiers.set_allocation(2, 31).unwrap();
        tiers.set_allocation(1, 0).unwrap();

        assert_eq!(tiers.total_allocation(), 35);
        assert_eq!(tiers.total_allocation(), allocation_sum(&tiers));
    }

    #[ink::test]
    fn zero_unit_amount_is_rejected() {
        let mut tiers = TiersData::default();
        assert_eq!(
            tiers.add_tier(&tier(0, 10)),
            Err(StakePoolError::InvalidParameter)
        );
        tiers.add_tier(&tier(5, 10)).unwrap();
        assert_eq!(
            tiers.set_unit_amount(0, 0),
            Err(StakePoolError::InvalidParameter)
        );
        assert_eq!(tiers.tier(0).map(|t| t.unit_amount), Some(5));
    }

    #[ink::test]
    fn unknown_tier_is_not_found() {
        let mut tiers = TiersData::default();
        assert_eq!(tiers.set_allocation(0, 1), Err(StakePoolError::NotFound));
        assert_eq!(tiers.set_unit_amount(3, 1), Err(StakePoolError::NotFound));
        assert_eq!(tiers.set_lock_duration(0, 1), Err(StakePoolError::NotFound));
        assert_eq!(tiers.total_allocation(), 0);
    }
}
