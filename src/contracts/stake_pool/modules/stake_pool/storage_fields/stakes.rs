use ink::{prelude::vec::Vec, primitives::AccountId, storage::Mapping};
use launchpad_common::{BalanceInfo, TimedBalance};
use pendzl::{
    math::errors::MathError,
    traits::{Balance, Timestamp},
};

use crate::modules::stake_pool::{errors::StakePoolError, structs::TierId};

#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct StakesData {
    #[lazy]
    total_supply: Balance,
    balances: Mapping<(TierId, AccountId), TimedBalance>,
    /// Participants with a non zero stake, per tier.
    users: Mapping<TierId, Vec<AccountId>>,
}

impl StakesData {
    pub fn total_supply(&self) -> Balance {
        self.total_supply.get().unwrap_or_default()
    }

    fn stored(&self, tier_id: TierId, account: &AccountId) -> TimedBalance {
        self.balances.get((tier_id, *account)).unwrap_or_default()
    }

    pub fn balance_of(
        &self,
        tier_id: TierId,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<BalanceInfo, MathError> {
        self.stored(tier_id, account).info(now)
    }

    pub fn unlocked(
        &self,
        tier_id: TierId,
        account: &AccountId,
        now: Timestamp,
    ) -> Result<Balance, MathError> {
        Ok(self.stored(tier_id, account).effective(now)?.unlocked)
    }

    pub fn users(&self, tier_id: TierId) -> Vec<AccountId> {
        self.users.get(tier_id).unwrap_or_default()
    }

    pub fn user_count(&self, tier_id: TierId) -> u32 {
        self.users(tier_id).len() as u32
    }

    pub fn total_available(&self, tier_id: TierId, now: Timestamp) -> Result<Balance, MathError> {
        let mut total: Balance = 0;
        for user in self.users(tier_id) {
            total = total
                .checked_add(self.unlocked(tier_id, &user, now)?)
                .ok_or(MathError::Overflow)?;
        }
        Ok(total)
    }

    /// Credits `amount` to the stake of `account` and returns the updated stake.
    pub fn stake(
        &mut self,
        tier_id: TierId,
        account: &AccountId,
        amount: Balance,
        lock_duration: Timestamp,
        now: Timestamp,
    ) -> Result<TimedBalance, StakePoolError> {
        let mut balance = self.stored(tier_id, account);
        let first_stake = balance.is_empty();
        balance.credit(amount, lock_duration, now)?;

        let total_supply = self
            .total_supply()
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;

        self.balances.insert((tier_id, *account), &balance);
        self.total_supply.set(&total_supply);
        if first_stake {
            let mut users = self.users(tier_id);
            users.push(*account);
            self.users.insert(tier_id, &users);
        }
        Ok(balance)
    }

    /// Debits `amount` from the unlocked stake of `account`. A stake that drops to zero leaves the tier's user list.
    pub fn withdraw(
        &mut self,
        tier_id: TierId,
        account: &AccountId,
        amount: Balance,
        now: Timestamp,
    ) -> Result<(), StakePoolError> {
        let mut balance = self.stored(tier_id, account).effective(now)?;
        if amount > balance.unlocked {
            return Err(StakePoolError::InsufficientUnlocked);
        }
        balance.debit_unlocked(amount, now)?;

        let total_supply = self
            .total_supply()
            .checked_sub(amount)
            .ok_or(MathError::Underflow)?;
        self.total_supply.set(&total_supply);

        if balance.is_empty() {
            self.balances.remove((tier_id, *account));
            let mut users = self.users(tier_id);
            users.retain(|user| user != account);
            self.users.insert(tier_id, &users);
        } else {
            self.balances.insert((tier_id, *account), &balance);
        }
        Ok(())
    }
}
