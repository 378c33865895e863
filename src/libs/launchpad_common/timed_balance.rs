use pendzl::{
    math::errors::MathError,
    traits::{Balance, Timestamp},
};

/// Stored record of a balance whose `locked` part matures at `unlock_time`.
///
/// The record is never migrated eagerly: every read and write goes through
/// [`TimedBalance::effective`], which moves the locked part into `unlocked`
/// once `now` has reached `unlock_time`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct TimedBalance {
    pub locked: Balance,
    pub unlocked: Balance,
    pub unlock_time: Timestamp,
}

/// Snapshot returned to callers. `total == locked + unlocked`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct BalanceInfo {
    pub total: Balance,
    pub locked: Balance,
    pub unlocked: Balance,
    pub unlock_time: Timestamp,
}

impl TimedBalance {
    pub fn total(&self) -> Result<Balance, MathError> {
        self.locked
            .checked_add(self.unlocked)
            .ok_or(MathError::Overflow)
    }

    pub fn is_empty(&self) -> bool {
        self.locked == 0 && self.unlocked == 0
    }

    /// Returns the record as seen at `now`.
    pub fn effective(&self, now: Timestamp) -> Result<Self, MathError> {
        if self.locked == 0 || now < self.unlock_time {
            return Ok(*self);
        }
        Ok(Self {
            locked: 0,
            unlocked: self.total()?,
            unlock_time: self.unlock_time,
        })
    }

    pub fn info(&self, now: Timestamp) -> Result<BalanceInfo, MathError> {
        let effective = self.effective(now)?;
        Ok(BalanceInfo {
            total: effective.total()?,
            locked: effective.locked,
            unlocked: effective.unlocked,
            unlock_time: effective.unlock_time,
        })
    }

    /// Credits `amount` at `now`.
    ///
    /// With a non zero `lock_duration` the whole locked part (old and new)
    /// becomes claimable at `now + lock_duration`.
    pub fn credit(
        &mut self,
        amount: Balance,
        lock_duration: Timestamp,
        now: Timestamp,
    ) -> Result<(), MathError> {
        let mut updated = self.effective(now)?;
        if lock_duration == 0 {
            updated.unlocked = updated
                .unlocked
                .checked_add(amount)
                .ok_or(MathError::Overflow)?;
        } else {
            updated.locked = updated
                .locked
                .checked_add(amount)
                .ok_or(MathError::Overflow)?;
            updated.unlock_time = now.checked_add(lock_duration).ok_or(MathError::Overflow)?;
        }
        // keeps total representable
        updated.total()?;
        *self = updated;
        Ok(())
    }

    /// Debits `amount` from the unlocked part. Callers check availability
    /// first; `Underflow` means `amount` exceeded the matured balance.
    pub fn debit_unlocked(&mut self, amount: Balance, now: Timestamp) -> Result<(), MathError> {
        let mut updated = self.effective(now)?;
        updated.unlocked = updated
            .unlocked
            .checked_sub(amount)
            .ok_or(MathError::Underflow)?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_without_duration_is_unlocked() {
        let mut balance = TimedBalance::default();
        balance.credit(100, 0, 1_000).unwrap();

        let info = balance.info(1_000).unwrap();
        assert_eq!(info.total, 100);
        assert_eq!(info.locked, 0);
        assert_eq!(info.unlocked, 100);
    }

    #[test]
    fn locked_part_matures_lazily() {
        let mut balance = TimedBalance::default();
        balance.credit(100, 50, 1_000).unwrap();

        assert_eq!(balance.info(1_049).unwrap().locked, 100);
        assert_eq!(balance.info(1_049).unwrap().unlocked, 0);

        let matured = balance.info(1_050).unwrap();
        assert_eq!(matured.locked, 0);
        assert_eq!(matured.unlocked, 100);
        // stored record is untouched by reads
        assert_eq!(balance.locked, 100);
    }

    #[test]
    fn new_lock_resets_clock_of_whole_locked_part() {
        let mut balance = TimedBalance::default();
        balance.credit(1_000, 100, 0).unwrap();
        balance.credit(1, 100, 90).unwrap();

        let info = balance.info(150).unwrap();
        assert_eq!(info.locked, 1_001);
        assert_eq!(info.unlocked, 0);
        assert_eq!(info.unlock_time, 190);
    }

    #[test]
    fn credit_after_maturity_keeps_matured_part_unlocked() {
        let mut balance = TimedBalance::default();
        balance.credit(1_000, 100, 0).unwrap();
        balance.credit(10, 100, 200).unwrap();

        let info = balance.info(200).unwrap();
        assert_eq!(info.unlocked, 1_000);
        assert_eq!(info.locked, 10);
        assert_eq!(info.total, 1_010);
    }

    #[test]
    fn unlocked_credit_does_not_touch_lock_clock() {
        let mut balance = TimedBalance::default();
        balance.credit(500, 100, 0).unwrap();
        balance.credit(20, 0, 10).unwrap();

        let info = balance.info(10).unwrap();
        assert_eq!(info.locked, 500);
        assert_eq!(info.unlocked, 20);
        assert_eq!(info.unlock_time, 100);
    }

    #[test]
    fn debit_only_touches_unlocked() {
        let mut balance = TimedBalance::default();
        balance.credit(300, 100, 0).unwrap();
        balance.credit(50, 0, 0).unwrap();

        assert_eq!(balance.debit_unlocked(51, 10), Err(MathError::Underflow));
        balance.debit_unlocked(50, 10).unwrap();
        assert_eq!(balance.info(10).unwrap().total, 300);

        balance.debit_unlocked(300, 100).unwrap();
        assert!(balance.is_empty());
    }

    #[test]
    fn total_always_equals_locked_plus_unlocked() {
        let mut balance = TimedBalance::default();
        let steps: [(Balance, Timestamp, Timestamp); 5] =
            [(10, 5, 0), (7, 0, 1), (3, 9, 4), (11, 0, 20), (2, 1, 21)];
        for (amount, duration, now) in steps {
            balance.credit(amount, duration, now).unwrap();
            for at in [now, now + 1, now + 10] {
                let info = balance.info(at).unwrap();
                assert_eq!(info.total, info.locked + info.unlocked);
            }
        }
    }

    #[test]
    fn credit_rejects_overflowing_total() {
        let mut balance = TimedBalance::default();
        balance.credit(u128::MAX, 0, 0).unwrap();
        assert_eq!(balance.credit(1, 10, 0), Err(MathError::Overflow));
        assert_eq!(balance.unlocked, u128::MAX);
        assert_eq!(balance.locked, 0);
    }
}
