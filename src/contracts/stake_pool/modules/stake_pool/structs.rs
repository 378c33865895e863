use pendzl::{
    math::errors::MathError,
    traits::{Balance, Timestamp},
};

use super::errors::StakePoolError;

pub type TierId = u32;

/// One staking tier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Tier {
    /// Minimal stake and the step in which stakes are accepted.
    pub unit_amount: Balance,
    /// Relative share of the investable capacity of a sale.
    pub allocation: u128,
    /// How long (ms) a fresh stake stays locked.
    pub lock_duration: Timestamp,
}

impl Tier {
    /// Rounds `amount` down to whole units. The remainder is not taken from the staker.
    pub fn floor_stake(&self, amount: Balance) -> Result<Balance, StakePoolError> {
        let remainder = amount
            .checked_rem(self.unit_amount)
            .ok_or(MathError::DivByZero)?;
        match amount - remainder {
            0 => Err(StakePoolError::BelowMinimum),
            floored => Ok(floored),
        }
    }
}
