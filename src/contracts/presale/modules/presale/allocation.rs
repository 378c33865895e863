use ink::codegen::TraitCallBuilder;
use ink::primitives::AccountId;
use launchpad_stake_pool::{StakePoolView, StakePoolViewRef, Tier, TierId};
use pendzl::{
    math::{
        errors::MathError,
        operations::{mul_div, Rounding},
    },
    traits::Balance,
};

/// Read access to the stake ledger needed to size investments.
pub trait StakeLedgerView {
    fn tier_count(&self) -> TierId;
    fn tier(&self, tier_id: TierId) -> Option<Tier>;
    fn total_allocation(&self) -> u128;
    fn unlocked_of(&self, tier_id: TierId, account: &AccountId) -> Balance;
    fn total_available(&self, tier_id: TierId) -> Balance;
}

/// Stake ledger read from a deployed stake pool.
pub struct PoolLedger(pub StakePoolViewRef);

impl From<AccountId> for PoolLedger {
    fn from(stake_pool: AccountId) -> Self {
        Self(stake_pool.into())
    }
}

impl StakeLedgerView for PoolLedger {
    fn tier_count(&self) -> TierId {
        self.0.call().tier_count().call_v1().invoke()
    }

    fn tier(&self, tier_id: TierId) -> Option<Tier> {
        self.0.call().tier(tier_id).call_v1().invoke()
    }

    fn total_allocation(&self) -> u128 {
        self.0.call().total_allocation().call_v1().invoke()
    }

    fn unlocked_of(&self, tier_id: TierId, account: &AccountId) -> Balance {
        self.0
            .call()
            .balance_of(tier_id, *account)
            .call_v1()
            .invoke()
            .unlocked
    }

    fn total_available(&self, tier_id: TierId) -> Balance {
        self.0.call().total_available(tier_id).call_v1().invoke()
    }
}

/// Sum over tiers of `hard_cap * allocation / total_allocation * unlocked / total_available`.
///
/// Each tier's cap is split between its stakers by unlocked stake; tiers nobody has unlocked stake in contribute nothing.
pub fn total_investable<L: StakeLedgerView>(
    ledger: &L,
    hard_cap: Balance,
    account: &AccountId,
) -> Result<Balance, MathError> {
    let total_allocation = ledger.total_allocation();
    if total_allocation == 0 {
        return Ok(0);
    }

    let mut investable: Balance = 0;
    for tier_id in 0..ledger.tier_count() {
        let Some(tier) = ledger.tier(tier_id) else {
            continue;
        };
        let unlocked = ledger.unlocked_of(tier_id, account);
        if unlocked == 0 || tier.allocation == 0 {
            continue;
        }
        let available = ledger.total_available(tier_id);
        if available == 0 {
            continue;
        }

        let tier_cap = mul_div(hard_cap, tier.allocation, total_allocation, Rounding::Down)?;
        let share = mul_div(tier_cap, unlocked, available, Rounding::Down)?;
        ink::env::debug_println!(
            "tier {}: cap {} unlocked {}/{} -> {}",
            tier_id,
            tier_cap,
            unlocked,
            available,
            share
        );
        investable = investable.checked_add(share).ok_or(MathError::Overflow)?;
    }
    Ok(investable)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ink::prelude::{collections::BTreeMap, vec::Vec};

    /// In-memory ledger with already matured stakes.
    #[derive(Default)]
    pub(crate) struct TestLedger {
        tiers: Vec<Tier>,
        unlocked: BTreeMap<(TierId, AccountId), Balance>,
    }

    impl TestLedger {
        pub(crate) fn with_allocations(allocations: &[u128]) -> Self {
            Self {
                tiers: allocations
                    .iter()
                    .map(|allocation| Tier {
                        unit_amount: 1,
                        allocation: *allocation,
                        lock_duration: 0,
                    })
                    .collect(),
                unlocked: Default::default(),
            }
        }

        pub(crate) fn stake(&mut self, tier_id: TierId, account: AccountId, amount: Balance) {
            *self.unlocked.entry((tier_id, account)).or_default() += amount;
        }
    }

    impl StakeLedgerView for TestLedger {
        fn tier_count(&self) -> TierId {
            self.tiers.len() as TierId
        }

        fn tier(&self, tier_id: TierId) -> Option<Tier> {
            self.tiers.get(tier_id as usize).copied()
        }

        fn total_allocation(&self) -> u128 {
            self.tiers.iter().map(|tier| tier.allocation).sum()
        }

        fn unlocked_of(&self, tier_id: TierId, account: &AccountId) -> Balance {
            self.unlocked
                .get(&(tier_id, *account))
                .copied()
                .unwrap_or_default()
        }

        fn total_available(&self, tier_id: TierId) -> Balance {
            self.unlocked
                .iter()
                .filter(|((id, _), _)| *id == tier_id)
                .map(|(_, amount)| *amount)
                .sum()
        }
    }

    fn account(byte: u8) -> AccountId {
        AccountId::from([byte; 32])
    }

    #[test]
    fn investable_follows_tier_weights_and_stake_shares() {
        let hard_cap: Balance = 100_000;
        let mut ledger = TestLedger::with_allocations(&[10, 15]);
        ledger.stake(0, account(1), 200);
        ledger.stake(0, account(2), 800);
        ledger.stake(1, account(1), 3_000);
        ledger.stake(1, account(3), 1_000);

        // 100_000 * 10 / 25 * 200 / 1_000 + 100_000 * 15 / 25 * 3_000 / 4_000
        assert_eq!(
            total_investable(&ledger, hard_cap, &account(1)),
            Ok(8_000 + 45_000)
        );
        assert_eq!(total_investable(&ledger, hard_cap, &account(2)), Ok(32_000));
        assert_eq!(total_investable(&ledger, hard_cap, &account(3)), Ok(15_000));
    }

    #[test]
    fn investable_is_zero_without_stake_or_allocation() {
        let mut ledger = TestLedger::with_allocations(&[0, 0]);
        ledger.stake(0, account(1), 500);
        assert_eq!(total_investable(&ledger, 1_000, &account(1)), Ok(0));

        let ledger = TestLedger::with_allocations(&[10]);
        assert_eq!(total_investable(&ledger, 1_000, &account(1)), Ok(0));
    }

    #[test]
    fn investable_reacts_to_other_stakers() {
        let mut ledger = TestLedger::with_allocations(&[1]);
        ledger.stake(0, account(1), 100);
        assert_eq!(total_investable(&ledger, 1_000, &account(1)), Ok(1_000));

        ledger.stake(0, account(2), 300);
        assert_eq!(total_investable(&ledger, 1_000, &account(1)), Ok(250));
    }

    #[test]
    fn single_staker_in_every_tier_can_fill_hard_cap() {
        let mut ledger = TestLedger::with_allocations(&[10, 15]);
        ledger.stake(0, account(1), 1);
        ledger.stake(1, account(1), 1);
        assert_eq!(total_investable(&ledger, 5_000, &account(1)), Ok(5_000));
    }
}
