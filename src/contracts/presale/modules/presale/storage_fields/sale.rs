use ink::{primitives::AccountId, storage::Mapping};
use launchpad_common::math::{mul_bps, mul_mul_div_r_down};
use pendzl::{
    math::{
        errors::MathError,
        operations::{mul_div, Rounding},
    },
    traits::{Balance, Timestamp},
};

use crate::modules::presale::{
    errors::PresaleError,
    structs::{Investment, SaleParams, SalePhase, SaleTotals},
};

#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct SaleStorage {
    #[lazy]
    params: SaleParams,
    #[lazy]
    totals: SaleTotals,
    investments: Mapping<AccountId, Investment>,
}

impl SaleStorage {
    pub fn new(params: &SaleParams) -> Result<Self, PresaleError> {
        params.validate()?;
        let mut instance = Self::default();
        instance.params.set(params);
        Ok(instance)
    }
}

impl SaleStorage {
    pub fn params(&self) -> SaleParams {
        self.params.get().unwrap_or_default()
    }

    pub fn totals(&self) -> SaleTotals {
        self.totals.get().unwrap_or_default()
    }

    pub fn investment(&self, account: &AccountId) -> Investment {
        self.investments.get(account).unwrap_or_default()
    }

    pub fn phase(&self, now: Timestamp) -> SalePhase {
        self.params().phase(now)
    }

    pub fn ensure_open(&self, now: Timestamp) -> Result<(), PresaleError> {
        match self.phase(now) {
            SalePhase::Open => Ok(()),
            _ => Err(PresaleError::NotOpen),
        }
    }

    pub fn ensure_closed(&self, now: Timestamp) -> Result<(), PresaleError> {
        match self.phase(now) {
            SalePhase::Closed => Ok(()),
            _ => Err(PresaleError::NotClosed),
        }
    }

    pub fn set_schedule(
        &mut self,
        start_time: Timestamp,
        duration: Timestamp,
        now: Timestamp,
    ) -> Result<(), PresaleError> {
        let totals = self.totals();
        if totals.claim_enabled {
            return Err(PresaleError::ClaimAlreadyEnabled);
        }
        if totals.liquidity_added {
            return Err(PresaleError::AlreadySeeded);
        }
        // settlement amounts are taken from the totals at close
        if self.phase(now) == SalePhase::Closed {
            return Err(PresaleError::AlreadyClosed);
        }

        let mut params = self.params();
        params.start_time = start_time;
        params.duration = duration;
        params.validate()?;
        self.params.set(&params);
        Ok(())
    }

    /// Adds `amount` to the supply and returns the new total.
    pub fn deposit(&mut self, amount: Balance) -> Result<Balance, PresaleError> {
        let mut totals = self.totals();
        if totals.claim_enabled {
            return Err(PresaleError::ClaimAlreadyEnabled);
        }
        if amount == 0 {
            return Err(PresaleError::InvalidParameter);
        }
        totals.total_supply_deposited = totals
            .total_supply_deposited
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        self.totals.set(&totals);
        Ok(totals.total_supply_deposited)
    }

    /// Records an investment of `amount` by `account`, given what the account is allowed to invest.
    /// Returns `true` for the account's first investment.
    pub fn record_investment(
        &mut self,
        account: &AccountId,
        amount: Balance,
        investable: Balance,
        now: Timestamp,
    ) -> Result<bool, PresaleError> {
        self.ensure_open(now)?;
        if amount == 0 {
            return Err(PresaleError::InvalidParameter);
        }
        if amount > investable {
            return Err(PresaleError::ExceedsAllowance);
        }

        let params = self.params();
        let mut totals = self.totals();
        let total_invested = totals
            .total_invested
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        if total_invested > params.hard_cap {
            return Err(PresaleError::ExceedsHardCap);
        }

        let mut investment = self.investment(account);
        let first = investment.invested == 0;
        investment.invested = investment
            .invested
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        totals.total_invested = total_invested;

        self.investments.insert(account, &investment);
        self.totals.set(&totals);
        Ok(first)
    }

    /// What `investable` is left for an account with `total_investable`.
    pub fn investable(&self, account: &AccountId, total_investable: Balance) -> Balance {
        total_investable.saturating_sub(self.investment(account).invested)
    }

    /// `invested * supply * min(total_invested, hard_cap) / (hard_cap * total_invested)`
    pub fn entitlement(&self, invested: Balance) -> Result<Balance, MathError> {
        let params = self.params();
        let totals = self.totals();
        if totals.total_invested == 0 {
            return Ok(0);
        }
        mul_mul_div_r_down(
            invested,
            totals.total_supply_deposited,
            totals.total_invested.min(params.hard_cap),
            params.hard_cap,
            totals.total_invested,
        )
    }

    pub fn claimable(&self, account: &AccountId) -> Result<Balance, MathError> {
        let investment = self.investment(account);
        Ok(self
            .entitlement(investment.invested)?
            .saturating_sub(investment.claimed))
    }

    pub fn set_claim_enabled(&mut self, enabled: bool, now: Timestamp) -> Result<(), PresaleError> {
        self.ensure_closed(now)?;
        let mut totals = self.totals();
        totals.claim_enabled = enabled;
        self.totals.set(&totals);
        Ok(())
    }

    /// Marks everything claimable by `account` as claimed and returns the amount to pay out.
    pub fn record_claim(&mut self, account: &AccountId) -> Result<Balance, PresaleError> {
        if !self.totals().claim_enabled {
            return Err(PresaleError::ClaimNotEnabled);
        }
        let amount = self.claimable(account)?;
        if amount == 0 {
            return Ok(0);
        }

        let mut investment = self.investment(account);
        investment.claimed = investment
            .claimed
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        self.investments.insert(account, &investment);
        Ok(amount)
    }

    /// Fails unless seeding is allowed at `now`.
    pub fn ensure_can_seed(&self, now: Timestamp) -> Result<(), PresaleError> {
        self.ensure_closed(now)?;
        let totals = self.totals();
        if totals.total_invested < self.params().soft_cap {
            return Err(PresaleError::SoftCapNotMet);
        }
        if totals.liquidity_added {
            return Err(PresaleError::AlreadySeeded);
        }
        Ok(())
    }

    pub fn record_liquidity(
        &mut self,
        pair: &AccountId,
        liquidity: Balance,
    ) -> Result<(), PresaleError> {
        let mut totals = self.totals();
        if totals.liquidity_added {
            return Err(PresaleError::AlreadySeeded);
        }
        totals.liquidity_added = true;
        totals.liquidity_pair = Some(*pair);
        totals.supplied_liquidity = liquidity;
        self.totals.set(&totals);
        Ok(())
    }

    /// `supply * (hard_cap - total_invested) / hard_cap`
    pub fn residual_supply(&self) -> Result<Balance, MathError> {
        let params = self.params();
        let totals = self.totals();
        let unsold = params
            .hard_cap
            .checked_sub(totals.total_invested)
            .ok_or(MathError::Underflow)?;
        mul_div(
            totals.total_supply_deposited,
            unsold,
            params.hard_cap,
            Rounding::Down,
        )
    }

    pub fn invest_withdrawal(&self) -> Result<Balance, MathError> {
        mul_bps(
            self.totals().total_invested,
            self.params().operator_share_bps(),
        )
    }

    pub fn presale_fee(&self) -> Result<Balance, MathError> {
        mul_bps(self.totals().total_invested, self.params().presale_fee_bps)
    }

    /// Returns the unsold supply on the first call after close, zero afterwards.
    pub fn take_residual_supply(&mut self, now: Timestamp) -> Result<Balance, PresaleError> {
        self.ensure_closed(now)?;
        let mut totals = self.totals();
        if totals.want_withdrawn {
            return Ok(0);
        }
        let amount = self.residual_supply()?;
        totals.want_withdrawn = true;
        self.totals.set(&totals);
        Ok(amount)
    }

    pub fn take_invest_withdrawal(&mut self, now: Timestamp) -> Result<Balance, PresaleError> {
        self.ensure_closed(now)?;
        let mut totals = self.totals();
        if totals.invest_withdrawn {
            return Ok(0);
        }
        let amount = self.invest_withdrawal()?;
        totals.invest_withdrawn = true;
        self.totals.set(&totals);
        Ok(amount)
    }

    pub fn take_presale_fee(&mut self, now: Timestamp) -> Result<Balance, PresaleError> {
        self.ensure_closed(now)?;
        let mut totals = self.totals();
        if totals.fee_withdrawn {
            return Ok(0);
        }
        let amount = self.presale_fee()?;
        totals.fee_withdrawn = true;
        self.totals.set(&totals);
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::presale::{
        allocation::{tests::TestLedger, total_investable},
        liquidity::{plan_liquidity, tests::TestMarket, LiquidityMarket},
        storage_fields::investors::InvestorsData,
    };
    use ink::env::{test, DefaultEnvironment};

    const START: Timestamp = 1_000;
    const END: Timestamp = 2_000;

    fn accounts() -> test::DefaultAccounts<DefaultEnvironment> {
        test::default_accounts::<DefaultEnvironment>()
    }

    fn params() -> SaleParams {
        SaleParams {
            sale_token: accounts().django,
            invest_asset: None,
            start_time: START,
            duration: END - START,
            hard_cap: 5_000,
            soft_cap: 3_000,
            listing_price: 2_000_000_000_000,
            liquidity_allocation_bps: 6_000,
            liquidity_lock_duration: 10_000,
            presale_fee_bps: 200,
            keeper: accounts().frank,
        }
    }

    fn sale_with_supply(supply: Balance) -> SaleStorage {
        let mut sale = SaleStorage::new(&params()).unwrap();
        sale.deposit(supply).unwrap();
        sale
    }

    #[ink::test]
    fn invalid_params_are_rejected() {
        let params = SaleParams {
            soft_cap: 6_000,
            ..params()
        };
        assert!(matches!(
            SaleStorage::new(&params),
            Err(PresaleError::InvalidParameter)
        ));
    }

    #[ink::test]
    fn investing_is_gated_by_phase() {
        let mut sale = sale_with_supply(100_000);
        let bob = accounts().bob;

        assert_eq!(
            sale.record_investment(&bob, 10, 5_000, START - 1),
            Err(PresaleError::NotOpen)
        );
        assert_eq!(
            sale.record_investment(&bob, 10, 5_000, END),
            Err(PresaleError::NotOpen)
        );
        assert_eq!(sale.record_investment(&bob, 10, 5_000, START), Ok(true));
        assert_eq!(sale.record_investment(&bob, 10, 5_000, END - 1), Ok(false));
        assert_eq!(sale.investment(&bob).invested, 20);
    }

    #[ink::test]
    fn investment_boundary_is_investable() {
        let mut ledger = TestLedger::with_allocations(&[10, 15]);
        let accounts = accounts();
        ledger.stake(0, accounts.bob, 100);
        ledger.stake(0, accounts.charlie, 300);
        ledger.stake(1, accounts.bob, 50);
        ledger.stake(1, accounts.charlie, 50);

        let mut sale = sale_with_supply(100_000);
        // 5_000 * 10 / 25 * 100 / 400 + 5_000 * 15 / 25 * 50 / 100
        let total = total_investable(&ledger, 5_000, &accounts.bob).unwrap();
        assert_eq!(total, 500 + 1_500);

        let investable = sale.investable(&accounts.bob, total);
        sale.record_investment(&accounts.bob, 700, investable, START)
            .unwrap();
        let investable = sale.investable(&accounts.bob, total);
        assert_eq!(investable, 1_300);

        assert_eq!(
            sale.record_investment(&accounts.bob, investable + 1, investable, START),
            Err(PresaleError::ExceedsAllowance)
        );
        assert_eq!(
            sale.record_investment(&accounts.bob, investable, investable, START),
            Ok(false)
        );
        assert_eq!(sale.investable(&accounts.bob, total), 0);
    }

    #[ink::test]
    fn hard_cap_is_never_exceeded() {
        let mut sale = sale_with_supply(100_000);
        let accounts = accounts();

        sale.record_investment(&accounts.bob, 4_000, 10_000, START)
            .unwrap();
        assert_eq!(
            sale.record_investment(&accounts.charlie, 1_001, 10_000, START),
            Err(PresaleError::ExceedsHardCap)
        );
        assert_eq!(
            sale.record_investment(&accounts.charlie, 0, 10_000, START),
            Err(PresaleError::InvalidParameter)
        );
        sale.record_investment(&accounts.charlie, 1_000, 10_000, START)
            .unwrap();
        assert_eq!(sale.totals().total_invested, 5_000);
    }

    #[ink::test]
    fn claim_requires_enabled_claiming() {
        let mut sale = sale_with_supply(100_000);
        let bob = accounts().bob;
        sale.record_investment(&bob, 1_000, 5_000, START).unwrap();

        assert_eq!(sale.record_claim(&bob), Err(PresaleError::ClaimNotEnabled));
        assert_eq!(
            sale.set_claim_enabled(true, END - 1),
            Err(PresaleError::NotClosed)
        );

        sale.set_claim_enabled(true, END).unwrap();
        // 1_000 of 5_000 hard cap buys a fifth of the supply
        assert_eq!(sale.record_claim(&bob), Ok(20_000));
        assert_eq!(sale.record_claim(&bob), Ok(0));
        assert_eq!(sale.investment(&bob).claimed, 20_000);
        assert_eq!(sale.deposit(1), Err(PresaleError::ClaimAlreadyEnabled));
    }

    #[ink::test]
    fn residual_supply_is_withdrawn_once() {
        let mut sale = sale_with_supply(100_000);
        sale.record_investment(&accounts().bob, 3_500, 5_000, START)
            .unwrap();

        assert_eq!(sale.take_residual_supply(END - 1), Err(PresaleError::NotClosed));
        assert_eq!(sale.take_residual_supply(END), Ok(30_000));
        assert_eq!(sale.take_residual_supply(END + 1), Ok(0));
        // sold part stays claimable
        assert_eq!(sale.entitlement(3_500), Ok(70_000));
    }

    #[ink::test]
    fn seeding_requires_close_and_soft_cap() {
        let mut sale = sale_with_supply(100_000);
        let bob = accounts().bob;
        sale.record_investment(&bob, 2_999, 5_000, START).unwrap();

        assert_eq!(sale.ensure_can_seed(END - 1), Err(PresaleError::NotClosed));
        sale.record_investment(&bob, 1, 5_000, END - 1).unwrap();
        assert_eq!(sale.ensure_can_seed(END), Ok(()));

        sale.record_liquidity(&accounts().eve, 42).unwrap();
        assert_eq!(sale.ensure_can_seed(END), Err(PresaleError::AlreadySeeded));
        assert_eq!(
            sale.record_liquidity(&accounts().eve, 42),
            Err(PresaleError::AlreadySeeded)
        );
        assert_eq!(sale.set_schedule(0, 1, END), Err(PresaleError::AlreadySeeded));
    }

    #[ink::test]
    fn soft_cap_blocks_seeding() {
        let mut sale = sale_with_supply(100_000);
        sale.record_investment(&accounts().bob, 2_999, 5_000, START)
            .unwrap();
        assert_eq!(sale.ensure_can_seed(END), Err(PresaleError::SoftCapNotMet));
    }

    #[ink::test]
    fn schedule_rejects_zero_duration() {
        let mut sale = sale_with_supply(1);
        assert_eq!(
            sale.set_schedule(5, 0, 0),
            Err(PresaleError::InvalidParameter)
        );
        sale.set_schedule(5, 10, 0).unwrap();
        assert_eq!(sale.phase(14), SalePhase::Open);
        assert_eq!(sale.phase(15), SalePhase::Closed);
    }

    #[ink::test]
    fn schedule_can_be_extended_while_open() {
        let mut sale = sale_with_supply(100_000);
        sale.set_schedule(START, 2 * (END - START), END - 1).unwrap();
        assert_eq!(sale.phase(END), SalePhase::Open);
        assert_eq!(
            sale.record_investment(&accounts().bob, 10, 5_000, END),
            Ok(true)
        );
    }

    #[ink::test]
    fn closed_sale_cannot_be_reopened() {
        let mut sale = sale_with_supply(100_000);
        let accounts = accounts();
        sale.record_investment(&accounts.bob, 1_000, 5_000, START)
            .unwrap();

        assert_eq!(sale.take_residual_supply(END), Ok(80_000));
        assert_eq!(sale.take_invest_withdrawal(END), Ok(380));

        assert_eq!(
            sale.set_schedule(END + 1, 1_000, END),
            Err(PresaleError::AlreadyClosed)
        );
        assert_eq!(
            sale.record_investment(&accounts.charlie, 4_000, 5_000, END + 1),
            Err(PresaleError::NotOpen)
        );

        // residual paid plus what investors are owed never exceeds the supply
        let owed = sale.entitlement(sale.totals().total_invested).unwrap();
        assert_eq!(owed + 80_000, 100_000);
    }

    #[ink::test]
    fn full_raise_settles_every_invested_unit() {
        let accounts = accounts();
        let mut ledger = TestLedger::with_allocations(&[10, 15]);
        // tier caps are 2_000 and 3_000
        ledger.stake(0, accounts.bob, 1);
        ledger.stake(0, accounts.charlie, 3);
        ledger.stake(1, accounts.charlie, 1);

        let mut sale = sale_with_supply(50_000);
        for (investor, amount) in [(accounts.bob, 500), (accounts.charlie, 4_500)] {
            let total = total_investable(&ledger, 5_000, &investor).unwrap();
            let investable = sale.investable(&investor, total);
            sale.record_investment(&investor, amount, investable, START)
                .unwrap();
        }
        assert_eq!(sale.totals().total_invested, 5_000);

        let mut market = TestMarket::new(0);
        sale.ensure_can_seed(END).unwrap();
        let plan = plan_liquidity(&market, &sale.params(), 5_000, false).unwrap();
        assert_eq!(plan.invest_amount, 3_000);
        assert_eq!(plan.want_amount, 6_000);

        let (pair, liquidity) = market
            .provision(Some(accounts.django), plan.want_amount, None, plan.invest_amount)
            .unwrap();
        sale.record_liquidity(&pair, liquidity).unwrap();
        assert_eq!(market.provisions.len(), 1);

        let invest = sale.take_invest_withdrawal(END).unwrap();
        let fee = sale.take_presale_fee(END).unwrap();
        assert_eq!((invest, fee), (1_900, 100));
        assert_eq!(invest + fee, 5_000 - plan.invest_amount);
        assert_eq!(sale.take_invest_withdrawal(END), Ok(0));
        assert_eq!(sale.take_presale_fee(END), Ok(0));

        assert_eq!(sale.take_residual_supply(END), Ok(0));
        sale.set_claim_enabled(true, END).unwrap();
        assert_eq!(sale.record_claim(&accounts.bob), Ok(5_000));
        assert_eq!(sale.record_claim(&accounts.charlie), Ok(45_000));
    }

    #[ink::test]
    fn failed_provision_leaves_sale_unseeded() {
        let mut sale = sale_with_supply(50_000);
        sale.record_investment(&accounts().bob, 5_000, 5_000, START)
            .unwrap();

        let mut market = TestMarket::new(0);
        market.fail = true;
        let plan = plan_liquidity(&market, &sale.params(), 5_000, false).unwrap();
        assert!(market
            .provision(None, plan.invest_amount, Some(accounts().django), plan.want_amount)
            .is_err());

        assert!(!sale.totals().liquidity_added);
        assert_eq!(sale.ensure_can_seed(END), Ok(()));
    }

    #[ink::test]
    fn paged_distribution_stays_within_supply() {
        let accounts = accounts();
        let supply = 100_003;
        let mut sale = sale_with_supply(supply);
        let mut investors = InvestorsData::default();
        let investments = [
            (accounts.bob, 1_001),
            (accounts.charlie, 1_333),
            (accounts.eve, 667),
            (accounts.frank, 7),
        ];
        for (investor, amount) in investments {
            if sale.record_investment(&investor, amount, 5_000, START).unwrap() {
                investors.push(&investor).unwrap();
            }
        }
        // a repeated investment does not register the investor twice
        assert_eq!(sale.record_investment(&accounts.bob, 1, 5_000, START), Ok(false));
        assert_eq!(investors.count(), 4);

        let residual = sale.take_residual_supply(END).unwrap();
        sale.set_claim_enabled(true, END).unwrap();

        let mut claimed = 0;
        for offset in [0, 3] {
            for investor in investors.slice(offset, 3) {
                let expected = sale.claimable(&investor).unwrap();
                assert_eq!(sale.record_claim(&investor), Ok(expected));
                claimed += expected;
            }
        }
        assert!(claimed > 0);
        assert!(claimed + residual <= supply);

        // a second pass pays nothing
        for investor in investors.all() {
            assert_eq!(sale.record_claim(&investor), Ok(0));
        }
        assert_eq!(sale.investment(&accounts.frank).claimed, sale.entitlement(7).unwrap());
    }
}
