use ink::{prelude::vec::Vec, primitives::AccountId, storage::Mapping};
use pendzl::math::errors::MathError;

/// Append-only list of investors in order of their first investment.
#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct InvestorsData {
    #[lazy]
    count: u32,
    investors: Mapping<u32, AccountId>,
}

impl InvestorsData {
    pub fn count(&self) -> u32 {
        self.count.get().unwrap_or_default()
    }

    pub fn at(&self, index: u32) -> Option<AccountId> {
        self.investors.get(index)
    }

    /// Callers register an investor once, on the first investment.
    pub fn push(&mut self, investor: &AccountId) -> Result<(), MathError> {
        let index = self.count();
        self.investors.insert(index, investor);
        self.count
            .set(&(index.checked_add(1).ok_or(MathError::Overflow)?));
        Ok(())
    }

    pub fn slice(&self, offset: u32, limit: u32) -> Vec<AccountId> {
        let end = offset.saturating_add(limit).min(self.count());
        (offset..end).filter_map(|index| self.at(index)).collect()
    }

    pub fn all(&self) -> Vec<AccountId> {
        self.slice(0, self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink::env::{test, DefaultEnvironment};

    #[ink::test]
    fn slices_are_clamped_to_the_list() {
        let accounts = test::default_accounts::<DefaultEnvironment>();
        let mut investors = InvestorsData::default();
        for investor in [accounts.alice, accounts.bob, accounts.charlie] {
            investors.push(&investor).unwrap();
        }

        assert_eq!(investors.count(), 3);
        assert_eq!(investors.at(1), Some(accounts.bob));
        assert_eq!(investors.at(3), None);
        assert_eq!(investors.slice(1, 10), vec![accounts.bob, accounts.charlie]);
        assert_eq!(investors.slice(3, 1), Vec::<AccountId>::new());
        assert_eq!(investors.slice(u32::MAX, u32::MAX), Vec::<AccountId>::new());
        assert_eq!(
            investors.all(),
            vec![accounts.alice, accounts.bob, accounts.charlie]
        );
    }
}
