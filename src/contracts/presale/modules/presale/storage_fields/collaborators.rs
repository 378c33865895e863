use ink::primitives::AccountId;
use launchpad_locker::LockerRef;

use crate::modules::presale::{allocation::PoolLedger, liquidity::RouterMarket};

/// Reported for a collaborator that was never configured.
const UNSET: [u8; 32] = [0u8; 32];

/// Contracts the sale talks to.
#[derive(Debug, Default)]
#[pendzl::storage_item]
pub struct CollaboratorsData {
    #[lazy]
    stake_pool: AccountId,
    #[lazy]
    locker: AccountId,
    #[lazy]
    router: AccountId,
}

impl CollaboratorsData {
    pub fn new(stake_pool: &AccountId, locker: &AccountId, router: &AccountId) -> Self {
        let mut instance = Self::default();
        instance.stake_pool.set(stake_pool);
        instance.locker.set(locker);
        instance.set_router(router);
        instance
    }
}

impl CollaboratorsData {
    pub fn stake_pool_id(&self) -> AccountId {
        self.stake_pool.get().unwrap_or(AccountId::from(UNSET))
    }

    pub fn locker_id(&self) -> AccountId {
        self.locker.get().unwrap_or(AccountId::from(UNSET))
    }

    pub fn router_id(&self) -> AccountId {
        self.router.get().unwrap_or(AccountId::from(UNSET))
    }

    pub fn stake_pool(&self) -> PoolLedger {
        self.stake_pool_id().into()
    }

    pub fn locker(&self) -> LockerRef {
        self.locker_id().into()
    }

    pub fn router(&self) -> RouterMarket {
        self.router_id().into()
    }

    pub fn set_router(&mut self, router: &AccountId) {
        self.router.set(router);
    }
}
