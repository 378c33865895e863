pub mod stake_pool;
