pub mod config;
pub mod stakes;
pub mod tiers;
