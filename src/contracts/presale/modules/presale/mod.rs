pub mod allocation;
pub mod errors;
pub mod events;
pub mod liquidity;
pub mod storage_fields;
pub mod structs;
pub mod traits;
