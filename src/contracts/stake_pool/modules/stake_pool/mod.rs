pub mod errors;
pub mod events;
pub mod storage_fields;
pub mod structs;
pub mod traits;
