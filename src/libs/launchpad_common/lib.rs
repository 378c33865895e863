// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

//! Pieces shared by the launchpad contracts: time-locked balances, basis point
//! and wide-product math, and the asset transfer helpers used to move either
//! PSP22 tokens or the native coin.

pub mod asset;
pub mod math;
pub mod timed_balance;

pub use asset::{Asset, TransferError};
pub use timed_balance::{BalanceInfo, TimedBalance};
