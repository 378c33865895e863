use launchpad_common::TransferError;
use pendzl::{
    contracts::{access_control::AccessControlError, psp22::PSP22Error},
    math::errors::MathError,
};

#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum StakePoolError {
    PSP22Error(PSP22Error),
    MathError(MathError),
    NativeTransferFailed,

    /// Caller is not the operator of the pool.
    Unauthorized,
    InvalidParameter,
    /// There is no tier with the given id.
    NotFound,
    /// The stake rounded down to the tier's unit amount is zero.
    BelowMinimum,
    /// Withdrawal exceeds the unlocked part of the stake.
    InsufficientUnlocked,
}

impl From<PSP22Error> for StakePoolError {
    fn from(e: PSP22Error) -> Self {
        StakePoolError::PSP22Error(e)
    }
}

impl From<MathError> for StakePoolError {
    fn from(e: MathError) -> Self {
        StakePoolError::MathError(e)
    }
}

impl From<AccessControlError> for StakePoolError {
    fn from(_: AccessControlError) -> Self {
        StakePoolError::Unauthorized
    }
}

impl From<TransferError> for StakePoolError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::PSP22Error(e) => StakePoolError::PSP22Error(e),
            TransferError::NativeTransferFailed => StakePoolError::NativeTransferFailed,
            TransferError::TransferredValueMismatch => StakePoolError::InvalidParameter,
        }
    }
}
