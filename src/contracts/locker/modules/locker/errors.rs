use launchpad_common::TransferError;
use pendzl::{contracts::psp22::PSP22Error, math::errors::MathError};

#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum LockerError {
    PSP22Error(PSP22Error),
    MathError(MathError),
    NativeTransferFailed,

    /// Zero amount, or transferred value not matching the locked amount.
    InvalidParameter,
    /// Everything the caller has in the vault for this asset is still locked (or there is nothing at all).
    NothingUnlocked,
}

impl From<PSP22Error> for LockerError {
    fn from(e: PSP22Error) -> Self {
        LockerError::PSP22Error(e)
    }
}

impl From<MathError> for LockerError {
    fn from(e: MathError) -> Self {
        LockerError::MathError(e)
    }
}

impl From<TransferError> for LockerError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::PSP22Error(e) => LockerError::PSP22Error(e),
            TransferError::NativeTransferFailed => LockerError::NativeTransferFailed,
            TransferError::TransferredValueMismatch => LockerError::InvalidParameter,
        }
    }
}
