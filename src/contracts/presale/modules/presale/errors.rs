use launchpad_common::TransferError;
use launchpad_locker::LockerError;
use pendzl::{
    contracts::{access_control::AccessControlError, psp22::PSP22Error},
    math::errors::MathError,
};

#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum RouterError {
    /// The market has no pool for the pair, or the pool is empty.
    NoLiquidity,
    /// The router could not mint liquidity for the supplied amounts.
    ProvisionFailed,
}

#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum PresaleError {
    PSP22Error(PSP22Error),
    MathError(MathError),
    LockerError(LockerError),
    RouterError(RouterError),
    NativeTransferFailed,

    /// Caller is not the operator of the sale.
    Unauthorized,
    InvalidParameter,

    /// The sale is not accepting investments right now.
    NotOpen,
    /// The sale hasn't ended yet.
    NotClosed,
    /// The sale has ended; its schedule is final.
    AlreadyClosed,
    SoftCapNotMet,
    /// Liquidity has been already added.
    AlreadySeeded,
    ClaimNotEnabled,
    ClaimAlreadyEnabled,

    /// Investment exceeds what the caller's stake entitles to.
    ExceedsAllowance,
    ExceedsHardCap,
    /// Provided sale token amount doesn't cover the listing requirement.
    InsufficientWantAmount,
}

impl From<PSP22Error> for PresaleError {
    fn from(e: PSP22Error) -> Self {
        PresaleError::PSP22Error(e)
    }
}

impl From<MathError> for PresaleError {
    fn from(e: MathError) -> Self {
        PresaleError::MathError(e)
    }
}

impl From<LockerError> for PresaleError {
    fn from(e: LockerError) -> Self {
        PresaleError::LockerError(e)
    }
}

impl From<RouterError> for PresaleError {
    fn from(e: RouterError) -> Self {
        PresaleError::RouterError(e)
    }
}

impl From<AccessControlError> for PresaleError {
    fn from(_: AccessControlError) -> Self {
        PresaleError::Unauthorized
    }
}

impl From<TransferError> for PresaleError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::PSP22Error(e) => PresaleError::PSP22Error(e),
            TransferError::NativeTransferFailed => PresaleError::NativeTransferFailed,
            TransferError::TransferredValueMismatch => PresaleError::InvalidParameter,
        }
    }
}
