use ink::{codegen::TraitCallBuilder, env::DefaultEnvironment, prelude::vec::Vec};
use pendzl::{
    contracts::psp22::{PSP22Error, PSP22Ref, PSP22},
    traits::{AccountId, Balance},
};

/// `Some(psp22)` for a PSP22 token, `None` for the native coin.
pub type Asset = Option<AccountId>;

#[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum TransferError {
    PSP22Error(PSP22Error),
    NativeTransferFailed,
    /// The value sent with the call does not match the declared amount.
    TransferredValueMismatch,
}

impl From<PSP22Error> for TransferError {
    fn from(e: PSP22Error) -> Self {
        TransferError::PSP22Error(e)
    }
}

/// Moves `amount` of `asset` from `from` into the executing contract.
///
/// Native coin can not be pulled; the call must carry exactly `amount` as
/// transferred value.
pub fn transfer_in(asset: &Asset, from: AccountId, amount: Balance) -> Result<(), TransferError> {
    match asset {
        Some(token) => {
            if amount == 0 {
                return Ok(());
            }
            let mut psp22: PSP22Ref = (*token).into();
            psp22
                .call_mut()
                .transfer_from(
                    from,
                    ink::env::account_id::<DefaultEnvironment>(),
                    amount,
                    Vec::<u8>::new(),
                )
                .call_v1()
                .invoke()?;
            Ok(())
        }
        None => {
            if ink::env::transferred_value::<DefaultEnvironment>() != amount {
                return Err(TransferError::TransferredValueMismatch);
            }
            Ok(())
        }
    }
}

/// Sends `amount` of `asset` held by the executing contract to `to`.
/// Zero amounts are skipped.
pub fn transfer_out(asset: &Asset, to: AccountId, amount: Balance) -> Result<(), TransferError> {
    if amount == 0 {
        return Ok(());
    }
    match asset {
        Some(token) => {
            let mut psp22: PSP22Ref = (*token).into();
            psp22
                .call_mut()
                .transfer(to, amount, Vec::<u8>::new())
                .call_v1()
                .invoke()?;
        }
        None => {
            ink::env::transfer::<DefaultEnvironment>(to, amount)
                .map_err(|_| TransferError::NativeTransferFailed)?;
        }
    }
    Ok(())
}

/// Approves `spender` for `amount` of a PSP22 `asset`. No-op for native coin,
/// which is handed over as transferred value instead.
pub fn approve(asset: &Asset, spender: AccountId, amount: Balance) -> Result<(), TransferError> {
    if let Some(token) = asset {
        let mut psp22: PSP22Ref = (*token).into();
        psp22
            .call_mut()
            .approve(spender, amount)
            .call_v1()
            .invoke()?;
    }
    Ok(())
}
