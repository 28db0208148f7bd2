use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("unauthorized")]
    Unauthorized {},

    #[error("burners are killed")]
    BurnerKilled {},

    #[error("no burner set for {asset} and no default burner")]
    BurnerNotSet { asset: String },

    #[error("approval of {spender} on {token} failed: {reason}")]
    ApprovalFailed {
        token: String,
        spender: String,
        reason: String,
    },

    #[error("caller {caller} is a contract; only accounts can apply new parameters")]
    CallerIsContract { caller: String },

    #[error("reentrant call into {section} section")]
    Reentrancy { section: String },

    #[error("too many entries; at most {max} are processed in one call")]
    TooManyEntries { max: usize },

    #[error("invalid asset: {reason}")]
    InvalidAsset { reason: String },
}

pub fn new_generic_error(msg: impl Into<String>) -> ContractError {
    ContractError::Std(StdError::generic_err(msg))
}
