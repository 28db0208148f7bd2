use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_vec, CosmosMsg, StdResult, Storage, SubMsg};
use cw_storage_plus::Item;

use crate::{
    error::ContractError,
    state::{ADMIN_LOCK, BURN_LOCK},
};

// Every submessage carries a payload describing what reply() has to do,
// so all of them can share the same SubMsg ID.
pub const UNUSED_MSG_ID: u64 = 0;

/// Reentrancy scope. Operations sharing a section exclude each other while
/// their messages are executing; operations in different sections do not.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum CriticalSection {
    /// Role, burner registry and pool administration
    Admin,
    /// Fee burning
    Burn,
}

impl CriticalSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriticalSection::Admin => "admin",
            CriticalSection::Burn => "burn",
        }
    }

    fn flag(&self) -> Item<bool> {
        match self {
            CriticalSection::Admin => ADMIN_LOCK,
            CriticalSection::Burn => BURN_LOCK,
        }
    }
}

#[cw_serde]
pub enum ReplyPayload {
    /// Attached to the last message of a guarded operation.
    ReleaseLock { section: CriticalSection },
    /// Attached to cw20 allowance changes so that a failure surfaces as
    /// `ApprovalFailed`. Releases `release` if the change was the last message.
    Approval {
        token: String,
        spender: String,
        release: Option<CriticalSection>,
    },
}

/// Message produced by a guarded operation, before it gets wrapped into a submessage.
#[derive(Clone, Debug, PartialEq)]
pub enum OutgoingMsg {
    Call(CosmosMsg),
    Approval {
        token: String,
        spender: String,
        msg: CosmosMsg,
    },
}

pub fn is_locked(storage: &dyn Storage, section: CriticalSection) -> StdResult<bool> {
    Ok(section.flag().may_load(storage)?.unwrap_or(false))
}

pub fn ensure_unlocked(
    storage: &dyn Storage,
    section: CriticalSection,
) -> Result<(), ContractError> {
    if is_locked(storage, section)? {
        return Err(ContractError::Reentrancy {
            section: section.as_str().to_string(),
        });
    }

    Ok(())
}

pub fn release(storage: &mut dyn Storage, section: CriticalSection) -> StdResult<()> {
    section.flag().save(storage, &false)
}

/// Turns the messages of a guarded operation into submessages. When there is at
/// least one message the section is taken, and the reply to the last message
/// gives it back. If any message fails, the whole transaction reverts together
/// with the lock.
pub fn seal(
    storage: &mut dyn Storage,
    section: CriticalSection,
    msgs: Vec<OutgoingMsg>,
) -> Result<Vec<SubMsg>, ContractError> {
    ensure_unlocked(storage, section)?;

    if msgs.is_empty() {
        return Ok(vec![]);
    }

    section.flag().save(storage, &true)?;

    let last = msgs.len() - 1;
    msgs.into_iter()
        .enumerate()
        .map(|(i, msg)| -> Result<SubMsg, ContractError> {
            let release = (i == last).then_some(section);
            Ok(match msg {
                OutgoingMsg::Approval {
                    token,
                    spender,
                    msg,
                } => SubMsg::reply_always(msg, UNUSED_MSG_ID).with_payload(to_json_vec(
                    &ReplyPayload::Approval {
                        token,
                        spender,
                        release,
                    },
                )?),
                OutgoingMsg::Call(msg) => match release {
                    Some(section) => SubMsg::reply_on_success(msg, UNUSED_MSG_ID)
                        .with_payload(to_json_vec(&ReplyPayload::ReleaseLock { section })?),
                    None => SubMsg::new(msg),
                },
            })
        })
        .collect()
}
