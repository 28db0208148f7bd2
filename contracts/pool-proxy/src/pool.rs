use cosmwasm_std::{
    to_json_binary, Addr, Deps, DepsMut, MessageInfo, Response, StdResult, Uint128, WasmMsg,
};
use interface::pool::{PoolExecuteMsg, PoolParameters};

use crate::{
    admins::{ensure_role, load_admins, Role},
    burner::ensure_batch_size,
    error::ContractError,
    lock::{ensure_unlocked, seal, CriticalSection, OutgoingMsg},
    state::{is_donation_approved, DONATION_APPROVALS},
};

pub fn withdraw_admin_fees(deps: DepsMut, pool: String) -> Result<Response, ContractError> {
    forward(deps, &pool, PoolExecuteMsg::ClaimAdminFees {}, "withdraw_admin_fees")
}

/// Claims admin fees from up to `MAX_BATCH_SIZE` pools, stopping at the first `None`.
pub fn withdraw_many(
    deps: DepsMut,
    pools: Vec<Option<String>>,
) -> Result<Response, ContractError> {
    ensure_unlocked(deps.storage, CriticalSection::Admin)?;
    ensure_batch_size(pools.len())?;

    let pools = pools
        .into_iter()
        .map_while(|pool| pool)
        .map(|pool| deps.api.addr_validate(&pool))
        .collect::<StdResult<Vec<Addr>>>()?;

    let msgs = pools
        .iter()
        .map(|pool| pool_msg(pool, &PoolExecuteMsg::ClaimAdminFees {}))
        .collect::<StdResult<Vec<OutgoingMsg>>>()?;

    let submsgs = seal(deps.storage, CriticalSection::Admin, msgs)?;

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_attribute("action", "withdraw_many")
        .add_attribute(
            "pools",
            pools
                .iter()
                .map(Addr::as_str)
                .collect::<Vec<&str>>()
                .join(","),
        ))
}

pub fn kill_pool(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Emergency])?;
    forward(deps, &pool, PoolExecuteMsg::Kill {}, "kill_pool")
}

pub fn unkill_pool(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    ensure_role(
        deps.storage,
        &info.sender,
        &[Role::Emergency, Role::Ownership],
    )?;
    forward(deps, &pool, PoolExecuteMsg::Unkill {}, "unkill_pool")
}

pub fn commit_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    new_owner: String,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;

    let new_owner = deps.api.addr_validate(&new_owner)?;

    Ok(forward(
        deps,
        &pool,
        PoolExecuteMsg::CommitTransferOwnership {
            owner: new_owner.to_string(),
        },
        "commit_transfer_ownership",
    )?
    .add_attribute("new_owner", new_owner))
}

pub fn apply_transfer_ownership(deps: DepsMut, pool: String) -> Result<Response, ContractError> {
    forward(
        deps,
        &pool,
        PoolExecuteMsg::ApplyTransferOwnership {},
        "apply_transfer_ownership",
    )
}

pub fn accept_transfer_ownership(deps: DepsMut, pool: String) -> Result<Response, ContractError> {
    forward(
        deps,
        &pool,
        PoolExecuteMsg::AcceptTransferOwnership {},
        "accept_transfer_ownership",
    )
}

pub fn revert_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    ensure_role(
        deps.storage,
        &info.sender,
        &[Role::Ownership, Role::Emergency],
    )?;
    forward(
        deps,
        &pool,
        PoolExecuteMsg::RevertTransferOwnership {},
        "revert_transfer_ownership",
    )
}

/// Stages new fee parameters on the pool. Values are forwarded as they are;
/// see `PoolParameters` for the bounds pools expect.
pub fn commit_new_parameters(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    parameters: PoolParameters,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Parameter])?;
    forward(
        deps,
        &pool,
        PoolExecuteMsg::CommitNewParameters { parameters },
        "commit_new_parameters",
    )
}

/// Anyone can apply staged parameters, but only from an account. Calls relayed
/// through another contract are rejected.
pub fn apply_new_parameters(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    if is_contract(deps.as_ref(), &info.sender) {
        return Err(ContractError::CallerIsContract {
            caller: info.sender.to_string(),
        });
    }

    forward(
        deps,
        &pool,
        PoolExecuteMsg::ApplyNewParameters {},
        "apply_new_parameters",
    )
}

pub fn revert_new_parameters(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    ensure_role(
        deps.storage,
        &info.sender,
        &[Role::Ownership, Role::Parameter, Role::Emergency],
    )?;
    forward(
        deps,
        &pool,
        PoolExecuteMsg::RevertNewParameters {},
        "revert_new_parameters",
    )
}

pub fn ramp_a_gamma(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    future_a: Uint128,
    future_gamma: Uint128,
    future_time: u64,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Parameter])?;
    forward(
        deps,
        &pool,
        PoolExecuteMsg::RampAGamma {
            future_a,
            future_gamma,
            future_time,
        },
        "ramp_a_gamma",
    )
}

pub fn stop_ramp_a_gamma(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    ensure_role(
        deps.storage,
        &info.sender,
        &[Role::Parameter, Role::Emergency],
    )?;
    forward(
        deps,
        &pool,
        PoolExecuteMsg::StopRampAGamma {},
        "stop_ramp_a_gamma",
    )
}

// Not guarded: the message goes out as a plain message and leaves the admin section alone.
pub fn set_admin_fee_receiver(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    receiver: String,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;

    let pool = deps.api.addr_validate(&pool)?;
    let receiver = deps.api.addr_validate(&receiver)?;

    let msg = WasmMsg::Execute {
        contract_addr: pool.to_string(),
        msg: to_json_binary(&PoolExecuteMsg::SetAdminFeeReceiver {
            receiver: receiver.to_string(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "set_admin_fee_receiver")
        .add_attribute("pool", pool)
        .add_attribute("receiver", receiver))
}

pub fn set_referral_code(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    code: String,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;

    Ok(forward(
        deps,
        &pool,
        PoolExecuteMsg::SetReferralCode { code: code.clone() },
        "set_referral_code",
    )?
    .add_attribute("code", code))
}

// Not guarded.
pub fn set_donation_approval(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    caller: String,
    approved: bool,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;

    let pool = deps.api.addr_validate(&pool)?;
    let caller = deps.api.addr_validate(&caller)?;

    DONATION_APPROVALS.save(deps.storage, (&pool, &caller), &approved)?;

    Ok(Response::new()
        .add_attribute("action", "set_donation_approval")
        .add_attribute("pool", pool)
        .add_attribute("caller", caller)
        .add_attribute("approved", approved.to_string()))
}

/// Callable by the ownership admin, or by callers it approved for this pool.
pub fn donate_admin_fees(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
) -> Result<Response, ContractError> {
    let pool_addr = deps.api.addr_validate(&pool)?;

    let admins = load_admins(deps.storage)?;
    if !admins.holds_any(&info.sender, &[Role::Ownership])
        && !is_donation_approved(deps.storage, &pool_addr, &info.sender)?
    {
        return Err(ContractError::Unauthorized {});
    }

    forward(
        deps,
        &pool,
        PoolExecuteMsg::DonateAdminFees {},
        "donate_admin_fees",
    )
}

/// Sends `msg` to `pool` inside the admin section.
fn forward(
    deps: DepsMut,
    pool: &str,
    msg: PoolExecuteMsg,
    action: &str,
) -> Result<Response, ContractError> {
    ensure_unlocked(deps.storage, CriticalSection::Admin)?;

    let pool = deps.api.addr_validate(pool)?;
    let submsgs = seal(
        deps.storage,
        CriticalSection::Admin,
        vec![pool_msg(&pool, &msg)?],
    )?;

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_attribute("action", action)
        .add_attribute("pool", pool))
}

fn pool_msg(pool: &Addr, msg: &PoolExecuteMsg) -> StdResult<OutgoingMsg> {
    Ok(OutgoingMsg::Call(
        WasmMsg::Execute {
            contract_addr: pool.to_string(),
            msg: to_json_binary(msg)?,
            funds: vec![],
        }
        .into(),
    ))
}

/// An address is a contract if the chain has contract info for it.
fn is_contract(deps: Deps, address: &Addr) -> bool {
    deps.querier
        .query_wasm_contract_info(address.clone())
        .is_ok()
}
