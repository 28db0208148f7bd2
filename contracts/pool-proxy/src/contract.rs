use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply,
    Response, StdResult, SubMsgResult,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crate::{
    admins::{apply_admins, commit_admins},
    burner::{burn, burn_many, set_burner, set_burner_kill, set_many_burners},
    error::ContractError,
    lock::{release, ReplyPayload},
    msg::{ExecuteMsg, InstantiateMsg},
    pool,
    query::{
        AdminsResponse, BurnerKillResponse, BurnerResponse, BurnersResponse,
        DonationApprovalResponse, QueryMsg,
    },
    state::{
        get_burners, is_burner_killed, is_donation_approved, load_burner, Admins, ADMINS,
        BURNER_KILL, FUTURE_ADMINS,
    },
};

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of entries processed by a single batch message
pub const MAX_BATCH_SIZE: usize = 20;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let admins = Admins {
        ownership_admin: deps.api.addr_validate(&msg.ownership_admin)?,
        parameter_admin: deps.api.addr_validate(&msg.parameter_admin)?,
        emergency_admin: deps.api.addr_validate(&msg.emergency_admin)?,
    };

    ADMINS.save(deps.storage, &admins)?;
    // Until the first commit, applying admins is a no-op.
    FUTURE_ADMINS.save(deps.storage, &admins)?;
    BURNER_KILL.save(deps.storage, &false)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "initialization")
        .add_attribute("ownership_admin", admins.ownership_admin)
        .add_attribute("parameter_admin", admins.parameter_admin)
        .add_attribute("emergency_admin", admins.emergency_admin))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    // Only burns take funds; whatever is attached is forwarded along with the balance.
    if !matches!(msg, ExecuteMsg::Burn { .. } | ExecuteMsg::BurnMany { .. }) {
        nonpayable(&info)?;
    }

    match msg {
        ExecuteMsg::CommitAdmins {
            ownership_admin,
            parameter_admin,
            emergency_admin,
        } => commit_admins(
            deps,
            info,
            ownership_admin,
            parameter_admin,
            emergency_admin,
        ),
        ExecuteMsg::ApplyAdmins {} => apply_admins(deps, info),

        ExecuteMsg::SetBurner { asset, burner } => set_burner(deps, env, info, asset, burner),
        ExecuteMsg::SetManyBurners { burners } => set_many_burners(deps, env, info, burners),
        ExecuteMsg::SetBurnerKill { is_killed } => set_burner_kill(deps, info, is_killed),
        ExecuteMsg::Burn { asset } => burn(deps, env, asset),
        ExecuteMsg::BurnMany { assets } => burn_many(deps, env, assets),

        ExecuteMsg::WithdrawAdminFees { pool } => pool::withdraw_admin_fees(deps, pool),
        ExecuteMsg::WithdrawMany { pools } => pool::withdraw_many(deps, pools),
        ExecuteMsg::KillPool { pool } => pool::kill_pool(deps, info, pool),
        ExecuteMsg::UnkillPool { pool } => pool::unkill_pool(deps, info, pool),
        ExecuteMsg::CommitTransferOwnership { pool, new_owner } => {
            pool::commit_transfer_ownership(deps, info, pool, new_owner)
        }
        ExecuteMsg::ApplyTransferOwnership { pool } => pool::apply_transfer_ownership(deps, pool),
        ExecuteMsg::AcceptTransferOwnership { pool } => {
            pool::accept_transfer_ownership(deps, pool)
        }
        ExecuteMsg::RevertTransferOwnership { pool } => {
            pool::revert_transfer_ownership(deps, info, pool)
        }
        ExecuteMsg::CommitNewParameters { pool, parameters } => {
            pool::commit_new_parameters(deps, info, pool, parameters)
        }
        ExecuteMsg::ApplyNewParameters { pool } => pool::apply_new_parameters(deps, info, pool),
        ExecuteMsg::RevertNewParameters { pool } => pool::revert_new_parameters(deps, info, pool),
        ExecuteMsg::RampAGamma {
            pool,
            future_a,
            future_gamma,
            future_time,
        } => pool::ramp_a_gamma(deps, info, pool, future_a, future_gamma, future_time),
        ExecuteMsg::StopRampAGamma { pool } => pool::stop_ramp_a_gamma(deps, info, pool),
        ExecuteMsg::SetAdminFeeReceiver { pool, receiver } => {
            pool::set_admin_fee_receiver(deps, info, pool, receiver)
        }
        ExecuteMsg::SetReferralCode { pool, code } => {
            pool::set_referral_code(deps, info, pool, code)
        }
        ExecuteMsg::SetDonationApproval {
            pool,
            caller,
            approved,
        } => pool::set_donation_approval(deps, info, pool, caller, approved),
        ExecuteMsg::DonateAdminFees { pool } => pool::donate_admin_fees(deps, info, pool),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Admins {} => to_json_binary(&AdminsResponse {
            admins: ADMINS.load(deps.storage)?,
            future_admins: FUTURE_ADMINS.load(deps.storage)?,
        }),
        QueryMsg::Burner { asset } => {
            let asset = asset.map(|asset| asset.validate(deps.api)).transpose()?;
            to_json_binary(&BurnerResponse {
                burner: load_burner(deps.storage, asset.as_ref())?,
            })
        }
        QueryMsg::Burners { start_after, limit } => to_json_binary(&BurnersResponse {
            burners: get_burners(deps.storage, start_after, limit)?,
        }),
        QueryMsg::BurnerKill {} => to_json_binary(&BurnerKillResponse {
            is_killed: is_burner_killed(deps.storage)?,
        }),
        QueryMsg::DonationApproval { pool, caller } => {
            let pool = deps.api.addr_validate(&pool)?;
            let caller = deps.api.addr_validate(&caller)?;
            to_json_binary(&DonationApprovalResponse {
                approved: is_donation_approved(deps.storage, &pool, &caller)?,
            })
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    // No need to use msg.id, everything we need is in the payload.
    match from_json::<ReplyPayload>(&msg.payload)? {
        ReplyPayload::ReleaseLock { section } => {
            release(deps.storage, section)?;

            Ok(Response::new()
                .add_attribute("action", "release_lock")
                .add_attribute("section", section.as_str()))
        }
        ReplyPayload::Approval {
            token,
            spender,
            release: section,
        } => match msg.result {
            SubMsgResult::Err(reason) => {
                deps.api.debug(&format!(
                    "pool-proxy: approval of {spender} on {token} failed: {reason}"
                ));

                Err(ContractError::ApprovalFailed {
                    token,
                    spender,
                    reason,
                })
            }
            SubMsgResult::Ok(_) => {
                let mut response = Response::new()
                    .add_attribute("action", "approval")
                    .add_attribute("token", token)
                    .add_attribute("spender", spender);

                if let Some(section) = section {
                    release(deps.storage, section)?;
                    response = response.add_attribute("released_section", section.as_str());
                }

                Ok(response)
            }
        },
    }
}
