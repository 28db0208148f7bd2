use cosmwasm_std::{
    to_json_binary, Addr, Api, Deps, DepsMut, Env, MessageInfo, QuerierWrapper, Response,
    StdResult, Storage, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use interface::{asset::AssetInfo, burner::BurnerExecuteMsg};

use crate::{
    admins::{ensure_role, Role},
    contract::MAX_BATCH_SIZE,
    error::ContractError,
    lock::{ensure_unlocked, seal, CriticalSection, OutgoingMsg},
    msg::BurnerAssignment,
    state::{is_burner_killed, load_burner, save_burner, BURNER_KILL, DEFAULT_BURNER_KEY},
};

// Allowances at or above this value are considered unlimited and are not topped up.
pub const ALLOWANCE_TOP_UP_THRESHOLD: Uint128 = Uint128::new(u128::MAX / 2);

/// Registers `burner` for `asset` (the default burner when `asset` is `None`).
///
/// When a cw20 asset changes hands, the allowance granted to the previous
/// burner is revoked in the same transaction.
pub fn set_burner(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: Option<AssetInfo>,
    burner: Option<String>,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;
    ensure_unlocked(deps.storage, CriticalSection::Admin)?;

    let asset = asset
        .map(|asset| validate_asset(deps.api, &asset))
        .transpose()?;
    let burner = burner
        .map(|burner| deps.api.addr_validate(&burner))
        .transpose()?;

    let msgs = replace_burner(
        &mut deps,
        &env,
        asset.as_ref(),
        burner.as_ref(),
        &mut vec![],
    )?;
    let submsgs = seal(deps.storage, CriticalSection::Admin, msgs)?;

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_attribute("action", "set_burner")
        .add_attribute("asset", asset_label(asset.as_ref()))
        .add_attribute("burner", burner_label(burner.as_ref())))
}

/// Applies up to `MAX_BATCH_SIZE` assignments in order, stopping at the first
/// one without an asset.
pub fn set_many_burners(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    assignments: Vec<BurnerAssignment>,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;
    ensure_unlocked(deps.storage, CriticalSection::Admin)?;
    ensure_batch_size(assignments.len())?;

    let mut msgs = vec![];
    // Allowance queries see the state from before this batch, so a burner
    // replaced twice must only be revoked once.
    let mut revoked = vec![];
    let mut response = Response::new().add_attribute("action", "set_many_burners");

    for assignment in assignments {
        let Some(asset) = assignment.asset else {
            break;
        };

        let asset = validate_asset(deps.api, &asset)?;
        let burner = assignment
            .burner
            .map(|burner| deps.api.addr_validate(&burner))
            .transpose()?;

        msgs.extend(replace_burner(
            &mut deps,
            &env,
            Some(&asset),
            burner.as_ref(),
            &mut revoked,
        )?);

        response = response.add_attribute(asset.to_string(), burner_label(burner.as_ref()));
    }

    let submsgs = seal(deps.storage, CriticalSection::Admin, msgs)?;

    Ok(response.add_submessages(submsgs))
}

pub fn set_burner_kill(
    deps: DepsMut,
    info: MessageInfo,
    is_killed: bool,
) -> Result<Response, ContractError> {
    ensure_role(
        deps.storage,
        &info.sender,
        &[Role::Emergency, Role::Ownership],
    )?;

    BURNER_KILL.save(deps.storage, &is_killed)?;

    Ok(Response::new()
        .add_attribute("action", "set_burner_kill")
        .add_attribute("is_killed", is_killed.to_string()))
}

/// Hands the proxy's balance of `asset` over to its burner.
pub fn burn(deps: DepsMut, env: Env, asset: AssetInfo) -> Result<Response, ContractError> {
    ensure_burners_alive(deps.storage)?;
    ensure_unlocked(deps.storage, CriticalSection::Burn)?;

    let asset = validate_asset(deps.api, &asset)?;
    let msgs = burn_msgs(deps.as_ref(), &env, &asset, &mut BurnBatch::default())?;
    let submsgs = seal(deps.storage, CriticalSection::Burn, msgs)?;

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_attribute("action", "burn")
        .add_attribute("asset", asset.to_string()))
}

/// Burns up to `MAX_BATCH_SIZE` assets, stopping at the first `None`.
/// A failure for any asset reverts the whole batch.
pub fn burn_many(
    deps: DepsMut,
    env: Env,
    assets: Vec<Option<AssetInfo>>,
) -> Result<Response, ContractError> {
    ensure_burners_alive(deps.storage)?;
    ensure_unlocked(deps.storage, CriticalSection::Burn)?;
    ensure_batch_size(assets.len())?;

    let mut batch = BurnBatch::default();
    let mut msgs = vec![];
    let mut burned = vec![];

    for asset in assets.into_iter().map_while(|asset| asset) {
        let asset = validate_asset(deps.api, &asset)?;
        msgs.extend(burn_msgs(deps.as_ref(), &env, &asset, &mut batch)?);
        burned.push(asset.to_string());
    }

    let submsgs = seal(deps.storage, CriticalSection::Burn, msgs)?;

    Ok(Response::new()
        .add_submessages(submsgs)
        .add_attribute("action", "burn_many")
        .add_attribute("assets", burned.join(",")))
}

pub fn ensure_batch_size(len: usize) -> Result<(), ContractError> {
    if len > MAX_BATCH_SIZE {
        return Err(ContractError::TooManyEntries {
            max: MAX_BATCH_SIZE,
        });
    }

    Ok(())
}

fn ensure_burners_alive(storage: &dyn Storage) -> Result<(), ContractError> {
    if is_burner_killed(storage)? {
        return Err(ContractError::BurnerKilled {});
    }

    Ok(())
}

fn validate_asset(api: &dyn Api, asset: &AssetInfo) -> Result<AssetInfo, ContractError> {
    asset.validate(api).map_err(|err| ContractError::InvalidAsset {
        reason: err.to_string(),
    })
}

/// Revokes the allowance of the burner being replaced and records the new one.
/// `revoked` holds the (token, burner) pairs already revoked earlier in the
/// same call; those are skipped.
fn replace_burner(
    deps: &mut DepsMut,
    env: &Env,
    asset: Option<&AssetInfo>,
    burner: Option<&Addr>,
    revoked: &mut Vec<(String, Addr)>,
) -> Result<Vec<OutgoingMsg>, ContractError> {
    let mut msgs = vec![];

    // Native denoms and the default slot never hold allowances.
    if let Some(AssetInfo::Cw20 { address: token }) = asset {
        let previous = load_burner(deps.storage, asset)?
            .filter(|previous| !revoked.contains(&(token.clone(), previous.clone())));

        if let Some(previous) = previous {
            let allowance =
                query_allowance(&deps.querier, token, &env.contract.address, &previous)?;

            if !allowance.is_zero() {
                deps.api.debug(&format!(
                    "pool-proxy: revoking allowance of {allowance} {token} from burner {previous}"
                ));

                let revoke_msg = WasmMsg::Execute {
                    contract_addr: token.clone(),
                    msg: to_json_binary(&Cw20ExecuteMsg::DecreaseAllowance {
                        spender: previous.to_string(),
                        amount: allowance,
                        expires: None,
                    })?,
                    funds: vec![],
                };

                msgs.push(OutgoingMsg::Approval {
                    token: token.clone(),
                    spender: previous.to_string(),
                    msg: revoke_msg.into(),
                });
                revoked.push((token.clone(), previous));
            }
        }
    }

    save_burner(deps.storage, asset, burner)?;

    Ok(msgs)
}

/// Tracks what earlier entries of a burn batch already arranged, so that an
/// asset listed twice is neither approved nor drained twice.
#[derive(Default)]
struct BurnBatch {
    approved: Vec<(String, Addr)>,
    drained: Vec<String>,
}

fn burn_msgs(
    deps: Deps,
    env: &Env,
    asset: &AssetInfo,
    batch: &mut BurnBatch,
) -> Result<Vec<OutgoingMsg>, ContractError> {
    let burner = match load_burner(deps.storage, Some(asset))? {
        Some(burner) => burner,
        None => load_burner(deps.storage, None)?.ok_or_else(|| ContractError::BurnerNotSet {
            asset: asset.to_string(),
        })?,
    };

    let mut msgs = vec![];

    let funds = match asset {
        AssetInfo::Native { denom } => {
            if batch.drained.contains(denom) {
                vec![]
            } else {
                batch.drained.push(denom.clone());

                let balance = deps
                    .querier
                    .query_balance(env.contract.address.to_string(), denom)?;
                if balance.amount.is_zero() {
                    vec![]
                } else {
                    vec![balance]
                }
            }
        }
        AssetInfo::Cw20 { address: token } => {
            let pair = (token.clone(), burner.clone());
            if !batch.approved.contains(&pair) {
                let allowance =
                    query_allowance(&deps.querier, token, &env.contract.address, &burner)?;

                if allowance < ALLOWANCE_TOP_UP_THRESHOLD {
                    deps.api.debug(&format!(
                        "pool-proxy: topping up allowance of burner {burner} on {token}"
                    ));

                    let approve_msg = WasmMsg::Execute {
                        contract_addr: token.clone(),
                        msg: to_json_binary(&Cw20ExecuteMsg::IncreaseAllowance {
                            spender: burner.to_string(),
                            amount: Uint128::MAX - allowance,
                            expires: None,
                        })?,
                        funds: vec![],
                    };

                    msgs.push(OutgoingMsg::Approval {
                        token: token.clone(),
                        spender: burner.to_string(),
                        msg: approve_msg.into(),
                    });
                }

                batch.approved.push(pair);
            }

            vec![]
        }
    };

    let burn_msg = WasmMsg::Execute {
        contract_addr: burner.to_string(),
        msg: to_json_binary(&BurnerExecuteMsg::Burn {
            asset: asset.clone(),
        })?,
        funds,
    };
    msgs.push(OutgoingMsg::Call(burn_msg.into()));

    Ok(msgs)
}

fn query_allowance(
    querier: &QuerierWrapper,
    token: &str,
    owner: &Addr,
    spender: &Addr,
) -> StdResult<Uint128> {
    let response: AllowanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;

    Ok(response.allowance)
}

fn asset_label(asset: Option<&AssetInfo>) -> String {
    asset
        .map(AssetInfo::to_string)
        .unwrap_or_else(|| DEFAULT_BURNER_KEY.to_string())
}

fn burner_label(burner: Option<&Addr>) -> String {
    burner
        .map(Addr::to_string)
        .unwrap_or_else(|| "none".to_string())
}
