use cosmwasm_schema::cw_serde;
use cosmwasm_std::{entry_point, DepsMut, Env, Response, Storage};
use cw2::{get_contract_version, set_contract_version};

use crate::{
    contract::{CONTRACT_NAME, CONTRACT_VERSION},
    error::{new_generic_error, ContractError},
};

#[cw_serde]
pub struct MigrateMsg {}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    check_contract_version(deps.storage)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

fn check_contract_version(storage: &dyn Storage) -> Result<(), ContractError> {
    let contract_version = get_contract_version(storage)?;

    if contract_version.contract != CONTRACT_NAME {
        return Err(new_generic_error(format!(
            "cannot migrate from contract {}",
            contract_version.contract
        )));
    }

    if contract_version.version == CONTRACT_VERSION {
        return Err(new_generic_error(
            "Contract is already migrated to the newest version.",
        ));
    }

    Ok(())
}
