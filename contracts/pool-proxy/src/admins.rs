use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, StdResult, Storage};

use crate::{
    error::ContractError,
    state::{Admins, ADMINS, FUTURE_ADMINS},
};

#[cw_serde]
#[derive(Copy, Eq)]
pub enum Role {
    Ownership,
    Parameter,
    Emergency,
}

impl Admins {
    pub fn holder(&self, role: Role) -> &Addr {
        match role {
            Role::Ownership => &self.ownership_admin,
            Role::Parameter => &self.parameter_admin,
            Role::Emergency => &self.emergency_admin,
        }
    }

    pub fn holds_any(&self, sender: &Addr, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.holder(*role) == sender)
    }
}

pub fn load_admins(storage: &dyn Storage) -> StdResult<Admins> {
    ADMINS.load(storage)
}

/// Checks that `sender` holds at least one of `roles`.
pub fn ensure_role(
    storage: &dyn Storage,
    sender: &Addr,
    roles: &[Role],
) -> Result<Admins, ContractError> {
    let admins = load_admins(storage)?;
    if !admins.holds_any(sender, roles) {
        return Err(ContractError::Unauthorized {});
    }

    Ok(admins)
}

/// Stages a new set of admins. Only the ownership admin can do this, and the
/// roles in effect don't change until `apply_admins` is called.
pub fn commit_admins(
    deps: DepsMut,
    info: MessageInfo,
    ownership_admin: String,
    parameter_admin: String,
    emergency_admin: String,
) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;

    let future_admins = Admins {
        ownership_admin: deps.api.addr_validate(&ownership_admin)?,
        parameter_admin: deps.api.addr_validate(&parameter_admin)?,
        emergency_admin: deps.api.addr_validate(&emergency_admin)?,
    };
    FUTURE_ADMINS.save(deps.storage, &future_admins)?;

    Ok(admins_response("commit_admins", &future_admins))
}

/// Activates the staged admins. All three roles are swapped in a single write.
pub fn apply_admins(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_role(deps.storage, &info.sender, &[Role::Ownership])?;

    let future_admins = FUTURE_ADMINS.load(deps.storage)?;
    ADMINS.save(deps.storage, &future_admins)?;

    Ok(admins_response("apply_admins", &future_admins))
}

fn admins_response(action: &str, admins: &Admins) -> Response {
    Response::new()
        .add_attribute("action", action)
        .add_attribute("ownership_admin", admins.ownership_admin.as_str())
        .add_attribute("parameter_admin", admins.parameter_admin.as_str())
        .add_attribute("emergency_admin", admins.emergency_admin.as_str())
}
