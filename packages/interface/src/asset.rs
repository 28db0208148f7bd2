use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, StdError, StdResult};

/// Fungible asset the proxy can collect and hand over to a burner.
#[cw_serde]
pub enum AssetInfo {
    /// Bank denom held directly by the proxy. Native coins are sent along with
    /// the burner call, so they never carry an allowance.
    Native { denom: String },
    /// cw20 token contract. Burners pull these through an allowance.
    Cw20 { address: String },
}

impl AssetInfo {
    pub fn native(denom: impl Into<String>) -> Self {
        AssetInfo::Native {
            denom: denom.into(),
        }
    }

    pub fn cw20(address: impl Into<String>) -> Self {
        AssetInfo::Cw20 {
            address: address.into(),
        }
    }

    /// Returns the asset with its cw20 address normalized, or an error if the
    /// denom is empty or the address is not valid on this chain.
    pub fn validate(&self, api: &dyn Api) -> StdResult<AssetInfo> {
        match self {
            AssetInfo::Native { denom } => {
                if denom.trim().is_empty() {
                    return Err(StdError::generic_err("native denom cannot be empty"));
                }

                Ok(AssetInfo::native(denom))
            }
            AssetInfo::Cw20 { address } => {
                Ok(AssetInfo::cw20(api.addr_validate(address)?.into_string()))
            }
        }
    }

    /// Key under which per-asset data is stored. Native and cw20 keys use
    /// distinct prefixes so a denom can never shadow a token address.
    pub fn storage_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Native { denom } => write!(f, "native:{denom}"),
            AssetInfo::Cw20 { address } => write!(f, "cw20:{address}"),
        }
    }
}
