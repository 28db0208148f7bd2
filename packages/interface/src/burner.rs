use cosmwasm_schema::cw_serde;

use crate::asset::AssetInfo;

/// Execute messages a burner contract must accept.
#[cw_serde]
pub enum BurnerExecuteMsg {
    /// Convert the given asset held by (or approved to) the burner.
    /// For native assets the proxy's whole balance of the denom is attached as funds.
    /// For cw20 assets the burner pulls tokens from the proxy through its allowance.
    Burn { asset: AssetInfo },
}
