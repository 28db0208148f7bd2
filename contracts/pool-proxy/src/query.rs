use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use interface::asset::AssetInfo;

use crate::state::{Admins, BurnerRecord};

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(AdminsResponse)]
    Admins {},
    /// Burner registered for `asset` (or the default burner when `asset` is `None`).
    /// Doesn't fall back to the default burner.
    #[returns(BurnerResponse)]
    Burner { asset: Option<AssetInfo> },
    /// Paginated by asset storage key, e.g. `cw20:<address>` or `native:<denom>`
    #[returns(BurnersResponse)]
    Burners {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(BurnerKillResponse)]
    BurnerKill {},
    #[returns(DonationApprovalResponse)]
    DonationApproval { pool: String, caller: String },
}

#[cw_serde]
pub struct AdminsResponse {
    pub admins: Admins,
    pub future_admins: Admins,
}

#[cw_serde]
pub struct BurnerResponse {
    pub burner: Option<Addr>,
}

#[cw_serde]
pub struct BurnersResponse {
    pub burners: Vec<BurnerRecord>,
}

#[cw_serde]
pub struct BurnerKillResponse {
    pub is_killed: bool,
}

#[cw_serde]
pub struct DonationApprovalResponse {
    pub approved: bool,
}
