use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use interface::{asset::AssetInfo, pool::PoolParameters};

#[cw_serde]
pub struct InstantiateMsg {
    pub ownership_admin: String,
    pub parameter_admin: String,
    pub emergency_admin: String,
}

/// Burner assignment used by `SetManyBurners`.
/// `burner: None` unregisters the asset.
#[cw_serde]
pub struct BurnerAssignment {
    pub asset: Option<AssetInfo>,
    pub burner: Option<String>,
}

// Batch messages take at most MAX_BATCH_SIZE entries and stop at the first `None`.
#[cw_serde]
pub enum ExecuteMsg {
    CommitAdmins {
        ownership_admin: String,
        parameter_admin: String,
        emergency_admin: String,
    },
    ApplyAdmins {},

    /// Register the burner used for `asset`. `asset: None` sets the default
    /// burner used for assets without one of their own.
    SetBurner {
        asset: Option<AssetInfo>,
        burner: Option<String>,
    },
    SetManyBurners {
        burners: Vec<BurnerAssignment>,
    },
    SetBurnerKill {
        is_killed: bool,
    },
    Burn {
        asset: AssetInfo,
    },
    BurnMany {
        assets: Vec<Option<AssetInfo>>,
    },

    WithdrawAdminFees {
        pool: String,
    },
    WithdrawMany {
        pools: Vec<Option<String>>,
    },
    KillPool {
        pool: String,
    },
    UnkillPool {
        pool: String,
    },

    CommitTransferOwnership {
        pool: String,
        new_owner: String,
    },
    ApplyTransferOwnership {
        pool: String,
    },
    AcceptTransferOwnership {
        pool: String,
    },
    RevertTransferOwnership {
        pool: String,
    },

    CommitNewParameters {
        pool: String,
        parameters: PoolParameters,
    },
    /// Can't be called through another contract
    ApplyNewParameters {
        pool: String,
    },
    RevertNewParameters {
        pool: String,
    },

    RampAGamma {
        pool: String,
        future_a: Uint128,
        future_gamma: Uint128,
        future_time: u64,
    },
    StopRampAGamma {
        pool: String,
    },

    SetAdminFeeReceiver {
        pool: String,
        receiver: String,
    },
    SetReferralCode {
        pool: String,
        code: String,
    },

    SetDonationApproval {
        pool: String,
        caller: String,
        approved: bool,
    },
    DonateAdminFees {
        pool: String,
    },
}
