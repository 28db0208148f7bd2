use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// Fee and repegging parameters staged on a pool with `CommitNewParameters`.
///
/// The proxy forwards these values untouched; the pool is responsible for
/// bounds checking. Pools expect roughly:
/// - `mid_fee <= out_fee`
/// - `admin_fee` below the pool's admin fee cap
/// - `fee_gamma` within `[1, 2^100]`
/// - `ma_half_time` (seconds) under 7 days
#[cw_serde]
pub struct PoolParameters {
    pub mid_fee: Uint128,
    pub out_fee: Uint128,
    pub admin_fee: Uint128,
    pub fee_gamma: Uint128,
    pub allowed_extra_profit: Uint128,
    pub adjustment_step: Uint128,
    pub ma_half_time: u64,
}

/// Administrative messages understood by managed pools.
///
/// A pool may not implement every message; in that case it fails the call and
/// the whole transaction is reverted.
#[cw_serde]
pub enum PoolExecuteMsg {
    /// Transfer accrued admin fees to the pool's admin fee receiver
    ClaimAdminFees {},

    /// Stage a new pool owner
    CommitTransferOwnership { owner: String },
    /// Activate the staged owner once the pool's delay has passed
    ApplyTransferOwnership {},
    /// Accept a staged ownership transfer
    AcceptTransferOwnership {},
    /// Drop the staged owner
    RevertTransferOwnership {},

    /// Stage new fee parameters
    CommitNewParameters { parameters: PoolParameters },
    /// Activate the staged fee parameters once the pool's delay has passed
    ApplyNewParameters {},
    /// Drop the staged fee parameters
    RevertNewParameters {},

    /// Start ramping amplification and gamma towards new values
    RampAGamma {
        future_a: Uint128,
        future_gamma: Uint128,
        /// Unix time (seconds) at which the ramp ends
        future_time: u64,
    },
    /// Freeze A and gamma at their current values
    StopRampAGamma {},

    SetAdminFeeReceiver { receiver: String },
    SetReferralCode { code: String },

    /// Donate accrued admin fees back to liquidity providers
    DonateAdminFees {},

    Kill {},
    Unkill {},
}
