use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};
use interface::asset::AssetInfo;

/// Holders of the three administrative roles.
#[cw_serde]
pub struct Admins {
    /// Manages roles, burners, pool ownership and fee receivers
    pub ownership_admin: Addr,
    /// Tunes pool parameters and A/gamma ramps
    pub parameter_admin: Addr,
    /// Kills pools and burners, reverts staged changes
    pub emergency_admin: Addr,
}

/// Burner registered for an asset. `asset` is `None` for the default burner.
#[cw_serde]
pub struct BurnerRecord {
    pub asset: Option<AssetInfo>,
    pub burner: Addr,
}

/// Roles currently in effect
pub const ADMINS: Item<Admins> = Item::new("admins");

/// Roles staged by `CommitAdmins`, activated as a whole by `ApplyAdmins`
pub const FUTURE_ADMINS: Item<Admins> = Item::new("future_admins");

/// BURNERS: key(asset storage key) -> BurnerRecord
///
/// The default burner lives under `DEFAULT_BURNER_KEY`.
pub const BURNERS: Map<String, BurnerRecord> = Map::new("burners");

pub const DEFAULT_BURNER_KEY: &str = "default";

/// Rejects all burns while set
pub const BURNER_KILL: Item<bool> = Item::new("burner_kill");

/// DONATION_APPROVALS: key(pool, caller) -> approved
pub const DONATION_APPROVALS: Map<(&Addr, &Addr), bool> = Map::new("donation_approvals");

// Set while a guarded operation has messages in flight
pub const ADMIN_LOCK: Item<bool> = Item::new("admin_lock");
pub const BURN_LOCK: Item<bool> = Item::new("burn_lock");

const DEFAULT_QUERY_LIMIT: u32 = 10;
const MAX_QUERY_LIMIT: u32 = 30;

pub fn burner_key(asset: Option<&AssetInfo>) -> String {
    match asset {
        Some(asset) => asset.storage_key(),
        None => DEFAULT_BURNER_KEY.to_string(),
    }
}

pub fn load_burner(storage: &dyn Storage, asset: Option<&AssetInfo>) -> StdResult<Option<Addr>> {
    Ok(BURNERS
        .may_load(storage, burner_key(asset))?
        .map(|record| record.burner))
}

/// Records `burner` for `asset`, or unregisters the asset when `burner` is `None`.
pub fn save_burner(
    storage: &mut dyn Storage,
    asset: Option<&AssetInfo>,
    burner: Option<&Addr>,
) -> StdResult<()> {
    let key = burner_key(asset);
    match burner {
        Some(burner) => BURNERS.save(
            storage,
            key,
            &BurnerRecord {
                asset: asset.cloned(),
                burner: burner.clone(),
            },
        ),
        None => {
            BURNERS.remove(storage, key);
            Ok(())
        }
    }
}

pub fn get_burners(
    storage: &dyn Storage,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<BurnerRecord>> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    BURNERS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, record)| record))
        .collect()
}

pub fn is_burner_killed(storage: &dyn Storage) -> StdResult<bool> {
    Ok(BURNER_KILL.may_load(storage)?.unwrap_or(false))
}

pub fn is_donation_approved(storage: &dyn Storage, pool: &Addr, caller: &Addr) -> StdResult<bool> {
    Ok(DONATION_APPROVALS
        .may_load(storage, (pool, caller))?
        .unwrap_or(false))
}
