use cosmwasm_schema::write_api;
use pool_proxy::migration::migrate::MigrateMsg;
use pool_proxy::{ExecuteMsg, InstantiateMsg, QueryMsg};

fn main() {
    write_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
        migrate: MigrateMsg,
    };
}
