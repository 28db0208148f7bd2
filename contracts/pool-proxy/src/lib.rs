pub mod admins;
pub mod burner;
pub mod contract;
pub mod error;
pub mod lock;
pub mod migration;
pub mod msg;
pub mod pool;
pub mod query;
pub mod state;

pub use crate::contract::{execute, instantiate, query, reply};
pub use crate::error::ContractError;
pub use crate::msg::{ExecuteMsg, InstantiateMsg};
pub use crate::query::QueryMsg;




#[cfg(test)]
mod testing_pool;
