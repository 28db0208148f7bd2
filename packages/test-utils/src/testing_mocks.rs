use std::{cell::RefCell, collections::HashMap, rc::Rc};

use cosmwasm_std::{
    testing::{MockApi, MockQuerier, MockStorage},
    to_json_binary, Addr, Binary, ContractResult, CustomQuery, OwnedDeps, QuerierResult,
    StdResult, SystemError, SystemResult, WasmQuery,
};

pub type WasmQueryFunc = Box<dyn Fn(&WasmQuery) -> QuerierResult>;

/// Wasm querier that routes every query to the mock registered for the target
/// contract. Addresses without a mock behave like accounts: every query
/// against them fails with `NoSuchContract`.
#[derive(Clone)]
pub struct MockWasmQuerier {
    contract_mocks: Rc<RefCell<HashMap<String, WasmQueryFunc>>>,
}

impl MockWasmQuerier {
    pub fn new(contract_mocks: HashMap<String, WasmQueryFunc>) -> Self {
        Self {
            contract_mocks: Rc::new(RefCell::new(contract_mocks)),
        }
    }

    pub fn insert_mock(&self, mock: (String, WasmQueryFunc)) {
        self.contract_mocks.borrow_mut().insert(mock.0, mock.1);
    }

    pub fn handler(&self, query: &WasmQuery) -> QuerierResult {
        let contract_addr = match query {
            WasmQuery::Smart { contract_addr, .. } => contract_addr,
            WasmQuery::Raw { contract_addr, .. } => contract_addr,
            WasmQuery::ContractInfo { contract_addr } => contract_addr,
            _ => {
                return SystemResult::Err(SystemError::UnsupportedRequest {
                    kind: "unsupported wasm query type".to_string(),
                })
            }
        };

        let contract_mocks = self.contract_mocks.borrow();
        match contract_mocks.get(contract_addr) {
            Some(handler) => (handler)(query),
            None => SystemResult::Err(SystemError::NoSuchContract {
                addr: contract_addr.clone(),
            }),
        }
    }

    /// Installs this querier as the wasm handler of the given mock dependencies.
    pub fn install<C: CustomQuery>(
        &self,
        deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier, C>,
    ) {
        // Clones share the same `contract_mocks`, so mocks inserted later are
        // visible to the installed handler without reinstalling it.
        let querier_for_deps = self.clone();
        deps.querier.update_wasm(move |q| querier_for_deps.handler(q));
    }
}

/// Registers a mock that answers smart queries sent to `contract` with
/// `smart_query_handler`, and contract info queries with a minimal payload.
pub fn setup_contract_smart_query_mock<T>(
    contract: Addr,
    smart_query_handler: T,
) -> (String, WasmQueryFunc)
where
    T: Fn(&Binary) -> StdResult<Binary> + 'static,
{
    let contract_addr = contract.to_string();

    let response = Box::new(move |query: &WasmQuery| match query {
        WasmQuery::Smart { contract_addr, msg } => {
            if contract_addr != contract.as_str() {
                return SystemResult::Err(SystemError::UnsupportedRequest {
                    kind: "unexpected contract address in smart query contract mock".to_string(),
                });
            }

            match smart_query_handler(msg) {
                Ok(response) => SystemResult::Ok(ContractResult::Ok(response)),
                Err(e) => SystemResult::Err(SystemError::UnsupportedRequest {
                    kind: format!("error returned by contract mock: {e}"),
                }),
            }
        }
        WasmQuery::ContractInfo { .. } => contract_info_response(&contract),
        _ => SystemResult::Err(SystemError::UnsupportedRequest {
            kind: "only smart and contract info queries are supported in this mock".to_string(),
        }),
    });

    (contract_addr, response)
}

/// Registers an address as a contract that answers nothing but contract info
/// queries. Useful when only the existence of the contract matters.
pub fn setup_contract_info_mock(contract: Addr) -> (String, WasmQueryFunc) {
    let contract_addr = contract.to_string();

    let response = Box::new(move |query: &WasmQuery| match query {
        WasmQuery::ContractInfo { .. } => contract_info_response(&contract),
        _ => SystemResult::Err(SystemError::UnsupportedRequest {
            kind: "only contract info queries are supported in this mock".to_string(),
        }),
    });

    (contract_addr, response)
}

fn contract_info_response(contract: &Addr) -> QuerierResult {
    #[derive(serde::Serialize)]
    struct MockContractInfo {
        code_id: u64,
        creator: String,
        admin: Option<String>,
        pinned: bool,
        ibc_port: Option<String>,
    }

    let info = MockContractInfo {
        code_id: 1,
        creator: contract.to_string(),
        admin: None,
        pinned: false,
        ibc_port: None,
    };

    match to_json_binary(&info) {
        Ok(binary) => SystemResult::Ok(ContractResult::Ok(binary)),
        Err(e) => SystemResult::Err(SystemError::InvalidResponse {
            error: e.to_string(),
            response: Binary::default(),
        }),
    }
}
