use std::collections::HashMap;

use cosmwasm_std::{from_json, Addr, CosmosMsg, ReplyOn, SubMsg, Uint128, WasmMsg};
use interface::pool::{PoolExecuteMsg, PoolParameters};
use test_utils::{
    testing_mocks::{setup_contract_info_mock, MockWasmQuerier},
    utils::get_message_info,
};

use crate::{
    contract::{execute, query, reply},
    error::ContractError,
    lock::{is_locked, CriticalSection, ReplyPayload},
    msg::ExecuteMsg,
    query::{DonationApprovalResponse, QueryMsg},
    testing::{
        setup_proxy, MockDeps, EMERGENCY_ADMIN, NON_ADMIN, OWNERSHIP_ADMIN, PARAMETER_ADMIN,
        POOL_1, POOL_2,
    },
    testing_mocks::success_reply,
};

const RELAYER_CONTRACT: &str = "relayer_contract";

fn assert_pool_msg(submsg: &SubMsg, pool: &Addr, expected: &PoolExecuteMsg) {
    match &submsg.msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr,
            msg,
            funds,
        }) => {
            assert_eq!(contract_addr, pool.as_str());
            assert_eq!(&from_json::<PoolExecuteMsg>(msg).unwrap(), expected);
            assert!(funds.is_empty());
        }
        _ => panic!("unexpected msg"),
    }
}

fn default_parameters() -> PoolParameters {
    PoolParameters {
        mid_fee: Uint128::new(26_000_000),
        out_fee: Uint128::new(45_000_000),
        admin_fee: Uint128::new(5_000_000_000),
        fee_gamma: Uint128::new(230_000_000_000_000),
        allowed_extra_profit: Uint128::new(2_000_000_000_000),
        adjustment_step: Uint128::new(146_000_000_000_000),
        ma_half_time: 600,
    }
}

struct GatewayCase {
    msg: ExecuteMsg,
    allowed: Vec<&'static str>,
    forwarded: PoolExecuteMsg,
}

fn gateway_cases(deps: &MockDeps) -> Vec<GatewayCase> {
    let pool = deps.api.addr_make(POOL_1).to_string();
    let new_owner = deps.api.addr_make("new_owner").to_string();
    let anyone = vec![OWNERSHIP_ADMIN, PARAMETER_ADMIN, EMERGENCY_ADMIN, NON_ADMIN];

    vec![
        GatewayCase {
            msg: ExecuteMsg::WithdrawAdminFees { pool: pool.clone() },
            allowed: anyone.clone(),
            forwarded: PoolExecuteMsg::ClaimAdminFees {},
        },
        GatewayCase {
            msg: ExecuteMsg::KillPool { pool: pool.clone() },
            allowed: vec![EMERGENCY_ADMIN],
            forwarded: PoolExecuteMsg::Kill {},
        },
        GatewayCase {
            msg: ExecuteMsg::UnkillPool { pool: pool.clone() },
            allowed: vec![OWNERSHIP_ADMIN, EMERGENCY_ADMIN],
            forwarded: PoolExecuteMsg::Unkill {},
        },
        GatewayCase {
            msg: ExecuteMsg::CommitTransferOwnership {
                pool: pool.clone(),
                new_owner: new_owner.clone(),
            },
            allowed: vec![OWNERSHIP_ADMIN],
            forwarded: PoolExecuteMsg::CommitTransferOwnership { owner: new_owner },
        },
        GatewayCase {
            msg: ExecuteMsg::ApplyTransferOwnership { pool: pool.clone() },
            allowed: anyone.clone(),
            forwarded: PoolExecuteMsg::ApplyTransferOwnership {},
        },
        GatewayCase {
            msg: ExecuteMsg::AcceptTransferOwnership { pool: pool.clone() },
            allowed: anyone.clone(),
            forwarded: PoolExecuteMsg::AcceptTransferOwnership {},
        },
        GatewayCase {
            msg: ExecuteMsg::RevertTransferOwnership { pool: pool.clone() },
            allowed: vec![OWNERSHIP_ADMIN, EMERGENCY_ADMIN],
            forwarded: PoolExecuteMsg::RevertTransferOwnership {},
        },
        GatewayCase {
            msg: ExecuteMsg::CommitNewParameters {
                pool: pool.clone(),
                parameters: default_parameters(),
            },
            allowed: vec![PARAMETER_ADMIN],
            forwarded: PoolExecuteMsg::CommitNewParameters {
                parameters: default_parameters(),
            },
        },
        GatewayCase {
            msg: ExecuteMsg::ApplyNewParameters { pool: pool.clone() },
            allowed: anyone,
            forwarded: PoolExecuteMsg::ApplyNewParameters {},
        },
        GatewayCase {
            msg: ExecuteMsg::RevertNewParameters { pool: pool.clone() },
            allowed: vec![OWNERSHIP_ADMIN, PARAMETER_ADMIN, EMERGENCY_ADMIN],
            forwarded: PoolExecuteMsg::RevertNewParameters {},
        },
        GatewayCase {
            msg: ExecuteMsg::RampAGamma {
                pool: pool.clone(),
                future_a: Uint128::new(540_000),
                future_gamma: Uint128::new(80_500_000_000_000),
                future_time: 1_700_000_000,
            },
            allowed: vec![PARAMETER_ADMIN],
            forwarded: PoolExecuteMsg::RampAGamma {
                future_a: Uint128::new(540_000),
                future_gamma: Uint128::new(80_500_000_000_000),
                future_time: 1_700_000_000,
            },
        },
        GatewayCase {
            msg: ExecuteMsg::StopRampAGamma { pool: pool.clone() },
            allowed: vec![PARAMETER_ADMIN, EMERGENCY_ADMIN],
            forwarded: PoolExecuteMsg::StopRampAGamma {},
        },
        GatewayCase {
            msg: ExecuteMsg::SetReferralCode {
                pool: pool.clone(),
                code: "curve".to_string(),
            },
            allowed: vec![OWNERSHIP_ADMIN],
            forwarded: PoolExecuteMsg::SetReferralCode {
                code: "curve".to_string(),
            },
        },
        GatewayCase {
            msg: ExecuteMsg::DonateAdminFees { pool },
            allowed: vec![OWNERSHIP_ADMIN],
            forwarded: PoolExecuteMsg::DonateAdminFees {},
        },
    ]
}

#[test]
fn gateway_access_test() {
    let senders = [OWNERSHIP_ADMIN, PARAMETER_ADMIN, EMERGENCY_ADMIN, NON_ADMIN];

    let (deps, _) = setup_proxy();
    let case_count = gateway_cases(&deps).len();

    for case_index in 0..case_count {
        for sender in senders {
            let (mut deps, env) = setup_proxy();
            let pool = deps.api.addr_make(POOL_1);
            let case = gateway_cases(&deps).remove(case_index);
            let info = get_message_info(&deps.api, sender, &[]);

            let res = execute(deps.as_mut(), env.clone(), info.clone(), case.msg.clone());

            if !case.allowed.contains(&sender) {
                assert_eq!(
                    res.unwrap_err(),
                    ContractError::Unauthorized {},
                    "{sender} must not be able to send {:?}",
                    case.msg
                );
                assert!(!is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());
                continue;
            }

            let res = res.unwrap();
            assert_eq!(res.messages.len(), 1);
            assert_pool_msg(&res.messages[0], &pool, &case.forwarded);
            assert_eq!(res.messages[0].reply_on, ReplyOn::Success);
            assert_eq!(
                from_json::<ReplyPayload>(&res.messages[0].payload).unwrap(),
                ReplyPayload::ReleaseLock {
                    section: CriticalSection::Admin
                }
            );
            assert_eq!(res.attributes[1].value, pool.to_string());

            // Every gateway call holds the admin section until the pool call returns
            assert!(is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());
            let err = execute(
                deps.as_mut(),
                env.clone(),
                info,
                case.msg.clone(),
            )
            .unwrap_err();
            assert_eq!(
                err,
                ContractError::Reentrancy {
                    section: "admin".to_string()
                }
            );

            reply(deps.as_mut(), env, success_reply(&res.messages[0])).unwrap();
            assert!(!is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());
        }
    }
}

#[test]
fn set_admin_fee_receiver_test() {
    let (mut deps, env) = setup_proxy();
    let pool = deps.api.addr_make(POOL_1);
    let receiver = deps.api.addr_make("fee_receiver");
    let msg = ExecuteMsg::SetAdminFeeReceiver {
        pool: pool.to_string(),
        receiver: receiver.to_string(),
    };

    for sender in [PARAMETER_ADMIN, EMERGENCY_ADMIN, NON_ADMIN] {
        let info = get_message_info(&deps.api, sender, &[]);
        let err = execute(deps.as_mut(), env.clone(), info, msg.clone()).unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});
    }

    let owner_info = get_message_info(&deps.api, OWNERSHIP_ADMIN, &[]);
    let res = execute(deps.as_mut(), env.clone(), owner_info.clone(), msg.clone()).unwrap();

    assert_eq!(res.messages.len(), 1);
    assert_pool_msg(
        &res.messages[0],
        &pool,
        &PoolExecuteMsg::SetAdminFeeReceiver {
            receiver: receiver.to_string(),
        },
    );
    assert_eq!(res.messages[0].reply_on, ReplyOn::Never);
    assert!(!is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());

    // Not affected by an admin operation in flight
    let anyone_info = get_message_info(&deps.api, NON_ADMIN, &[]);
    execute(
        deps.as_mut(),
        env.clone(),
        anyone_info,
        ExecuteMsg::WithdrawAdminFees {
            pool: pool.to_string(),
        },
    )
    .unwrap();
    execute(deps.as_mut(), env, owner_info, msg).unwrap();
}

#[test]
fn donate_admin_fees_approval_test() {
    let (mut deps, env) = setup_proxy();
    let pool_1 = deps.api.addr_make(POOL_1).to_string();
    let pool_2 = deps.api.addr_make(POOL_2).to_string();
    let donor = deps.api.addr_make(NON_ADMIN).to_string();

    let owner_info = get_message_info(&deps.api, OWNERSHIP_ADMIN, &[]);
    let donor_info = get_message_info(&deps.api, NON_ADMIN, &[]);
    let parameter_info = get_message_info(&deps.api, PARAMETER_ADMIN, &[]);

    let query_approval = |deps: &MockDeps, pool: &str| -> bool {
        let res: DonationApprovalResponse = from_json(
            query(
                deps.as_ref(),
                env.clone(),
                QueryMsg::DonationApproval {
                    pool: pool.to_string(),
                    caller: donor.clone(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        res.approved
    };

    let err = execute(
        deps.as_mut(),
        env.clone(),
        donor_info.clone(),
        ExecuteMsg::DonateAdminFees {
            pool: pool_1.clone(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    // Only the ownership admin grants approvals
    let approve_msg = ExecuteMsg::SetDonationApproval {
        pool: pool_1.clone(),
        caller: donor.clone(),
        approved: true,
    };
    let err = execute(
        deps.as_mut(),
        env.clone(),
        parameter_info,
        approve_msg.clone(),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    let res = execute(deps.as_mut(), env.clone(), owner_info.clone(), approve_msg).unwrap();
    assert!(res.messages.is_empty());
    assert!(query_approval(&deps, &pool_1));
    assert!(!query_approval(&deps, &pool_2));

    let res = execute(
        deps.as_mut(),
        env.clone(),
        donor_info.clone(),
        ExecuteMsg::DonateAdminFees {
            pool: pool_1.clone(),
        },
    )
    .unwrap();
    assert_pool_msg(
        &res.messages[0],
        &deps.api.addr_make(POOL_1),
        &PoolExecuteMsg::DonateAdminFees {},
    );
    reply(deps.as_mut(), env.clone(), success_reply(&res.messages[0])).unwrap();

    // Approvals are per pool
    let err = execute(
        deps.as_mut(),
        env.clone(),
        donor_info.clone(),
        ExecuteMsg::DonateAdminFees {
            pool: pool_2.clone(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    execute(
        deps.as_mut(),
        env.clone(),
        owner_info,
        ExecuteMsg::SetDonationApproval {
            pool: pool_1.clone(),
            caller: donor.clone(),
            approved: false,
        },
    )
    .unwrap();
    assert!(!query_approval(&deps, &pool_1));

    let err = execute(
        deps.as_mut(),
        env.clone(),
        donor_info,
        ExecuteMsg::DonateAdminFees { pool: pool_1 },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});
}

#[test]
fn apply_new_parameters_rejects_contracts_test() {
    let (mut deps, env) = setup_proxy();
    let relayer = deps.api.addr_make(RELAYER_CONTRACT);
    let pool = deps.api.addr_make(POOL_1).to_string();

    let wasm_querier = MockWasmQuerier::new(HashMap::from_iter([setup_contract_info_mock(
        relayer.clone(),
    )]));
    wasm_querier.install(&mut deps);

    let relayer_info = get_message_info(&deps.api, RELAYER_CONTRACT, &[]);
    let err = execute(
        deps.as_mut(),
        env.clone(),
        relayer_info,
        ExecuteMsg::ApplyNewParameters { pool: pool.clone() },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::CallerIsContract {
            caller: relayer.to_string()
        }
    );
    assert!(!is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());

    // Accounts are unknown to the wasm module
    let account_info = get_message_info(&deps.api, NON_ADMIN, &[]);
    let res = execute(
        deps.as_mut(),
        env,
        account_info,
        ExecuteMsg::ApplyNewParameters { pool },
    )
    .unwrap();
    assert_eq!(res.messages.len(), 1);
}

#[test]
fn withdraw_many_test() {
    let (mut deps, env) = setup_proxy();
    let pool_1 = deps.api.addr_make(POOL_1);
    let pool_2 = deps.api.addr_make(POOL_2);
    let pool_3 = deps.api.addr_make("pool_3");
    let anyone_info = get_message_info(&deps.api, NON_ADMIN, &[]);

    let res = execute(
        deps.as_mut(),
        env.clone(),
        anyone_info.clone(),
        ExecuteMsg::WithdrawMany {
            pools: vec![
                Some(pool_1.to_string()),
                Some(pool_2.to_string()),
                None,
                Some(pool_3.to_string()),
            ],
        },
    )
    .unwrap();

    assert_eq!(res.messages.len(), 2);
    assert_pool_msg(&res.messages[0], &pool_1, &PoolExecuteMsg::ClaimAdminFees {});
    assert_pool_msg(&res.messages[1], &pool_2, &PoolExecuteMsg::ClaimAdminFees {});
    assert_eq!(res.messages[0].reply_on, ReplyOn::Never);
    assert_eq!(res.messages[1].reply_on, ReplyOn::Success);
    assert_eq!(res.attributes[1].value, format!("{pool_1},{pool_2}"));

    reply(deps.as_mut(), env.clone(), success_reply(&res.messages[1])).unwrap();
    assert!(!is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());

    // Nothing to withdraw from, nothing to lock
    let res = execute(
        deps.as_mut(),
        env.clone(),
        anyone_info.clone(),
        ExecuteMsg::WithdrawMany {
            pools: vec![None, Some(pool_3.to_string())],
        },
    )
    .unwrap();
    assert!(res.messages.is_empty());
    assert!(!is_locked(deps.as_ref().storage, CriticalSection::Admin).unwrap());

    let err = execute(
        deps.as_mut(),
        env.clone(),
        anyone_info.clone(),
        ExecuteMsg::WithdrawMany {
            pools: vec![Some(pool_3.to_string()); 21],
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::TooManyEntries { max: 20 });

    let err = execute(
        deps.as_mut(),
        env,
        anyone_info,
        ExecuteMsg::WithdrawMany {
            pools: vec![Some(pool_1.to_string()), Some("invalid pool".to_string())],
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Std(_)));
}
