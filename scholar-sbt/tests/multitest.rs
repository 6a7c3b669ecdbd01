use cosmwasm_std::{Addr, Empty};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use scholar_sbt::contract::{execute, instantiate, migrate, query};
use scholar_sbt::error::ContractError;
use scholar_sbt::msg::*;
use scholar_sbt::state::BADGE_SLOTS;

fn scholar_sbt_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(execute, instantiate, query).with_migrate(migrate);
    Box::new(contract)
}

struct Suite {
    app: App,
    contract: Addr,
    admin: Addr,
}

impl Suite {
    fn new() -> Self {
        let mut app = App::default();
        let admin = app.api().addr_make("admin");
        let code_id = app.store_code(scholar_sbt_contract());
        let contract = app
            .instantiate_contract(
                code_id,
                admin.clone(),
                &InstantiateMsg {},
                &[],
                "scholar-sbt",
                None,
            )
            .unwrap();
        Suite {
            app,
            contract,
            admin,
        }
    }

    fn addr(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    fn exec(&mut self, sender: &Addr, msg: ExecuteMsg) -> Result<(), ContractError> {
        self.app
            .execute_contract(sender.clone(), self.contract.clone(), &msg, &[])
            .map(|_| ())
            .map_err(|err| err.downcast::<ContractError>().unwrap())
    }

    fn create_milestone(&mut self, sender: &Addr, name: &str, uri: &str) -> Result<(), ContractError> {
        self.exec(
            sender,
            ExecuteMsg::CreateMilestone {
                name: name.to_string(),
                uri: uri.to_string(),
            },
        )
    }

    fn badges(&self, student: &Addr) -> [u64; BADGE_SLOTS] {
        let res: ScholarBadgesResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::ScholarBadges {
                    student: student.to_string(),
                },
            )
            .unwrap();
        res.slots
    }

    fn milestone_count(&self) -> u64 {
        let res: MilestoneCountResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.contract, &QueryMsg::MilestoneCount {})
            .unwrap();
        res.count
    }
}

#[test]
fn test_student_claim_flow() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let student = suite.addr("student");

    suite
        .create_milestone(&admin, "Lakshya Batch", "ipfs://QmTest")
        .unwrap();
    assert_eq!(suite.milestone_count(), 1);

    let milestone: MilestoneResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.contract, &QueryMsg::Milestone { milestone_id: 1 })
        .unwrap();
    assert_eq!(milestone.name, "Lakshya Batch");
    assert_eq!(milestone.uri, "ipfs://QmTest");

    suite.exec(&student, ExecuteMsg::OptIn {}).unwrap();
    assert_eq!(suite.badges(&student), [0u64; BADGE_SLOTS]);

    let mut expected = [0u64; BADGE_SLOTS];
    expected[0] = 1;

    suite
        .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: 1 })
        .unwrap();
    assert_eq!(suite.badges(&student), expected);

    suite
        .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: 1 })
        .unwrap();
    assert_eq!(suite.badges(&student), expected);

    let err = suite
        .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: 2 })
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::OutOfRange {
            milestone_id: 2,
            count: 1
        }
    );
    assert_eq!(suite.badges(&student), expected);
}

#[test]
fn test_non_admin_cannot_create_milestone() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let student = suite.addr("student");

    suite.create_milestone(&admin, "first", "ipfs://first").unwrap();

    let err = suite
        .create_milestone(&student, "forged", "ipfs://forged")
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "admin".to_string()
        }
    );
    assert_eq!(suite.milestone_count(), 1);
}

#[test]
fn test_verifier_reads_any_student() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let student = suite.addr("student");
    let verifier = suite.addr("verifier");

    for i in 1..=3 {
        suite
            .create_milestone(&admin, &format!("m{}", i), &format!("ipfs://m{}", i))
            .unwrap();
    }
    suite.exec(&student, ExecuteMsg::OptIn {}).unwrap();
    suite
        .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: 3 })
        .unwrap();
    suite
        .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: 1 })
        .unwrap();

    // Queries carry no sender; the verifier only needs the student's address
    let earned: EarnedBadgesResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::EarnedBadges {
                student: student.to_string(),
            },
        )
        .unwrap();
    assert_eq!(earned.milestone_ids, vec![3, 1]);

    let has: HasBadgeResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::HasBadge {
                student: verifier.to_string(),
                milestone_id: 3,
            },
        )
        .unwrap();
    assert!(!has.has_badge);
}

#[test]
fn test_failed_claim_leaves_full_list_untouched() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let student = suite.addr("student");

    for i in 1..=17 {
        suite
            .create_milestone(&admin, &format!("m{}", i), "ipfs://m")
            .unwrap();
    }
    suite.exec(&student, ExecuteMsg::OptIn {}).unwrap();
    for id in (1..=16).rev() {
        suite
            .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: id })
            .unwrap();
    }
    let full = suite.badges(&student);
    assert_eq!(full[0], 16);
    assert_eq!(full[15], 1);

    let err = suite
        .exec(&student, ExecuteMsg::ClaimScholarSbt { milestone_id: 17 })
        .unwrap_err();
    assert_eq!(err, ContractError::CapacityExceeded { capacity: 16 });
    assert_eq!(suite.badges(&student), full);
}

#[test]
fn test_coin_round_trip() {
    let mut suite = Suite::new();
    let student = suite.addr("student");

    suite.exec(&student, ExecuteMsg::OptIn {}).unwrap();
    suite
        .exec(&student, ExecuteMsg::EarnCoins { amount: 80 })
        .unwrap();
    suite
        .exec(
            &student,
            ExecuteMsg::RedeemReward {
                reward_id: 2,
                cost: 50,
            },
        )
        .unwrap();

    let err = suite
        .exec(
            &student,
            ExecuteMsg::RedeemReward {
                reward_id: 2,
                cost: 50,
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::InsufficientBalance {
            balance: 30,
            cost: 50
        }
    );

    let balance: CoinBalanceResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::CoinBalance {
                student: student.to_string(),
            },
        )
        .unwrap();
    assert_eq!(balance.balance, 30);
}
