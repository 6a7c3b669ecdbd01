use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_admin, assert_milestone_exists, assert_opted_in, is_opted_in, load_badges,
    reject_funds,
};
use crate::msg::{
    CoinBalanceResponse, EarnedBadgesResponse, ExecuteMsg, HasBadgeResponse, InstantiateMsg,
    MigrateMsg, MilestoneCountResponse, MilestoneResponse, MilestonesResponse, QueryMsg,
    ScholarBadgesResponse,
};
use crate::state::{
    BadgeSlots, ClaimOutcome, Config, Milestone, CLAIMED_BADGES, COINS, CONFIG, MILESTONES,
    MILESTONE_COUNT,
};

const CONTRACT_NAME: &str = "crates.io:scholar-sbt";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: info.sender,
    };
    CONFIG.save(deps.storage, &config)?;
    MILESTONE_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", config.admin.as_str()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateMilestone { name, uri } => {
            execute_create_milestone(deps, env, info, name, uri)
        }
        ExecuteMsg::OptIn {} => execute_opt_in(deps, env, info),
        ExecuteMsg::OptOut {} => execute_opt_out(deps, env, info),
        ExecuteMsg::ClaimScholarSbt { milestone_id } => {
            execute_claim_scholar_sbt(deps, env, info, milestone_id)
        }
        ExecuteMsg::EarnCoins { amount } => execute_earn_coins(deps, env, info, amount),
        ExecuteMsg::RedeemReward { reward_id, cost } => {
            execute_redeem_reward(deps, env, info, reward_id, cost)
        }
    }
}

// ─── Execute: Milestone registry ────────────────────────────────────────────

pub fn execute_create_milestone(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    name: String,
    uri: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let milestone_id = MILESTONE_COUNT.load(deps.storage)? + 1;
    MILESTONE_COUNT.save(deps.storage, &milestone_id)?;
    MILESTONES.save(
        deps.storage,
        milestone_id,
        &Milestone {
            name: name.clone(),
            uri: uri.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "create_milestone")
        .add_attribute("milestone_id", milestone_id.to_string())
        .add_attribute("name", name)
        .add_attribute("uri", uri))
}

// ─── Execute: Opt-in lifecycle ──────────────────────────────────────────────

pub fn execute_opt_in(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    if is_opted_in(deps.as_ref(), &info.sender) {
        return Err(ContractError::AlreadyOptedIn {
            account: info.sender.to_string(),
        });
    }

    CLAIMED_BADGES.save(deps.storage, &info.sender, &BadgeSlots::default())?;
    COINS.save(deps.storage, &info.sender, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "opt_in")
        .add_attribute("student", info.sender.as_str()))
}

pub fn execute_opt_out(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_opted_in(deps.as_ref(), &info.sender)?;

    CLAIMED_BADGES.remove(deps.storage, &info.sender);
    COINS.remove(deps.storage, &info.sender);

    Ok(Response::new()
        .add_attribute("action", "opt_out")
        .add_attribute("student", info.sender.as_str()))
}

// ─── Execute: Claims ────────────────────────────────────────────────────────

pub fn execute_claim_scholar_sbt(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    milestone_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_milestone_exists(deps.as_ref(), milestone_id)?;

    let mut badges = load_badges(deps.as_ref(), &info.sender)?;
    let (slot, already_claimed) = match badges.claim(milestone_id)? {
        ClaimOutcome::AlreadyClaimed { slot } => (slot, true),
        ClaimOutcome::Inserted { slot } => {
            CLAIMED_BADGES.save(deps.storage, &info.sender, &badges)?;
            (slot, false)
        }
    };

    Ok(Response::new()
        .add_attribute("action", "claim_scholar_sbt")
        .add_attribute("student", info.sender.as_str())
        .add_attribute("milestone_id", milestone_id.to_string())
        .add_attribute("slot", slot.to_string())
        .add_attribute("already_claimed", already_claimed.to_string()))
}

// ─── Execute: Coins ─────────────────────────────────────────────────────────

/// Unauthenticated self-credit. The dashboard decides when coins are earned.
pub fn execute_earn_coins(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_opted_in(deps.as_ref(), &info.sender)?;

    let balance = COINS
        .load(deps.storage, &info.sender)?
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    COINS.save(deps.storage, &info.sender, &balance)?;

    Ok(Response::new()
        .add_attribute("action", "earn_coins")
        .add_attribute("student", info.sender.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("balance", balance.to_string()))
}

pub fn execute_redeem_reward(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    reward_id: u64,
    cost: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_opted_in(deps.as_ref(), &info.sender)?;

    let balance = COINS.load(deps.storage, &info.sender)?;
    if balance < cost {
        return Err(ContractError::InsufficientBalance { balance, cost });
    }
    let remaining = balance - cost;
    COINS.save(deps.storage, &info.sender, &remaining)?;

    // Reward catalog lives off-chain; the event is the redemption record.
    Ok(Response::new()
        .add_attribute("action", "redeem_reward")
        .add_attribute("student", info.sender.as_str())
        .add_attribute("reward_id", reward_id.to_string())
        .add_attribute("cost", cost.to_string())
        .add_attribute("balance", remaining.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::MilestoneCount {} => query_milestone_count(deps),
        QueryMsg::Milestone { milestone_id } => query_milestone(deps, milestone_id),
        QueryMsg::Milestones { start_after, limit } => {
            query_milestones(deps, start_after, limit)
        }
        QueryMsg::ScholarBadges { student } => query_scholar_badges(deps, student),
        QueryMsg::EarnedBadges { student } => query_earned_badges(deps, student),
        QueryMsg::HasBadge {
            student,
            milestone_id,
        } => query_has_badge(deps, student, milestone_id),
        QueryMsg::CoinBalance { student } => query_coin_balance(deps, student),
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_milestone_count(deps: Deps) -> StdResult<Binary> {
    let count = MILESTONE_COUNT.load(deps.storage)?;
    to_json_binary(&MilestoneCountResponse { count })
}

pub fn query_milestone(deps: Deps, milestone_id: u64) -> StdResult<Binary> {
    let milestone = MILESTONES.load(deps.storage, milestone_id)?;
    to_json_binary(&MilestoneResponse {
        milestone_id,
        name: milestone.name,
        uri: milestone.uri,
    })
}

pub fn query_milestones(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let milestones = MILESTONES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(milestone_id, m)| MilestoneResponse {
                milestone_id,
                name: m.name,
                uri: m.uri,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&MilestonesResponse { milestones })
}

/// Public by design: verifiers read any scholar's slots without authorization.
pub fn query_scholar_badges(deps: Deps, student: String) -> StdResult<Binary> {
    let student_addr = deps.api.addr_validate(&student)?;
    let badges = CLAIMED_BADGES.load(deps.storage, &student_addr)?;

    to_json_binary(&ScholarBadgesResponse {
        student,
        slots: badges.slots,
    })
}

pub fn query_earned_badges(deps: Deps, student: String) -> StdResult<Binary> {
    let student_addr = deps.api.addr_validate(&student)?;
    let badges = CLAIMED_BADGES.load(deps.storage, &student_addr)?;

    to_json_binary(&EarnedBadgesResponse {
        student,
        milestone_ids: badges.earned(),
    })
}

pub fn query_has_badge(deps: Deps, student: String, milestone_id: u64) -> StdResult<Binary> {
    let student_addr = deps.api.addr_validate(&student)?;
    let has_badge = CLAIMED_BADGES
        .may_load(deps.storage, &student_addr)?
        .map(|badges| badges.contains(milestone_id))
        .unwrap_or(false);

    to_json_binary(&HasBadgeResponse { has_badge })
}

pub fn query_coin_balance(deps: Deps, student: String) -> StdResult<Binary> {
    let student_addr = deps.api.addr_validate(&student)?;
    let balance = COINS.load(deps.storage, &student_addr)?;

    to_json_binary(&CoinBalanceResponse { student, balance })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
