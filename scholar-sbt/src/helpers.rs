use cosmwasm_std::{Addr, Deps, MessageInfo};

use crate::error::ContractError;
use crate::state::{BadgeSlots, CLAIMED_BADGES, CONFIG, MILESTONE_COUNT};

pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
        });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Milestone ids are valid in `1..=MILESTONE_COUNT`.
pub fn assert_milestone_exists(deps: Deps, milestone_id: u64) -> Result<(), ContractError> {
    let count = MILESTONE_COUNT.load(deps.storage)?;
    if milestone_id == 0 || milestone_id > count {
        return Err(ContractError::OutOfRange {
            milestone_id,
            count,
        });
    }
    Ok(())
}

pub fn is_opted_in(deps: Deps, account: &Addr) -> bool {
    CLAIMED_BADGES.has(deps.storage, account)
}

/// Load the account's badge slots, mapping a missing record to `NotOptedIn`.
pub fn load_badges(deps: Deps, account: &Addr) -> Result<BadgeSlots, ContractError> {
    CLAIMED_BADGES
        .may_load(deps.storage, account)?
        .ok_or_else(|| ContractError::NotOptedIn {
            account: account.to_string(),
        })
}

pub fn assert_opted_in(deps: Deps, account: &Addr) -> Result<(), ContractError> {
    if !is_opted_in(deps, account) {
        return Err(ContractError::NotOptedIn {
            account: account.to_string(),
        });
    }
    Ok(())
}
