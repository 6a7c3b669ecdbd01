use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("milestone {milestone_id} is out of range (milestones created: {count})")]
    OutOfRange { milestone_id: u64, count: u64 },

    #[error("all {capacity} badge slots are in use")]
    CapacityExceeded { capacity: u32 },

    #[error("account {account} has not opted in")]
    NotOptedIn { account: String },

    #[error("account {account} has already opted in")]
    AlreadyOptedIn { account: String },

    #[error("insufficient coin balance: have {balance}, need {cost}")]
    InsufficientBalance { balance: u64, cost: u64 },

    #[error("overflow in arithmetic operation")]
    Overflow,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
