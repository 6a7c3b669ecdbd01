use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::state::BADGE_SLOTS;

/// The instantiating account becomes the admin.
#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a new milestone under the next sequential id (admin only)
    CreateMilestone { name: String, uri: String },
    /// Allocate sixteen empty badge slots and a zero coin balance for the sender
    OptIn {},
    /// Release the sender's badge slots and coin balance
    OptOut {},
    /// Record `milestone_id` in the sender's badge slots. Claiming twice is a no-op.
    ClaimScholarSbt { milestone_id: u64 },
    /// Self-service coin credit for the dashboard demo
    EarnCoins { amount: u64 },
    /// Spend `cost` coins on an off-chain reward
    RedeemReward { reward_id: u64, cost: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get contract configuration
    #[returns(crate::state::Config)]
    Config {},
    /// Number of milestones created so far (also the latest id)
    #[returns(MilestoneCountResponse)]
    MilestoneCount {},
    #[returns(MilestoneResponse)]
    Milestone { milestone_id: u64 },
    /// Page through milestones in id order
    #[returns(MilestonesResponse)]
    Milestones {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Full slot array for a scholar, empty slots included as 0
    #[returns(ScholarBadgesResponse)]
    ScholarBadges { student: String },
    /// Claimed milestone ids only, in slot order
    #[returns(EarnedBadgesResponse)]
    EarnedBadges { student: String },
    #[returns(HasBadgeResponse)]
    HasBadge { student: String, milestone_id: u64 },
    #[returns(CoinBalanceResponse)]
    CoinBalance { student: String },
}

#[cw_serde]
pub struct MilestoneCountResponse {
    pub count: u64,
}

#[cw_serde]
pub struct MilestoneResponse {
    pub milestone_id: u64,
    pub name: String,
    pub uri: String,
}

#[cw_serde]
pub struct MilestonesResponse {
    pub milestones: Vec<MilestoneResponse>,
}

#[cw_serde]
pub struct ScholarBadgesResponse {
    pub student: String,
    pub slots: [u64; BADGE_SLOTS],
}

#[cw_serde]
pub struct EarnedBadgesResponse {
    pub student: String,
    pub milestone_ids: Vec<u64>,
}

#[cw_serde]
pub struct HasBadgeResponse {
    pub has_badge: bool,
}

#[cw_serde]
pub struct CoinBalanceResponse {
    pub student: String,
    pub balance: u64,
}

#[cw_serde]
pub struct MigrateMsg {}
