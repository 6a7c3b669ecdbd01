use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

/// Number of badge slots allocated to each scholar at opt-in.
pub const BADGE_SLOTS: usize = 16;

/// Slot value marking an unused position. Milestone ids start at 1.
pub const EMPTY_SLOT: u64 = 0;

/// Contract-level configuration
#[cw_serde]
pub struct Config {
    /// Instantiating account. No message rotates it.
    pub admin: Addr,
}

/// Immutable milestone record, keyed by its sequential id
#[cw_serde]
pub struct Milestone {
    /// Display name (e.g. "Lakshya Batch 90%")
    pub name: String,
    /// Off-chain metadata pointer (e.g. an IPFS link)
    pub uri: String,
}

/// Result of a successful claim against a [`BadgeSlots`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The milestone was written into the first empty slot.
    Inserted { slot: usize },
    /// The milestone already occupied `slot`; nothing changed.
    AlreadyClaimed { slot: usize },
}

/// Fixed-capacity, insertion-ordered set of claimed milestone ids.
///
/// Slots hold either [`EMPTY_SLOT`] or a milestone id. New ids go into the
/// lowest-index empty slot and never move afterwards; the list is never
/// compacted, so membership is always checked across all slots.
#[cw_serde]
#[derive(Copy, Default)]
pub struct BadgeSlots {
    pub slots: [u64; BADGE_SLOTS],
}

impl BadgeSlots {
    pub fn contains(&self, milestone_id: u64) -> bool {
        milestone_id != EMPTY_SLOT && self.slots.contains(&milestone_id)
    }

    /// Non-empty slots in slot order.
    pub fn earned(&self) -> Vec<u64> {
        self.slots
            .iter()
            .copied()
            .filter(|id| *id != EMPTY_SLOT)
            .collect()
    }

    /// First-fit insert. `milestone_id` must be non-zero; callers range-check it.
    ///
    /// The scan runs over a staged copy and only replaces `self` once a slot
    /// has been found, so a full list is left untouched on error.
    pub fn claim(&mut self, milestone_id: u64) -> Result<ClaimOutcome, ContractError> {
        let mut staged = self.slots;
        let mut inserted = None;

        for (index, slot) in staged.iter_mut().enumerate() {
            if *slot == milestone_id {
                return Ok(ClaimOutcome::AlreadyClaimed { slot: index });
            }
            if *slot == EMPTY_SLOT && inserted.is_none() {
                *slot = milestone_id;
                inserted = Some(index);
            }
        }

        let slot = inserted.ok_or(ContractError::CapacityExceeded {
            capacity: BADGE_SLOTS as u32,
        })?;
        self.slots = staged;
        Ok(ClaimOutcome::Inserted { slot })
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const MILESTONE_COUNT: Item<u64> = Item::new("milestone_count");

/// milestone_id -> Milestone (1-based, gapless)
pub const MILESTONES: Map<u64, Milestone> = Map::new("milestones");

/// scholar -> claimed badge slots. Present only while the account is opted in.
pub const CLAIMED_BADGES: Map<&Addr, BadgeSlots> = Map::new("claimed_badges");

/// scholar -> coin balance, allocated alongside the badge slots
pub const COINS: Map<&Addr, u64> = Map::new("coins");
