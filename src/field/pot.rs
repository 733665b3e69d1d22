//! Pots and host seats.
//!
//! A pot is a seeding tier of twelve teams; four pots make up the 48-team
//! field. Host seats fix a team to a (group, slot) pair ahead of the draw.

use serde::{Deserialize, Serialize};

use super::group::GroupId;
use super::team::Team;

/// The number of pots.
pub const POT_COUNT: usize = 4;

/// The number of teams in each pot.
pub const POT_SIZE: usize = 12;

/// The number of teams in a full field.
pub const TEAM_COUNT: usize = POT_COUNT * POT_SIZE;

/// The four seeding pots, in pot order 1 to 4.
///
/// A `PotSet` is a plain container; the draw engine validates sizes before
/// any placement is made.
#[derive(Debug, Clone, PartialEq)]
pub struct PotSet {
    pub pots: [Vec<Team>; POT_COUNT],
}

impl PotSet {
    pub fn new(pots: [Vec<Team>; POT_COUNT]) -> PotSet {
        PotSet { pots }
    }

    /// Returns the teams of pot `number` (1-based). Panics if out of range.
    pub fn pot(&self, number: u8) -> &[Team] {
        &self.pots[number as usize - 1]
    }

    /// Total number of teams across all pots.
    pub fn team_count(&self) -> usize {
        self.pots.iter().map(Vec::len).sum()
    }

    /// Iterates over all teams, pot 1 first.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.pots.iter().flatten()
    }
}

/// A fixed pre-assignment of a host team to a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSeat {
    /// Code of the team in pot 1 taking this seat.
    pub code: String,
    pub group: GroupId,
    /// Slot index 1-4. Host seats are pot-1 seats, so this is always 1.
    pub slot: u8,
}

impl HostSeat {
    pub fn new(code: &str, group: GroupId, slot: u8) -> HostSeat {
        HostSeat {
            code: code.to_string(),
            group,
            slot,
        }
    }
}
