//! Draw state representation.
//!
//! Holds the in-progress grouping: which team sits in which (group, slot)
//! seat, plus cached occupancy and per-confederation counts for the
//! eligibility checks. Owned exclusively by one draw run.

use serde::Serialize;

use crate::field::{
    Confederation, GroupId, Team, ALL_CONFEDERATIONS, ALL_GROUPS, CONFEDERATION_COUNT,
    GROUP_COUNT, GROUP_SIZE,
};

/// One group's seats during a draw.
///
/// Slots are indexed 1-4; index 0 of the backing array is slot 1.
/// Confederation counts and occupancy are maintained incrementally so the
/// eligibility scan never walks the seat array.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupState {
    slots: [Option<Team>; GROUP_SIZE],
    conf_counts: [u8; CONFEDERATION_COUNT],
    occupancy: u8,
}

impl GroupState {
    pub fn new() -> GroupState {
        GroupState {
            slots: [None, None, None, None],
            conf_counts: [0; CONFEDERATION_COUNT],
            occupancy: 0,
        }
    }

    /// Number of teams seated so far.
    pub fn occupancy(&self) -> u8 {
        self.occupancy
    }

    /// Number of seated teams from the given confederation.
    pub fn conf_count(&self, conf: Confederation) -> u8 {
        self.conf_counts[conf as usize]
    }

    /// Seats a team at the given slot (1-4).
    /// Returns false if the slot is out of range or already taken.
    pub fn place(&mut self, slot: u8, team: Team) -> bool {
        if slot < 1 || slot as usize > GROUP_SIZE {
            return false;
        }
        let idx = slot as usize - 1;
        if self.slots[idx].is_some() {
            return false;
        }
        self.conf_counts[team.confederation as usize] += 1;
        self.occupancy += 1;
        self.slots[idx] = Some(team);
        true
    }

    /// Returns the team at the given slot (1-4), if seated.
    pub fn team_at(&self, slot: u8) -> Option<&Team> {
        let idx = (slot as usize).checked_sub(1)?;
        self.slots.get(idx)?.as_ref()
    }

    /// Returns the empty slot indices in ascending order.
    pub fn open_slots(&self) -> Vec<u8> {
        (1..=GROUP_SIZE as u8)
            .filter(|&s| self.slots[s as usize - 1].is_none())
            .collect()
    }

    /// Iterates over seated teams in slot order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

impl Default for GroupState {
    fn default() -> Self {
        GroupState::new()
    }
}

/// The complete mutable state of one draw run.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    groups: [GroupState; GROUP_COUNT],
}

impl DrawState {
    /// Creates an empty state with no teams seated.
    pub fn new() -> DrawState {
        DrawState {
            groups: std::array::from_fn(|_| GroupState::new()),
        }
    }

    pub fn group(&self, id: GroupId) -> &GroupState {
        &self.groups[id as usize]
    }

    /// Seats a team in a group. Returns false if the slot is taken.
    pub fn place(&mut self, id: GroupId, slot: u8, team: Team) -> bool {
        self.groups[id as usize].place(slot, team)
    }

    /// Read-only image of every group, for failure reports.
    pub fn snapshot(&self) -> Vec<GroupSnapshot> {
        ALL_GROUPS
            .iter()
            .map(|&id| {
                let g = self.group(id);
                GroupSnapshot {
                    group: id,
                    teams: g.teams().map(|t| t.code.clone()).collect(),
                    conf_counts: ALL_CONFEDERATIONS
                        .iter()
                        .filter_map(|&c| {
                            let n = g.conf_count(c);
                            (n > 0).then_some((c, n))
                        })
                        .collect(),
                }
            })
            .collect()
    }
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState::new()
    }
}

/// A read-only image of one group at a point in the draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSnapshot {
    pub group: GroupId,
    /// Codes of seated teams, in slot order.
    pub teams: Vec<String>,
    /// Nonzero confederation counts.
    pub conf_counts: Vec<(Confederation, u8)>,
}
