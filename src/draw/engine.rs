//! The draw engine.
//!
//! Runs the four-phase seeded draw: host seats first, then pot 1 into the
//! remaining slot-1 seats, then pots 2-4 under the confederation caps with
//! a feasibility lookahead. Placements are produced lazily as a stream of
//! `AssignmentEvent`s so a presentation layer can pace the reveal without
//! touching the outcome.

use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::field::{
    GroupId, HostSeat, PotSet, Team, ALL_GROUPS, GROUP_COUNT, GROUP_SIZE, POT_COUNT, POT_SIZE,
    TEAM_COUNT,
};

use super::constraint::{check_confederation, DrawRules};
use super::lookahead::completion_feasible;
use super::state::{DrawState, GroupSnapshot};

/// Errors that can abort a draw. None of them is retried internally; a
/// failed run exposes no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("pot {pot} has {len} teams, expected 12")]
    PotSize { pot: u8, len: usize },

    #[error("confederation cap must be at least 1, got {0}")]
    CapBelowOne(u8),

    #[error("relaxed cap {relaxed} is below the default cap {default}")]
    RelaxedCapBelowDefault { relaxed: u8, default: u8 },

    #[error("host {code} is not in pot 1")]
    UnknownHost { code: String },

    #[error("host seat {group}{slot} is not a slot-1 seat")]
    InvalidHostSeat { group: GroupId, slot: u8 },

    #[error("group {0} assigned to more than one host")]
    DuplicateHostSeat(GroupId),

    /// Draw deadlock: no group passes the capacity, confederation, and
    /// lookahead checks for the drawn team. Carries the state at failure.
    #[error("no eligible group for {team} drawn from pot {pot}")]
    Deadlock {
        team: Team,
        pot: u8,
        groups: Vec<GroupSnapshot>,
    },
}

/// One committed placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentEvent {
    /// Position in the event stream, 0-based. Host seats come first.
    pub sequence: u32,
    /// Pot the team was drawn from (1-4). Hosts report pot 1.
    pub pot: u8,
    pub team: Team,
    pub group: GroupId,
    /// Slot index 1-4 within the group.
    pub slot: u8,
}

/// A validated draw, ready to run.
///
/// All inputs, including the random generator, are injected here; nothing
/// is shared between runs. The engine is consumed by `events` or `complete`
/// and cannot be reused.
#[derive(Debug)]
pub struct DrawEngine {
    pots: [Vec<Team>; POT_COUNT],
    hosts: Vec<(Team, GroupId, u8)>,
    rules: DrawRules,
    rng: SmallRng,
}

impl DrawEngine {
    /// Validates the field and builds an engine.
    ///
    /// Fails before any placement if a pot is not exactly twelve teams, the
    /// rules are malformed, or a host seat does not resolve to a distinct
    /// slot-1 seat held by a pot-1 team.
    pub fn new(
        pots: PotSet,
        host_seats: Vec<HostSeat>,
        rules: DrawRules,
        rng: SmallRng,
    ) -> Result<DrawEngine, DrawError> {
        if rules.default_cap < 1 {
            return Err(DrawError::CapBelowOne(rules.default_cap));
        }
        if rules.relaxed_cap < 1 {
            return Err(DrawError::CapBelowOne(rules.relaxed_cap));
        }
        if rules.relaxed_cap < rules.default_cap {
            return Err(DrawError::RelaxedCapBelowDefault {
                relaxed: rules.relaxed_cap,
                default: rules.default_cap,
            });
        }

        for (i, pot) in pots.pots.iter().enumerate() {
            if pot.len() != POT_SIZE {
                return Err(DrawError::PotSize {
                    pot: i as u8 + 1,
                    len: pot.len(),
                });
            }
        }

        let mut pots = pots.pots;
        let mut hosts = Vec::with_capacity(host_seats.len());
        let mut taken_groups: Vec<GroupId> = Vec::new();
        for seat in host_seats {
            if seat.slot != 1 {
                return Err(DrawError::InvalidHostSeat {
                    group: seat.group,
                    slot: seat.slot,
                });
            }
            if taken_groups.contains(&seat.group) {
                return Err(DrawError::DuplicateHostSeat(seat.group));
            }
            let idx = pots[0]
                .iter()
                .position(|t| t.code == seat.code)
                .ok_or(DrawError::UnknownHost {
                    code: seat.code.clone(),
                })?;
            let team = pots[0].remove(idx);
            taken_groups.push(seat.group);
            hosts.push((team, seat.group, seat.slot));
        }

        Ok(DrawEngine {
            pots,
            hosts,
            rules,
            rng,
        })
    }

    /// Starts the draw, returning the lazy event producer.
    pub fn events(self) -> DrawRun {
        let host_groups: Vec<GroupId> = self.hosts.iter().map(|&(_, g, _)| g).collect();
        let seed_groups = ALL_GROUPS
            .iter()
            .copied()
            .filter(|g| !host_groups.contains(g))
            .collect();
        DrawRun {
            state: DrawState::new(),
            rules: self.rules,
            rng: self.rng,
            pots: self.pots,
            hosts: self.hosts.into_iter(),
            seed_groups,
            phase: 0,
            iteration: 0,
            sequence: 0,
            log: Vec::with_capacity(TEAM_COUNT),
            done: false,
        }
    }

    /// Runs the draw to completion, discarding intermediate events.
    pub fn complete(self) -> Result<CompletedDraw, DrawError> {
        self.events().finish()
    }
}

/// A draw in progress: a finite, non-restartable producer of placement
/// events. Yields one `AssignmentEvent` per call until the draw completes
/// (48 events) or fails, after which it is fused. Dropping it mid-stream
/// simply discards the in-progress state.
pub struct DrawRun {
    state: DrawState,
    rules: DrawRules,
    rng: SmallRng,
    pots: [Vec<Team>; POT_COUNT],
    hosts: std::vec::IntoIter<(Team, GroupId, u8)>,
    /// Hostless groups in alphabetical order; pot-1 draws fill these in order.
    seed_groups: Vec<GroupId>,
    /// Current pot index (0-based).
    phase: usize,
    /// Placements made in the current phase.
    iteration: usize,
    sequence: u32,
    log: Vec<AssignmentEvent>,
    done: bool,
}

impl DrawRun {
    /// Commits a placement and records the event.
    fn commit(&mut self, pot: u8, team: Team, group: GroupId, slot: u8) -> AssignmentEvent {
        let placed = self.state.place(group, slot, team.clone());
        debug_assert!(placed, "seat {}{} double-booked", group, slot);
        let event = AssignmentEvent {
            sequence: self.sequence,
            pot,
            team,
            group,
            slot,
        };
        self.sequence += 1;
        self.log.push(event.clone());
        event
    }

    /// Draws one team uniformly at random from the current pot.
    fn draw_team(&mut self) -> Team {
        let pot = &mut self.pots[self.phase];
        let idx = self.rng.gen_range(0..pot.len());
        pot.remove(idx)
    }

    /// Finds the first eligible group for `team`, scanning circularly from
    /// the group whose alphabetical position equals the iteration count.
    fn scan_groups(&self, team: &Team, pot_level: u8) -> Option<GroupId> {
        let undrawn: Vec<_> = self.pots[self.phase]
            .iter()
            .map(|t| t.confederation)
            .collect();
        for offset in 0..GROUP_COUNT {
            let id = ALL_GROUPS[(self.iteration + offset) % GROUP_COUNT];
            let group = self.state.group(id);
            if group.occupancy() >= pot_level {
                continue;
            }
            if check_confederation(id, group, team.confederation, &self.rules).is_err() {
                continue;
            }
            if !completion_feasible(
                &self.state,
                &self.rules,
                pot_level,
                id,
                team.confederation,
                &undrawn,
            ) {
                continue;
            }
            return Some(id);
        }
        None
    }

    /// Drives the remaining events and returns the finished grouping.
    pub fn finish(mut self) -> Result<CompletedDraw, DrawError> {
        while let Some(step) = self.next() {
            step?;
        }
        Ok(CompletedDraw::from_events(&self.log))
    }
}

impl Iterator for DrawRun {
    type Item = Result<AssignmentEvent, DrawError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Host seats are committed first, in table order, with no checks.
        if let Some((team, group, slot)) = self.hosts.next() {
            return Some(Ok(self.commit(1, team, group, slot)));
        }

        while self.phase < POT_COUNT && self.pots[self.phase].is_empty() {
            self.phase += 1;
            self.iteration = 0;
        }
        if self.phase == POT_COUNT {
            self.done = true;
            return None;
        }

        let pot_level = self.phase as u8 + 1;
        let team = self.draw_team();

        // Pot 1 fills the remaining slot-1 seats in alphabetical group
        // order, without confederation or lookahead checks.
        if pot_level == 1 {
            let group = self.seed_groups[self.iteration];
            self.iteration += 1;
            return Some(Ok(self.commit(1, team, group, 1)));
        }

        let group = match self.scan_groups(&team, pot_level) {
            Some(g) => g,
            None => {
                self.done = true;
                return Some(Err(DrawError::Deadlock {
                    team,
                    pot: pot_level,
                    groups: self.state.snapshot(),
                }));
            }
        };
        self.iteration += 1;

        let open = self.state.group(group).open_slots();
        let slot = open[self.rng.gen_range(0..open.len())];
        Some(Ok(self.commit(pot_level, team, group, slot)))
    }
}

/// A finished draw: every group holds four teams, one per pot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedDraw {
    groups: [[GroupSeat; GROUP_SIZE]; GROUP_COUNT],
}

/// One seat of a finished draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSeat {
    pub team: Team,
    /// Pot the team was drawn from.
    pub pot: u8,
}

impl CompletedDraw {
    /// Builds the grouping from a complete event log.
    fn from_events(log: &[AssignmentEvent]) -> CompletedDraw {
        let mut seats: [[Option<GroupSeat>; GROUP_SIZE]; GROUP_COUNT] = Default::default();
        for event in log {
            seats[event.group as usize][event.slot as usize - 1] = Some(GroupSeat {
                team: event.team.clone(),
                pot: event.pot,
            });
        }
        CompletedDraw {
            groups: seats.map(|group| group.map(|s| s.expect("completed draw missing a seat"))),
        }
    }

    /// The four seats of a group, indexed by slot (entry 0 is slot 1).
    pub fn group(&self, id: GroupId) -> &[GroupSeat; GROUP_SIZE] {
        &self.groups[id as usize]
    }

    /// Iterates over groups in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &[GroupSeat; GROUP_SIZE])> {
        ALL_GROUPS.iter().map(move |&id| (id, self.group(id)))
    }

    /// Finds the (group, slot) seat of a team by code.
    pub fn seat_of(&self, code: &str) -> Option<(GroupId, u8)> {
        for (id, seats) in self.iter() {
            for (i, seat) in seats.iter().enumerate() {
                if seat.team.code == code {
                    return Some((id, i as u8 + 1));
                }
            }
        }
        None
    }
}
