//! Field representation: the teams, pots, groups, and confederations that
//! make up a 48-team draw.

pub mod confederation;
pub mod group;
pub mod pot;
pub mod team;

pub use confederation::{Confederation, ALL_CONFEDERATIONS, CONFEDERATION_COUNT};
pub use group::{GroupId, ALL_GROUPS, GROUP_COUNT, GROUP_SIZE};
pub use pot::{HostSeat, PotSet, POT_COUNT, POT_SIZE, TEAM_COUNT};
pub use team::Team;
