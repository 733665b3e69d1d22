//! Group identifiers.
//!
//! The twelve groups are lettered A through L. Alphabetical order is
//! load-bearing: pot-1 seeding and the pot-n scan order both walk
//! `ALL_GROUPS` front to back.

use serde::{Deserialize, Serialize};

/// The number of groups.
pub const GROUP_COUNT: usize = 12;

/// The number of seats in a group, one per pot.
pub const GROUP_SIZE: usize = 4;

/// A group identifier.
///
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum GroupId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9,
    K = 10,
    L = 11,
}

/// All group identifiers in alphabetical order.
pub const ALL_GROUPS: [GroupId; GROUP_COUNT] = [
    GroupId::A,
    GroupId::B,
    GroupId::C,
    GroupId::D,
    GroupId::E,
    GroupId::F,
    GroupId::G,
    GroupId::H,
    GroupId::I,
    GroupId::J,
    GroupId::K,
    GroupId::L,
];

impl GroupId {
    /// Returns the group letter.
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Parses a group identifier from its letter.
    pub fn from_letter(c: char) -> Option<GroupId> {
        let offset = (c as u32).wrapping_sub('A' as u32);
        if offset < GROUP_COUNT as u32 {
            Some(ALL_GROUPS[offset as usize])
        } else {
            None
        }
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
