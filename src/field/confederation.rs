//! Confederation definitions.
//!
//! The six regional confederations are enumerated in alphabetical order by
//! abbreviation. The confederation is the draw's exclusivity key: group
//! composition rules are expressed as per-confederation caps.

use serde::{Deserialize, Serialize};

/// The number of confederations.
pub const CONFEDERATION_COUNT: usize = 6;

/// A regional confederation.
///
/// Variants are in alphabetical order by abbreviation.
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Confederation {
    Afc = 0,      // Asia
    Caf = 1,      // Africa
    Concacaf = 2, // North and Central America, Caribbean
    Conmebol = 3, // South America
    Ofc = 4,      // Oceania
    Uefa = 5,     // Europe
}

/// All confederation variants in index order.
pub const ALL_CONFEDERATIONS: [Confederation; CONFEDERATION_COUNT] = [
    Confederation::Afc,
    Confederation::Caf,
    Confederation::Concacaf,
    Confederation::Conmebol,
    Confederation::Ofc,
    Confederation::Uefa,
];

impl Confederation {
    /// Returns the official uppercase abbreviation.
    pub const fn abbr(self) -> &'static str {
        match self {
            Confederation::Afc => "AFC",
            Confederation::Caf => "CAF",
            Confederation::Concacaf => "CONCACAF",
            Confederation::Conmebol => "CONMEBOL",
            Confederation::Ofc => "OFC",
            Confederation::Uefa => "UEFA",
        }
    }

    /// Parses a confederation from its uppercase abbreviation.
    pub fn from_abbr(s: &str) -> Option<Confederation> {
        ALL_CONFEDERATIONS.iter().copied().find(|c| c.abbr() == s)
    }

    /// Returns the single-character draw-sheet code.
    pub const fn sheet_char(self) -> char {
        match self {
            Confederation::Afc => 'a',
            Confederation::Caf => 'c',
            Confederation::Concacaf => 'n',
            Confederation::Conmebol => 's',
            Confederation::Ofc => 'o',
            Confederation::Uefa => 'u',
        }
    }

    /// Parses a confederation from its single-character draw-sheet code.
    pub fn from_sheet_char(c: char) -> Option<Confederation> {
        match c {
            'a' => Some(Confederation::Afc),
            'c' => Some(Confederation::Caf),
            'n' => Some(Confederation::Concacaf),
            's' => Some(Confederation::Conmebol),
            'o' => Some(Confederation::Ofc),
            'u' => Some(Confederation::Uefa),
            _ => None,
        }
    }
}

impl std::fmt::Display for Confederation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbr())
    }
}
