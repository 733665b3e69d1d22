//! Team records.

use serde::{Deserialize, Serialize};

use super::confederation::Confederation;

/// An entrant in the draw. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Short unique identifier, conventionally the three-letter country code.
    pub code: String,
    pub confederation: Confederation,
    /// Co-host with a pre-assigned seat.
    pub host: bool,
    /// Qualified through an inter-confederation or continental playoff.
    pub playoff: bool,
}

impl Team {
    /// Creates a regular (non-host, non-playoff) team.
    pub fn new(code: &str, confederation: Confederation) -> Team {
        Team {
            code: code.to_string(),
            confederation,
            host: false,
            playoff: false,
        }
    }

    /// Creates a host team.
    pub fn host(code: &str, confederation: Confederation) -> Team {
        Team {
            host: true,
            ..Team::new(code, confederation)
        }
    }

    /// Creates a playoff-qualifier team.
    pub fn playoff(code: &str, confederation: Confederation) -> Team {
        Team {
            playoff: true,
            ..Team::new(code, confederation)
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}
