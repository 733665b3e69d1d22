//! Draw assignment engine.
//!
//! Turns four seeded pots into a valid twelve-group draw under the
//! confederation-exclusivity rules, one randomized placement at a time.

pub mod constraint;
pub mod engine;
pub mod lookahead;
pub mod state;

pub use constraint::{check_confederation, CapRefusal, DrawRules};
pub use engine::{AssignmentEvent, CompletedDraw, DrawEngine, DrawError, DrawRun, GroupSeat};
pub use lookahead::completion_feasible;
pub use state::{DrawState, GroupSnapshot, GroupState};
