//! Confederation-exclusivity rules and the group legality check.
//!
//! The default rule caps every confederation at one team per group, with a
//! single designated confederation (UEFA in the standard tournament) allowed
//! two. The check is a pure predicate over a group's current composition.

use thiserror::Error;

use crate::field::{Confederation, GroupId};

use super::state::GroupState;

/// The per-group confederation caps for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRules {
    /// Cap applied to every confederation except `relaxed`.
    pub default_cap: u8,
    /// The one confederation allowed a higher cap.
    pub relaxed: Confederation,
    pub relaxed_cap: u8,
}

impl DrawRules {
    /// Returns the cap for the given confederation.
    pub fn cap(&self, conf: Confederation) -> u8 {
        if conf == self.relaxed {
            self.relaxed_cap
        } else {
            self.default_cap
        }
    }
}

impl Default for DrawRules {
    /// The standard 48-team tournament rule: one per confederation, UEFA
    /// allowed two.
    fn default() -> Self {
        DrawRules {
            default_cap: 1,
            relaxed: Confederation::Uefa,
            relaxed_cap: 2,
        }
    }
}

/// Why a group refused a candidate team.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("group {group} already holds {count} {conf} team(s), cap is {cap}")]
pub struct CapRefusal {
    pub group: GroupId,
    pub conf: Confederation,
    pub count: u8,
    pub cap: u8,
}

/// Decides whether a team of the given confederation may join a group.
///
/// Pure: looks only at the group's current confederation counts and the
/// rules. Capacity at the current pot level is the caller's concern.
pub fn check_confederation(
    group_id: GroupId,
    group: &GroupState,
    conf: Confederation,
    rules: &DrawRules,
) -> Result<(), CapRefusal> {
    let count = group.conf_count(conf);
    let cap = rules.cap(conf);
    if count >= cap {
        return Err(CapRefusal {
            group: group_id,
            conf,
            count,
            cap,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{GroupId, Team};

    fn group_with(confs: &[Confederation]) -> GroupState {
        let mut g = GroupState::new();
        for (i, &c) in confs.iter().enumerate() {
            assert!(g.place(i as u8 + 1, Team::new(&format!("T{}", i), c)));
        }
        g
    }

    #[test]
    fn allows_unrepresented_confederation() {
        let g = group_with(&[Confederation::Conmebol]);
        let rules = DrawRules::default();
        assert!(check_confederation(GroupId::A, &g, Confederation::Afc, &rules).is_ok());
    }

    #[test]
    fn denies_second_team_of_capped_confederation() {
        let g = group_with(&[Confederation::Conmebol]);
        let rules = DrawRules::default();
        let refusal =
            check_confederation(GroupId::A, &g, Confederation::Conmebol, &rules).unwrap_err();
        assert_eq!(refusal.conf, Confederation::Conmebol);
        assert_eq!(refusal.count, 1);
        assert_eq!(refusal.cap, 1);
    }

    #[test]
    fn relaxed_confederation_allowed_twice_but_not_thrice() {
        let rules = DrawRules::default();

        let one = group_with(&[Confederation::Uefa]);
        assert!(check_confederation(GroupId::B, &one, Confederation::Uefa, &rules).is_ok());

        let two = group_with(&[Confederation::Uefa, Confederation::Uefa]);
        let refusal =
            check_confederation(GroupId::B, &two, Confederation::Uefa, &rules).unwrap_err();
        assert_eq!(refusal.count, 2);
        assert_eq!(refusal.cap, 2);

        // A distinct, unrepresented confederation is still welcome.
        assert!(check_confederation(GroupId::B, &two, Confederation::Caf, &rules).is_ok());
    }

    #[test]
    fn refusal_message_names_the_group() {
        let g = group_with(&[Confederation::Ofc]);
        let rules = DrawRules::default();
        let refusal =
            check_confederation(GroupId::K, &g, Confederation::Ofc, &rules).unwrap_err();
        assert_eq!(
            refusal.to_string(),
            "group K already holds 1 OFC team(s), cap is 1"
        );
    }

    #[test]
    fn custom_cap_applies() {
        let rules = DrawRules {
            default_cap: 2,
            relaxed: Confederation::Uefa,
            relaxed_cap: 3,
        };
        let g = group_with(&[Confederation::Caf, Confederation::Caf]);
        assert!(check_confederation(GroupId::C, &g, Confederation::Caf, &rules).is_err());
        let one = group_with(&[Confederation::Caf]);
        assert!(check_confederation(GroupId::C, &one, Confederation::Caf, &rules).is_ok());
    }
}
