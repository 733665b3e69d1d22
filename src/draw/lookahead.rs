//! Placement feasibility lookahead.
//!
//! Before a placement is committed, the engine verifies that the teams still
//! undrawn in the current pot can all be seated somewhere legal afterwards.
//! Each group accepts exactly one team per pot phase, so feasibility is a
//! bipartite matching question: undrawn teams on one side, groups still open
//! at this pot level on the other, with an edge wherever the group's
//! confederation counts admit the team. The check is exact for the current
//! pot; teams of later pots are not examined.

use crate::field::{
    Confederation, GroupId, ALL_CONFEDERATIONS, ALL_GROUPS, CONFEDERATION_COUNT, GROUP_COUNT,
};

use super::constraint::DrawRules;
use super::state::DrawState;

/// Returns true if, with `candidate` tentatively seated in `target`, every
/// confederation in `undrawn` can still be placed into a distinct open group
/// without breaching a cap.
///
/// `pot` is the current phase number: a group is open while its occupancy is
/// below `pot`.
pub fn completion_feasible(
    state: &DrawState,
    rules: &DrawRules,
    pot: u8,
    target: GroupId,
    candidate: Confederation,
    undrawn: &[Confederation],
) -> bool {
    // Effective occupancy and confederation counts after the tentative commit.
    let mut occupancy = [0u8; GROUP_COUNT];
    let mut counts = [[0u8; CONFEDERATION_COUNT]; GROUP_COUNT];
    for &id in &ALL_GROUPS {
        let g = state.group(id);
        occupancy[id as usize] = g.occupancy();
        for c in 0..CONFEDERATION_COUNT {
            counts[id as usize][c] = g.conf_count(ALL_CONFEDERATIONS[c]);
        }
    }
    occupancy[target as usize] += 1;
    counts[target as usize][candidate as usize] += 1;

    let open: Vec<usize> = (0..GROUP_COUNT)
        .filter(|&g| occupancy[g] < pot)
        .collect();
    if undrawn.len() > open.len() {
        return false;
    }

    // Admissible open groups per undrawn team.
    let adjacency: Vec<Vec<usize>> = undrawn
        .iter()
        .map(|&conf| {
            open.iter()
                .enumerate()
                .filter(|&(_, &g)| counts[g][conf as usize] < rules.cap(conf))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    // Kuhn's augmenting-path matching: every team must claim a distinct group.
    let mut claimed_by: Vec<Option<usize>> = vec![None; open.len()];
    for team in 0..undrawn.len() {
        let mut visited = vec![false; open.len()];
        if !claim(team, &adjacency, &mut visited, &mut claimed_by) {
            return false;
        }
    }
    true
}

/// Tries to seat `team`, displacing earlier claimants along augmenting paths.
fn claim(
    team: usize,
    adjacency: &[Vec<usize>],
    visited: &mut [bool],
    claimed_by: &mut [Option<usize>],
) -> bool {
    for &g in &adjacency[team] {
        if visited[g] {
            continue;
        }
        visited[g] = true;
        match claimed_by[g] {
            None => {
                claimed_by[g] = Some(team);
                return true;
            }
            Some(other) => {
                if claim(other, adjacency, visited, claimed_by) {
                    claimed_by[g] = Some(team);
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Team;

    use Confederation::*;

    /// Builds a state where each listed group holds the given confederations,
    /// seated from slot 1 upward.
    fn state_with(groups: &[(GroupId, &[Confederation])]) -> DrawState {
        let mut state = DrawState::new();
        let mut n = 0;
        for &(id, confs) in groups {
            for (i, &c) in confs.iter().enumerate() {
                n += 1;
                assert!(state.place(id, i as u8 + 1, Team::new(&format!("T{:02}", n), c)));
            }
        }
        state
    }

    #[test]
    fn empty_pot_is_always_feasible() {
        let state = state_with(&[(GroupId::A, &[Uefa])]);
        let rules = DrawRules::default();
        assert!(completion_feasible(
            &state,
            &rules,
            2,
            GroupId::A,
            Afc,
            &[]
        ));
    }

    #[test]
    fn rejects_when_undrawn_outnumber_open_groups() {
        // Phase 2 with only groups A and B below occupancy 2.
        let mut seated: Vec<(GroupId, &[Confederation])> = vec![
            (GroupId::A, &[Concacaf]),
            (GroupId::B, &[Conmebol]),
        ];
        for &g in &ALL_GROUPS[2..] {
            seated.push((g, &[Ofc, Afc]));
        }
        let state = state_with(&seated);
        let rules = DrawRules::default();

        // Committing into A leaves one open group for two undrawn teams.
        assert!(!completion_feasible(
            &state,
            &rules,
            2,
            GroupId::A,
            Uefa,
            &[Caf, Caf]
        ));
        assert!(completion_feasible(
            &state,
            &rules,
            2,
            GroupId::A,
            Uefa,
            &[Caf]
        ));
    }

    #[test]
    fn rejects_stranding_a_capped_confederation() {
        // Ten groups already hold a CAF team; two undrawn CAF teams need the
        // remaining two, so neither may go to a neutral filler.
        let mut seated: Vec<(GroupId, &[Confederation])> = Vec::new();
        for &g in &ALL_GROUPS[..10] {
            seated.push((g, &[Caf]));
        }
        seated.push((GroupId::K, &[Ofc]));
        seated.push((GroupId::L, &[Afc]));
        let state = state_with(&seated);
        let rules = DrawRules::default();

        // A UEFA filler into K would leave one CAF-free group for two teams.
        assert!(!completion_feasible(
            &state,
            &rules,
            2,
            GroupId::K,
            Uefa,
            &[Caf, Caf]
        ));
        // Into an already-CAF group it is fine.
        assert!(completion_feasible(
            &state,
            &rules,
            2,
            GroupId::A,
            Uefa,
            &[Caf, Caf]
        ));
    }

    #[test]
    fn detects_two_confederations_contending_for_one_group() {
        // After committing into A, groups B and C are the only open ones at
        // phase 4. The undrawn AFC and CAF teams each fit B alone (C holds
        // both), so the pair is infeasible even though either team on its
        // own would be fine. Counting groups per confederation in isolation
        // accepts this; the matching rejects it.
        let mut seated: Vec<(GroupId, &[Confederation])> = vec![
            (GroupId::A, &[Ofc, Concacaf, Conmebol]),
            (GroupId::B, &[Uefa, Uefa, Ofc]),
            (GroupId::C, &[Afc, Caf, Conmebol]),
        ];
        for &g in &ALL_GROUPS[3..] {
            seated.push((g, &[Uefa, Uefa, Concacaf, Conmebol]));
        }
        let state = state_with(&seated);
        let rules = DrawRules::default();

        assert!(!completion_feasible(
            &state,
            &rules,
            4,
            GroupId::A,
            Uefa,
            &[Afc, Caf]
        ));
        // Either team alone is placeable (in B).
        assert!(completion_feasible(&state, &rules, 4, GroupId::A, Uefa, &[Afc]));
        assert!(completion_feasible(&state, &rules, 4, GroupId::A, Uefa, &[Caf]));
    }

    #[test]
    fn relaxed_cap_keeps_groups_admissible() {
        // Every group holds one UEFA team; twelve more UEFA teams are still
        // feasible at phase 2 because the relaxed cap is two.
        let seated: Vec<(GroupId, &[Confederation])> =
            ALL_GROUPS.iter().map(|&g| (g, &[Uefa][..])).collect();
        let state = state_with(&seated);
        let rules = DrawRules::default();

        let undrawn = vec![Uefa; 11];
        assert!(completion_feasible(
            &state,
            &rules,
            2,
            GroupId::A,
            Uefa,
            &undrawn
        ));
    }

    #[test]
    fn matching_displaces_earlier_claims() {
        // Once C closes, group A admits AFC and CAF while group B admits
        // only AFC. A greedy first-fit parks the AFC team in A and strands
        // the CAF team; the augmenting path reseats it.
        let mut seated: Vec<(GroupId, &[Confederation])> = vec![
            (GroupId::A, &[Ofc]),
            (GroupId::B, &[Caf]),
            (GroupId::C, &[Conmebol]),
        ];
        for &g in &ALL_GROUPS[3..] {
            seated.push((g, &[Afc, Caf]));
        }
        let state = state_with(&seated);
        let rules = DrawRules::default();

        assert!(completion_feasible(
            &state,
            &rules,
            2,
            GroupId::C,
            Uefa,
            &[Afc, Caf]
        ));
    }
}
