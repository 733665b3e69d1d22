//! Draw-sheet encoding and decoding.
//!
//! A draw sheet is a compact single-line notation for a full draw input:
//! the four pots and the host seats, separated by `/`. Each team token is a
//! confederation code followed by the lowercase team code, with `*` marking
//! a host and `+` a playoff qualifier.
//!
//! Format: `<pot1>/<pot2>/<pot3>/<pot4>/<host seats>`
//!
//! Example token: `nmex*` is CONCACAF team MEX, a co-host. A host seat
//! entry reads `mex:A1`. Finished draws encode as group-ordered `MEX@A1`
//! tokens.

use thiserror::Error;

use crate::draw::CompletedDraw;
use crate::field::{Confederation, GroupId, HostSeat, PotSet, Team, POT_COUNT};

/// Errors that can occur during draw-sheet parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("expected 5 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("empty team token in pot {0}")]
    EmptyTeam(u8),

    #[error("unknown confederation code: '{0}'")]
    UnknownConfederation(char),

    #[error("team token '{0}' has no code")]
    MissingCode(String),

    #[error("invalid host seat entry: '{0}'")]
    InvalidHostSeat(String),

    #[error("unknown group letter: '{0}'")]
    UnknownGroup(char),

    #[error("invalid slot digit: '{0}'")]
    InvalidSlot(char),
}

/// Parses a full draw sheet into pots and host seats.
pub fn parse_sheet(sheet: &str) -> Result<(PotSet, Vec<HostSeat>), SheetError> {
    let sections: Vec<&str> = sheet.trim().split('/').collect();
    if sections.len() != POT_COUNT + 1 {
        return Err(SheetError::WrongSectionCount(sections.len()));
    }

    let mut pots: [Vec<Team>; POT_COUNT] = Default::default();
    for (i, section) in sections[..POT_COUNT].iter().enumerate() {
        if section.is_empty() {
            continue;
        }
        for token in section.split(',') {
            pots[i].push(parse_team(token, i as u8 + 1)?);
        }
    }

    let mut hosts = Vec::new();
    if !sections[POT_COUNT].is_empty() && sections[POT_COUNT] != "-" {
        for entry in sections[POT_COUNT].split(',') {
            hosts.push(parse_host_seat(entry)?);
        }
    }

    Ok((PotSet::new(pots), hosts))
}

/// Parses a team token like `nmex*` or `uita+`.
fn parse_team(token: &str, pot: u8) -> Result<Team, SheetError> {
    let mut chars = token.chars();
    let conf_char = chars.next().ok_or(SheetError::EmptyTeam(pot))?;
    let confederation = Confederation::from_sheet_char(conf_char)
        .ok_or(SheetError::UnknownConfederation(conf_char))?;

    let rest: &str = chars.as_str();
    let code = rest.trim_end_matches(['*', '+']);
    if code.is_empty() {
        return Err(SheetError::MissingCode(token.to_string()));
    }
    let flags = &rest[code.len()..];

    Ok(Team {
        code: code.to_uppercase(),
        confederation,
        host: flags.contains('*'),
        playoff: flags.contains('+'),
    })
}

/// Parses a host seat entry like `mex:A1`.
fn parse_host_seat(entry: &str) -> Result<HostSeat, SheetError> {
    let (code, seat) = entry
        .split_once(':')
        .ok_or_else(|| SheetError::InvalidHostSeat(entry.to_string()))?;
    let mut seat_chars = seat.chars();
    let (group_char, slot_char) = match (seat_chars.next(), seat_chars.next(), seat_chars.next()) {
        (Some(g), Some(s), None) => (g, s),
        _ => return Err(SheetError::InvalidHostSeat(entry.to_string())),
    };
    if code.is_empty() {
        return Err(SheetError::InvalidHostSeat(entry.to_string()));
    }
    let group = GroupId::from_letter(group_char).ok_or(SheetError::UnknownGroup(group_char))?;
    let slot = slot_char
        .to_digit(10)
        .filter(|&d| (1..=4).contains(&d))
        .ok_or(SheetError::InvalidSlot(slot_char))? as u8;
    Ok(HostSeat::new(&code.to_uppercase(), group, slot))
}

/// Encodes pots and host seats as a draw sheet. Inverse of `parse_sheet`.
pub fn encode_sheet(pots: &PotSet, hosts: &[HostSeat]) -> String {
    let mut sections: Vec<String> = pots
        .pots
        .iter()
        .map(|pot| {
            pot.iter()
                .map(encode_team)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    if hosts.is_empty() {
        sections.push("-".to_string());
    } else {
        sections.push(
            hosts
                .iter()
                .map(|h| format!("{}:{}{}", h.code.to_lowercase(), h.group, h.slot))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    sections.join("/")
}

/// Encodes one team as a sheet token.
fn encode_team(team: &Team) -> String {
    let mut token = String::new();
    token.push(team.confederation.sheet_char());
    token.push_str(&team.code.to_lowercase());
    if team.host {
        token.push('*');
    }
    if team.playoff {
        token.push('+');
    }
    token
}

/// Encodes a finished draw as group-ordered seat tokens, `MEX@A1` style.
pub fn encode_draw(draw: &CompletedDraw) -> String {
    let mut tokens = Vec::with_capacity(crate::field::TEAM_COUNT);
    for (id, seats) in draw.iter() {
        for (i, seat) in seats.iter().enumerate() {
            tokens.push(format!("{}@{}{}", seat.team.code, id, i + 1));
        }
    }
    tokens.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    use Confederation::*;

    #[test]
    fn parses_tokens_with_flags() {
        let (pots, hosts) = parse_sheet("nmex*,uita+/scol/ajpn/onzl/mex:A1").unwrap();
        assert_eq!(pots.pots[0].len(), 2);

        let mex = &pots.pots[0][0];
        assert_eq!(mex.code, "MEX");
        assert_eq!(mex.confederation, Concacaf);
        assert!(mex.host && !mex.playoff);

        let ita = &pots.pots[0][1];
        assert_eq!(ita.code, "ITA");
        assert!(!ita.host && ita.playoff);

        assert_eq!(pots.pots[1][0].confederation, Conmebol);
        assert_eq!(pots.pots[2][0].confederation, Afc);
        assert_eq!(pots.pots[3][0].confederation, Ofc);

        assert_eq!(hosts, vec![HostSeat::new("MEX", GroupId::A, 1)]);
    }

    #[test]
    fn dash_means_no_hosts() {
        let (_, hosts) = parse_sheet("uesp/ufra/uned/ubel/-").unwrap();
        assert!(hosts.is_empty());
    }

    #[test]
    fn roundtrips_through_encode() {
        let sheet = "nmex*,ncan*,uesp/scol,ajpn/cegy,usco/onzl,uita+/mex:A1,can:B1";
        let (pots, hosts) = parse_sheet(sheet).unwrap();
        assert_eq!(encode_sheet(&pots, &hosts), sheet);
    }

    #[test]
    fn roundtrips_empty_hosts_as_dash() {
        let sheet = "uesp/ufra/uned/ubel/-";
        let (pots, hosts) = parse_sheet(sheet).unwrap();
        assert_eq!(encode_sheet(&pots, &hosts), sheet);
    }

    #[test]
    fn wrong_section_count_is_rejected() {
        assert_eq!(
            parse_sheet("uesp/ufra/uned"),
            Err(SheetError::WrongSectionCount(3))
        );
        assert_eq!(
            parse_sheet("a/b/c/d/e/f"),
            Err(SheetError::WrongSectionCount(6))
        );
    }

    #[test]
    fn unknown_confederation_is_rejected() {
        assert_eq!(
            parse_sheet("xesp/ufra/uned/ubel/-"),
            Err(SheetError::UnknownConfederation('x'))
        );
    }

    #[test]
    fn token_without_code_is_rejected() {
        assert_eq!(
            parse_sheet("u*/ufra/uned/ubel/-"),
            Err(SheetError::MissingCode("u*".to_string()))
        );
    }

    #[test]
    fn bad_host_entries_are_rejected() {
        assert_eq!(
            parse_sheet("uesp/ufra/uned/ubel/mexA1"),
            Err(SheetError::InvalidHostSeat("mexA1".to_string()))
        );
        assert_eq!(
            parse_sheet("uesp/ufra/uned/ubel/mex:M1"),
            Err(SheetError::UnknownGroup('M'))
        );
        assert_eq!(
            parse_sheet("uesp/ufra/uned/ubel/mex:A5"),
            Err(SheetError::InvalidSlot('5'))
        );
        assert_eq!(
            parse_sheet("uesp/ufra/uned/ubel/mex:A12"),
            Err(SheetError::InvalidHostSeat("mex:A12".to_string()))
        );
    }

    #[test]
    fn encode_draw_lists_every_seat() {
        use crate::draw::{DrawEngine, DrawRules};
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let mut pots: [Vec<Team>; POT_COUNT] = Default::default();
        for (p, pot) in pots.iter_mut().enumerate() {
            for conf in crate::field::ALL_CONFEDERATIONS {
                for k in 0..2 {
                    pot.push(Team::new(&format!("{}{}{}", conf.abbr(), p + 1, k), conf));
                }
            }
        }
        let engine = DrawEngine::new(
            PotSet::new(pots),
            Vec::new(),
            DrawRules::default(),
            SmallRng::seed_from_u64(4),
        )
        .unwrap();
        let encoded = encode_draw(&engine.complete().unwrap());

        assert_eq!(encoded.split(',').count(), crate::field::TEAM_COUNT);
        assert!(encoded.contains("@A1"));
        assert!(encoded.contains("@L4"));
    }
}
