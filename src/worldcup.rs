//! Standard data for the 2026 tournament.
//!
//! The 48-team field in draw-sheet form, seeded into pots by the final
//! ranking window, with the three co-hosts on their fixed seats. Pot
//! construction from live rankings belongs to the caller; this module only
//! carries the reference field so simulations and tests have real data.

use crate::field::{HostSeat, PotSet};
use crate::sheet::parse_sheet;

/// Draw sheet of the 2026 field: four pots of twelve and the host seats.
///
/// Pot 4 carries the six playoff qualifiers (four UEFA paths, two
/// inter-confederation paths), marked `+`.
pub const FIELD_2026: &str = concat!(
    "nmex*,ncan*,nusa*,uesp,sarg,ufra,ueng,sbra,upor,uned,ubel,uger/",
    "ucro,cmar,scol,suru,usui,ajpn,csen,airn,akor,secu,uaut,aaus/",
    "unor,npan,cegy,calg,usco,spar,ctun,cciv,auzb,aqat,aksa,crsa/",
    "ajor,ccpv,cgha,ncuw,nhai,onzl,uita+,uden+,utur+,uukr+,ccod+,sbol+/",
    "mex:A1,can:B1,usa:D1"
);

/// Parses the 2026 field into pots and host seats.
pub fn field_2026() -> (PotSet, Vec<HostSeat>) {
    parse_sheet(FIELD_2026).expect("2026 field sheet is well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Confederation, GroupId, POT_SIZE};

    #[test]
    fn field_has_four_pots_of_twelve() {
        let (pots, _) = field_2026();
        for pot in &pots.pots {
            assert_eq!(pot.len(), POT_SIZE);
        }
    }

    #[test]
    fn three_hosts_on_slot_one_seats() {
        let (pots, hosts) = field_2026();
        assert_eq!(hosts.len(), 3);
        assert!(hosts.iter().all(|h| h.slot == 1));
        assert_eq!(
            hosts.iter().map(|h| h.group).collect::<Vec<_>>(),
            vec![GroupId::A, GroupId::B, GroupId::D]
        );
        for seat in &hosts {
            let team = pots.pots[0]
                .iter()
                .find(|t| t.code == seat.code)
                .expect("host is seeded in pot 1");
            assert!(team.host);
        }
    }

    #[test]
    fn confederation_tallies_match_the_format() {
        let (pots, _) = field_2026();
        let count = |conf: Confederation| {
            pots.teams().filter(|t| t.confederation == conf).count()
        };
        assert_eq!(count(Confederation::Uefa), 16);
        assert_eq!(count(Confederation::Caf), 10);
        assert_eq!(count(Confederation::Afc), 8);
        assert_eq!(count(Confederation::Conmebol), 7);
        assert_eq!(count(Confederation::Concacaf), 6);
        assert_eq!(count(Confederation::Ofc), 1);
        assert_eq!(pots.team_count(), 48);
    }

    #[test]
    fn six_playoff_qualifiers_in_pot_four() {
        let (pots, _) = field_2026();
        assert_eq!(pots.pots[3].iter().filter(|t| t.playoff).count(), 6);
        assert!(pots.teams().filter(|t| t.playoff).count() == 6);
    }
}
