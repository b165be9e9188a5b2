// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! The contesting parties and the seats they held going into the election.
//! There is no official machine readable list, so it is written down here.


use serde::{Deserialize, Serialize};
use crate::constituency::InsertionOrderedMap;

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct PartySummary {
    pub seats : u32,
}

pub type PartyList = InsertionOrderedMap<PartySummary>;

pub fn ge2025_parties() -> PartyList {
    [
        ("People's Action Party",93),
        ("Workers' Party",10),
        ("Progress Singapore Party",0),
        ("Singapore Democratic Party",0),
        ("National Solidarity Party",0),
        ("Reform Party",0),
        ("Singapore People's Party",0),
        ("Singapore Democratic Alliance",0),
    ].into_iter().map(|(name,seats)|(name.to_string(),PartySummary{seats})).collect()
}

pub fn total_seats(parties:&PartyList) -> u32 {
    parties.iter().map(|(_,p)|p.seats).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_list() {
        let parties = ge2025_parties();
        assert_eq!(8,parties.len());
        assert_eq!(103,total_seats(&parties));
        assert_eq!(Some("People's Action Party"),parties.keys().next());
        assert!(serde_json::to_string(&parties).unwrap().starts_with(r#"{"People's Action Party":{"seats":93},"Workers' Party""#));
    }
}
