// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Candidates by party from the Straits Times candidate listing graphic.
//!
//! Each constituency is a `div.constituency-section` with the name in an `h2`,
//! a `div.party-block` per party (party name in `h3`, candidates as `li`) and
//! a `div.electors` containing the number of electors somewhere in its text.


use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use crate::constituency::{PartialConstituencyRecord, PartyRecord, SourceMapping};
use crate::parse_util::{first_integer_token, first_text, text_content};
use crate::sources::SourceExtractor;

pub const STRAITS_TIMES_URL : &str = "https://www.straitstimes.com/multimedia/graphics/2025/04/singapore-general-election-ge2025-candidates/index.html";

static SELECT_SECTION : Lazy<Selector> = Lazy::new(||Selector::parse("div.constituency-section").unwrap());
static SELECT_NAME : Lazy<Selector> = Lazy::new(||Selector::parse("h2").unwrap());
static SELECT_PARTY_BLOCK : Lazy<Selector> = Lazy::new(||Selector::parse("div.party-block").unwrap());
static SELECT_PARTY_NAME : Lazy<Selector> = Lazy::new(||Selector::parse("h3").unwrap());
static SELECT_CANDIDATE : Lazy<Selector> = Lazy::new(||Selector::parse("li").unwrap());
static SELECT_ELECTORS : Lazy<Selector> = Lazy::new(||Selector::parse("div.electors").unwrap());

pub struct StraitsTimesCandidates {}

impl SourceExtractor for StraitsTimesCandidates {
    fn name(&self) -> &'static str { "Straits Times" }
    fn url(&self) -> &'static str { STRAITS_TIMES_URL }

    fn extract(&self,document:&str) -> SourceMapping {
        let html = Html::parse_document(document);
        let mut res = SourceMapping::new(self.name());
        let mut sections = 0;
        for (index,section) in html.select(&SELECT_SECTION).enumerate() {
            sections+=1;
            match parse_section(&section) {
                Ok((name,record)) => res.push(name,record),
                Err(reason) => res.skip_section(format!("#{}",index+1),reason),
            }
        }
        if sections==0 { res.skip_section("document".to_string(),"no div.constituency-section found".to_string()); }
        info!("{} : {} constituencies, {} sections skipped",self.name(),res.len(),res.skipped_sections().len());
        res
    }
}

/// Parse one constituency section. A missing name or party header makes the section unusable;
/// a missing elector count does not.
fn parse_section(section:&ElementRef<'_>) -> Result<(String,PartialConstituencyRecord),String> {
    let name = first_text(section,&SELECT_NAME).ok_or_else(||"no constituency name (h2)".to_string())?;
    let mut parties = PartyRecord::default();
    for (block_index,block) in section.select(&SELECT_PARTY_BLOCK).enumerate() {
        let party = first_text(&block,&SELECT_PARTY_NAME).ok_or_else(||format!("party block {} of {} has no party name (h3)",block_index+1,name))?;
        let candidates = block.select(&SELECT_CANDIDATE).map(|li|text_content(&li)).filter(|c|!c.is_empty());
        parties.get_or_insert_default(party).extend(candidates);
    }
    let number_of_electors = section.select(&SELECT_ELECTORS).next().and_then(|e|first_integer_token(&text_content(&e)));
    if number_of_electors.is_none() { debug!("No number of electors for {}",name); }
    Ok((name,PartialConstituencyRecord{ parties: Some(parties), number_of_electors, additional_info: None }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parties_and_electors() {
        let html = r#"<html><body>
          <div class="constituency-section">
            <h2> Ang Mo Kio  GRC </h2>
            <div class="electors">Electors: 144,298</div>
            <div class="party-block"><h3>PAP</h3><ul><li>Lee Hsien Loong</li><li> Ng Chee Meng </li></ul></div>
            <div class="party-block"><h3>PPP</h3><ul><li>Martinn Ho</li></ul></div>
            <div class="party-block"><h3>PAP</h3><ul><li>Victor Lye</li></ul></div>
          </div>
          <div class="constituency-section">
            <h2>Bukit Panjang SMC</h2>
            <div class="party-block"><h3>SDP</h3><ul><li>Paul Tambyah</li></ul></div>
          </div>
        </body></html>"#;
        let mapping = StraitsTimesCandidates{}.extract(html);
        assert_eq!(2,mapping.len());
        assert!(mapping.skipped_sections().is_empty());
        let entries : Vec<_> = mapping.iter().collect();
        assert_eq!("Ang Mo Kio GRC",entries[0].0);
        let amk = entries[0].1;
        assert_eq!(Some(144298),amk.number_of_electors);
        let parties = amk.parties.as_ref().unwrap();
        assert_eq!(vec!["PAP","PPP"],parties.keys().collect::<Vec<_>>());
        assert_eq!(Some(&vec!["Lee Hsien Loong".to_string(),"Ng Chee Meng".to_string(),"Victor Lye".to_string()]),parties.get("PAP"));
        assert_eq!(None,amk.additional_info);
        // no electors block means the count is unknown, which later becomes 0.
        assert_eq!(None,entries[1].1.number_of_electors);
        assert_eq!(0,entries[1].1.clone().complete().number_of_electors);
    }

    #[test]
    fn malformed_sections_are_skipped() {
        let html = r#"
          <div class="constituency-section"><h2>One SMC</h2><div class="party-block"><h3>A</h3><li>x</li></div></div>
          <div class="constituency-section"><div class="party-block"><h3>A</h3><li>y</li></div></div>
          <div class="constituency-section"><h2>Three SMC</h2><div class="party-block"><li>z</li></div></div>
          <div class="constituency-section"><h2>Four SMC</h2></div>"#;
        let mapping = StraitsTimesCandidates{}.extract(html);
        assert_eq!(vec!["One SMC","Four SMC"],mapping.iter().map(|(n,_)|n).collect::<Vec<_>>());
        assert_eq!(2,mapping.skipped_sections().len());
        assert!(mapping.skipped_sections()[0].to_string().contains("#2"));
        assert!(mapping.skipped_sections()[1].to_string().contains("Three SMC"));
        assert_eq!(Some(PartyRecord::default()),mapping.iter().nth(1).unwrap().1.parties);
    }

    #[test]
    fn page_without_sections_is_reported() {
        let mapping = StraitsTimesCandidates{}.extract("<html><body><p>Page moved</p></body></html>");
        assert!(mapping.is_empty());
        assert_eq!(1,mapping.skipped_sections().len());
        let problem = mapping.skipped_sections()[0].to_string();
        assert!(problem.contains("Straits Times"));
        assert!(problem.contains("div.constituency-section"));
    }
}
