// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Supplementary notes from the government elections portal.
//! Each `div.constituency-info` has the constituency name in an `h3` and the note in a `p`.


use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::info;
use crate::constituency::{PartialConstituencyRecord, SourceMapping};
use crate::parse_util::first_text;
use crate::sources::SourceExtractor;

pub const DATA_GOV_SG_URL : &str = "https://elections.data.gov.sg/en";

static SELECT_BLOCK : Lazy<Selector> = Lazy::new(||Selector::parse("div.constituency-info").unwrap());
static SELECT_NAME : Lazy<Selector> = Lazy::new(||Selector::parse("h3").unwrap());
static SELECT_INFO : Lazy<Selector> = Lazy::new(||Selector::parse("p").unwrap());

pub struct DataGovSgElections {}

impl SourceExtractor for DataGovSgElections {
    fn name(&self) -> &'static str { "elections.data.gov.sg" }
    fn url(&self) -> &'static str { DATA_GOV_SG_URL }

    fn extract(&self,document:&str) -> SourceMapping {
        let html = Html::parse_document(document);
        let mut res = SourceMapping::new(self.name());
        let mut blocks = 0;
        for (index,block) in html.select(&SELECT_BLOCK).enumerate() {
            blocks+=1;
            match parse_block(&block) {
                Ok((name,record)) => res.push(name,record),
                Err(reason) => res.skip_section(format!("#{}",index+1),reason),
            }
        }
        if blocks==0 { res.skip_section("document".to_string(),"no div.constituency-info found".to_string()); }
        info!("{} : {} constituencies, {} sections skipped",self.name(),res.len(),res.skipped_sections().len());
        res
    }
}

/// This source does not list parties, so parties and electors are left unknown.
fn parse_block(block:&ElementRef<'_>) -> Result<(String,PartialConstituencyRecord),String> {
    let name = first_text(block,&SELECT_NAME).ok_or_else(||"no constituency name (h3)".to_string())?;
    let info = first_text(block,&SELECT_INFO).ok_or_else(||format!("no information paragraph for {}",name))?;
    Ok((name,PartialConstituencyRecord{ parties: None, number_of_electors: None, additional_info: Some(info) }))
}
