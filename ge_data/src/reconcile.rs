// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Combine what the sources say into one record per canonical constituency name.
//!
//! Sources are given highest priority first. For each canonical name, the first source
//! that has the constituency (compared case insensitively) provides the record, and later
//! sources can only fill in fields that are still unknown. A canonical name that no
//! source mentions gets an empty record, with no parties and zero electors.
//!
//! If a source spells the same constituency several ways that only differ in case,
//! the one appearing first in the source document is used and the others are ignored.


use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use crate::constituency::{InsertionOrderedMap, PartialConstituencyRecord, ReconciledDataset, SourceMapping};
use crate::parse_util::fold_case;

/// Case insensitive lookup into a SourceMapping, with the first entry winning ties.
struct CaseInsensitiveIndex<'a> {
    mapping : &'a SourceMapping,
    first_with_folded_name : HashMap<String,&'a PartialConstituencyRecord>,
}

impl <'a> CaseInsensitiveIndex<'a> {
    fn new(mapping:&'a SourceMapping) -> Self {
        let mut first_with_folded_name = HashMap::new();
        for (name,record) in mapping.iter() {
            let folded = fold_case(name);
            if first_with_folded_name.contains_key(&folded) {
                warn!("{} lists {} more than once; using the first",mapping.source_name(),name);
            } else {
                first_with_folded_name.insert(folded,record);
            }
        }
        CaseInsensitiveIndex{ mapping, first_with_folded_name }
    }

    fn find(&self,folded_name:&str) -> Option<&'a PartialConstituencyRecord> {
        self.first_with_folded_name.get(folded_name).copied()
    }
}

/// Produce a record for every canonical name, in canonical order.
pub fn reconcile(canonical_names:&[String],sources_highest_priority_first:&[SourceMapping]) -> ReconciledDataset {
    let indices : Vec<CaseInsensitiveIndex> = sources_highest_priority_first.iter().map(CaseInsensitiveIndex::new).collect();
    let mut constituencies = InsertionOrderedMap::default();
    for name in canonical_names {
        let folded = fold_case(name);
        let mut merged : Option<PartialConstituencyRecord> = None;
        for index in &indices {
            if let Some(found) = index.find(&folded) {
                match &mut merged {
                    None => merged = Some(found.clone()),
                    Some(base) => base.fill_absent_from(found),
                }
            }
        }
        if merged.is_none() { debug!("No source has information on {}",name); }
        constituencies.insert(name.clone(),merged.map(PartialConstituencyRecord::complete).unwrap_or_default());
    }
    report_unused_source_names(canonical_names,&indices);
    ReconciledDataset::new(constituencies)
}

/// Warn about constituencies a source has that match no canonical name; they are probably misspelt.
fn report_unused_source_names(canonical_names:&[String],indices:&[CaseInsensitiveIndex]) {
    let canonical : HashSet<String> = canonical_names.iter().map(|n|fold_case(n)).collect();
    for index in indices {
        for (name,_) in index.mapping.iter() {
            if !canonical.contains(&fold_case(name)) {
                warn!("{} has {} which is not a known constituency",index.mapping.source_name(),name);
            }
        }
    }
}
