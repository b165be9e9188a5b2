// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Information about a constituency: who is standing for which party, and how many electors there are.


use std::fmt;
use std::marker::PhantomData;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use tracing::warn;
use crate::error::IngestError;

/// A map from strings that remembers the order keys were first inserted in,
/// and serializes as a JSON object in that order.
///
/// The maps here are small (a few dozen constituencies, a handful of parties),
/// so lookup is a linear scan.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct InsertionOrderedMap<V> {
    entries : Vec<(String,V)>,
}

impl <V> Default for InsertionOrderedMap<V> {
    fn default() -> Self { InsertionOrderedMap{ entries: vec![] } }
}

impl <V> InsertionOrderedMap<V> {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self,key:&str) -> Option<&V> {
        self.entries.iter().find(|(k,_)|k==key).map(|(_,v)|v)
    }

    /// Add a value for key. If key is already present, its value is replaced but it keeps its original position.
    pub fn insert(&mut self,key:String,value:V) -> Option<V> {
        match self.entries.iter_mut().find(|(k,_)|*k==key) {
            Some((_,existing)) => Some(std::mem::replace(existing,value)),
            None => { self.entries.push((key,value)); None }
        }
    }

    pub fn get_or_insert_default(&mut self,key:String) -> &mut V where V:Default {
        let position = match self.entries.iter().position(|(k,_)|*k==key) {
            Some(position) => position,
            None => { self.entries.push((key,V::default())); self.entries.len()-1 }
        };
        &mut self.entries[position].1
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str,&V)> {
        self.entries.iter().map(|(k,v)|(k.as_str(),v))
    }

    pub fn keys(&self) -> impl Iterator<Item=&str> {
        self.entries.iter().map(|(k,_)|k.as_str())
    }
}

impl <V> FromIterator<(String,V)> for InsertionOrderedMap<V> {
    fn from_iter<T: IntoIterator<Item=(String,V)>>(iter: T) -> Self {
        let mut res = InsertionOrderedMap::default();
        for (k,v) in iter { res.insert(k,v); }
        res
    }
}

impl <V:Serialize> Serialize for InsertionOrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k,v) in &self.entries {
            map.serialize_entry(k,v)?;
        }
        map.end()
    }
}

struct InsertionOrderedMapVisitor<V> {
    marker : PhantomData<V>,
}

impl <'de,V:Deserialize<'de>> Visitor<'de> for InsertionOrderedMapVisitor<V> {
    type Value = InsertionOrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut res = InsertionOrderedMap{ entries: Vec::with_capacity(access.size_hint().unwrap_or(0)) };
        while let Some((k,v)) = access.next_entry::<String,V>()? {
            res.insert(k,v);
        }
        Ok(res)
    }
}

impl <'de,V:Deserialize<'de>> Deserialize<'de> for InsertionOrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(InsertionOrderedMapVisitor{ marker: PhantomData })
    }
}

/// Party name to the candidates standing for that party, both in the order the source listed them.
pub type PartyRecord = InsertionOrderedMap<Vec<String>>;

/// Everything known about one constituency, as written to the candidates file.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct ConstituencyRecord {
    #[serde(default)]
    pub parties : PartyRecord,
    #[serde(default)]
    pub number_of_electors : u64,
    /// Free text from the government portal, if it had any.
    #[serde(skip_serializing_if = "Option::is_none",default)]
    pub additional_info : Option<String>,
}

/// What one source knows about a constituency. A field is None if the source did not say.
#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct PartialConstituencyRecord {
    pub parties : Option<PartyRecord>,
    pub number_of_electors : Option<u64>,
    pub additional_info : Option<String>,
}

impl PartialConstituencyRecord {
    /// Take fields from a lower priority source, but only those not already present.
    pub fn fill_absent_from(&mut self,lower_priority:&PartialConstituencyRecord) {
        if self.parties.is_none() { self.parties = lower_priority.parties.clone(); }
        if self.number_of_electors.is_none() { self.number_of_electors = lower_priority.number_of_electors; }
        if self.additional_info.is_none() { self.additional_info = lower_priority.additional_info.clone(); }
    }

    /// Convert to a full record, using no parties and zero electors where nothing is known.
    pub fn complete(self) -> ConstituencyRecord {
        ConstituencyRecord {
            parties: self.parties.unwrap_or_default(),
            number_of_electors: self.number_of_electors.unwrap_or(0),
            additional_info: self.additional_info,
        }
    }
}

/// The constituencies one source knows about, under that source's own spelling of their names,
/// in the order they appeared in the source document. The same name (or a differently
/// capitalised version of it) may appear more than once.
#[derive(Debug)]
pub struct SourceMapping {
    source_name : String,
    entries : Vec<(String,PartialConstituencyRecord)>,
    skipped_sections : Vec<IngestError>,
}

impl SourceMapping {
    pub fn new(source_name:impl Into<String>) -> Self {
        SourceMapping{ source_name: source_name.into(), entries: vec![], skipped_sections: vec![] }
    }

    pub fn source_name(&self) -> &str { &self.source_name }

    pub fn push(&mut self,name:String,record:PartialConstituencyRecord) {
        self.entries.push((name,record));
    }

    /// Note that a section of the document could not be understood and was left out.
    pub fn skip_section(&mut self,section:String,reason:String) {
        let problem = IngestError::Parse { source_name: self.source_name.clone(), section, reason };
        warn!("{}",problem);
        self.skipped_sections.push(problem);
    }

    pub fn skipped_sections(&self) -> &[IngestError] { &self.skipped_sections }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item=(&str,&PartialConstituencyRecord)> {
        self.entries.iter().map(|(k,v)|(k.as_str(),v))
    }
}

/// A record for every canonical constituency name, in canonical order.
/// Only produced by reconciliation (or by reading a previously written file), and not changed afterwards.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
#[serde(transparent)]
pub struct ReconciledDataset {
    constituencies : InsertionOrderedMap<ConstituencyRecord>,
}

impl ReconciledDataset {
    pub(crate) fn new(constituencies:InsertionOrderedMap<ConstituencyRecord>) -> Self {
        ReconciledDataset{ constituencies }
    }
    pub fn len(&self) -> usize { self.constituencies.len() }
    pub fn is_empty(&self) -> bool { self.constituencies.is_empty() }
    pub fn get(&self,constituency:&str) -> Option<&ConstituencyRecord> { self.constituencies.get(constituency) }
    pub fn names(&self) -> impl Iterator<Item=&str> { self.constituencies.keys() }
    pub fn iter(&self) -> impl Iterator<Item=(&str,&ConstituencyRecord)> { self.constituencies.iter() }
}
