// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Electoral boundaries. These are the source of truth for what the constituencies are called.


use std::collections::HashSet;
use std::path::Path;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};
use crate::error::IngestError;

/// The feature property holding the full constituency name in the 2025 boundary file.
pub const DEFAULT_NAME_ATTRIBUTE : &str = "ED_DESC_FU";

/// The property names that may hold a constituency name, most preferred first.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct NameAttributeAliases(Vec<String>);

impl Default for NameAttributeAliases {
    fn default() -> Self { NameAttributeAliases(vec![DEFAULT_NAME_ATTRIBUTE.to_string()]) }
}

impl NameAttributeAliases {
    /// Use the given aliases, or the default if none are given.
    pub fn new(aliases:Vec<String>) -> Self {
        if aliases.is_empty() { Self::default() } else { NameAttributeAliases(aliases) }
    }
    pub fn aliases(&self) -> &[String] { &self.0 }

    /// The value of the first alias present as a non-blank string.
    pub fn name_of<'a>(&self,properties:&'a Map<String,Value>) -> Option<&'a str> {
        self.0.iter()
            .filter_map(|alias|properties.get(alias).and_then(Value::as_str))
            .map(str::trim)
            .find(|name|!name.is_empty())
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    features : Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties : Option<Map<String,Value>>,
}

const BOUNDARY_SOURCE : &str = "boundary dataset";

/// Get the constituency names from a GeoJSON feature collection, in the order of the features.
/// A name appearing on more than one feature (e.g. a constituency made of several polygons) is only listed once.
pub fn canonical_constituency_names(geojson:&str,aliases:&NameAttributeAliases) -> Result<Vec<String>,IngestError> {
    let collection : FeatureCollection = serde_json::from_str(geojson).map_err(|e|IngestError::unavailable(BOUNDARY_SOURCE,format!("not a GeoJSON feature collection : {}",e)))?;
    if collection.features.is_empty() { return Err(IngestError::unavailable(BOUNDARY_SOURCE,"no features")); }
    let mut seen = HashSet::new();
    let mut res = vec![];
    for (index,feature) in collection.features.iter().enumerate() {
        let name = feature.properties.as_ref().and_then(|p|aliases.name_of(p))
            .ok_or_else(||IngestError::unavailable(BOUNDARY_SOURCE,format!("feature {} has none of the name attributes {}",index,aliases.aliases().join(", "))))?;
        if seen.insert(name.to_string()) { res.push(name.to_string()); }
        else { warn!("Constituency {} appears in more than one boundary feature",name); }
    }
    Ok(res)
}

/// Like canonical_constituency_names, but reading a file.
pub fn read_canonical_constituency_names(path:&Path,aliases:&NameAttributeAliases) -> Result<Vec<String>,IngestError> {
    let geojson = std::fs::read_to_string(path).map_err(|e|IngestError::unavailable(BOUNDARY_SOURCE,format!("could not read {} : {}",path.display(),e)))?;
    let names = canonical_constituency_names(&geojson,aliases)?;
    info!("Found {} constituencies in {}",names.len(),path.display());
    Ok(names)
}

/// The data.gov.sg datastore API wraps the boundaries as `result.records[0].geojson`,
/// sometimes as an object and sometimes as a string containing JSON. Extract the feature collection.
pub fn extract_boundaries_from_datastore_response(response:&str) -> Result<Value,IngestError> {
    const SOURCE : &str = "data.gov.sg datastore";
    let response : Value = serde_json::from_str(response).map_err(|e|IngestError::unavailable(SOURCE,e))?;
    let geojson = response.pointer("/result/records/0/geojson").ok_or_else(||IngestError::unavailable(SOURCE,"no result.records[0].geojson in response"))?;
    let geojson = match geojson {
        Value::String(s) => serde_json::from_str(s).map_err(|e|IngestError::unavailable(SOURCE,format!("geojson string is not JSON : {}",e)))?,
        other => other.clone(),
    };
    if geojson.get("features").map(Value::is_array)!=Some(true) { return Err(IngestError::unavailable(SOURCE,"geojson has no features list")); }
    Ok(geojson)
}
