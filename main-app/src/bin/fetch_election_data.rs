// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.


//! Get the electoral boundaries from data.gov.sg and write out the party list.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use ge_data::boundary::{canonical_constituency_names, extract_boundaries_from_datastore_response, NameAttributeAliases};
use ge_data::download::CacheDir;
use ge_data::parties::{ge2025_parties, total_seats};
use ge_data::writer::{write_json_file, write_json_file_with_indent};
use main_app::init_logging;

const BOUNDARIES_URL : &str = "https://data.gov.sg/api/action/datastore_search?resource_id=4e7981c1-9ae3-c1e3-b7ce-3d9842415c8d";

#[derive(Parser)]
#[clap(version = "0.1", name="fetch_election_data")]
/// Download the GE2025 electoral boundaries as GeoJSON, and save the list of parties.
/// If the boundaries can't be obtained, the party list is still saved.
struct Opts {
    /// Directory to write ge2025_boundaries.geojson and ge2025_parties.json to.
    #[clap(long,default_value="data")]
    data_dir : PathBuf,

    /// Where downloaded files are kept.
    #[clap(long,default_value="Cache")]
    cache_dir : PathBuf,

    /// The feature property holding the constituency name, for the summary. May be used multiple times.
    #[clap(long="name-attribute")]
    name_attributes : Vec<String>,
}

/// Download the boundaries, save them, and print a summary.
fn fetch_boundaries(cache:&CacheDir,out:&Path,aliases:&NameAttributeAliases) -> anyhow::Result<()> {
    let response = cache.get_or_download_string(BOUNDARIES_URL)?;
    let geojson = extract_boundaries_from_datastore_response(&response)?;
    write_json_file(out,&geojson)?;
    println!("Successfully saved electoral boundaries to {}",out.display());
    let features = geojson["features"].as_array().map(|f|f.len()).unwrap_or(0);
    println!("\nElectoral Boundaries Summary:");
    println!("Total number of boundary features: {}",features);
    match canonical_constituency_names(&geojson.to_string(),aliases) {
        Ok(names) => {
            println!("Total number of constituencies: {}",names.len());
            println!("First few constituencies: {}",names.iter().take(5).cloned().collect::<Vec<_>>().join(", "));
        }
        Err(e) => warn!("Could not list constituency names : {}",e),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let opts: Opts = Opts::parse();
    let cache = CacheDir::new(&opts.cache_dir);
    let aliases = NameAttributeAliases::new(opts.name_attributes.clone());

    println!("Fetching GE2025 electoral boundaries...");
    if let Err(e) = fetch_boundaries(&cache,&opts.data_dir.join("ge2025_boundaries.geojson"),&aliases) {
        error!("Error fetching boundaries : {:#}",e);
    }

    println!("\nFetching party data...");
    let parties = ge2025_parties();
    let parties_file = opts.data_dir.join("ge2025_parties.json");
    write_json_file_with_indent(&parties_file,&parties,b"    ")?;
    println!("Successfully saved party data to {}",parties_file.display());

    println!("\nParty Summary:");
    println!("Total number of parties: {}",parties.len());
    println!("Total number of seats: {}",total_seats(&parties));
    println!("\nParty details:");
    for (name,party) in parties.iter() {
        println!("{}: {} seats",name,party.seats);
    }
    Ok(())
}
