// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.


//! Scrape candidate data and produce the candidates file served by the web server.

use clap::Parser;
use std::path::{Path, PathBuf};
use ge_data::boundary::{read_canonical_constituency_names, NameAttributeAliases};
use ge_data::download::CacheDir;
use ge_data::ingest::{ingest, obtain_document};
use ge_data::sources::SourceExtractor;
use ge_data::sources::data_gov_sg::DataGovSgElections;
use ge_data::sources::straits_times::StraitsTimesCandidates;
use ge_data::writer::write_reconciled_dataset;
use main_app::init_logging;

#[derive(Parser)]
#[clap(version = "0.1", name="scrape_candidates")]
/// Get GE2025 candidates from the Straits Times and notes from elections.data.gov.sg,
/// match them to the constituencies in the electoral boundary file, and save the result as JSON.
/// Every constituency in the boundary file gets an entry, even if no source mentions it.
struct Opts {
    /// The GeoJSON electoral boundary file. This defines the constituency names.
    #[clap(long,default_value="data/ElectoralBoundary2025GEOJSON.geojson")]
    boundaries : PathBuf,

    /// The feature property holding the constituency name in the boundary file.
    /// May be used multiple times, in which case the first one present on a feature is used.
    /// Defaults to ED_DESC_FU.
    #[clap(long="name-attribute")]
    name_attributes : Vec<String>,

    /// Where downloaded pages are kept. Delete this to make it download them again.
    #[clap(long,default_value="Cache")]
    cache_dir : PathBuf,

    /// The output file. Replaced if it already exists.
    #[clap(short, long,default_value="data/ge2025_candidates.json")]
    out : PathBuf,

    /// Use a saved copy of the Straits Times candidates page rather than downloading it.
    #[clap(long)]
    straits_times_file : Option<PathBuf>,

    /// Use a saved copy of the elections.data.gov.sg page rather than downloading it.
    #[clap(long)]
    gov_file : Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let opts: Opts = Opts::parse();
    let aliases = NameAttributeAliases::new(opts.name_attributes.clone());
    let canonical_names = read_canonical_constituency_names(&opts.boundaries,&aliases)?;

    let cache = CacheDir::new(&opts.cache_dir);
    let straits_times = StraitsTimesCandidates{};
    let gov = DataGovSgElections{};
    // highest priority first.
    let sources : [(&dyn SourceExtractor,Option<&Path>);2] = [
        (&straits_times,opts.straits_times_file.as_deref()),
        (&gov,opts.gov_file.as_deref()),
    ];
    let mut documents : Vec<(&dyn SourceExtractor,String)> = vec![];
    for (source,local_file) in sources {
        documents.push((source,obtain_document(source,local_file,&cache)?));
    }
    let documents : Vec<(&dyn SourceExtractor,&str)> = documents.iter().map(|(source,document)|(*source,document.as_str())).collect();

    let dataset = ingest(&canonical_names,&documents)?;
    write_reconciled_dataset(&opts.out,&dataset)?;
    println!("Data for {} constituencies has been saved to {}",dataset.len(),opts.out.display());
    Ok(())
}
