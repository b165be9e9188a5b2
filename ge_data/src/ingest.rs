// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Tie the pieces together: get documents, extract from them, reconcile against the boundaries.


use std::path::Path;
use tracing::info;
use crate::constituency::{ReconciledDataset, SourceMapping};
use crate::download::CacheDir;
use crate::error::IngestError;
use crate::reconcile::reconcile;
use crate::sources::SourceExtractor;

/// Get the document for a source, either from a local file if given, or from the source's url via the cache.
/// Failure to get the document means nothing can be got from that source, so is DataUnavailable.
pub fn obtain_document(extractor:&dyn SourceExtractor,local_file:Option<&Path>,cache:&CacheDir) -> Result<String,IngestError> {
    match local_file {
        Some(path) => {
            info!("Reading {} from {}",extractor.name(),path.display());
            std::fs::read_to_string(path).map_err(|e|IngestError::unavailable(extractor.name(),format!("could not read {} : {}",path.display(),e)))
        }
        None => cache.get_or_download_string(extractor.url()).map_err(|e|IngestError::unavailable(extractor.name(),format!("could not get {} : {:#}",extractor.url(),e))),
    }
}

/// Extract from each (source,document) pair, given highest priority first, and reconcile against the canonical names.
///
/// A document from which no constituency at all can be extracted is DataUnavailable for that source,
/// as it is not the page expected (moved, changed layout, or an error page).
pub fn ingest(canonical_names:&[String],documents:&[(&dyn SourceExtractor,&str)]) -> Result<ReconciledDataset,IngestError> {
    let mut mappings : Vec<SourceMapping> = vec![];
    for (extractor,document) in documents {
        let mapping = extractor.extract(document);
        if mapping.is_empty() {
            return Err(IngestError::unavailable(extractor.name(),format!("no constituencies could be extracted ({} sections skipped)",mapping.skipped_sections().len())));
        }
        mappings.push(mapping);
    }
    let dataset = reconcile(canonical_names,&mappings);
    let with_candidates = dataset.iter().filter(|(_,record)|!record.parties.is_empty()).count();
    info!("Reconciled {} constituencies, {} with candidates",dataset.len(),with_candidates);
    Ok(dataset)
}
