// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Things that can go wrong while producing the candidates file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    /// A whole input could not be obtained or understood. Nothing can be salvaged from it.
    #[error("Data unavailable from {source_name} : {reason}")]
    DataUnavailable { source_name : String, reason : String },
    /// One section of a document was malformed. The rest of the document is still usable.
    #[error("Could not parse {source_name} section {section} : {reason}")]
    Parse { source_name : String, section : String, reason : String },
    /// The output artifact could not be persisted.
    #[error("Could not write {} : {}", .path.display(), .error)]
    Write { path : PathBuf, #[source] error : std::io::Error },
}

impl IngestError {
    pub fn unavailable(source_name:impl Into<String>,reason:impl ToString) -> Self {
        IngestError::DataUnavailable { source_name: source_name.into(), reason: reason.to_string() }
    }
}
