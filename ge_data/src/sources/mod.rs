// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.


//! The places candidate information is scraped from.


use crate::constituency::SourceMapping;

pub mod straits_times;
pub mod data_gov_sg;

/// Something that can turn a document from one particular website into per-constituency records.
pub trait SourceExtractor {
    /// the name of the source, used in diagnostics. E.g. "Straits Times"
    fn name(&self) -> &'static str;
    /// where the document is normally downloaded from.
    fn url(&self) -> &'static str;
    /// Extract whatever can be understood from the document. Sections that can't be
    /// understood are recorded in the result's skipped sections rather than aborting.
    fn extract(&self,document:&str) -> SourceMapping;
}

