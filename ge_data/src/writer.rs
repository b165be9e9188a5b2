// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Write JSON output files.


use std::fs::File;
use std::io::Write;
use std::path::Path;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::info;
use crate::constituency::ReconciledDataset;
use crate::error::IngestError;

/// The indent used for the candidates file.
pub const DEFAULT_INDENT : &[u8] = b"  ";

/// Pretty printed JSON, 2 space indent. Non-ASCII characters are written as UTF-8, not escaped.
pub fn to_json_bytes<T:Serialize>(value:&T) -> serde_json::Result<Vec<u8>> {
    to_json_bytes_with_indent(value,DEFAULT_INDENT)
}

pub fn to_json_bytes_with_indent<T:Serialize>(value:&T,indent:&[u8]) -> serde_json::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes,PrettyFormatter::with_indent(indent));
    value.serialize(&mut serializer)?;
    Ok(bytes)
}

/// Write the complete serialization of value to path, replacing any existing file.
///
/// The output is written to a temporary file in the same directory which is then renamed
/// over path, so a failure part way through never leaves a truncated file at path.
pub fn write_json_file<T:Serialize>(path:&Path,value:&T) -> Result<(),IngestError> {
    write_json_file_with_indent(path,value,DEFAULT_INDENT)
}

/// As write_json_file, but with each nesting level indented by indent.
pub fn write_json_file_with_indent<T:Serialize>(path:&Path,value:&T,indent:&[u8]) -> Result<(),IngestError> {
    let write_error = |error:std::io::Error| IngestError::Write { path: path.to_path_buf(), error };
    let bytes = to_json_bytes_with_indent(value,indent).map_err(|e|write_error(e.into()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_error)?;
    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    staged.write_all(&bytes).map_err(write_error)?;
    set_output_permissions(staged.as_file(),path).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged.persist(path).map_err(|e|write_error(e.error))?;
    Ok(())
}

/// Temporary files are created owner-only, but the output is read by the web server which may
/// be a different user. A file being replaced keeps its permissions; a new one gets rw-r--r--.
#[cfg(unix)]
fn set_output_permissions(staged:&File,path:&Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = match std::fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(_) => std::fs::Permissions::from_mode(0o644),
    };
    staged.set_permissions(permissions)
}

#[cfg(not(unix))]
fn set_output_permissions(_staged:&File,_path:&Path) -> std::io::Result<()> { Ok(()) }

/// Save the reconciled candidates. This is the file the web server serves.
pub fn write_reconciled_dataset(path:&Path,dataset:&ReconciledDataset) -> Result<(),IngestError> {
    write_json_file(path,dataset)?;
    info!("Wrote {} constituencies to {}",dataset.len(),path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constituency::{PartialConstituencyRecord, SourceMapping};
    use crate::reconcile::reconcile;

    fn sample() -> ReconciledDataset {
        let mut source = SourceMapping::new("test");
        source.push("Marine Parade-Braddell Heights GRC".to_string(),PartialConstituencyRecord{
            parties: Some(vec![("WP".to_string(),vec!["Hárith Ng".to_string()])].into_iter().collect()),
            number_of_electors: Some(1234),
            additional_info: Some("新".to_string()),
        });
        reconcile(&["Marine Parade-Braddell Heights GRC".to_string(),"Yio Chu Kang SMC".to_string()],&[source])
    }

    #[test]
    fn layout_and_unicode() {
        let json = String::from_utf8(to_json_bytes(&sample()).unwrap()).unwrap();
        let expected = r#"{
  "Marine Parade-Braddell Heights GRC": {
    "parties": {
      "WP": [
        "Hárith Ng"
      ]
    },
    "number_of_electors": 1234,
    "additional_info": "新"
  },
  "Yio Chu Kang SMC": {
    "parties": {},
    "number_of_electors": 0
  }
}"#;
        assert_eq!(expected,json);
    }

    #[test]
    fn writes_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("candidates.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path,"old contents that are much longer than the new contents will be, honestly").unwrap();
        write_reconciled_dataset(&path,&sample()).unwrap();
        let first = std::fs::read(&path).unwrap();
        let reread : ReconciledDataset = serde_json::from_slice(&first).unwrap();
        assert_eq!(sample(),reread);
        write_reconciled_dataset(&path,&sample()).unwrap();
        assert_eq!(first,std::fs::read(&path).unwrap());
        // no stray temporary files left behind.
        assert_eq!(1,std::fs::read_dir(path.parent().unwrap()).unwrap().count());
    }

    #[test]
    fn indent_can_be_chosen() {
        let parties : crate::parties::PartyList = vec![("Workers' Party".to_string(),crate::parties::PartySummary{ seats: 10 })].into_iter().collect();
        let json = String::from_utf8(to_json_bytes_with_indent(&parties,b"    ").unwrap()).unwrap();
        assert_eq!("{\n    \"Workers' Party\": {\n        \"seats\": 10\n    }\n}",json);
    }

    #[cfg(unix)]
    #[test]
    fn output_readable_by_others() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        write_reconciled_dataset(&path,&sample()).unwrap();
        assert_eq!(0o644,std::fs::metadata(&path).unwrap().permissions().mode() & 0o777);
        // replacing keeps whatever the existing file had.
        std::fs::set_permissions(&path,std::fs::Permissions::from_mode(0o640)).unwrap();
        write_reconciled_dataset(&path,&sample()).unwrap();
        assert_eq!(0o640,std::fs::metadata(&path).unwrap().permissions().mode() & 0o777);
    }

    #[test]
    fn failure_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_directory");
        std::fs::write(&blocker,"").unwrap();
        let res = write_reconciled_dataset(&blocker.join("candidates.json"),&sample());
        assert!(matches!(res,Err(IngestError::Write{..})));
    }
}
