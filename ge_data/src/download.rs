// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

use std::path::{PathBuf, Path};
use std::thread::sleep;
use std::time::Duration;
use std::sync::Mutex;
use anyhow::Context;
use once_cell::sync::OnceCell;
use tracing::info;

/// Helper for downloading a URL to a local file equivalent, so that re-running
/// the scraper doesn't hit the websites again.
/// Tries to make this an obvious mirror of the URL.
/// This is not possible for URLs ending in / (or the root dir); these have index.html added on.
pub struct CacheDir {
    base : PathBuf,
}

impl CacheDir {
    fn rate_limit() {
        static DOWNLOAD_RATE_LIMIT_MUTEX: OnceCell<Mutex<()>> = OnceCell::new();
        let _lock = DOWNLOAD_RATE_LIMIT_MUTEX.get_or_init(||Mutex::new(())).lock().unwrap_or_else(|poisoned|poisoned.into_inner());
        sleep(Duration::from_millis(1000));
    }
    pub fn new<P:AsRef<Path>>(path:P) -> Self {
        CacheDir{ base: path.as_ref().to_path_buf() }
    }

    /// Get where a file representing said path should be stored.
    pub fn file(&self,url_path:&str) -> PathBuf {
        let res = self.base.join(url_path);
        if url_path.chars().last().map(std::path::is_separator).unwrap_or(true) { res.join("index.html")} else {res}
    }

    /// Get the path a url should be stored to. Query strings become part of the file name.
    pub fn get_file_path(&self,url:&str) -> PathBuf {
        let url_path = url.trim_start_matches("https://").trim_start_matches("http://").replace('?',"_");
        self.file(&url_path)
    }

    /// Get a cached copy of the url, or download it using reqwest and store it.
    pub fn get_or_download(&self,url:&str) -> anyhow::Result<PathBuf> {
        let file = self.get_file_path(url);
        if !file.exists() {
            info!("Downloading {}",url);
            Self::rate_limit();
            let contents = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
            if let Some(p) = file.parent() {
                std::fs::create_dir_all(p)?;
            }
            std::fs::write(&file,contents)?;
        }
        Ok(file)
    }

    /// Like get_or_download, but return the contents as a string.
    pub fn get_or_download_string(&self,url:&str) -> anyhow::Result<String> {
        let file = self.get_or_download(url)?;
        std::fs::read_to_string(&file).with_context(||format!("Could not read {}",file.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_paths() {
        let cache = CacheDir::new("Cache");
        assert_eq!(Path::new("Cache/elections.data.gov.sg/en"),cache.get_file_path("https://elections.data.gov.sg/en"));
        assert_eq!(Path::new("Cache/example.com/dir/index.html"),cache.get_file_path("http://example.com/dir/"));
        assert_eq!(Path::new("Cache/data.gov.sg/api/action/datastore_search_resource_id=abc"),cache.get_file_path("https://data.gov.sg/api/action/datastore_search?resource_id=abc"));
    }

    #[test]
    fn cached_copy_is_used_without_downloading() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheDir::new(dir.path());
        let url = "https://example.invalid/page.html";
        let file = cache.get_file_path(url);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file,"<html>cached</html>").unwrap();
        assert_eq!("<html>cached</html>",cache.get_or_download_string(url).unwrap());
    }
}
