// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Serve the candidates file and the other data files to the map viewer.

pub mod cache;
pub mod error;

use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse};
use actix_web::http::header::ContentType;
use anyhow::Context;
use ge_data::constituency::ReconciledDataset;
use tracing::{error, info, warn};
use crate::cache::ResponseCache;
use crate::error::ApiError;

/// The name of the candidates file in the data directory, as written by scrape_candidates.
pub const CANDIDATES_FILE : &str = "ge2025_candidates.json";

/// Everything the handlers need. Created once at startup and not changed afterwards,
/// apart from the response cache.
pub struct AppState {
    candidates : ReconciledDataset,
    data_dir : PathBuf,
    response_cache : ResponseCache,
}

impl AppState {
    pub fn new(candidates:ReconciledDataset,data_dir:PathBuf,cache_time:Duration) -> Self {
        AppState{ candidates, data_dir, response_cache: ResponseCache::new(cache_time) }
    }

    pub fn candidates(&self) -> &ReconciledDataset { &self.candidates }

    /// Find a file requested from the data directory. Only plain relative paths are allowed,
    /// so nothing outside the data directory can be reached.
    fn data_file(&self,filename:&str) -> Result<PathBuf,ApiError> {
        if !self.data_dir.is_dir() {
            error!("Data directory not found: {}",self.data_dir.display());
            return Err(ApiError::NotFound("Data directory not found".to_string()));
        }
        let relative = Path::new(filename);
        let plain = relative.components().next().is_some() && relative.components().all(|c|matches!(c,Component::Normal(_)));
        let path = self.data_dir.join(relative);
        if plain && path.is_file() { Ok(path) }
        else {
            warn!("File not found: {}",path.display());
            Err(ApiError::NotFound("File not found".to_string()))
        }
    }
}

fn read_candidates(path:&Path) -> anyhow::Result<ReconciledDataset> {
    let contents = std::fs::read(path).with_context(||format!("Election data file not found: {}",path.display()))?;
    serde_json::from_slice(&contents).with_context(||format!("Invalid JSON in election data file: {}",path.display()))
}

/// Load the candidates file. If it can't be read, log why and serve no constituencies,
/// so the rest of the site still works.
pub fn load_candidates(path:&Path) -> ReconciledDataset {
    match read_candidates(path) {
        Ok(candidates) => {
            info!("Successfully loaded election data for {} constituencies from {}",candidates.len(),path.display());
            candidates
        }
        Err(e) => {
            error!("{:#}",e);
            ReconciledDataset::default()
        }
    }
}

#[get("/api/candidates")]
async fn get_candidates(state : web::Data<AppState>) -> Result<HttpResponse,ApiError> {
    let body = state.response_cache.get_or_compute("candidates",||serde_json::to_vec(state.candidates()))?;
    Ok(HttpResponse::Ok().content_type(ContentType::json()).body(body))
}

#[get("/data/{filename:.*}")]
async fn get_data_file(state : web::Data<AppState>,filename : web::Path<String>,request : HttpRequest) -> Result<HttpResponse,ApiError> {
    let path = state.data_file(&filename)?;
    let file = NamedFile::open(&path).map_err(|e|ApiError::Internal(format!("Could not open {} : {}",path.display(),e)))?;
    Ok(file.use_last_modified(true).into_response(&request))
}

/// For anything that doesn't match a route.
pub async fn resource_not_found() -> Result<HttpResponse,ApiError> {
    Err(ApiError::NotFound("Resource not found".to_string()))
}

/// Register the API routes. The caller adds the AppState, static files and default service.
pub fn configure(cfg : &mut web::ServiceConfig) {
    cfg.service(get_candidates).service(get_data_file);
}
