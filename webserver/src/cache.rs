// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

//! Cache serialized JSON responses in memory for a limited time.


use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use actix_web::web::Bytes;

pub const DEFAULT_CACHE_SECONDS : u64 = 300;

struct CachedResponse {
    created : Instant,
    body : Bytes,
}

pub struct ResponseCache {
    time_to_live : Duration,
    entries : Mutex<HashMap<String,CachedResponse>>,
}

impl ResponseCache {
    pub fn new(time_to_live:Duration) -> Self {
        ResponseCache{ time_to_live, entries: Mutex::new(HashMap::new()) }
    }

    fn lock(&self) -> MutexGuard<'_,HashMap<String,CachedResponse>> {
        self.entries.lock().unwrap_or_else(|poisoned|poisoned.into_inner())
    }

    fn fresh(&self,key:&str) -> Option<Bytes> {
        self.lock().get(key).filter(|cached|cached.created.elapsed()<self.time_to_live).map(|cached|cached.body.clone())
    }

    /// Return f(), or a copy of it cached less than time_to_live ago under key.
    /// NOTE if called while still evaluating f(), could evaluate f() multiple times. So not ideal, but only a waste of performance in a special case.
    pub fn get_or_compute<F,E>(&self,key:&str,f:F) -> Result<Bytes,E>
        where F:FnOnce()->Result<Vec<u8>,E>
    {
        if let Some(body) = self.fresh(key) { return Ok(body); }
        let body = Bytes::from(f()?);
        self.lock().insert(key.to_string(),CachedResponse{ created: Instant::now(), body: body.clone() });
        Ok(body)
    }
}
