// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;
use std::time::Duration;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use election_webserver::cache::DEFAULT_CACHE_SECONDS;
use election_webserver::{configure, load_candidates, resource_not_found, AppState, CANDIDATES_FILE};
use main_app::init_logging;
use tracing::{info, warn};

#[derive(Parser)]
#[clap(version = "0.1", name="election_webserver")]
/// Serve the GE2025 candidates and boundary data, and the map viewer.
struct Opts {
    /// The address to listen on.
    #[clap(long,default_value="0.0.0.0")]
    host : String,

    #[clap(long,env="PORT",default_value_t=5000)]
    port : u16,

    /// Directory containing ge2025_candidates.json and other files served under /data/
    #[clap(long,default_value="data")]
    data_dir : PathBuf,

    /// Directory containing index.html and the viewer's scripts, served under /
    #[clap(long,default_value="static")]
    static_dir : PathBuf,

    /// How long /api/candidates responses are reused for.
    #[clap(long,default_value_t=DEFAULT_CACHE_SECONDS)]
    cache_seconds : u64,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let opts: Opts = Opts::parse();
    std::fs::create_dir_all(&opts.data_dir)?;
    let candidates = load_candidates(&opts.data_dir.join(CANDIDATES_FILE));
    let state = web::Data::new(AppState::new(candidates,opts.data_dir.clone(),Duration::from_secs(opts.cache_seconds)));
    let static_dir = opts.static_dir.clone();
    if !static_dir.is_dir() { warn!("No static directory {}, so only the API will be served",static_dir.display()); }
    info!("Running webserver on http://{}:{} stop with control C.",opts.host,opts.port);
    HttpServer::new(move|| {
        let app = App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(state.clone())
            .configure(configure);
        let app = if static_dir.is_dir() {
            app.service(actix_files::Files::new("/",static_dir.clone()).index_file("index.html").use_last_modified(true).use_etag(true).default_handler(web::to(resource_not_found)))
        } else { app };
        app.default_service(web::to(resource_not_found))
    })
        .bind((opts.host.as_str(),opts.port))?
        .run()
        .await?;
    Ok(())
}
