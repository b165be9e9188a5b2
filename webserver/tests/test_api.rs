// Copyright 2025 GE2025 Map contributors.
// This file is part of GE2025 Map.
// GE2025 Map is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// GE2025 Map is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with GE2025 Map.  If not, see <https://www.gnu.org/licenses/>.


use std::path::Path;
use std::time::Duration;
use actix_web::{test, web, App};
use actix_web::http::StatusCode;
use election_webserver::{configure, load_candidates, resource_not_found, AppState, CANDIDATES_FILE};
use ge_data::constituency::ReconciledDataset;

const CANDIDATES : &str = r#"{
  "ZHENGHUA SMC": {"parties": {}, "number_of_electors": 0},
  "ANG MO KIO GRC": {"parties": {"PAP": ["Lee Hsien Loong", "Darryl David"]}, "number_of_electors": 144298, "additional_info": "五"}
}"#;

fn state_for(data_dir:&Path) -> web::Data<AppState> {
    let candidates = load_candidates(&data_dir.join(CANDIDATES_FILE));
    web::Data::new(AppState::new(candidates,data_dir.to_path_buf(),Duration::from_secs(300)))
}

/// A data directory inside a temporary directory, with the sample candidates file.
fn sample_data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data").join(CANDIDATES_FILE),CANDIDATES).unwrap();
    std::fs::write(dir.path().join("data").join("ge2025_parties.json"),r#"{"Workers' Party":{"seats":10}}"#).unwrap();
    std::fs::write(dir.path().join("secret.txt"),"not for you").unwrap();
    dir
}

async fn get(state:web::Data<AppState>,uri:&str) -> (StatusCode,String) {
    let app = test::init_service(App::new().app_data(state).configure(configure).default_service(web::to(resource_not_found))).await;
    let response = test::call_service(&app,test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    (status,String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn candidates_served_in_file_order() {
    let dir = sample_data_dir();
    let state = state_for(&dir.path().join("data"));
    let (status,body) = get(state.clone(),"/api/candidates").await;
    assert_eq!(StatusCode::OK,status);
    assert!(body.find("ZHENGHUA SMC").unwrap()<body.find("ANG MO KIO GRC").unwrap());
    assert!(body.contains("五"));
    let served : ReconciledDataset = serde_json::from_str(&body).unwrap();
    assert_eq!(state.candidates(),&served);
    assert_eq!(Some(144298),served.get("ANG MO KIO GRC").map(|r|r.number_of_electors));
}

#[actix_web::test]
async fn missing_candidates_file_serves_empty_object() {
    let dir = tempfile::tempdir().unwrap();
    let (status,body) = get(state_for(dir.path()),"/api/candidates").await;
    assert_eq!(StatusCode::OK,status);
    assert_eq!("{}",body);
}

#[actix_web::test]
async fn corrupt_candidates_file_serves_empty_object() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CANDIDATES_FILE),"{ not json").unwrap();
    let (_,body) = get(state_for(dir.path()),"/api/candidates").await;
    assert_eq!("{}",body);
}

#[actix_web::test]
async fn data_files() {
    let dir = sample_data_dir();
    let state = state_for(&dir.path().join("data"));
    let (status,body) = get(state.clone(),"/data/ge2025_parties.json").await;
    assert_eq!(StatusCode::OK,status);
    assert_eq!(r#"{"Workers' Party":{"seats":10}}"#,body);
    let (status,body) = get(state.clone(),"/data/no_such_file.json").await;
    assert_eq!(StatusCode::NOT_FOUND,status);
    assert_eq!(r#"{"error":"File not found"}"#,body);
    let (status,body) = get(state.clone(),"/data/../secret.txt").await;
    assert_eq!(StatusCode::NOT_FOUND,status);
    assert!(!body.contains("not for you"));
}

#[actix_web::test]
async fn missing_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let state = web::Data::new(AppState::new(ReconciledDataset::default(),dir.path().join("nowhere"),Duration::from_secs(300)));
    let (status,body) = get(state,"/data/anything.geojson").await;
    assert_eq!(StatusCode::NOT_FOUND,status);
    assert_eq!(r#"{"error":"Data directory not found"}"#,body);
}

#[actix_web::test]
async fn unknown_route() {
    let dir = sample_data_dir();
    let (status,body) = get(state_for(&dir.path().join("data")),"/api/nothing").await;
    assert_eq!(StatusCode::NOT_FOUND,status);
    assert_eq!(r#"{"error":"Resource not found"}"#,body);
}
