//! Toy doctor directory service
//!
//! Endpoints:
//! - GET /api/doctors/:name - `{"info": ...}`, 404 when unknown
//!
//! Stands in for the real directory during local runs and tests.

use std::collections::HashMap;

use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use lazy_static::lazy_static;
use serde::Serialize;
use tracing::info;

use crate::core::normalize::directory_key;

lazy_static! {
    static ref DOCTORS: HashMap<&'static str, &'static str> = HashMap::from([
        ("Dr. Smith", "Dr. Smith is a cardiologist with 10 years of experience."),
        ("Dr. Adams", "Dr. Adams is a dermatologist known for patient care."),
        ("Dr. Johnson", "Dr. Johnson is a neurologist and researcher."),
        ("Dr. Brown", "Dr. Brown specializes in orthopedics."),
        ("Dr. Taylor", "Dr. Taylor is a pediatrician with a friendly approach."),
        ("Dr. White", "Dr. White is an experienced general physician."),
    ]);
}

#[derive(Debug, Serialize)]
pub struct DoctorInfo {
    pub info: String,
}

/// Create the directory router
pub fn create_directory_router() -> Router {
    Router::new().route("/api/doctors/:name", get(get_doctor))
}

async fn get_doctor(Path(name): Path<String>) -> (StatusCode, Json<DoctorInfo>) {
    let key = directory_key(&name);
    match DOCTORS.get(key.as_str()) {
        Some(info) => (StatusCode::OK, Json(DoctorInfo { info: info.to_string() })),
        None => (
            StatusCode::NOT_FOUND,
            Json(DoctorInfo {
                info: format!("Sorry, I couldn't find details for {key}."),
            }),
        ),
    }
}

/// Run the directory server
pub async fn run_mock_directory(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, doctors = DOCTORS.len(), "mock doctor directory listening");
    axum::serve(listener, create_directory_router()).await?;
    Ok(())
}
