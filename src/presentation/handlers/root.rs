use axum::Json;
use serde::Serialize;

const BANNER: &str = "Blood Test Report Analyser API is running";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse { message: BANNER })
}
