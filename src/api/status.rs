use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub splorts: bool,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse { splorts: true })
}

pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse { ok: true })
}
