use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::observability::metrics;
use crate::store::ValuesStore;
use crate::values::{Mapping, Section, Value};

/// File name offered by the download endpoint.
pub const DOWNLOAD_FILE_NAME: &str = "values.yaml";

/// MIME type of the download.
pub const YAML_CONTENT_TYPE: &str = "text/yaml";

/// Body of `POST /api/values/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub path: String,
    #[serde(default = "Value::absent")]
    pub value: Value,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_values(State(store): State<ValuesStore>) -> Json<Arc<Mapping>> {
    Json(store.snapshot())
}

pub async fn put_values(
    State(store): State<ValuesStore>,
    Json(body): Json<Value>,
) -> Result<Json<Arc<Mapping>>, ApiError> {
    let Value::Mapping(values) = body else {
        return Err(ApiError::NotAnObject);
    };
    Ok(Json(store.replace(values)))
}

pub async fn update_value(
    State(store): State<ValuesStore>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<Arc<Mapping>>, ApiError> {
    let values = store.update(&request.path, request.value)?;
    Ok(Json(values))
}

pub async fn reset_section(
    State(store): State<ValuesStore>,
    Path(section): Path<String>,
) -> Result<Json<Arc<Mapping>>, ApiError> {
    let section: Section = section.parse()?;
    Ok(Json(store.reset(section)))
}

/// Raw document for on-screen preview and clipboard copy.
pub async fn preview(State(store): State<ValuesStore>) -> impl IntoResponse {
    metrics::record_render("preview");
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        store.render(),
    )
}

/// Document as a `values.yaml` attachment.
pub async fn download(State(store): State<ValuesStore>) -> impl IntoResponse {
    metrics::record_render("download");
    tracing::info!(file = DOWNLOAD_FILE_NAME, "Serving download");
    (
        [
            (header::CONTENT_TYPE, YAML_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        store.render(),
    )
}
