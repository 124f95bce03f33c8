use crate::{error::AppError, AppState};
use axum::{
    extract::{Multipart, State},
    Json,
};
use configuration::SourceSettings;
use datastore::Dataset;
use ingest::{normalize, read_raw_table, NormalizerOptions};
use serde_json::{json, Value};
use std::sync::Arc;

fn normalizer_options(source: &SourceSettings) -> NormalizerOptions {
    NormalizerOptions {
        name_column: source.name_column.clone(),
        sentinel: source.sentinel.clone(),
        date_format: source.date_format.clone(),
    }
}

/// # POST /api/upload
/// Accepts a fund export as a multipart `file` field, normalizes it and
/// replaces the current dataset. All-or-nothing: a schema defect anywhere in
/// the file leaves the previous dataset untouched.
pub async fn upload_source(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(AppError::BadRequest(
            "Missing multipart field 'file'".to_string(),
        ));
    };
    if !filename.to_lowercase().ends_with(".csv") {
        return Err(AppError::BadRequest(
            "File must be CSV format (.csv)".to_string(),
        ));
    }

    tracing::info!(filename, size = bytes.len(), "processing upload");

    let source = &state.settings.source;
    let table = read_raw_table(bytes.as_ref(), source.preamble_rows)?;
    let (funds, observations) = normalize(&table, &normalizer_options(source))?;

    let summary = state.repo.replace(Dataset::build(funds, observations));

    Ok(Json(json!({
        "status": "success",
        "message": "File uploaded and processed successfully",
        "summary": summary,
    })))
}

/// # GET /api/data-status
/// Reports whether a dataset is loaded, and its summary if so.
pub async fn data_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.repo.snapshot() {
        Some(dataset) => Json(json!({
            "status": "data_loaded",
            "summary": dataset.summary(),
        })),
        None => Json(json!({
            "status": "no_data",
            "message": "No data loaded. Please upload a fund export file.",
        })),
    }
}

/// # DELETE /api/data
/// Clears the loaded dataset from memory.
pub async fn clear_data(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.repo.clear();
    Json(json!({
        "status": "success",
        "message": "Data cleared successfully",
    }))
}
