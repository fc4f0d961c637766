use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Serialize;

use crate::infrastructure::observability::redact_query;
use crate::presentation::state::AppState;

const ACCEPTED_MESSAGE: &str = "Analysis started. Use the task_id to check the status.";

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub message: String,
    pub task_id: String,
    pub file_processed: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

struct UploadedFile {
    filename: String,
    data: Bytes,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload: Option<UploadedFile> = None;
    let mut query: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    e.status(),
                    format!("Failed to read form: {}", e.body_text()),
                );
            }
        };

        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                match field.bytes().await {
                    Ok(data) => upload = Some(UploadedFile { filename, data }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read file bytes");
                        return error_response(
                            e.status(),
                            format!("Failed to read file: {}", e.body_text()),
                        );
                    }
                }
            }
            Some("query") => match field.text().await {
                Ok(text) => query = Some(text),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read query field");
                    return error_response(
                        e.status(),
                        format!("Failed to read query: {}", e.body_text()),
                    );
                }
            },
            other => {
                tracing::debug!(field = ?other, "Ignoring unexpected form field");
            }
        }
    }

    let Some(upload) = upload else {
        tracing::warn!("Analyze request with no file");
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        query = %redact_query(query.as_deref().unwrap_or_default()),
        "Processing report upload"
    );

    match state
        .submission_service
        .submit(upload.data, upload.filename, query.as_deref())
        .await
    {
        Ok(submission) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                status: "success",
                message: ACCEPTED_MESSAGE.to_string(),
                task_id: submission.job_id.to_string(),
                file_processed: submission.filename,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to submit analysis job");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error starting analysis")
        }
    }
}
