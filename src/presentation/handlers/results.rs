use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::JobView;
use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::analyze::ErrorResponse;

const QUEUED_MESSAGE: &str = "Analysis is queued and has not started yet.";
const RUNNING_MESSAGE: &str = "Analysis is still in progress.";

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultResponse {
    Pending { task_id: String, message: String },
    Completed { task_id: String, analysis: String },
    Failed { task_id: String, error: String },
    NotFound { task_id: String, error: String },
}

impl ResultResponse {
    fn not_found(task_id: String) -> Self {
        let error = format!("No analysis task with id {}", task_id);
        Self::NotFound { task_id, error }
    }
}

#[tracing::instrument(skip(state))]
pub async fn results_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    // An id that does not parse was never issued, so it is reported the same
    // way as an unknown one.
    let Ok(job_id) = task_id.parse::<JobId>() else {
        return (StatusCode::NOT_FOUND, Json(ResultResponse::not_found(task_id))).into_response();
    };

    match state.submission_service.status(job_id).await {
        Ok(view) => {
            let (status, body) = match view {
                JobView::Pending { started } => {
                    let message = if started {
                        RUNNING_MESSAGE
                    } else {
                        QUEUED_MESSAGE
                    };
                    (
                        StatusCode::OK,
                        ResultResponse::Pending {
                            task_id,
                            message: message.to_string(),
                        },
                    )
                }
                JobView::Completed { analysis } => {
                    (StatusCode::OK, ResultResponse::Completed { task_id, analysis })
                }
                JobView::Failed { error } => {
                    (StatusCode::OK, ResultResponse::Failed { task_id, error })
                }
                JobView::NotFound => (StatusCode::NOT_FOUND, ResultResponse::not_found(task_id)),
            };
            (status, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: "Error fetching analysis status".to_string(),
                }),
            )
                .into_response()
        }
    }
}
