use std::sync::Arc;

use crate::application::services::SubmissionService;

#[derive(Clone)]
pub struct AppState {
    pub submission_service: Arc<SubmissionService>,
    pub max_upload_size_bytes: usize,
}
