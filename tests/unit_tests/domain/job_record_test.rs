use bloodwork::domain::{JobId, JobRecord, JobStatus};

#[test]
fn given_pending_record_when_created_then_has_no_result_or_error() {
    let record = JobRecord::pending(JobId::new());
    assert_eq!(record.status, JobStatus::Pending);
    assert!(record.result.is_none());
    assert!(record.error.is_none());
}

#[test]
fn given_succeeded_record_when_created_then_only_result_is_set() {
    let record = JobRecord::succeeded(JobId::new(), "All values normal".to_string());
    assert_eq!(record.status, JobStatus::Succeeded);
    assert_eq!(record.result.as_deref(), Some("All values normal"));
    assert!(record.error.is_none());
}

#[test]
fn given_failed_record_when_created_then_only_error_is_set() {
    let record = JobRecord::failed(JobId::new(), "extraction failed".to_string());
    assert_eq!(record.status, JobStatus::Failed);
    assert!(record.result.is_none());
    assert_eq!(record.error.as_deref(), Some("extraction failed"));
}

#[test]
fn given_record_when_serialized_then_status_uses_wire_name() {
    let record = JobRecord::started(JobId::new());
    let json: serde_json::Value = serde_json::to_value(&record).unwrap();
    assert_eq!(json["status"], "STARTED");
}
