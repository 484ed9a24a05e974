use workflow_probe::service::{endpoint, JobState, JobStatus, SubmitOut};

#[test]
fn status_json_parses_with_optional_error() {
    let s: JobStatus = serde_json::from_str(
        r#"{"status":"failed","progress":40,"message":"swap","error":"no face detected"}"#,
    )
    .unwrap();
    assert_eq!(s.state(), JobState::Failed);
    assert_eq!(s.error_message(), "no face detected");

    let s: JobStatus =
        serde_json::from_str(r#"{"status":"completed","progress":100,"message":"done"}"#).unwrap();
    assert_eq!(s.state(), JobState::Completed);
    assert!(s.error.is_none());
}

#[test]
fn unknown_labels_are_non_terminal() {
    for label in ["queued", "running", "processing", "COMPLETED", ""] {
        let s: JobStatus =
            serde_json::from_value(serde_json::json!({"status": label, "progress": 5})).unwrap();
        assert_eq!(s.state(), JobState::Pending(label.to_string()));
    }
}

#[test]
fn failed_without_error_reports_unknown() {
    let s: JobStatus = serde_json::from_str(r#"{"status":"failed"}"#).unwrap();
    assert_eq!(s.error_message(), "Unknown error");
}

#[test]
fn submit_response_requires_non_empty_job_id() {
    let out: SubmitOut = serde_json::from_str(r#"{"job_id":"abc123"}"#).unwrap();
    assert_eq!(out.handle().unwrap().as_str(), "abc123");

    let out: SubmitOut = serde_json::from_str(r#"{"job_id":""}"#).unwrap();
    assert!(out.handle().is_none());

    let out: SubmitOut = serde_json::from_str(r#"{"detail":"queued"}"#).unwrap();
    assert!(out.handle().is_none());
}

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("http://localhost:8000", "/health"), "http://localhost:8000/health");
    assert_eq!(endpoint("http://localhost:8000/", "/health"), "http://localhost:8000/health");
    assert_eq!(
        endpoint("https://x.supabase.co/", "rest/v1/face_swap_jobs"),
        "https://x.supabase.co/rest/v1/face_swap_jobs"
    );
}
