use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier the service hands back for one submitted job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOut {
    #[serde(default)]
    pub job_id: Option<String>,
}

impl SubmitOut {
    /// Empty ids count as missing.
    pub fn handle(&self) -> Option<JobHandle> {
        self.job_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(JobHandle::new)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: String,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Completed,
    Failed,
    /// Any label other than the two terminal ones; re-polled as-is.
    Pending(String),
}

impl JobStatus {
    pub fn state(&self) -> JobState {
        match self.status.as_str() {
            "completed" => JobState::Completed,
            "failed" => JobState::Failed,
            other => JobState::Pending(other.to_string()),
        }
    }

    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("Unknown error")
    }
}
