pub mod http;
pub mod types;

use crate::error::ProbeError;
use std::path::Path;

pub use types::{JobHandle, JobState, JobStatus, SubmitOut};

/// The processing service as seen by the probe. Every call reports its own failure;
/// a non-success HTTP status is `ProbeError::Status`.
pub trait ProcessingService {
    fn health(&self) -> Result<(), ProbeError>;
    fn submit(&self, source_image: &Path, target_video: &Path) -> Result<SubmitOut, ProbeError>;
    fn status(&self, job: &JobHandle) -> Result<JobStatus, ProbeError>;
    fn download(&self, job: &JobHandle) -> Result<Vec<u8>, ProbeError>;
    /// Returns the HTTP status of the release call whatever it was.
    fn cleanup(&self, job: &JobHandle) -> Result<u16, ProbeError>;
}

/// The backend data store. `ping` performs one authenticated read.
pub trait BackendStore {
    fn ping(&self) -> Result<(), ProbeError>;
}

/// Joins a base URL and an absolute path without doubling the slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
