#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use workflow_probe::{
    config::Config,
    error::ProbeError,
    service::{BackendStore, JobHandle, JobStatus, ProcessingService, SubmitOut},
};

pub fn status(state: &str, progress: i64, message: &str) -> JobStatus {
    JobStatus {
        status: state.into(),
        progress,
        message: message.into(),
        error: None,
    }
}

pub fn failed(error: Option<&str>) -> JobStatus {
    JobStatus {
        status: "failed".into(),
        progress: 40,
        message: "error".into(),
        error: error.map(String::from),
    }
}

/// Config with polling sped up and fixtures in `dir`.
pub fn test_config(dir: &Path) -> Config {
    let mut cfg = Config::default();
    cfg.fixtures.dir = dir.display().to_string();
    cfg.polling.interval_ms = 0;
    cfg
}

/// Processing service that replays canned answers and counts calls.
pub struct ScriptedService {
    pub health: Result<(), ProbeError>,
    pub submit: Result<SubmitOut, ProbeError>,
    /// Consumed front to back; when empty, `idle` is returned forever.
    pub statuses: RefCell<VecDeque<Result<JobStatus, ProbeError>>>,
    pub idle: JobStatus,
    pub download: Result<Vec<u8>, ProbeError>,
    pub cleanup: Result<u16, ProbeError>,

    pub submit_calls: Cell<u32>,
    pub status_calls: Cell<u32>,
    pub download_calls: Cell<u32>,
    pub cleanup_calls: Cell<u32>,
    pub submitted_paths: RefCell<Vec<PathBuf>>,
    pub seen_jobs: RefCell<Vec<String>>,
}

impl ScriptedService {
    /// Healthy service whose job `abc123` completes on the first poll.
    pub fn happy() -> Self {
        Self {
            health: Ok(()),
            submit: Ok(SubmitOut {
                job_id: Some("abc123".into()),
            }),
            statuses: RefCell::new(VecDeque::from(vec![Ok(status("completed", 100, "done"))])),
            idle: status("processing", 50, "working"),
            download: Ok(vec![7u8; 1024]),
            cleanup: Ok(200),
            submit_calls: Cell::new(0),
            status_calls: Cell::new(0),
            download_calls: Cell::new(0),
            cleanup_calls: Cell::new(0),
            submitted_paths: RefCell::new(Vec::new()),
            seen_jobs: RefCell::new(Vec::new()),
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<Result<JobStatus, ProbeError>>) -> Self {
        self.statuses = RefCell::new(statuses.into());
        self
    }

    fn bump(counter: &Cell<u32>) {
        counter.set(counter.get() + 1);
    }
}

impl ProcessingService for ScriptedService {
    fn health(&self) -> Result<(), ProbeError> {
        self.health.clone()
    }

    fn submit(&self, source_image: &Path, target_video: &Path) -> Result<SubmitOut, ProbeError> {
        Self::bump(&self.submit_calls);
        self.submitted_paths
            .borrow_mut()
            .extend([source_image.to_path_buf(), target_video.to_path_buf()]);
        self.submit.clone()
    }

    fn status(&self, job: &JobHandle) -> Result<JobStatus, ProbeError> {
        Self::bump(&self.status_calls);
        self.seen_jobs.borrow_mut().push(job.to_string());
        self.statuses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(self.idle.clone()))
    }

    fn download(&self, job: &JobHandle) -> Result<Vec<u8>, ProbeError> {
        Self::bump(&self.download_calls);
        self.seen_jobs.borrow_mut().push(job.to_string());
        self.download.clone()
    }

    fn cleanup(&self, job: &JobHandle) -> Result<u16, ProbeError> {
        Self::bump(&self.cleanup_calls);
        self.seen_jobs.borrow_mut().push(job.to_string());
        self.cleanup.clone()
    }
}

pub struct ScriptedBackend {
    pub answer: Result<(), ProbeError>,
    pub pings: Cell<u32>,
}

impl ScriptedBackend {
    pub fn ok() -> Self {
        Self {
            answer: Ok(()),
            pings: Cell::new(0),
        }
    }

    pub fn failing(err: ProbeError) -> Self {
        Self {
            answer: Err(err),
            pings: Cell::new(0),
        }
    }
}

impl BackendStore for ScriptedBackend {
    fn ping(&self) -> Result<(), ProbeError> {
        self.pings.set(self.pings.get() + 1);
        self.answer.clone()
    }
}
