use crate::{
    config::Config,
    error::ProbeError,
    fixture::{self, Fixtures},
    service::{BackendStore, JobHandle, JobState, JobStatus, ProcessingService},
    util::truncate_for_log,
};
use anyhow::{Context, Result};
use regex::Regex;
use std::time::Instant;
use tracing::{error, info, warn};

const LOG_BODY_MAX_CHARS: usize = 500;

/// What a passing submit-and-poll check observed.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub job: JobHandle,
    pub status_checks: u32,
    pub artifact_bytes: usize,
    /// `None` when the release call itself failed to complete.
    pub cleanup_status: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOutcome {
    Connected,
    /// URL matched the placeholder pattern; no request was made.
    Skipped,
}

/// Drives one end-to-end trial of the processing service. Configuration is fixed at
/// construction; the probe never reads the environment.
pub struct WorkflowProbe<S: ProcessingService, B: BackendStore> {
    cfg: Config,
    service: S,
    backend: B,
    placeholder: Regex,
}

impl<S: ProcessingService, B: BackendStore> WorkflowProbe<S, B> {
    pub fn new(cfg: &Config, service: S, backend: B) -> Result<Self> {
        let placeholder = Regex::new(&cfg.backend.placeholder_pattern).with_context(|| {
            format!(
                "invalid backend.placeholder_pattern: {}",
                cfg.backend.placeholder_pattern
            )
        })?;
        Ok(Self {
            cfg: cfg.clone(),
            service,
            backend,
            placeholder,
        })
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn health_check(&self) -> Result<(), ProbeError> {
        info!("testing service health at {}", self.cfg.service.base_url);
        match self.service.health() {
            Ok(()) => {
                info!("service is healthy");
                Ok(())
            }
            Err(err @ ProbeError::Status { code, .. }) => {
                error!("service unhealthy: {code}");
                Err(err)
            }
            Err(err) => {
                error!("service not reachable: {err}");
                Err(err)
            }
        }
    }

    /// The one check whose failure is fatal to the run.
    pub fn create_fixtures(&self) -> Result<Fixtures> {
        fixture::create_fixtures(&self.cfg)
    }

    pub fn submit_and_poll(&self, fixtures: &Fixtures) -> Result<ProcessOutcome, ProbeError> {
        info!("testing processing service");
        let outcome = self.submit_and_poll_inner(fixtures);
        if let Err(err) = &outcome {
            error!("processing check failed: {err}");
        }
        outcome
    }

    fn submit_and_poll_inner(&self, fixtures: &Fixtures) -> Result<ProcessOutcome, ProbeError> {
        info!("submitting job");
        let submitted = self
            .service
            .submit(&fixtures.image.path, &fixtures.video.path)
            .inspect_err(|err| {
                if let ProbeError::Status { code, body } = err {
                    error!(
                        "failed to submit job: {code} - {}",
                        truncate_for_log(body, LOG_BODY_MAX_CHARS)
                    );
                }
            })?;

        let job = submitted.handle().ok_or_else(|| {
            ProbeError::Protocol(format!("no job ID returned: {:?}", submitted))
        })?;
        info!("job submitted: {job}");

        let started = Instant::now();
        let (status, status_checks) = self.poll_until_terminal(&job)?;
        info!(
            "processing completed after {status_checks} status checks in {:?}: {}",
            started.elapsed(),
            status.message
        );

        let artifact = self.service.download(&job).inspect_err(|err| {
            if let ProbeError::Status { code, .. } = err {
                error!("download failed: {code}");
            }
        })?;
        info!("download successful ({} bytes)", artifact.len());

        let cleanup_status = self.release(&job);

        Ok(ProcessOutcome {
            job,
            status_checks,
            artifact_bytes: artifact.len(),
            cleanup_status,
        })
    }

    /// Polls until `completed`, `failed`, or the attempt bound. Returns the completed
    /// status and the number of status fetches made.
    pub fn poll_until_terminal(&self, job: &JobHandle) -> Result<(JobStatus, u32), ProbeError> {
        let max_attempts = self.cfg.polling.max_attempts;
        let interval = self.cfg.polling.interval();
        info!("monitoring progress (max {max_attempts} checks, every {interval:?})");

        for attempt in 1..=max_attempts {
            let status = self.service.status(job).inspect_err(|err| {
                if let ProbeError::Status { code, .. } = err {
                    error!("failed to get status: {code}");
                }
            })?;
            info!("progress: {}% - {}", status.progress, status.message);

            match status.state() {
                JobState::Completed => return Ok((status, attempt)),
                JobState::Failed => {
                    return Err(ProbeError::JobFailed(status.error_message().to_string()));
                }
                JobState::Pending(_) => {}
            }

            if attempt < max_attempts && !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }

        Err(ProbeError::Timeout {
            attempts: max_attempts,
        })
    }

    fn release(&self, job: &JobHandle) -> Option<u16> {
        match self.service.cleanup(job) {
            Ok(code) => {
                info!("cleanup: {code}");
                Some(code)
            }
            Err(err) => {
                warn!("cleanup failed (ignored): {err}");
                None
            }
        }
    }

    pub fn is_placeholder_backend(&self) -> bool {
        self.placeholder.is_match(self.cfg.backend.url.trim())
    }

    pub fn backend_check(&self) -> Result<BackendOutcome, ProbeError> {
        info!("testing backend integration");

        if self.is_placeholder_backend() {
            warn!("demo mode detected - backend integration skipped");
            return Ok(BackendOutcome::Skipped);
        }

        match self.backend.ping() {
            Ok(()) => {
                info!("backend connection successful");
                Ok(BackendOutcome::Connected)
            }
            Err(err @ ProbeError::Status { code, .. }) => {
                error!("backend connection failed: {code}");
                Err(err)
            }
            Err(err) => {
                error!("error testing backend: {err}");
                Err(err)
            }
        }
    }
}
