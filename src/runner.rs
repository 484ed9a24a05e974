use crate::{
    probe::{BackendOutcome, WorkflowProbe},
    report::{Check, RunReport},
    service::{BackendStore, ProcessingService},
    util::now_rfc3339,
};
use tracing::{error, info};

/// Runs health, fixtures, submit-and-poll and backend in order, one record each.
/// A fixture failure stops the run and marks the report aborted.
pub fn run_all<S: ProcessingService, B: BackendStore>(probe: &WorkflowProbe<S, B>) -> RunReport {
    let mut report = RunReport::default();
    info!("starting complete workflow test at {}", now_rfc3339());

    match probe.health_check() {
        Ok(()) => report.record(Check::Health, true, "healthy"),
        Err(err) => report.record(Check::Health, false, err.to_string()),
    }

    let fixtures = match probe.create_fixtures() {
        Ok(f) => {
            report.record(
                Check::Fixtures,
                true,
                format!("{} + {} bytes", f.image.bytes, f.video.bytes),
            );
            f
        }
        Err(err) => {
            error!("failed to create test files: {err:#}");
            report.record(Check::Fixtures, false, format!("{err:#}"));
            report.aborted = true;
            return report;
        }
    };

    match probe.submit_and_poll(&fixtures) {
        Ok(out) => report.record(
            Check::Processing,
            true,
            format!(
                "job {} completed after {} status checks, {} bytes downloaded",
                out.job, out.status_checks, out.artifact_bytes
            ),
        ),
        Err(err) => report.record(Check::Processing, false, err.to_string()),
    }

    match probe.backend_check() {
        Ok(BackendOutcome::Connected) => report.record(Check::Backend, true, "connected"),
        Ok(BackendOutcome::Skipped) => report.record(Check::Backend, true, "skipped (demo mode)"),
        Err(err) => report.record(Check::Backend, false, err.to_string()),
    }

    info!("workflow test finished at {}", now_rfc3339());
    report
}
