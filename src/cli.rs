use crate::{
    config::{Config, Overrides},
    probe::WorkflowProbe,
    report::RunReport,
    runner,
    service::http::{HttpBackend, HttpService},
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "workflow-probe")]
#[command(about = "End-to-end smoke probe for a face-swap processing service")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Path to config TOML. If omitted, uses ./workflow-probe.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Base URL of the processing service.
    #[arg(long, env = "ROOP_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Base URL of the backend data store.
    #[arg(long, env = "SUPABASE_URL")]
    pub backend_url: Option<String>,

    /// API key sent to the backend data store.
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub backend_key: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Command {
    /// Every check in order (the default).
    Run {},
    Health {},
    Fixtures {},
    /// Create fixtures, then submit and poll one job.
    Process {},
    Backend {},
}

/// Returns the process exit code.
pub fn dispatch(args: Args) -> Result<i32> {
    let mut cfg = Config::resolve(args.config.as_deref())?;
    cfg.apply_overrides(&Overrides {
        service_url: args.service_url.clone(),
        backend_url: args.backend_url.clone(),
        backend_key: args.backend_key.clone(),
    });

    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    let probe = WorkflowProbe::new(&cfg, HttpService::new(&cfg)?, HttpBackend::new(&cfg)?)?;

    let passed = match args.cmd.unwrap_or(Command::Run {}) {
        Command::Run {} => {
            let report = runner::run_all(&probe);
            print_summary(&report);
            return Ok(report.exit_code());
        }
        Command::Health {} => probe.health_check().is_ok(),
        Command::Fixtures {} => {
            probe.create_fixtures()?;
            true
        }
        Command::Process {} => {
            let fixtures = probe.create_fixtures()?;
            probe.submit_and_poll(&fixtures).is_ok()
        }
        Command::Backend {} => probe.backend_check().is_ok(),
    };

    info!("result: {}", if passed { "pass" } else { "fail" });
    Ok(if passed { 0 } else { 1 })
}

fn print_summary(report: &RunReport) {
    println!();
    for line in report.summary_lines() {
        println!("{line}");
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

/// The log file lands next to the fixtures unless a path is configured.
pub fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(PathBuf::from(&cfg.fixtures.dir).join("workflow-probe.log"))
}
