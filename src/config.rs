use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: Service,
    #[serde(default)]
    pub polling: Polling,
    #[serde(default)]
    pub fixtures: Fixtures,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Loads `path` when given, otherwise `./workflow-probe.toml` if it exists,
    /// otherwise the built-in defaults.
    pub fn resolve(user: Option<&Path>) -> Result<Self> {
        if let Some(p) = user {
            return Self::load(p);
        }
        let default = PathBuf::from("workflow-probe.toml");
        if default.exists() {
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies overrides that came from flags or the environment. Empty values are ignored.
    pub fn apply_overrides(&mut self, ov: &Overrides) {
        if let Some(url) = non_empty(&ov.service_url) {
            self.service.base_url = url.to_string();
        }
        if let Some(url) = non_empty(&ov.backend_url) {
            self.backend.url = url.to_string();
        }
        if let Some(key) = non_empty(&ov.backend_key) {
            self.backend.api_key = key.to_string();
        }
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub service_url: Option<String>,
    pub backend_url: Option<String>,
    pub backend_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub base_url: String,
    /// Timeout for `GET /health`. 0 disables it.
    pub health_timeout_seconds: u64,
    /// Applies to submit, status, download and cleanup calls. 0 disables the timeout.
    pub request_timeout_seconds: u64,
}
impl Default for Service {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            health_timeout_seconds: 5,
            request_timeout_seconds: 60,
        }
    }
}

impl Service {
    pub fn health_timeout(&self) -> Option<Duration> {
        (self.health_timeout_seconds > 0).then(|| Duration::from_secs(self.health_timeout_seconds))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0).then(|| Duration::from_secs(self.request_timeout_seconds))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Polling {
    pub max_attempts: u32,
    pub interval_ms: u64,
}
impl Default for Polling {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval_ms: 1000,
        }
    }
}

impl Polling {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub dir: String,
    pub image_filename: String,
    pub video_filename: String,
}
impl Default for Fixtures {
    fn default() -> Self {
        Self {
            dir: "test_files".into(),
            image_filename: "test_face.jpg".into(),
            video_filename: "test_video.mp4".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Backend {
    pub url: String,
    pub api_key: String,
    pub resource: String,
    /// Regex matched against `url`; a match puts the backend check in demo mode.
    pub placeholder_pattern: String,
    pub timeout_seconds: u64,
}
impl Default for Backend {
    fn default() -> Self {
        Self {
            url: "https://demo-project.supabase.co".into(),
            api_key: "demo-key".into(),
            resource: "face_swap_jobs".into(),
            placeholder_pattern: "(?i)demo".into(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
