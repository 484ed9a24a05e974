use thiserror::Error;

/// Why a single remote interaction or check did not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("local I/O error: {0}")]
    Io(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("processing failed: {0}")]
    JobFailed(String),
    #[error("processing timeout after {attempts} status checks")]
    Timeout { attempts: u32 },
}

impl ProbeError {
    pub fn status(code: u16, body: impl Into<String>) -> Self {
        ProbeError::Status {
            code,
            body: body.into(),
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProbeError::Protocol(err.to_string())
        } else {
            ProbeError::Transport(err.to_string())
        }
    }
}
