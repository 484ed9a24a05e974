use super::{endpoint, types::*, BackendStore, ProcessingService};
use crate::{config::Config, error::ProbeError};
use anyhow::{Context, Result};
use reqwest::{
    blocking::{multipart::Form, Client, Response},
    StatusCode,
};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub struct HttpService {
    client: Client,
    base_url: String,
    health_timeout: Option<Duration>,
}

impl HttpService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(cfg.service.request_timeout())
            .build()
            .with_context(|| "building HTTP client for processing service")?;
        Ok(Self {
            client,
            base_url: cfg.service.base_url.clone(),
            health_timeout: cfg.service.health_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

/// Only `200 OK` passes; any other status becomes `ProbeError::Status` with the body.
fn ensure_ok(resp: Response) -> Result<Response, ProbeError> {
    let status = resp.status();
    if status == StatusCode::OK {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(ProbeError::status(status.as_u16(), body))
}

impl ProcessingService for HttpService {
    fn health(&self) -> Result<(), ProbeError> {
        let url = self.url("/health");
        debug!("GET {url} timeout={:?}", self.health_timeout);
        let mut req = self.client.get(&url);
        if let Some(timeout) = self.health_timeout {
            req = req.timeout(timeout);
        }
        let resp = req.send()?;
        ensure_ok(resp).map(|_| ())
    }

    fn submit(&self, source_image: &Path, target_video: &Path) -> Result<SubmitOut, ProbeError> {
        let url = self.url("/process");
        let form = Form::new()
            .file("source_image", source_image)
            .map_err(|e| ProbeError::Io(format!("attach {}: {e}", source_image.display())))?
            .file("target_video", target_video)
            .map_err(|e| ProbeError::Io(format!("attach {}: {e}", target_video.display())))?;
        debug!("POST {url} multipart");
        let resp = ensure_ok(self.client.post(&url).multipart(form).send()?)?;
        Ok(resp.json::<SubmitOut>()?)
    }

    fn status(&self, job: &JobHandle) -> Result<JobStatus, ProbeError> {
        let url = self.url(&format!("/status/{job}"));
        let resp = ensure_ok(self.client.get(&url).send()?)?;
        Ok(resp.json::<JobStatus>()?)
    }

    fn download(&self, job: &JobHandle) -> Result<Vec<u8>, ProbeError> {
        let url = self.url(&format!("/download/{job}"));
        debug!("GET {url}");
        let resp = ensure_ok(self.client.get(&url).send()?)?;
        Ok(resp.bytes()?.to_vec())
    }

    fn cleanup(&self, job: &JobHandle) -> Result<u16, ProbeError> {
        let url = self.url(&format!("/cleanup/{job}"));
        debug!("DELETE {url}");
        let resp = self.client.delete(&url).send()?;
        Ok(resp.status().as_u16())
    }
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_key: String,
    resource: String,
}

impl HttpBackend {
    pub fn new(cfg: &Config) -> Result<Self> {
        let timeout = (cfg.backend.timeout_seconds > 0)
            .then(|| Duration::from_secs(cfg.backend.timeout_seconds));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "building HTTP client for backend")?;
        Ok(Self {
            client,
            base_url: cfg.backend.url.clone(),
            api_key: cfg.backend.api_key.clone(),
            resource: cfg.backend.resource.clone(),
        })
    }
}

impl BackendStore for HttpBackend {
    fn ping(&self) -> Result<(), ProbeError> {
        let url = endpoint(&self.base_url, &format!("/rest/v1/{}", self.resource));
        debug!("GET {url}?limit=1");
        let resp = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .header("apikey", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()?;
        ensure_ok(resp).map(|_| ())
    }
}
