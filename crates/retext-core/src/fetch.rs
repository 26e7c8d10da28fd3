use std::{fs, path::Path, time::Duration};

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::{config::FetchSettings, error::Error};

pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, Error>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }

    fn fetch_remote(&self, url: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| Error::transport(url, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(url, format!("HTTP {status}")));
        }
        response.text().map_err(|err| Error::transport(url, err))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, Error> {
        info!(url, "fetching page");
        let html = match local_path(url) {
            Some(path) => {
                fs::read_to_string(path).map_err(|err| Error::fetch(url, err.to_string()))?
            }
            None => self.fetch_remote(url)?,
        };
        ensure_content(url, html)
    }
}

#[derive(Debug, Clone)]
pub struct StaticFetcher {
    html: String,
}

impl StaticFetcher {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl Fetch for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<String, Error> {
        ensure_content(url, self.html.clone())
    }
}

fn ensure_content(url: &str, html: String) -> Result<String, Error> {
    if html.trim().is_empty() {
        return Err(Error::fetch(url, "empty response"));
    }
    debug!(url, bytes = html.len(), "fetched content");
    Ok(html)
}

fn local_path(url: &str) -> Option<&Path> {
    if let Some(rest) = url.strip_prefix("file://") {
        return Some(Path::new(rest));
    }
    if url.contains("://") {
        return None;
    }
    Some(Path::new(url))
}
