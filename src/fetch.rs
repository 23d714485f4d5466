use crate::config::ScraperConfig;
use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub body: Vec<u8>,
}

pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .with_context(|| format!("invalid user agent {user_agent}"))?,
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self { client })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        Self::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("request to {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("request to {url} failed with status {status}");
        }

        let body = resp
            .bytes()
            .with_context(|| format!("failed to read response body from {url}"))?
            .to_vec();
        info!(%url, %status, bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            url: url.clone(),
            body,
        })
    }
}

pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageFetcher for FileFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let body = std::fs::read(&self.path)
            .with_context(|| format!("failed to read html file {}", self.path.display()))?;

        debug!(
            file = %self.path.display(),
            %url,
            bytes = body.len(),
            "loaded html file"
        );

        Ok(FetchedPage {
            url: url.clone(),
            body,
        })
    }
}
