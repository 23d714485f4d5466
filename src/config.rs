use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScraperConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            output: default_output(),
            limit: default_limit(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScraperConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            bail!("url must not be empty");
        }
        Url::parse(&self.url).with_context(|| format!("url is not absolute: {}", self.url))?;
        if self.output.as_os_str().is_empty() {
            bail!("output must not be empty");
        }
        if self.limit == 0 {
            bail!("limit must be a positive integer");
        }
        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn page_url(&self) -> Result<Url> {
        Url::parse(&self.url).with_context(|| format!("invalid url {}", self.url))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub output: Option<PathBuf>,
    pub limit: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: ScraperConfig) -> ScraperConfig {
        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        config
    }
}

pub fn load_config(path: &Path) -> Result<ScraperConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: ScraperConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse toml in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

pub fn resolve_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<ScraperConfig> {
    let base = match path {
        Some(path) => load_config(path)?,
        None => ScraperConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate()?;
    Ok(config)
}

fn default_url() -> String {
    "https://www.zamaleksc.com/".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("zamalek_news.json")
}

fn default_limit() -> usize {
    20
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; ZamalekScraper/1.0)".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}
