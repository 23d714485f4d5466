use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub date: Option<String>,
    pub image: Option<String>,
}

impl NewsItem {
    pub fn is_usable(&self) -> bool {
        self.identity_key().is_some()
    }

    pub fn identity_key(&self) -> Option<&str> {
        self.link
            .as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| self.title.as_deref().filter(|v| !v.is_empty()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    Selector(&'static str),
    AnchorScan,
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateStrategy::Selector(sel) => write!(f, "selector:{sel}"),
            LocateStrategy::AnchorScan => f.write_str("anchor_scan"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub url: String,
    pub strategy: Option<LocateStrategy>,
    pub fetch_failed: bool,
    pub found: usize,
    pub kept: usize,
    pub written: Option<PathBuf>,
}
