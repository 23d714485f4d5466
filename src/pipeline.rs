use crate::config::ScraperConfig;
use crate::document::Document;
use crate::extract::site_root;
use crate::fetch::PageFetcher;
use crate::locate::{dedup_and_limit, locate_items};
use crate::model::{LocateStrategy, NewsItem, RunReport};
use crate::store::save_items;
use anyhow::Result;
use tracing::{error, info};
use url::Url;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum ScrapeOutcome {
    Items {
        strategy: Option<LocateStrategy>,
        items: Vec<NewsItem>,
    },
    FetchFailed {
        url: String,
        error: anyhow::Error,
    },
}

impl ScrapeOutcome {
    pub fn into_items(self) -> Vec<NewsItem> {
        match self {
            ScrapeOutcome::Items { items, .. } => items,
            ScrapeOutcome::FetchFailed { .. } => Vec::new(),
        }
    }
}

pub fn scrape(fetcher: &dyn PageFetcher, url: &Url) -> Result<ScrapeOutcome> {
    let page = match fetcher.fetch(url) {
        Ok(page) => page,
        Err(error) => {
            return Ok(ScrapeOutcome::FetchFailed {
                url: url.to_string(),
                error,
            });
        }
    };

    let doc = Document::parse(&page.body);
    let base = site_root(&page.url);
    let located = locate_items(&doc, &base)?;

    Ok(ScrapeOutcome::Items {
        strategy: located.strategy,
        items: located.items,
    })
}

pub fn run(
    config: &ScraperConfig,
    fetcher: &dyn PageFetcher,
    options: &RunOptions,
) -> Result<(RunReport, Vec<NewsItem>)> {
    let url = config.page_url()?;
    info!(%url, limit = config.limit, "scrape start");

    let mut report = RunReport {
        url: url.to_string(),
        ..RunReport::default()
    };

    let found = match scrape(fetcher, &url)? {
        ScrapeOutcome::Items { strategy, items } => {
            report.strategy = strategy;
            items
        }
        ScrapeOutcome::FetchFailed { url, error } => {
            error!(%url, error = %format!("{error:#}"), "failed to fetch page");
            report.fetch_failed = true;
            Vec::new()
        }
    };
    report.found = found.len();

    let items = dedup_and_limit(found, config.limit);
    report.kept = items.len();

    if items.is_empty() {
        info!(url = %report.url, "no news items found");
    } else if options.dry_run {
        info!(kept = report.kept, "dry run enabled; output not written");
    } else {
        save_items(&config.output, &items)?;
        info!(output = %config.output.display(), kept = report.kept, "news items written");
        report.written = Some(config.output.clone());
    }

    Ok((report, items))
}
