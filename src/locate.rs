use crate::document::{Document, attr, trimmed_text};
use crate::extract::{absolutize, extract_item};
use crate::model::{LocateStrategy, NewsItem};
use anyhow::Result;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

pub const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    ".news-item",
    ".item",
    ".post",
    ".blog-post",
    ".article",
    ".news",
    ".newsList li",
    ".news_list li",
    ".recent-news",
    ".post-item",
];

pub const ANCHOR_SCAN_LIMIT: usize = 60;
pub const ANCHOR_MIN_TITLE_CHARS: usize = 10;

#[derive(Debug, Clone)]
pub struct Located {
    pub strategy: Option<LocateStrategy>,
    pub items: Vec<NewsItem>,
}

pub fn locate_items(doc: &Document, base: &Url) -> Result<Located> {
    for &selector in CONTAINER_SELECTORS {
        let elements = doc.select_all(selector)?;
        if elements.is_empty() {
            continue;
        }

        let items: Vec<NewsItem> = elements
            .into_iter()
            .map(|el| extract_item(el, base))
            .filter(NewsItem::is_usable)
            .collect();

        debug!(selector, items = items.len(), "container selector matched");
        if !items.is_empty() {
            return Ok(Located {
                strategy: Some(LocateStrategy::Selector(selector)),
                items: dedup(items),
            });
        }
    }

    let items = scan_anchors(doc, base)?;
    let strategy = if items.is_empty() {
        None
    } else {
        Some(LocateStrategy::AnchorScan)
    };

    Ok(Located {
        strategy,
        items: dedup(items),
    })
}

fn scan_anchors(doc: &Document, base: &Url) -> Result<Vec<NewsItem>> {
    let mut items = Vec::new();
    for anchor in doc.select_all("a")?.into_iter().take(ANCHOR_SCAN_LIMIT) {
        let Some(title) = trimmed_text(anchor) else {
            continue;
        };
        let Some(href) = attr(anchor, "href") else {
            continue;
        };
        if title.chars().count() <= ANCHOR_MIN_TITLE_CHARS {
            continue;
        }

        items.push(NewsItem {
            title: Some(title),
            link: absolutize(base, Some(href)),
            ..NewsItem::default()
        });
    }
    Ok(items)
}

pub fn dedup(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match item.identity_key() {
            Some(key) => seen.insert(key.to_string()),
            None => false,
        })
        .collect()
}

pub fn dedup_and_limit(items: Vec<NewsItem>, limit: usize) -> Vec<NewsItem> {
    let mut items = dedup(items);
    items.truncate(limit);
    items
}
