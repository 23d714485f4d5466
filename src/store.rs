use crate::model::NewsItem;
use anyhow::{Context, Result};
use std::path::Path;

pub fn render_items(items: &[NewsItem]) -> Result<String> {
    serde_json::to_string_pretty(items).context("failed to serialize news items")
}

pub fn save_items(path: &Path, items: &[NewsItem]) -> Result<()> {
    let serialized = render_items(items)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }

    std::fs::write(path, serialized)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}
