use anyhow::{Context, Result};
use url::Url;
use zamalek_news::document::Document;
use zamalek_news::extract::{absolutize, extract_item, site_root};
use zamalek_news::model::NewsItem;

fn extract_first(html: &str, selector: &str) -> Result<NewsItem> {
    let doc = Document::parse(html.as_bytes());
    let base = Url::parse("https://example.com/")?;
    let el = doc
        .select_all(selector)?
        .into_iter()
        .next()
        .context("fixture element missing")?;
    Ok(extract_item(el, &base))
}

#[test]
fn header_anchor_supplies_title_and_link() -> Result<()> {
    let item = extract_first(
        r#"<article>
            <h2><a href="news/1">  Derby preview  </a></h2>
            <p> First paragraph </p><p>Second</p>
            <img src="/img/derby.png">
        </article>"#,
        "article",
    )?;

    assert_eq!(item.title.as_deref(), Some("Derby preview"));
    assert_eq!(item.link.as_deref(), Some("https://example.com/news/1"));
    assert_eq!(item.summary.as_deref(), Some("First paragraph"));
    assert_eq!(item.image.as_deref(), Some("https://example.com/img/derby.png"));
    assert_eq!(item.date, None);
    Ok(())
}

#[test]
fn header_without_anchor_leaves_link_unset() -> Result<()> {
    let item = extract_first(
        r#"<div class="item"><h3>Squad list</h3><a href="/more">Read more</a></div>"#,
        ".item",
    )?;

    assert_eq!(item.title.as_deref(), Some("Squad list"));
    assert_eq!(item.link, None);
    Ok(())
}

#[test]
fn higher_priority_tag_wins_over_document_order() -> Result<()> {
    let item = extract_first(
        r#"<div class="item"><a href="/first">Anchor first</a><h1>Main headline</h1></div>"#,
        ".item",
    )?;

    assert_eq!(item.title.as_deref(), Some("Main headline"));
    assert_eq!(item.link, None);
    Ok(())
}

#[test]
fn empty_header_falls_through_to_anchor() -> Result<()> {
    let item = extract_first(
        r#"<div class="item"><h2>   </h2><a data-href="/d/5">Data href story</a></div>"#,
        ".item",
    )?;

    assert_eq!(item.title.as_deref(), Some("Data href story"));
    assert_eq!(item.link.as_deref(), Some("https://example.com/d/5"));
    Ok(())
}

#[test]
fn anchor_title_attribute_used_when_text_is_empty() -> Result<()> {
    let item = extract_first(
        r#"<li class="news"><a href="/t/1" title="Tooltip headline"><img src="x.jpg"></a></li>"#,
        ".news",
    )?;

    assert_eq!(item.title.as_deref(), Some("Tooltip headline"));
    assert_eq!(item.link.as_deref(), Some("https://example.com/t/1"));
    assert_eq!(item.image.as_deref(), Some("https://example.com/x.jpg"));
    Ok(())
}

#[test]
fn strong_is_used_when_no_header_or_anchor() -> Result<()> {
    let item = extract_first(
        r#"<div class="post"><strong>Bold headline</strong><p>Body</p></div>"#,
        ".post",
    )?;

    assert_eq!(item.title.as_deref(), Some("Bold headline"));
    assert_eq!(item.link, None);
    assert_eq!(item.summary.as_deref(), Some("Body"));
    Ok(())
}

#[test]
fn untitled_header_anchor_keeps_its_link() -> Result<()> {
    let item = extract_first(
        r#"<div class="item"><h2><a href="/from-header"></a></h2></div>"#,
        ".item",
    )?;

    assert_eq!(item.title, None);
    assert_eq!(item.link.as_deref(), Some("https://example.com/from-header"));
    assert!(item.is_usable());
    Ok(())
}

#[test]
fn element_without_headline_or_anchor_is_unusable() -> Result<()> {
    let item = extract_first(
        r#"<div class="item"><span class="date">2024-01-01</span></div>"#,
        ".item",
    )?;

    assert_eq!(item.title, None);
    assert_eq!(item.link, None);
    assert!(!item.is_usable());
    assert_eq!(item.date.as_deref(), Some("2024-01-01T00:00:00"));
    Ok(())
}

#[test]
fn time_datetime_attribute_preferred_over_text() -> Result<()> {
    let item = extract_first(
        r#"<article><h2>T</h2><time datetime="2024-01-01">Jan 1</time></article>"#,
        "article",
    )?;
    assert_eq!(item.date.as_deref(), Some("2024-01-01T00:00:00"));

    let item = extract_first(
        r#"<article><h2>T</h2><time>March 3, 2024</time></article>"#,
        "article",
    )?;
    assert_eq!(item.date.as_deref(), Some("2024-03-03T00:00:00"));
    Ok(())
}

#[test]
fn date_class_hints_follow_priority_not_document_order() -> Result<()> {
    let item = extract_first(
        r#"<article>
            <h2>T</h2>
            <span class="time">Coming Soon</span>
            <span class="meta post-date">March 3, 2024</span>
        </article>"#,
        "article",
    )?;

    assert_eq!(item.date.as_deref(), Some("2024-03-03T00:00:00"));
    Ok(())
}

#[test]
fn unparsable_date_text_passes_through_trimmed() -> Result<()> {
    let item = extract_first(
        r#"<article><h2>T</h2><div class="entry-date">  Coming Soon </div></article>"#,
        "article",
    )?;

    assert_eq!(item.date.as_deref(), Some("Coming Soon"));
    Ok(())
}

#[test]
fn image_without_src_is_absent() -> Result<()> {
    let item = extract_first(r#"<article><h2>T</h2><img alt="x"></article>"#, "article")?;
    assert_eq!(item.image, None);
    Ok(())
}

#[test]
fn relative_links_resolve_against_site_root() -> Result<()> {
    let page = Url::parse("https://example.com/index.html?page=2#top")?;
    let root = site_root(&page);

    assert_eq!(root.as_str(), "https://example.com/");
    assert_eq!(
        absolutize(&root, Some("/news/1")).as_deref(),
        Some("https://example.com/news/1")
    );
    assert_eq!(
        absolutize(&root, Some("https://other.org/x")).as_deref(),
        Some("https://other.org/x")
    );
    assert_eq!(absolutize(&root, Some("   ")), None);
    assert_eq!(absolutize(&root, None), None);
    Ok(())
}
