use crate::dates::normalize_date;
use crate::document::{
    attr, find_by_class, find_tag, is_tag, non_empty, text, title_attr, trimmed_text,
};
use crate::model::NewsItem;
use scraper::ElementRef;
use url::Url;

pub const TITLE_TAGS: &[&str] = &["h1", "h2", "h3", "a", "strong"];

pub const DATE_CLASS_HINTS: &[&str] = &["date", "time", "post-date", "meta-date"];

type DateSource = fn(ElementRef<'_>) -> Option<String>;

// A located <time> ends the chain even when its text is empty.
const DATE_SOURCES: &[DateSource] = &[time_tag_date, class_hint_date];

#[derive(Debug, Default)]
struct Headline {
    title: Option<String>,
    link: Option<String>,
}

pub fn extract_item(el: ElementRef<'_>, base: &Url) -> NewsItem {
    let headline = extract_headline(el);
    let raw_date = DATE_SOURCES.iter().find_map(|source| source(el));

    NewsItem {
        title: headline.title,
        link: absolutize(base, headline.link.as_deref()),
        summary: find_tag(el, "p").and_then(trimmed_text),
        date: normalize_date(raw_date.as_deref()),
        image: absolutize(base, find_tag(el, "img").and_then(|img| attr(img, "src"))),
    }
}

pub fn absolutize(base: &Url, value: Option<&str>) -> Option<String> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    base.join(value).ok().map(|url| url.to_string())
}

pub fn site_root(page: &Url) -> Url {
    let mut root = page.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

fn extract_headline(el: ElementRef<'_>) -> Headline {
    let mut headline = Headline::default();

    for tag in TITLE_TAGS {
        let Some(found) = find_tag(el, tag) else {
            continue;
        };

        if is_tag(found, "a") {
            headline.link = anchor_href(found);
            headline.title = anchor_title(found);
        } else if let Some(anchor) = find_tag(found, "a") {
            headline.link = anchor_href(anchor);
            headline.title = trimmed_text(anchor);
        } else {
            headline.title = trimmed_text(found);
        }

        if headline.title.is_some() {
            return headline;
        }
    }

    // Element-wide anchor: fills only what the tag pass left empty.
    if let Some(anchor) = find_tag(el, "a") {
        headline.title = anchor_title(anchor);
        if headline.link.is_none() {
            headline.link = attr(anchor, "href").map(ToString::to_string);
        }
    }

    headline
}

fn anchor_href(anchor: ElementRef<'_>) -> Option<String> {
    attr(anchor, "href")
        .or_else(|| attr(anchor, "data-href"))
        .map(ToString::to_string)
}

fn anchor_title(anchor: ElementRef<'_>) -> Option<String> {
    trimmed_text(anchor).or_else(|| title_attr(anchor).and_then(non_empty))
}

fn time_tag_date(el: ElementRef<'_>) -> Option<String> {
    let time = find_tag(el, "time")?;
    Some(
        attr(time, "datetime")
            .map(ToString::to_string)
            .unwrap_or_else(|| text(time)),
    )
}

fn class_hint_date(el: ElementRef<'_>) -> Option<String> {
    DATE_CLASS_HINTS
        .iter()
        .find_map(|hint| find_by_class(el, |class| class.contains(hint)))
        .map(text)
}
