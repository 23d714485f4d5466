use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        Self {
            html: Html::parse_document(&text),
        }
    }

    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector =
            Selector::parse(css).map_err(|err| anyhow!("invalid selector {css}: {err:?}"))?;
        Ok(self.html.select(&selector).collect())
    }
}

pub fn find_tag<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    descendants(el).find(|child| child.value().name().eq_ignore_ascii_case(tag))
}

pub fn find_by_class<'a>(
    el: ElementRef<'a>,
    pred: impl Fn(&str) -> bool,
) -> Option<ElementRef<'a>> {
    descendants(el).find(|child| child.value().classes().any(&pred))
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).filter(|value| !value.is_empty())
}

pub fn title_attr<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    attr(el, "title")
}

pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn trimmed_text(el: ElementRef<'_>) -> Option<String> {
    non_empty(&text(el))
}

pub fn is_tag(el: ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn descendants<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}
