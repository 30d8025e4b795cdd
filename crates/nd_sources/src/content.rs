use std::time::Duration;
use nd_core::{Error, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

pub(crate) fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::SourceUnavailable(format!("Failed to parse URL: {}", e)))
}

fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(selector)
        .map_err(|e| Error::SourceUnavailable(format!("Invalid selector: {}", e)))?;

    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect())
}

/// Join the text of every `<p>` element of a page into a single body.
pub fn extract_paragraphs(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let paragraphs = extract_texts(&document, "p")?;

    Ok(paragraphs
        .iter()
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Download an article page and extract its body text.
pub async fn fetch_body(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    let url = parse_url(url)?;
    let response = client.get(url.clone()).timeout(timeout).send().await?;
    if !response.status().is_success() {
        return Err(Error::SourceUnavailable(format!(
            "{} answered {}",
            url,
            response.status()
        )));
    }
    let html = response.text().await?;
    extract_paragraphs(&html)
}

/// Drop the `… [+1234 chars]` suffix the provider appends to clipped content.
pub fn strip_truncation_marker(content: &str) -> &str {
    let trimmed = content.trim_end();
    if let Some(start) = trimmed.rfind(" [+") {
        let marker = &trimmed[start + 3..];
        if let Some(digits) = marker.strip_suffix(" chars]") {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return trimmed[..start].trim_end_matches('…').trim_end();
            }
        }
    }
    trimmed
}
