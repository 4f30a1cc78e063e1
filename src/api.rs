// API client module: a small blocking HTTP client that talks to the
// Modern-Scraper API. One GET per call, no retries, no timeout override.

use crate::config::Settings;
use crate::error::{Result, ScraperError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client;
use std::fmt;

/// Characters left as-is when a user value is embedded in a path segment.
/// Everything else (including `/`, `:` and `?`) is escaped, so a full URL
/// passed to `extract-html` stays a single segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Path appended to the API base URL to select a remote operation,
/// e.g. `urls/example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// `urls/<domain>`: every known url for a domain.
    pub fn urls(domain: &str) -> Result<Self> {
        Ok(ResourcePath(format!("urls/{}", segment("domain", domain)?)))
    }

    /// `html/<url>`: the HTML of a single page.
    pub fn html(url: &str) -> Result<Self> {
        Ok(ResourcePath(format!("html/{}", segment("url", url)?)))
    }

    /// `html/all/<domain>`: the HTML of every page of a domain.
    pub fn html_all(domain: &str) -> Result<Self> {
        Ok(ResourcePath(format!("html/all/{}", segment("domain", domain)?)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn segment(name: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(ScraperError::Usage(format!("`{name}` must not be empty")));
    }
    Ok(utf8_percent_encode(value, SEGMENT).to_string())
}

/// Anything that can fetch a resource body from the API. The handlers are
/// written against this trait so they can run against a fake in tests.
pub trait Fetch {
    fn get_resource(&self, path: &ResourcePath) -> Result<Vec<u8>>;
}

/// Blocking client bound to one API base URL.
#[derive(Clone)]
pub struct ScraperClient {
    client: Client,
    base_url: String,
}

impl ScraperClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("modern-scraper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ScraperError::Client)?;
        Ok(ScraperClient {
            client,
            base_url: settings.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a resource path.
    pub fn url_for(&self, path: &ResourcePath) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Fetch for ScraperClient {
    fn get_resource(&self, path: &ResourcePath) -> Result<Vec<u8>> {
        let url = self.url_for(path);
        log::debug!("GET {}", url);
        let res = self.client.get(&url).send().map_err(|source| ScraperError::Network {
            url: url.clone(),
            source,
        })?;
        let status = res.status();
        log::debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            let txt = res.text().unwrap_or_else(|_| "".into());
            return Err(ScraperError::http(status.as_u16(), &txt));
        }
        let body = res
            .bytes()
            .map_err(|source| ScraperError::Network { url, source })?;
        Ok(body.to_vec())
    }
}
