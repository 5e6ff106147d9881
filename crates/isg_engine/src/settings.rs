use std::time::Duration;

use isg_logging::{isg_debug, isg_warn};
use reqwest::header::{HeaderName, HeaderValue};

use crate::TableLayout;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Base URL of the ISG web interface; page paths are joined onto it.
    pub base_url: String,
    /// Static headers sent with every page request.
    pub headers: Vec<(String, String)>,
    /// Overall deadline of one scrape cycle, covering all pages.
    pub timeout: Duration,
    pub max_bytes: u64,
    pub max_concurrent_pages: usize,
    pub layout: TableLayout,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: "http://isg.ip.or.hostname".to_string(),
            headers: Vec::new(),
            timeout: Duration::from_secs(5),
            max_bytes: 5 * 1024 * 1024,
            max_concurrent_pages: 4,
            layout: TableLayout::default(),
        }
    }
}

/// Parses `key: value` (or `key=value`) header strings. The first separator
/// wins and both sides are trimmed. Entries that are malformed or not valid
/// HTTP header names/values are dropped with a warning.
pub fn parse_headers<S: AsRef<str>>(entries: &[S]) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.as_ref();
        let Some(split) = entry.find([':', '=']) else {
            isg_warn!("Could not parse header {:?}: missing separator, ignoring", entry);
            continue;
        };
        let key = entry[..split].trim();
        let value = entry[split + 1..].trim();
        if key.is_empty() {
            isg_warn!("Could not parse header {:?}: empty name, ignoring", entry);
            continue;
        }
        if let Err(err) = HeaderName::from_bytes(key.as_bytes()) {
            isg_warn!("Could not use header {:?}: {}, ignoring", key, err);
            continue;
        }
        if let Err(err) = HeaderValue::from_str(value) {
            isg_warn!("Could not use value of header {:?}: {}, ignoring", key, err);
            continue;
        }
        isg_debug!("Using header {}", key);
        headers.push((key.to_string(), value.to_string()));
    }
    headers
}
