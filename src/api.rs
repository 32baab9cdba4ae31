//! Indicator sources: the seam between context building and wherever the
//! numbers actually come from.
//!
//! [`Client`] talks to the **World Bank Indicators API (v2)** over blocking HTTP and
//! turns the `country/{code}/indicator/{code}` endpoint into a [`SeriesPayload`].
//! [`StaticSource`] serves fixed payloads from memory or a JSON file.
//!
//! ### Notes
//! - The API sometimes serializes `per_page` as a **string**; we accept both string/number.
//! - Requests are made once. Timeouts (30s total, 10s connect) live in the HTTP client.
//!
//! Typical usage:
//! ```no_run
//! # use wbi_context::api::{Client, IndicatorSource};
//! let client = Client::default();
//! let series = client.lookup("SP.POP.TOTL", "AGO")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::config::DEFAULT_BASE_URL;
use crate::models::{Entry, IndicatorSeries, Meta, SeriesPayload};
use anyhow::{Context, Result, anyhow, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Anything that can answer "give me the series for this indicator in this country".
pub trait IndicatorSource {
    fn lookup(&self, indicator: &str, country: &str) -> Result<SeriesPayload>;
}

impl<T: IndicatorSource + ?Sized> IndicatorSource for &T {
    fn lookup(&self, indicator: &str, country: &str) -> Result<SeriesPayload> {
        (**self).lookup(indicator, country)
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(code: &str) -> String {
    percent_encoding::utf8_percent_encode(code.trim(), SAFE).to_string()
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("wbi_context/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        let r = self.http.get(url).send().context("network error")?;
        if !r.status().is_success() {
            bail!("request failed with HTTP {}", r.status());
        }
        r.json().context("decode json")
    }
}

impl IndicatorSource for Client {
    /// Fetch every observation of `indicator` for `country` and key it by year.
    ///
    /// ### Errors
    /// - Network/HTTP error
    /// - JSON decoding error
    /// - API-level error payload (surfaced as an error)
    fn lookup(&self, indicator: &str, country: &str) -> Result<SeriesPayload> {
        if indicator.trim().is_empty() {
            bail!("indicator code required");
        }
        if country.trim().is_empty() {
            bail!("country code required");
        }

        let url = format!(
            "{}/country/{}/indicator/{}?format=json&per_page=1000",
            self.base_url,
            enc(country),
            enc(indicator)
        );

        // Safety cap to avoid pathological jobs
        let max_pages = 100u32;

        let mut page = 1u32;
        let mut data = IndicatorSeries::new();
        loop {
            if page > max_pages {
                bail!("page limit exceeded ({})", max_pages);
            }
            let page_url = format!("{}&page={}", url, page);
            log::debug!("GET {}", page_url);
            let v = self
                .get_json(&page_url)
                .with_context(|| format!("GET {}", page_url))?;

            let (meta, entries) = parse_page(&v)?;
            merge_entries(&mut data, entries);

            if page >= meta.pages {
                break;
            }
            page += 1;
        }

        log::debug!("{} {}: {} observations", country, indicator, data.len());
        Ok(SeriesPayload::new(data))
    }
}

/// Split one response page into its metadata and observations.
///
/// The API returns an array: `[Meta, [Entry, ...]]`, or a `"message"` object in
/// position 0 on error. A null second element means "no observations".
pub fn parse_page(v: &Value) -> Result<(Meta, Vec<Entry>)> {
    let arr = v
        .as_array()
        .ok_or_else(|| anyhow!("unexpected response shape: not a top-level array"))?;
    if arr.is_empty() {
        bail!("unexpected response: empty array");
    }
    if arr[0].get("message").is_some() {
        bail!("world bank api error: {}", arr[0]);
    }

    let meta: Meta = serde_json::from_value(arr[0].clone()).context("parse meta")?;
    let entries: Vec<Entry> = match arr.get(1) {
        Some(Value::Null) | None => vec![],
        Some(e) => serde_json::from_value(e.clone()).context("parse entries")?,
    };
    Ok((meta, entries))
}

/// Fold one page of observations into `data`, keyed by year. A later page
/// repeating a year replaces the earlier value.
pub fn merge_entries(data: &mut IndicatorSeries, entries: Vec<Entry>) {
    for e in entries {
        data.insert(e.date, e.value);
    }
}

/// Serves fixed payloads keyed by indicator code, regardless of country.
///
/// Codes marked with [`StaticSource::fail_on`] produce an error instead; codes
/// that are neither stored nor failing yield an empty payload (no `data`).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    payloads: HashMap<String, SeriesPayload>,
    failing: Vec<String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, indicator: &str, payload: SeriesPayload) -> Self {
        self.payloads.insert(indicator.to_string(), payload);
        self
    }

    pub fn fail_on(mut self, indicator: &str) -> Self {
        self.failing.push(indicator.to_string());
        self
    }

    /// Parse `{"<indicator code>": {"data": {...}}, ...}`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let payloads: HashMap<String, SeriesPayload> =
            serde_json::from_str(s).context("parse offline payloads")?;
        Ok(Self {
            payloads,
            failing: vec![],
        })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&s)
    }
}

impl IndicatorSource for StaticSource {
    fn lookup(&self, indicator: &str, country: &str) -> Result<SeriesPayload> {
        if self.failing.iter().any(|f| f == indicator) {
            bail!("lookup of {} for {} failed", indicator, country);
        }
        Ok(self.payloads.get(indicator).cloned().unwrap_or_default())
    }
}
