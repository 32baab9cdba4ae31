use serde::Serialize;

use crate::api::IndicatorSource;
use crate::config::{ContextConfig, CountryProfile};
use crate::fetch::{RawIndicators, fetch_indicators};
use crate::format::format_indicator;
use crate::insights::MarketInsights;
use crate::models::{Context, ContextEntry, Indicator};
use crate::select::latest_observation;

/// Turn raw payloads into a context. Indicators whose payload is missing or has
/// no observation are left out; nothing is filled with placeholders.
pub fn build_context(raw: &RawIndicators, locale_tag: &str) -> Context {
    let mut ctx = Context::new();
    for indicator in Indicator::ALL {
        let Some(latest) = latest_observation(raw.get(indicator)) else {
            log::debug!("no observation for {}", indicator);
            continue;
        };
        let formatted = format_indicator(indicator, latest.value, &latest.year, locale_tag);
        ctx.insert(
            indicator,
            ContextEntry {
                value: latest.value,
                year: latest.year,
                formatted,
            },
        );
    }
    ctx
}

/// Fetch and format the context for `config.country`.
///
/// Returns `None` when the fetch failed (the error is logged), otherwise a
/// context that may hold zero to three entries. Never panics on bad data.
pub fn get_context<S: IndicatorSource + ?Sized>(
    source: &S,
    config: &ContextConfig,
) -> Option<Context> {
    if let Err(e) = config.validate() {
        log::error!("invalid configuration: {}", e);
        return None;
    }
    match fetch_indicators(source, config.country.trim(), config.policy) {
        Ok(raw) => Some(build_context(&raw, &config.locale)),
        Err(e) => {
            log::error!("failed to fetch economic indicators: {:#}", e);
            None
        }
    }
}

/// `label: formatted` lines in indicator order.
pub fn render_lines(ctx: &Context) -> Vec<String> {
    ctx.iter()
        .map(|(indicator, entry)| format!("{}: {}", indicator, entry.formatted))
        .collect()
}

/// Country facts, indicator entries and optional insights in one flat object:
/// `{"code": "AGO", "country": "Angola", ..., "gdp": {...}, "insights": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ContextReport<'a> {
    #[serde(flatten)]
    pub profile: &'a CountryProfile,
    #[serde(flatten)]
    pub context: &'a Context,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<&'a MarketInsights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_places_profile_next_to_indicators() {
        let profile = CountryProfile::angola();
        let mut ctx = Context::new();
        ctx.insert(
            Indicator::Gdp,
            ContextEntry {
                value: 1.0,
                year: "2022".into(),
                formatted: "$1 USD (2022)".into(),
            },
        );
        let report = ContextReport {
            profile: &profile,
            context: &ctx,
            insights: None,
        };
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["country"], "Angola");
        assert_eq!(v["currency"], "AOA");
        assert_eq!(v["capital"], "Luanda");
        assert_eq!(v["gdp"]["year"], "2022");
        assert_eq!(v["economic_context"]["main_sectors"][0], "Oil");
        assert!(v.get("insights").is_none());
    }
}
