use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::IndicatorSource;
use crate::models::{Indicator, SeriesPayload};

/// What to do when one of the three lookups fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Any failure discards everything fetched so far.
    #[default]
    AllOrNothing,
    /// Failures are logged and only that indicator is left empty.
    Partial,
}

/// Raw payloads for the three indicators of one country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawIndicators {
    pub gdp: Option<SeriesPayload>,
    pub inflation: Option<SeriesPayload>,
    pub population: Option<SeriesPayload>,
}

impl RawIndicators {
    pub fn get(&self, indicator: Indicator) -> Option<&SeriesPayload> {
        match indicator {
            Indicator::Gdp => self.gdp.as_ref(),
            Indicator::Inflation => self.inflation.as_ref(),
            Indicator::Population => self.population.as_ref(),
        }
    }

    fn slot(&mut self, indicator: Indicator) -> &mut Option<SeriesPayload> {
        match indicator {
            Indicator::Gdp => &mut self.gdp,
            Indicator::Inflation => &mut self.inflation,
            Indicator::Population => &mut self.population,
        }
    }
}

/// Look up GDP, inflation and population for `country`, one after the other.
///
/// With [`FetchPolicy::AllOrNothing`] the first failing lookup aborts the whole
/// fetch and its error is returned. With [`FetchPolicy::Partial`] this never
/// fails; failed indicators are `None`.
pub fn fetch_indicators<S: IndicatorSource + ?Sized>(
    source: &S,
    country: &str,
    policy: FetchPolicy,
) -> Result<RawIndicators> {
    let mut out = RawIndicators::default();
    for indicator in Indicator::ALL {
        let code = indicator.code();
        match source.lookup(code, country) {
            Ok(payload) => *out.slot(indicator) = Some(payload),
            Err(e) => match policy {
                FetchPolicy::AllOrNothing => {
                    let msg = format!("fetch {} ({}) for {}", indicator, code, country);
                    return Err(e.context(msg));
                }
                FetchPolicy::Partial => {
                    log::warn!("skipping {} ({}) for {}: {:#}", indicator, code, country, e);
                }
            },
        }
    }
    Ok(out)
}
