use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{INDICATOR_GDP, INDICATOR_INFLATION, INDICATOR_POPULATION};

/// Year key (as served by the API, e.g. `"2021"`) to value, `None` where the
/// provider has no observation.
pub type IndicatorSeries = BTreeMap<String, Option<f64>>;

/// Raw payload for one indicator and one country.
///
/// Only the `data` field is read; anything else the provider sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    #[serde(default, deserialize_with = "de_opt_series")]
    pub data: Option<IndicatorSeries>,
}

impl SeriesPayload {
    pub fn new(data: IndicatorSeries) -> Self {
        Self { data: Some(data) }
    }
}

impl FromIterator<(String, Option<f64>)> for SeriesPayload {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Serde helper: a year map whose values may be numbers, numeric strings or
/// anything else. Non-numeric values are kept as absences.
fn de_opt_series<'de, D>(deserializer: D) -> Result<Option<IndicatorSeries>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|m| {
        m.into_iter()
            .map(|(year, v)| (year, value_as_f64(&v)))
            .collect()
    }))
}

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

/// Most recent year of a series that carries a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestObservation {
    pub year: String,
    pub value: f64,
}

/// The three indicators a context is built from. Ordering follows declaration
/// order, which is also the order entries are printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Gdp,
    Inflation,
    Population,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::Gdp, Indicator::Inflation, Indicator::Population];

    /// World Bank indicator code.
    pub fn code(self) -> &'static str {
        match self {
            Indicator::Gdp => INDICATOR_GDP,
            Indicator::Inflation => INDICATOR_INFLATION,
            Indicator::Population => INDICATOR_POPULATION,
        }
    }

    /// Context label (`gdp`, `inflation`, `population`).
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Gdp => "gdp",
            Indicator::Inflation => "inflation",
            Indicator::Population => "population",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of a context: the raw value, its year and a display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub value: f64,
    pub year: String,
    pub formatted: String,
}

/// Indicator label to entry. Indicators without data are simply absent.
pub type Context = BTreeMap<Indicator, ContextEntry>;

/// Metadata section returned by the World Bank API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("value out of range for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// Raw observation from the API (position 1 array).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub indicator: CodeName,
    pub country: CodeName,
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}
