use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::FetchPolicy;

/// Country queried when nothing else is configured (ISO3).
pub const COUNTRY_CODE: &str = "AGO";
/// ISO2 spelling of [`COUNTRY_CODE`].
pub const COUNTRY_CODE_ISO2: &str = "AO";

/// GDP in current US dollars.
pub const INDICATOR_GDP: &str = "NY.GDP.MKTP.CD";
/// Consumer price index inflation, annual %.
pub const INDICATOR_INFLATION: &str = "FP.CPI.TOTL.ZG";
/// Total population.
pub const INDICATOR_POPULATION: &str = "SP.POP.TOTL";

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";
pub const DEFAULT_LOCALE: &str = "en";

/// Errors raised while validating a [`ContextConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid country code {0:?}: expected 2-3 ASCII letters or digits")]
    InvalidCountry(String),

    #[error("empty locale tag")]
    EmptyLocale,
}

/// Qualitative background shown next to the numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicContext {
    pub main_sectors: Vec<String>,
    pub challenges: Vec<String>,
    pub opportunities: Vec<String>,
    pub market_potential: String,
}

/// Static facts about the country a context is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub code: String,
    #[serde(rename = "country")]
    pub name: String,
    pub currency: String,
    pub capital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_context: Option<EconomicContext>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl CountryProfile {
    pub fn angola() -> Self {
        Self {
            code: COUNTRY_CODE.into(),
            name: "Angola".into(),
            currency: "AOA".into(),
            capital: "Luanda".into(),
            economic_context: Some(EconomicContext {
                main_sectors: strings(&["Oil", "Diamonds", "Agriculture", "Fishing"]),
                challenges: strings(&["High inflation", "Oil dependence", "Infrastructure"]),
                opportunities: strings(&["Economic diversification", "Agriculture", "Tourism"]),
                market_potential: "High growth potential in the food sector".into(),
            }),
        }
    }

    /// Profile for `code` (ISO2 or ISO3). Unknown codes get a bare profile named
    /// after the code.
    pub fn for_code(code: &str) -> Self {
        let code = code.trim();
        if code.eq_ignore_ascii_case(COUNTRY_CODE)
            || code.eq_ignore_ascii_case(COUNTRY_CODE_ISO2)
        {
            return Self::angola();
        }
        let code = code.to_ascii_uppercase();
        Self {
            name: code.clone(),
            code,
            currency: String::new(),
            capital: String::new(),
            economic_context: None,
        }
    }
}

/// Knobs for a single context build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// ISO2/ISO3 country code passed to the indicator source.
    pub country: String,
    /// Locale tag for display strings (`en`, `pt`, `de`, ...).
    pub locale: String,
    pub policy: FetchPolicy,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            country: COUNTRY_CODE.into(),
            locale: DEFAULT_LOCALE.into(),
            policy: FetchPolicy::AllOrNothing,
        }
    }
}

impl ContextConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.country.trim();
        if !(2..=3).contains(&c.len()) || !c.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidCountry(self.country.clone()));
        }
        if self.locale.trim().is_empty() {
            return Err(ConfigError::EmptyLocale);
        }
        Ok(())
    }
}
