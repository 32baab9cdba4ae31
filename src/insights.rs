use serde::{Deserialize, Serialize};

use crate::config::CountryProfile;
use crate::models::{Context, Indicator};

/// Inflation above this (in %) counts as high impact on prices.
pub const HIGH_IMPACT_INFLATION: f64 = 10.0;
/// Inflation above this (in %) warrants frequent price checks.
pub const MONITOR_INFLATION: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InflationImpact {
    High,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceContext {
    /// `None` when the context carries no inflation figure.
    pub inflation_impact: Option<InflationImpact>,
    pub recommendation: Option<String>,
    pub currency_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSize {
    pub population: Option<String>,
    pub economic_activity: Option<String>,
    /// Taken from the profile's economic context, when it has one.
    pub market_potential: Option<String>,
}

/// Shopping-oriented reading of a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub price_context: PriceContext,
    pub market_size: MarketSize,
    pub recommendations: Vec<String>,
}

const RECOMMENDATIONS: [&str; 4] = [
    "Compare prices regularly given economic volatility",
    "Consider local products for better value for money",
    "Track price trends by region",
    "Take advantage of promotions and special offers",
];

impl MarketInsights {
    pub fn from_context(ctx: &Context, profile: &CountryProfile) -> Self {
        let inflation = ctx.get(&Indicator::Inflation).map(|e| e.value);
        let inflation_impact = inflation.map(|v| {
            if v > HIGH_IMPACT_INFLATION {
                InflationImpact::High
            } else {
                InflationImpact::Moderate
            }
        });
        let recommendation = inflation.map(|v| {
            if v > MONITOR_INFLATION {
                "Monitor prices frequently due to high inflation".to_string()
            } else {
                "Prices are relatively stable".to_string()
            }
        });
        let currency_note = if profile.currency.is_empty() {
            format!("Prices in local currency of {}", profile.name)
        } else {
            format!("Prices in {} ({})", profile.currency, profile.name)
        };

        Self {
            price_context: PriceContext {
                inflation_impact,
                recommendation,
                currency_note,
            },
            market_size: MarketSize {
                population: ctx.get(&Indicator::Population).map(|e| e.formatted.clone()),
                economic_activity: ctx.get(&Indicator::Gdp).map(|e| e.formatted.clone()),
                market_potential: profile
                    .economic_context
                    .as_ref()
                    .map(|eco| eco.market_potential.clone()),
            },
            recommendations: RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(impact) = self.price_context.inflation_impact {
            let label = match impact {
                InflationImpact::High => "high",
                InflationImpact::Moderate => "moderate",
            };
            out.push(format!("inflation impact: {}", label));
        }
        if let Some(r) = &self.price_context.recommendation {
            out.push(format!("recommendation: {}", r));
        }
        out.push(format!("currency: {}", self.price_context.currency_note));
        if let Some(p) = &self.market_size.population {
            out.push(format!("market size: {}", p));
        }
        if let Some(g) = &self.market_size.economic_activity {
            out.push(format!("economic activity: {}", g));
        }
        if let Some(m) = &self.market_size.market_potential {
            out.push(format!("market potential: {}", m));
        }
        for r in &self.recommendations {
            out.push(format!("- {}", r));
        }
        out
    }
}
