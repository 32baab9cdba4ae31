use std::cell::Cell;

use wbi_context::{
    ContextConfig, FetchPolicy, Indicator, IndicatorSource, SeriesPayload, StaticSource,
    build_context, fetch_indicators, get_context,
};

fn series(pairs: &[(&str, Option<f64>)]) -> SeriesPayload {
    pairs.iter().map(|(y, v)| (y.to_string(), *v)).collect()
}

fn angola_2022() -> StaticSource {
    StaticSource::new()
        .with(
            "NY.GDP.MKTP.CD",
            series(&[("2021", Some(6.6e10)), ("2022", Some(110_000_000_000.0)), ("2023", None)]),
        )
        .with("FP.CPI.TOTL.ZG", series(&[("2021", Some(25.8)), ("2022", Some(25.5))]))
        .with("SP.POP.TOTL", series(&[("2022", Some(34_000_000.0))]))
}

/// Counts lookups and fails on the n-th one (1-based).
struct FlakySource {
    inner: StaticSource,
    fail_at: usize,
    calls: Cell<usize>,
}

impl IndicatorSource for FlakySource {
    fn lookup(&self, indicator: &str, country: &str) -> anyhow::Result<SeriesPayload> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n == self.fail_at {
            anyhow::bail!("connection reset");
        }
        self.inner.lookup(indicator, country)
    }
}

#[test]
fn three_series_give_three_formatted_entries() {
    let ctx = get_context(&angola_2022(), &ContextConfig::default()).unwrap();
    assert_eq!(ctx.len(), 3);

    let gdp = &ctx[&Indicator::Gdp];
    assert_eq!(gdp.value, 110_000_000_000.0);
    assert_eq!(gdp.year, "2022");
    assert_eq!(gdp.formatted, "$110,000,000,000 USD (2022)");

    let inflation = &ctx[&Indicator::Inflation];
    assert_eq!(inflation.formatted, "25.50% (2022)");

    let population = &ctx[&Indicator::Population];
    assert_eq!(population.formatted, "34,000,000 inhabitants (2022)");
}

#[test]
fn any_failed_lookup_yields_none() {
    for fail_at in 1..=3 {
        let src = FlakySource {
            inner: angola_2022(),
            fail_at,
            calls: Cell::new(0),
        };
        assert_eq!(get_context(&src, &ContextConfig::default()), None, "fail_at={fail_at}");
        // Nothing after the failing lookup is attempted.
        assert_eq!(src.calls.get(), fail_at);
    }
}

#[test]
fn partial_policy_keeps_the_rest() {
    let src = angola_2022().fail_on("NY.GDP.MKTP.CD");
    let cfg = ContextConfig {
        policy: FetchPolicy::Partial,
        ..Default::default()
    };
    let ctx = get_context(&src, &cfg).unwrap();
    assert!(!ctx.contains_key(&Indicator::Gdp));
    assert!(ctx.contains_key(&Indicator::Inflation));
    assert!(ctx.contains_key(&Indicator::Population));
}

#[test]
fn empty_or_all_null_series_are_omitted() {
    let src = StaticSource::new()
        .with("FP.CPI.TOTL.ZG", series(&[("2021", None), ("2022", None)]))
        .with("SP.POP.TOTL", series(&[("2020", Some(32_866_268.0))]));
    let ctx = get_context(&src, &ContextConfig::default()).unwrap();
    assert_eq!(ctx.keys().copied().collect::<Vec<_>>(), vec![Indicator::Population]);
    assert_eq!(ctx[&Indicator::Population].year, "2020");
}

#[test]
fn nothing_available_is_an_empty_context_not_none() {
    let ctx = get_context(&StaticSource::new(), &ContextConfig::default()).unwrap();
    assert!(ctx.is_empty());
}

#[test]
fn repeated_calls_are_identical() {
    let src = angola_2022();
    let cfg = ContextConfig::default();
    let a = get_context(&src, &cfg);
    let b = get_context(&src, &cfg);
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn invalid_country_yields_none_without_lookups() {
    let src = FlakySource {
        inner: angola_2022(),
        fail_at: usize::MAX,
        calls: Cell::new(0),
    };
    let cfg = ContextConfig {
        country: "not a code".into(),
        ..Default::default()
    };
    assert_eq!(get_context(&src, &cfg), None);
    assert_eq!(src.calls.get(), 0);
}

#[test]
fn build_context_respects_locale() {
    let raw = fetch_indicators(&angola_2022(), "AGO", FetchPolicy::AllOrNothing).unwrap();
    let ctx = build_context(&raw, "pt");
    assert_eq!(ctx[&Indicator::Inflation].formatted, "25,50% (2022)");
    assert!(ctx[&Indicator::Population].formatted.contains("habitantes"));
}
