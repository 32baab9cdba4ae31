//! Display strings for context entries.
//!
//! Thousands separators come from `num-format`; the decimal separator and the
//! population unit follow the locale tag.

use num_format::{Locale, ToFormattedString};

use crate::models::Indicator;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `pt`, `pt_BR`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "pt" | "pt_pt" | "pt_br" | "pt_ao" => (&Locale::pt, ','),
        _ => (&Locale::en, '.'),
    }
}

fn population_unit(tag: &str) -> &'static str {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => "Einwohner",
        "fr" | "fr_fr" => "habitants",
        "es" | "es_es" => "habitantes",
        "pt" | "pt_pt" | "pt_br" | "pt_ao" => "habitantes",
        _ => "inhabitants",
    }
}

/// Round to the nearest integer (ties to even) and group thousands.
fn grouped(value: f64, locale: &Locale) -> String {
    let rounded = value.round_ties_even();
    // `as i128` saturates past 2^127; those values are printed digit by digit.
    if rounded.abs() < i128::MAX as f64 {
        (rounded as i128).to_formatted_string(locale)
    } else {
        group_digits(&format!("{:.0}", rounded), locale.separator())
    }
}

/// Insert `sep` every three digits from the right, keeping a leading minus.
fn group_digits(digits: &str, sep: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::from(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

/// `$124,209,000,000 USD (2022)`
pub fn format_gdp(value: f64, year: &str, locale_tag: &str) -> String {
    if !value.is_finite() {
        return format!("NA ({})", year);
    }
    let (locale, _) = map_locale(locale_tag);
    format!("${} USD ({})", grouped(value, locale), year)
}

/// `21.36% (2022)`
pub fn format_inflation(value: f64, year: &str, locale_tag: &str) -> String {
    if !value.is_finite() {
        return format!("NA ({})", year);
    }
    let (_, dec) = map_locale(locale_tag);
    let s = format!("{:.2}", value);
    let s = if dec == '.' { s } else { s.replace('.', &dec.to_string()) };
    format!("{}% ({})", s, year)
}

/// `35,027,343 inhabitants (2022)`
pub fn format_population(value: f64, year: &str, locale_tag: &str) -> String {
    if !value.is_finite() {
        return format!("NA ({})", year);
    }
    let (locale, _) = map_locale(locale_tag);
    format!(
        "{} {} ({})",
        grouped(value, locale),
        population_unit(locale_tag),
        year
    )
}

pub fn format_indicator(indicator: Indicator, value: f64, year: &str, locale_tag: &str) -> String {
    match indicator {
        Indicator::Gdp => format_gdp(value, year, locale_tag),
        Indicator::Inflation => format_inflation(value, year, locale_tag),
        Indicator::Population => format_population(value, year, locale_tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_strings() {
        assert_eq!(
            format_gdp(124_209_000_000.0, "2022", "en"),
            "$124,209,000,000 USD (2022)"
        );
        assert_eq!(format_inflation(21.36, "2022", "en"), "21.36% (2022)");
        assert_eq!(
            format_population(35_027_343.0, "2022", "en"),
            "35,027,343 inhabitants (2022)"
        );
    }

    #[test]
    fn rounding_to_whole_units() {
        assert_eq!(format_gdp(1234.6, "2020", "en"), "$1,235 USD (2020)");
        assert_eq!(format_population(2.5, "2020", "en"), "2 inhabitants (2020)");
        assert_eq!(format_inflation(7.12345, "2020", "en"), "7.12% (2020)");
    }

    #[test]
    fn values_beyond_i64_are_not_clamped() {
        assert_eq!(
            format_gdp(1.0e20, "2022", "en"),
            "$100,000,000,000,000,000,000 USD (2022)"
        );
        assert_eq!(
            format_population(-1.0e19, "2022", "en"),
            "-10,000,000,000,000,000,000 inhabitants (2022)"
        );
    }

    #[test]
    fn values_beyond_i128_keep_every_digit() {
        let s = format_gdp(1.0e40, "2022", "en");
        let digits = s
            .strip_prefix('$')
            .and_then(|rest| rest.strip_suffix(" USD (2022)"))
            .unwrap();
        assert_eq!(digits.replace(',', ""), format!("{:.0}", 1.0e40));
        let groups: Vec<&str> = digits.split(',').collect();
        assert!(groups[1..].iter().all(|g| g.len() == 3), "{s}");
        assert_eq!(groups.concat().len(), 41);
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits("1234567", ","), "1,234,567");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("-1234", "."), "-1.234");
        assert_eq!(group_digits("-123456", ","), "-123,456");
    }

    #[test]
    fn portuguese_uses_decimal_comma_and_local_unit() {
        assert_eq!(format_inflation(25.5, "2022", "pt"), "25,50% (2022)");
        assert!(format_population(34_000_000.0, "2022", "pt").ends_with(" habitantes (2022)"));
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert_eq!(
            format_indicator(Indicator::Population, 1000.0, "2021", "xx"),
            "1,000 inhabitants (2021)"
        );
    }

    #[test]
    fn non_finite_values_do_not_panic() {
        assert_eq!(format_gdp(f64::NAN, "2022", "en"), "NA (2022)");
        assert_eq!(format_inflation(f64::INFINITY, "2022", "en"), "NA (2022)");
    }
}
