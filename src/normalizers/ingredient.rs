use super::fractions::normalize_fractions;
use crate::model::ParsedIngredient;
use crate::units::UnitResolver;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading quantity (mixed number, fraction or decimal) followed by the word
/// that may name its unit.
static QUANTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<value>[0-9]{1,5}\s[0-9]{1,5}/[0-9]{1,5}|[0-9]{1,5}/[0-9]{1,5}|[0-9]{1,5}\.?[0-9]{0,5})[0-9]*\s?(?P<unit>\w*\b)",
    )
    .unwrap()
});

/// Splits one ingredient line such as `"2 1/2 cups flour"` into quantity and unit.
///
/// Lines without a leading number come back with quantity `0`, and unit words
/// the resolver does not know come back as an empty unit. Fractions and mixed
/// numbers are rounded to two decimals; plain decimals are kept as written.
pub fn parse_ingredient(text: &str, units: &dyn UnitResolver) -> ParsedIngredient {
    let raw = normalize_fractions(text);
    let (quantity, unit) = extract_quantity(&raw, units).unwrap_or((0.0, String::new()));

    ParsedIngredient {
        raw,
        quantity,
        unit,
    }
}

fn extract_quantity(text: &str, units: &dyn UnitResolver) -> Option<(f64, String)> {
    let captures = QUANTITY_REGEX.captures(text.trim_start())?;
    let value = captures.name("value").map_or("", |m| m.as_str());
    let token = captures.name("unit").map_or("", |m| m.as_str());

    let unit = if !token.is_empty() && units.is_recognized(token) {
        units.canonical_name(token)
    } else {
        String::new()
    };

    let quantity = parse_quantity(value);
    debug!("quantity {value:?} -> {quantity}, unit {token:?} -> {unit:?}");

    Some((quantity, unit))
}

fn parse_quantity(value: &str) -> f64 {
    let parts: Vec<&str> = value.split_whitespace().collect();

    match parts.as_slice() {
        [whole, fraction] => whole.parse::<u32>().map_or(0.0, f64::from) + parse_fraction(fraction),
        [single] if single.contains('/') => parse_fraction(single),
        [single] => single.parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// `n/d` rounded to two decimals; a zero denominator counts as nothing.
fn parse_fraction(text: &str) -> f64 {
    let Some((numerator, denominator)) = text.split_once('/') else {
        return 0.0;
    };

    match (numerator.parse::<f64>(), denominator.parse::<f64>()) {
        (Ok(n), Ok(d)) if d != 0.0 => round_two_decimals(n / d),
        _ => 0.0,
    }
}

/// Rounds the exact binary value, ties to even: 1/8 becomes 0.12 while 1/40
/// (stored slightly above 0.025) becomes 0.03.
fn round_two_decimals(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
