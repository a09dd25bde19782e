//! Unit recognition
//!
//! Maps the word following a quantity ("grams", "tbsp", "Cups") to a canonical
//! unit name. The table is read-only once built and safe to share across threads.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Capability used by the ingredient parser to recognise unit tokens.
pub trait UnitResolver: Send + Sync {
    /// Whether `token` names a known unit.
    fn is_recognized(&self, token: &str) -> bool;

    /// Canonical singular name for a recognised token.
    ///
    /// Only meaningful when [`UnitResolver::is_recognized`] returned `true`;
    /// unknown tokens are returned unchanged.
    fn canonical_name(&self, token: &str) -> String;
}

/// Canonical name followed by every spelling that resolves to it.
/// Regular plurals ("grams", "inches") are handled by the lookup and need no entry.
const BUILTIN_UNITS: &[(&str, &[&str])] = &[
    // mass
    ("gram", &["gram", "g", "gr", "gramme", "grammes"]),
    ("kilogram", &["kilogram", "kg", "kilo", "kilogramme"]),
    ("milligram", &["milligram", "mg"]),
    ("ounce", &["ounce", "oz"]),
    ("pound", &["pound", "lb", "lbs"]),
    // volume
    ("teaspoon", &["teaspoon", "tsp", "t"]),
    ("tablespoon", &["tablespoon", "tbsp", "tbs", "tbl", "T"]),
    ("cup", &["cup", "cp", "c"]),
    ("fluid_ounce", &["fluid_ounce", "floz"]),
    ("pint", &["pint", "pt"]),
    ("quart", &["quart", "qt"]),
    ("gallon", &["gallon", "gal"]),
    ("liter", &["liter", "litre", "l", "L"]),
    ("milliliter", &["milliliter", "millilitre", "ml", "mL"]),
    ("deciliter", &["deciliter", "decilitre", "dl", "dL"]),
    // length
    ("inch", &["inch", "in"]),
    ("centimeter", &["centimeter", "centimetre", "cm"]),
    ("millimeter", &["millimeter", "millimetre", "mm"]),
    ("meter", &["meter", "metre", "m"]),
    // time
    ("second", &["second", "sec", "s"]),
    ("minute", &["minute", "min"]),
    ("hour", &["hour", "hr", "hrs", "h"]),
    ("day", &["day", "d"]),
    // cooking measures
    ("pinch", &["pinch"]),
    ("dash", &["dash"]),
    ("drop", &["drop"]),
];

static STANDARD: Lazy<UnitTable> = Lazy::new(UnitTable::builtin);

/// Default [`UnitResolver`] backed by an alias table.
#[derive(Debug, Clone)]
pub struct UnitTable {
    aliases: HashMap<String, String>,
}

impl UnitTable {
    /// Shared instance of the built-in table.
    pub fn standard() -> &'static UnitTable {
        &STANDARD
    }

    /// Build a fresh table holding only the built-in units.
    pub fn builtin() -> Self {
        let aliases = BUILTIN_UNITS
            .iter()
            .flat_map(|(canonical, spellings)| {
                spellings
                    .iter()
                    .map(move |spelling| (spelling.to_string(), canonical.to_string()))
            })
            .collect();

        UnitTable { aliases }
    }

    /// Built-in units plus caller supplied `alias -> canonical` pairs.
    /// Extra aliases win over built-in spellings.
    pub fn with_aliases<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::builtin();
        table
            .aliases
            .extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
        table
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        if token.is_empty() {
            return None;
        }

        self.lookup_exact_or_plural(token).or_else(|| {
            let lower = token.to_lowercase();
            if lower == token {
                None
            } else {
                self.lookup_exact_or_plural(&lower)
            }
        })
    }

    fn lookup_exact_or_plural(&self, token: &str) -> Option<&str> {
        if let Some(canonical) = self.aliases.get(token) {
            return Some(canonical.as_str());
        }

        // only spelled-out names take a plural, never symbols like "gs"
        [token.strip_suffix('s'), token.strip_suffix("es")]
            .into_iter()
            .flatten()
            .filter(|stem| stem.chars().count() > 2)
            .find_map(|stem| self.aliases.get(stem))
            .map(String::as_str)
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl UnitResolver for UnitTable {
    fn is_recognized(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    fn canonical_name(&self, token: &str) -> String {
        self.lookup(token).unwrap_or(token).to_string()
    }
}
