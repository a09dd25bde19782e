//! Normalizes free-text recipe content into structured, unit-aware records.
//!
//! The line normalizers in [`normalizers`] are pure and never fail. Scraping,
//! backup import and nutrition lookups sit around them and report failures
//! through [`NormalizeError`].

pub mod config;
pub mod error;
pub mod model;
pub mod normalizers;
pub mod nutrition;
pub mod pipelines;
pub mod scrapers;
pub mod units;

pub use config::NormalizerConfig;
pub use error::NormalizeError;
pub use model::{
    NutrientFact, NutrientTotal, NutritionLabel, NutritionSummary, ParsedIngredient,
    ParsedInstruction, Recipe,
};
pub use nutrition::{
    calculate_nutrition, FoodLookup, FoodMatch, IngredientNutrients, NutrientAggregator,
    NutritionRequest, UsdaClient,
};
pub use pipelines::{import_backup, normalize_recipe, parse_recipe_html};
pub use scrapers::{JsonLdScraper, RecipeScraper, ScrapedRecipe};
pub use units::{UnitResolver, UnitTable};

/// Parse one ingredient line against the built-in unit table.
///
/// # Example
/// ```
/// let parsed = recipe_normalize::parse_ingredient("2 1/2 cups flour");
/// assert_eq!(parsed.quantity, 2.5);
/// assert_eq!(parsed.unit, "cup");
/// ```
pub fn parse_ingredient(text: &str) -> ParsedIngredient {
    normalizers::parse_ingredient(text, UnitTable::standard())
}

/// Parse one instruction line.
///
/// # Example
/// ```
/// let parsed = recipe_normalize::parse_instruction("Proof for 1 hour, then bake 30 minutes");
/// assert_eq!(parsed.minutes, 90.0);
/// ```
pub fn parse_instruction(text: &str) -> ParsedInstruction {
    normalizers::parse_instruction(text)
}

/// Build the unit table described by the configuration.
pub fn unit_table(config: &NormalizerConfig) -> UnitTable {
    UnitTable::with_aliases(
        config
            .units
            .aliases
            .iter()
            .map(|(alias, canonical)| (alias.clone(), canonical.clone())),
    )
}
