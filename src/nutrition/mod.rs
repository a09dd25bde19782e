//! Nutrient totals for a recipe, from per-ingredient food database matches.

mod aggregate;
mod lookup;
mod usda;

pub use aggregate::{IngredientNutrients, NutrientAggregator};
pub use lookup::{calculate_nutrition, FoodLookup, FoodMatch, NutritionRequest};
pub use usda::UsdaClient;
