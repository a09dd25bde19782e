use serde::{Deserialize, Serialize};

/// One ingredient line split into quantity and unit.
///
/// `raw` holds the line after unicode fractions were rewritten, so it can
/// differ from what the caller passed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub raw: String,
    pub quantity: f64,
    pub unit: String,
}

/// One instruction line with the total time it mentions, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedInstruction {
    pub raw: String,
    pub minutes: f64,
}

/// A single nutrient value reported by the food database for one matched food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientFact {
    pub nutrient_number: String,
    pub nutrient_name: String,
    pub unit_name: String,
    #[serde(default)]
    pub value: f64,
}

/// Sum of every fact sharing a nutrient name across a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientTotal {
    pub nutrient_number: String,
    pub nutrient_name: String,
    pub unit_name: String,
    pub value: f64,
}

impl From<&NutrientFact> for NutrientTotal {
    fn from(fact: &NutrientFact) -> Self {
        NutrientTotal {
            nutrient_number: fact.nutrient_number.clone(),
            nutrient_name: fact.nutrient_name.clone(),
            unit_name: fact.unit_name.clone(),
            value: fact.value,
        }
    }
}

/// Nutrition facts panel as published on the recipe page itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLabel {
    pub calories: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub unsaturated_fat: f64,
    pub trans_fat: f64,
    pub carbohydrates: f64,
    pub sugar: f64,
    pub cholesterol: f64,
    pub sodium: f64,
    pub protein: f64,
    pub fiber: f64,
}

/// A fully normalized recipe, ready to be serialized back to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    /// Total time in minutes, `0` when unknown
    pub total_time: u32,
    pub yields: f64,
    pub yields_description: String,
    pub ingredients: Vec<ParsedIngredient>,
    pub steps: Vec<ParsedInstruction>,
    pub image: Option<String>,
    pub host: String,
    pub language: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<NutritionLabel>,
}

/// Result of a nutrition calculation for a whole recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Description of the food matched for each requested ingredient, in request order
    pub ingredients: Vec<String>,
    pub nutrition: Vec<NutrientTotal>,
}
