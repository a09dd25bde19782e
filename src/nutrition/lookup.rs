use super::aggregate::{IngredientNutrients, NutrientAggregator};
use crate::error::NormalizeError;
use crate::model::{NutrientFact, NutritionSummary};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// The best food a nutrient database found for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodMatch {
    pub fdc_id: u64,
    pub description: String,
    #[serde(default)]
    pub food_nutrients: Vec<NutrientFact>,
}

/// Searches a nutrient database for the food matching an ingredient.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    /// Get the lookup name (e.g., "usda")
    fn lookup_name(&self) -> &str;

    /// Best match for `query`, or `None` when the database has nothing.
    async fn search(&self, query: &str) -> Result<Option<FoodMatch>, NormalizeError>;
}

/// One ingredient of a nutrition calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRequest {
    pub id: String,
    pub quantity: f64,
    pub unit: String,
}

impl NutritionRequest {
    fn validate(&self) -> Result<(), NormalizeError> {
        if self.id.is_empty() {
            return Err(NormalizeError::InvalidRequest(
                "ingredient id must not be empty".to_string(),
            ));
        }
        if self.quantity.is_nan() || self.quantity < 0.0 {
            return Err(NormalizeError::InvalidRequest(format!(
                "quantity for '{}' must be zero or more",
                self.id
            )));
        }
        if self.unit.is_empty() {
            return Err(NormalizeError::InvalidRequest(format!(
                "unit for '{}' must not be empty",
                self.id
            )));
        }
        Ok(())
    }
}

/// Looks up every requested ingredient and totals the nutrients of the matches.
///
/// The whole request is validated before any lookup is made, and a single
/// ingredient without a match fails the calculation.
pub async fn calculate_nutrition(
    lookup: &dyn FoodLookup,
    requests: &[NutritionRequest],
    aggregator: &NutrientAggregator,
) -> Result<NutritionSummary, NormalizeError> {
    let start = Instant::now();
    info!(
        "Calculating nutrition for {} ingredients using {}",
        requests.len(),
        lookup.lookup_name()
    );

    for request in requests {
        request.validate()?;
    }

    let mut matched = Vec::with_capacity(requests.len());
    let mut batches = Vec::with_capacity(requests.len());

    for request in requests {
        let food = lookup
            .search(&request.id)
            .await?
            .ok_or_else(|| NormalizeError::NoFoodMatch(request.id.clone()))?;

        debug!(
            "'{}' matched food {} ({})",
            request.id, food.fdc_id, food.description
        );

        matched.push(food.description);
        batches.push(IngredientNutrients {
            source_food_id: food.fdc_id,
            facts: food.food_nutrients,
        });
    }

    let summary = NutritionSummary {
        ingredients: matched,
        nutrition: aggregator.aggregate(&batches),
    };

    info!(
        "Finished nutrition calculation in {:.4}s",
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}
