use crate::config::{NutrientConfig, NutrientOverride};
use crate::model::{NutrientFact, NutrientTotal};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Nutrient facts reported for one matched food.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientNutrients {
    pub source_food_id: u64,
    pub facts: Vec<NutrientFact>,
}

/// Merges per-ingredient nutrient facts into one total per nutrient name.
#[derive(Debug, Clone)]
pub struct NutrientAggregator {
    tracked: HashSet<String>,
    overrides: Vec<NutrientOverride>,
}

impl NutrientAggregator {
    pub fn new<I, S>(tracked: I, overrides: Vec<NutrientOverride>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NutrientAggregator {
            tracked: tracked.into_iter().map(Into::into).collect(),
            overrides,
        }
    }

    pub fn from_config(config: &NutrientConfig) -> Self {
        Self::new(config.tracked.iter().cloned(), config.overrides.clone())
    }

    /// Sum the tracked facts of every ingredient, keyed by nutrient name.
    ///
    /// A fact matching an override is recorded twice: once under the override's
    /// synthetic entry (carrying only that fact's value, replacing any earlier
    /// one) and once in its regular bucket. When a bucket already exists the
    /// newest fact's number and unit are kept alongside the summed value.
    pub fn aggregate(&self, ingredients: &[IngredientNutrients]) -> Vec<NutrientTotal> {
        let mut totals = Totals::default();

        for ingredient in ingredients {
            for fact in ingredient
                .facts
                .iter()
                .filter(|fact| self.tracked.contains(&fact.nutrient_number))
            {
                if let Some(rule) = self.matching_override(ingredient.source_food_id, fact) {
                    debug!(
                        "food {} nutrient {} also recorded as {}",
                        ingredient.source_food_id, fact.nutrient_number, rule.synthetic_number
                    );
                    totals.replace(
                        &rule.synthetic_number,
                        NutrientTotal {
                            nutrient_number: rule.synthetic_number.clone(),
                            nutrient_name: rule.synthetic_name.clone(),
                            unit_name: fact.unit_name.clone(),
                            value: fact.value,
                        },
                    );
                }

                totals.accumulate(fact);
            }
        }

        totals.into_values()
    }

    fn matching_override(&self, food_id: u64, fact: &NutrientFact) -> Option<&NutrientOverride> {
        self.overrides
            .iter()
            .find(|rule| rule.food_id == food_id && rule.nutrient_number == fact.nutrient_number)
    }
}

impl Default for NutrientAggregator {
    fn default() -> Self {
        Self::from_config(&NutrientConfig::default())
    }
}

/// Insertion-ordered map from bucket key to running total.
#[derive(Default)]
struct Totals {
    index: HashMap<String, usize>,
    values: Vec<NutrientTotal>,
}

impl Totals {
    fn replace(&mut self, key: &str, total: NutrientTotal) {
        match self.index.get(key) {
            Some(&position) => self.values[position] = total,
            None => {
                self.index.insert(key.to_string(), self.values.len());
                self.values.push(total);
            }
        }
    }

    fn accumulate(&mut self, fact: &NutrientFact) {
        let previous = self
            .index
            .get(&fact.nutrient_name)
            .map_or(0.0, |&position| self.values[position].value);

        let mut total = NutrientTotal::from(fact);
        total.value += previous;
        self.replace(&fact.nutrient_name, total);
    }

    fn into_values(self) -> Vec<NutrientTotal> {
        self.values
    }
}
