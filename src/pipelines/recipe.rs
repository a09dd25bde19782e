use crate::error::NormalizeError;
use crate::model::{NutritionLabel, Recipe};
use crate::normalizers::{parse_ingredient, parse_instruction};
use crate::scrapers::{RecipeScraper, ScrapedRecipe};
use crate::units::UnitResolver;
use log::{error, info};
use std::collections::HashMap;
use std::time::Instant;

/// Scrape `html` with `scraper` and normalize the result.
pub fn parse_recipe_html(
    scraper: &dyn RecipeScraper,
    html: &str,
    url: &str,
    units: &dyn UnitResolver,
) -> Result<Recipe, NormalizeError> {
    let start = Instant::now();
    info!("Processing parse request for url: {}", url);

    let result = scraper
        .scrape(html, url)
        .map(|scraped| normalize_recipe(scraped, units));

    if let Err(e) = &result {
        error!("Failed to process parse request for {}. Error: {}", url, e);
    }
    info!(
        "Finished processing parse request for {}. Time taken: {:.4}s",
        url,
        start.elapsed().as_secs_f64()
    );
    result
}

/// Turns scraped strings into a structured [`Recipe`].
pub fn normalize_recipe(scraped: ScrapedRecipe, units: &dyn UnitResolver) -> Recipe {
    let (yields, yields_description) = parse_yields(scraped.yields.as_deref().unwrap_or(""));

    Recipe {
        title: scraped.title,
        total_time: scraped.total_time.unwrap_or(0),
        yields,
        yields_description,
        ingredients: scraped
            .ingredients
            .iter()
            .map(|line| parse_ingredient(line, units))
            .collect(),
        steps: scraped
            .instructions
            .iter()
            .map(|line| parse_instruction(line))
            .collect(),
        image: scraped.image,
        host: scraped.host.unwrap_or_default(),
        language: scraped.language,
        notes: None,
        nutrients: scraped.nutrients.as_ref().map(parse_nutrition_label),
    }
}

/// `"4 servings"` -> `(4.0, "servings")`. Text without a leading number
/// yields `0` and keeps the text as the description.
pub fn parse_yields(yields: &str) -> (f64, String) {
    let yields = yields.trim();
    if yields.is_empty() {
        return (0.0, String::new());
    }

    let (amount, rest) = yields.split_once(' ').unwrap_or((yields, ""));
    match amount.parse::<f64>() {
        Ok(amount) => (amount, rest.trim().to_string()),
        Err(_) => (0.0, yields.to_string()),
    }
}

/// Maps schema.org `NutritionInformation` properties onto a [`NutritionLabel`].
pub fn parse_nutrition_label(nutrients: &HashMap<String, String>) -> NutritionLabel {
    let value = |key: &str| {
        nutrients
            .get(key)
            .map(|text| parse_nutrient_value(text))
            .unwrap_or(0.0)
    };

    NutritionLabel {
        calories: value("calories"),
        total_fat: value("fatContent"),
        saturated_fat: value("saturatedFatContent"),
        unsaturated_fat: value("unsaturatedFatContent"),
        trans_fat: value("transFatContent"),
        carbohydrates: value("carbohydrateContent"),
        sugar: value("sugarContent"),
        cholesterol: value("cholesterolContent"),
        sodium: value("sodiumContent"),
        protein: value("proteinContent"),
        fiber: value("fiberContent"),
    }
}

/// Leading number of a label value such as `"423 kcal"`; `0` if there is none.
fn parse_nutrient_value(text: &str) -> f64 {
    text.split_whitespace()
        .next()
        .and_then(|amount| amount.parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitTable;

    struct FixedScraper(Option<ScrapedRecipe>);

    impl RecipeScraper for FixedScraper {
        fn scrape(&self, _html: &str, _url: &str) -> Result<ScrapedRecipe, NormalizeError> {
            self.0.clone().ok_or(NormalizeError::NoRecipeFound)
        }
    }

    fn pork_chops() -> ScrapedRecipe {
        let mut nutrients = HashMap::new();
        nutrients.insert("calories".to_string(), "423".to_string());
        nutrients.insert("fatContent".to_string(), "19 grams".to_string());
        nutrients.insert("sodiumContent".to_string(), "832 milligrams".to_string());
        nutrients.insert("fiberContent".to_string(), "n/a".to_string());

        ScrapedRecipe {
            title: "Pork Chops with Golden Apple Sauce".to_string(),
            total_time: Some(30),
            yields: Some("4 servings".to_string()),
            ingredients: vec![
                "4 boneless pork chops".to_string(),
                "2 teaspoons lemon juice".to_string(),
                "¼ cup water".to_string(),
            ],
            instructions: vec![
                "Cook chops 6 minutes on each side, 12 minutes total".to_string(),
                "Serve".to_string(),
            ],
            image: Some("https://example.com/pork.jpg".to_string()),
            host: Some("foodnetwork.com".to_string()),
            language: Some("en".to_string()),
            nutrients: Some(nutrients),
        }
    }

    #[test]
    fn test_parse_recipe_html() {
        let recipe = parse_recipe_html(
            &FixedScraper(Some(pork_chops())),
            "<html></html>",
            "https://www.foodnetwork.com/recipes/pork",
            UnitTable::standard(),
        )
        .unwrap();

        assert_eq!(recipe.title, "Pork Chops with Golden Apple Sauce");
        assert_eq!(recipe.total_time, 30);
        assert_eq!(recipe.yields, 4.0);
        assert_eq!(recipe.yields_description, "servings");
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[1].raw, "2 teaspoons lemon juice");
        assert_eq!(recipe.ingredients[1].quantity, 2.0);
        assert_eq!(recipe.ingredients[1].unit, "teaspoon");
        assert_eq!(recipe.ingredients[2].raw, "1/4 cup water");
        assert_eq!(recipe.ingredients[2].quantity, 0.25);
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.steps[0].minutes, 18.0);
        assert_eq!(recipe.host, "foodnetwork.com");

        let label = recipe.nutrients.unwrap();
        assert_eq!(label.calories, 423.0);
        assert_eq!(label.total_fat, 19.0);
        assert_eq!(label.sodium, 832.0);
        assert_eq!(label.fiber, 0.0);
        assert_eq!(label.protein, 0.0);
    }

    #[test]
    fn test_scraper_failure_is_propagated() {
        let result = parse_recipe_html(
            &FixedScraper(None),
            "",
            "https://example.com",
            UnitTable::standard(),
        );
        assert!(matches!(result, Err(NormalizeError::NoRecipeFound)));
    }

    #[test]
    fn test_missing_optional_fields() {
        let scraped = ScrapedRecipe {
            title: "Toast".to_string(),
            ..ScrapedRecipe::default()
        };
        let recipe = normalize_recipe(scraped, UnitTable::standard());

        assert_eq!(recipe.total_time, 0);
        assert_eq!(recipe.yields, 0.0);
        assert_eq!(recipe.yields_description, "");
        assert_eq!(recipe.host, "");
        assert!(recipe.nutrients.is_none());
    }

    #[test]
    fn test_parse_yields() {
        assert_eq!(parse_yields("4 servings"), (4.0, "servings".to_string()));
        assert_eq!(parse_yields("12"), (12.0, String::new()));
        assert_eq!(parse_yields("2 large loaves"), (2.0, "large loaves".to_string()));
        assert_eq!(parse_yields(""), (0.0, String::new()));
        assert_eq!(parse_yields("Makes a dozen"), (0.0, "Makes a dozen".to_string()));
    }
}
