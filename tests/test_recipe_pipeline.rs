use recipe_normalize::{
    import_backup, parse_recipe_html, JsonLdScraper, NormalizeError, UnitTable,
};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#,
        json_ld
    )
}

#[test]
fn test_page_to_recipe() {
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": "Pork Chops with Golden Apple Sauce",
        "image": {"@type": "ImageObject", "url": "https://example.com/pork.jpg"},
        "totalTime": "PT40M",
        "recipeYield": "4 servings",
        "recipeIngredient": [
            "4 boneless pork chops",
            "2 teaspoons lemon juice",
            "1 ½ cups apple cider",
            "Salt and pepper"
        ],
        "recipeInstructions": [
            {"@type": "HowToStep", "text": "Season the chops and cook 12 minutes."},
            {"@type": "HowToStep", "text": "Simmer the sauce."}
        ],
        "nutrition": {
            "@type": "NutritionInformation",
            "calories": "423 calories",
            "fatContent": "19 grams",
            "saturatedFatContent": "6 grams",
            "carbohydrateContent": "39 grams",
            "proteinContent": "26 grams",
            "cholesterolContent": "83 milligrams",
            "sodiumContent": "832 milligrams"
        }
    }
    "#;
    let html = create_recipe_html(json_ld);

    let recipe = parse_recipe_html(
        &JsonLdScraper,
        &html,
        "https://www.foodnetwork.com/recipes/pork-chops",
        UnitTable::standard(),
    )
    .unwrap();

    assert_eq!(recipe.title, "Pork Chops with Golden Apple Sauce");
    assert_eq!(recipe.total_time, 40);
    assert_eq!(recipe.yields, 4.0);
    assert_eq!(recipe.yields_description, "servings");
    assert_eq!(recipe.image.as_deref(), Some("https://example.com/pork.jpg"));
    assert_eq!(recipe.host, "foodnetwork.com");
    assert_eq!(recipe.language.as_deref(), Some("en"));

    assert_eq!(recipe.ingredients.len(), 4);
    assert_eq!(recipe.ingredients[1].raw, "2 teaspoons lemon juice");
    assert_eq!(recipe.ingredients[1].quantity, 2.0);
    assert_eq!(recipe.ingredients[1].unit, "teaspoon");
    assert_eq!(recipe.ingredients[2].raw, "1 1/2 cups apple cider");
    assert_eq!(recipe.ingredients[2].quantity, 1.5);
    assert_eq!(recipe.ingredients[3].quantity, 0.0);

    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[0].minutes, 12.0);

    let label = recipe.nutrients.as_ref().unwrap();
    assert_eq!(label.calories, 423.0);
    assert_eq!(label.total_fat, 19.0);
    assert_eq!(label.saturated_fat, 6.0);
    assert_eq!(label.carbohydrates, 39.0);
    assert_eq!(label.protein, 26.0);
    assert_eq!(label.cholesterol, 83.0);
    assert_eq!(label.sodium, 832.0);
}

#[test]
fn test_recipe_serializes_with_camel_case_fields() {
    let html = create_recipe_html(
        r#"{"@type": "Recipe", "name": "Tea", "recipeYield": "2 cups",
            "recipeIngredient": ["2 cups water"], "recipeInstructions": "Steep 5 minutes"}"#,
    );
    let recipe =
        parse_recipe_html(&JsonLdScraper, &html, "https://tea.example", UnitTable::standard())
            .unwrap();

    let value = serde_json::to_value(&recipe).unwrap();
    assert_eq!(value["title"], "Tea");
    assert_eq!(value["totalTime"], 0);
    assert_eq!(value["yieldsDescription"], "cups");
    assert_eq!(value["ingredients"][0]["unit"], "cup");
    assert_eq!(value["steps"][0]["minutes"], 5.0);
    assert!(value.get("nutrients").is_none());
}

#[test]
fn test_page_without_recipe() {
    let html = create_recipe_html(r#"{"@type": "WebSite", "name": "Not a recipe"}"#);
    let result = parse_recipe_html(
        &JsonLdScraper,
        &html,
        "https://example.com",
        UnitTable::standard(),
    );
    assert!(matches!(result, Err(NormalizeError::NoRecipeFound)));
}

#[test]
fn test_backup_to_recipes() {
    let backup = r#"[
        {"Title": "Pancakes", "Ingredients": "2 cups flour\n2 eggs\n1 ½ cups milk",
         "Instructions": "Whisk\nRest 30 minutes\nFry", "Notes": null, "MainImagePath": ""},
        {"Title": "Bread", "Ingredients": "500 g flour", "Instructions": "Proof 1 hour 30 minutes",
         "Notes": "Use strong flour", "MainImagePath": "bread.jpg"}
    ]"#;

    let recipes = import_backup(backup, UnitTable::standard()).unwrap();
    assert_eq!(recipes.len(), 2);

    assert_eq!(recipes[0].ingredients[2].raw, "1 1/2 cups milk");
    assert_eq!(recipes[0].ingredients[2].quantity, 1.5);
    assert_eq!(recipes[0].steps[1].minutes, 30.0);
    assert!(recipes[0].image.is_none());
    assert!(recipes[0].notes.is_none());

    assert_eq!(recipes[1].ingredients[0].unit, "gram");
    assert_eq!(recipes[1].steps[0].minutes, 90.0);
    assert_eq!(recipes[1].image.as_deref(), Some("bread.jpg"));
}
