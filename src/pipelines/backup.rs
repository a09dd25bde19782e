use crate::error::NormalizeError;
use crate::model::Recipe;
use crate::normalizers::{parse_ingredients, parse_instructions};
use crate::units::UnitResolver;
use log::{debug, info};
use serde::Deserialize;

/// File inside a backup archive that lists the recipes.
pub const BACKUP_RECIPES_FILE: &str = "SharpBackup_Recipe.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BackupRecipe {
    title: String,
    #[serde(default)]
    ingredients: String,
    #[serde(default)]
    instructions: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    main_image_path: Option<String>,
}

/// Reads the recipe list of an app backup and normalizes every recipe.
///
/// Ingredients and instructions are stored as newline separated blocks. The
/// image path is passed through as-is.
pub fn import_backup(json: &str, units: &dyn UnitResolver) -> Result<Vec<Recipe>, NormalizeError> {
    let entries: Vec<BackupRecipe> = serde_json::from_str(json)
        .map_err(|e| NormalizeError::InvalidBackup(e.to_string()))?;
    info!("Importing {} recipes from backup", entries.len());

    let recipes = entries
        .into_iter()
        .map(|entry| {
            debug!("Importing backup recipe '{}'", entry.title);
            Recipe {
                ingredients: parse_ingredients(&entry.ingredients, units),
                steps: parse_instructions(&entry.instructions),
                title: entry.title,
                image: entry.main_image_path.filter(|path| !path.is_empty()),
                notes: entry.notes,
                ..Recipe::default()
            }
        })
        .collect();

    Ok(recipes)
}
