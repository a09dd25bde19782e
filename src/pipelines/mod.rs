pub mod backup;
pub mod recipe;

pub use backup::{import_backup, BACKUP_RECIPES_FILE};
pub use recipe::{normalize_recipe, parse_nutrition_label, parse_recipe_html, parse_yields};
