//! Page scrapers turn an already-downloaded HTML document into raw recipe strings.

use crate::error::NormalizeError;
use std::collections::HashMap;

mod json_ld;

pub use json_ld::JsonLdScraper;

/// Raw, un-normalized recipe content pulled out of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedRecipe {
    pub title: String,
    /// Total time in minutes
    pub total_time: Option<u32>,
    /// Yield as written, e.g. "4 servings"
    pub yields: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: Option<String>,
    pub host: Option<String>,
    pub language: Option<String>,
    /// Nutrition label entries keyed by schema.org property, e.g. "calories" -> "423 kcal"
    pub nutrients: Option<HashMap<String, String>>,
}

/// Extracts recipe content from an HTML document.
pub trait RecipeScraper: Send + Sync {
    /// `url` is where the page came from; it is used for the host only and never fetched.
    fn scrape(&self, html: &str, url: &str) -> Result<ScrapedRecipe, NormalizeError>;
}
