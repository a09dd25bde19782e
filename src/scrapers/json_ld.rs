use super::{RecipeScraper, ScrapedRecipe};
use crate::error::NormalizeError;
use html_escape::decode_html_entities;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

static JSON_LD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[type='application/ld+json']").unwrap());

static HTML_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("html").unwrap());

static ISO_DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(?P<days>\d+(?:-\d+)?)D)?(?:T(?:(?P<hours>\d+(?:-\d+)?)H)?(?:(?P<minutes>\d+(?:-\d+)?)M)?(?:(?P<seconds>\d+(?:\.\d+)?)S)?)?$")
        .unwrap()
});

/// Reads the schema.org `Recipe` object embedded as JSON-LD in a page.
pub struct JsonLdScraper;

impl RecipeScraper for JsonLdScraper {
    fn scrape(&self, html: &str, url: &str) -> Result<ScrapedRecipe, NormalizeError> {
        debug!("JsonLdScraper: Starting scrape for URL: {}", url);
        let document = Html::parse_document(html);

        let scripts: Vec<_> = document.select(&JSON_LD_SELECTOR).collect();
        debug!("JsonLdScraper: Found {} JSON-LD script tags", scripts.len());

        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.inner_html();

            let json_ld = match parse_json_ld(&raw_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdScraper: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(recipe_json) = find_recipe(&json_ld) else {
                debug!("JsonLdScraper: No recipe found in JSON-LD {}", index);
                continue;
            };

            match serde_json::from_value::<JsonLdRecipe>(recipe_json.clone()) {
                Ok(recipe) => {
                    debug!("JsonLdScraper: Converted JSON-LD {} to a recipe", index);
                    let page_language = document
                        .select(&HTML_SELECTOR)
                        .next()
                        .and_then(|html| html.value().attr("lang"))
                        .map(str::to_string);
                    return Ok(convert_to_scraped(recipe, url, page_language));
                }
                Err(e) => {
                    debug!("JsonLdScraper: Failed to convert JSON-LD {}: {}", index, e);
                }
            }
        }

        debug!("JsonLdScraper: No valid recipe found in any JSON-LD script");
        Err(NormalizeError::NoRecipeFound)
    }
}

fn convert_to_scraped(
    recipe: JsonLdRecipe,
    url: &str,
    page_language: Option<String>,
) -> ScrapedRecipe {
    let total_time = recipe
        .total_time
        .as_deref()
        .and_then(iso_duration_minutes)
        .or_else(|| {
            let prep = recipe.prep_time.as_deref().and_then(iso_duration_minutes);
            let cook = recipe.cook_time.as_deref().and_then(iso_duration_minutes);
            match (prep, cook) {
                (None, None) => None,
                (prep, cook) => Some(prep.unwrap_or(0) + cook.unwrap_or(0)),
            }
        });

    let yields = recipe.recipe_yield.and_then(|yield_val| {
        let text = match yield_val {
            RecipeYield::String(s) => s,
            RecipeYield::Number(n) => n.to_string(),
            // prefer the descriptive entry ("4 servings") over the bare number
            RecipeYield::Array(arr) => arr
                .iter()
                .find(|s| s.contains(char::is_alphabetic))
                .or_else(|| arr.first())
                .cloned()
                .unwrap_or_default(),
        };
        let text = decode_html_symbols(text.trim());
        (!text.is_empty()).then_some(text)
    });

    let image = recipe.image.and_then(|img| match img {
        ImageType::String(i) => Some(decode_html_symbols(&i)),
        ImageType::MultipleStrings(imgs) => imgs.first().map(|i| decode_html_symbols(i)),
        ImageType::Object(i) => Some(i.url),
        ImageType::MultipleObjects(imgs) => imgs.into_iter().next().map(|i| i.url),
        ImageType::None => None,
    });

    let ingredients = recipe
        .recipe_ingredient
        .unwrap_or_default()
        .into_iter()
        .map(|ing| decode_html_symbols(&ing))
        .filter(|ing| !ing.trim().is_empty())
        .collect();

    let instructions = recipe
        .recipe_instructions
        .map(instruction_lines)
        .unwrap_or_default()
        .into_iter()
        .map(|step| decode_html_symbols(step.trim()))
        .filter(|step| !step.is_empty())
        .collect();

    let nutrients = recipe.nutrition.map(|nutrition| {
        nutrition
            .into_iter()
            .filter(|(key, _)| !key.starts_with('@'))
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                _ => None,
            })
            .collect::<HashMap<String, String>>()
    });

    ScrapedRecipe {
        title: decode_html_symbols(&recipe.name),
        total_time,
        yields,
        ingredients,
        instructions,
        image,
        host: host_of(url),
        language: recipe.in_language.or(page_language),
        nutrients,
    }
}

fn instruction_lines(instructions: RecipeInstructions) -> Vec<String> {
    match instructions {
        RecipeInstructions::String(text) => text.lines().map(str::to_string).collect(),
        RecipeInstructions::Multiple(steps) => steps,
        RecipeInstructions::MultipleObject(steps) => steps.into_iter().map(|s| s.text).collect(),
        RecipeInstructions::HowTo(items) => items.into_iter().flat_map(howto_lines).collect(),
        RecipeInstructions::NestedSections(sections) => sections
            .into_iter()
            .flatten()
            .flat_map(howto_lines)
            .collect(),
    }
}

fn howto_lines(item: HowTo) -> Vec<String> {
    match item {
        HowTo::HowToStep(step) => step_text(step).into_iter().collect(),
        HowTo::HowToSection(section) => section
            .item_list_element
            .into_iter()
            .filter_map(step_text)
            .collect(),
    }
}

fn step_text(step: HowToStep) -> Option<String> {
    // Prefer text over name
    step.text.or(step.name).or(step.description)
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        items.iter().find(|item| is_recipe_type(item))
    } else if is_recipe_type(json_ld) {
        Some(json_ld)
    } else {
        json_ld
            .get("@graph")
            .and_then(Value::as_array)
            .and_then(|items| items.iter().find(|item| is_recipe_type(item)))
    }
}

/// Parses a JSON-LD block, retrying on a cleaned-up copy when the page
/// serves slightly broken JSON.
fn parse_json_ld(raw_json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw_json).or_else(|e| {
        debug!("JsonLdScraper: Retrying malformed JSON-LD after cleanup: {}", e);
        serde_json::from_str(&sanitize_json(raw_json))
    })
}

/// Escapes raw control characters inside strings, adds commas missing between
/// values and drops stray or trailing ones.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json_str.chars() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    cleaned.push(c);
                }
                '\\' => {
                    escaped = true;
                    cleaned.push(c);
                }
                '"' => {
                    in_string = false;
                    cleaned.push(c);
                }
                '\n' => cleaned.push_str("\\n"),
                '\r' => cleaned.push_str("\\r"),
                '\t' => cleaned.push_str("\\t"),
                c if c.is_control() => cleaned.push_str(&format!("\\u{:04x}", c as u32)),
                _ => cleaned.push(c),
            }
            continue;
        }

        match c {
            '"' | '[' | '{' => {
                // a value right after a closed one means the separator is missing
                if matches!(cleaned.chars().last(), Some('"' | ']' | '}')) {
                    debug!("Adding missing comma in JSON-LD");
                    cleaned.push(',');
                }
                in_string = c == '"';
                cleaned.push(c);
            }
            ']' | '}' | ':' => {
                if cleaned.ends_with(',') {
                    cleaned.pop();
                }
                cleaned.push(c);
            }
            ',' => {
                if !cleaned.ends_with(',') {
                    cleaned.push(c);
                }
            }
            c if c.is_whitespace() => {}
            _ => cleaned.push(c),
        }
    }

    cleaned
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// ISO 8601 duration (`PT1H30M`, `P1DT2H`, `PT5400.0S`) in whole minutes.
/// Ranges such as `PT15-20M` count as their upper bound.
fn iso_duration_minutes(duration: &str) -> Option<u32> {
    let captures = ISO_DURATION_REGEX.captures(duration.trim())?;
    let part = |name: &str| {
        captures
            .name(name)
            .and_then(|m| m.as_str().rsplit('-').next())
            .and_then(|value| value.parse::<f64>().ok())
    };

    let parts = [
        part("days").map(|d| d * 24.0 * 60.0),
        part("hours").map(|h| h * 60.0),
        part("minutes"),
        part("seconds").map(|s| s / 60.0),
    ];
    if parts.iter().all(Option::is_none) {
        return None;
    }

    let minutes: f64 = parts.iter().flatten().sum();
    Some(minutes.round() as u32)
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient", alias = "ingredients")]
    recipe_ingredient: Option<Vec<String>>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime")]
    total_time: Option<String>,
    #[serde(rename = "inLanguage")]
    in_language: Option<String>,
    nutrition: Option<HashMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    None,
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
struct RecipeInstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<RecipeInstructionObject>),
    HowTo(Vec<HowTo>),
    NestedSections(Vec<Vec<HowTo>>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(f64),
    Array(Vec<String>),
}
