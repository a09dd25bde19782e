use log::{debug, error};
use recipe_normalize::nutrition::{calculate_nutrition, NutrientAggregator, NutritionRequest};
use recipe_normalize::pipelines::BACKUP_RECIPES_FILE;
use recipe_normalize::{
    import_backup, normalizers, parse_recipe_html, unit_table, JsonLdScraper, NormalizerConfig,
    UsdaClient,
};
use serde::Serialize;
use std::env;
use tokio::io::AsyncReadExt;

fn usage() -> String {
    format!(
        "Usage: recipe-normalize <command> [FILE]\n\
         \n\
         Reads FILE (or stdin) and prints JSON.\n\
         \n\
         Commands:\n  \
           ingredients        one ingredient per line\n  \
           instructions       one instruction per line\n  \
           html <URL> [FILE]  recipe page saved from URL\n  \
           backup [FILE]      {BACKUP_RECIPES_FILE} from an app backup\n  \
           nutrition [FILE]   JSON array of {{\"id\", \"quantity\", \"unit\"}}"
    )
}

async fn read_input(path: Option<&String>) -> Result<String, Box<dyn std::error::Error>> {
    let text = match path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };
    Ok(text)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or_else(usage)?;

    let config = NormalizerConfig::load()?;
    debug!("{:#?}", config);
    let units = unit_table(&config);

    match command.as_str() {
        "ingredients" => {
            let text = read_input(args.get(2)).await?;
            print_json(&normalizers::parse_ingredients(&text, &units))
        }
        "instructions" => {
            let text = read_input(args.get(2)).await?;
            print_json(&normalizers::parse_instructions(&text))
        }
        "html" => {
            let url = args.get(2).ok_or_else(usage)?;
            let html = read_input(args.get(3)).await?;
            let recipe = parse_recipe_html(&JsonLdScraper, &html, url, &units)?;
            print_json(&recipe)
        }
        "backup" => {
            let json = read_input(args.get(2)).await?;
            print_json(&import_backup(&json, &units)?)
        }
        "nutrition" => {
            let json = read_input(args.get(2)).await?;
            let requests: Vec<NutritionRequest> = serde_json::from_str(&json)?;
            let client = UsdaClient::new(&config.usda)?;
            let aggregator = NutrientAggregator::from_config(&config.nutrients);

            match calculate_nutrition(&client, &requests, &aggregator).await {
                Ok(summary) => print_json(&summary),
                Err(e) => {
                    error!("Could not calculate nutrition: {}", e);
                    Err(e.into())
                }
            }
        }
        other => {
            error!("Unknown command '{}'", other);
            Err(usage().into())
        }
    }
}
