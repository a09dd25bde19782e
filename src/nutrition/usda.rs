use super::lookup::{FoodLookup, FoodMatch};
use crate::config::UsdaConfig;
use crate::error::NormalizeError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// FoodData Central search client.
pub struct UsdaClient {
    client: Client,
    api_key: String,
    base_url: String,
    data_types: Vec<String>,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodMatch>,
}

impl UsdaClient {
    /// Create a new client from configuration
    pub fn new(config: &UsdaConfig) -> Result<Self, NormalizeError> {
        // Try config first, then fall back to environment variable
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var("USDA_KEY")?,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(UsdaClient {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            data_types: config.data_types.clone(),
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl FoodLookup for UsdaClient {
    fn lookup_name(&self) -> &str {
        "usda"
    }

    async fn search(&self, query: &str) -> Result<Option<FoodMatch>, NormalizeError> {
        debug!("Searching FoodData Central for '{}'", query);

        let response = self
            .client
            .post(format!("{}/fdc/v1/foods/search", self.base_url))
            .query(&[("api_key", &self.api_key)])
            .json(&json!({
                "query": query,
                "dataType": self.data_types,
                "pageSize": self.page_size,
                "pageNumber": 1,
                "sortBy": "dataType.keyword",
                "sortOrder": "asc",
                "requireAllWords": "true"
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;

        let food = response.foods.into_iter().next();
        if food.is_none() {
            warn!("FoodData Central has no match for '{}'", query);
        }

        Ok(food)
    }
}
