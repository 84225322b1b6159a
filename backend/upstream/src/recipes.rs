use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::UpstreamError,
    models::{RecipeDetail, SearchHit, SearchParams},
    remote::fetch_json,
};

pub const DEFAULT_RECIPE_BASE_URL: &str = "https://api.spoonacular.com";

const SEARCH_ENDPOINT: &str = "findByIngredients";
const DETAIL_ENDPOINT: &str = "recipe information";

#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn search_by_ingredients(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<SearchHit>, UpstreamError>;

    async fn recipe_detail(&self, id: i64) -> Result<RecipeDetail, UpstreamError>;
}

pub struct Spoonacular {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Spoonacular {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl RecipeSource for Spoonacular {
    async fn search_by_ingredients(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<SearchHit>, UpstreamError> {
        let request = self
            .client
            .get(format!("{}/recipes/findByIngredients", self.base_url))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("ingredients", params.ingredients.as_str()),
            ])
            .query(&[
                ("number", params.number.to_string()),
                ("limitLicense", params.limit_license.to_string()),
                ("ranking", params.ranking.code().to_string()),
                ("ignorePantry", params.ignore_pantry.to_string()),
            ]);

        fetch_json(request, SEARCH_ENDPOINT).await
    }

    async fn recipe_detail(&self, id: i64) -> Result<RecipeDetail, UpstreamError> {
        let request = self
            .client
            .get(format!("{}/recipes/{id}/information", self.base_url))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("includeNutrition", "false"),
            ]);

        fetch_json(request, DETAIL_ENDPOINT).await
    }
}
