use std::sync::Arc;

use reqwest::Client;
use upstream::{GoogleTranslate, RecipeSource, Spoonacular, Translator};

use super::{
    config::Config,
    error::AppError,
    favorites::{FavoritesStore, RedisFavorites},
};

pub struct AppState {
    pub config: Config,
    pub recipes: Arc<dyn RecipeSource>,
    pub translator: Arc<dyn Translator>,
    pub favorites: Arc<dyn FavoritesStore>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let client = Client::new();

        let recipes = Arc::new(Spoonacular::new(
            client.clone(),
            &config.recipe_base_url,
            &config.recipe_key,
        ));
        let translator = Arc::new(GoogleTranslate::new(
            client,
            &config.translate_base_url,
            &config.translate_key,
        ));
        let favorites = Arc::new(RedisFavorites::connect(&config.redis_url).await?);

        Ok(Self::with_parts(config, recipes, translator, favorites))
    }

    pub fn with_parts(
        config: Config,
        recipes: Arc<dyn RecipeSource>,
        translator: Arc<dyn Translator>,
        favorites: Arc<dyn FavoritesStore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            recipes,
            translator,
            favorites,
        })
    }
}
