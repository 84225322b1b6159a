//! # Favorites
//!
//! One set of saved recipe ids per user.
//!
//! ## Redis
//!
//! - Key per user: `favorites:{userId}` holding a Redis set
//! - Members are the JSON text of the recipe id, so `42` and `"42"` stay distinct
//! - `SADD`/`SREM` are atomic, concurrent edits for one user never lose a write
//! - `SADD` creates the set on first add, `SREM` never creates one
//! - Redis drops a set once its last member is removed, listing that user yields nothing
//!
//! ## Memory
//!
//! Same semantics held in-process, backs the router tests.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const FAVORITES_PREFIX: &str = "favorites";

/// Recipe ids arrive as arbitrary JSON from the frontend.
pub type RecipeId = Value;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("stored favorite is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesRecord {
    pub user_id: String,
    pub favorites: Vec<RecipeId>,
}

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Adds `recipe_id` to the user's set, creating the set if needed.
    async fn add_favorite(&self, user_id: &str, recipe_id: &RecipeId) -> Result<(), StoreError>;

    /// Removes `recipe_id` if present. Unknown users and ids are not errors.
    async fn remove_favorite(&self, user_id: &str, recipe_id: &RecipeId)
    -> Result<(), StoreError>;

    /// Zero or one record, never an error for an unknown user.
    async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoritesRecord>, StoreError>;
}

fn favorites_key(user_id: &str) -> String {
    format!("{FAVORITES_PREFIX}:{user_id}")
}

fn to_member(recipe_id: &RecipeId) -> Result<String, StoreError> {
    Ok(serde_json::to_string(recipe_id)?)
}

fn to_record<I>(user_id: &str, members: I) -> Result<Vec<FavoritesRecord>, StoreError>
where
    I: IntoIterator<Item = String>,
{
    let favorites = members
        .into_iter()
        .map(|member| serde_json::from_str(&member))
        .collect::<Result<Vec<RecipeId>, _>>()?;

    if favorites.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![FavoritesRecord {
        user_id: user_id.to_string(),
        favorites,
    }])
}

pub struct RedisFavorites {
    connection: ConnectionManager,
}

impl RedisFavorites {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let config = ConnectionManagerConfig::new().set_number_of_retries(1);

        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager_with_config(config).await?;

        info!("Connected to Redis");

        Ok(Self { connection })
    }
}

#[async_trait]
impl FavoritesStore for RedisFavorites {
    async fn add_favorite(&self, user_id: &str, recipe_id: &RecipeId) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        let added: usize = connection
            .sadd(favorites_key(user_id), to_member(recipe_id)?)
            .await?;

        debug!("Favorite {recipe_id} for {user_id}, newly added: {}", added > 0);

        Ok(())
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        recipe_id: &RecipeId,
    ) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();

        let removed: usize = connection
            .srem(favorites_key(user_id), to_member(recipe_id)?)
            .await?;

        debug!("Favorite {recipe_id} for {user_id}, removed: {}", removed > 0);

        Ok(())
    }

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoritesRecord>, StoreError> {
        let mut connection = self.connection.clone();

        let mut members: Vec<String> = connection.smembers(favorites_key(user_id)).await?;
        members.sort_unstable();

        to_record(user_id, members)
    }
}

#[derive(Default)]
pub struct MemoryFavorites {
    users: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavorites {
    async fn add_favorite(&self, user_id: &str, recipe_id: &RecipeId) -> Result<(), StoreError> {
        let member = to_member(recipe_id)?;

        self.users
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .insert(member);

        Ok(())
    }

    async fn remove_favorite(
        &self,
        user_id: &str,
        recipe_id: &RecipeId,
    ) -> Result<(), StoreError> {
        let member = to_member(recipe_id)?;
        let mut users = self.users.lock().await;

        if let Some(favorites) = users.get_mut(user_id) {
            favorites.remove(&member);

            if favorites.is_empty() {
                users.remove(user_id);
            }
        }

        Ok(())
    }

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoritesRecord>, StoreError> {
        let users = self.users.lock().await;

        match users.get(user_id) {
            Some(favorites) => to_record(user_id, favorites.iter().cloned()),
            None => Ok(Vec::new()),
        }
    }
}
