use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use upstream::RecipeDetail;

use crate::{
    error::AppError,
    favorites::{FavoritesRecord, RecipeId},
    recipes::{AggregatedRecipe, aggregate},
    state::AppState,
    utils::{display_id, parse_recipe_id, query_from, required},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/recipes", get(recipes_handler))
        .route("/getRecipeById", get(recipe_by_id_handler))
        // paths the frontend reaches through its /api/flask proxy
        .route("/api/flask/recipes", get(recipes_handler))
        .route("/api/flask/getRecipeById", get(recipe_by_id_handler))
        .route("/translateText", get(translate_handler))
        .route("/addFav", post(add_favorite_handler))
        .route("/getFavs", get(list_favorites_handler))
        .route("/removeFav", delete(remove_favorite_handler))
        .layer(cors)
        .with_state(state)
}

#[derive(Deserialize)]
pub struct RecipesQuery {
    ingredients: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeByIdQuery {
    recipe_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateQuery {
    text: Option<String>,
    target_language: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePayload {
    user_id: Option<Value>,
    recipe_id: Option<RecipeId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translated {
    translated_text: String,
}

#[derive(Serialize)]
pub struct FavoriteAck {
    message: &'static str,
    id: String,
}

async fn health_handler() -> &'static str {
    "OK"
}

pub async fn recipes_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecipesQuery>, QueryRejection>,
) -> Result<Json<Vec<AggregatedRecipe>>, AppError> {
    let query = query_from(query)?;

    let recipes = aggregate(
        state.recipes.as_ref(),
        query.ingredients.as_deref(),
        state.config.detail_concurrency,
    )
    .await?;

    Ok(Json(recipes))
}

pub async fn recipe_by_id_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RecipeByIdQuery>, QueryRejection>,
) -> Result<Json<RecipeDetail>, AppError> {
    let query = query_from(query)?;
    let recipe_id = parse_recipe_id(&required(query.recipe_id, "recipeId")?)?;

    Ok(Json(state.recipes.recipe_detail(recipe_id).await?))
}

pub async fn translate_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TranslateQuery>, QueryRejection>,
) -> Result<Json<Translated>, AppError> {
    let query = query_from(query)?;
    let text = required(query.text, "text")?;
    let target_language = required(query.target_language, "targetLanguage")?;

    let translated_text = state.translator.translate(&text, &target_language).await?;

    Ok(Json(Translated { translated_text }))
}

fn favorite_from(
    payload: Result<Json<FavoritePayload>, JsonRejection>,
) -> Result<(String, RecipeId), AppError> {
    let Json(payload) = payload.map_err(|_| AppError::MalformedPayload)?;

    Ok((
        display_id(&required(payload.user_id, "userId")?),
        required(payload.recipe_id, "recipeId")?,
    ))
}

pub async fn add_favorite_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FavoritePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, recipe_id) = favorite_from(payload)?;

    state.favorites.add_favorite(&user_id, &recipe_id).await?;
    info!("Added favorite {recipe_id} for {user_id}");

    let ack = FavoriteAck {
        message: "Favorite added",
        id: display_id(&recipe_id),
    };

    Ok((StatusCode::CREATED, Json(ack)))
}

pub async fn remove_favorite_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FavoritePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, recipe_id) = favorite_from(payload)?;

    state.favorites.remove_favorite(&user_id, &recipe_id).await?;
    info!("Removed favorite {recipe_id} for {user_id}");

    let ack = FavoriteAck {
        message: "Favorite removed",
        id: display_id(&recipe_id),
    };

    Ok((StatusCode::CREATED, Json(ack)))
}

pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<FavoritesRecord>>, AppError> {
    let query = query_from(query)?;
    let user_id = required(query.user_id, "userId")?;

    Ok(Json(state.favorites.list_favorites(&user_id).await?))
}
