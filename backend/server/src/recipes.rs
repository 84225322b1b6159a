//! # Recipe Aggregation
//!
//! Turns a pantry ingredient list into render-ready recipes.
//!
//! 1. Search the recipe API by ingredients with a fixed policy (5 results, fewest missing first,
//!    pantry staples counted, display-licensed recipes only)
//! 2. Normalize each hit into a [`RecipeMatch`]
//! 3. Fetch every match's detail concurrently, tagging each call with its position
//! 4. Sort details back into search order and zip them with the matches
//!
//! Any failed detail lookup fails the whole request. No partial results.

use futures::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use tracing::{info, warn};
use upstream::{
    HitIngredient, Ranking, RecipeDetail, RecipeSource, SearchHit, SearchParams, UpstreamError,
};

use crate::error::AppError;

pub const MAX_RESULTS: u32 = 5;
pub const RANKING: Ranking = Ranking::FewestMissingFirst;
pub const IGNORE_PANTRY: bool = false;
pub const LIMIT_LICENSE: bool = true;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch {
    pub id: i64,
    pub recipe_name: String,
    pub image: String,
    pub num_missing_ingredients: u32,
    pub missing_ingredients: Vec<IngredientRef>,
    pub present_ingredients: Vec<IngredientRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecipe {
    pub initial_info: RecipeMatch,
    pub more_info: RecipeDetail,
}

impl From<HitIngredient> for IngredientRef {
    fn from(ingredient: HitIngredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.original,
        }
    }
}

impl From<SearchHit> for RecipeMatch {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            recipe_name: hit.title,
            image: hit.image,
            num_missing_ingredients: hit.missed_ingredient_count,
            missing_ingredients: hit.missed_ingredients.into_iter().map(Into::into).collect(),
            present_ingredients: hit.used_ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

pub fn search_params(ingredients: &str) -> SearchParams {
    SearchParams {
        ingredients: ingredients.to_string(),
        number: MAX_RESULTS,
        ranking: RANKING,
        ignore_pantry: IGNORE_PANTRY,
        limit_license: LIMIT_LICENSE,
    }
}

pub async fn aggregate(
    source: &dyn RecipeSource,
    ingredients: Option<&str>,
    concurrency: usize,
) -> Result<Vec<AggregatedRecipe>, AppError> {
    let ingredients = match ingredients {
        Some(ingredients) if !ingredients.is_empty() => ingredients,
        _ => return Err(AppError::MissingParameter("ingredients")),
    };

    let hits = source
        .search_by_ingredients(&search_params(ingredients))
        .await?;
    let matches = normalize(hits);

    info!("Found {} recipes for [{ingredients}]", matches.len());

    let details = enrich(source, &matches, concurrency).await?;

    Ok(merge(matches, details))
}

pub fn normalize(hits: Vec<SearchHit>) -> Vec<RecipeMatch> {
    hits.into_iter().map(RecipeMatch::from).collect()
}

/// Details come back in the same order as `matches`, whatever order the calls finish in.
pub async fn enrich(
    source: &dyn RecipeSource,
    matches: &[RecipeMatch],
    concurrency: usize,
) -> Result<Vec<RecipeDetail>, UpstreamError> {
    let ids: Vec<(usize, i64)> = matches.iter().map(|recipe| recipe.id).enumerate().collect();

    let mut details: Vec<(usize, RecipeDetail)> = stream::iter(ids)
        .map(|(index, id)| async move {
            source
                .recipe_detail(id)
                .await
                .map(|detail| (index, detail))
                .inspect_err(|e| warn!("Detail lookup for recipe {id} failed: {e}"))
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect()
        .await?;

    details.sort_unstable_by_key(|(index, _)| *index);

    Ok(details.into_iter().map(|(_, detail)| detail).collect())
}

pub fn merge(matches: Vec<RecipeMatch>, details: Vec<RecipeDetail>) -> Vec<AggregatedRecipe> {
    matches
        .into_iter()
        .zip(details)
        .map(|(initial_info, more_info)| AggregatedRecipe {
            initial_info,
            more_info,
        })
        .collect()
}
