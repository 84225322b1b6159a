//! # Upstream
//!
//! Clients for the third-party services the pantry backend fans out to.
//!
//! ## Recipes
//!
//! Spoonacular-compatible recipe API, keyed by an `apiKey` query parameter.
//!
//! - `GET /recipes/findByIngredients`: candidate recipes with missing/used ingredient overlap
//! - `GET /recipes/{id}/information`: full recipe document, passed through untouched
//!
//! ## Translation
//!
//! Google Cloud Translation v2 REST, keyed by a `key` query parameter. Only the first
//! translation of the response is republished.
//!
//! ## Notes
//! - No caching, no retries. A non-2xx response is an error, full stop.
//! - Every client wraps a `reqwest::Client`, so connection pooling is whatever reqwest gives us.
//! - Errors never carry request URLs since those hold the API keys.

pub mod error;
pub mod models;
pub mod recipes;
pub mod remote;
pub mod translate;

pub use error::UpstreamError;
pub use models::{HitIngredient, Ranking, RecipeDetail, SearchHit, SearchParams};
pub use recipes::{RecipeSource, Spoonacular};
pub use translate::{GoogleTranslate, Translator};
