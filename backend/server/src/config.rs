use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};
use upstream::{recipes::DEFAULT_RECIPE_BASE_URL, translate::DEFAULT_TRANSLATE_BASE_URL};

use crate::error::AppError;

pub struct Config {
    pub port: u16,
    pub recipe_key: String,
    pub translate_key: String,
    pub redis_url: String,
    pub recipe_base_url: String,
    pub translate_base_url: String,
    pub detail_concurrency: usize,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", "5000")?,
            recipe_key: read_secret(&lookup, "RECIPE_KEY")?,
            translate_key: read_secret(&lookup, "TRANSLATE_KEY")?,
            redis_url: try_load(&lookup, "REDIS_URL", "redis://127.0.0.1:6379")?,
            recipe_base_url: try_load(&lookup, "RECIPE_BASE_URL", DEFAULT_RECIPE_BASE_URL)?,
            translate_base_url: try_load(
                &lookup,
                "TRANSLATE_BASE_URL",
                DEFAULT_TRANSLATE_BASE_URL,
            )?,
            detail_concurrency: try_load::<usize, _>(&lookup, "DETAIL_CONCURRENCY", "5")?.max(1),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("invalid {key}: {e}"))
        })
}

/// Environment first, then the docker secret file of the same name.
fn read_secret<F>(lookup: &F, secret_name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret) = lookup(secret_name) {
        return Ok(secret.trim().to_string());
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
            AppError::Config(format!("{secret_name} is not set"))
        })
}
