use axum::extract::{Query, rejection::QueryRejection};
use serde_json::Value;

use crate::{error::AppError, favorites::RecipeId};

pub fn required<T>(value: Option<T>, name: &'static str) -> Result<T, AppError> {
    value.ok_or(AppError::MissingParameter(name))
}

/// Unwraps a query extraction, turning axum's plain-text rejection into an `AppError`.
pub fn query_from<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(query)| query)
        .map_err(|e| AppError::MalformedQuery(e.body_text()))
}

pub fn parse_recipe_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidParameter {
            name: "recipeId",
            value: raw.to_string(),
        })
}

/// Strings are echoed bare, everything else as its JSON text.
pub fn display_id(recipe_id: &RecipeId) -> String {
    match recipe_id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_id() {
        assert_eq!(display_id(&json!("716429")), "716429");
        assert_eq!(display_id(&json!(716429)), "716429");
        assert_eq!(display_id(&json!(true)), "true");
    }

    #[test]
    fn test_parse_recipe_id() {
        assert_eq!(parse_recipe_id("716429").unwrap(), 716429);
        assert_eq!(parse_recipe_id(" 12 ").unwrap(), 12);
        assert!(matches!(
            parse_recipe_id("12/../secret"),
            Err(AppError::InvalidParameter { name: "recipeId", .. })
        ));
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some(3), "x").unwrap(), 3);
        assert!(matches!(
            required::<u8>(None, "userId"),
            Err(AppError::MissingParameter("userId"))
        ));
    }
}
