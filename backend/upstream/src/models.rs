use serde::{Deserialize, Serialize};

/// Full recipe document from the detail endpoint. Never reshaped.
pub type RecipeDetail = serde_json::Value;

/// Ordering the search endpoint applies to its hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    MostMissingFirst,
    FewestMissingFirst,
}

impl Ranking {
    pub fn code(self) -> u8 {
        match self {
            Ranking::MostMissingFirst => 1,
            Ranking::FewestMissingFirst => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Comma separated, forwarded as-is.
    pub ingredients: String,
    pub number: u32,
    pub ranking: Ranking,
    pub ignore_pantry: bool,
    pub limit_license: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub missed_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredients: Vec<HitIngredient>,
    #[serde(default)]
    pub used_ingredients: Vec<HitIngredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitIngredient {
    pub id: i64,
    /// Free text phrase as written in the recipe, e.g. "2 cups of flour".
    pub original: String,
}

#[derive(Serialize)]
pub struct TranslateRequest<'a> {
    pub q: &'a str,
    pub target: &'a str,
}

#[derive(Deserialize)]
pub struct TranslateResponse {
    pub data: TranslateData,
}

#[derive(Deserialize)]
pub struct TranslateData {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_from_upstream_json() {
        let raw = r#"{
            "id": 10,
            "title": "Apple Pie",
            "image": "https://img.example/10.jpg",
            "imageType": "jpg",
            "likes": 3,
            "missedIngredientCount": 1,
            "missedIngredients": [{"id": 1, "name": "butter", "original": "1 stick butter"}],
            "usedIngredients": [
                {"id": 2, "name": "apples", "original": "3 apples"},
                {"id": 3, "name": "flour", "original": "2 cups flour"}
            ],
            "unusedIngredients": []
        }"#;

        let hit: SearchHit = serde_json::from_str(raw).unwrap();
        assert_eq!(hit.id, 10);
        assert_eq!(hit.missed_ingredient_count, 1);
        assert_eq!(hit.missed_ingredients[0].original, "1 stick butter");
        assert_eq!(
            hit.used_ingredients.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn test_ranking_codes() {
        assert_eq!(Ranking::MostMissingFirst.code(), 1);
        assert_eq!(Ranking::FewestMissingFirst.code(), 2);
    }
}
