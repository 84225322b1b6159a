use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use upstream::{
    GoogleTranslate, Ranking, RecipeSource, SearchParams, Spoonacular, Translator, UpstreamError,
};

type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

fn params(ingredients: &str) -> SearchParams {
    SearchParams {
        ingredients: ingredients.to_string(),
        number: 5,
        ranking: Ranking::FewestMissingFirst,
        ignore_pantry: false,
        limit_license: true,
    }
}

#[tokio::test]
async fn test_search_sends_policy_query() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();

    let router = Router::new().route(
        "/recipes/findByIngredients",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(query);
                Json(json!([{
                    "id": 10,
                    "title": "Apple Crumble",
                    "image": "https://img.example/10.jpg",
                    "missedIngredientCount": 0,
                    "missedIngredients": [],
                    "usedIngredients": [{"id": 9003, "original": "4 apples"}]
                }]))
            }
        }),
    );

    let base_url = serve(router).await;
    let spoonacular = Spoonacular::new(Client::new(), base_url, "secret");

    let hits = spoonacular
        .search_by_ingredients(&params("apples,flour"))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Apple Crumble");
    assert_eq!(hits[0].used_ingredients[0].original, "4 apples");

    let query = captured.lock().unwrap().pop().unwrap();
    assert_eq!(query["apiKey"], "secret");
    assert_eq!(query["ingredients"], "apples,flour");
    assert_eq!(query["number"], "5");
    assert_eq!(query["limitLicense"], "true");
    assert_eq!(query["ranking"], "2");
    assert_eq!(query["ignorePantry"], "false");
}

#[tokio::test]
async fn test_detail_is_passed_through() {
    let captured: Captured = Arc::default();
    let sink = captured.clone();

    let router = Router::new().route(
        "/recipes/{id}/information",
        get(
            move |Path(id): Path<i64>, Query(query): Query<HashMap<String, String>>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(query);
                    Json(json!({"id": id, "title": "Pie", "extendedIngredients": [{"id": 1}]}))
                }
            },
        ),
    );

    let base_url = serve(router).await;
    let spoonacular = Spoonacular::new(Client::new(), format!("{base_url}/"), "secret");

    let detail = spoonacular.recipe_detail(20).await.unwrap();
    assert_eq!(
        detail,
        json!({"id": 20, "title": "Pie", "extendedIngredients": [{"id": 1}]})
    );

    let query = captured.lock().unwrap().pop().unwrap();
    assert_eq!(query["includeNutrition"], "false");
    assert_eq!(query["apiKey"], "secret");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let router = Router::new().route(
        "/recipes/{id}/information",
        get(|| async { (StatusCode::PAYMENT_REQUIRED, "quota exceeded") }),
    );

    let base_url = serve(router).await;
    let spoonacular = Spoonacular::new(Client::new(), base_url, "secret");

    let err = spoonacular.recipe_detail(1).await.unwrap_err();
    assert!(matches!(
        err,
        UpstreamError::Status { status, .. } if status == StatusCode::PAYMENT_REQUIRED
    ));
    assert!(!err.to_string().contains("secret"));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let spoonacular = Spoonacular::new(Client::new(), format!("http://{address}"), "secret");

    let err = spoonacular
        .search_by_ingredients(&params("flour"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Transport { .. }));
    assert!(!err.to_string().contains("secret"));
}

#[tokio::test]
async fn test_translate_hello_to_hola() {
    let captured: Arc<Mutex<Vec<(HashMap<String, String>, Value)>>> = Arc::default();
    let sink = captured.clone();

    let router = Router::new().route(
        "/language/translate/v2",
        post(
            move |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push((query, body));
                    Json(json!({
                        "data": {
                            "translations": [{"translatedText": "hola", "detectedSourceLanguage": "en"}]
                        }
                    }))
                }
            },
        ),
    );

    let base_url = serve(router).await;
    let google = GoogleTranslate::new(Client::new(), base_url, "translate-key");

    let translated = google.translate("hello", "es").await.unwrap();
    assert_eq!(translated, "hola");

    let (query, body) = captured.lock().unwrap().pop().unwrap();
    assert_eq!(query["key"], "translate-key");
    assert_eq!(body, json!({"q": "hello", "target": "es"}));
}

#[tokio::test]
async fn test_translate_without_translations_fails() {
    let router = Router::new().route(
        "/language/translate/v2",
        post(|| async { Json(json!({"data": {"translations": []}})) }),
    );

    let base_url = serve(router).await;
    let google = GoogleTranslate::new(Client::new(), base_url, "translate-key");

    let err = google.translate("", "").await.unwrap_err();
    assert!(matches!(err, UpstreamError::EmptyTranslation(_)));
}
