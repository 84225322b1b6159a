use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::UpstreamError,
    models::{TranslateRequest, TranslateResponse},
    remote::fetch_json,
};

pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";

const TRANSLATE_ENDPOINT: &str = "translate";

#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns `text` translated into `target_language`.
    ///
    /// Neither argument is validated, empty strings go to the provider untouched.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, UpstreamError>;
}

pub struct GoogleTranslate {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleTranslate {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, UpstreamError> {
        let request = self
            .client
            .post(format!("{}/language/translate/v2", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&TranslateRequest {
                q: text,
                target: target_language,
            });

        let response: TranslateResponse = fetch_json(request, TRANSLATE_ENDPOINT).await?;

        response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(UpstreamError::EmptyTranslation(TRANSLATE_ENDPOINT))
    }
}
