use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Default public endpoint for the Google Cloud Translation v2 API
const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Cloud Translation v2 client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Top-level response envelope
#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: GoogleTranslations,
}

#[derive(Debug, Deserialize)]
struct GoogleTranslations {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
struct GoogleTranslation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslate {
    /// Create a new Google Translate client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Decode the HTML entities the v2 API escapes in `translatedText`
    fn decode_html_entities(text: &str) -> String {
        text.replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .query(&[
                ("q", text),
                ("source", source_lang),
                ("target", target_lang),
                ("format", "text"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(0)
                } else if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed = response
            .json::<GoogleResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let translated = parsed
            .data
            .translations
            .first()
            .map(|t| Self::decode_html_entities(&t.translated_text))
            .ok_or_else(|| {
                ProviderError::ParseError("Response contained no translations".to_string())
            })?;

        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        // A one-word translation doubles as an auth and reachability check
        self.translate("ping", "en", "fr").await.map(|_| ())
    }

    fn name(&self) -> &str {
        "google"
    }
}
