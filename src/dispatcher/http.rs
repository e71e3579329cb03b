//! HTTP dispatcher for the recipe backend

use super::{Endpoint, RecipeRequest, RequestDispatcher, SearchRequest, TranslateRequest};
use crate::config::FinderConfig;
use crate::error::{ErrorCode, FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Backend answer envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    result: Option<String>,
}

/// JSON-over-HTTP dispatcher; one POST per request, no retries
pub struct HttpDispatcher {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpDispatcher {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                FinderError::dispatch_with_code(
                    ErrorCode::DISPATCH_CLIENT_BUILD,
                    format!("Failed to create HTTP client: {}", e),
                    None,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<B: Serialize + Sync>(&self, endpoint: Endpoint, body: &B) -> Result<String> {
        let url = self.base_url.join(endpoint.path())?;
        debug!(%url, "dispatching {endpoint}");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FinderError::http_status(
                endpoint.path(),
                status.as_u16(),
                error_text,
            ));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            FinderError::dispatch_with_code(
                ErrorCode::DISPATCH_MALFORMED_RESPONSE,
                format!("Failed to parse response: {}", e),
                Some(endpoint.path().to_string()),
            )
            .with_source(e)
        })?;

        api_response.result.ok_or_else(|| {
            FinderError::dispatch_with_code(
                ErrorCode::DISPATCH_MALFORMED_RESPONSE,
                "response has no 'result' field",
                Some(endpoint.path().to_string()),
            )
        })
    }

    fn transport_error(&self, endpoint: Endpoint, err: reqwest::Error) -> FinderError {
        if err.is_timeout() {
            return FinderError::timeout(endpoint.path(), self.timeout);
        }
        FinderError::dispatch_with_code(
            ErrorCode::DISPATCH_TRANSPORT,
            format!("Request failed: {}", err),
            Some(endpoint.path().to_string()),
        )
        .with_source(err)
    }
}

#[async_trait]
impl RequestDispatcher for HttpDispatcher {
    async fn translate(&self, request: &TranslateRequest) -> Result<String> {
        self.post(Endpoint::Translate, request).await
    }

    async fn search_recipes(&self, request: &SearchRequest) -> Result<String> {
        self.post(Endpoint::SearchRecipes, request).await
    }

    async fn give_recipe(&self, request: &RecipeRequest) -> Result<String> {
        self.post(Endpoint::GiveRecipe, request).await
    }

    async fn drink_recommendations(&self, request: &RecipeRequest) -> Result<String> {
        self.post(Endpoint::DrinkRecommendations, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = FinderConfig {
            api_url: "::not a url::".to_string(),
            ..Default::default()
        };
        let err = HttpDispatcher::new(&config).err().unwrap();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_URL);
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = FinderConfig {
            api_url: "http://localhost:8000/v1".to_string(),
            ..Default::default()
        };
        let dispatcher = HttpDispatcher::new(&config).unwrap();
        assert_eq!(
            dispatcher
                .base_url()
                .join(Endpoint::GiveRecipe.path())
                .unwrap()
                .as_str(),
            "http://localhost:8000/v1/give-recipe"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // port 9 (discard) on localhost is closed in practice
        let config = FinderConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let dispatcher = HttpDispatcher::new(&config).unwrap();
        let err = dispatcher
            .translate(&TranslateRequest {
                language: "en".to_string(),
                text: "hola".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FinderError::Dispatch { .. } | FinderError::Timeout { .. }
        ));
    }
}
