// src/infrastructure/translator/mod.rs
// Chat-completion backed strategy translator

pub mod dto;
pub mod prompt;

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Client, Method, Request, StatusCode};
use hyper_tls::HttpsConnector;
use std::time::Duration;

use crate::application::dto::parser::parse_ir;
use crate::config::TranslatorConfig;
use crate::domain::catalog::Catalog;
use crate::domain::errors::{AppError, AppResult, TranslationError, TranslationResult};
use crate::domain::model::IntermediateRepresentation;
use crate::domain::repository::StrategyTranslator;
use dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};

pub struct ChatCompletionTranslator {
    client: Client<HttpsConnector<HttpConnector>>,
    config: TranslatorConfig,
    system_prompt: String,
}

impl ChatCompletionTranslator {
    /// The system prompt is rendered once from the catalog and reused.
    pub fn new(config: TranslatorConfig, catalog: &Catalog) -> AppResult<Self> {
        if config.api_key.is_empty() {
            return Err(AppError::Config(
                "Missing LLM_API_KEY environment variable".to_string(),
            ));
        }

        let client = Client::builder().build::<_, Body>(HttpsConnector::new());

        Ok(Self {
            client,
            system_prompt: prompt::system_prompt(catalog),
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn send(&self, text: &str) -> TranslationResult<(StatusCode, Bytes)> {
        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat::json_object(),
        };
        let payload =
            serde_json::to_vec(&payload).map_err(|e| TranslationError::Request(e.to_string()))?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .body(Body::from(payload))
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        log::debug!("POST {} (model {})", self.endpoint(), self.config.model);

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body())
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        Ok((status, body))
    }
}

#[async_trait]
impl StrategyTranslator for ChatCompletionTranslator {
    async fn translate(&self, text: &str) -> TranslationResult<IntermediateRepresentation> {
        let deadline = Duration::from_secs(self.config.timeout_secs);
        let (status, body) = tokio::time::timeout(deadline, self.send(text))
            .await
            .map_err(|_| TranslationError::Timeout(self.config.timeout_secs))??;

        log::debug!("Completion service answered {} ({} bytes)", status, body.len());
        interpret_response(status, &body)
    }
}

/// Map a completion-service reply to IR or to the matching failure.
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> TranslationResult<IntermediateRepresentation> {
    if !status.is_success() {
        return Err(TranslationError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let response: ChatCompletionResponse = serde_json::from_slice(body)
        .map_err(|e| TranslationError::Parse(format!("invalid completion payload: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(TranslationError::EmptyChoices)?;

    let content = choice
        .message
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or(TranslationError::EmptyContent)?;

    parse_ir(&content).map_err(|e| TranslationError::Parse(e.to_string()))
}
