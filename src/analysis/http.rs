//! Chat-completion style HTTP backend.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::response::{AnalysisResult, ProviderResponse};
use super::AnalysisClient;
use crate::domain::config::AnalysisConfig;
use crate::error::AnalysisError;

const SYSTEM_PROMPT: &str = "You are an expert software architect reviewing a repository. \
Answer with a JSON object containing description, score_pct, improvement_suggestions and endpoints.";

pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
    model_name: String,
    auth_token: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl HttpAnalysisClient {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        if config.base_url.trim().is_empty() {
            return Err(AnalysisError::NotConfigured("base_url is empty".to_string()));
        }
        let auth_token = std::env::var(&config.auth_token_env_var)
            .ok()
            .filter(|token| !token.is_empty());
        if auth_token.is_none() {
            tracing::warn!(
                "{} is not set; sending analysis requests without a token",
                config.auth_token_env_var
            );
        }

        let client = Client::builder().timeout(Duration::from_secs(config.timeout_s)).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
            auth_token,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn request_body(&self, prompt_text: &str, context: &str) -> Value {
        json!({
            "model": self.model_name,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!("{prompt_text}\n\n{context}")},
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

impl AnalysisClient for HttpAnalysisClient {
    fn analyze(&self, prompt_text: &str, context: &str) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(
            "POST {} (prompt {} chars, context {} chars)",
            self.base_url,
            prompt_text.len(),
            context.len()
        );

        let mut request = self.client.post(&self.base_url).json(&self.request_body(prompt_text, context));
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Status { status: status.as_u16(), body });
        }

        let value: Value = response.json()?;
        Ok(ProviderResponse::from_json(value).into_result())
    }
}
