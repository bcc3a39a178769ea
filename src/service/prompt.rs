//! Prompt execution against the analysis backend, recorded as a `PromptRun`.

use crate::analysis::{AnalysisClient, AnalysisResult};
use crate::domain::Config;
use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: String,
    pub prompt_text: String,
}

impl Prompt {
    pub fn new(title: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self { title: title.into(), prompt_text: prompt_text.into() }
    }
}

/// Record of one prompt execution. The prompt text is snapshotted so the run
/// stays meaningful after the prompt is edited.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRun {
    pub repository: String,
    pub prompt_title: String,
    pub prompt_text_snapshot: String,
    pub request_text: String,
    pub context_bytes: usize,
    /// The parsed result as JSON, as stored for the run.
    pub response_json: Value,
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

pub struct PromptService {
    client: Box<dyn AnalysisClient>,
}

impl PromptService {
    pub fn new(client: Box<dyn AnalysisClient>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self::new(crate::analysis::build_client(config)?))
    }

    /// Send `prompt` with the corpus document (if any) as context.
    pub fn execute_prompt(
        &self,
        repository: &str,
        prompt: &Prompt,
        corpus: Option<&Path>,
    ) -> Result<PromptRun, ServiceError> {
        tracing::info!("Executing prompt '{}' on repository {}", prompt.title, repository);

        let context = match corpus {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| {
                    ServiceError::CorpusUnreadable { path: path.to_path_buf(), source }
                })?;
                format!("Repository: {repository}\n\n{text}")
            }
            None => format!("Repository: {repository}\nNo corpus generated yet"),
        };

        let request_text = prompt.prompt_text.clone();
        let result = self.client.analyze(&request_text, &context).map_err(|e| {
            tracing::error!("Prompt execution failed: {}", e);
            e
        })?;
        tracing::info!("Prompt execution completed: score={:?}", result.score_pct);
        let response_json = serde_json::to_value(&result)?;

        Ok(PromptRun {
            repository: repository.to_string(),
            prompt_title: prompt.title.clone(),
            prompt_text_snapshot: prompt.prompt_text.clone(),
            request_text,
            context_bytes: context.len(),
            response_json,
            result,
            created_at: Utc::now(),
        })
    }
}
