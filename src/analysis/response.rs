//! Typed analysis results and the provider response shapes they come from.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A whole reply wrapped in one Markdown code fence, e.g. ```json ... ```.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[\w-]*[ \t]*\n(.*?)\n?```$").unwrap());

/// Outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score_pct: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_suggestions")]
    pub improvement_suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rest_endpoints: Vec<RestEndpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub soap_endpoints: Vec<SoapEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestEndpoint {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapEndpoint {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Suggestions arrive either as a bare list or wrapped in `{"suggestions": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionList {
    Bare(Vec<Suggestion>),
    Wrapped { suggestions: Vec<Suggestion> },
}

/// Scores arrive as integers, floats or numeric strings. They are rounded and
/// clamped to 0..=100; anything else is treated as missing.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).map(|n| n.round().clamp(0.0, 100.0) as u8))
}

fn deserialize_suggestions<'de, D>(deserializer: D) -> Result<Vec<Suggestion>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match SuggestionList::deserialize(deserializer)? {
        SuggestionList::Bare(items) => items,
        SuggestionList::Wrapped { suggestions } => suggestions,
    })
}

impl AnalysisResult {
    /// Interpret model output. A JSON object (optionally inside a ```json
    /// fence) is decoded as a full result; anything else becomes the
    /// description with no score.
    pub fn from_model_text(text: &str) -> Self {
        let trimmed = strip_code_fence(text.trim());
        if let Ok(parsed) = serde_json::from_str::<AnalysisResult>(trimmed) {
            return parsed;
        }
        let description =
            if trimmed.is_empty() { "Analysis completed".to_string() } else { trimmed.to_string() };
        Self {
            description,
            score_pct: None,
            improvement_suggestions: Vec::new(),
            endpoints: Endpoints::default(),
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text,
    }
}

/// Known response envelopes from analysis backends.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// `{"choices": [{"message": {"content": "..."}}]}`
    ChatCompletion { content: String },
    /// `{"content": "..."}` or `{"content": [{"type": "text", "text": "..."}]}`
    Content { content: String },
    /// A bare JSON string.
    Text(String),
    Unrecognized(Value),
}

#[derive(Deserialize)]
struct ChatCompletionBody {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ContentBody {
    content: ContentField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentField {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl ProviderResponse {
    pub fn from_json(value: Value) -> Self {
        if let Value::String(text) = value {
            return ProviderResponse::Text(text);
        }

        if let Ok(body) = serde_json::from_value::<ChatCompletionBody>(value.clone()) {
            if let Some(choice) = body.choices.into_iter().next() {
                return ProviderResponse::ChatCompletion { content: choice.message.content };
            }
        }

        if let Ok(body) = serde_json::from_value::<ContentBody>(value.clone()) {
            let content = match body.content {
                ContentField::Text(text) => text,
                ContentField::Blocks(blocks) => {
                    blocks.into_iter().filter_map(|b| b.text).collect::<Vec<_>>().join("\n")
                }
            };
            return ProviderResponse::Content { content };
        }

        ProviderResponse::Unrecognized(value)
    }

    /// Model text carried by the envelope, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ProviderResponse::ChatCompletion { content } | ProviderResponse::Content { content } => {
                Some(content)
            }
            ProviderResponse::Text(text) => Some(text),
            ProviderResponse::Unrecognized(_) => None,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self.text() {
            Some(text) => AnalysisResult::from_model_text(text),
            None => {
                tracing::warn!("Unrecognized analysis provider response shape");
                AnalysisResult::from_model_text("")
            }
        }
    }
}
