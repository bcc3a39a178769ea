//! Analysis port: send a prompt plus corpus context to a backend.

pub mod http;
pub mod mock;
pub mod response;

pub use http::HttpAnalysisClient;
pub use mock::{MockAnalysisClient, MockTopic};
pub use response::{AnalysisResult, Endpoints, ProviderResponse, RestEndpoint, SoapEndpoint, Suggestion};

use crate::domain::config::{Config, ProviderKind};
use crate::error::AnalysisError;

pub trait AnalysisClient: Send + Sync {
    fn analyze(&self, prompt_text: &str, context: &str) -> Result<AnalysisResult, AnalysisError>;
}

/// Pick the analysis backend named by the configuration.
pub fn build_client(config: &Config) -> Result<Box<dyn AnalysisClient>, AnalysisError> {
    match config.analysis.provider {
        ProviderKind::Mock => Ok(Box::new(MockAnalysisClient::new())),
        ProviderKind::Http => Ok(Box::new(HttpAnalysisClient::new(&config.analysis)?)),
    }
}
