use std::io::Write;
use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use crate::config::Settings;
use crate::llm::ollama::OllamaClient;
use crate::{Result, SurveyError};

/// Incremental text fragments of one generation, in reading order.
///
/// Single consumer, forward only. Ends when the backend reports completion.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Text generation request payload.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system: &'a str,
}

#[async_trait]
pub trait Generator: Send + Sync {
    /// Wait for the whole answer.
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<String>;

    /// Start a generation and hand back its fragments as they arrive.
    async fn generate_stream(&self, request: GenerateRequest<'_>) -> Result<TextStream>;
}

/// Build a generation backend from runtime settings.
pub fn build_generator(settings: &Settings) -> Result<Box<dyn Generator>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "ollama" => Ok(Box::new(OllamaClient::from_settings(settings)?)),
        other => Err(SurveyError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: ollama",
            other
        ))),
    }
}

/// Write each fragment to `out` as it arrives and return the full text.
pub async fn write_stream<W: Write>(mut stream: TextStream, out: &mut W) -> Result<String> {
    let mut full = String::new();

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        out.write_all(fragment.as_bytes())?;
        out.flush()?;
        full.push_str(&fragment);
    }

    Ok(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use futures::stream;

    #[test]
    fn unsupported_provider_returns_error() {
        let mut settings = Settings::default();
        settings.llm.provider = "unknown".to_string();

        let err = match build_generator(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn ollama_is_the_default_provider() {
        assert!(build_generator(&Settings::default()).is_ok());
    }

    #[tokio::test]
    async fn write_stream_echoes_and_concatenates() {
        let fragments: TextStream = Box::pin(stream::iter(vec![
            Ok("Readers ".to_string()),
            Ok("love ".to_string()),
            Ok("it.".to_string()),
        ]));
        let mut out = Vec::new();

        let full = write_stream(fragments, &mut out).await.unwrap();

        assert_eq!(full, "Readers love it.");
        assert_eq!(String::from_utf8(out).unwrap(), full);
    }

    #[tokio::test]
    async fn write_stream_stops_at_first_error() {
        let fragments: TextStream = Box::pin(stream::iter(vec![
            Ok("partial".to_string()),
            Err(SurveyError::Backend("connection reset".to_string())),
            Ok("never".to_string()),
        ]));
        let mut out = Vec::new();

        let err = write_stream(fragments, &mut out).await.unwrap_err();

        assert!(matches!(err, SurveyError::Backend(_)));
        assert_eq!(out, b"partial");
    }
}
