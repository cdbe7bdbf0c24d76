use std::collections::VecDeque;
use std::pin::Pin;

use async_trait::async_trait;
use futures::{stream, Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{GenerateRequest, Generator, TextStream};
use crate::{Result, SurveyError};

const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// Client for a local Ollama server's `/api/generate` endpoint.
pub struct OllamaClient {
    http: Client,
    endpoint: String,
}

impl OllamaClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_OLLAMA_ENDPOINT.to_string()
        } else {
            endpoint.trim().trim_end_matches('/').to_string()
        };

        // No request timeout: long generations stream for minutes.
        let http = Client::builder()
            .build()
            .map_err(|e| SurveyError::Config(format!("Failed to build Ollama HTTP client: {e}")))?;

        Ok(Self { http, endpoint })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.llm.endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }

    async fn send(&self, request: GenerateRequest<'_>, stream: bool) -> Result<reqwest::Response> {
        tracing::debug!(
            model = request.model,
            stream,
            prompt_len = request.prompt.len(),
            "Sending generate request to {}",
            self.endpoint
        );

        let body = OllamaGenerateRequest {
            model: request.model,
            prompt: request.prompt,
            system: request.system,
            stream,
        };

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| SurveyError::Backend(format!("Ollama request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<OllamaErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        Err(SurveyError::Backend(format!(
            "Ollama returned {}: {}",
            status, message
        )))
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<String> {
        let response = self.send(request, false).await?;

        let payload: OllamaGenerateChunk = response
            .json()
            .await
            .map_err(|e| SurveyError::Backend(format!("Failed to parse Ollama response: {e}")))?;

        payload.into_text()
    }

    async fn generate_stream(&self, request: GenerateRequest<'_>) -> Result<TextStream> {
        let response = self.send(request, true).await?;
        Ok(fragment_stream(response.bytes_stream()))
    }
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// One line of a streamed reply, or the whole reply when not streaming.
#[derive(Debug, Deserialize)]
struct OllamaGenerateChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

impl OllamaGenerateChunk {
    /// The generated text. Only the closing `done` object may leave it out.
    fn into_text(self) -> Result<String> {
        if let Some(error) = self.error {
            return Err(SurveyError::Backend(error));
        }
        match self.response {
            Some(text) => Ok(text),
            None if self.done => Ok(String::new()),
            None => Err(SurveyError::Backend(
                "Ollama reply has no response field".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// Splits a byte stream into complete newline-terminated lines.
#[derive(Debug, Default)]
struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            lines.push(self.buf.drain(..=pos).collect());
        }
        lines
    }

    /// Whatever trails the last newline once the body has ended.
    fn finish(&mut self) -> Option<Vec<u8>> {
        if self.buf.iter().all(u8::is_ascii_whitespace) {
            self.buf.clear();
            None
        } else {
            Some(std::mem::take(&mut self.buf))
        }
    }
}

struct FragmentState<S> {
    body: Pin<Box<S>>,
    lines: LineBuffer,
    pending: VecDeque<Result<String>>,
    finished: bool,
}

impl<S> FragmentState<S> {
    fn accept(&mut self, line: &[u8]) {
        if self.finished {
            return;
        }

        let line = match std::str::from_utf8(line) {
            Ok(line) => line.trim(),
            Err(e) => return self.fail(format!("Ollama stream is not UTF-8: {e}")),
        };
        if line.is_empty() {
            return;
        }

        let chunk: OllamaGenerateChunk = match serde_json::from_str(line) {
            Ok(chunk) => chunk,
            Err(e) => return self.fail(format!("Malformed Ollama stream line: {e}")),
        };

        let done = chunk.done;
        match chunk.into_text() {
            Ok(text) if text.is_empty() => {}
            Ok(text) => self.pending.push_back(Ok(text)),
            Err(e) => return self.fail_with(e),
        }
        if done {
            self.finished = true;
        }
    }

    fn fail(&mut self, message: String) {
        self.fail_with(SurveyError::Backend(message));
    }

    fn fail_with(&mut self, error: SurveyError) {
        self.pending.push_back(Err(error));
        self.finished = true;
    }
}

/// Turn an NDJSON response body into a stream of `response` fragments.
fn fragment_stream<S, B, E>(body: S) -> TextStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<SurveyError> + Send + 'static,
{
    let state = FragmentState {
        body: Box::pin(body),
        lines: LineBuffer::default(),
        pending: VecDeque::new(),
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                if item.is_err() {
                    state.pending.clear();
                }
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(bytes)) => {
                    for line in state.lines.push(bytes.as_ref()) {
                        state.accept(&line);
                    }
                }
                Some(Err(e)) => {
                    state.pending.push_back(Err(e.into()));
                    state.finished = true;
                }
                None => {
                    if let Some(line) = state.lines.finish() {
                        state.accept(&line);
                    }
                    state.finished = true;
                }
            }
        }
    }))
}
