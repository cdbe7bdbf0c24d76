//! In-memory generator for exercising callers without a backend.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream;

use crate::llm::client::{GenerateRequest, Generator, TextStream};
use crate::Result;

/// A call received by [`MockGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub system: String,
    pub stream: bool,
}

/// Answers `generate` with `"summary <n>"` and streams a fixed reply word by word.
#[derive(Debug)]
pub struct MockGenerator {
    streamed_reply: String,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGenerator {
    pub fn new(streamed_reply: &str) -> Self {
        Self {
            streamed_reply: streamed_reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, request: GenerateRequest<'_>, stream: bool) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            system: request.system.to_string(),
            stream,
        });
        calls.len()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, request: GenerateRequest<'_>) -> Result<String> {
        let n = self.record(request, false);
        Ok(format!("summary {n}"))
    }

    async fn generate_stream(&self, request: GenerateRequest<'_>) -> Result<TextStream> {
        self.record(request, true);
        let fragments: Vec<Result<String>> = self
            .streamed_reply
            .split_inclusive(' ')
            .map(|word| Ok(word.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(fragments)))
    }
}
