//! LLM module for survey-digest
//!
//! Prompt templates and the text-generation backend (a local Ollama server).

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod ollama;
pub mod prompts;

pub use client::{build_generator, write_stream, GenerateRequest, Generator, TextStream};
pub use ollama::OllamaClient;
