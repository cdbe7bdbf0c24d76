//! Configuration module for survey-digest
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{LlmSettings, Settings, TestimonialSettings};
