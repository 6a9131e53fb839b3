//! OpenAI-compatible description service adapter.
//!
//! Works against the official endpoint or any compatible gateway via
//! [`OpenAIConfig::with_base_url`].

mod client;
mod config;
mod convert;

pub use client::OpenAIClient;
pub use config::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, OPENAI_API_BASE, OpenAIConfig,
};
