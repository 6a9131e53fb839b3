//! # vestiary-model
//!
//! Description service adapters for Vestiary.
//!
//! The [`openai`] module talks to OpenAI-style chat completion endpoints
//! with vision input (the official API or any compatible gateway); the
//! [`MockService`] backs batch-level tests without network access. Both
//! implement [`vestiary_core::DescriptionService`].

pub mod mock;
pub mod openai;

pub use mock::MockService;
pub use openai::{OpenAIClient, OpenAIConfig};
