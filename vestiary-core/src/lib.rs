//! # vestiary-core
//!
//! Core types and traits for the Vestiary batch clothing describer.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace:
//!
//! - [`UploadedImage`] / [`Group`] - one batch's transient input model
//! - [`DescriptionResult`] / [`Outcome`] - the tagged per-group outcome
//! - [`DescriptionService`] - the boundary to the hosted description service
//! - [`encode`] - PNG normalization and base64 transport encoding
//! - [`VestiaryError`] / [`Result`] - unified error handling
//!
//! A batch run is transient: groups are built fresh per invocation, each
//! group terminates in exactly one [`Outcome`], and nothing is persisted.

pub mod encode;
pub mod error;
pub mod service;
pub mod types;

pub use encode::{MAX_IMAGE_BYTES, PNG_MIME, decode_base64, encode_base64, encode_image};
pub use error::{Result, VestiaryError};
pub use service::{DescribeRequest, DescribeResponse, DescriptionService, UsageMetadata};
pub use types::{DescriptionResult, EncodedImage, Group, Outcome, UploadedImage, filename_stem};
