use serde::{Deserialize, Serialize};
use std::path::Path;

/// An image handed in by the input boundary for one batch run.
///
/// Owned transiently for the duration of the batch; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    /// Raw upload bytes, exactly as received.
    pub bytes: Vec<u8>,
    /// Original filename.
    pub filename: String,
    /// User-assigned group identifier. May be empty; an empty identifier is
    /// a literal group key, not a request for a fallback.
    pub group_id: String,
}

impl UploadedImage {
    /// Create an upload with the default group identifier: the filename stem.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let group_id = filename_stem(&filename);
        Self { bytes, filename, group_id }
    }

    /// Replace the group identifier, including with an empty string.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }
}

/// The filename without its final extension, used as the default group
/// identifier by the input boundary.
pub fn filename_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One group of images considered to depict the same clothing item.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group identifier, unique within a batch. May be the empty string.
    pub id: String,
    /// Images in upload order.
    pub images: Vec<UploadedImage>,
}

/// A group's transportable image payload: PNG bytes as standard base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// MIME type of the encoded payload.
    pub mime_type: String,
    /// Base64-encoded payload, standard alphabet with padding.
    pub data_base64: String,
}

impl EncodedImage {
    /// RFC 2397 data URI for the wire.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }
}

/// Tagged outcome of one group's description request.
///
/// Downstream code must handle both arms; there is no exception path out of
/// the requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The service produced a description.
    Described(String),
    /// Encoding or the service call failed; holds a human-readable reason.
    Failed(String),
}

impl Outcome {
    /// Display text for either arm. Presentation treats both uniformly.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Described(text) | Outcome::Failed(text) => text.as_str(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// One result per distinct group identifier in the batch, in group
/// processing order. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionResult {
    pub group_id: String,
    pub outcome: Outcome,
}

impl DescriptionResult {
    pub fn described(group_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { group_id: group_id.into(), outcome: Outcome::Described(text.into()) }
    }

    pub fn failed(group_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { group_id: group_id.into(), outcome: Outcome::Failed(reason.into()) }
    }
}
