use crate::{Result, types::EncodedImage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Boundary to the hosted description service.
///
/// Handed to the requester at construction as `Arc<dyn DescriptionService>`;
/// there is no module-level client singleton.
#[async_trait]
pub trait DescriptionService: Send + Sync {
    fn name(&self) -> &str;
    async fn describe(&self, req: DescribeRequest) -> Result<DescribeResponse>;
}

/// One multi-image request: all of a group's images together with a single
/// instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeRequest {
    /// Instruction sent with the images.
    pub instruction: String,
    /// Optional system-role framing string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Encoded images, in group order. 1..N per request.
    pub images: Vec<EncodedImage>,
}

impl DescribeRequest {
    pub fn new(instruction: impl Into<String>, images: Vec<EncodedImage>) -> Self {
        Self { instruction: instruction.into(), system: None, images }
    }

    /// Set the system-role framing.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescribeResponse {
    /// Short natural-language description of the group.
    pub description: String,
    /// Token accounting, when the provider reports it.
    pub usage: Option<UsageMetadata>,
}

impl DescribeResponse {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), usage: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub prompt_token_count: i32,
    pub completion_token_count: i32,
    pub total_token_count: i32,
}
