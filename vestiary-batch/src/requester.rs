//! Per-group description requests and sequential batch orchestration.

use crate::grouper::group_images;
use crate::progress::{NullSink, ProgressEvent, ProgressSink};
use std::sync::Arc;
use tracing::{debug, warn};
use vestiary_core::{
    DescribeRequest, DescriptionResult, DescriptionService, EncodedImage, Group, UploadedImage,
    encode_image,
};

/// Instruction sent with every group.
pub const DEFAULT_INSTRUCTION: &str =
    "Describe this clothing item in one or two sentences, using all supplied images together.";

/// System-role framing for the description service.
pub const DEFAULT_SYSTEM: &str = "You are a fashion assistant. Always give short, clear \
     product-style descriptions: color, type of clothing, material/style if visible.";

/// Issues one description request per group and collects tagged results.
///
/// The service is an injected capability; a failing group produces a
/// [`DescriptionResult`] with a failure outcome and the batch keeps going.
/// Groups are visited strictly sequentially, one in-flight request at a
/// time, with a single attempt each.
pub struct DescriptionRequester {
    service: Arc<dyn DescriptionService>,
    instruction: String,
    system: Option<String>,
}

impl DescriptionRequester {
    pub fn new(service: Arc<dyn DescriptionService>) -> Self {
        Self {
            service,
            instruction: DEFAULT_INSTRUCTION.to_string(),
            system: Some(DEFAULT_SYSTEM.to_string()),
        }
    }

    /// Replace the per-group instruction.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Replace or disable the system-role framing.
    pub fn with_system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    /// Produce exactly one result for a group.
    ///
    /// Encoding and service failures become [`vestiary_core::Outcome::Failed`];
    /// they never escape this boundary.
    pub async fn describe_group(&self, group: &Group) -> DescriptionResult {
        match self.request_group(group).await {
            Ok(description) => DescriptionResult::described(&group.id, description),
            Err(e) => {
                warn!(group = %group.id, error = %e, "group description failed");
                DescriptionResult::failed(&group.id, e.to_string())
            }
        }
    }

    async fn request_group(&self, group: &Group) -> vestiary_core::Result<String> {
        let mut images: Vec<EncodedImage> = Vec::with_capacity(group.images.len());
        for image in &group.images {
            images.push(encode_image(&image.bytes)?);
        }

        let mut request = DescribeRequest::new(self.instruction.clone(), images);
        if let Some(system) = &self.system {
            request = request.with_system(system.clone());
        }

        let response = self.service.describe(request).await?;
        Ok(response.description)
    }

    /// Run one full batch: group the uploads, then visit each group in
    /// first-appearance order.
    pub async fn run_batch(&self, images: Vec<UploadedImage>) -> Vec<DescriptionResult> {
        self.run_batch_with_progress(images, &NullSink).await
    }

    /// Like [`run_batch`](Self::run_batch), reporting progress after each
    /// group completes.
    pub async fn run_batch_with_progress(
        &self,
        images: Vec<UploadedImage>,
        sink: &dyn ProgressSink,
    ) -> Vec<DescriptionResult> {
        let groups = group_images(images);
        let total_groups = groups.len();
        sink.on_event(ProgressEvent::BatchStarted { total_groups });

        let mut results = Vec::with_capacity(total_groups);
        for (index, group) in groups.iter().enumerate() {
            sink.on_event(ProgressEvent::GroupStarted {
                group_id: group.id.clone(),
                index,
                total_groups,
            });
            debug!(group = %group.id, images = group.images.len(), "requesting description");

            let result = self.describe_group(group).await;
            results.push(result.clone());
            sink.on_event(ProgressEvent::GroupCompleted {
                result,
                completed: index + 1,
                total_groups,
            });
        }

        let failed = results.iter().filter(|r| r.outcome.is_failed()).count();
        sink.on_event(ProgressEvent::BatchFinished {
            described: results.len() - failed,
            failed,
        });

        results
    }
}
