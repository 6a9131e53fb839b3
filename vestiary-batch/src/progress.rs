//! Progress reporting port for front-end integration.
//!
//! Events are purely observational; dropping them never affects batch
//! correctness.

use vestiary_core::DescriptionResult;

/// Events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Grouping finished; processing is about to start.
    BatchStarted {
        /// Distinct groups in this batch.
        total_groups: usize,
    },
    /// A group's service request is being issued.
    GroupStarted {
        /// Identifier of the group.
        group_id: String,
        /// Position in the batch (0-based).
        index: usize,
        /// Distinct groups in this batch.
        total_groups: usize,
    },
    /// A group terminated in exactly one result, described or failed.
    GroupCompleted {
        /// The group's result.
        result: DescriptionResult,
        /// Groups completed so far, including this one.
        completed: usize,
        /// Distinct groups in this batch.
        total_groups: usize,
    },
    /// All groups have been visited.
    BatchFinished {
        /// Groups that received a description.
        described: usize,
        /// Groups that failed.
        failed: usize,
    },
}

impl ProgressEvent {
    /// Fraction of groups already completed, in `[0.0, 1.0]`. Only
    /// completion events carry a fraction.
    pub fn fraction_complete(&self) -> Option<f64> {
        match self {
            ProgressEvent::GroupCompleted { completed, total_groups, .. } if *total_groups > 0 => {
                Some(*completed as f64 / *total_groups as f64)
            }
            _ => None,
        }
    }
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: ProgressEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_event(&self, _event: ProgressEvent) {}
}
