//! # vestiary-batch
//!
//! The batch core of Vestiary: group uploaded clothing photos by
//! identifier, then obtain one description per group from an injected
//! [`vestiary_core::DescriptionService`].
//!
//! Per batch the flow is `group -> (per group: request -> described |
//! failed) -> done`: groups are visited strictly sequentially in
//! first-appearance order, each group makes a single service attempt, and a
//! failing group never halts the batch. Progress is observable through
//! [`ProgressSink`].

pub mod grouper;
pub mod progress;
pub mod requester;

pub use grouper::group_images;
pub use progress::{NullSink, ProgressEvent, ProgressSink};
pub use requester::{DEFAULT_INSTRUCTION, DEFAULT_SYSTEM, DescriptionRequester};
