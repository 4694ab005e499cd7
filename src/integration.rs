//! Seams between the tracker and the surrounding media pipeline.
//!
//! The vision model, frame sampling and rendering live outside this crate.
//! This module provides the traits and helpers to feed their output into a
//! [`FlowTracker`](crate::FlowTracker).

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
