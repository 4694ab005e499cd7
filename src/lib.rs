//! Frame-to-frame vehicle tracking on top of externally supplied detections.
//!
//! [`FlowTracker`] takes the detections of one sampled frame and returns them
//! annotated with a stable track ID, an estimated speed, a lane event and the
//! speeding / wrong-way flags.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{Error, Result};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{BoundingBox, Detection, FlowTracker, LaneStatus, ObjectKind, TrackerConfig};
