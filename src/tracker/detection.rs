use serde::{Deserialize, Serialize};

use crate::tracker::lane_status::LaneStatus;
use crate::tracker::rect::BoundingBox;

/// Semantic group of a detected object. Only vehicles are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Vehicle,
    Pedestrian,
    Infrastructure,
    #[default]
    Other,
}

/// One object reported by the vision model for a single frame.
///
/// The tracking fields are left empty by the producer and filled in by
/// [`FlowTracker::update`](crate::FlowTracker::update).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Class label, e.g. "car" or "truck"
    pub object_class: String,
    pub kind: ObjectKind,
    /// Detection confidence score
    #[serde(default)]
    pub confidence: f32,
    /// Box on the 0-1000 scale; detections without one are never tracked
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_event: Option<LaneStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_speeding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_wrong_way: Option<bool>,
}

impl Detection {
    pub fn new(
        object_class: impl Into<String>,
        kind: ObjectKind,
        bbox: Option<BoundingBox>,
        confidence: f32,
    ) -> Self {
        Self {
            object_class: object_class.into(),
            kind,
            confidence,
            bbox,
            ..Default::default()
        }
    }

    /// Shorthand for a vehicle detection with a box in `[y_min, x_min, y_max, x_max]` order.
    pub fn vehicle(object_class: impl Into<String>, yxyx: [f32; 4]) -> Self {
        Self::new(object_class, ObjectKind::Vehicle, Some(yxyx.into()), 1.0)
    }

    /// Box of this detection if it takes part in tracking.
    #[inline]
    pub fn trackable_box(&self) -> Option<BoundingBox> {
        match self.kind {
            ObjectKind::Vehicle => self.bbox,
            _ => None,
        }
    }
}
