//! Single tracked object, owned by the [`FlowTracker`](crate::FlowTracker).

use std::collections::VecDeque;

use nalgebra::Point2;

use crate::tracker::lane_status::LaneStatus;
use crate::tracker::rect::BoundingBox;

#[derive(Debug, Clone)]
pub(crate) struct Track {
    /// Unique track identifier, never reused within one tracker
    pub id: u64,
    pub object_class: String,
    /// Last matched box
    pub bbox: BoundingBox,
    /// Normalized center of `bbox`
    pub centroid: Point2<f64>,
    /// Most recent centroids, oldest first
    pub history: VecDeque<Point2<f64>>,
    /// Update cycles since the last successful match
    pub missing_frames: u32,
    /// Uncalibrated speed figure, see `kinematics::apply_match`
    pub speed: f64,
    /// Normalized vertical displacement over the last cycle, positive = downward
    pub vertical_velocity: f64,
    pub lane_status: LaneStatus,
    pub created_at: i64,
    pub last_seen: i64,
}

impl Track {
    pub fn new(
        id: u64,
        object_class: String,
        bbox: BoundingBox,
        timestamp: i64,
        coordinate_scale: f64,
        history_len: usize,
    ) -> Self {
        let centroid = bbox.centroid(coordinate_scale);
        let mut history = VecDeque::with_capacity(history_len + 1);
        history.push_back(centroid);
        Self {
            id,
            object_class,
            bbox,
            centroid,
            history,
            missing_frames: 0,
            speed: 0.0,
            vertical_velocity: 0.0,
            lane_status: LaneStatus::Stable,
            created_at: timestamp,
            last_seen: timestamp,
        }
    }

    /// Matched in the current cycle.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.missing_frames == 0
    }

    #[inline]
    pub fn mark_missed(&mut self) {
        self.missing_frames = self.missing_frames.saturating_add(1);
    }

    pub fn push_history(&mut self, centroid: Point2<f64>, history_len: usize) {
        self.history.push_back(centroid);
        while self.history.len() > history_len {
            self.history.pop_front();
        }
    }
}
