//! Main frame-to-frame tracker.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::tracker::detection::Detection;
use crate::tracker::kinematics;
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::BoundingBox;
use crate::tracker::track::Track;
use crate::tracker::violation::Violations;

/// Configuration for the [`FlowTracker`].
///
/// Every threshold is strict: a value must exceed it to trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum IoU between a track's last box and a detection to match
    pub iou_threshold: f32,
    /// A track is evicted once it has gone unmatched for more cycles than this
    pub max_missing_frames: u32,
    /// Number of centroids kept per track
    pub history_len: usize,
    /// Box coordinate range, boxes span `0..coordinate_scale`
    pub coordinate_scale: f64,
    /// Factor turning box-unit vertical travel per cycle into the speed figure.
    /// Uncalibrated; the result only has meaning relative to `speed_limit`.
    pub speed_scale: f64,
    /// Speed above which a vehicle is flagged as speeding
    pub speed_limit: f64,
    /// Normalized horizontal displacement that counts as a lane change
    pub lane_change_threshold: f64,
    /// How many history entries back the lane check looks
    pub lane_change_lookback: usize,
    /// Minimum |vertical velocity| for a track to count towards the dominant flow
    pub flow_motion_threshold: f64,
    /// Minimum |vertical velocity| of both flow and track for the wrong-way check
    pub wrong_way_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.15,
            max_missing_frames: 50,
            history_len: 10,
            coordinate_scale: 1000.0,
            speed_scale: 1.5,
            speed_limit: 80.0,
            lane_change_threshold: 0.03,
            lane_change_lookback: 4,
            flow_motion_threshold: 0.001,
            wrong_way_threshold: 0.005,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.iou_threshold) {
            return Err(Error::invalid_config("iou_threshold", "must be in [0, 1)"));
        }
        if self.history_len == 0 {
            return Err(Error::invalid_config("history_len", "must be at least 1"));
        }
        if !(self.coordinate_scale.is_finite() && self.coordinate_scale > 0.0) {
            return Err(Error::invalid_config(
                "coordinate_scale",
                "must be finite and positive",
            ));
        }
        let non_negative = [
            ("speed_scale", self.speed_scale),
            ("speed_limit", self.speed_limit),
            ("lane_change_threshold", self.lane_change_threshold),
            ("flow_motion_threshold", self.flow_motion_threshold),
            ("wrong_way_threshold", self.wrong_way_threshold),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::invalid_config(field, "must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

/// Frame-to-frame vehicle tracker.
///
/// Not synchronized: calls to [`update`](Self::update) must be serialized by
/// the caller, and independent streams each need their own instance.
#[derive(Debug, Clone)]
pub struct FlowTracker {
    /// Live tracks in creation order
    tracks: Vec<Track>,
    next_id: u64,
    dominant_flow: f64,
    config: TrackerConfig,
}

impl Default for FlowTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl FlowTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
            dominant_flow: 0.0,
            config,
        }
    }

    /// Like [`new`](Self::new), rejecting configurations that cannot track.
    pub fn try_new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Run one tracking cycle over the detections of a frame.
    ///
    /// Returns the detections in their original order. Vehicles with a box get
    /// a track ID, speed, lane event and violation flags; everything else is
    /// passed through untouched.
    pub fn update(&mut self, mut detections: Vec<Detection>, timestamp: i64) -> Vec<Detection> {
        // Step 1: Age every track, matching resets the counter below
        for track in self.tracks.iter_mut() {
            track.mark_missed();
        }

        // Step 2: Greedy IoU association against live tracks
        let (det_indices, det_boxes): (Vec<usize>, Vec<BoundingBox>) = detections
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.trackable_box().map(|b| (i, b)))
            .unzip();

        let track_boxes: Vec<BoundingBox> = self.tracks.iter().map(|t| t.bbox).collect();
        let AssignmentResult {
            matches,
            unmatched_detections,
            ..
        } = matching::match_boxes(&track_boxes, &det_boxes, self.config.iou_threshold);

        // (detection index, track index)
        let mut assigned = Vec::with_capacity(det_indices.len());

        for &(itrack, idet) in &matches {
            kinematics::apply_match(
                &mut self.tracks[itrack],
                det_boxes[idet],
                timestamp,
                &self.config,
            );
            assigned.push((det_indices[idet], itrack));
        }

        // Step 3: Init new tracks
        for &idet in &unmatched_detections {
            let det_index = det_indices[idet];
            let track = Track::new(
                self.next_track_id(),
                detections[det_index].object_class.clone(),
                det_boxes[idet],
                timestamp,
                self.config.coordinate_scale,
                self.config.history_len,
            );
            debug!(
                track_id = track.id,
                class = %track.object_class,
                timestamp,
                "created track"
            );
            assigned.push((det_index, self.tracks.len()));
            self.tracks.push(track);
        }

        // Step 4: Dominant flow and violations
        self.dominant_flow =
            kinematics::dominant_flow(&self.tracks, self.config.flow_motion_threshold);

        for &(det_index, itrack) in &assigned {
            let track = &self.tracks[itrack];
            let violations = Violations::evaluate(track, self.dominant_flow, &self.config);
            let det = &mut detections[det_index];
            det.track_id = Some(track.id);
            det.estimated_speed = Some(track.speed);
            det.lane_event = Some(track.lane_status);
            det.is_speeding = Some(violations.speeding);
            det.is_wrong_way = Some(violations.wrong_way);
        }

        // Step 5: Evict stale tracks
        let max_missing = self.config.max_missing_frames;
        let before = self.tracks.len();
        self.tracks.retain(|t| {
            let keep = t.missing_frames <= max_missing;
            if !keep {
                debug!(
                    track_id = t.id,
                    missing_frames = t.missing_frames,
                    lifetime = t.last_seen - t.created_at,
                    "evicted track"
                );
            }
            keep
        });

        trace!(
            timestamp,
            matched = matches.len(),
            created = unmatched_detections.len(),
            evicted = before - self.tracks.len(),
            dominant_flow = self.dominant_flow,
            "tracking cycle done"
        );

        detections
    }

    /// Drop all tracks and restart ID numbering from 1.
    ///
    /// Call whenever the stream changes (new video, camera session or batch item).
    pub fn reset(&mut self) {
        debug!(dropped = self.tracks.len(), "tracker reset");
        self.tracks.clear();
        self.next_id = 1;
        self.dominant_flow = 0.0;
    }

    /// Number of tracks matched or created in the last cycle.
    pub fn active_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_fresh()).count()
    }

    /// Number of stored tracks, including ones that are aging.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Dominant vertical flow computed by the last [`update`](Self::update).
    pub fn dominant_flow(&self) -> f64 {
        self.dominant_flow
    }

    fn next_track_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
