//! Per-match kinematics: vertical velocity, speed, centroid history and lane status.
//!
//! Speed is a proportional, unit-less figure: normalized vertical travel per
//! update cycle times `coordinate_scale * speed_scale`. It is meant for
//! relative comparison against `speed_limit` and is not a calibrated
//! real-world velocity. No camera geometry or frame interval is involved.

use crate::tracker::flow_tracker::TrackerConfig;
use crate::tracker::lane_status::LaneStatus;
use crate::tracker::rect::BoundingBox;
use crate::tracker::track::Track;

/// Fold a matched box into `track`.
pub(crate) fn apply_match(
    track: &mut Track,
    bbox: BoundingBox,
    timestamp: i64,
    config: &TrackerConfig,
) {
    let new_centroid = bbox.centroid(config.coordinate_scale);

    // Displacement in box units, exact for integer boxes.
    let (_, old_sum_y) = track.bbox.center_sums();
    let (_, new_sum_y) = bbox.center_sums();
    let delta_units = (new_sum_y - old_sum_y) / 2.0;

    track.vertical_velocity = delta_units / config.coordinate_scale;
    track.speed = (delta_units.abs() * config.speed_scale).floor();

    track.push_history(new_centroid, config.history_len);
    if let Some(status) = lane_status(track, new_centroid.x, config) {
        track.lane_status = status;
    }

    track.bbox = bbox;
    track.centroid = new_centroid;
    track.missing_frames = 0;
    track.last_seen = timestamp;
}

/// Compare the current horizontal position with the one up to
/// `lane_change_lookback` entries back in history.
fn lane_status(track: &Track, current_x: f64, config: &TrackerConfig) -> Option<LaneStatus> {
    let len = track.history.len();
    if len < 2 {
        return None;
    }
    let past = track.history[len.saturating_sub(1 + config.lane_change_lookback)];
    if (current_x - past.x).abs() > config.lane_change_threshold {
        Some(LaneStatus::LaneChange)
    } else {
        Some(LaneStatus::Stable)
    }
}

/// Mean vertical velocity over tracks matched this cycle that are visibly moving.
///
/// Returns `0.0` when no track qualifies.
pub(crate) fn dominant_flow<'a>(
    tracks: impl IntoIterator<Item = &'a Track>,
    motion_threshold: f64,
) -> f64 {
    let (sum, count) = tracks
        .into_iter()
        .filter(|t| t.is_fresh() && t.vertical_velocity.abs() > motion_threshold)
        .fold((0.0, 0usize), |(sum, count), t| {
            (sum + t.vertical_velocity, count + 1)
        });

    if count > 0 { sum / count as f64 } else { 0.0 }
}
