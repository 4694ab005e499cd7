//! Rule-based violation checks on a single track.
//!
//! Flags are instantaneous: each cycle is judged on its own and nothing is
//! debounced, so one noisy frame can raise or clear a flag.

use crate::tracker::flow_tracker::TrackerConfig;
use crate::tracker::track::Track;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Violations {
    pub speeding: bool,
    pub wrong_way: bool,
}

impl Violations {
    pub fn evaluate(track: &Track, dominant_flow: f64, config: &TrackerConfig) -> Self {
        Self {
            speeding: track.speed > config.speed_limit,
            wrong_way: is_wrong_way(
                track.vertical_velocity,
                dominant_flow,
                config.wrong_way_threshold,
            ),
        }
    }
}

/// Both the flow and the track must move faster than `threshold` before
/// their directions are compared.
fn is_wrong_way(vertical_velocity: f64, dominant_flow: f64, threshold: f64) -> bool {
    if dominant_flow.abs() <= threshold || vertical_velocity.abs() <= threshold {
        return false;
    }
    vertical_velocity.signum() != dominant_flow.signum()
}
