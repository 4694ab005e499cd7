use serde::{Deserialize, Serialize};

/// Lane discipline of a tracked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneStatus {
    /// Holding its lane
    #[default]
    Stable,
    /// Lateral displacement above the lane-change threshold
    LaneChange,
    /// Reserved for lateral-convergence detection; never produced by the tracker
    Merging,
}
