mod detection;
mod flow_tracker;
mod kinematics;
mod lane_status;
mod matching;
mod rect;
mod track;
mod violation;

pub use detection::{Detection, ObjectKind};
pub use flow_tracker::{FlowTracker, TrackerConfig};
pub use lane_status::LaneStatus;
pub use matching::{AssignmentResult, greedy_assignment, match_boxes};
pub use rect::{BoundingBox, iou_batch};
