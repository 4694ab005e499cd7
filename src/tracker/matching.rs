//! Matching utilities for frame-to-frame tracking.

use ndarray::Array2;

use crate::tracker::rect::{BoundingBox, iou_batch};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// `(track index, detection index)` pairs in track order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedy, track-major assignment on an IoU matrix of shape (tracks, detections).
///
/// Rows are visited in order. Each row takes the still-unassigned column with
/// the highest IoU, provided it is strictly above `thresh`; ties go to the
/// lowest column index. Earlier rows win contested columns, so the result is
/// not a globally optimal assignment.
pub fn greedy_assignment(ious: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = ious.dim();

    let mut matches = vec![];
    let mut unmatched_tracks = vec![];
    let mut taken = vec![false; num_cols];

    for row in 0..num_rows {
        let mut best: Option<(usize, f32)> = None;
        for col in 0..num_cols {
            if taken[col] {
                continue;
            }
            let score = ious[[row, col]];
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }

        match best {
            Some((col, score)) if score > thresh => {
                taken[col] = true;
                matches.push((row, col));
            }
            _ => unmatched_tracks.push(row),
        }
    }

    let unmatched_detections = taken
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| if t { None } else { Some(i) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

/// Match detection boxes against track boxes using greedy IoU maximization.
pub fn match_boxes(
    track_boxes: &[BoundingBox],
    det_boxes: &[BoundingBox],
    thresh: f32,
) -> AssignmentResult {
    greedy_assignment(&iou_batch(track_boxes, det_boxes), thresh)
}
