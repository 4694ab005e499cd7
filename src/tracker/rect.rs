use nalgebra::Point2;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box as emitted by the vision model.
///
/// Coordinates are stored in `[y_min, x_min, y_max, x_max]` order on a fixed
/// integer-like scale (0-1000 by default), independent of the frame's pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub y_min: f32,
    pub x_min: f32,
    pub y_max: f32,
    pub x_max: f32,
}

impl BoundingBox {
    /// Create a box from `[y_min, x_min, y_max, x_max]` coordinates.
    #[inline]
    pub fn new(y_min: f32, x_min: f32, y_max: f32, x_max: f32) -> Self {
        Self {
            y_min,
            x_min,
            y_max,
            x_max,
        }
    }

    /// Create a box from pixel TLBR coordinates (x1, y1, x2, y2), rescaled so
    /// that the frame spans `0..scale` on both axes.
    pub fn from_pixel_tlbr(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        frame_width: u32,
        frame_height: u32,
        scale: f32,
    ) -> Self {
        let sx = if frame_width > 0 {
            scale / frame_width as f32
        } else {
            0.0
        };
        let sy = if frame_height > 0 {
            scale / frame_height as f32
        } else {
            0.0
        };
        Self::new(y1 * sy, x1 * sx, y2 * sy, x2 * sx)
    }

    #[inline]
    pub fn to_yxyx(&self) -> [f32; 4] {
        [self.y_min, self.x_min, self.y_max, self.x_max]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Area of the box; inverted boxes count as empty.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Center of the box normalized to `0..1` by dividing by `scale`.
    #[inline]
    pub fn centroid(&self, scale: f64) -> Point2<f64> {
        let (sum_x, sum_y) = self.center_sums();
        Point2::new(sum_x / 2.0 / scale, sum_y / 2.0 / scale)
    }

    /// Doubled center coordinates in box units, `(x_min + x_max, y_min + y_max)`.
    ///
    /// Exact for integer coordinates, so displacements between two boxes can be
    /// taken without the rounding that normalized centroids pick up.
    #[inline]
    pub(crate) fn center_sums(&self) -> (f64, f64) {
        (
            self.x_min as f64 + self.x_max as f64,
            self.y_min as f64 + self.y_max as f64,
        )
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Returns exactly `0.0` when the boxes do not overlap or the union is
    /// empty, so degenerate boxes never match anything.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let x1 = self.x_min.max(other.x_min);
        let y1 = self.y_min.max(other.y_min);
        let x2 = self.x_max.min(other.x_max);
        let y2 = self.y_max.min(other.y_max);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;
        if inter_area <= 0.0 {
            return 0.0;
        }

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_yxyx()
    }
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_batch(boxes_a: &[BoundingBox], boxes_b: &[BoundingBox]) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}
