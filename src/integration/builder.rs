//! Builder for creating Detection objects from various input formats.

use crate::tracker::{BoundingBox, Detection, ObjectKind};

/// Builder for creating `Detection` objects from various input formats.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    object_class: String,
    kind: ObjectKind,
    bbox: Option<BoundingBox>,
    confidence: f32,
    scale: f32,
}

impl Default for DetectionBuilder {
    fn default() -> Self {
        Self {
            object_class: String::new(),
            kind: ObjectKind::Other,
            bbox: None,
            confidence: 0.0,
            scale: 1000.0,
        }
    }
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class label, deriving the kind from common label names.
    pub fn class(mut self, object_class: impl Into<String>) -> Self {
        self.object_class = object_class.into();
        self.kind = kind_for_class(&self.object_class);
        self
    }

    /// Override the kind derived from the class label.
    pub fn kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Coordinate scale used by the pixel-space setters (default 1000).
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set an already normalized box in `[y_min, x_min, y_max, x_max]` order.
    pub fn yxyx(mut self, y_min: f32, x_min: f32, y_max: f32, x_max: f32) -> Self {
        self.bbox = Some(BoundingBox::new(y_min, x_min, y_max, x_max));
        self
    }

    /// Set a pixel box in TLBR format (x1, y1, x2, y2) for a frame of the given size.
    pub fn pixel_tlbr(
        mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        self.bbox = Some(BoundingBox::from_pixel_tlbr(
            x1,
            y1,
            x2,
            y2,
            frame_width,
            frame_height,
            self.scale,
        ));
        self
    }

    /// Set a pixel box in XYWH format (center_x, center_y, width, height).
    pub fn pixel_xywh(
        self,
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        self.pixel_tlbr(
            cx - w / 2.0,
            cy - h / 2.0,
            cx + w / 2.0,
            cy + h / 2.0,
            frame_width,
            frame_height,
        )
    }

    /// Set the confidence score.
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection::new(self.object_class, self.kind, self.bbox, self.confidence)
    }
}

fn kind_for_class(object_class: &str) -> ObjectKind {
    match object_class.to_ascii_lowercase().as_str() {
        "car" | "truck" | "bus" | "van" | "motorcycle" | "motorbike" | "bicycle" | "vehicle" => {
            ObjectKind::Vehicle
        }
        "person" | "pedestrian" => ObjectKind::Pedestrian,
        "traffic light" | "traffic sign" | "stop sign" | "pole" | "barrier" => {
            ObjectKind::Infrastructure
        }
        _ => ObjectKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_builder() {
        let det = DetectionBuilder::new()
            .class("Truck")
            .yxyx(100.0, 200.0, 300.0, 400.0)
            .confidence(0.95)
            .build();

        assert_eq!(det.kind, ObjectKind::Vehicle);
        assert_eq!(det.confidence, 0.95);
        assert_eq!(det.bbox, Some(BoundingBox::new(100.0, 200.0, 300.0, 400.0)));
        assert!(det.track_id.is_none());
    }

    #[test]
    fn test_kind_override_and_missing_box() {
        let det = DetectionBuilder::new()
            .class("forklift")
            .kind(ObjectKind::Vehicle)
            .build();
        assert_eq!(det.kind, ObjectKind::Vehicle);
        assert!(det.trackable_box().is_none());

        let det = DetectionBuilder::new().class("person").build();
        assert_eq!(det.kind, ObjectKind::Pedestrian);
    }

    #[test]
    fn test_pixel_xywh() {
        let det = DetectionBuilder::new()
            .class("car")
            .pixel_xywh(100.0, 100.0, 100.0, 100.0, 1000, 1000)
            .build();
        assert_eq!(det.bbox, Some(BoundingBox::new(50.0, 50.0, 150.0, 150.0)));
    }
}
