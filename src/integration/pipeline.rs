//! TrackerPipeline for combining detection with tracking.

use crate::tracker::{Detection, FlowTracker, TrackerConfig};

use super::DetectionSource;

/// Bundles a [`DetectionSource`] with a [`FlowTracker`].
///
/// The caller owns frame sampling and calls [`process_frame`](Self::process_frame)
/// once per sampled frame, in order.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: FlowTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Self {
        Self {
            detector,
            tracker: FlowTracker::new(config),
        }
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, TrackerConfig::default())
    }

    /// Detect objects on one frame and annotate them with tracking data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `timestamp` - Frame timestamp, recorded on tracks created by this frame
    ///
    /// Detector failures are returned without touching the tracker state.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        timestamp: i64,
    ) -> Result<Vec<Detection>, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.tracker.update(detections, timestamp))
    }

    /// Forget all tracks, e.g. when switching to a new video or camera session.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &FlowTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut FlowTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays one scripted frame per call; an empty script means a failed request.
    struct ScriptedDetector {
        frames: Vec<Vec<Detection>>,
    }

    impl DetectionSource for ScriptedDetector {
        type Error = String;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            if self.frames.is_empty() {
                return Err("no frame".to_string());
            }
            Ok(self.frames.remove(0))
        }
    }

    #[test]
    fn test_tracker_pipeline() {
        let detector = ScriptedDetector {
            frames: vec![
                vec![Detection::vehicle("car", [400.0, 400.0, 500.0, 500.0])],
                vec![Detection::vehicle("car", [430.0, 400.0, 530.0, 500.0])],
            ],
        };

        let mut pipeline = TrackerPipeline::with_default_config(detector);
        let first = pipeline.process_frame(&[], 640, 480, 0).unwrap();
        assert_eq!(first[0].track_id, Some(1));

        let second = pipeline.process_frame(&[], 640, 480, 40).unwrap();
        assert_eq!(second[0].track_id, Some(1));
        assert_eq!(second[0].estimated_speed, Some(45.0));

        assert!(pipeline.process_frame(&[], 640, 480, 80).is_err());
        assert_eq!(pipeline.tracker().track_count(), 1);

        pipeline.reset();
        assert_eq!(pipeline.tracker().track_count(), 0);
    }
}
