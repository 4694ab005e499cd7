use std::collections::HashSet;

use approx::assert_relative_eq;
use flowtrack_rs::{Detection, FlowTracker, LaneStatus, ObjectKind, TrackerConfig};

fn car(yxyx: [f32; 4]) -> Detection {
    Detection::vehicle("car", yxyx)
}

#[test]
fn test_basic_tracking() {
    let mut tracker = FlowTracker::new(TrackerConfig::default());

    // Frame 1: One detection
    let tracks1 = tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);
    assert_eq!(tracks1.len(), 1);
    let id1 = tracks1[0].track_id.unwrap();

    // Frame 2: Same object moved slightly
    let tracks2 = tracker.update(vec![car([410.0, 405.0, 510.0, 505.0])], 40);
    assert_eq!(tracks2[0].track_id, Some(id1));

    // Frame 3: Object disappears
    let tracks3 = tracker.update(vec![], 80);
    assert!(tracks3.is_empty());
    assert_eq!(tracker.active_track_count(), 0);

    // Frame 4: Object reappears close to its last box
    let tracks4 = tracker.update(vec![car([420.0, 405.0, 520.0, 505.0])], 120);
    assert_eq!(tracks4[0].track_id, Some(id1));
    assert_eq!(tracker.active_track_count(), 1);
}

#[test]
fn test_straight_line_speeding() {
    let mut tracker = FlowTracker::default();
    tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);
    let out = tracker.update(vec![car([430.0, 400.0, 530.0, 500.0])], 1);
    assert_eq!(out[0].estimated_speed, Some(45.0));
    assert_eq!(out[0].is_speeding, Some(false));

    let mut tracker = FlowTracker::default();
    tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);
    let out = tracker.update(vec![car([460.0, 400.0, 560.0, 500.0])], 1);
    assert_eq!(out[0].estimated_speed, Some(90.0));
    assert_eq!(out[0].is_speeding, Some(true));
    assert_eq!(out[0].lane_event, Some(LaneStatus::Stable));
}

#[test]
fn test_wrong_way_against_dominant_flow() {
    let mut tracker = FlowTracker::default();
    let column = |i: usize, y: f32| {
        let x = i as f32 * 150.0;
        car([y, x, y + 100.0, x + 100.0])
    };

    tracker.update((0..6).map(|i| column(i, 400.0)).collect(), 0);

    let next: Vec<Detection> = (0..6)
        .map(|i| if i < 5 { column(i, 420.0) } else { column(i, 380.0) })
        .collect();
    let out = tracker.update(next, 1);

    assert_relative_eq!(tracker.dominant_flow(), (5.0 * 0.02 - 0.02) / 6.0, epsilon = 1e-9);
    for (i, det) in out.iter().enumerate() {
        assert_eq!(det.track_id, Some(i as u64 + 1));
        assert_eq!(det.is_wrong_way, Some(i == 5), "detection {i}");
        assert_eq!(det.is_speeding, Some(false));
    }
}

#[test]
fn test_no_wrong_way_without_flow() {
    let mut tracker = FlowTracker::default();
    tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);
    // A lone vehicle defines the flow itself.
    let out = tracker.update(vec![car([380.0, 400.0, 480.0, 500.0])], 1);
    assert_eq!(out[0].is_wrong_way, Some(false));
    assert!(tracker.dominant_flow() < 0.0);
}

#[test]
fn test_lane_change_is_reported() {
    let mut tracker = FlowTracker::default();
    tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);
    let out = tracker.update(vec![car([400.0, 420.0, 500.0, 520.0])], 1);
    assert_eq!(out[0].lane_event, Some(LaneStatus::Stable));
    let out = tracker.update(vec![car([400.0, 445.0, 500.0, 545.0])], 2);
    assert_eq!(out[0].lane_event, Some(LaneStatus::LaneChange));
    assert_eq!(out[0].track_id, Some(1));
}

#[test]
fn test_match_stability_with_competitor() {
    let mut tracker = FlowTracker::default();
    tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);

    // The far detection overlaps a little, the near one overlaps a lot.
    let out = tracker.update(
        vec![
            car([470.0, 400.0, 570.0, 500.0]),
            car([405.0, 400.0, 505.0, 500.0]),
        ],
        1,
    );
    assert_eq!(out[1].track_id, Some(1));
    assert_eq!(out[0].track_id, Some(2));
}

#[test]
fn test_eviction_after_max_missing_frames() {
    let mut tracker = FlowTracker::default();
    tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 0);

    for ts in 1..=50 {
        tracker.update(vec![], ts);
    }
    assert_eq!(tracker.track_count(), 1);
    assert_eq!(tracker.active_track_count(), 0);

    tracker.update(vec![], 51);
    assert_eq!(tracker.track_count(), 0);

    // Same place, new identity.
    let out = tracker.update(vec![car([400.0, 400.0, 500.0, 500.0])], 52);
    assert_eq!(out[0].track_id, Some(2));
}

#[test]
fn test_ids_unique_and_increasing() {
    let mut tracker = FlowTracker::default();
    let mut seen = HashSet::new();
    let mut last_new_id = 0;

    for frame in 0..30i64 {
        // One vehicle drifts down, a second pops up at a new spot every third frame.
        let y = 100.0 + frame as f32 * 5.0;
        let mut dets = vec![car([y, 100.0, y + 100.0, 200.0])];
        if frame % 3 == 0 {
            let x = 300.0 + (frame as f32 * 20.0) % 600.0;
            dets.push(car([600.0, x, 650.0, x + 40.0]));
        }

        let out = tracker.update(dets, frame);
        let mut frame_ids = HashSet::new();
        for det in &out {
            let id = det.track_id.unwrap();
            assert!(frame_ids.insert(id), "duplicate id {id} in frame {frame}");
            if seen.insert(id) {
                assert!(id > last_new_id);
                last_new_id = id;
            }
        }
    }
    assert_eq!(tracker.active_track_count(), 1);
}

#[test]
fn test_reset_restarts_numbering() {
    let mut tracker = FlowTracker::default();
    tracker.update(
        vec![
            car([0.0, 0.0, 100.0, 100.0]),
            car([300.0, 300.0, 400.0, 400.0]),
        ],
        0,
    );
    tracker.reset();
    assert_eq!(tracker.active_track_count(), 0);

    let out = tracker.update(vec![car([300.0, 300.0, 400.0, 400.0])], 1);
    assert_eq!(out[0].track_id, Some(1));
    assert_eq!(out[0].estimated_speed, Some(0.0));
}

#[test]
fn test_mixed_frame_from_json() {
    let json = r#"[
        { "objectClass": "car", "kind": "vehicle", "confidence": 0.9, "box": [400, 400, 500, 500] },
        { "objectClass": "person", "kind": "pedestrian", "confidence": 0.8, "box": [100, 100, 300, 150] },
        { "objectClass": "car", "kind": "vehicle", "confidence": 0.4 }
    ]"#;
    let detections: Vec<Detection> = serde_json::from_str(json).unwrap();

    let mut tracker = FlowTracker::default();
    let out = tracker.update(detections, 0);

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].track_id, Some(1));
    assert_eq!(out[1].kind, ObjectKind::Pedestrian);
    assert!(out[1].track_id.is_none());
    assert!(out[2].track_id.is_none());
    assert_eq!(tracker.track_count(), 1);

    let value = serde_json::to_value(&out[0]).unwrap();
    assert_eq!(value["trackId"], 1);
    assert_eq!(value["isSpeeding"], false);
}
