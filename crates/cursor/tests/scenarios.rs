//! Cursor smoothing driven by the event index across a teleport with a
//! cursor_id change at the sample boundary.

use reeltime_cursor::{CursorSmoother, InputEventIndex, SpringParams};
use reeltime_project_model::{CursorId, MouseMoveEvent, MouseMoveSample};

fn mv(t: i64, x: f64, y: f64, cursor: &str) -> MouseMoveEvent {
    MouseMoveEvent {
        sample: MouseMoveSample {
            process_time_ms: t,
            x,
            y,
        },
        cursor_id: CursorId::new(cursor),
    }
}

#[test]
fn index_driven_playback_resets_at_cursor_change() {
    let index = InputEventIndex::from_streams(
        vec![mv(0, 0.0, 0.0, "A"), mv(100, 1000.0, 0.0, "A"), mv(101, 1000.0, 0.0, "B")],
        vec![],
    );

    let first = index.interpolated_at(0).unwrap();
    let mut smoother = CursorSmoother::new(SpringParams::default(), first.x, first.y, first.cursor_id.clone());

    let mut t = 0i64;
    let dt = 0.016;
    while t < 100 {
        let sample = index.interpolated_at(t).unwrap();
        let out = smoother.step(sample.x, sample.y, dt, sample.cursor_id);
        assert!(out.x - 1000.0 < 50.0, "overshoot should stay under 5% of span");
        t += 16;
    }

    let boundary_sample = index.interpolated_at(101).unwrap();
    assert_eq!(boundary_sample.cursor_id, CursorId::new("B"));
    let out = smoother.step(boundary_sample.x, boundary_sample.y, dt, boundary_sample.cursor_id);
    assert_eq!(out.x, 1000.0);
    assert_eq!(out.y, 0.0);
    assert_eq!(smoother.velocity(), (0.0, 0.0));
}
