//! Cross-module scenarios exercised through the public Resolver API:
//! layout resolution at a boundary, and audio drift compensation.

use std::collections::HashMap;
use std::sync::Arc;

use reeltime_cursor::InputEventIndex;
use reeltime_project_model::{LayoutType, NormalizedPoint, Project, RecordingBundle, TrackMeta, VideoMeta};
use reeltime_resolver::{MediaMetadata, Resolver, SimulatedMediaClock};

#[test]
fn layout_resolution_through_resolver_at_a_boundary() {
    let mut project = Project::from_recording(10_000).unwrap();
    let scene = &mut project.scenes[0];
    scene.layouts = vec![
        reeltime_project_model::Layout::new(0, 4_000, LayoutType::ScreenOnly, 0.3, NormalizedPoint::new(0.5, 0.5)).unwrap(),
        reeltime_project_model::Layout::new(4_000, 10_000, LayoutType::SideBySide, 0.3, NormalizedPoint::new(0.5, 0.5)).unwrap(),
    ];
    let scene = Arc::new(project.scenes[0].clone());
    let index = Arc::new(InputEventIndex::from_streams(vec![], vec![]));
    let media = SimulatedMediaClock::new(MediaMetadata {
        fps: 60,
        width: 1920,
        height: 1080,
        duration_ms: 10_000,
    });
    let mut resolver = Resolver::new(scene, index, media, None, 1600.0, 900.0, 16.0 / 9.0);

    let before = resolver.seek(3_999);
    assert_eq!(before.active_layout.layout_type, LayoutType::ScreenOnly);

    let at_boundary = resolver.seek(4_000);
    assert_eq!(at_boundary.active_layout.layout_type, LayoutType::SideBySide);
    let camera = at_boundary.active_layout.camera_rect.unwrap();
    let screen = at_boundary.active_layout.screen_rect.unwrap();
    assert_eq!(screen.w, 796.0);
    assert_eq!(camera.x, 804.0);
}

/// Audio drift is a capability of the stateful Resolver, not disconnected
/// math: loading a bundle with a short mic track must show up on every
/// published `FrameState`, tick after tick.
#[test]
fn audio_drift_reported_per_track_through_resolver_ticks() {
    let project = Project::from_recording(10_000).unwrap();
    let scene = Arc::new(project.scenes[0].clone());
    let index = Arc::new(InputEventIndex::from_streams(vec![], vec![]));
    let media = SimulatedMediaClock::new(MediaMetadata {
        fps: 60,
        width: 1920,
        height: 1080,
        duration_ms: 10_000,
    });
    let bundle = RecordingBundle {
        video: VideoMeta {
            width: 1920,
            height: 1080,
            fps: 60,
            duration_ms: 30_000,
        },
        webcam: None,
        mic_audio: Some(TrackMeta { duration_ms: 29_700 }),
        system_audio: Some(TrackMeta { duration_ms: 30_000 }),
        mouse_moves: vec![],
        mouse_clicks: vec![],
        cursors: HashMap::new(),
    };

    let mut resolver = Resolver::new(scene, index, media, Some(&bundle), 1600.0, 900.0, 16.0 / 9.0);
    assert!(resolver.audio_drift().needs_resync());

    let seeked = resolver.seek(0);
    assert_eq!(seeked.audio_drift.mic_audio_offset_ms, Some(300));
    assert_eq!(seeked.audio_drift.system_audio_offset_ms, Some(0));

    resolver.play();
    resolver.media_mut().advance(16);
    match resolver.tick() {
        reeltime_resolver::TickOutcome::Frame(frame) => {
            assert_eq!(frame.audio_drift.mic_audio_offset_ms, Some(300));
        }
        reeltime_resolver::TickOutcome::EndOfStream => panic!("unexpected end of stream"),
    }
}
