//! The Playback Clock & Resolver: the only stateful orchestrator in the
//! engine. Drives a [`MediaClock`], maps its reported source time through
//! the active scene's slices and layouts, advances the [`CursorSmoother`],
//! and publishes a [`FrameState`] each tick.

use std::sync::Arc;

use reeltime_common::clock::TickClock;
use reeltime_common::config::CLICK_FADE_MS;
use reeltime_cursor::{CursorSmoother, InputEventIndex, SmoothedPoint, SpringParams};
use reeltime_project_model::{LayoutType, RecordingBundle, Scene};
use reeltime_timeline::{output_to_source, source_to_output, total_output_duration};
use tracing::{debug, warn};

use crate::audio::AudioDrift;
use crate::frame_state::{FrameState, TickOutcome};
use crate::layout_resolve::{find_layout_at, resolve_layout_rects, LayoutRenderInfo};
use crate::media_clock::MediaClock;

/// Stateful playback orchestrator for one scene. Generic over the
/// concrete [`MediaClock`] implementation the host application embeds.
pub struct Resolver<M: MediaClock> {
    scene: Arc<Scene>,
    index: Arc<InputEventIndex>,
    media: M,
    slice_index: usize,
    smoother: CursorSmoother,
    tick_clock: TickClock,
    viewport_w: f64,
    viewport_h: f64,
    camera_aspect_ratio: f64,
    audio_drift: AudioDrift,
}

impl<M: MediaClock> Resolver<M> {
    /// Construct a Resolver positioned at source time 0 of the scene's
    /// first slice, with the Cursor Smoother initialized to that time's raw
    /// sample. `bundle` supplies each audio track's duration so `Δ_audio`
    /// can be reported per tick; pass `None` when no bundle is loaded (the
    /// Resolver then reports no audio drift at all).
    pub fn new(
        scene: Arc<Scene>,
        index: Arc<InputEventIndex>,
        media: M,
        bundle: Option<&RecordingBundle>,
        viewport_w: f64,
        viewport_h: f64,
        camera_aspect_ratio: f64,
    ) -> Self {
        let start_source = scene.screen_slices.first().map(|s| s.source_start_ms).unwrap_or(0);
        let (smoother_x, smoother_y, cursor_id) = match index.interpolated_at(start_source) {
            Some(sample) => (sample.x, sample.y, sample.cursor_id),
            None => (0.0, 0.0, reeltime_project_model::CursorId::new("default")),
        };
        let audio_drift = bundle.map(AudioDrift::from_bundle).unwrap_or_default();
        if audio_drift.needs_resync() {
            warn!(?audio_drift, "audio track drift exceeds resync threshold at load");
        }
        Self {
            scene,
            index,
            media,
            slice_index: 0,
            smoother: CursorSmoother::new(SpringParams::default(), smoother_x, smoother_y, cursor_id),
            tick_clock: TickClock::new(),
            viewport_w,
            viewport_h,
            camera_aspect_ratio,
            audio_drift,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Replace the scene snapshot this Resolver tracks, e.g. after a
    /// successful Edit Model mutation. The Resolver reads the current
    /// snapshot from the main loop; no locks required. `bundle` re-derives
    /// `Δ_audio` in case the recording bundle was reloaded; pass `None` to
    /// leave the currently held audio drift untouched.
    pub fn update_scene(&mut self, scene: Arc<Scene>, bundle: Option<&RecordingBundle>) {
        self.scene = scene;
        self.slice_index = self.slice_index.min(self.scene.screen_slices.len().saturating_sub(1));
        if let Some(bundle) = bundle {
            self.audio_drift = AudioDrift::from_bundle(bundle);
            if self.audio_drift.needs_resync() {
                warn!(audio_drift = ?self.audio_drift, "audio track drift exceeds resync threshold after scene update");
            }
        }
    }

    /// The audio/video alignment currently held for this scene's recording.
    pub fn audio_drift(&self) -> AudioDrift {
        self.audio_drift
    }

    pub fn total_output_duration(&self) -> i64 {
        total_output_duration(&self.scene.screen_slices)
    }

    /// Resets the Cursor Smoother to the current source time's raw sample
    /// before resuming the media clock.
    pub fn play(&mut self) {
        let source_time = self.media.current_time();
        if let Some(sample) = self.index.interpolated_at(source_time) {
            self.smoother.reset(sample.x, sample.y, sample.cursor_id);
        }
        self.tick_clock.reset();
        self.media.play();
    }

    /// Pauses the underlying media clock without touching the smoother.
    pub fn pause(&mut self) {
        self.media.pause();
    }

    /// One animation step. Advances past a completed slice, recomputes
    /// layout/cursor/clicks, and publishes a FrameState — or reports
    /// end-of-stream once the last slice is exhausted.
    pub fn tick(&mut self) -> TickOutcome {
        if self.scene.screen_slices.is_empty() {
            return TickOutcome::EndOfStream;
        }

        let mut source_time = self.media.current_time();
        if source_time >= self.scene.screen_slices[self.slice_index].source_end_ms {
            if self.slice_index + 1 >= self.scene.screen_slices.len() {
                self.media.pause();
                debug!("tick reached end of stream");
                return TickOutcome::EndOfStream;
            }
            self.slice_index += 1;
            source_time = self.scene.screen_slices[self.slice_index].source_start_ms;
            self.media.seek(source_time);
            self.tick_clock.reset();
            if let Some(sample) = self.index.interpolated_at(source_time) {
                self.smoother.reset(sample.x, sample.y, sample.cursor_id);
            }
        }

        let wall_dt = self.tick_clock.tick();
        TickOutcome::Frame(self.resolve_at(source_time, wall_dt))
    }

    /// Clamps `t_out_target` to `[0, total_output_duration]`, repositions
    /// the media clock and resets the Cursor Smoother, and publishes a
    /// paused-semantics FrameState (`wall_dt = 0`, no tick advance).
    pub fn seek(&mut self, t_out_target: i64) -> FrameState {
        let slices = &self.scene.screen_slices;
        let total = total_output_duration(slices);
        let t_out = t_out_target.clamp(0, total);
        let (idx, src) = output_to_source(slices, t_out);
        self.slice_index = idx.max(0) as usize;
        self.seek_to_source(src)
    }

    /// Advances by one frame duration (`1000 / fps`) on the current
    /// slice's own source timeline, scaled by `time_scale`, without
    /// crossing a slice boundary.
    pub fn step_frame(&mut self, dir: i64) -> FrameState {
        let fps = self.media.metadata().fps.max(1);
        let delta_output_ms = 1000.0 / fps as f64;
        let slice = self.scene.screen_slices[self.slice_index];
        let delta_source_ms = delta_output_ms * slice.time_scale;

        let raw_new_source = self.media.current_time() as f64 + dir as f64 * delta_source_ms;
        let new_source = (raw_new_source.round() as i64).clamp(slice.source_start_ms, slice.source_end_ms);
        self.seek_to_source(new_source)
    }

    fn seek_to_source(&mut self, source_ms: i64) -> FrameState {
        self.media.seek(source_ms);
        self.tick_clock.reset();
        if let Some(sample) = self.index.interpolated_at(source_ms) {
            self.smoother.reset(sample.x, sample.y, sample.cursor_id);
        }
        self.resolve_at(source_ms, 0.0)
    }

    fn resolve_at(&mut self, source_time: i64, wall_dt: f64) -> FrameState {
        let slices = &self.scene.screen_slices;
        let t_out = source_to_output(slices, self.slice_index, source_time);

        let active_layout = find_layout_at(&self.scene.layouts, t_out)
            .map(|l| resolve_layout_rects(l, self.viewport_w, self.viewport_h, self.camera_aspect_ratio))
            .unwrap_or(LayoutRenderInfo {
                layout_type: LayoutType::ScreenOnly,
                screen_rect: None,
                camera_rect: None,
            });

        let current_slice = slices[self.slice_index];
        let cursor = self.resolve_cursor(&current_slice, source_time, wall_dt);
        let recent_clicks = self.index.recent_clicks(source_time, CLICK_FADE_MS);

        debug!(t_out, slice_index = self.slice_index, source_time, "resolved frame");

        FrameState {
            t_out,
            slice_index: self.slice_index as i64,
            source_time_ms: source_time,
            active_layout,
            cursor,
            recent_clicks,
            audio_drift: self.audio_drift,
            warning: None,
        }
    }

    fn resolve_cursor(
        &mut self,
        current_slice: &reeltime_project_model::Slice,
        source_time: i64,
        wall_dt: f64,
    ) -> Option<SmoothedPoint> {
        if current_slice.hide_cursor {
            return None;
        }
        let sample = self.index.interpolated_at(source_time)?;
        if current_slice.disable_cursor_smoothing {
            self.smoother.reset(sample.x, sample.y, sample.cursor_id.clone());
            Some(SmoothedPoint {
                x: sample.x,
                y: sample.y,
                raw_x: sample.x,
                raw_y: sample.y,
                cursor_id: sample.cursor_id,
            })
        } else {
            Some(self.smoother.step(sample.x, sample.y, wall_dt, sample.cursor_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_clock::{MediaMetadata, SimulatedMediaClock};
    use reeltime_project_model::{CursorId, MouseMoveEvent, MouseMoveSample, Project};

    fn resolver_with_bundle(duration_ms: i64, fps: u32) -> Resolver<SimulatedMediaClock> {
        let project = Project::from_recording(duration_ms).unwrap();
        let scene = Arc::new(project.scenes[0].clone());
        let moves = (0..=duration_ms / 100)
            .map(|i| MouseMoveEvent {
                sample: MouseMoveSample {
                    process_time_ms: i * 100,
                    x: i as f64,
                    y: 0.0,
                },
                cursor_id: CursorId::new("arrow"),
            })
            .collect();
        let index = Arc::new(InputEventIndex::from_streams(moves, vec![]));
        let media = SimulatedMediaClock::new(MediaMetadata {
            fps,
            width: 1920,
            height: 1080,
            duration_ms,
        });
        Resolver::new(scene, index, media, None, 1600.0, 900.0, 16.0 / 9.0)
    }

    #[test]
    fn trivial_playback_advances_output_time_monotonically() {
        let mut resolver = resolver_with_bundle(10_000, 60);
        let frame0 = resolver.seek(3_000);
        assert_eq!(frame0.t_out, 3_000);
        assert_eq!(frame0.slice_index, 0);
        assert_eq!(frame0.source_time_ms, 3_000);
        assert_eq!(frame0.active_layout.layout_type, LayoutType::ScreenWithCamera);

        resolver.play();
        let mut last_t_out = frame0.t_out;
        for _ in 0..3 {
            resolver.media_mut().advance(16);
            match resolver.tick() {
                TickOutcome::Frame(frame) => {
                    assert!(frame.t_out > last_t_out);
                    last_t_out = frame.t_out;
                }
                TickOutcome::EndOfStream => panic!("unexpected end of stream"),
            }
        }
    }

    #[test]
    fn end_of_stream_is_reported_once_last_slice_is_exhausted() {
        let mut resolver = resolver_with_bundle(1_000, 60);
        resolver.seek(1_000);
        resolver.play();
        match resolver.tick() {
            TickOutcome::EndOfStream => {}
            other => panic!("expected end of stream, got {other:?}"),
        }
    }

    #[test]
    fn speed_up_slice_and_frame_step_matches_expected_source_time() {
        let project = Project::from_recording(10_000).unwrap();
        let mut scene = project.scenes[0].clone();
        scene.screen_slices[0].time_scale = 2.0;
        scene.camera_slices[0].time_scale = 2.0;
        let scene = Arc::new(scene);
        let index = Arc::new(InputEventIndex::from_streams(vec![], vec![]));
        let media = SimulatedMediaClock::new(MediaMetadata {
            fps: 60,
            width: 1920,
            height: 1080,
            duration_ms: 10_000,
        });
        let mut resolver = Resolver::new(scene, index, media, None, 1600.0, 900.0, 16.0 / 9.0);

        assert_eq!(resolver.total_output_duration(), 5_000);
        let frame = resolver.seek(2_500);
        assert_eq!(frame.source_time_ms, 5_000);

        let stepped = resolver.step_frame(1);
        assert_eq!(stepped.source_time_ms, 5_033);
        assert!((2_515..=2_518).contains(&stepped.t_out));
    }

    #[test]
    fn resolver_reports_audio_drift_from_bundle_per_tick() {
        use reeltime_project_model::{RecordingBundle, TrackMeta, VideoMeta};
        use std::collections::HashMap;

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
                duration_ms: 10_000,
            },
            webcam: None,
            mic_audio: Some(TrackMeta { duration_ms: 9_700 }),
            system_audio: None,
            mouse_moves: vec![],
            mouse_clicks: vec![],
            cursors: HashMap::new(),
        };

        let mut resolver = Resolver::new(scene, index, media, Some(&bundle), 1600.0, 900.0, 16.0 / 9.0);
        assert_eq!(resolver.audio_drift().mic_audio_offset_ms, Some(300));
        assert!(resolver.audio_drift().needs_resync());

        let frame = resolver.seek(0);
        assert_eq!(frame.audio_drift.mic_audio_offset_ms, Some(300));
    }
}
