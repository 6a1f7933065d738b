//! Audio/video alignment.
//!
//! Audio is a passive follower: the Resolver only reports the current
//! source time and each audio track's `Δ_audio` offset; applying that
//! offset when seeking audio is the media collaborator's job.

use reeltime_common::config::AUDIO_RESYNC_THRESHOLD_MS;
use reeltime_project_model::RecordingBundle;

/// `Δ_audio = max(0, video_duration_ms − audio_duration_ms)`. A negative
/// raw difference — audio longer than video — clamps to zero, never to a
/// negative drift.
pub fn audio_offset_ms(video_duration_ms: i64, audio_duration_ms: i64) -> i64 {
    (video_duration_ms - audio_duration_ms).max(0)
}

/// The audio target time the media collaborator should seek an audio track
/// to, given the current screen-track source time and that track's
/// `Δ_audio`.
pub fn audio_target_time_ms(source_time_ms: i64, delta_audio_ms: i64) -> i64 {
    (source_time_ms - delta_audio_ms).max(0)
}

/// Whether `Δ_audio` exceeds the resync policy threshold (20ms).
pub fn exceeds_resync_threshold(delta_audio_ms: i64) -> bool {
    delta_audio_ms.abs() > AUDIO_RESYNC_THRESHOLD_MS
}

/// Per-audio-track `Δ_audio`, computed once from a loaded bundle and held
/// by the Resolver so it can be reported alongside every `FrameState`.
/// `None` for a track the bundle doesn't carry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioDrift {
    pub mic_audio_offset_ms: Option<i64>,
    pub system_audio_offset_ms: Option<i64>,
}

impl AudioDrift {
    /// Derive `Δ_audio` for each audio track present in the bundle, against
    /// the bundle's own video duration.
    pub fn from_bundle(bundle: &RecordingBundle) -> Self {
        let video_duration_ms = bundle.video.duration_ms;
        Self {
            mic_audio_offset_ms: bundle
                .mic_audio
                .map(|track| audio_offset_ms(video_duration_ms, track.duration_ms)),
            system_audio_offset_ms: bundle
                .system_audio
                .map(|track| audio_offset_ms(video_duration_ms, track.duration_ms)),
        }
    }

    /// Whether any present track's drift exceeds the resync policy
    /// threshold — the condition under which a media collaborator should
    /// hard-reseek that track rather than let it drift.
    pub fn needs_resync(&self) -> bool {
        self.mic_audio_offset_ms.is_some_and(exceeds_resync_threshold)
            || self.system_audio_offset_ms.is_some_and(exceeds_resync_threshold)
    }

    /// Target seek time for the mic track at the given screen-track source
    /// time, if a mic track is present.
    pub fn mic_target_time_ms(&self, source_time_ms: i64) -> Option<i64> {
        self.mic_audio_offset_ms
            .map(|delta| audio_target_time_ms(source_time_ms, delta))
    }

    /// Target seek time for the system-audio track, if present.
    pub fn system_target_time_ms(&self, source_time_ms: i64) -> Option<i64> {
        self.system_audio_offset_ms
            .map(|delta| audio_target_time_ms(source_time_ms, delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_drift_compensation_matches_policy() {
        let delta = audio_offset_ms(30_000, 29_700);
        assert_eq!(delta, 300);
        assert_eq!(audio_target_time_ms(5_000, delta), 4_700);
    }

    #[test]
    fn negative_raw_difference_clamps_to_zero() {
        assert_eq!(audio_offset_ms(29_700, 30_000), 0);
    }

    #[test]
    fn audio_target_time_never_goes_negative() {
        assert_eq!(audio_target_time_ms(100, 300), 0);
    }

    #[test]
    fn resync_threshold_matches_policy() {
        assert!(!exceeds_resync_threshold(20));
        assert!(exceeds_resync_threshold(21));
    }

    fn bundle_with_audio(video_ms: i64, mic_ms: Option<i64>, system_ms: Option<i64>) -> RecordingBundle {
        use reeltime_project_model::{TrackMeta, VideoMeta};
        use std::collections::HashMap;

        RecordingBundle {
            video: VideoMeta {
                width: 1920,
                height: 1080,
                fps: 60,
                duration_ms: video_ms,
            },
            webcam: None,
            mic_audio: mic_ms.map(|duration_ms| TrackMeta { duration_ms }),
            system_audio: system_ms.map(|duration_ms| TrackMeta { duration_ms }),
            mouse_moves: vec![],
            mouse_clicks: vec![],
            cursors: HashMap::new(),
        }
    }

    #[test]
    fn audio_drift_derives_offsets_for_present_tracks_only() {
        let bundle = bundle_with_audio(30_000, Some(29_700), None);
        let drift = AudioDrift::from_bundle(&bundle);
        assert_eq!(drift.mic_audio_offset_ms, Some(300));
        assert_eq!(drift.system_audio_offset_ms, None);
        assert!(drift.needs_resync());
        assert_eq!(drift.mic_target_time_ms(5_000), Some(4_700));
        assert_eq!(drift.system_target_time_ms(5_000), None);
    }

    #[test]
    fn audio_drift_within_threshold_does_not_need_resync() {
        let bundle = bundle_with_audio(30_000, Some(29_990), Some(30_000));
        let drift = AudioDrift::from_bundle(&bundle);
        assert!(!drift.needs_resync());
    }
}
