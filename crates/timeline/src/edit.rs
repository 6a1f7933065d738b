//! Edit Model: mutation operations over a [`Project`] that enforce its
//! cross-sequence invariants atomically, publish immutable snapshots, and
//! notify subscribers of every successful change.
//!
//! Every public method here either returns the new snapshot or leaves the
//! previous one in place untouched — there is no partially-applied state.
//! Reads never block: a caller holding an older `Arc<Project>` stays valid,
//! just stale.

use std::sync::Arc;

use arc_swap::ArcSwap;
use reeltime_common::config::{MIN_LAYOUT_MS, MIN_SLICE_MS};
use reeltime_common::error::{EngineError, EngineResult};
use reeltime_project_model::{
    Layout, LayoutType, NormalizedPoint, Project, Scene, Slice, SliceId, SlicePatch,
};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::algebra::{output_to_source, render_infos, total_output_duration};

/// Which positional track an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Screen,
    Camera,
}

/// Broadcast to subscribers after every successful mutation.
#[derive(Debug, Clone)]
pub struct ProjectChanged {
    pub old: Arc<Project>,
    pub new: Arc<Project>,
}

/// A subset of a [`Layout`]'s mutable fields. Geometric fields
/// (`start_time`/`end_time`) are handled specially: the model repairs
/// coverage by clipping or growing the neighbouring layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutPatch {
    pub layout_type: Option<LayoutType>,
    pub camera_size: Option<f64>,
    pub camera_position: Option<NormalizedPoint>,
}

/// The single writer of project state. Readers load the current snapshot
/// via [`EditModel::snapshot`] without ever taking a lock.
pub struct EditModel {
    snapshot: ArcSwap<Project>,
    changes: broadcast::Sender<ProjectChanged>,
}

impl EditModel {
    /// Wrap an existing project as the initial snapshot.
    pub fn new(project: Project) -> Self {
        let (tx, _rx) = broadcast::channel(32);
        Self {
            snapshot: ArcSwap::from_pointee(project),
            changes: tx,
        }
    }

    /// Create a brand-new, empty project.
    pub fn create_empty() -> EngineResult<Self> {
        Ok(Self::new(Project::empty()))
    }

    /// Create a project seeded from a freshly-loaded recording. Refused if
    /// `duration_ms` is too short to satisfy the minimum slice or layout
    /// duration.
    pub fn create_from_recording(duration_ms: i64) -> EngineResult<Self> {
        let project = Project::from_recording(duration_ms).map_err(|e| {
            warn!(duration_ms, error = %e, "refused to create project from recording");
            EngineError::invariant_violation(e.to_string())
        })?;
        info!(duration_ms, project_id = %project.id, "created project from recording");
        Ok(Self::new(project))
    }

    /// The current immutable snapshot. Cheap: an `Arc` clone.
    pub fn snapshot(&self) -> Arc<Project> {
        self.snapshot.load_full()
    }

    /// Subscribe to change notifications. Lagging subscribers observe a
    /// `Lagged` error on `recv` and can re-read [`Self::snapshot`] to catch
    /// up — a reader holding an older snapshot remains correct, just stale.
    pub fn subscribe(&self) -> broadcast::Receiver<ProjectChanged> {
        self.changes.subscribe()
    }

    fn commit(&self, new: Project) -> Arc<Project> {
        let new = Arc::new(new);
        let old = self.snapshot.swap(new.clone());
        info!(project_id = %new.id, "committed new project snapshot");
        let _ = self.changes.send(ProjectChanged {
            old,
            new: new.clone(),
        });
        new
    }

    fn find_scene_mut<'a>(project: &'a mut Project, scene_id: reeltime_project_model::SceneId) -> EngineResult<&'a mut Scene> {
        project
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| EngineError::not_found("scene", scene_id.to_string()))
    }

    /// Splits both tracks at the clip index covering `t_out` on the screen
    /// track, using each track's own `time_scale` to compute the
    /// source-time split point, and refuses atomically if either resulting
    /// slice would fall below the minimum slice duration or if clamping
    /// the split point were required.
    pub fn split_all_tracks_at(
        &self,
        scene_id: reeltime_project_model::SceneId,
        t_out: i64,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;

        let total = total_output_duration(&scene.screen_slices);
        if t_out < 0 || t_out > total {
            return Err(EngineError::out_of_range(format!(
                "split time {t_out} outside [0, {total}]"
            )));
        }

        let (idx, _) = output_to_source(&scene.screen_slices, t_out);
        if idx < 0 {
            warn!(scene_id = %scene_id, "refused split: scene has no slices");
            return Err(EngineError::invariant_violation("scene has no slices to split"));
        }
        let idx = idx as usize;

        let screen_infos = render_infos(&scene.screen_slices);
        let output_start = screen_infos[idx].output_start;

        let new_screen = split_slice_at(&scene.screen_slices[idx], output_start, t_out)?;
        let new_camera = split_slice_at(&scene.camera_slices[idx], output_start, t_out)?;

        scene.screen_slices.splice(idx..=idx, new_screen);
        scene.camera_slices.splice(idx..=idx, new_camera);

        if !scene.tracks_linked() {
            return Err(EngineError::invariant_violation(
                "split left screen/camera tracks out of sync",
            ));
        }

        Ok(self.commit(project))
    }

    /// Removes the positional index of the identified slice from both
    /// tracks. Refused if it would leave either track empty.
    pub fn remove_clip(
        &self,
        scene_id: reeltime_project_model::SceneId,
        any_slice_id: SliceId,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;

        let idx = scene
            .screen_slices
            .iter()
            .position(|s| s.id == any_slice_id)
            .or_else(|| scene.camera_slices.iter().position(|s| s.id == any_slice_id))
            .ok_or_else(|| EngineError::not_found("slice", any_slice_id.to_string()))?;

        if scene.screen_slices.len() <= 1 {
            warn!(scene_id = %scene_id, "refused remove_clip: would leave a track empty");
            return Err(EngineError::invariant_violation(
                "removing this clip would leave a track empty",
            ));
        }

        scene.screen_slices.remove(idx);
        scene.camera_slices.remove(idx);

        Ok(self.commit(project))
    }

    /// Applies a trim patch to one slice on one track; does not re-link
    /// tracks.
    pub fn update_slice(
        &self,
        scene_id: reeltime_project_model::SceneId,
        track: Track,
        slice_id: SliceId,
        patch: SlicePatch,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;
        let slices = match track {
            Track::Screen => &mut scene.screen_slices,
            Track::Camera => &mut scene.camera_slices,
        };

        let idx = slices
            .iter()
            .position(|s| s.id == slice_id)
            .ok_or_else(|| EngineError::not_found("slice", slice_id.to_string()))?;

        let patched = slices[idx].with_patch(&patch);
        patched
            .validate()
            .map_err(|e| EngineError::invariant_violation(e.to_string()))?;
        slices[idx] = patched;

        Ok(self.commit(project))
    }

    /// Moves a slice positionally within one track.
    pub fn reorder(
        &self,
        scene_id: reeltime_project_model::SceneId,
        track: Track,
        from: usize,
        to: usize,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;
        let slices = match track {
            Track::Screen => &mut scene.screen_slices,
            Track::Camera => &mut scene.camera_slices,
        };

        if from >= slices.len() || to >= slices.len() {
            return Err(EngineError::out_of_range(format!(
                "reorder indices ({from}, {to}) out of bounds for {} slices",
                slices.len()
            )));
        }

        let moved = slices.remove(from);
        slices.insert(to, moved);

        Ok(self.commit(project))
    }

    /// Splits the layout covering `t_out` into two, refusing if either
    /// half would be shorter than `MIN_LAYOUT_MS`.
    pub fn split_layout(
        &self,
        scene_id: reeltime_project_model::SceneId,
        layout_id: reeltime_project_model::LayoutId,
        t_out: i64,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;

        let idx = scene
            .layouts
            .iter()
            .position(|l| l.id == layout_id)
            .ok_or_else(|| EngineError::not_found("layout", layout_id.to_string()))?;

        let layout = scene.layouts[idx];
        if t_out <= layout.start_time || t_out >= layout.end_time {
            return Err(EngineError::out_of_range(format!(
                "split time {t_out} does not fall strictly inside layout [{}, {})",
                layout.start_time, layout.end_time
            )));
        }
        if t_out - layout.start_time < MIN_LAYOUT_MS || layout.end_time - t_out < MIN_LAYOUT_MS {
            return Err(EngineError::invariant_violation(
                "split would leave a layout shorter than MIN_LAYOUT_MS",
            ));
        }

        let first = Layout::new(
            layout.start_time,
            t_out,
            layout.layout_type,
            layout.camera_size,
            layout.camera_position,
        )
        .map_err(|e| EngineError::invariant_violation(e.to_string()))?;
        let second = Layout::new(
            t_out,
            layout.end_time,
            layout.layout_type,
            layout.camera_size,
            layout.camera_position,
        )
        .map_err(|e| EngineError::invariant_violation(e.to_string()))?;

        scene.layouts.splice(idx..=idx, [first, second]);
        validate_layout_coverage(&scene.layouts)?;

        Ok(self.commit(project))
    }

    /// Applies non-geometric property changes. Geometry is owned by
    /// split/remove/add so coverage repair stays centralized there.
    pub fn update_layout(
        &self,
        scene_id: reeltime_project_model::SceneId,
        layout_id: reeltime_project_model::LayoutId,
        patch: LayoutPatch,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;

        let idx = scene
            .layouts
            .iter()
            .position(|l| l.id == layout_id)
            .ok_or_else(|| EngineError::not_found("layout", layout_id.to_string()))?;

        let existing = scene.layouts[idx];
        let updated = Layout::new(
            existing.start_time,
            existing.end_time,
            patch.layout_type.unwrap_or(existing.layout_type),
            patch.camera_size.unwrap_or(existing.camera_size),
            patch.camera_position.unwrap_or(existing.camera_position),
        )
        .map_err(|e| EngineError::invariant_violation(e.to_string()))?;
        scene.layouts[idx] = Layout { id: existing.id, ..updated };

        Ok(self.commit(project))
    }

    /// Repairs coverage by extending the next neighbour to absorb the gap
    /// (or the previous neighbour, if removing the last layout). Refused
    /// if it is the only layout — a scene may never have zero coverage.
    pub fn remove_layout(
        &self,
        scene_id: reeltime_project_model::SceneId,
        layout_id: reeltime_project_model::LayoutId,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;

        if scene.layouts.len() <= 1 {
            return Err(EngineError::invariant_violation(
                "cannot remove the only layout in a scene",
            ));
        }

        let idx = scene
            .layouts
            .iter()
            .position(|l| l.id == layout_id)
            .ok_or_else(|| EngineError::not_found("layout", layout_id.to_string()))?;

        let removed = scene.layouts[idx];
        if idx + 1 < scene.layouts.len() {
            scene.layouts[idx + 1].start_time = removed.start_time;
        } else {
            scene.layouts[idx - 1].end_time = removed.end_time;
        }
        scene.layouts.remove(idx);

        validate_layout_coverage(&scene.layouts)?;
        Ok(self.commit(project))
    }

    /// Carves a new layout interval out of whatever currently covers
    /// `[start_time, end_time)`, truncating overlapping neighbours. Refused
    /// if a truncated fragment would fall below `MIN_LAYOUT_MS`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_layout(
        &self,
        scene_id: reeltime_project_model::SceneId,
        start_time: i64,
        end_time: i64,
        layout_type: LayoutType,
        camera_size: f64,
        camera_position: NormalizedPoint,
    ) -> EngineResult<Arc<Project>> {
        let mut project = (*self.snapshot()).clone();
        let scene = Self::find_scene_mut(&mut project, scene_id)?;

        if end_time - start_time < MIN_LAYOUT_MS {
            return Err(EngineError::invariant_violation(
                "new layout duration is shorter than MIN_LAYOUT_MS",
            ));
        }
        let total = scene
            .layouts
            .last()
            .map(|l| l.end_time)
            .ok_or_else(|| EngineError::invariant_violation("scene has no layouts"))?;
        if start_time < 0 || end_time > total {
            return Err(EngineError::out_of_range(format!(
                "new layout [{start_time}, {end_time}) outside [0, {total})"
            )));
        }

        let mut rebuilt = Vec::with_capacity(scene.layouts.len() + 2);
        for layout in &scene.layouts {
            if layout.end_time <= start_time || layout.start_time >= end_time {
                rebuilt.push(*layout);
                continue;
            }
            if layout.start_time < start_time {
                let left_duration = start_time - layout.start_time;
                if left_duration < MIN_LAYOUT_MS {
                    return Err(EngineError::invariant_violation(
                        "carving this range would leave a neighbouring fragment too short",
                    ));
                }
                rebuilt.push(Layout::new(
                    layout.start_time,
                    start_time,
                    layout.layout_type,
                    layout.camera_size,
                    layout.camera_position,
                )?);
            }
            if layout.end_time > end_time {
                let right_duration = layout.end_time - end_time;
                if right_duration < MIN_LAYOUT_MS {
                    return Err(EngineError::invariant_violation(
                        "carving this range would leave a neighbouring fragment too short",
                    ));
                }
                rebuilt.push(Layout::new(
                    end_time,
                    layout.end_time,
                    layout.layout_type,
                    layout.camera_size,
                    layout.camera_position,
                )?);
            }
        }
        rebuilt.push(Layout::new(
            start_time,
            end_time,
            layout_type,
            camera_size,
            camera_position,
        )?);
        rebuilt.sort_by_key(|l| l.start_time);

        validate_layout_coverage(&rebuilt)?;
        scene.layouts = rebuilt;

        Ok(self.commit(project))
    }
}

impl From<reeltime_project_model::LayoutInvalid> for EngineError {
    fn from(e: reeltime_project_model::LayoutInvalid) -> Self {
        EngineError::invariant_violation(e.to_string())
    }
}

impl From<reeltime_project_model::SceneInvalid> for EngineError {
    fn from(e: reeltime_project_model::SceneInvalid) -> Self {
        EngineError::invariant_violation(e.to_string())
    }
}

/// Splits one slice into two at `t_out`, computing the source-time split
/// point by rounding to the nearest ms, then clamping into
/// `[source_start + MIN_SLICE_MS, source_end - MIN_SLICE_MS]`, refusing if
/// clamping was required.
fn split_slice_at(slice: &Slice, output_start: i64, t_out: i64) -> EngineResult<[Slice; 2]> {
    let offset_ms = (t_out - output_start) as f64;
    let raw_split = slice.source_start_ms as f64 + offset_ms * slice.time_scale;
    let split = raw_split.round() as i64;

    let lo = slice.source_start_ms + MIN_SLICE_MS;
    let hi = slice.source_end_ms - MIN_SLICE_MS;
    if lo > hi || split < lo || split > hi {
        return Err(EngineError::invariant_violation(
            "split would leave a slice shorter than MIN_SLICE_MS",
        ));
    }

    let first = Slice {
        id: SliceId::new(),
        source_end_ms: split,
        ..*slice
    };
    let second = Slice {
        id: SliceId::new(),
        source_start_ms: split,
        ..*slice
    };
    first
        .validate()
        .map_err(|e| EngineError::invariant_violation(e.to_string()))?;
    second
        .validate()
        .map_err(|e| EngineError::invariant_violation(e.to_string()))?;
    Ok([first, second])
}

/// Checks that layouts are contiguous, non-overlapping, cover
/// `[0, total_output_duration]`, each ≥ `MIN_LAYOUT_MS`.
fn validate_layout_coverage(layouts: &[Layout]) -> EngineResult<()> {
    if layouts.is_empty() {
        return Err(EngineError::invariant_violation("scene has no layouts"));
    }
    if layouts[0].start_time != 0 {
        return Err(EngineError::invariant_violation(
            "layout coverage does not start at 0",
        ));
    }
    for w in layouts.windows(2) {
        if w[0].end_time != w[1].start_time {
            return Err(EngineError::invariant_violation(format!(
                "gap or overlap between layouts at {} / {}",
                w[0].end_time, w[1].start_time
            )));
        }
    }
    for layout in layouts {
        if layout.duration_ms() < MIN_LAYOUT_MS {
            return Err(EngineError::invariant_violation(
                "layout shorter than MIN_LAYOUT_MS after repair",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reeltime_project_model::{LayoutType, Project};

    fn new_model(duration_ms: i64) -> (EditModel, reeltime_project_model::SceneId) {
        let project = Project::from_recording(duration_ms).unwrap();
        let scene_id = project.scenes[0].id;
        (EditModel::new(project), scene_id)
    }

    #[test]
    fn create_from_recording_refuses_too_short_duration() {
        assert!(EditModel::create_from_recording(50).is_err());
    }

    #[test]
    fn create_empty_succeeds() {
        assert!(EditModel::create_empty().is_ok());
    }

    #[test]
    fn split_all_tracks_produces_linked_slices() {
        let (model, scene_id) = new_model(10_000);
        let new_snapshot = model.split_all_tracks_at(scene_id, 4_000).unwrap();
        let scene = &new_snapshot.scenes[0];
        assert_eq!(scene.screen_slices.len(), 2);
        assert_eq!(scene.camera_slices.len(), 2);
        assert_eq!(scene.screen_slices[0].source_end_ms, 4_000);
        assert_eq!(scene.screen_slices[1].source_start_ms, 4_000);
        assert!(scene.tracks_linked());
    }

    #[test]
    fn split_refuses_too_close_to_either_end() {
        let (model, scene_id) = new_model(10_000);
        assert!(model.split_all_tracks_at(scene_id, 10).is_err());
        assert!(model.split_all_tracks_at(scene_id, 9_995).is_err());
    }

    #[test]
    fn remove_clip_refuses_to_empty_a_track() {
        let (model, scene_id) = new_model(10_000);
        let slice_id = model.snapshot().scenes[0].screen_slices[0].id;
        assert!(model.remove_clip(scene_id, slice_id).is_err());
    }

    #[test]
    fn split_then_remove_shifts_remaining_clip_start() {
        let (model, scene_id) = new_model(10_000);
        model.split_all_tracks_at(scene_id, 4_000).unwrap();
        let first_id = model.snapshot().scenes[0].screen_slices[0].id;
        let snapshot = model.remove_clip(scene_id, first_id).unwrap();
        let scene = &snapshot.scenes[0];
        assert_eq!(scene.screen_slices.len(), 1);
        assert_eq!(scene.camera_slices.len(), 1);
        assert_eq!(scene.screen_slices[0].source_start_ms, 4_000);
        assert_eq!(
            crate::algebra::total_output_duration(&scene.screen_slices),
            6_000
        );
        assert_eq!(
            crate::algebra::output_to_source(&scene.screen_slices, 0),
            (0, 4_000)
        );
    }

    #[test]
    fn speeding_up_a_slice_halves_its_output_duration() {
        let (model, scene_id) = new_model(10_000);
        let slice_id = model.snapshot().scenes[0].screen_slices[0].id;
        let patch = SlicePatch {
            time_scale: Some(2.0),
            ..Default::default()
        };
        let snapshot = model
            .update_slice(scene_id, Track::Screen, slice_id, patch)
            .unwrap();
        let slices = &snapshot.scenes[0].screen_slices;
        assert_eq!(crate::algebra::total_output_duration(slices), 5_000);
        assert_eq!(crate::algebra::output_to_source(slices, 2_500), (0, 5_000));
    }

    #[test]
    fn split_layout_then_remove_repairs_coverage() {
        let (model, scene_id) = new_model(10_000);
        let layout_id = model.snapshot().scenes[0].layouts[0].id;
        let snapshot = model.split_layout(scene_id, layout_id, 4_000).unwrap();
        assert_eq!(snapshot.scenes[0].layouts.len(), 2);

        let first_id = snapshot.scenes[0].layouts[0].id;
        let snapshot = model.remove_layout(scene_id, first_id).unwrap();
        assert_eq!(snapshot.scenes[0].layouts.len(), 1);
        assert_eq!(snapshot.scenes[0].layouts[0].start_time, 0);
        assert_eq!(snapshot.scenes[0].layouts[0].end_time, 10_000);
    }

    #[test]
    fn add_layout_carves_out_a_sub_range() {
        let (model, scene_id) = new_model(10_000);
        let snapshot = model
            .add_layout(
                scene_id,
                2_000,
                3_000,
                LayoutType::SideBySide,
                0.5,
                NormalizedPoint::new(0.5, 0.5),
            )
            .unwrap();
        let layouts = &snapshot.scenes[0].layouts;
        assert_eq!(layouts.len(), 3);
        assert_eq!(layouts[0].end_time, 2_000);
        assert_eq!(layouts[1].start_time, 2_000);
        assert_eq!(layouts[1].end_time, 3_000);
        assert_eq!(layouts[1].layout_type, LayoutType::SideBySide);
        assert_eq!(layouts[2].start_time, 3_000);
    }

    #[test]
    fn add_layout_refuses_fragment_shorter_than_minimum() {
        let (model, scene_id) = new_model(10_000);
        let result = model.add_layout(
            scene_id,
            0,
            50,
            LayoutType::ScreenOnly,
            0.3,
            NormalizedPoint::new(0.5, 0.5),
        );
        assert!(result.is_err());
    }

    #[test]
    fn snapshot_subscribers_see_old_and_new() {
        let (model, scene_id) = new_model(10_000);
        let mut rx = model.subscribe();
        model.split_all_tracks_at(scene_id, 4_000).unwrap();
        let change = rx.try_recv().unwrap();
        assert_eq!(change.old.scenes[0].screen_slices.len(), 1);
        assert_eq!(change.new.scenes[0].screen_slices.len(), 2);
    }
}
