//! End-to-end Edit Model scenarios covering split/remove, track linking,
//! and layout coverage repair.

use reeltime_project_model::Project;
use reeltime_timeline::{output_to_source, total_output_duration, EditModel, Track};

#[test]
fn split_and_remove_keeps_tracks_linked_and_total_duration() {
    let project = Project::from_recording(10_000).unwrap();
    let scene_id = project.scenes[0].id;
    let model = EditModel::new(project);

    let after_split = model.split_all_tracks_at(scene_id, 4_000).unwrap();
    let scene = &after_split.scenes[0];
    assert_eq!(scene.screen_slices.len(), 2);
    assert_eq!(scene.camera_slices.len(), 2);
    assert_eq!(
        total_output_duration(&scene.screen_slices),
        total_output_duration(&scene.camera_slices)
    );
    assert_eq!(total_output_duration(&scene.screen_slices), 10_000);

    let first_screen_id = scene.screen_slices[0].id;
    let after_remove = model.remove_clip(scene_id, first_screen_id).unwrap();
    let scene = &after_remove.scenes[0];
    assert_eq!(scene.screen_slices.len(), 1);
    assert_eq!(scene.camera_slices.len(), 1);
    assert_eq!(total_output_duration(&scene.screen_slices), 6_000);
    assert_eq!(output_to_source(&scene.screen_slices, 0), (0, 4_000));
}

#[test]
fn split_preserves_total_duration_and_separates_neighbouring_samples() {
    let project = Project::from_recording(10_000).unwrap();
    let scene_id = project.scenes[0].id;
    let model = EditModel::new(project);

    let before_total = total_output_duration(&model.snapshot().scenes[0].screen_slices);
    let after = model.split_all_tracks_at(scene_id, 4_000).unwrap();
    let scene = &after.scenes[0];
    let after_total = total_output_duration(&scene.screen_slices);

    assert_eq!(before_total, after_total);
    assert_eq!(scene.screen_slices.len(), 2);

    let (idx_before, _) = output_to_source(&scene.screen_slices, 3_999);
    let (idx_after, _) = output_to_source(&scene.screen_slices, 4_000);
    assert_ne!(idx_before, idx_after);
}

#[test]
fn track_linking_survives_split_and_remove() {
    let project = Project::from_recording(10_000).unwrap();
    let scene_id = project.scenes[0].id;
    let model = EditModel::new(project);

    model.split_all_tracks_at(scene_id, 4_000).unwrap();
    model.split_all_tracks_at(scene_id, 7_000).unwrap();
    let snapshot = model.snapshot();
    let scene = &snapshot.scenes[0];
    assert_eq!(scene.screen_slices.len(), scene.camera_slices.len());

    let mid_id = scene.screen_slices[1].id;
    let after = model.remove_clip(scene_id, mid_id).unwrap();
    let scene = &after.scenes[0];
    assert_eq!(scene.screen_slices.len(), scene.camera_slices.len());
    assert!(scene.tracks_linked());
}

#[test]
fn layout_coverage_holds_after_split_and_remove() {
    let project = Project::from_recording(10_000).unwrap();
    let scene_id = project.scenes[0].id;
    let model = EditModel::new(project);

    let layout_id = model.snapshot().scenes[0].layouts[0].id;
    let after_split = model.split_layout(scene_id, layout_id, 4_000).unwrap();
    let layouts = &after_split.scenes[0].layouts;
    assert_eq!(layouts[0].start_time, 0);
    assert_eq!(layouts.last().unwrap().end_time, 10_000);
    for pair in layouts.windows(2) {
        assert_eq!(pair[0].end_time, pair[1].start_time);
    }

    let first_id = layouts[0].id;
    let after_remove = model.remove_layout(scene_id, first_id).unwrap();
    let layouts = &after_remove.scenes[0].layouts;
    assert_eq!(layouts.len(), 1);
    assert_eq!(layouts[0].start_time, 0);
    assert_eq!(layouts[0].end_time, 10_000);
}

#[test]
fn per_track_trim_keeps_length_equal_without_re_linking_durations() {
    let project = Project::from_recording(10_000).unwrap();
    let scene_id = project.scenes[0].id;
    let model = EditModel::new(project);

    model.split_all_tracks_at(scene_id, 4_000).unwrap();
    let snapshot = model.snapshot();
    let screen_slice_id = snapshot.scenes[0].screen_slices[0].id;

    let patch = reeltime_project_model::SlicePatch {
        source_end_ms: Some(3_500),
        ..Default::default()
    };
    let after = model
        .update_slice(scene_id, Track::Screen, screen_slice_id, patch)
        .unwrap();
    let scene = &after.scenes[0];
    assert_eq!(scene.screen_slices.len(), scene.camera_slices.len());
    assert_ne!(
        total_output_duration(&scene.screen_slices),
        total_output_duration(&scene.camera_slices)
    );
}
