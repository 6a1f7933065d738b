//! Change a screen-track slice's playback speed.

use std::path::PathBuf;

use reeltime_project_model::SlicePatch;
use reeltime_timeline::{EditModel, Track};

use super::{load_project, save_project};

pub fn run(
    path: PathBuf,
    scene_index: usize,
    slice_index: usize,
    time_scale: f64,
) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let scene = project
        .scenes
        .get(scene_index)
        .ok_or_else(|| anyhow::anyhow!("scene index {scene_index} out of range"))?;
    let scene_id = scene.id;
    let slice_id = scene
        .screen_slices
        .get(slice_index)
        .ok_or_else(|| anyhow::anyhow!("slice index {slice_index} out of range"))?
        .id;

    let model = EditModel::new(project);
    let patch = SlicePatch {
        time_scale: Some(time_scale),
        ..Default::default()
    };
    let updated = model
        .update_slice(scene_id, Track::Screen, slice_id, patch)
        .map_err(|e| anyhow::anyhow!("speed change refused: {e}"))?;

    save_project(&path, &updated)?;
    let total = reeltime_timeline::total_output_duration(&updated.scenes[scene_index].screen_slices);
    println!("Set slice {slice_index} of scene {scene_index} to {time_scale}x — total output duration is now {total}ms");
    Ok(())
}
