//! Split both tracks of a scene at a given output time.

use std::path::PathBuf;

use reeltime_timeline::EditModel;

use super::{load_project, save_project};

pub fn run(path: PathBuf, scene_index: usize, at_ms: i64) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let scene_id = project
        .scenes
        .get(scene_index)
        .ok_or_else(|| anyhow::anyhow!("scene index {scene_index} out of range"))?
        .id;

    let model = EditModel::new(project);
    let updated = model
        .split_all_tracks_at(scene_id, at_ms)
        .map_err(|e| anyhow::anyhow!("split refused: {e}"))?;

    save_project(&path, &updated)?;
    let scene = &updated.scenes[scene_index];
    println!(
        "Split scene {scene_index} at {at_ms}ms — now {} screen clips, {} camera clips",
        scene.screen_slices.len(),
        scene.camera_slices.len()
    );
    Ok(())
}
