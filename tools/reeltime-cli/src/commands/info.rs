//! Show project information.

use std::path::PathBuf;

use super::load_project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let project = load_project(&path)?;

    println!("Project: {}", project.id);
    println!("  Created: {}", project.created_at);
    println!("  Active scene: {}", project.active_scene_index);
    println!(
        "  Output aspect ratio: {:?}",
        project.config.output_aspect_ratio
    );
    println!();

    for (i, scene) in project.scenes.iter().enumerate() {
        let total = reeltime_timeline::total_output_duration(&scene.screen_slices);
        println!("Scene {i}: {} ({:?})", scene.name, scene.scene_type);
        println!("  Screen clips: {}", scene.screen_slices.len());
        println!("  Camera clips: {}", scene.camera_slices.len());
        println!("  Tracks linked: {}", scene.tracks_linked());
        println!("  Layouts: {}", scene.layouts.len());
        println!("  Total output duration: {total}ms");
    }

    Ok(())
}
