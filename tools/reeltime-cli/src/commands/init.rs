//! Create a new project file from a simulated recording.

use std::path::PathBuf;

use reeltime_project_model::Project;

use super::save_project;

pub fn run(path: PathBuf, duration_ms: i64) -> anyhow::Result<()> {
    let project = Project::from_recording(duration_ms)
        .map_err(|e| anyhow::anyhow!("cannot create project: {e}"))?;
    save_project(&path, &project)?;

    println!("Created project at {}", path.display());
    println!("  Id: {}", project.id);
    println!("  Scenes: {}", project.scenes.len());
    println!(
        "  Duration: {}ms",
        reeltime_timeline::total_output_duration(&project.scenes[0].screen_slices)
    );

    Ok(())
}
