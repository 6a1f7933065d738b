pub mod export;
pub mod info;
pub mod init;
pub mod resolve;
pub mod set_speed;
pub mod split;

use std::path::Path;

use reeltime_project_model::Project;

/// Load a project from its on-disk JSON representation.
pub fn load_project(path: &Path) -> anyhow::Result<Project> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse {} as a project: {e}", path.display()))
}

/// Save a project back to its on-disk JSON representation.
pub fn save_project(path: &Path, project: &Project) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(project)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    Ok(())
}
