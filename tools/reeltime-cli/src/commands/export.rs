//! Print the Edit Decision List for one track as JSON.

use std::path::PathBuf;

use reeltime_timeline::{project_edl, Track};

use super::load_project;

pub fn run(path: PathBuf, track: String) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let track = match track.as_str() {
        "screen" => Track::Screen,
        "camera" => Track::Camera,
        other => anyhow::bail!("unknown track '{other}', expected 'screen' or 'camera'"),
    };

    let edl = project_edl(&project, track);
    let json = serde_json::to_string_pretty(&edl.iter().map(EdlEntryJson::from).collect::<Vec<_>>())?;
    println!("{json}");
    Ok(())
}

#[derive(serde::Serialize)]
struct EdlEntryJson {
    source_start_ms: i64,
    source_end_ms: i64,
    time_scale: f64,
}

impl From<&reeltime_timeline::EdlEntry> for EdlEntryJson {
    fn from(entry: &reeltime_timeline::EdlEntry) -> Self {
        Self {
            source_start_ms: entry.source_start_ms,
            source_end_ms: entry.source_end_ms,
            time_scale: entry.time_scale,
        }
    }
}
