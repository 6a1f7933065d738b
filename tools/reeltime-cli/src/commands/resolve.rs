//! Simulate playback for one scene and print the resolved frames.

use std::path::PathBuf;
use std::sync::Arc;

use reeltime_cursor::InputEventIndex;
use reeltime_resolver::{MediaMetadata, Resolver, SimulatedMediaClock, TickOutcome};

use super::load_project;

pub fn run(path: PathBuf, scene_index: usize, seek_ms: i64, ticks: u32, tick_ms: i64) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let scene = project
        .scenes
        .get(scene_index)
        .ok_or_else(|| anyhow::anyhow!("scene index {scene_index} out of range"))?
        .clone();

    let duration_ms = reeltime_timeline::total_output_duration(&scene.screen_slices);
    let index = Arc::new(InputEventIndex::from_streams(vec![], vec![]));
    let media = SimulatedMediaClock::new(MediaMetadata {
        fps: 60,
        width: 1920,
        height: 1080,
        duration_ms,
    });
    let mut resolver = Resolver::new(Arc::new(scene), index, media, None, 1920.0, 1080.0, 16.0 / 9.0);

    let frame = resolver.seek(seek_ms);
    print_frame(&frame);

    resolver.play();
    for _ in 0..ticks {
        resolver.media_mut().advance(tick_ms);
        match resolver.tick() {
            TickOutcome::Frame(frame) => print_frame(&frame),
            TickOutcome::EndOfStream => {
                println!("end of stream");
                break;
            }
        }
    }

    Ok(())
}

fn print_frame(frame: &reeltime_resolver::FrameState) {
    let cursor = frame
        .cursor
        .as_ref()
        .map(|c| format!("({:.1}, {:.1})", c.x, c.y))
        .unwrap_or_else(|| "hidden".to_string());
    println!(
        "t_out={:<6} slice={:<2} source={:<6} layout={:?} cursor={}",
        frame.t_out, frame.slice_index, frame.source_time_ms, frame.active_layout.layout_type, cursor
    );
}
