//! Time Algebra: pure functions over `Slice[]`.
//!
//! Every function here is stateless and takes its slice sequence by
//! reference — no function in this module allocates a project or mutates
//! anything. The Edit Model (`crate::edit`) is the only place slices are
//! ever changed; this module just answers "where does output time `t`
//! land".

use reeltime_project_model::Slice;

/// One slice's position on both time axes, as returned by [`render_infos`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceRenderInfo {
    pub index: usize,
    pub output_start: i64,
    pub output_end: i64,
    pub output_duration: i64,
}

/// `slice_output_duration(s) = (source_end - source_start) / time_scale`,
/// rounded half-to-even to the nearest millisecond. Intermediate arithmetic
/// is `f64`; only the final result is rounded.
pub fn slice_output_duration(slice: &Slice) -> i64 {
    let source_duration = (slice.source_end_ms - slice.source_start_ms) as f64;
    round_half_to_even(source_duration / slice.time_scale)
}

/// `total_output_duration(slices) = Σ slice_output_duration(sᵢ)`.
pub fn total_output_duration(slices: &[Slice]) -> i64 {
    slices.iter().map(slice_output_duration).sum()
}

/// Maps an output time to the slice that covers it and the corresponding
/// source time within that slice.
///
/// Returns `(-1, 0)` for an empty slice list. `t_out` is clamped to
/// `[0, total_output_duration]` before mapping, so a time past the end
/// resolves to the last slice's `source_end_ms`.
pub fn output_to_source(slices: &[Slice], t_out: i64) -> (i64, i64) {
    if slices.is_empty() {
        return (-1, 0);
    }

    let total = total_output_duration(slices);
    let t_out = t_out.clamp(0, total);

    let mut acc = 0i64;
    for (i, slice) in slices.iter().enumerate() {
        let duration = slice_output_duration(slice);
        let next_acc = acc + duration;
        if t_out < next_acc || i == slices.len() - 1 {
            let offset_ms = (t_out - acc) as f64;
            let source_time_ms = slice.source_start_ms + round_half_to_even(offset_ms * slice.time_scale);
            let source_time_ms = source_time_ms.min(slice.source_end_ms);
            return (i as i64, source_time_ms);
        }
        acc = next_acc;
    }

    // Unreachable: the last-index fallback above always matches.
    let last = slices.len() - 1;
    ((last) as i64, slices[last].source_end_ms)
}

/// Inverse of [`output_to_source`] for a single, known slice index: maps a
/// source time within slice `i` back to output time.
pub fn source_to_output(slices: &[Slice], i: usize, source_ms: i64) -> i64 {
    let output_start: i64 = slices[..i].iter().map(slice_output_duration).sum();
    let slice = &slices[i];
    let offset_source = (source_ms - slice.source_start_ms) as f64;
    output_start + round_half_to_even(offset_source / slice.time_scale)
}

/// A single O(n) pass producing each slice's position on the output
/// timeline, the only function UI/layout layers need.
pub fn render_infos(slices: &[Slice]) -> Vec<SliceRenderInfo> {
    let mut acc = 0i64;
    slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            let duration = slice_output_duration(slice);
            let output_start = acc;
            acc += duration;
            SliceRenderInfo {
                index,
                output_start,
                output_end: acc,
                output_duration: duration,
            }
        })
        .collect()
}

/// Round-half-to-even ("banker's rounding") to the nearest integer. Used
/// only at final-result boundaries, never on intermediate arithmetic.
fn round_half_to_even(value: f64) -> i64 {
    let floor = value.floor();
    let diff = value - floor;
    let floor_i = floor as i64;
    if diff < 0.5 {
        floor_i
    } else if diff > 0.5 {
        floor_i + 1
    } else if floor_i % 2 == 0 {
        floor_i
    } else {
        floor_i + 1
    }
}
