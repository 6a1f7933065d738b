//! Layout-to-rect resolution: turns the active [`Layout`] plus a viewport
//! size into concrete screen/camera pixel rects.

use reeltime_common::config::CAMERA_OVERLAY_PADDING_PX;
use reeltime_project_model::{Layout, LayoutType};

/// An axis-aligned pixel rect within the output viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Resolved screen/camera placement for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRenderInfo {
    pub layout_type: LayoutType,
    /// `None` when the layout type hides the screen entirely.
    pub screen_rect: Option<Rect>,
    /// `None` when the layout type hides the camera entirely.
    pub camera_rect: Option<Rect>,
}

/// Horizontal gap, in pixels, between the two halves of a `side-by-side`
/// layout.
pub const SIDE_BY_SIDE_GAP_PX: f64 = 8.0;

/// Locates the layout covering output time `t_out`. Layouts are
/// contiguous and sorted by `start_time`, so a binary search on
/// `start_time` suffices.
pub fn find_layout_at(layouts: &[Layout], t_out: i64) -> Option<&Layout> {
    if layouts.is_empty() {
        return None;
    }
    let idx = layouts.partition_point(|l| l.start_time <= t_out);
    if idx == 0 {
        return None;
    }
    layouts.get(idx - 1)
}

/// Compute screen/camera rects for `layout` within a `viewport_w ×
/// viewport_h` container. `camera_aspect_ratio` is the camera source's own
/// `width / height`, needed to size a `screen-with-camera` overlay from
/// `camera_size` alone.
pub fn resolve_layout_rects(layout: &Layout, viewport_w: f64, viewport_h: f64, camera_aspect_ratio: f64) -> LayoutRenderInfo {
    let full = Rect {
        x: 0.0,
        y: 0.0,
        w: viewport_w,
        h: viewport_h,
    };

    match layout.layout_type {
        LayoutType::ScreenOnly => LayoutRenderInfo {
            layout_type: layout.layout_type,
            screen_rect: Some(full),
            camera_rect: None,
        },
        LayoutType::CameraOnly => LayoutRenderInfo {
            layout_type: layout.layout_type,
            screen_rect: None,
            camera_rect: Some(full),
        },
        LayoutType::SideBySide => {
            let half_w = (viewport_w - SIDE_BY_SIDE_GAP_PX) / 2.0;
            let screen_rect = Rect {
                x: 0.0,
                y: 0.0,
                w: half_w,
                h: viewport_h,
            };
            let camera_rect = Rect {
                x: half_w + SIDE_BY_SIDE_GAP_PX,
                y: 0.0,
                w: half_w,
                h: viewport_h,
            };
            LayoutRenderInfo {
                layout_type: layout.layout_type,
                screen_rect: Some(screen_rect),
                camera_rect: Some(camera_rect),
            }
        }
        LayoutType::ScreenWithCamera => {
            let camera_w = viewport_w * layout.camera_size;
            let camera_h = camera_w / camera_aspect_ratio.max(f64::EPSILON);

            let half_camera_w = camera_w / 2.0;
            let half_camera_h = camera_h / 2.0;
            let min_cx = half_camera_w + CAMERA_OVERLAY_PADDING_PX;
            let max_cx = (viewport_w - half_camera_w - CAMERA_OVERLAY_PADDING_PX).max(min_cx);
            let min_cy = half_camera_h + CAMERA_OVERLAY_PADDING_PX;
            let max_cy = (viewport_h - half_camera_h - CAMERA_OVERLAY_PADDING_PX).max(min_cy);

            let center_x = (layout.camera_position.x * viewport_w).clamp(min_cx, max_cx);
            let center_y = (layout.camera_position.y * viewport_h).clamp(min_cy, max_cy);

            let camera_rect = Rect {
                x: center_x - half_camera_w,
                y: center_y - half_camera_h,
                w: camera_w,
                h: camera_h,
            };

            LayoutRenderInfo {
                layout_type: layout.layout_type,
                screen_rect: Some(full),
                camera_rect: Some(camera_rect),
            }
        }
    }
}
