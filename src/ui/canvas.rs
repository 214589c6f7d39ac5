//! Heatmap canvas drawn behind everything else.
//!
//! Frames are mapped to colours by the controller's [`FrameMapper`] and
//! each frame pixel becomes a filled quad on the background draw list.
//!
//! [`FrameMapper`]: bw_master::FrameMapper

use bw_master::{Controller, FrameImage};
use imgui::ImColor32;

/// How frames are laid out over the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    pub cols: u32,
    pub rows: u32,
    /// Screen size of one frame pixel
    pub cell: [f32; 2],
}

impl TileLayout {
    /// Lay out frames of `frame` size over a `display` of logical pixels.
    ///
    /// Tiling keeps frame pixels at `scale` and repeats frames left to right,
    /// top to bottom, enough to cover the window (the last row and column
    /// may be cut off). Without tiling one frame is stretched to fill it.
    pub fn compute(display: [f32; 2], frame: [u32; 2], scale: f32, tiling: bool) -> Self {
        let frame = [frame[0].max(1) as f32, frame[1].max(1) as f32];
        if !tiling {
            return Self {
                cols: 1,
                rows: 1,
                cell: [display[0].max(0.0) / frame[0], display[1].max(0.0) / frame[1]],
            };
        }

        let scale = scale.max(1.0);
        let tiles = |extent: f32, size: f32| (extent / (size * scale)).ceil().max(1.0) as u32;
        Self {
            cols: tiles(display[0], frame[0]),
            rows: tiles(display[1], frame[1]),
            cell: [scale, scale],
        }
    }

    pub fn frames(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// Reusable mapping target for the heatmap.
#[derive(Default)]
pub struct Canvas {
    image: FrameImage,
}

impl Canvas {
    /// Map frames from the cursor onwards and draw them covering the window.
    pub fn draw(
        &mut self,
        ui: &imgui::Ui,
        controller: &Controller,
        scale: f32,
        tiling: bool,
    ) -> TileLayout {
        let display = ui.io().display_size;
        let geometry = controller.media().geometry();
        let layout = TileLayout::compute(display, [geometry.width, geometry.height], scale, tiling);

        controller.map_current(layout.cols, layout.rows, &mut self.image);
        let draw_list = ui.get_background_draw_list();
        draw_image(&draw_list, &self.image, layout.cell, display);
        layout
    }
}

/// Draw `image` from the top-left corner, merging horizontal runs of one colour.
fn draw_image(
    draw_list: &imgui::DrawListMut<'_>,
    image: &FrameImage,
    cell: [f32; 2],
    display: [f32; 2],
) {
    for y in 0..image.height() {
        let top = y as f32 * cell[1];
        if top >= display[1] {
            break;
        }

        let mut x = 0;
        while x < image.width() {
            let left = x as f32 * cell[0];
            if left >= display[0] {
                break;
            }
            let color = image.pixel(x, y);
            let mut end = x + 1;
            while end < image.width() && image.pixel(end, y) == color {
                end += 1;
            }
            draw_list
                .add_rect(
                    [left, top],
                    [end as f32 * cell[0], top + cell[1]],
                    ImColor32::from_rgb(color[0], color[1], color[2]),
                )
                .filled(true)
                .build();
            x = end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_cover_window() {
        // 64x128 frames at scale 4 are 256x512 on screen
        let layout = TileLayout::compute([1024.0, 512.0], [64, 128], 4.0, true);
        assert_eq!((layout.cols, layout.rows), (4, 1));
        assert_eq!(layout.cell, [4.0, 4.0]);

        let layout = TileLayout::compute([1025.0, 513.0], [64, 128], 4.0, true);
        assert_eq!((layout.cols, layout.rows), (5, 2));
        assert_eq!(layout.frames(), 10);
    }

    #[test]
    fn single_frame_stretches() {
        let layout = TileLayout::compute([910.0, 256.0], [455, 256], 2.0, false);
        assert_eq!(layout.frames(), 1);
        assert_eq!(layout.cell, [2.0, 1.0]);
    }

    #[test]
    fn empty_window_still_maps_one_frame() {
        let layout = TileLayout::compute([0.0, 0.0], [64, 128], 4.0, true);
        assert_eq!(layout.frames(), 1);
        let layout = TileLayout::compute([0.0, 0.0], [64, 128], 4.0, false);
        assert_eq!(layout.frames(), 1);
        assert_eq!(layout.cell, [0.0, 0.0]);
    }

    #[test]
    fn scale_below_one_is_clamped() {
        let layout = TileLayout::compute([128.0, 128.0], [64, 128], 0.5, true);
        assert_eq!((layout.cols, layout.rows), (2, 1));
        assert_eq!(layout.cell, [1.0, 1.0]);
    }
}
