//! Maps frames of the media to RGB pixel grids.

use alloc::vec;
use alloc::vec::Vec;
use bw_ir::{byte_to_rgb, MediaBuffer};

/// An 8-bit RGB image, row-major, three bytes per pixel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB at `(x, y)`. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Resize, reusing the allocation when possible.
    fn reshape(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width as usize * height as usize * 3, 0);
    }

    fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width as usize + x) * 3;
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }
}

/// Byte-to-colour mapper with a precomputed 256-entry lookup table.
#[derive(Clone)]
pub struct FrameMapper {
    lut: [[u8; 3]; 256],
}

impl Default for FrameMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMapper {
    pub fn new() -> Self {
        let mut lut = [[0u8; 3]; 256];
        for (v, entry) in lut.iter_mut().enumerate() {
            *entry = byte_to_rgb(v as u8).to_rgb8();
        }
        Self { lut }
    }

    /// Colour of one byte value.
    pub fn color(&self, value: u8) -> [u8; 3] {
        self.lut[value as usize]
    }

    /// Frame index shown for cursor position `pos`.
    pub fn frame_index(&self, media: &MediaBuffer, pos: f64) -> usize {
        media.frame_at(pos)
    }

    /// Render frame `index` (wrapping) into `image`, resizing it to the frame geometry.
    pub fn map_frame(&self, media: &MediaBuffer, index: usize, image: &mut FrameImage) {
        let geometry = media.geometry();
        image.reshape(geometry.width, geometry.height);
        for (dst, &v) in image.pixels.chunks_exact_mut(3).zip(media.frame(index)) {
            dst.copy_from_slice(&self.lut[v as usize]);
        }
    }

    /// Render `cols × rows` consecutive frames starting at `first`, laid out
    /// row-major. Indices past the last frame wrap to the start of the file.
    pub fn map_tiled(
        &self,
        media: &MediaBuffer,
        first: usize,
        cols: u32,
        rows: u32,
        image: &mut FrameImage,
    ) {
        let geometry = media.geometry();
        let (w, h) = (geometry.width as usize, geometry.height as usize);
        image.reshape(geometry.width * cols, geometry.height * rows);

        let total = media.total_frames();
        for tile in 0..(cols as usize * rows as usize) {
            let frame = media.frame((first + tile) % total);
            let x0 = (tile % cols as usize) * w;
            let y0 = (tile / cols as usize) * h;
            for (row, bytes) in frame.chunks_exact(w).enumerate() {
                for (col, &v) in bytes.iter().enumerate() {
                    image.put(x0 + col, y0 + row, self.lut[v as usize]);
                }
            }
        }
    }
}
