//! PNG export of mapped frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use bw_engine::FrameImage;

/// Error type for image export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Write an RGB image as an 8-bit PNG.
pub fn write_png(path: &Path, image: &FrameImage) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.pixels())?;
    writer.finish()?;
    log::info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
