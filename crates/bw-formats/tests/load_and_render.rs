//! Load a file from disk, play it through the engine and encode the result.

use std::fs;
use std::sync::Arc;

use bw_engine::Engine;
use bw_formats::{load_media, write_wav};
use bw_ir::FrameGeometry;

#[test]
fn file_round_trips_to_wav() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.bin");
    // A square wave: a frame of 0xFF followed by a frame of 0x00
    let mut bytes = vec![0xFFu8; 64];
    bytes.extend(vec![0x00u8; 64]);
    fs::write(&input, &bytes).unwrap();

    let media = load_media(&input, FrameGeometry::new(8, 8)).unwrap();
    assert_eq!(media.total_frames(), 2);

    // 64 bytes per frame at 1 fps and 64 Hz: one byte per sample
    let mut engine = Engine::new(Arc::new(media), 64, 1.0);
    let frames = engine.render_frames(128);

    let output = dir.path().join("out.wav");
    let mut file = fs::File::create(&output).unwrap();
    write_wav(&mut file, &frames, 64).unwrap();
    drop(file);

    let wav = fs::read(&output).unwrap();
    assert_eq!(wav.len(), 44 + 128 * 4);

    // Sample 0 is byte 1 (0xFF), sample 63 is byte 64 (0x00)
    let first = i16::from_le_bytes([wav[44], wav[45]]);
    let low = i16::from_le_bytes([wav[44 + 63 * 4], wav[45 + 63 * 4]]);
    assert!(first > 32_000);
    assert_eq!(low, -32767);
}
