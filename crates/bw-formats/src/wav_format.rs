//! WAV encoding for rendered audio (16-bit stereo PCM).

use bw_engine::Frame;
use std::io::{self, Write};

use crate::FormatError;

const NUM_CHANNELS: u16 = 2;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = NUM_CHANNELS * (BITS_PER_SAMPLE / 8);
/// Header bytes counted by the RIFF size field besides the data.
const RIFF_OVERHEAD: u32 = 36;

/// Most frames a single WAV file can describe.
pub const MAX_WAV_FRAMES: usize = ((u32::MAX - RIFF_OVERHEAD) / BLOCK_ALIGN as u32) as usize;

/// Data chunk size and byte rate, if both fit the 32-bit header fields.
fn wav_sizes(frames: usize, sample_rate: u32) -> Result<(u32, u32), FormatError> {
    let too_long = || FormatError::TooLong {
        frames: frames as u64,
        sample_rate,
    };
    let data_size = u32::try_from(frames)
        .ok()
        .and_then(|n| n.checked_mul(BLOCK_ALIGN as u32))
        .filter(|size| *size <= u32::MAX - RIFF_OVERHEAD)
        .ok_or_else(too_long)?;
    let byte_rate = sample_rate
        .checked_mul(BLOCK_ALIGN as u32)
        .ok_or_else(too_long)?;
    Ok((data_size, byte_rate))
}

/// Fail early when `frames` at `sample_rate` cannot be written as WAV.
pub fn check_wav_fits(frames: usize, sample_rate: u32) -> Result<(), FormatError> {
    wav_sizes(frames, sample_rate).map(|_| ())
}

pub fn write_wav(w: &mut impl Write, frames: &[Frame], sample_rate: u32) -> io::Result<()> {
    let (data_size, byte_rate) = wav_sizes(frames.len(), sample_rate)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    write_riff_header(w, data_size)?;
    write_fmt_chunk(w, sample_rate, byte_rate)?;
    write_data_chunk(w, frames, data_size)
}

pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> Result<Vec<u8>, FormatError> {
    check_wav_fits(frames.len(), sample_rate)?;
    let mut buf = Vec::with_capacity(44 + frames.len() * BLOCK_ALIGN as usize);
    write_wav(&mut buf, frames, sample_rate)?;
    Ok(buf)
}

fn write_riff_header(w: &mut impl Write, data_size: u32) -> io::Result<()> {
    w.write_all(b"RIFF")?;
    w.write_all(&(RIFF_OVERHEAD + data_size).to_le_bytes())?;
    w.write_all(b"WAVE")
}

fn write_fmt_chunk(w: &mut impl Write, sample_rate: u32, byte_rate: u32) -> io::Result<()> {
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    // PCM
    w.write_all(&1u16.to_le_bytes())?;
    w.write_all(&NUM_CHANNELS.to_le_bytes())?;
    w.write_all(&sample_rate.to_le_bytes())?;
    w.write_all(&byte_rate.to_le_bytes())?;
    w.write_all(&BLOCK_ALIGN.to_le_bytes())?;
    w.write_all(&BITS_PER_SAMPLE.to_le_bytes())
}

fn write_data_chunk(w: &mut impl Write, frames: &[Frame], data_size: u32) -> io::Result<()> {
    w.write_all(b"data")?;
    w.write_all(&data_size.to_le_bytes())?;
    for frame in frames {
        let [left, right] = frame.to_i16();
        w.write_all(&left.to_le_bytes())?;
        w.write_all(&right.to_le_bytes())?;
    }
    Ok(())
}
