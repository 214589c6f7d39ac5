//! Audio output backends for the binwave player.

mod cpal_backend;
mod null_backend;
mod traits;

pub use cpal_backend::CpalOutput;
pub use null_backend::NullOutput;
pub use traits::{AudioError, AudioOutput, RenderBlock};
