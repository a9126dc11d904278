//! Audio clip drivers

pub mod table;
pub mod wav;

pub use table::{ClipEntry, ClipTable};
pub use wav::{Samples, WavClip, WavError};
