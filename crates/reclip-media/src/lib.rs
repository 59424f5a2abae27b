//! FFmpeg CLI wrapper for the reclip pipeline.
//!
//! Provides probing (`ffprobe`), clip materialization, and audio
//! extraction as thin async wrappers over the command-line tools.
//! All operations carry a bounded timeout.

pub mod audio;
pub mod command;
pub mod error;
pub mod probe;
pub mod segment;

pub use audio::extract_audio;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_source, SourceInfo};
pub use segment::cut_segment;
