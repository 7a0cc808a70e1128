//! Auditory stimuli.
//!
//! - `AudioClip`: a decoded WAV file (or generated tone) as interleaved `f32`
//! - `AudioLibrary`: every clip of a directory, keyed by sanitized file name
//! - `Speaker`: plays one clip at a time on the default output device

mod clip;
mod error;
mod library;
mod speaker;

pub use clip::AudioClip;
pub use error::AudioError;
pub use library::{AudioLibrary, MEDIA_DIR_ENV, default_path, sanitize_key};
pub use speaker::{Speaker, fill_buffer};
