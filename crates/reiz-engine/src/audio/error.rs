use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to read audio directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("unsupported output sample format: {0}")]
    UnsupportedFormat(String),

    #[error("audio output failure: {0}")]
    Output(String),
}
