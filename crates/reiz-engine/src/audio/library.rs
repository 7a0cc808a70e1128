use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{AudioClip, AudioError};

/// Environment variable naming the media root; clips live in its `wav/` folder.
pub const MEDIA_DIR_ENV: &str = "REIZ_MEDIA_DIR";

/// `$REIZ_MEDIA_DIR/wav`, or `./media/wav` when the variable is unset.
pub fn default_path() -> PathBuf {
    wav_dir(std::env::var_os(MEDIA_DIR_ENV))
}

fn wav_dir(media_root: Option<OsString>) -> PathBuf {
    media_root
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("media"))
        .join("wav")
}

/// Turns a file stem into a library key: parentheses are dropped, spaces
/// and dashes become underscores, surrounding whitespace is trimmed.
pub fn sanitize_key(stem: &str) -> String {
    stem.chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .map(|c| if matches!(c, ' ' | '-') { '_' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clips of one directory keyed by sanitized file stem.
#[derive(Debug, Clone, Default)]
pub struct AudioLibrary {
    clips: BTreeMap<String, AudioClip>,
}

impl AudioLibrary {
    /// Loads every file of `dir` (not recursive).
    ///
    /// Files are visited in file-name order; a later file whose key collides
    /// with an earlier one replaces it. One undecodable file fails the load.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, AudioError> {
        let dir = dir.as_ref();
        let read_err = |source| AudioError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if entry.file_type().map_err(read_err)?.is_dir() {
                continue;
            }
            files.push(entry.path());
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut clips = BTreeMap::new();
        for path in files {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let key = sanitize_key(&stem);
            let clip = AudioClip::open(&path)?;
            if clips.insert(key.clone(), clip).is_some() {
                log::warn!("audio clip `{key}` replaced by {}", path.display());
            }
        }

        log::info!("loaded {} audio clips from {}", clips.len(), dir.display());
        Ok(Self { clips })
    }

    /// Loads the library at [`default_path`].
    pub fn load_default() -> Result<Self, AudioError> {
        Self::load(default_path())
    }

    pub fn get(&self, key: &str) -> Option<&AudioClip> {
        self.clips.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.clips.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AudioClip)> {
        self.clips.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, value: i16) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..16 {
            writer.write_sample(value).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn sanitizes_keys() {
        assert_eq!(sanitize_key("A (1)"), "A_1");
        assert_eq!(sanitize_key("low-beep 2"), "low_beep_2");
        assert_eq!(sanitize_key("\tbell\t"), "bell");
        assert_eq!(sanitize_key("(x)"), "x");
    }

    #[test]
    fn colliding_keys_keep_later_file() {
        let dir = tempfile::tempdir().unwrap();
        write_wav(&dir.path().join("A (1).wav"), 100);
        write_wav(&dir.path().join("A 1.wav"), 200);

        let library = AudioLibrary::load(dir.path()).unwrap();
        assert_eq!(library.len(), 1);
        let clip = library.get("A_1").unwrap();
        assert_eq!(clip.path().and_then(|p| p.file_name()), Some(std::ffi::OsStr::new("A 1.wav")));
    }

    #[test]
    fn skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_wav(&dir.path().join("nested").join("inner.wav"), 1);
        write_wav(&dir.path().join("beep.wav"), 1);
        write_wav(&dir.path().join("high-tone.wav"), 1);

        let library = AudioLibrary::load(dir.path()).unwrap();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["beep", "high_tone"]);
        assert!(!library.contains("inner"));
    }

    #[test]
    fn undecodable_file_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_wav(&dir.path().join("good.wav"), 1);
        std::fs::write(dir.path().join("notes.txt"), b"not audio").unwrap();

        let err = AudioLibrary::load(dir.path()).unwrap_err();
        assert!(matches!(err, AudioError::Decode { ref path, .. } if path.ends_with("notes.txt")));
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = AudioLibrary::load("/no/such/reiz/dir").unwrap_err();
        assert!(matches!(err, AudioError::ReadDir { .. }));
    }

    #[test]
    fn media_root_resolution() {
        assert_eq!(wav_dir(None), PathBuf::from("media/wav"));
        assert_eq!(wav_dir(Some("/data/reiz".into())), PathBuf::from("/data/reiz/wav"));
    }
}
