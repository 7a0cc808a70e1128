use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

/// Error returned when a font cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("failed to read font file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font `{family}`: {reason}")]
    Parse { family: String, reason: String },
}

/// Coverage bitmap of a laid-out text label (one byte per pixel, top row first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBitmap {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl LabelBitmap {
    /// Expands coverage into premultiplied white RGBA8, to be tinted at draw time.
    pub fn to_premul_rgba(&self) -> Vec<u8> {
        self.coverage.iter().flat_map(|&c| [c, c, c, c]).collect()
    }
}

/// Fonts by family name.
///
/// Families are matched case-insensitively. A family that was never
/// registered is looked up once in the system font database (fontdb),
/// which matches on the family name stored inside the font, not the file
/// name. If that fails too, the first registered font stands in.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    families: HashMap<String, usize>,
    sources: FontSources,
    db: Option<fontdb::Database>,
    missing: HashSet<String>,
}

enum FontSources {
    System,
    Dirs(Vec<PathBuf>),
}

/// Metric-compatible stand-ins shipped by common Linux distributions.
const FAMILY_ALIASES: &[(&str, &[&str])] = &[
    ("timesnewroman", &["Liberation Serif", "Tinos", "DejaVu Serif"]),
    ("arial", &["Liberation Sans", "Arimo", "DejaVu Sans"]),
    ("helvetica", &["Liberation Sans", "Arimo", "DejaVu Sans"]),
    ("couriernew", &["Liberation Mono", "Cousine", "DejaVu Sans Mono"]),
];

impl FontSystem {
    pub fn new() -> Self {
        Self {
            fonts: Vec::new(),
            families: HashMap::new(),
            sources: FontSources::System,
            db: None,
            missing: HashSet::new(),
        }
    }

    /// Looks up unregistered families in `dirs` instead of the system fonts.
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.sources = FontSources::Dirs(dirs);
        self.db = None;
        self
    }

    /// Parses and registers a TrueType/OpenType font under `family`.
    pub fn load_font(&mut self, family: &str, bytes: &[u8]) -> Result<(), FontLoadError> {
        self.load_face(family, bytes, 0)
    }

    fn load_face(&mut self, family: &str, bytes: &[u8], index: u32) -> Result<(), FontLoadError> {
        let settings = fontdue::FontSettings {
            collection_index: index,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|reason| FontLoadError::Parse {
            family: family.to_string(),
            reason: reason.to_string(),
        })?;
        let key = family_key(family);
        self.missing.remove(&key);
        self.families.insert(key, self.fonts.len());
        self.fonts.push(font);
        log::debug!("registered font family `{family}`");
        Ok(())
    }

    /// Reads a font file and registers it under `family`.
    pub fn load_font_file(&mut self, family: &str, path: impl AsRef<Path>) -> Result<(), FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_font(family, &bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains_key(&family_key(family))
    }

    /// Resolves a family to a font, trying registered fonts, then the
    /// font database, then the first registered font.
    ///
    /// With nothing registered at all, any face from the database is used
    /// so text still shows up.
    pub fn resolve(&mut self, family: &str) -> Option<&fontdue::Font> {
        let key = family_key(family);

        if !self.families.contains_key(&key) && !self.missing.contains(&key) {
            self.load_from_database(family, &key);
            if !self.families.contains_key(&key) {
                log::warn!("font family `{family}` not found; falling back to the default font");
                self.missing.insert(key.clone());
            }
        }

        if self.fonts.is_empty() {
            self.load_any_from_database();
        }

        let idx = self.families.get(&key).copied().unwrap_or(0);
        self.fonts.get(idx)
    }

    fn database(&mut self) -> &fontdb::Database {
        let sources = &self.sources;
        self.db.get_or_insert_with(|| {
            let mut db = fontdb::Database::new();
            match sources {
                FontSources::System => db.load_system_fonts(),
                FontSources::Dirs(dirs) => {
                    for dir in dirs {
                        db.load_fonts_dir(dir);
                    }
                }
            }
            log::debug!("font database holds {} faces", db.len());
            db
        })
    }

    /// Registers the best face of `family` (or of one of its aliases) under `key`.
    fn load_from_database(&mut self, family: &str, key: &str) {
        let aliases = FAMILY_ALIASES
            .iter()
            .find(|(name, _)| *name == key)
            .map_or(&[][..], |(_, aliases)| *aliases);

        let db = self.database();
        let found = std::iter::once(family)
            .chain(aliases.iter().copied())
            .find_map(|candidate| query_family(db, candidate))
            .and_then(|id| db.with_face_data(id, |data, index| (data.to_vec(), index)));

        if let Some((bytes, index)) = found {
            if let Err(e) = self.load_face(family, &bytes, index) {
                log::warn!("font `{family}` found but failed to load: {e}");
            }
        }
    }

    fn load_any_from_database(&mut self) {
        let db = self.database();
        let found = db
            .query(&fontdb::Query {
                families: &[fontdb::Family::SansSerif, fontdb::Family::Serif],
                weight: fontdb::Weight::NORMAL,
                style: fontdb::Style::Normal,
                stretch: fontdb::Stretch::Normal,
            })
            .or_else(|| db.faces().next().map(|face| face.id))
            .and_then(|id| {
                let name = db.face(id)?.families.first()?.0.clone();
                db.with_face_data(id, |data, index| (name, data.to_vec(), index))
            });

        if let Some((name, bytes, index)) = found {
            log::info!("no fonts registered; using `{name}` as the default font");
            if let Err(e) = self.load_face(&name, &bytes, index) {
                log::warn!("default font `{name}` failed to load: {e}");
            }
        }
    }

    /// Lays out `text` on a single line and rasterizes it into a coverage bitmap.
    ///
    /// Returns `None` when no font is available or the text has no visible glyphs.
    pub fn rasterize_label(&mut self, family: &str, text: &str, px: f32) -> Option<LabelBitmap> {
        if px <= 0.0 {
            return None;
        }
        let font = self.resolve(family)?;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let glyphs: Vec<_> = layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .copied()
            .collect();
        if glyphs.is_empty() {
            return None;
        }

        let min_x = glyphs.iter().map(|g| g.x).fold(f32::INFINITY, f32::min).floor();
        let min_y = glyphs.iter().map(|g| g.y).fold(f32::INFINITY, f32::min).floor();
        let max_x = glyphs.iter().map(|g| g.x + g.width as f32).fold(f32::NEG_INFINITY, f32::max).ceil();
        let max_y = glyphs.iter().map(|g| g.y + g.height as f32).fold(f32::NEG_INFINITY, f32::max).ceil();

        let width = (max_x - min_x).max(1.0) as u32;
        let height = (max_y - min_y).max(1.0) as u32;
        let mut coverage = vec![0u8; (width * height) as usize];

        for g in &glyphs {
            let (metrics, bitmap) = font.rasterize_config(g.key);
            let ox = (g.x - min_x).round() as i64;
            let oy = (g.y - min_y).round() as i64;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let x = ox + col as i64;
                    let y = oy + row as i64;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        continue;
                    }
                    let dst = &mut coverage[(y as u32 * width + x as u32) as usize];
                    *dst = (*dst).max(bitmap[row * metrics.width + col]);
                }
            }
        }

        Some(LabelBitmap { width, height, coverage })
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn family_key(family: &str) -> String {
    family
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Finds the regular face of a family by its case-insensitive name.
///
/// The database picks the closest weight/style, so a family that only
/// ships a bold file still resolves.
fn query_family(db: &fontdb::Database, family: &str) -> Option<fontdb::ID> {
    let key = family_key(family);
    let name = db
        .faces()
        .flat_map(|face| face.families.iter())
        .find(|(name, _)| family_key(name) == key)
        .map(|(name, _)| name.clone())?;

    db.query(&fontdb::Query {
        families: &[fontdb::Family::Name(&name)],
        weight: fontdb::Weight::NORMAL,
        style: fontdb::Style::Normal,
        stretch: fontdb::Stretch::Normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_keys_ignore_case_and_separators() {
        assert_eq!(family_key("Times New Roman"), "timesnewroman");
        assert_eq!(family_key("DejaVu-Sans_Mono"), "dejavusansmono");
    }

    #[test]
    fn empty_system_rasterizes_nothing() {
        let mut fonts = FontSystem::new().with_search_dirs(Vec::new());
        assert!(fonts.is_empty());
        assert!(fonts.rasterize_label("Arial", "hello", 24.0).is_none());
    }

    #[test]
    fn invalid_bytes_are_rejected() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font("Broken", b"not a font").unwrap_err();
        assert!(matches!(err, FontLoadError::Parse { .. }));
        assert!(!fonts.has_family("broken"));
    }

    /// Copies some installed face into `dir` under a name unrelated to its
    /// family. Returns the family name, or `None` on a machine without fonts.
    fn copy_system_face(dir: &Path, file_name: &str) -> Option<String> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let face = db.faces().find(|face| {
            let Some((family, _)) = face.families.first() else { return false };
            face.index == 0
                && (family.contains("Sans") || family.contains("Serif"))
                && !family.contains("Math")
                && matches!(&face.source, fontdb::Source::File(path)
                    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("ttf")))
        })?;
        let fontdb::Source::File(path) = &face.source else { return None };
        std::fs::copy(path, dir.join(file_name)).unwrap();
        Some(face.families[0].0.clone())
    }

    #[test]
    fn family_resolves_by_internal_name_not_file_name() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let Some(family) = copy_system_face(dir.path(), "renamed-face.ttf") else {
            eprintln!("no system fonts installed; skipping");
            return;
        };

        let mut fonts = FontSystem::new().with_search_dirs(vec![dir.path().to_path_buf()]);
        assert!(fonts.resolve(&family.to_uppercase()).is_some());
        assert!(fonts.has_family(&family));
        assert!(fonts.rasterize_label(&family, "Hello", 32.0).is_some());
    }

    #[test]
    fn unknown_family_falls_back_to_a_database_face() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let Some(family) = copy_system_face(dir.path(), "times.ttf") else {
            eprintln!("no system fonts installed; skipping");
            return;
        };

        let mut fonts = FontSystem::new().with_search_dirs(vec![dir.path().to_path_buf()]);
        assert!(fonts.resolve("No Such Family").is_some());
        assert!(!fonts.has_family("No Such Family"));
        assert!(fonts.has_family(&family));
    }

    #[test]
    fn missing_family_is_looked_up_once() {
        let mut fonts = FontSystem::new().with_search_dirs(Vec::new());
        assert!(fonts.resolve("Times New Roman").is_none());
        assert!(fonts.missing.contains("timesnewroman"));
        assert!(fonts.resolve("Times New Roman").is_none());
        assert_eq!(fonts.missing.len(), 1);
    }

    #[test]
    fn coverage_expands_to_premultiplied_white() {
        let label = LabelBitmap { width: 2, height: 1, coverage: vec![0, 200] };
        assert_eq!(label.to_premul_rgba(), vec![0, 0, 0, 0, 200, 200, 200, 200]);
    }
}
