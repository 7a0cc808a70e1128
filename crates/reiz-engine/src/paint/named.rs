/// Named colors as straight sRGB bytes.
///
/// Keys are lowercase with spaces and underscores removed.
const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("darkred", [139, 0, 0]),
    ("olive", [128, 128, 0]),
    ("navy", [0, 0, 128]),
    ("darkblue", [0, 0, 139]),
    ("lightblue", [173, 216, 230]),
    ("darkgreen", [0, 100, 0]),
    ("lightgreen", [144, 238, 144]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("orange", [255, 165, 0]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("gold", [255, 215, 0]),
    ("violet", [238, 130, 238]),
];

/// Resolves a color name or `#rrggbb` / `#rrggbbaa` string to straight RGBA bytes.
pub(super) fn lookup(name: &str) -> Option<[u8; 4]> {
    let trimmed = name.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }

    let key: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    NAMED
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, [r, g, b])| [*r, *g, *b, 255])
}

fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Some([byte(0)?, byte(2)?, byte(4)?, a])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_separators() {
        assert_eq!(lookup("Dark Gray"), Some([169, 169, 169, 255]));
        assert_eq!(lookup("light_blue"), Some([173, 216, 230, 255]));
    }

    #[test]
    fn hex_strings_parse() {
        assert_eq!(lookup("#ff8000"), Some([255, 128, 0, 255]));
        assert_eq!(lookup("#00000080"), Some([0, 0, 0, 128]));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(lookup("#fff"), None);
        assert_eq!(lookup("#gg0000"), None);
    }
}
