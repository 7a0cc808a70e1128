use std::str::FromStr;

use super::named;

/// Error returned when a color name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("unknown color `{0}`")]
    Unknown(String),
}

/// Premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a`.
///
/// Components are written to the surface unmodified, so a color built from
/// sRGB bytes appears with exactly those bytes on screen.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    #[inline]
    pub const fn red() -> Self {
        Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    /// Resolves a color name (`"red"`, `"darkgray"`, ...) or a hex string
    /// (`"#ff8000"`, `"#ff800080"`). Matching ignores case, spaces and underscores.
    pub fn named(name: &str) -> Result<Self, ColorError> {
        let [r, g, b, a] = named::lookup(name).ok_or_else(|| ColorError::Unknown(name.to_string()))?;
        Ok(Self::from_srgb_u8(r, g, b, a))
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Scales the color's alpha by `opacity` (clamped to `[0, 1]`).
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let k = opacity.clamp(0.0, 1.0);
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a * k,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::named(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_resolve() {
        assert_eq!(Color::named("white").unwrap(), Color::white());
        assert_eq!(Color::named("Red").unwrap(), Color::red());
        assert_eq!("black".parse::<Color>().unwrap(), Color::black());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = Color::named("not-a-color").unwrap_err();
        assert_eq!(err, ColorError::Unknown("not-a-color".to_string()));
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn opacity_scales_premultiplied_channels() {
        let c = Color::red().with_opacity(0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.0, 0.0, 0.5));
        assert_eq!(c.to_straight(), (1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(Color::white().with_opacity(3.0), Color::white());
        assert_eq!(Color::white().with_opacity(-1.0).a, 0.0);
    }
}
