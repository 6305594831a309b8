//! Sequential color ramps for class fills.

use crate::RenderError;

/// Six-step green ramp, lightest first.
pub const DEFAULT_COLORS: [&str; 6] = [
    "#99d8c9", "#66c2a4", "#41ae76", "#238b45", "#006d2c", "#00441b",
];

/// A validated list of fill colors indexed by class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Builds a palette, normalizing every color to lowercase `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty or any entry is not a hex color.
    pub fn new<S: AsRef<str>>(colors: &[S]) -> Result<Self, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyPalette);
        }

        let colors = colors
            .iter()
            .map(|c| normalize_hex(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { colors })
    }

    /// Number of classes this palette can color.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; an empty palette cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Fill color for a class, if the palette reaches that far.
    #[must_use]
    pub fn color(&self, class: usize) -> Option<&str> {
        self.colors.get(class).map(String::as_str)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(ToString::to_string).collect(),
        }
    }
}

fn normalize_hex(color: &str) -> Result<String, RenderError> {
    let invalid = || RenderError::InvalidColor(color.to_string());

    let digits = color.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match digits.len() {
        6 => Ok(format!("#{}", digits.to_ascii_lowercase())),
        3 => Ok(digits
            .chars()
            .flat_map(|c| [c, c])
            .fold(String::from("#"), |mut out, c| {
                out.push(c.to_ascii_lowercase());
                out
            })),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_constants() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.color(0), Some("#99d8c9"));
        assert_eq!(palette.color(6), None);
    }

    #[test]
    fn normalizes_colors() {
        let palette = Palette::new(&["#ABCDEF", "#f0a", " #123456 "]).unwrap();
        assert_eq!(palette.color(0), Some("#abcdef"));
        assert_eq!(palette.color(1), Some("#ff00aa"));
        assert_eq!(palette.color(2), Some("#123456"));
    }

    #[test]
    fn rejects_invalid_colors() {
        for color in ["99d8c9", "#99d8c", "#gggggg", "green", ""] {
            assert!(
                matches!(Palette::new(&[color]), Err(RenderError::InvalidColor(_))),
                "expected {color:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_palette() {
        let empty: [&str; 0] = [];
        assert!(matches!(Palette::new(&empty), Err(RenderError::EmptyPalette)));
    }
}
