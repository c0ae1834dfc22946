//! Marker colors.

use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Opaque color.
    #[must_use]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Orange shades assigned cyclically to fragments.
pub const FRAGMENT_PALETTE: [Rgba; 6] = [
    Rgba::opaque(1.0, 0.5, 0.0),
    Rgba::opaque(1.0, 0.4, 0.1),
    Rgba::opaque(1.0, 0.6, 0.2),
    Rgba::opaque(0.9, 0.3, 0.0),
    Rgba::opaque(1.0, 0.7, 0.3),
    Rgba::opaque(0.8, 0.4, 0.0),
];

/// Color for fragment `index` (`index mod 6`).
#[must_use]
pub const fn palette_color(index: usize) -> Rgba {
    FRAGMENT_PALETTE[index % FRAGMENT_PALETTE.len()]
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(palette_color(0), FRAGMENT_PALETTE[0]);
        assert_eq!(palette_color(5), FRAGMENT_PALETTE[5]);
        assert_eq!(palette_color(6), FRAGMENT_PALETTE[0]);
        assert_eq!(palette_color(13), FRAGMENT_PALETTE[1]);
    }

    #[test]
    fn palette_is_opaque() {
        assert!(FRAGMENT_PALETTE.iter().all(|c| c.a == 1.0));
    }
}
