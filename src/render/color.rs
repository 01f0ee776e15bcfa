//! RGBA colors for fill, stroke, and glow styles.

use serde::{Deserialize, Serialize};

/// An RGBA color: 8-bit channels, floating-point alpha in `[0, 1]`.
///
/// # Examples
///
/// ```rust
/// use meshlight::render::Rgba;
///
/// let highlight = Rgba::opaque(153, 102, 204);
/// assert_eq!(highlight.with_alpha(0.25).to_css(), "rgba(153, 102, 204, 0.25)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, `0.0` transparent to `1.0` opaque.
    pub a: f64,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Creates a color from channels and alpha.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[inline]
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// The same color with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// CSS `rgba(...)` notation, as accepted by canvas-style style strings.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formatting() {
        assert_eq!(Rgba::BLACK.to_css(), "rgba(0, 0, 0, 1)");
        assert_eq!(Rgba::new(70, 70, 70, 0.5).to_css(), "rgba(70, 70, 70, 0.5)");
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Rgba::opaque(10, 20, 30).with_alpha(0.125);
        assert_eq!((c.r, c.g, c.b), (10, 20, 30));
        assert_eq!(c.a, 0.125);
    }
}
