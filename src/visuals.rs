//! Visual configuration for the field.
//!
//! Three layers are painted each tick, and each has a configurable color:
//! the translucent wash that dissolves old frames into trails, the link
//! lines, and the particle glyphs. Configure with the closure passed to
//! [`Backdrop::with_visuals`](crate::Backdrop::with_visuals):
//!
//! ```ignore
//! Backdrop::new()
//!     .with_visuals(|v| {
//!         v.wash(Vec3::new(0.02, 0.02, 0.05), 0.18)
//!             .link(Vec3::new(0.3, 0.8, 1.0), 0.12)
//!             .glyph(Vec3::new(0.9, 0.6, 0.2));
//!     })
//!     .run()
//! ```

use glam::{Vec3, Vec4};

/// Colors and opacities for the three painted layers.
///
/// Defaults are a pale palette: an off-white wash over sky-blue links and
/// teal glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    /// Wash painted over the whole surface each tick. The alpha channel sets
    /// how quickly trails dissolve: higher is shorter trails.
    pub wash: Vec4,
    /// Link line color; the alpha channel is the opacity at zero separation,
    /// scaled down linearly as pairs separate.
    pub link: Vec4,
    /// Glyph fill color. Glyph opacity is modulated per particle by a slow
    /// pulse, so only the hue is configurable.
    pub glyph: Vec3,
}

impl VisualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trail wash color and dissolve rate (alpha per tick).
    pub fn wash(&mut self, color: Vec3, alpha: f32) -> &mut Self {
        self.wash = color.extend(alpha);
        self
    }

    /// Set the link line color and its opacity at zero separation.
    pub fn link(&mut self, color: Vec3, alpha: f32) -> &mut Self {
        self.link = color.extend(alpha);
        self
    }

    /// Set the glyph fill color.
    pub fn glyph(&mut self, color: Vec3) -> &mut Self {
        self.glyph = color;
        self
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            wash: Vec4::new(0.973, 0.980, 0.988, 0.23),
            link: Vec4::new(0.055, 0.647, 0.914, 0.1),
            glyph: Vec3::new(0.059, 0.463, 0.431),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let mut config = VisualConfig::new();
        config
            .wash(Vec3::new(0.0, 0.0, 0.0), 0.5)
            .link(Vec3::new(1.0, 0.0, 0.0), 0.2)
            .glyph(Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(config.wash, Vec4::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(config.link, Vec4::new(1.0, 0.0, 0.0, 0.2));
        assert_eq!(config.glyph, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_default_wash_is_translucent() {
        let config = VisualConfig::default();
        assert!(config.wash.w > 0.0 && config.wash.w < 1.0);
    }
}
