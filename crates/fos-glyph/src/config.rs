//! Rasterization configuration

use crate::canvas::Color;
use crate::flatten::{clamp_subdivisions, DEFAULT_SUBDIVISIONS};

/// Glyph rasterization options
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    /// Target size in pixels per em
    pub em_size: f32,

    /// Line segments per quadratic curve, within `1..=MAX_SUBDIVISIONS`
    pub subdivisions: u32,

    /// Color painted inside the outline
    pub fill: Color,
}

impl RasterConfig {
    pub fn with_em_size(mut self, em_size: f32) -> Self {
        self.em_size = em_size;
        self
    }

    /// Set the curve subdivision count, clamped to `1..=MAX_SUBDIVISIONS`
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = clamp_subdivisions(subdivisions);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            em_size: 32.0,
            subdivisions: DEFAULT_SUBDIVISIONS,
            fill: Color::WHITE,
        }
    }
}
