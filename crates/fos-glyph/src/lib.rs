//! fOS Glyph - TrueType Outline Rasterizer
//!
//! Turns one simple TrueType glyph into a filled pixel buffer:
//! - Bounds-checked big-endian table reading
//! - glyf/loca outline decoding (run-length flags, delta coordinates)
//! - Quadratic curve flattening with implied on-curve points
//! - Even-odd scanline fill
//!
//! # Example
//! ```rust,ignore
//! use fos_glyph::{FontTables, GlyphId, GlyphRasterizer, RasterConfig};
//!
//! let tables = FontTables::parse(&font_data)?;
//! let rasterizer = GlyphRasterizer::new(RasterConfig::default().with_em_size(48.0));
//! let glyph = rasterizer.rasterize(&tables, GlyphId(36))?;
//! println!("{}x{}", glyph.width(), glyph.height());
//! ```

pub mod reader;
pub mod tables;
pub mod outline;
pub mod glyf;
pub mod flatten;
pub mod raster;
mod canvas;
mod config;
mod error;
mod font;
mod render;

use std::fmt;

pub use canvas::{Color, PixelBuffer};
pub use config::RasterConfig;
pub use error::{FillError, GlyphError, ReadError, TableError};
pub use flatten::{Segment, DEFAULT_SUBDIVISIONS, MAX_SUBDIVISIONS};
pub use font::FontTables;
pub use glyf::decode_glyph;
pub use outline::{BoundingBox, Contour, GlyphOutline, Point};
pub use raster::Rasterizer;
pub use reader::FontReader;
pub use render::{render_glyph, render_glyphs, GlyphRasterizer, RasterizedGlyph};
pub use tables::IndexFormat;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Glyph identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GlyphId(pub u16);

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for GlyphId {
    fn from(id: u16) -> Self {
        GlyphId(id)
    }
}
