//! Glyph rasterization pipeline
//!
//! Decode, flatten and fill one glyph at a time. Each call owns all of its
//! intermediate state, so glyphs can be rendered in parallel against one
//! shared [`FontTables`].

use crate::canvas::PixelBuffer;
use crate::config::RasterConfig;
use crate::error::GlyphError;
use crate::flatten::flatten_outline;
use crate::font::FontTables;
use crate::glyf::decode_glyph;
use crate::outline::{scaled_extent, BoundingBox};
use crate::raster::Rasterizer;
use crate::GlyphId;

/// A rasterized glyph
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    /// Glyph ID
    pub glyph_id: GlyphId,
    /// Outline bounding box in font units, `None` for empty glyphs
    pub bbox: Option<BoundingBox>,
    /// Pixel offset of the buffer's bottom-left corner from the glyph origin
    pub origin: (f32, f32),
    /// Filled pixels
    pub buffer: PixelBuffer,
}

impl RasterizedGlyph {
    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }
}

/// Glyph rasterizer
#[derive(Debug, Clone, Default)]
pub struct GlyphRasterizer {
    pub config: RasterConfig,
}

impl GlyphRasterizer {
    /// Create a new rasterizer
    pub fn new(config: RasterConfig) -> Self {
        Self { config }
    }

    /// Rasterize one glyph
    ///
    /// An empty glyph gives a blank buffer sized to its advance width and
    /// the font's ascender-to-descender extent, or 0x0 without metrics.
    pub fn rasterize(&self, tables: &FontTables<'_>, glyph_id: GlyphId) -> Result<RasterizedGlyph, GlyphError> {
        let outline = decode_glyph(tables, glyph_id, self.config.em_size)?;
        let scale = outline.scale;

        if outline.is_empty() {
            let (width, height) = match (tables.metrics(), tables.advance(glyph_id)) {
                (Some(metrics), Some(advance)) => (
                    scaled_extent(advance as i32, scale),
                    scaled_extent(metrics.line_extent(), scale),
                ),
                _ => (0, 0),
            };
            return Ok(RasterizedGlyph {
                glyph_id,
                bbox: None,
                origin: (0.0, 0.0),
                buffer: PixelBuffer::new(width, height),
            });
        }

        let segments = flatten_outline(&outline, self.config.subdivisions);
        let (width, height) = outline.pixel_size();
        let buffer = Rasterizer::new(self.config.fill)
            .fill(&segments, width, height)
            .map_err(|e| e.for_glyph(glyph_id))?;

        Ok(RasterizedGlyph {
            glyph_id,
            bbox: Some(outline.bbox),
            origin: (outline.bbox.x_min as f32 * scale, outline.bbox.y_min as f32 * scale),
            buffer,
        })
    }

    /// Rasterize many glyphs, one result per id in input order
    ///
    /// A failing glyph is logged and reported in its slot; the others are
    /// unaffected.
    pub fn rasterize_many(
        &self,
        tables: &FontTables<'_>,
        glyph_ids: &[GlyphId],
    ) -> Vec<Result<RasterizedGlyph, GlyphError>> {
        let render = |&glyph_id: &GlyphId| {
            let result = self.rasterize(tables, glyph_id);
            if let Err(err) = &result {
                tracing::warn!("Skipping glyph {}: {}", glyph_id, err);
            }
            result
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            glyph_ids.par_iter().map(render).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            glyph_ids.iter().map(render).collect()
        }
    }
}

/// Rasterize one glyph with the given configuration
pub fn render_glyph(
    tables: &FontTables<'_>,
    glyph_id: GlyphId,
    config: &RasterConfig,
) -> Result<PixelBuffer, GlyphError> {
    GlyphRasterizer::new(config.clone())
        .rasterize(tables, glyph_id)
        .map(|glyph| glyph.buffer)
}

/// Rasterize many glyphs with the given configuration
pub fn render_glyphs(
    tables: &FontTables<'_>,
    glyph_ids: &[GlyphId],
    config: &RasterConfig,
) -> Vec<Result<PixelBuffer, GlyphError>> {
    GlyphRasterizer::new(config.clone())
        .rasterize_many(tables, glyph_ids)
        .into_iter()
        .map(|result| result.map(|glyph| glyph.buffer))
        .collect()
}
