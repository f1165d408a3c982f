//! Error types
//!
//! Errors are layered the same way the data flows: the cursor only knows
//! byte offsets, the table layer knows which table it was reading, and the
//! glyph layer attaches the glyph id so a failure can be diagnosed from the
//! message alone.

use crate::GlyphId;

/// Binary cursor error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("truncated table: {width} byte read at offset {offset} exceeds length {len}")]
    TruncatedTable {
        offset: usize,
        width: usize,
        len: usize,
    },
}

/// Font-level parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("invalid sfnt magic 0x{0:08X}")]
    InvalidMagic(u32),

    #[error("required table not found: {0}")]
    TableNotFound(&'static str),

    #[error("invalid indexToLocFormat {0}")]
    InvalidIndexFormat(i16),

    #[error("unitsPerEm is zero")]
    ZeroUnitsPerEm,

    #[error("face index {index} out of range ({count} faces)")]
    FaceIndexOutOfRange { index: u32, count: u32 },

    #[error(transparent)]
    Truncated(#[from] ReadError),
}

/// Per-glyph decode or fill error
///
/// None of these are fatal to the process; a caller rendering many glyphs
/// can skip the failing one and keep going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GlyphError {
    #[error("glyph {glyph_id}: truncated table, {width} byte read at offset {offset} exceeds length {len}")]
    TruncatedTable {
        glyph_id: GlyphId,
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("glyph {glyph_id}: unknown glyph, font has {glyph_count} glyphs")]
    UnknownGlyph { glyph_id: GlyphId, glyph_count: u32 },

    #[error("glyph {glyph_id}: location offset {offset} outside outline table of {table_len} bytes")]
    InvalidLocationOffset {
        glyph_id: GlyphId,
        offset: usize,
        table_len: usize,
    },

    #[error("glyph {glyph_id}: composite glyphs are not supported (contour count {contour_count})")]
    UnsupportedCompositeGlyph { glyph_id: GlyphId, contour_count: i16 },

    #[error("glyph {glyph_id}: invalid contour count {contour_count} for non-empty glyph")]
    InvalidContourCount { glyph_id: GlyphId, contour_count: i16 },

    #[error("glyph {glyph_id}: contour {contour} has no points")]
    InvalidContourEnds { glyph_id: GlyphId, contour: usize },

    #[error("glyph {glyph_id}: flag run at offset {offset} yields {decoded} points, {declared} declared")]
    MalformedFlagStream {
        glyph_id: GlyphId,
        offset: usize,
        declared: usize,
        decoded: usize,
    },

    #[error("glyph {glyph_id}: odd intersection count {intersections} on scanline {scanline}")]
    DegenerateFillState {
        glyph_id: GlyphId,
        scanline: u32,
        intersections: usize,
    },
}

impl GlyphError {
    /// Attach a glyph id to a cursor error
    pub fn truncated(glyph_id: GlyphId, err: ReadError) -> Self {
        let ReadError::TruncatedTable { offset, width, len } = err;
        GlyphError::TruncatedTable {
            glyph_id,
            offset,
            width,
            len,
        }
    }

    /// Glyph the error belongs to
    pub fn glyph_id(&self) -> GlyphId {
        match *self {
            GlyphError::TruncatedTable { glyph_id, .. }
            | GlyphError::UnknownGlyph { glyph_id, .. }
            | GlyphError::InvalidLocationOffset { glyph_id, .. }
            | GlyphError::UnsupportedCompositeGlyph { glyph_id, .. }
            | GlyphError::InvalidContourCount { glyph_id, .. }
            | GlyphError::InvalidContourEnds { glyph_id, .. }
            | GlyphError::MalformedFlagStream { glyph_id, .. }
            | GlyphError::DegenerateFillState { glyph_id, .. } => glyph_id,
        }
    }
}

/// Scanline fill error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    #[error("odd intersection count {intersections} on scanline {scanline}")]
    DegenerateFillState { scanline: u32, intersections: usize },
}

impl FillError {
    /// Attach a glyph id
    pub fn for_glyph(self, glyph_id: GlyphId) -> GlyphError {
        let FillError::DegenerateFillState {
            scanline,
            intersections,
        } = self;
        GlyphError::DegenerateFillState {
            glyph_id,
            scanline,
            intersections,
        }
    }
}
