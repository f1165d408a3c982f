//! Glyph outline decoding (glyf/loca tables)
//!
//! A simple glyph record is laid out as
//!
//! ```text
//! numberOfContours  i16
//! xMin yMin xMax yMax  i16 x 4
//! endPtsOfContours  u16[numberOfContours]
//! instructionLength u16
//! instructions      u8[instructionLength]
//! flags             u8[], run-length encoded
//! xCoordinates      u8 | i16 deltas
//! yCoordinates      u8 | i16 deltas
//! ```
//!
//! The x and y arrays are stored back to back, so the flag stream has to be
//! walked once to learn how many bytes the x array occupies before the y
//! array can be located. Offsets in [`GlyphError::TruncatedTable`] are
//! relative to the start of the glyph record.

use crate::error::{GlyphError, ReadError};
use crate::font::FontTables;
use crate::outline::{BoundingBox, Contour, GlyphOutline, Point};
use crate::reader::FontReader;
use crate::GlyphId;

/// Simple glyph flag bits
pub mod flags {
    pub const ON_CURVE_POINT: u8 = 0x01;
    pub const X_SHORT_VECTOR: u8 = 0x02;
    pub const Y_SHORT_VECTOR: u8 = 0x04;
    pub const REPEAT_FLAG: u8 = 0x08;
    pub const X_IS_SAME_OR_POSITIVE: u8 = 0x10;
    pub const Y_IS_SAME_OR_POSITIVE: u8 = 0x20;
}

use flags::*;

/// Decode one glyph into contours in pixel space
///
/// Points are translated by `(-xMin, -yMin)` and scaled by
/// `em_size / unitsPerEm`. An empty location range gives an outline with
/// no contours.
pub fn decode_glyph(
    tables: &FontTables<'_>,
    glyph_id: GlyphId,
    em_size: f32,
) -> Result<GlyphOutline, GlyphError> {
    let range = tables.glyph_range(glyph_id)?;
    let units_per_em = tables.units_per_em();
    let scale = tables.scale(em_size);

    if range.is_empty() {
        tracing::debug!("Glyph {} is empty", glyph_id);
        return Ok(GlyphOutline {
            contours: Vec::new(),
            bbox: BoundingBox::default(),
            units_per_em,
            scale,
        });
    }

    let outline = decode_simple_glyph(&tables.glyf()[range], glyph_id, units_per_em, scale)?;
    tracing::debug!(
        "Decoded glyph {}: {} contours, {} points",
        glyph_id,
        outline.contours.len(),
        outline.point_count()
    );
    Ok(outline)
}

/// Decode a single glyph record
pub fn decode_simple_glyph(
    data: &[u8],
    glyph_id: GlyphId,
    units_per_em: u16,
    scale: f32,
) -> Result<GlyphOutline, GlyphError> {
    let truncated = |e| GlyphError::truncated(glyph_id, e);
    let mut reader = FontReader::new(data);

    let contour_count = reader.read_i16().map_err(truncated)?;
    let bbox = BoundingBox {
        x_min: reader.read_i16().map_err(truncated)?,
        y_min: reader.read_i16().map_err(truncated)?,
        x_max: reader.read_i16().map_err(truncated)?,
        y_max: reader.read_i16().map_err(truncated)?,
    };

    if contour_count < 0 {
        return Err(GlyphError::UnsupportedCompositeGlyph {
            glyph_id,
            contour_count,
        });
    }
    if contour_count == 0 {
        return Err(GlyphError::InvalidContourCount {
            glyph_id,
            contour_count,
        });
    }

    // Read end points of contours
    let mut end_points: Vec<u16> = Vec::with_capacity(contour_count as usize);
    for contour in 0..contour_count as usize {
        let end = reader.read_u16().map_err(truncated)?;
        if end_points.last().is_some_and(|&prev| end <= prev) {
            return Err(GlyphError::InvalidContourEnds { glyph_id, contour });
        }
        end_points.push(end);
    }
    let num_points = end_points.last().map_or(0, |&end| end as usize + 1);

    // Skip instructions
    let instruction_length = reader.read_u16().map_err(truncated)?;
    reader.skip(instruction_length as usize).map_err(truncated)?;

    // First pass: expand flags and size the coordinate arrays
    let mut point_flags: Vec<u8> = Vec::with_capacity(num_points);
    let mut x_len = 0usize;
    let mut y_len = 0usize;
    while point_flags.len() < num_points {
        let offset = reader.pos();
        let flag = reader.read_u8().map_err(truncated)?;
        let repeat = if flag & REPEAT_FLAG != 0 {
            reader.read_u8().map_err(truncated)? as usize + 1
        } else {
            1
        };

        let decoded = point_flags.len() + repeat;
        if decoded > num_points {
            return Err(GlyphError::MalformedFlagStream {
                glyph_id,
                offset,
                declared: num_points,
                decoded,
            });
        }

        x_len += repeat * coordinate_width(flag, X_SHORT_VECTOR, X_IS_SAME_OR_POSITIVE);
        y_len += repeat * coordinate_width(flag, Y_SHORT_VECTOR, Y_IS_SAME_OR_POSITIVE);
        point_flags.resize(decoded, flag);
    }

    // Second pass: accumulate deltas from both arrays in lockstep
    let x_start = reader.pos();
    let mut xs = FontReader::at(data, x_start);
    let mut ys = FontReader::at(data, x_start + x_len);
    tracing::trace!(
        "Glyph {}: {} flags, x array {} bytes at {}, y array {} bytes",
        glyph_id,
        point_flags.len(),
        x_len,
        x_start,
        y_len
    );

    // Delta sums can reach -2^31 before translation
    let x_min = bbox.x_min as i64;
    let y_min = bbox.y_min as i64;
    let mut x = 0i64;
    let mut y = 0i64;
    let mut points = Vec::with_capacity(num_points);
    for &flag in &point_flags {
        x += read_delta(&mut xs, flag, X_SHORT_VECTOR, X_IS_SAME_OR_POSITIVE).map_err(truncated)? as i64;
        y += read_delta(&mut ys, flag, Y_SHORT_VECTOR, Y_IS_SAME_OR_POSITIVE).map_err(truncated)? as i64;
        points.push(Point {
            x: (x - x_min) as f32 * scale,
            y: (y - y_min) as f32 * scale,
            on_curve: flag & ON_CURVE_POINT != 0,
        });
    }

    // Split into contours
    let mut points = points.into_iter();
    let mut start = 0usize;
    let contours = end_points
        .iter()
        .map(|&end| {
            let end = end as usize + 1;
            let contour = Contour::new(points.by_ref().take(end - start).collect());
            start = end;
            contour
        })
        .collect();

    Ok(GlyphOutline {
        contours,
        bbox,
        units_per_em,
        scale,
    })
}

/// Bytes stored per point for one axis: 1 (short), 0 (same), or 2 (i16)
fn coordinate_width(flag: u8, short: u8, same_or_positive: u8) -> usize {
    if flag & short != 0 {
        1
    } else if flag & same_or_positive != 0 {
        0
    } else {
        2
    }
}

fn read_delta(
    reader: &mut FontReader<'_>,
    flag: u8,
    short: u8,
    same_or_positive: u8,
) -> Result<i32, ReadError> {
    if flag & short != 0 {
        let magnitude = reader.read_u8()? as i32;
        Ok(if flag & same_or_positive != 0 {
            magnitude
        } else {
            -magnitude
        })
    } else if flag & same_or_positive != 0 {
        Ok(0)
    } else {
        Ok(reader.read_i16()? as i32)
    }
}
