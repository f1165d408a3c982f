//! Scanline polygon fill
//!
//! Every integer scanline `y` is intersected with every non-horizontal
//! segment. A segment covers `y` when `y` lies in the half-open range
//! `[min(y0, y1), max(y0, y1))`, so a vertex shared by two segments is
//! counted once when the outline passes through it and twice or not at all
//! at a local extremum. Closed contours therefore always give an even
//! count, and spans are filled pairwise with the even-odd rule.

use crate::canvas::{Color, PixelBuffer};
use crate::error::FillError;
use crate::flatten::Segment;
use crate::outline::lerp;

/// Even-odd scanline rasterizer
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    fill: Color,
}

impl Rasterizer {
    /// Create a rasterizer painting with `fill`
    pub fn new(fill: Color) -> Self {
        Self { fill }
    }

    /// Fill closed polylines into a new `width x height` buffer
    pub fn fill(&self, segments: &[Segment], width: u32, height: u32) -> Result<PixelBuffer, FillError> {
        tracing::debug!(
            "Rasterizing {} segments into {}x{}",
            segments.len(),
            width,
            height
        );

        let mut buffer = PixelBuffer::new(width, height);
        let mut intersections = Vec::with_capacity(segments.len());

        for y in 0..height {
            collect_intersections(segments, y as f32, &mut intersections);
            if intersections.len() % 2 != 0 {
                return Err(FillError::DegenerateFillState {
                    scanline: y,
                    intersections: intersections.len(),
                });
            }

            for pair in intersections.chunks_exact(2) {
                buffer.fill_span(y, span_edge(pair[0]), span_edge(pair[1]), self.fill);
            }
        }

        Ok(buffer)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

/// Sorted x intersections of a scanline with the outline
pub fn scanline_intersections(segments: &[Segment], y: f32) -> Vec<f32> {
    let mut out = Vec::new();
    collect_intersections(segments, y, &mut out);
    out
}

fn collect_intersections(segments: &[Segment], y: f32, out: &mut Vec<f32>) {
    out.clear();
    for segment in segments {
        let (start, end) = (segment.start, segment.end);
        let dy = end.y - start.y;
        if dy == 0.0 {
            continue;
        }

        let (low, high) = if dy > 0.0 { (start.y, end.y) } else { (end.y, start.y) };
        if y < low || y >= high {
            continue;
        }

        let t = ((y - start.y) / dy).clamp(0.0, 1.0);
        out.push(lerp(start.x, end.x, t));
    }
    // Stable, so equal x keep segment order
    out.sort_by(|a, b| a.total_cmp(b));
}

/// First pixel column at or right of `x`
#[inline]
fn span_edge(x: f32) -> u32 {
    x.ceil().max(0.0) as u32
}
