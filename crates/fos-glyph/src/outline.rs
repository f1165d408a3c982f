//! Glyph outline data model

/// Outline point in target pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub on_curve: bool,
}

impl Point {
    pub const fn on(x: f32, y: f32) -> Self {
        Self { x, y, on_curve: true }
    }

    pub const fn off(x: f32, y: f32) -> Self {
        Self { x, y, on_curve: false }
    }

    /// Linear interpolation towards `other`; the result is on-curve
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::on(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }

    /// Implied on-curve point between two control points
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::on((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Closed sequence of points; the last point connects back to the first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Bounding box in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.x_max as i32 - self.x_min as i32
    }

    pub fn height(&self) -> i32 {
        self.y_max as i32 - self.y_min as i32
    }
}

/// A decoded simple glyph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub contours: Vec<Contour>,
    pub bbox: BoundingBox,
    pub units_per_em: u16,
    /// Font units to pixels
    pub scale: f32,
}

impl GlyphOutline {
    /// Whether the glyph has no contours (space and friends)
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Total number of points over all contours
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// Bounding box scaled to pixels: `ceil(width * scale) x ceil(height * scale)`
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            scaled_extent(self.bbox.width(), self.scale),
            scaled_extent(self.bbox.height(), self.scale),
        )
    }
}

pub(crate) fn scaled_extent(units: i32, scale: f32) -> u32 {
    (units.max(0) as f32 * scale).ceil() as u32
}
