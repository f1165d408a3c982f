//! Byte-level font builder shared by the integration tests

#![allow(dead_code)]

/// Point in font units: (x, y, on_curve)
pub type RawPoint = (i16, i16, bool);

/// Encode a simple glyph record, compressing repeated flags
pub fn simple_glyph(contours: &[&[RawPoint]]) -> Vec<u8> {
    encode_glyph(contours, true)
}

/// Encode a simple glyph record with one flag byte per point
pub fn simple_glyph_uncompressed(contours: &[&[RawPoint]]) -> Vec<u8> {
    encode_glyph(contours, false)
}

fn encode_glyph(contours: &[&[RawPoint]], compress: bool) -> Vec<u8> {
    let points: Vec<RawPoint> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut out = Vec::new();
    push_i16(&mut out, contours.len() as i16);
    for v in [x_min, y_min, x_max, y_max] {
        push_i16(&mut out, v);
    }

    let mut end = 0u16;
    for contour in contours {
        end += contour.len() as u16;
        push_u16(&mut out, end - 1);
    }
    push_u16(&mut out, 0); // no instructions

    let mut flags = Vec::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let (mut prev_x, mut prev_y) = (0i32, 0i32);
    for &(x, y, on_curve) in &points {
        let mut flag = if on_curve { 0x01 } else { 0x00 };
        flag |= encode_delta(x as i32 - prev_x, 0x02, 0x10, &mut xs);
        flag |= encode_delta(y as i32 - prev_y, 0x04, 0x20, &mut ys);
        flags.push(flag);
        prev_x = x as i32;
        prev_y = y as i32;
    }

    if compress {
        let mut i = 0;
        while i < flags.len() {
            let flag = flags[i];
            let run = flags[i..].iter().take(256).take_while(|&&f| f == flag).count();
            if run > 1 {
                out.push(flag | 0x08);
                out.push((run - 1) as u8);
            } else {
                out.push(flag);
            }
            i += run;
        }
    } else {
        out.extend_from_slice(&flags);
    }
    out.extend_from_slice(&xs);
    out.extend_from_slice(&ys);
    out
}

fn encode_delta(delta: i32, short: u8, same_or_positive: u8, out: &mut Vec<u8>) -> u8 {
    if delta == 0 {
        same_or_positive
    } else if (-255..=255).contains(&delta) {
        out.push(delta.unsigned_abs() as u8);
        if delta > 0 { short | same_or_positive } else { short }
    } else {
        out.extend_from_slice(&(delta as i16).to_be_bytes());
        0
    }
}

/// Composite glyph record header (contents are never read)
pub fn composite_glyph() -> Vec<u8> {
    let mut out = Vec::new();
    push_i16(&mut out, -1);
    for v in [0i16, 0, 100, 100] {
        push_i16(&mut out, v);
    }
    out.extend_from_slice(&[0x00, 0x02, 0x00, 0x01, 0x00, 0x00]);
    out
}

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Raw table blobs for one face
pub struct Tables {
    pub head: Vec<u8>,
    pub loca: Vec<u8>,
    pub glyf: Vec<u8>,
}

/// Builds head/loca/glyf (and optionally hhea/hmtx/maxp) tables
pub struct FontBuilder {
    units_per_em: u16,
    short_offsets: bool,
    glyphs: Vec<Vec<u8>>,
    advances: Vec<u16>,
    ascender: i16,
    descender: i16,
}

impl FontBuilder {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            short_offsets: false,
            glyphs: Vec::new(),
            advances: Vec::new(),
            ascender: 0,
            descender: 0,
        }
    }

    pub fn short_offsets(mut self) -> Self {
        self.short_offsets = true;
        self
    }

    pub fn glyph(mut self, record: Vec<u8>, advance: u16) -> Self {
        self.glyphs.push(record);
        self.advances.push(advance);
        self
    }

    pub fn empty_glyph(self, advance: u16) -> Self {
        self.glyph(Vec::new(), advance)
    }

    pub fn line_metrics(mut self, ascender: i16, descender: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self
    }

    pub fn head(&self) -> Vec<u8> {
        let mut data = vec![0u8; 54];
        data[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
        data[18..20].copy_from_slice(&self.units_per_em.to_be_bytes());
        let format: i16 = if self.short_offsets { 0 } else { 1 };
        data[50..52].copy_from_slice(&format.to_be_bytes());
        data
    }

    pub fn tables(&self) -> Tables {
        let mut glyf = Vec::new();
        let mut offsets = vec![0usize];
        for record in &self.glyphs {
            glyf.extend_from_slice(record);
            if glyf.len() % 2 != 0 {
                glyf.push(0);
            }
            offsets.push(glyf.len());
        }

        let mut loca = Vec::new();
        for offset in offsets {
            if self.short_offsets {
                push_u16(&mut loca, (offset / 2) as u16);
            } else {
                push_u32(&mut loca, offset as u32);
            }
        }

        Tables {
            head: self.head(),
            loca,
            glyf,
        }
    }

    pub fn hhea(&self) -> Vec<u8> {
        let mut out = Vec::new();
        push_u32(&mut out, 0x0001_0000);
        push_i16(&mut out, self.ascender);
        push_i16(&mut out, self.descender);
        push_i16(&mut out, 0); // line gap
        push_u16(&mut out, self.advances.iter().copied().max().unwrap_or(0));
        out.extend_from_slice(&[0u8; 22]);
        push_u16(&mut out, self.advances.len() as u16);
        out
    }

    pub fn hmtx(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for &advance in &self.advances {
            push_u16(&mut out, advance);
            push_i16(&mut out, 0);
        }
        out
    }

    pub fn maxp(&self) -> Vec<u8> {
        let mut out = Vec::new();
        push_u32(&mut out, 0x0000_5000);
        push_u16(&mut out, self.glyphs.len() as u16);
        out
    }

    /// Complete sfnt file with head, hhea, hmtx, maxp, loca and glyf
    pub fn build_sfnt(&self) -> Vec<u8> {
        let tables = self.tables();
        sfnt(&[
            (*b"glyf", tables.glyf),
            (*b"head", tables.head),
            (*b"hhea", self.hhea()),
            (*b"hmtx", self.hmtx()),
            (*b"loca", tables.loca),
            (*b"maxp", self.maxp()),
        ])
    }
}

/// Lay out an sfnt table directory followed by 4-byte aligned table data
pub fn sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x0001_0000);
    push_u16(&mut out, tables.len() as u16);
    out.extend_from_slice(&[0u8; 6]);

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in tables {
        out.extend_from_slice(tag);
        push_u32(&mut out, 0); // checksum
        push_u32(&mut out, offset as u32);
        push_u32(&mut out, data.len() as u32);

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    out.extend_from_slice(&body);
    out
}

/// 640x512 unit rectangle at (64, 128)
pub const RECT: &[RawPoint] = &[
    (64, 128, true),
    (704, 128, true),
    (704, 640, true),
    (64, 640, true),
];

/// Triangle with a triangular counter, like a letter A
pub const A_OUTER: &[RawPoint] = &[(0, 0, true), (10, 20, true), (20, 0, true)];
pub const A_INNER: &[RawPoint] = &[(6, 4, true), (14, 4, true), (10, 12, true)];

/// Ring made only of control points, like a letter O
pub const O_OUTER: &[RawPoint] = &[
    (0, 0, false),
    (0, 40, false),
    (40, 40, false),
    (40, 0, false),
];
pub const O_INNER: &[RawPoint] = &[
    (10, 10, false),
    (30, 10, false),
    (30, 30, false),
    (10, 30, false),
];
