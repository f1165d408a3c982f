//! Font table view
//!
//! [`FontTables`] borrows the `head`, `loca` and `glyf` tables (plus the
//! optional metrics tables) of one face. It never mutates them, so a single
//! view can be shared across threads decoding different glyphs.

use std::ops::Range;

use crate::error::{GlyphError, TableError};
use crate::outline::BoundingBox;
use crate::reader::FontReader;
use crate::tables::{self, HeadTable, HheaTable, HorizontalMetrics, IndexFormat, MaxpTable};
use crate::GlyphId;

const TTC_MAGIC: u32 = 0x7474_6366; // 'ttcf'
const TRUETYPE_MAGIC: u32 = 0x0001_0000;
const APPLE_TRUE_MAGIC: u32 = 0x7472_7565; // 'true'
const OPENTYPE_CFF_MAGIC: u32 = 0x4F54_544F; // 'OTTO'

/// Table directory record
#[derive(Debug, Clone, Copy)]
struct TableRecord {
    tag: [u8; 4],
    offset: u32,
    length: u32,
}

/// Read-only view over the outline tables of one font face
#[derive(Debug, Clone)]
pub struct FontTables<'a> {
    head: HeadTable,
    loca: &'a [u8],
    glyf: &'a [u8],
    /// From maxp when available
    num_glyphs: Option<u16>,
    metrics: Option<HorizontalMetrics<'a>>,
}

impl<'a> FontTables<'a> {
    /// Build a view from raw `head`, `loca` and `glyf` table blobs
    pub fn new(head: &[u8], loca: &'a [u8], glyf: &'a [u8]) -> Result<Self, TableError> {
        Ok(Self::from_parts(HeadTable::parse(head)?, loca, glyf))
    }

    /// Build a view from an already parsed header
    pub fn from_parts(head: HeadTable, loca: &'a [u8], glyf: &'a [u8]) -> Self {
        Self {
            head,
            loca,
            glyf,
            num_glyphs: None,
            metrics: None,
        }
    }

    /// Attach horizontal metrics, used to size empty glyphs
    pub fn with_metrics(mut self, metrics: HorizontalMetrics<'a>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Override the glyph count derived from the location table
    pub fn with_glyph_count(mut self, num_glyphs: u16) -> Self {
        self.num_glyphs = Some(num_glyphs);
        self
    }

    /// Parse a complete sfnt font file
    pub fn parse(data: &'a [u8]) -> Result<Self, TableError> {
        Self::parse_index(data, 0)
    }

    /// Parse font with face index (for TTC)
    pub fn parse_index(data: &'a [u8], index: u32) -> Result<Self, TableError> {
        let mut reader = FontReader::new(data);

        let magic = reader.read_u32()?;
        let offset = if magic == TTC_MAGIC {
            let _version = reader.read_u32()?;
            let num_fonts = reader.read_u32()?;
            if index >= num_fonts {
                return Err(TableError::FaceIndexOutOfRange {
                    index,
                    count: num_fonts,
                });
            }
            reader.skip(index as usize * 4)?;
            reader.read_u32()? as usize
        } else {
            0
        };

        // Parse offset table
        reader.set_pos(offset);
        let sfnt_version = reader.read_u32()?;
        match sfnt_version {
            TRUETYPE_MAGIC | APPLE_TRUE_MAGIC | OPENTYPE_CFF_MAGIC => {}
            other => return Err(TableError::InvalidMagic(other)),
        }

        let num_tables = reader.read_u16()?;
        reader.skip(6)?; // search range, entry selector, range shift

        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let tag = reader.read_tag()?;
            let _checksum = reader.read_u32()?;
            let offset = reader.read_u32()?;
            let length = reader.read_u32()?;
            records.push(TableRecord { tag, offset, length });
        }

        let table = |tag: &[u8; 4]| -> Result<Option<&'a [u8]>, TableError> {
            match records.iter().find(|r| &r.tag == tag) {
                Some(r) => Ok(Some(
                    FontReader::new(data).bytes_at(r.offset as usize, r.length as usize)?,
                )),
                None => Ok(None),
            }
        };
        let required = |tag: &[u8; 4], name: &'static str| -> Result<&'a [u8], TableError> {
            table(tag)?.ok_or(TableError::TableNotFound(name))
        };

        let head = HeadTable::parse(required(b"head", "head")?)?;
        let loca = required(b"loca", "loca")?;
        let glyf = required(b"glyf", "glyf")?;

        let mut tables = Self::from_parts(head, loca, glyf);
        if let Some(maxp) = table(b"maxp")? {
            tables.num_glyphs = Some(MaxpTable::parse(maxp)?.num_glyphs);
        }
        if let (Some(hhea), Some(hmtx)) = (table(b"hhea")?, table(b"hmtx")?) {
            tables.metrics = Some(HorizontalMetrics::new(HheaTable::parse(hhea)?, hmtx));
        }

        tracing::debug!(
            "Parsed font face {}: {} tables, {} glyphs, {} units/em",
            index,
            num_tables,
            tables.glyph_count(),
            tables.units_per_em()
        );
        Ok(tables)
    }

    /// Font header
    pub fn head(&self) -> &HeadTable {
        &self.head
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    /// Location table format
    pub fn index_format(&self) -> IndexFormat {
        self.head.index_to_loc_format
    }

    /// Raw outline table
    pub fn glyf(&self) -> &'a [u8] {
        self.glyf
    }

    /// Raw location table
    pub fn loca(&self) -> &'a [u8] {
        self.loca
    }

    /// Horizontal metrics, if the font carries hhea and hmtx
    pub fn metrics(&self) -> Option<&HorizontalMetrics<'a>> {
        self.metrics.as_ref()
    }

    /// Font units to pixels for a target em size
    pub fn scale(&self, em_size: f32) -> f32 {
        em_size / self.units_per_em() as f32
    }

    /// Number of glyphs
    pub fn glyph_count(&self) -> u32 {
        match self.num_glyphs {
            Some(n) => n as u32,
            None => {
                let entries = self.loca.len() / self.index_format().entry_size();
                entries.saturating_sub(1) as u32
            }
        }
    }

    /// Byte range of a glyph within the outline table
    ///
    /// An empty range is an empty glyph.
    pub fn glyph_range(&self, glyph_id: GlyphId) -> Result<Range<usize>, GlyphError> {
        let glyph_count = self.glyph_count();
        if glyph_id.0 as u32 >= glyph_count {
            return Err(GlyphError::UnknownGlyph {
                glyph_id,
                glyph_count,
            });
        }

        let index = glyph_id.0 as usize;
        let format = self.index_format();
        let start = tables::location(self.loca, index, format)
            .map_err(|e| GlyphError::truncated(glyph_id, e))?;
        let end = tables::location(self.loca, index + 1, format)
            .map_err(|e| GlyphError::truncated(glyph_id, e))?;
        tracing::trace!("Glyph {} located at {}..{}", glyph_id, start, end);

        if start == end {
            return Ok(start..end);
        }

        let table_len = self.glyf.len();
        let bad = if start >= table_len {
            Some(start)
        } else if end > table_len || end < start {
            Some(end)
        } else {
            None
        };
        match bad {
            Some(offset) => Err(GlyphError::InvalidLocationOffset {
                glyph_id,
                offset,
                table_len,
            }),
            None => Ok(start..end),
        }
    }

    /// Get glyph bounding box without decoding points
    ///
    /// Returns `None` for empty glyphs.
    pub fn glyph_bounding_box(&self, glyph_id: GlyphId) -> Result<Option<BoundingBox>, GlyphError> {
        let range = self.glyph_range(glyph_id)?;
        if range.is_empty() {
            return Ok(None);
        }

        let reader = FontReader::new(&self.glyf[range]);
        let read = |offset| {
            reader
                .read_i16_at(offset)
                .map_err(|e| GlyphError::truncated(glyph_id, e))
        };
        Ok(Some(BoundingBox {
            x_min: read(2)?,
            y_min: read(4)?,
            x_max: read(6)?,
            y_max: read(8)?,
        }))
    }

    /// Advance width in font units
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.metrics.as_ref()?.advance(glyph_id.0).ok()
    }
}
