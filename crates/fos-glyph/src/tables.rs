//! OpenType table definitions

use crate::error::{ReadError, TableError};
use crate::reader::FontReader;

/// Location table entry format (`head.indexToLocFormat`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// u16 entries holding offset / 2
    Short,
    /// u32 entries holding the offset
    Long,
}

impl IndexFormat {
    /// Size of one location entry in bytes
    pub fn entry_size(self) -> usize {
        match self {
            IndexFormat::Short => 2,
            IndexFormat::Long => 4,
        }
    }
}

impl TryFrom<i16> for IndexFormat {
    type Error = TableError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IndexFormat::Short),
            1 => Ok(IndexFormat::Long),
            other => Err(TableError::InvalidIndexFormat(other)),
        }
    }
}

/// Head table (font header)
#[derive(Debug, Clone)]
pub struct HeadTable {
    pub units_per_em: u16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub index_to_loc_format: IndexFormat,
}

impl HeadTable {
    pub fn parse(data: &[u8]) -> Result<Self, TableError> {
        let mut r = FontReader::new(data);
        r.skip(18)?; // version, revision, checksums, magic, flags
        let units_per_em = r.read_u16()?;
        r.skip(16)?; // timestamps
        let x_min = r.read_i16()?;
        let y_min = r.read_i16()?;
        let x_max = r.read_i16()?;
        let y_max = r.read_i16()?;
        r.skip(6)?; // mac style, lowest rec ppem, direction hint
        let index_to_loc_format = IndexFormat::try_from(r.read_i16()?)?;

        if units_per_em == 0 {
            return Err(TableError::ZeroUnitsPerEm);
        }

        Ok(Self {
            units_per_em,
            x_min,
            y_min,
            x_max,
            y_max,
            index_to_loc_format,
        })
    }
}

/// Hhea table (horizontal header)
#[derive(Debug, Clone)]
pub struct HheaTable {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub number_of_h_metrics: u16,
}

impl HheaTable {
    pub fn parse(data: &[u8]) -> Result<Self, TableError> {
        let mut r = FontReader::new(data);
        r.skip(4)?; // version
        let ascender = r.read_i16()?;
        let descender = r.read_i16()?;
        let line_gap = r.read_i16()?;
        let advance_width_max = r.read_u16()?;
        r.skip(22)?; // other metrics
        let number_of_h_metrics = r.read_u16()?;

        Ok(Self {
            ascender,
            descender,
            line_gap,
            advance_width_max,
            number_of_h_metrics,
        })
    }
}

/// Maxp table (maximum profile)
#[derive(Debug, Clone)]
pub struct MaxpTable {
    pub num_glyphs: u16,
}

impl MaxpTable {
    pub fn parse(data: &[u8]) -> Result<Self, TableError> {
        let mut r = FontReader::new(data);
        r.skip(4)?; // version
        let num_glyphs = r.read_u16()?;
        Ok(Self { num_glyphs })
    }
}

/// Horizontal metrics: hhea plus the raw hmtx array
#[derive(Debug, Clone)]
pub struct HorizontalMetrics<'a> {
    pub hhea: HheaTable,
    hmtx: &'a [u8],
}

impl<'a> HorizontalMetrics<'a> {
    pub fn new(hhea: HheaTable, hmtx: &'a [u8]) -> Self {
        Self { hhea, hmtx }
    }

    /// Advance width in font units
    ///
    /// Glyphs past `numberOfHMetrics` share the last advance.
    pub fn advance(&self, glyph_id: u16) -> Result<u16, ReadError> {
        let last = self.hhea.number_of_h_metrics.saturating_sub(1);
        let index = glyph_id.min(last) as usize;
        FontReader::new(self.hmtx).read_u16_at(index * 4)
    }

    /// Ascender minus descender, in font units
    pub fn line_extent(&self) -> i32 {
        self.hhea.ascender as i32 - self.hhea.descender as i32
    }
}

/// Read entry `index` of a location table as a byte offset into glyf
pub fn location(loca: &[u8], index: usize, format: IndexFormat) -> Result<usize, ReadError> {
    let reader = FontReader::new(loca);
    match format {
        // Short format (u16, multiply by 2)
        IndexFormat::Short => Ok(reader.read_u16_at(index * 2)? as usize * 2),
        IndexFormat::Long => Ok(reader.read_u32_at(index * 4)? as usize),
    }
}
