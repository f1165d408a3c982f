//! glyph-raster - render glyphs from a TrueType font as text art
//!
//! ```text
//! glyph-raster --size 24 DejaVuSans.ttf 36 37 38
//! RUST_LOG=debug glyph-raster --all --summary font.ttf
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fos_glyph::{
    FontTables, GlyphId, GlyphRasterizer, RasterConfig, RasterizedGlyph, DEFAULT_SUBDIVISIONS,
    MAX_SUBDIVISIONS,
};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Rasterize TrueType glyphs and print them as text art")]
struct Args {
    /// Font file (.ttf or .ttc)
    font: PathBuf,
    /// Glyph ids to render
    glyphs: Vec<u16>,
    /// Render every glyph in the font
    #[arg(long, conflicts_with = "glyphs")]
    all: bool,
    /// Pixels per em
    #[arg(long, default_value_t = 32.0)]
    size: f32,
    /// Line segments per quadratic curve
    #[arg(
        long,
        default_value_t = DEFAULT_SUBDIVISIONS,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISIONS as i64)
    )]
    subdivisions: u32,
    /// Face within a font collection
    #[arg(long, default_value_t = 0)]
    face_index: u32,
    /// Worker threads, 0 for one per core
    #[arg(long, default_value_t = 0)]
    jobs: usize,
    /// Print one summary line per glyph instead of the bitmap
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    let data = std::fs::read(&args.font)
        .with_context(|| format!("failed to read {}", args.font.display()))?;
    let tables = FontTables::parse_index(&data, args.face_index)
        .with_context(|| format!("failed to parse {}", args.font.display()))?;
    tracing::info!(
        "Loaded {}: {} glyphs, {} units/em",
        args.font.display(),
        tables.glyph_count(),
        tables.units_per_em()
    );

    let glyph_ids: Vec<GlyphId> = if args.all {
        (0..=u16::MAX)
            .take(tables.glyph_count() as usize)
            .map(GlyphId)
            .collect()
    } else {
        args.glyphs.iter().copied().map(GlyphId).collect()
    };
    if glyph_ids.is_empty() {
        anyhow::bail!("no glyphs requested, pass glyph ids or --all");
    }

    let config = RasterConfig::default()
        .with_em_size(args.size)
        .with_subdivisions(args.subdivisions);
    let rasterizer = GlyphRasterizer::new(config);
    let results = rasterizer.rasterize_many(&tables, &glyph_ids);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut skipped = 0usize;
    for result in &results {
        match result {
            Ok(glyph) => write_glyph(&mut out, glyph, args.summary)?,
            // Already logged by the rasterizer
            Err(_) => skipped += 1,
        }
    }
    out.flush()?;

    tracing::info!("Rendered {} glyphs, {} skipped", results.len() - skipped, skipped);
    Ok(())
}

/// Print a glyph, top row first
fn write_glyph(out: &mut impl Write, glyph: &RasterizedGlyph, summary: bool) -> io::Result<()> {
    writeln!(
        out,
        "glyph {}: {}x{}, {} pixels",
        glyph.glyph_id,
        glyph.width(),
        glyph.height(),
        glyph.buffer.coverage()
    )?;
    if summary {
        return Ok(());
    }

    for row in glyph.buffer.rows_top_down() {
        let line: String = row.iter().map(|c| if c.a == 0 { '.' } else { '#' }).collect();
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_glyph::{Color, PixelBuffer};

    #[test]
    fn test_write_glyph_top_down() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.fill_span(0, 0, 2, Color::WHITE);
        let glyph = RasterizedGlyph {
            glyph_id: GlyphId(5),
            bbox: None,
            origin: (0.0, 0.0),
            buffer,
        };

        let mut out = Vec::new();
        write_glyph(&mut out, &glyph, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "glyph 5: 3x2, 2 pixels\n...\n##.\n\n"
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["glyph-raster", "--size", "12", "font.ttf", "3", "4"]).unwrap();
        assert_eq!(args.glyphs, vec![3, 4]);
        assert_eq!(args.size, 12.0);
        assert_eq!(args.subdivisions, DEFAULT_SUBDIVISIONS);
        assert!(Args::try_parse_from(["glyph-raster", "--all", "font.ttf", "3"]).is_err());
    }

    #[test]
    fn test_args_reject_out_of_range_subdivisions() {
        assert!(Args::try_parse_from(["glyph-raster", "--subdivisions", "4294967295", "font.ttf", "1"]).is_err());
        assert!(Args::try_parse_from(["glyph-raster", "--subdivisions", "0", "font.ttf", "1"]).is_err());
        let args = Args::try_parse_from(["glyph-raster", "--subdivisions", "1024", "font.ttf", "1"]).unwrap();
        assert_eq!(args.subdivisions, MAX_SUBDIVISIONS);
    }
}
