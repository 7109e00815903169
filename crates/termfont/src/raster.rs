use thiserror::Error;

use crate::{fit::FontMetrics, pack::Bitmap, Cell, GlyphSource};

/// Why a single codepoint rendered as an empty cell. Never fatal: the
/// table keeps a blank glyph in its slot and the run carries on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GlyphFailure {
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidCodepoint(u32),
    #[error("font has no glyph for U+{0:04X}")]
    Missing(u32),
    #[error("U+{codepoint:04X}: rasterizer returned {got} coverage values for a {width}x{height} box")]
    Malformed {
        codepoint: u32,
        got: usize,
        width: usize,
        height: usize,
    },
}

/// Renders glyphs at a fitted size into monochrome cell-sized bitmaps.
pub struct Rasterizer<'a, F: GlyphSource + ?Sized> {
    font: &'a F,
    cell: Cell,
    metrics: FontMetrics,
    threshold: u8,
}

impl<'a, F: GlyphSource + ?Sized> Rasterizer<'a, F> {
    /// `threshold` is the minimum coverage (1..=255) for a pixel to be set.
    pub fn new(font: &'a F, cell: Cell, metrics: FontMetrics, threshold: u8) -> Self {
        Self {
            font,
            cell,
            metrics,
            threshold: threshold.max(1),
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Render `codepoint` with its pen origin centred on the ink width and
    /// its baseline on row `cell.height - descent`. Ink outside the cell is
    /// clipped.
    pub fn render(&self, codepoint: u32) -> Result<Bitmap, GlyphFailure> {
        let ch = char::from_u32(codepoint).ok_or(GlyphFailure::InvalidCodepoint(codepoint))?;
        if !self.font.has_glyph(ch) {
            return Err(GlyphFailure::Missing(codepoint));
        }
        let coverage = self.font.rasterize(ch, self.metrics.point_size);
        if !coverage.is_well_formed() {
            return Err(GlyphFailure::Malformed {
                codepoint,
                got: coverage.data.len(),
                width: coverage.bbox.width,
                height: coverage.bbox.height,
            });
        }

        let mut bitmap = Bitmap::for_cell(self.cell);
        let bbox = coverage.bbox;
        if bbox.is_empty() {
            return Ok(bitmap);
        }
        let pen_x = (self.cell.width as i32 - bbox.width as i32).max(0) / 2;
        let left = pen_x + bbox.xmin;
        let top = self.metrics.baseline(self.cell) - bbox.ymax();
        for row in 0..bbox.height {
            let y = top + row as i32;
            if y < 0 {
                continue;
            }
            for col in 0..bbox.width {
                let x = left + col as i32;
                if x >= 0 && coverage.at(col, row) >= self.threshold {
                    bitmap.set(x as usize, y as usize, true);
                }
            }
        }
        Ok(bitmap)
    }

    /// Like [`Rasterizer::render`], substituting an empty cell on failure.
    pub fn render_or_blank(&self, codepoint: u32) -> (Bitmap, Option<GlyphFailure>) {
        match self.render(codepoint) {
            Ok(bitmap) => (bitmap, None),
            Err(failure) => {
                log::debug!("{failure}");
                (Bitmap::for_cell(self.cell), Some(failure))
            }
        }
    }
}
