//! termfont: fixed-cell bitmap fonts for embedded terminals.
//!
//! Fits an outline font into a character cell, rasterizes every requested
//! codepoint to 1 bit per pixel, packs the rows MSB-first and emits C++
//! headers holding the glyph tables and their accessors.

mod asset;
mod convert;
pub mod emit;
mod error;
mod fit;
mod font;
mod glyph;
pub mod pack;
mod raster;
pub mod range;

pub use asset::{ExtLookup, FontAsset, GlyphTable, QUESTION_MARK};
pub use convert::{build_asset, build_table, GeneratorConfig, DEFAULT_THRESHOLD};
pub use emit::{emit_base, emit_extended, write_all_atomic, write_atomic, EmitOptions, StagedFile};
pub use error::{FontError, Result};
pub use fit::{fit_cell, FontMetrics, MetricsSource};
pub use font::TrueTypeFont;
pub use glyph::{Coverage, Glyph, GlyphBox, LineExtent};
pub use pack::{pack_bitmap, pack_pixels, unpack, Bitmap};
pub use raster::{GlyphFailure, Rasterizer};
pub use range::{parse_ranges, CodepointRange, BASE_RANGE};

// Test utilities
pub mod test_support;

/// Pixel dimensions of the fixed character cell every glyph is rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub width: usize,
    pub height: usize,
}

impl Cell {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FontError::InvalidCell { width, height });
        }
        Ok(Self { width, height })
    }

    /// Packed bytes per pixel row, `ceil(width / 8)`.
    pub fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(8)
    }

    pub fn bytes_per_glyph(&self) -> usize {
        self.bytes_per_row() * self.height
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
        }
    }
}

/// An outline font the pipeline can measure and rasterize.
///
/// Point sizes are pixels per em. Implemented by [`TrueTypeFont`] for real
/// font files and by [`test_support::SyntheticFont`] for deterministic tests.
pub trait GlyphSource {
    /// Identifier recorded in emitted headers.
    fn name(&self) -> &str;

    /// Ascent and descent at `point_size`, or `None` when the font carries no
    /// horizontal line metrics.
    fn line_extent(&self, point_size: u32) -> Option<LineExtent>;

    fn has_glyph(&self, ch: char) -> bool;

    /// Ink bounding box of `ch` relative to the pen origin on the baseline.
    fn glyph_box(&self, ch: char, point_size: u32) -> GlyphBox;

    /// Anti-aliased coverage of `ch`, rows top to bottom.
    fn rasterize(&self, ch: char, point_size: u32) -> Coverage;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn line_extent(&self, point_size: u32) -> Option<LineExtent> {
        (**self).line_extent(point_size)
    }
    fn has_glyph(&self, ch: char) -> bool {
        (**self).has_glyph(ch)
    }
    fn glyph_box(&self, ch: char, point_size: u32) -> GlyphBox {
        (**self).glyph_box(ch, point_size)
    }
    fn rasterize(&self, ch: char, point_size: u32) -> Coverage {
        (**self).rasterize(ch, point_size)
    }
}

impl From<std::fmt::Error> for FontError {
    fn from(_: std::fmt::Error) -> Self {
        FontError::Fmt
    }
}
