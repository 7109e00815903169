//! Test support utilities for termfont.
//!
//! [`SyntheticFont`] is a [`GlyphSource`] whose glyphs are solid rectangles
//! described in font units. Its pixel output follows from integer arithmetic
//! alone, which lets tests assert exact bitmaps without a font file.

use std::collections::{HashMap, HashSet};

use crate::{Coverage, GlyphBox, GlyphSource, LineExtent};

/// Rectangle glyph in font units. The left bearing is always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticGlyph {
    pub width: u32,
    /// Bottom edge relative to the baseline, negative for descenders.
    pub ymin: i32,
    pub height: u32,
}

impl SyntheticGlyph {
    pub const EMPTY: SyntheticGlyph = SyntheticGlyph {
        width: 0,
        ymin: 0,
        height: 0,
    };
}

pub struct SyntheticFont {
    name: String,
    units_per_em: u32,
    ascent: u32,
    descent: u32,
    line_metrics: bool,
    coverage: u8,
    default_glyph: SyntheticGlyph,
    glyphs: HashMap<char, SyntheticGlyph>,
    missing: HashSet<char>,
}

impl SyntheticFont {
    /// 1000 units per em, ascent 800, descent 200. Printable ASCII is
    /// present, each glyph 500 wide and 700 tall on the baseline; space is
    /// empty.
    pub fn new(name: impl Into<String>) -> Self {
        let mut glyphs = HashMap::new();
        glyphs.insert(' ', SyntheticGlyph::EMPTY);
        Self {
            name: name.into(),
            units_per_em: 1000,
            ascent: 800,
            descent: 200,
            line_metrics: true,
            coverage: 255,
            default_glyph: SyntheticGlyph {
                width: 500,
                ymin: 0,
                height: 700,
            },
            glyphs,
            missing: HashSet::new(),
        }
    }

    pub fn with_metrics(mut self, ascent: u32, descent: u32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    /// Report no line metrics, as a font without a horizontal header would.
    pub fn without_line_metrics(mut self) -> Self {
        self.line_metrics = false;
        self
    }

    /// Coverage value of every inked pixel.
    pub fn with_coverage(mut self, coverage: u8) -> Self {
        self.coverage = coverage;
        self
    }

    /// Shape used by every printable ASCII character without an override.
    pub fn with_default_glyph(mut self, glyph: SyntheticGlyph) -> Self {
        self.default_glyph = glyph;
        self
    }

    /// Add or reshape a glyph; this also makes non-ASCII characters present.
    pub fn with_glyph(mut self, ch: char, glyph: SyntheticGlyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self.missing.remove(&ch);
        self
    }

    pub fn without_glyph(mut self, ch: char) -> Self {
        self.missing.insert(ch);
        self
    }

    fn shape(&self, ch: char) -> SyntheticGlyph {
        if !self.has_glyph(ch) {
            return SyntheticGlyph::EMPTY;
        }
        self.glyphs.get(&ch).copied().unwrap_or(self.default_glyph)
    }

    fn floor_px(&self, units: i64, point_size: u32) -> i64 {
        (units * point_size as i64).div_euclid(self.units_per_em as i64)
    }

    fn ceil_px(&self, units: u32, point_size: u32) -> i32 {
        (units * point_size).div_ceil(self.units_per_em) as i32
    }
}

impl GlyphSource for SyntheticFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_extent(&self, point_size: u32) -> Option<LineExtent> {
        self.line_metrics.then(|| LineExtent {
            ascent: self.ceil_px(self.ascent, point_size),
            descent: self.ceil_px(self.descent, point_size),
        })
    }

    fn has_glyph(&self, ch: char) -> bool {
        if self.missing.contains(&ch) {
            return false;
        }
        self.glyphs.contains_key(&ch) || (' '..='~').contains(&ch)
    }

    fn glyph_box(&self, ch: char, point_size: u32) -> GlyphBox {
        let shape = self.shape(ch);
        GlyphBox {
            xmin: 0,
            ymin: self.floor_px(shape.ymin as i64, point_size) as i32,
            width: self.floor_px(shape.width as i64, point_size) as usize,
            height: self.floor_px(shape.height as i64, point_size) as usize,
        }
    }

    fn rasterize(&self, ch: char, point_size: u32) -> Coverage {
        let bbox = self.glyph_box(ch, point_size);
        Coverage {
            bbox,
            data: vec![self.coverage; bbox.width * bbox.height],
        }
    }
}
