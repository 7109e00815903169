/// Vertical extents of a font at one point size, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineExtent {
    /// Pixels above the baseline.
    pub ascent: i32,
    /// Pixels below the baseline, as a positive distance.
    pub descent: i32,
}

impl LineExtent {
    pub fn height(&self) -> i32 {
        self.ascent + self.descent
    }
}

/// Ink box of a single glyph.
///
/// `xmin` is the left bearing from the pen origin, `ymin` the offset of the
/// bottom edge from the baseline (y grows upwards, so descenders are negative).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphBox {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
}

impl GlyphBox {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top edge of the ink, measured upwards from the baseline.
    pub fn ymax(&self) -> i32 {
        self.ymin + self.height as i32
    }
}

/// Anti-aliased output of the outline rasterizer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    pub bbox: GlyphBox,
    /// `bbox.width * bbox.height` values in 0..=255, row-major, top row first.
    pub data: Vec<u8>,
}

impl Coverage {
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.bbox.width * self.bbox.height
    }

    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.bbox.width + x]
    }
}

/// A rendered, packed glyph as stored in a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub codepoint: u32,
    /// Packed rows, `Cell::bytes_per_glyph()` long.
    pub bytes: Vec<u8>,
    /// No ink where ink was expected (anything but the space character).
    pub blank: bool,
    /// Rendering failed and the cell was filled with the blank fallback.
    pub missing: bool,
}

impl Glyph {
    pub fn new(codepoint: u32, bytes: Vec<u8>, missing: bool) -> Self {
        let blank = codepoint != 0x20 && bytes.iter().all(|b| *b == 0);
        Self {
            codepoint,
            bytes,
            blank,
            missing,
        }
    }
}
