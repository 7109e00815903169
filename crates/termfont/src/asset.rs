use crate::{fit::FontMetrics, glyph::Glyph, range::CodepointRange, Cell};

/// Substitute for base table lookups outside the base range.
pub const QUESTION_MARK: u32 = 0x3F;

/// The rendered glyphs of one codepoint range, in codepoint order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphTable {
    range: CodepointRange,
    name: String,
    bytes_per_glyph: usize,
    glyphs: Vec<Glyph>,
}

impl GlyphTable {
    pub(crate) fn new(
        range: CodepointRange,
        name: String,
        bytes_per_glyph: usize,
        glyphs: Vec<Glyph>,
    ) -> Self {
        debug_assert_eq!(glyphs.len(), range.len());
        Self {
            range,
            name,
            bytes_per_glyph,
            glyphs,
        }
    }

    pub fn range(&self) -> CodepointRange {
        self.range
    }

    /// C identifier of the emitted array.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn blank_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.blank).count()
    }

    pub fn missing_count(&self) -> usize {
        self.glyphs.iter().filter(|g| g.missing).count()
    }

    pub fn rendered_count(&self) -> usize {
        self.len() - self.blank_count()
    }

    pub fn glyph(&self, codepoint: u32) -> Option<&Glyph> {
        if !self.range.contains(codepoint) {
            return None;
        }
        self.glyphs.get((codepoint - self.range.start) as usize)
    }

    /// Byte offset of `codepoint` within [`GlyphTable::bytes`].
    pub fn offset(&self, codepoint: u32) -> Option<usize> {
        self.range
            .contains(codepoint)
            .then(|| (codepoint - self.range.start) as usize * self.bytes_per_glyph)
    }

    pub fn byte_len(&self) -> usize {
        self.glyphs.len() * self.bytes_per_glyph
    }

    /// All glyphs back to back, as emitted.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for glyph in &self.glyphs {
            out.extend_from_slice(&glyph.bytes);
        }
        out
    }
}

/// Where an extended lookup landed: table index in declaration order and the
/// byte offset inside that table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtLookup {
    pub table: usize,
    pub offset: usize,
}

/// Everything the emitter needs, built completely before any output is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontAsset {
    /// Font identifier, normally the font file name.
    pub source: String,
    pub cell: Cell,
    pub metrics: FontMetrics,
    pub base: GlyphTable,
    /// Declaration order is lookup priority.
    pub extended: Vec<GlyphTable>,
}

impl FontAsset {
    pub fn bytes_per_glyph(&self) -> usize {
        self.cell.bytes_per_glyph()
    }

    /// Base table accessor. Codepoints outside the base range read the `?`
    /// glyph instead.
    pub fn glyph(&self, code: u32) -> &[u8] {
        let code = if self.base.range().contains(code) {
            code
        } else {
            QUESTION_MARK
        };
        self.base.glyph(code).map(|g| g.bytes.as_slice()).unwrap_or(&[])
    }

    /// First extended range containing `codepoint`; `None` is the not-found
    /// sentinel.
    pub fn lookup(&self, codepoint: u32) -> Option<ExtLookup> {
        self.extended
            .iter()
            .enumerate()
            .find_map(|(table, t)| t.offset(codepoint).map(|offset| ExtLookup { table, offset }))
    }

    pub fn lookup_bytes(&self, codepoint: u32) -> Option<&[u8]> {
        self.extended
            .iter()
            .find_map(|t| t.glyph(codepoint))
            .map(|g| g.bytes.as_slice())
    }

    pub fn extended_glyph_count(&self) -> usize {
        self.extended.iter().map(GlyphTable::len).sum()
    }

    pub fn extended_byte_len(&self) -> usize {
        self.extended.iter().map(GlyphTable::byte_len).sum()
    }
}
