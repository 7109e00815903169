use termfont::{unpack, Cell, FontAsset};

/// Lays packed glyphs side by side as text rows, one character per pixel.
pub struct GlyphStrip {
    cell: Cell,
    lines: Vec<String>,
    on: char,
    off: char,
}

impl GlyphStrip {
    pub fn new(cell: Cell, on: char, off: char) -> Self {
        Self {
            cell,
            lines: vec![String::new(); cell.height],
            on,
            off,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        let bitmap = unpack(bytes, self.cell);
        let (on, off) = (self.on, self.off);
        for (line, row) in self.lines.iter_mut().zip(bitmap.rows()) {
            line.extend(row.iter().map(|p| if *p { on } else { off }));
            line.push(' ');
        }
    }

    pub fn into_string(self) -> String {
        self.lines
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Packed bytes the device would draw for `ch`: an extended table when one
/// claims the codepoint, otherwise the base table with its `?` fallback.
pub fn device_glyph(asset: &FontAsset, ch: char) -> &[u8] {
    let cp = ch as u32;
    if asset.base.range().contains(cp) {
        return asset.glyph(cp);
    }
    asset.lookup_bytes(cp).unwrap_or_else(|| asset.glyph(cp))
}

/// Convenience: render text into a multi-line preview string.
pub fn render_preview(asset: &FontAsset, text: &str, on: char, off: char) -> String {
    let mut strip = GlyphStrip::new(asset.cell, on, off);
    for ch in text.chars() {
        strip.push(device_glyph(asset, ch));
    }
    strip.into_string()
}
