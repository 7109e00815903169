use std::{fs, path::Path};

use fontdue::FontSettings;

use crate::{
    error::{FontError, Result},
    glyph::{Coverage, GlyphBox, LineExtent},
    GlyphSource,
};

const FONT_EXTENSIONS: [&str; 3] = [".ttf", ".otf", ".ttc"];

/// TrueType/OpenType font rasterized with `fontdue`.
pub struct TrueTypeFont {
    name: String,
    font: fontdue::Font,
}

impl TrueTypeFont {
    /// Load a font file. The file name (without directories) becomes the
    /// font identifier so emitted headers do not depend on the install path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FontError::FontNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "font".to_string());
        Self::from_bytes(name, &bytes)
    }

    /// Parse font data. A ZIP archive is searched for the first TTF/OTF/TTC
    /// entry, whose file name then replaces `name`.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        if bytes.len() >= 4 && &bytes[0..4] == b"PK\x03\x04" {
            let (entry_name, data) = extract_from_zip(bytes)?;
            return Self::parse(entry_name, &data);
        }
        Self::parse(name.into(), bytes)
    }

    fn parse(name: String, bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| FontError::Load(format!("{name}: {e}")))?;
        log::debug!("loaded {name} ({} glyphs)", font.glyph_count());
        Ok(Self { name, font })
    }

    pub fn glyph_count(&self) -> usize {
        self.font.glyph_count() as usize
    }
}

#[cfg(feature = "zip")]
fn extract_from_zip(bytes: &[u8]) -> Result<(String, Vec<u8>)> {
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| FontError::Load(format!("zip open error: {e}")))?;
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FontError::Load(format!("zip entry error: {e}")))?;
        let entry = file.name().to_string();
        let lower = entry.to_ascii_lowercase();
        if !FONT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            continue;
        }
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        let base = entry.rsplit('/').next().unwrap_or(&entry).to_string();
        return Ok((base, data));
    }
    Err(FontError::Load("zip archive contained no font file".into()))
}

#[cfg(not(feature = "zip"))]
fn extract_from_zip(_bytes: &[u8]) -> Result<(String, Vec<u8>)> {
    Err(FontError::Load(format!(
        "zip archives need the `zip` feature; provide a plain {} file",
        FONT_EXTENSIONS.join("/")
    )))
}

impl GlyphSource for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_extent(&self, point_size: u32) -> Option<LineExtent> {
        self.font
            .horizontal_line_metrics(point_size as f32)
            .map(|lm| LineExtent {
                ascent: lm.ascent.ceil() as i32,
                descent: (-lm.descent).ceil() as i32,
            })
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    fn glyph_box(&self, ch: char, point_size: u32) -> GlyphBox {
        let m = self.font.metrics(ch, point_size as f32);
        GlyphBox {
            xmin: m.xmin,
            ymin: m.ymin,
            width: m.width,
            height: m.height,
        }
    }

    fn rasterize(&self, ch: char, point_size: u32) -> Coverage {
        let (m, data) = self.font.rasterize(ch, point_size as f32);
        Coverage {
            bbox: GlyphBox {
                xmin: m.xmin,
                ymin: m.ymin,
                width: m.width,
                height: m.height,
            },
            data,
        }
    }
}
