//! C++ header emission.
//!
//! Output depends only on the asset and the options: no timestamps, no
//! absolute paths, tables in codepoint order and ranges in declaration order.
use std::{
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    asset::{FontAsset, GlyphTable},
    error::{FontError, Result},
};

const BYTES_PER_LINE: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmitOptions {
    /// Namespace of the base table header.
    pub namespace: String,
    /// Namespace of the extended table header.
    pub ext_namespace: String,
    /// Place tables in flash on AVR/ESP targets (`PROGMEM`, `<pgmspace.h>`).
    pub progmem: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace: "TermFont".to_string(),
            ext_namespace: "TermFontExt".to_string(),
            progmem: true,
        }
    }
}

impl EmitOptions {
    pub fn with_namespaces(mut self, base: impl Into<String>, ext: impl Into<String>) -> Self {
        self.namespace = base.into();
        self.ext_namespace = ext.into();
        self
    }

    pub fn with_progmem(mut self, progmem: bool) -> Self {
        self.progmem = progmem;
        self
    }

    fn progmem_attr(&self) -> &'static str {
        if self.progmem {
            " PROGMEM"
        } else {
            ""
        }
    }

    fn write_includes(&self, out: &mut String) -> Result<()> {
        writeln!(out, "#pragma once")?;
        writeln!(out)?;
        writeln!(out, "#include <cstdint>")?;
        if self.progmem {
            writeln!(out, "#include <pgmspace.h>")?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Narrowest fixed-width unsigned C type holding `value`.
fn c_uint(value: u64) -> &'static str {
    if value <= u8::MAX as u64 {
        "uint8_t"
    } else if value <= u16::MAX as u64 {
        "uint16_t"
    } else {
        "uint32_t"
    }
}

fn char_label(codepoint: u32) -> String {
    match char::from_u32(codepoint) {
        None => "<invalid>".to_string(),
        Some('\\') => "<backslash>".to_string(),
        Some(ch) if ch.is_control() => "<control>".to_string(),
        Some(ch) => ch.to_string(),
    }
}

fn write_bytes(out: &mut String, bytes: &[u8]) -> Result<()> {
    out.push_str("    ");
    for (j, b) in bytes.iter().enumerate() {
        write!(out, "0x{b:02X},")?;
        if (j + 1) % BYTES_PER_LINE == 0 && j + 1 < bytes.len() {
            out.push_str("\n    ");
        }
    }
    out.push('\n');
    Ok(())
}

/// Header with the base table, its constants and `getGlyph()`.
pub fn emit_base(asset: &FontAsset, options: &EmitOptions) -> Result<String> {
    let cell = asset.cell;
    let base = &asset.base;
    let range = base.range();
    let code_t = c_uint(range.end as u64);
    let progmem = options.progmem_attr();

    let mut out = String::new();
    writeln!(out, "/**")?;
    writeln!(out, " * Auto-generated fixed-width terminal font")?;
    writeln!(out, " * Source: {}", asset.source)?;
    writeln!(out, " * PT size: {}", asset.metrics.point_size)?;
    writeln!(out, " * Cell: {}x{}", cell.width, cell.height)?;
    writeln!(
        out,
        " * Characters: {} (0x{:02X}-0x{:02X})",
        base.len(),
        range.start,
        range.end
    )?;
    writeln!(
        out,
        " * Total bitmap: {} bytes{}",
        base.byte_len(),
        if options.progmem { " (PROGMEM)" } else { "" }
    )?;
    writeln!(out, " */")?;
    options.write_includes(&mut out)?;

    writeln!(out, "namespace {} {{", options.namespace)?;
    writeln!(out)?;
    let constants = [
        ("FONT_W", c_uint(cell.width as u64), cell.width.to_string()),
        ("FONT_H", c_uint(cell.height as u64), cell.height.to_string()),
        (
            "BYTES_PER_ROW",
            c_uint(cell.bytes_per_row() as u64),
            cell.bytes_per_row().to_string(),
        ),
        (
            "BYTES_PER_GLYPH",
            c_uint(cell.bytes_per_glyph() as u64),
            cell.bytes_per_glyph().to_string(),
        ),
        ("FIRST_CHAR", code_t, format!("0x{:02X}", range.start)),
        ("LAST_CHAR", code_t, format!("0x{:02X}", range.end)),
        ("NUM_CHARS", c_uint(base.len() as u64), base.len().to_string()),
    ];
    for (name, ty, value) in constants {
        writeln!(out, "static constexpr {ty} {name} = {value};")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "static const uint8_t {}[{}]{progmem} = {{",
        base.name(),
        base.byte_len()
    )?;
    for glyph in base.glyphs() {
        writeln!(
            out,
            "    // 0x{:02X} '{}'",
            glyph.codepoint,
            char_label(glyph.codepoint)
        )?;
        write_bytes(&mut out, &glyph.bytes)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "inline const uint8_t* getGlyph({code_t} c) {{")?;
    writeln!(out, "    if (c < FIRST_CHAR || c > LAST_CHAR) c = '?';")?;
    writeln!(
        out,
        "    return &{}[(c - FIRST_CHAR) * BYTES_PER_GLYPH];",
        base.name()
    )?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "}} // namespace {}", options.namespace)?;
    Ok(out)
}

/// Header with one table per extended range and `lookup()`, or `None` when
/// the asset has no extended ranges.
pub fn emit_extended(asset: &FontAsset, options: &EmitOptions) -> Result<Option<String>> {
    if asset.extended.is_empty() {
        return Ok(None);
    }
    let cell = asset.cell;
    let progmem = options.progmem_attr();
    let max_end = asset
        .extended
        .iter()
        .map(|t| t.range().end)
        .max()
        .unwrap_or(0);
    // never narrower than 16 bits so the signature stays stable across range sets
    let cp_t = c_uint((max_end as u64).max(u8::MAX as u64 + 1));

    let mut out = String::new();
    writeln!(out, "/**")?;
    writeln!(out, " * Auto-generated extended Unicode font glyphs")?;
    writeln!(
        out,
        " * Source: {}, PT size: {}",
        asset.source, asset.metrics.point_size
    )?;
    writeln!(out, " * Cell: {}x{}", cell.width, cell.height)?;
    writeln!(
        out,
        " * Total: {} glyphs, {} bytes{}",
        asset.extended_glyph_count(),
        asset.extended_byte_len(),
        if options.progmem { " (PROGMEM)" } else { "" }
    )?;
    writeln!(out, " *")?;
    writeln!(out, " * Ranges:")?;
    for table in &asset.extended {
        let range = table.range();
        writeln!(
            out,
            " *   U+{:04X}-U+{:04X} ({} glyphs)",
            range.start,
            range.end,
            table.len()
        )?;
    }
    writeln!(out, " */")?;
    options.write_includes(&mut out)?;

    writeln!(out, "namespace {} {{", options.ext_namespace)?;
    writeln!(out)?;
    writeln!(
        out,
        "static constexpr {} BYTES_PER_GLYPH = {};",
        c_uint(cell.bytes_per_glyph() as u64),
        cell.bytes_per_glyph()
    )?;

    for table in &asset.extended {
        write_extended_table(&mut out, table, cp_t, progmem)?;
    }

    writeln!(out)?;
    writeln!(out, "/**")?;
    writeln!(
        out,
        " * Look up a Unicode codepoint in the extended font tables."
    )?;
    writeln!(
        out,
        " * Ranges are tried in declaration order; returns nullptr if none matches."
    )?;
    writeln!(out, " */")?;
    writeln!(out, "inline const uint8_t* lookup({cp_t} cp) {{")?;
    for table in &asset.extended {
        let range = table.range();
        writeln!(
            out,
            "    if (cp >= 0x{:04X} && cp <= 0x{:04X})",
            range.start, range.end
        )?;
        writeln!(
            out,
            "        return &{}[(cp - 0x{:04X}) * BYTES_PER_GLYPH];",
            table.name(),
            range.start
        )?;
    }
    writeln!(out, "    return nullptr;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "}} // namespace {}", options.ext_namespace)?;
    Ok(Some(out))
}

fn write_extended_table(
    out: &mut String,
    table: &GlyphTable,
    cp_t: &str,
    progmem: &str,
) -> Result<()> {
    let range = table.range();
    let name = table.name();
    writeln!(out)?;
    writeln!(
        out,
        "// U+{:04X}-U+{:04X} ({} glyphs, {} bytes, {} rendered, {} blank)",
        range.start,
        range.end,
        table.len(),
        table.byte_len(),
        table.rendered_count(),
        table.blank_count()
    )?;
    writeln!(out, "static constexpr {cp_t} {name}_START = 0x{:04X};", range.start)?;
    writeln!(out, "static constexpr {cp_t} {name}_END = 0x{:04X};", range.end)?;
    writeln!(
        out,
        "static const uint8_t {name}[{}]{progmem} = {{",
        table.byte_len()
    )?;
    for glyph in table.glyphs() {
        writeln!(
            out,
            "    // U+{:04X} '{}'",
            glyph.codepoint,
            char_label(glyph.codepoint)
        )?;
        write_bytes(out, &glyph.bytes)?;
    }
    writeln!(out, "}};")?;
    Ok(())
}

/// A header written to a temporary sibling of its destination but not yet
/// renamed into place. Dropping it without [`StagedFile::commit`] removes
/// the temporary file.
pub struct StagedFile {
    tmp: PathBuf,
    path: PathBuf,
    committed: bool,
}

impl StagedFile {
    pub fn stage(path: &Path, contents: &str) -> Result<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            FontError::InvalidConfig(format!("{} is not a file path", path.display()))
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));
        let staged = Self {
            tmp,
            path: path.to_path_buf(),
            committed: false,
        };
        fs::write(&staged.tmp, contents)?;
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(mut self) -> Result<()> {
        fs::rename(&self.tmp, &self.path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Write `contents` to a temporary sibling of `path`, then rename it into
/// place, so a reader never observes a half-written header.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    StagedFile::stage(path, contents)?.commit()
}

/// Stage every file before renaming any of them. If one cannot be written,
/// none of the destinations are touched.
pub fn write_all_atomic(files: &[(&Path, &str)]) -> Result<()> {
    let staged = files
        .iter()
        .map(|(path, contents)| StagedFile::stage(path, contents))
        .collect::<Result<Vec<_>>>()?;
    for file in staged {
        log::debug!("committing {}", file.path().display());
        file.commit()?;
    }
    Ok(())
}
