//! Outline font -> bitmap asset conversion.
use crate::{
    asset::{FontAsset, GlyphTable, QUESTION_MARK},
    error::{FontError, Result},
    fit::fit_cell,
    glyph::Glyph,
    pack::pack_bitmap,
    range::{find_overlaps, parse_ranges, CodepointRange, Overlap, BASE_RANGE},
    raster::Rasterizer,
    Cell, GlyphSource,
};

/// Minimum anti-aliased coverage for a pixel to count as ink.
pub const DEFAULT_THRESHOLD: u8 = 128;

const BASE_TABLE_NAME: &str = "glyphs";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    pub cell: Cell,
    /// Contiguous table served by the base accessor. Must contain `?`.
    pub base_range: CodepointRange,
    /// Extra tables, in lookup priority order.
    pub extended: Vec<CodepointRange>,
    pub threshold: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cell: Cell::default(),
            base_range: BASE_RANGE,
            extended: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl GeneratorConfig {
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            ..Self::default()
        }
    }

    pub fn with_base_range(mut self, range: CodepointRange) -> Self {
        self.base_range = range;
        self
    }

    pub fn with_extended(mut self, ranges: Vec<CodepointRange>) -> Self {
        self.extended = ranges;
        self
    }

    /// Parse and append ranges in `--ext-ranges` syntax.
    pub fn with_range_spec(mut self, spec: &str) -> Result<Self> {
        self.extended.extend(parse_ranges(spec)?);
        Ok(self)
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        Cell::new(self.cell.width, self.cell.height)?;
        if !self.base_range.contains(QUESTION_MARK) {
            return Err(FontError::InvalidConfig(format!(
                "base range {} must contain '?' (U+003F), the fallback glyph",
                self.base_range
            )));
        }
        if self.threshold == 0 {
            return Err(FontError::InvalidConfig(
                "coverage threshold must be between 1 and 255".into(),
            ));
        }
        Ok(())
    }
}

/// Render and pack every codepoint of `range`. Codepoints that fail to
/// render keep their slot as an empty cell.
pub fn build_table<F: GlyphSource + ?Sized>(
    raster: &Rasterizer<'_, F>,
    range: CodepointRange,
    name: impl Into<String>,
) -> GlyphTable {
    let glyphs: Vec<Glyph> = range
        .codepoints()
        .map(|cp| {
            let (bitmap, failure) = raster.render_or_blank(cp);
            Glyph::new(cp, pack_bitmap(&bitmap), failure.is_some())
        })
        .collect();
    let table = GlyphTable::new(range, name.into(), raster.cell().bytes_per_glyph(), glyphs);

    log::info!(
        "  {} {}: {} rendered, {} blank ({} bytes)",
        table.name(),
        range,
        table.rendered_count(),
        table.blank_count(),
        table.byte_len()
    );
    if table.blank_count() > 0 {
        let blanks: Vec<String> = table
            .glyphs()
            .iter()
            .filter(|g| g.blank)
            .map(|g| format!("U+{:04X}", g.codepoint))
            .collect();
        log::debug!("  blank in {}: {}", table.name(), blanks.join(" "));
    }
    table
}

/// Run the whole pipeline: validate, fit, then render every table. Nothing
/// is written; the returned asset is handed to the emitter.
pub fn build_asset<F: GlyphSource + ?Sized>(font: &F, config: &GeneratorConfig) -> Result<FontAsset> {
    config.validate()?;
    for overlap in find_overlaps(config.base_range, &config.extended) {
        match overlap {
            Overlap::Base { index } => log::warn!(
                "extended range {} overlaps base range {}",
                config.extended[index],
                config.base_range
            ),
            Overlap::Extended { earlier, later } => log::warn!(
                "extended range {} is shadowed by {} where they overlap",
                config.extended[later],
                config.extended[earlier]
            ),
        }
    }

    let cell = config.cell;
    let metrics = fit_cell(font, cell, config.base_range)?;
    let raster = Rasterizer::new(font, cell, metrics, config.threshold);

    log::info!(
        "Font: {}, {}px, cell {}x{}, {} bytes/glyph",
        font.name(),
        metrics.point_size,
        cell.width,
        cell.height,
        cell.bytes_per_glyph()
    );
    let base = build_table(&raster, config.base_range, BASE_TABLE_NAME);

    let mut names: Vec<String> = Vec::with_capacity(config.extended.len());
    let mut extended = Vec::with_capacity(config.extended.len());
    for range in &config.extended {
        let name = unique_name(range.table_name(), &names);
        names.push(name.clone());
        extended.push(build_table(&raster, *range, name));
    }
    if !extended.is_empty() {
        let blank: usize = extended.iter().map(GlyphTable::blank_count).sum();
        let total: usize = extended.iter().map(GlyphTable::len).sum();
        if blank > 0 {
            log::warn!("{blank} of {total} extended glyphs are blank in {}", font.name());
        }
    }

    Ok(FontAsset {
        source: font.name().to_string(),
        cell,
        metrics,
        base,
        extended,
    })
}

fn unique_name(candidate: String, taken: &[String]) -> String {
    if !taken.contains(&candidate) {
        return candidate;
    }
    let mut n = 2;
    loop {
        let name = format!("{candidate}_{n}");
        if !taken.contains(&name) {
            return name;
        }
        n += 1;
    }
}
