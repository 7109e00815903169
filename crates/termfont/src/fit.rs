use crate::{
    error::{FontError, Result},
    glyph::LineExtent,
    range::CodepointRange,
    Cell, GlyphSource,
};

// Line metrics are either present in a font or not; the size is irrelevant.
const PROBE_SIZE: u32 = 16;

/// Where ascent and descent come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricsSource {
    /// The font's horizontal header (hhea/OS2) line metrics.
    LineMetrics,
    /// Ink extents of the base range glyphs, for fonts without line metrics.
    InkBounds,
}

impl MetricsSource {
    /// Checked once per run; every size candidate then uses the same source.
    pub fn probe<F: GlyphSource + ?Sized>(font: &F) -> Self {
        if font.line_extent(PROBE_SIZE).is_some() {
            MetricsSource::LineMetrics
        } else {
            MetricsSource::InkBounds
        }
    }
}

/// Vertical metrics at the point size chosen for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    pub point_size: u32,
    pub ascent: i32,
    pub descent: i32,
    pub source: MetricsSource,
}

impl FontMetrics {
    /// Row the baseline is pinned to, `cell.height - descent`.
    pub fn baseline(&self, cell: Cell) -> i32 {
        cell.height as i32 - self.descent
    }
}

/// Find the largest point size whose ascent + descent fits the cell height
/// and whose widest base range glyph fits the cell width.
///
/// Every size from `cell.height` down to 1 is tried in turn: glyph widths do
/// not grow monotonically with the size, so bisecting could skip a fit.
pub fn fit_cell<F: GlyphSource + ?Sized>(
    font: &F,
    cell: Cell,
    base: CodepointRange,
) -> Result<FontMetrics> {
    let source = MetricsSource::probe(font);
    if source == MetricsSource::InkBounds {
        log::warn!(
            "{} has no line metrics, using glyph ink bounds instead",
            font.name()
        );
    }
    let present: Vec<char> = base
        .codepoints()
        .filter_map(char::from_u32)
        .filter(|ch| font.has_glyph(*ch))
        .collect();

    for point_size in (1..=cell.height as u32).rev() {
        let extent = match source {
            MetricsSource::LineMetrics => match font.line_extent(point_size) {
                Some(extent) => extent,
                None => continue,
            },
            MetricsSource::InkBounds => ink_extent(font, &present, point_size),
        };
        if extent.height() > cell.height as i32 {
            log::debug!(
                "{point_size}px: ascent {} + descent {} exceeds {}",
                extent.ascent,
                extent.descent,
                cell.height
            );
            continue;
        }
        let widest = present
            .iter()
            .map(|ch| font.glyph_box(*ch, point_size).width)
            .max()
            .unwrap_or(0);
        if widest > cell.width {
            log::debug!("{point_size}px: widest glyph {widest}px exceeds {}", cell.width);
            continue;
        }
        log::info!(
            "{}: {point_size}px fits {}x{} (ascent={}, descent={})",
            font.name(),
            cell.width,
            cell.height,
            extent.ascent,
            extent.descent
        );
        return Ok(FontMetrics {
            point_size,
            ascent: extent.ascent,
            descent: extent.descent,
            source,
        });
    }
    Err(FontError::NoFit {
        width: cell.width,
        height: cell.height,
    })
}

fn ink_extent<F: GlyphSource + ?Sized>(font: &F, chars: &[char], point_size: u32) -> LineExtent {
    chars
        .iter()
        .map(|ch| font.glyph_box(*ch, point_size))
        .filter(|bbox| !bbox.is_empty())
        .fold(LineExtent::default(), |acc, bbox| LineExtent {
            ascent: acc.ascent.max(bbox.ymax()),
            descent: acc.descent.max(-bbox.ymin),
        })
}
