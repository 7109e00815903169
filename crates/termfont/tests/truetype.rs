//! Tests against a real font, rasterized by fontdue.

use std::path::Path;

use termfont::{
    build_asset, emit_base, emit_extended, fit_cell, unpack, Cell, EmitOptions, FontError,
    GeneratorConfig, GlyphSource, MetricsSource, TrueTypeFont, BASE_RANGE,
};

const DEJAVU_MONO: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

fn dejavu() -> TrueTypeFont {
    TrueTypeFont::from_bytes("DejaVuSansMono.ttf", DEJAVU_MONO).expect("fixture font parses")
}

#[test]
fn load_from_path_uses_the_file_name() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSansMono.ttf");
    let font = TrueTypeFont::load(&path).unwrap();
    assert_eq!(font.name(), "DejaVuSansMono.ttf");
    assert!(font.glyph_count() > 95);
}

#[test]
fn missing_file_is_font_not_found() {
    let err = TrueTypeFont::load(Path::new("/nonexistent/NoSuchFont.ttf"))
        .err()
        .unwrap();
    assert!(matches!(err, FontError::FontNotFound(_)));
}

#[test]
fn garbage_is_a_load_error() {
    let err = TrueTypeFont::from_bytes("junk.ttf", b"definitely not a font")
        .err()
        .unwrap();
    assert!(matches!(err, FontError::Load(_)));
}

#[test]
fn reports_line_metrics_and_coverage() {
    let font = dejavu();
    assert_eq!(MetricsSource::probe(&font), MetricsSource::LineMetrics);
    assert!(font.has_glyph('A'));
    assert!(font.has_glyph('█'));
    assert!(!font.has_glyph('\u{E000}'));
}

#[test]
fn fits_the_default_cell() {
    let font = dejavu();
    let cell = Cell::default();
    let m = fit_cell(&font, cell, BASE_RANGE).unwrap();
    assert!((10..=16).contains(&m.point_size), "point size {}", m.point_size);
    assert!(m.ascent + m.descent <= 20);
    for ch in ' '..='~' {
        assert!(font.glyph_box(ch, m.point_size).width <= 10, "{ch} too wide");
    }
    // one size up no longer fits, either vertically or horizontally
    let next = m.point_size + 1;
    let extent = font.line_extent(next).unwrap();
    let widest = (' '..='~')
        .map(|ch| font.glyph_box(ch, next).width)
        .max()
        .unwrap();
    assert!(extent.ascent + extent.descent > 20 || widest > 10);
}

#[test]
fn ascii_table_has_ink_where_expected() {
    let asset = build_asset(&dejavu(), &GeneratorConfig::default()).unwrap();
    assert_eq!(asset.base.byte_len(), 3800);
    assert!(asset.base.blank_count() < 5);
    assert_eq!(asset.base.missing_count(), 0);
    assert!(asset.glyph(0x20).iter().all(|b| *b == 0));
    for ch in ['A', 'M', 'W', '@', '#', 'g', '0'] {
        let bitmap = unpack(asset.glyph(ch as u32), asset.cell);
        assert!(bitmap.count_set() > 10, "{ch} has too little ink:\n{bitmap:?}");
    }
}

#[test]
fn descenders_reach_below_the_baseline() {
    let asset = build_asset(&dejavu(), &GeneratorConfig::default()).unwrap();
    let baseline = asset.metrics.baseline(asset.cell) as usize;
    let g = unpack(asset.glyph('g' as u32), asset.cell);
    let below = (baseline..asset.cell.height)
        .flat_map(|y| (0..asset.cell.width).map(move |x| (x, y)))
        .filter(|(x, y)| g.get(*x, *y))
        .count();
    assert!(below > 0, "no ink under the baseline:\n{g:?}");

    let a = unpack(asset.glyph('A' as u32), asset.cell);
    let a_below = (baseline + 1..asset.cell.height)
        .flat_map(|y| (0..asset.cell.width).map(move |x| (x, y)))
        .filter(|(x, y)| a.get(*x, *y))
        .count();
    assert_eq!(a_below, 0, "'A' should sit on the baseline:\n{a:?}");
}

#[test]
fn block_elements_and_private_use() {
    let config = GeneratorConfig::default()
        .with_range_spec("2580-259F,E000-E00F")
        .unwrap();
    let asset = build_asset(&dejavu(), &config).unwrap();

    let blocks = &asset.extended[0];
    assert_eq!(blocks.missing_count(), 0);
    let full = unpack(asset.lookup_bytes(0x2588).unwrap(), asset.cell);
    assert!(full.count_set() > 150, "full block is not full:\n{full:?}");

    let private = &asset.extended[1];
    assert_eq!(private.len(), 16);
    assert_eq!(private.blank_count(), 16);
    assert_eq!(private.missing_count(), 16);
    assert!(private.glyphs().iter().all(|g| g.bytes.len() == 40));
}

#[test]
fn two_runs_produce_identical_headers() {
    let config = GeneratorConfig::default()
        .with_range_spec("00A0-00FF,2500-257F")
        .unwrap();
    let options = EmitOptions::default();
    let a = build_asset(&dejavu(), &config).unwrap();
    let b = build_asset(&dejavu(), &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(emit_base(&a, &options).unwrap(), emit_base(&b, &options).unwrap());
    assert_eq!(
        emit_extended(&a, &options).unwrap(),
        emit_extended(&b, &options).unwrap()
    );
}

#[cfg(feature = "zip")]
#[test]
fn loads_font_from_zip_archive() {
    use std::io::{Cursor, Write};
    use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    writer.start_file("README.txt", options).unwrap();
    writer.write_all(b"not a font").unwrap();
    writer.start_file("fonts/DejaVuSansMono.ttf", options).unwrap();
    writer.write_all(DEJAVU_MONO).unwrap();
    let archive = writer.finish().unwrap().into_inner();

    let font = TrueTypeFont::from_bytes("fonts.zip", &archive).unwrap();
    assert_eq!(font.name(), "DejaVuSansMono.ttf");
    let zipped = build_asset(&font, &GeneratorConfig::default()).unwrap();
    let plain = build_asset(&dejavu(), &GeneratorConfig::default()).unwrap();
    assert_eq!(zipped.base, plain.base);
}
