use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../termfont/tests/fonts/DejaVuSansMono.ttf")
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn termfont() -> Command {
    Command::cargo_bin("termfont").unwrap()
}

#[test]
fn generate_writes_base_header() {
    let dir = out_dir("cli_generate");
    let output = dir.join("term_font_10x20.h");
    termfont()
        .arg("generate")
        .arg("--font")
        .arg(fixture_font())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"));

    let header = fs::read_to_string(&output).unwrap();
    assert!(header.contains("static constexpr uint8_t BYTES_PER_GLYPH = 40;"));
    assert!(header.contains(" * Source: DejaVuSansMono.ttf"));
    assert!(!dir.join("term_font_ext.h").exists());
}

#[test]
fn generate_with_extended_ranges() {
    let dir = out_dir("cli_generate_ext");
    let output = dir.join("font.h");
    let ext_output = dir.join("font_ext.h");
    termfont()
        .args(["generate", "--width", "8", "--height", "16"])
        .arg("--font")
        .arg(fixture_font())
        .args(["--ext-ranges", "2500-257F,2580-259F"])
        .arg("-o")
        .arg(&output)
        .arg("--ext-output")
        .arg(&ext_output)
        .arg("--no-progmem")
        .assert()
        .success();

    let base = fs::read_to_string(&output).unwrap();
    assert!(base.contains("static constexpr uint8_t BYTES_PER_GLYPH = 16;"));
    assert!(!base.contains("PROGMEM"));
    let ext = fs::read_to_string(&ext_output).unwrap();
    assert!(ext.contains("static const uint8_t u2580[512] = {"));
    assert!(ext.contains("inline const uint8_t* lookup(uint16_t cp) {"));
}

#[test]
fn missing_font_fails_without_output() {
    let dir = out_dir("cli_missing_font");
    let output = dir.join("font.h");
    termfont()
        .args(["generate", "--font", "/nonexistent/NoSuchFont.ttf"])
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("NoSuchFont.ttf"));
    assert!(!output.exists());
}

#[test]
fn bad_range_spec_fails_without_output() {
    let dir = out_dir("cli_bad_ranges");
    let output = dir.join("font.h");
    termfont()
        .arg("generate")
        .arg("--font")
        .arg(fixture_font())
        .args(["--ext-ranges", "2500-24FF"])
        .arg("-o")
        .arg(&output)
        .assert()
        .failure();
    assert!(!output.exists());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn zero_sized_cell_is_rejected() {
    termfont()
        .args(["inspect", "--width", "0"])
        .arg("--font")
        .arg(fixture_font())
        .assert()
        .failure();
}

#[test]
fn inspect_reports_tables() {
    termfont()
        .arg("inspect")
        .arg("--font")
        .arg(fixture_font())
        .args(["--ext-ranges", "E000-E00F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Font: DejaVuSansMono.ttf"))
        .stdout(predicate::str::contains("Cell: 10x20, bytes/glyph: 40"))
        .stdout(predicate::str::contains(
            "uE000 U+E000-U+E00F: 16 glyphs, 0 rendered, 16 blank, 16 missing, 640 bytes",
        ));
}

#[test]
fn preview_draws_text() {
    termfont()
        .args(["-q", "preview", "--ascii", "--text", "Hi"])
        .arg("--font")
        .arg(fixture_font())
        .assert()
        .success()
        .stdout(predicate::str::contains("#"));
}

#[test]
fn unwritable_extended_output_leaves_no_base_header() {
    let dir = out_dir("cli_ext_unwritable");
    let output = dir.join("font.h");
    let blocker = dir.join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    termfont()
        .arg("generate")
        .arg("--font")
        .arg(fixture_font())
        .args(["--ext-ranges", "2500-2502"])
        .arg("-o")
        .arg(&output)
        .arg("--ext-output")
        .arg(blocker.join("ext.h"))
        .assert()
        .failure();
    assert!(!output.exists());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
}

#[test]
fn unfittable_cell_fails_without_output() {
    // a 1px line cannot hold DejaVu's ascent plus descent at any size
    let dir = out_dir("cli_no_fit");
    let output = dir.join("font.h");
    termfont()
        .args(["generate", "--width", "1", "--height", "1"])
        .arg("--font")
        .arg(fixture_font())
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no point size fits a 1x1 cell"));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}
