use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use termfont::{
    build_asset, emit_base, emit_extended, write_all_atomic, Cell, EmitOptions, FontAsset,
    GeneratorConfig, TrueTypeFont, DEFAULT_THRESHOLD,
};

use crate::console::render_preview;
mod console;

/// Searched in order when `--font` is not given.
const FONT_CANDIDATES: [&str; 4] = [
    "fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
];

#[derive(Parser)]
#[command(name = "termfont", about = "Fixed-cell bitmap font generator for embedded terminals")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Args)]
struct FontArgs {
    /// Monospace TTF/OTF font, or a ZIP archive containing one
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Cell width in pixels
    #[arg(long, default_value_t = 10)]
    width: usize,
    /// Cell height in pixels
    #[arg(long, default_value_t = 20)]
    height: usize,
    /// Extended Unicode ranges, e.g. "00A0-00FF,2010-2027,2190-2199"
    #[arg(long)]
    ext_ranges: Option<String>,
    /// Minimum coverage (1-255) for a pixel to be set
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generate the base font header and, with --ext-ranges, the extended header
    Generate {
        #[command(flatten)]
        font: FontArgs,
        /// Base header path [default: term_font_<W>x<H>.h]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Extended header path [default: term_font_ext.h]
        #[arg(long)]
        ext_output: Option<PathBuf>,
        /// Emit plain const arrays without PROGMEM / <pgmspace.h>
        #[arg(long)]
        no_progmem: bool,
    },
    /// Report the fitted size and per-range glyph coverage without writing files
    Inspect {
        #[command(flatten)]
        font: FontArgs,
    },
    /// Print glyphs as the device would draw them
    Preview {
        #[command(flatten)]
        font: FontArgs,
        #[arg(short, long)]
        text: String,
        /// Use '#' and '.' instead of block characters
        #[arg(long)]
        ascii: bool,
    },
}

impl FontArgs {
    fn build(&self) -> Result<FontAsset> {
        let path = match &self.font {
            Some(path) => path.clone(),
            None => {
                let path = find_default_font()
                    .context("No monospace font found. Use --font to specify one.")?;
                log::info!("Using system font: {}", path.display());
                path
            }
        };
        let font = TrueTypeFont::load(&path)
            .with_context(|| format!("Failed to load font {}", path.display()))?;

        let cell = Cell::new(self.width, self.height)?;
        let mut config = GeneratorConfig::new(cell).with_threshold(self.threshold);
        if let Some(spec) = &self.ext_ranges {
            config = config.with_range_spec(spec)?;
        }
        let asset = build_asset(&font, &config)
            .with_context(|| format!("Could not build font from {}", path.display()))?;
        Ok(asset)
    }
}

fn find_default_font() -> Option<PathBuf> {
    FONT_CANDIDATES
        .into_iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match cli.command {
        Cmd::Generate {
            font,
            output,
            ext_output,
            no_progmem,
        } => {
            if font.ext_ranges.is_none() && ext_output.is_some() {
                log::warn!("--ext-output given without --ext-ranges; no extended header written");
            }
            let asset = font.build()?;
            let options = EmitOptions::default().with_progmem(!no_progmem);

            // everything is rendered to memory before the first file is touched
            let base = emit_base(&asset, &options)?;
            let extended = emit_extended(&asset, &options)?;

            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("term_font_{}x{}.h", font.width, font.height))
            });
            let ext_output = extended
                .as_ref()
                .map(|_| ext_output.unwrap_or_else(|| PathBuf::from("term_font_ext.h")));

            let mut files: Vec<(&Path, &str)> = vec![(output.as_path(), base.as_str())];
            if let (Some(path), Some(extended)) = (&ext_output, &extended) {
                files.push((path.as_path(), extended.as_str()));
            }
            write_all_atomic(&files).with_context(|| {
                let paths: Vec<String> = files.iter().map(|(p, _)| p.display().to_string()).collect();
                format!("Failed to write {}", paths.join(", "))
            })?;
            for (path, _) in &files {
                println!("Output: {}", path.display());
            }
            println!("Done!");
        }
        Cmd::Inspect { font } => {
            let asset = font.build()?;
            let cell = asset.cell;
            let m = asset.metrics;
            println!("Font: {}", asset.source);
            println!(
                "  PT size: {}, ascent={}, descent={} ({:?})",
                m.point_size, m.ascent, m.descent, m.source
            );
            println!(
                "  Cell: {}x{}, bytes/glyph: {}",
                cell.width,
                cell.height,
                cell.bytes_per_glyph()
            );
            for table in std::iter::once(&asset.base).chain(&asset.extended) {
                println!(
                    "  {} {}: {} glyphs, {} rendered, {} blank, {} missing, {} bytes",
                    table.name(),
                    table.range(),
                    table.len(),
                    table.rendered_count(),
                    table.blank_count(),
                    table.missing_count(),
                    table.byte_len()
                );
            }
        }
        Cmd::Preview { font, text, ascii } => {
            let asset = font.build()?;
            let (on, off) = if ascii { ('#', '.') } else { ('█', '·') };
            println!("{}", render_preview(&asset, &text, on, off));
        }
    }
    Ok(())
}
