//! 1 bit per pixel packing.
//!
//! Each pixel row occupies `ceil(width / 8)` bytes. Within a byte the most
//! significant bit is the leftmost pixel; bits past the right edge of the
//! cell are always zero. Nothing here knows about fonts.
use std::fmt;

use crate::Cell;

/// Monochrome pixel grid, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn for_cell(cell: Cell) -> Self {
        Self::new(cell.width, cell.height)
    }

    /// Build a bitmap from text rows, `#` marking a set pixel. Rows shorter
    /// than the widest one are padded with unset pixels.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut bitmap = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                bitmap.set(x, y, ch == '#');
            }
        }
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Out of bounds reads are unset.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    /// Out of bounds writes are clipped.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = on;
        }
    }

    pub fn is_blank(&self) -> bool {
        !self.pixels.contains(&true)
    }

    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics; a zero-width bitmap has no visible rows anyway
        self.pixels.chunks(self.width.max(1))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        for row in self.rows() {
            let line: String = row.iter().map(|p| if *p { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Packed bytes per row for a grid `width` pixels wide.
pub fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(8)
}

/// Pack a row-major grid. Pixels missing from a short slice count as unset.
pub fn pack_pixels(pixels: &[bool], width: usize, height: usize) -> Vec<u8> {
    let row_bytes = bytes_per_row(width);
    let mut out = vec![0u8; row_bytes * height];
    for y in 0..height {
        for byte_idx in 0..row_bytes {
            let mut value = 0u8;
            for bit in 0..8 {
                let x = byte_idx * 8 + bit;
                if x < width && pixels.get(y * width + x).copied().unwrap_or(false) {
                    value |= 0x80 >> bit;
                }
            }
            out[y * row_bytes + byte_idx] = value;
        }
    }
    out
}

pub fn pack_bitmap(bitmap: &Bitmap) -> Vec<u8> {
    pack_pixels(&bitmap.pixels, bitmap.width, bitmap.height)
}

/// Inverse of [`pack_bitmap`]. Padding bits are ignored and bytes missing
/// from a short slice decode as unset pixels.
pub fn unpack(bytes: &[u8], cell: Cell) -> Bitmap {
    let row_bytes = cell.bytes_per_row();
    let mut bitmap = Bitmap::for_cell(cell);
    for y in 0..cell.height {
        for x in 0..cell.width {
            let byte = bytes.get(y * row_bytes + x / 8).copied().unwrap_or(0);
            bitmap.set(x, y, byte & (0x80 >> (x % 8)) != 0);
        }
    }
    bitmap
}
