//! Codepoint ranges and the `--ext-ranges` grammar.
//!
//! A specification is a comma separated list of tokens, each either
//! `START-END` (inclusive) or a single codepoint, all in hexadecimal:
//! `00A0-00FF,2010-2027,2592`. A bound may carry a `U+` prefix.
use std::{fmt, ops::RangeInclusive, str::FromStr};

use crate::error::{FontError, Result};

/// Printable ASCII, `' '..='~'`.
pub const BASE_RANGE: CodepointRange = CodepointRange {
    start: 0x20,
    end: 0x7E,
};

const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// Inclusive span of codepoints sharing one glyph table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start > end {
            return Err(FontError::RangeSpec(format!(
                "start U+{start:04X} is above end U+{end:04X}"
            )));
        }
        if end > MAX_CODEPOINT {
            return Err(FontError::RangeSpec(format!(
                "U+{end:04X} is beyond the last Unicode codepoint"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(codepoint: u32) -> Result<Self> {
        Self::new(codepoint, codepoint)
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        (self.start..=self.end).contains(&codepoint)
    }

    pub fn overlaps(&self, other: &CodepointRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn codepoints(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// C identifier for this range's table, e.g. `u2500`.
    pub fn table_name(&self) -> String {
        format!("u{:04X}", self.start)
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "U+{:04X}", self.start)
        } else {
            write!(f, "U+{:04X}-U+{:04X}", self.start, self.end)
        }
    }
}

impl FromStr for CodepointRange {
    type Err = FontError;

    fn from_str(token: &str) -> Result<Self> {
        let token = token.trim();
        match token.split_once('-') {
            Some((start, end)) => Self::new(parse_bound(start, token)?, parse_bound(end, token)?),
            None => Self::single(parse_bound(token, token)?),
        }
    }
}

fn parse_bound(bound: &str, token: &str) -> Result<u32> {
    let bound = bound.trim();
    let digits = bound
        .strip_prefix("U+")
        .or_else(|| bound.strip_prefix("u+"))
        .or_else(|| bound.strip_prefix("0x"))
        .or_else(|| bound.strip_prefix("0X"))
        .unwrap_or(bound);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FontError::RangeSpec(format!(
            "'{token}': '{bound}' is not a hex codepoint"
        )));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|e| FontError::RangeSpec(format!("'{token}': {e}")))
}

/// Parse a full range specification. Any malformed token fails the whole
/// list, so nothing is rendered from a half-understood specification.
pub fn parse_ranges(spec: &str) -> Result<Vec<CodepointRange>> {
    spec.split(',').map(str::parse).collect()
}

/// Two ranges claiming the same codepoints. Lookup stays first-match-wins,
/// so the later range's glyphs for the shared span are unreachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlap {
    /// Extended range `index` shares codepoints with the base range.
    Base { index: usize },
    /// Extended range `later` is shadowed by `earlier` on the shared span.
    Extended { earlier: usize, later: usize },
}

pub fn find_overlaps(base: CodepointRange, extended: &[CodepointRange]) -> Vec<Overlap> {
    let mut found = Vec::new();
    for (index, range) in extended.iter().enumerate() {
        if range.overlaps(&base) {
            found.push(Overlap::Base { index });
        }
        for (earlier, prev) in extended[..index].iter().enumerate() {
            if range.overlaps(prev) {
                found.push(Overlap::Extended {
                    earlier,
                    later: index,
                });
            }
        }
    }
    found
}
