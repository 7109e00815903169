use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),
    #[error("font could not be loaded: {0}")]
    Load(String),
    #[error("no point size fits a {width}x{height} cell")]
    NoFit { width: usize, height: usize },
    #[error("invalid range specification: {0}")]
    RangeSpec(String),
    #[error("invalid cell size {width}x{height}: both dimensions must be at least 1")]
    InvalidCell { width: usize, height: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("formatting error while emitting header")]
    Fmt,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
