//! Pipeline error taxonomy
//!
//! Recovery policy is part of each variant's contract:
//! - `BoundaryLoad` and `OutputDir` are fatal to the run
//! - `ImageryRead` aborts one file, `EmptyClip` one observation
//! - `Encoding` aborts the animation after temp-frame cleanup
//! - `UndefinedRatio` marks a value a caller insisted on reading
//!   numerically; reports carry the undefined case as data instead
//!
//! No operation is retried; reruns are treated as idempotent.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to load boundary {path}: {reason}")]
    BoundaryLoad { path: PathBuf, reason: String },

    #[error("failed to read imagery {path}: {source}")]
    ImageryRead {
        path: PathBuf,
        #[source]
        source: greentrace_core::Error,
    },

    #[error("clip of {date} produced an empty intersection with {area}")]
    EmptyClip { area: String, date: NaiveDate },

    #[error("undefined ratio: {0}")]
    UndefinedRatio(String),

    #[error("animation encoding failed: {0}")]
    Encoding(String),

    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] greentrace_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
