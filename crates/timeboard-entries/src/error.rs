use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a whole load attempt. Malformed lines are not load errors;
/// they are logged and skipped by the parser.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("jsonl_path is not configured")]
    PathNotConfigured,

    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("scan {} at line {line}: {source}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("scan {}: line {line} exceeds {limit} bytes", path.display())]
    LineTooLong {
        path: PathBuf,
        line: usize,
        limit: usize,
    },

    #[error("reload task failed: {0}")]
    Join(String),
}
