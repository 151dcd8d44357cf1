use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::types::TimeEntry;

/// Longest line accepted before the whole load is rejected (1 MiB).
pub const MAX_LINE_BYTES: usize = 1 << 20;

/// Outcome of decoding a single line of the log.
#[derive(Debug)]
pub enum ParsedLine {
    Entry(TimeEntry),
    Blank,
    Malformed(serde_json::Error),
}

/// Decode one raw line. Blank and whitespace-only lines are `Blank`.
pub fn parse_line(line: &[u8]) -> ParsedLine {
    if line.iter().all(u8::is_ascii_whitespace) {
        return ParsedLine::Blank;
    }

    match serde_json::from_slice::<TimeEntry>(line) {
        Ok(entry) => ParsedLine::Entry(entry),
        Err(e) => ParsedLine::Malformed(e),
    }
}

/// Read the JSONL file at `path` into a fresh batch of entries.
///
/// Malformed lines are logged with their line number and skipped. Only a
/// missing path, an unreadable file or an oversized line fails the batch.
pub fn load_jsonl(path: &Path) -> Result<Vec<TimeEntry>, LoadError> {
    if path.as_os_str().is_empty() {
        return Err(LoadError::PathNotConfigured);
    }

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_reader(BufReader::new(file), path)
}

/// Parse every line from `reader`. `path` is only used for error context.
pub fn parse_reader<R: BufRead>(mut reader: R, path: &Path) -> Result<Vec<TimeEntry>, LoadError> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut line_num = 0usize;

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64 + 1)
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                line: line_num + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        line_num += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if buf.len() > MAX_LINE_BYTES {
            return Err(LoadError::LineTooLong {
                path: path.to_path_buf(),
                line: line_num,
                limit: MAX_LINE_BYTES,
            });
        }

        match parse_line(&buf) {
            ParsedLine::Entry(entry) => entries.push(entry),
            ParsedLine::Blank => {}
            ParsedLine::Malformed(e) => {
                warn!(line = line_num, error = %e, "skipping malformed line");
            }
        }
    }

    debug!(lines = line_num, entries = entries.len(), "parsed {}", path.display());
    Ok(entries)
}
