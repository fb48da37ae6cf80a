use crate::core::state::ProcessRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FIELDS_PER_RECORD: usize = 5;
const COMMENT_MARKER: char = '#';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: expected 5 fields, found {found}: {content:?}")]
    FieldCount {
        line: usize,
        found: usize,
        content: String,
    },
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: burst time must be positive")]
    ZeroBurst { line: usize },
    #[error("line {line}: queue rank must be at least 1")]
    ZeroRank { line: usize },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse process records, one per line: `label;burst;arrival;queue;priority`.
/// Blank lines and lines starting with `#` are skipped; the first malformed
/// line fails the whole load.
pub fn parse_records(input: &str) -> Result<Vec<ProcessRecord>, LoadError> {
    let mut records = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with(COMMENT_MARKER) {
            continue;
        }

        let fields: Vec<&str> = content.split(';').map(str::trim).collect();
        if fields.len() != FIELDS_PER_RECORD {
            return Err(LoadError::FieldCount {
                line,
                found: fields.len(),
                content: content.to_string(),
            });
        }

        let burst_time = parse_field(fields[1], line, "burst time")?;
        let arrival_time = parse_field(fields[2], line, "arrival time")?;
        let queue_rank = parse_field(fields[3], line, "queue rank")?;
        let priority = parse_field(fields[4], line, "priority")?;

        if burst_time == 0 {
            return Err(LoadError::ZeroBurst { line });
        }
        if queue_rank == 0 {
            return Err(LoadError::ZeroRank { line });
        }

        records.push(ProcessRecord::new(
            fields[0],
            burst_time,
            arrival_time,
            queue_rank,
            priority,
        ));
    }

    Ok(records)
}

/// Read and parse a record file.
pub fn load_path(path: &Path) -> Result<Vec<ProcessRecord>, LoadError> {
    let input = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&input)
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    line: usize,
    field: &'static str,
) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}
