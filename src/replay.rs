//! Recorded detection sessions.
//!
//! A session is a stream of JSON objects, one per line, each pairing the
//! frame's detector-to-display transform with the lifecycle event the
//! detector reported. This is how the full data path is exercised without a
//! live detection pipeline.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::geometry::CoordinateTransform;
use crate::overlay::TrackEvent;

/// One line of a recorded detection session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub transform: CoordinateTransform,
    pub event: TrackEvent,
}

/// Parse a single session line. `line` is the 1-based line number, used for
/// error reporting only.
pub fn parse_record(line: usize, text: &str) -> Result<FrameRecord, Error> {
    serde_json::from_str(text).map_err(|source| Error::MalformedRecord { line, source })
}

/// Read a whole recorded session. Blank lines are skipped; the first
/// malformed line aborts the read with its line number.
pub fn read_records(reader: impl BufRead) -> Result<Vec<FrameRecord>, Error> {
    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        records.push(parse_record(number + 1, &text)?);
    }
    Ok(records)
}
