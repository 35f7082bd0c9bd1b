use crate::encoding::Encoding;
use crate::errors::{Error, ErrorKind};
use std::io::BufRead;

/// Opening marker of the embedded payload
const START_MARKER: &str = "{\"gameLength\"";

/// Closing marker of the embedded payload: the escaped quote that ends the
/// last stats record, the end of the nested array, and the closing brace of
/// the envelope
const END_MARKER: &str = "\\\"}]\"}";

/// Number of lines scanned for the payload by default
///
/// The payload occurs early in the container and the binary tail can be tens
/// of megabytes, so only the head of the file is ever decoded.
pub const DEFAULT_SCAN_LINES: usize = 20;

/// Reads at most `max_lines` lines from the input, strips the line
/// terminators, and decodes the concatenation with the given encoding.
pub(crate) fn head_text<R, E>(mut reader: R, max_lines: usize, encoding: &E) -> Result<String, Error>
where
    R: BufRead,
    E: Encoding,
{
    let mut head = Vec::new();
    let mut line = Vec::new();
    for _ in 0..max_lines {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        head.extend_from_slice(&line);
    }

    Ok(encoding.decode(&head).into_owned())
}

/// Returns the span of the embedded payload within the decoded head
///
/// The span starts at the first occurrence of `{"gameLength"` and ends
/// immediately after the first subsequent occurrence of the closing marker.
pub(crate) fn locate(text: &str) -> Result<&str, Error> {
    let start = text
        .find(START_MARKER)
        .ok_or_else(|| Error::new(ErrorKind::PayloadBoundary))?;
    let end = text[start..]
        .find(END_MARKER)
        .map(|i| start + i + END_MARKER.len())
        .ok_or_else(|| Error::new(ErrorKind::PayloadBoundary))?;

    Ok(&text[start..end])
}
