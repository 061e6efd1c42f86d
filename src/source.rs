//! Opening trip-record sources as buffered line readers.
//!
//! Plain files are read as-is; anything ending in `.gz` is decompressed on
//! the fly.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

fn is_gzip(name: &str) -> bool {
    name.ends_with(".gz")
}

fn buffered<'a, R: Read + 'a>(inner: R, gzip: bool) -> Box<dyn BufRead + 'a> {
    if gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(inner)))
    } else {
        Box::new(BufReader::new(inner))
    }
}

/// Opens a local trip-record file for line-by-line reading.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let gzip = is_gzip(&path.to_string_lossy());
    debug!(path = %path.display(), gzip, "Opened source");

    Ok(buffered(file, gzip))
}

/// Wraps an in-memory body (e.g. a downloaded file) as a line reader.
///
/// `name` is only used to decide whether the body is gzip-compressed.
pub fn reader_from_bytes<'a>(name: &str, bytes: &'a [u8]) -> Box<dyn BufRead + 'a> {
    buffered(bytes, is_gzip(name))
}
