//! File I/O and text decoding for MPR files
//!
//! MPR files come from Windows CAM installations and show up in UTF-8
//! (with or without BOM) or Windows-1252. Decoding therefore never fails:
//! valid UTF-8 is taken as-is, anything else goes through a CP1252 table
//! decode, which is total over all byte values.

use std::fs;
use std::path::{Path, PathBuf};

use mprkit_core::{Error, Result};

/// Unicode code points for CP1252 bytes 0x80..=0x9F.
///
/// The five code points CP1252 leaves undefined (0x81, 0x8D, 0x8F, 0x90,
/// 0x9D) pass through at their Latin-1 positions.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Decode raw MPR bytes to text.
///
/// Strips a UTF-8 BOM when present, accepts valid UTF-8, and falls back
/// to a CP1252 decode for everything else.
pub fn decode_bytes(data: &[u8]) -> String {
    let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);

    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => data
            .iter()
            .map(|&b| match b {
                0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
                _ => b as char,
            })
            .collect(),
    }
}

/// MPR file reader for the CLI boundary.
///
/// The core components take already-decoded text; this is the one place
/// that touches the filesystem on the read side.
pub struct MprFileReader {
    path: PathBuf,
    file_size: u64,
}

impl MprFileReader {
    /// Create a reader for the given path.
    ///
    /// # Errors
    /// Returns an error if the path does not exist or is not a file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(Error::NotAFile { path });
        }

        let file_size = fs::metadata(&path)?.len();
        Ok(Self { path, file_size })
    }

    /// Get file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the entire file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read; decoding itself
    /// cannot fail.
    pub fn read_all(&self) -> Result<String> {
        if self.file_size > 50 * 1024 * 1024 {
            tracing::warn!(
                "Reading unusually large MPR file ({}MB) into memory",
                self.file_size / (1024 * 1024)
            );
        }

        let bytes = fs::read(&self.path).map_err(|source| Error::FileRead {
            path: self.path.clone(),
            source,
        })?;
        Ok(decode_bytes(&bytes))
    }
}
