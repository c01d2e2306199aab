//! File-backed line source and sink.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{LineSink, LineSource, PersistResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads lines from a text file. The file is opened and closed per read.
///
/// A leading UTF-8 byte order mark is dropped and invalid UTF-8 sequences
/// decode to U+FFFD instead of failing the read.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading from `path`. The file is not touched yet.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineSource for FileSource {
    fn read_lines(&mut self) -> PersistResult<Vec<String>> {
        let bytes = fs::read(&self.path)?;
        let text = String::from_utf8_lossy(bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes));
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        tracing::debug!("Read {} lines from {}", lines.len(), self.path.display());
        Ok(lines)
    }
}

/// Writes lines to a text file, truncating any previous content.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink writing to `path`. The file is created on write.
    pub fn create(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineSink for FileSink {
    fn write_lines(&mut self, lines: &[String]) -> PersistResult<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        tracing::debug!("Wrote {} lines to {}", lines.len(), self.path.display());
        Ok(())
    }
}
