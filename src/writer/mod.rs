//! Output file writers.

use crate::error::GenerateError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const WRITER_BUFFER_SIZE: usize = 64 * 1024;

/// Buffered writer for one output artifact. The file is truncated on create.
pub struct ArtifactWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ArtifactWriter {
    pub fn create(path: &Path) -> Result<Self, GenerateError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| GenerateError::io(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(WRITER_BUFFER_SIZE, file),
        })
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), GenerateError> {
        self.writer
            .write_all(s.as_bytes())
            .map_err(|e| GenerateError::io(&self.path, e))
    }

    /// Flush and close, returning the written path
    pub fn finish(mut self) -> Result<PathBuf, GenerateError> {
        self.writer
            .flush()
            .map_err(|e| GenerateError::io(&self.path, e))?;
        Ok(self.path)
    }
}

/// Write a whole artifact in one go
pub fn write_artifact(path: &Path, contents: &str) -> Result<PathBuf, GenerateError> {
    let mut writer = ArtifactWriter::create(path)?;
    writer.write_str(contents)?;
    writer.finish()
}

/// Writes one file per table into a directory: `{dir}/{table}{suffix}`
pub struct TableDirWriter {
    output_dir: PathBuf,
    suffix: String,
    written: Vec<PathBuf>,
}

impl TableDirWriter {
    pub fn new(output_dir: PathBuf, suffix: impl Into<String>) -> Self {
        Self {
            output_dir,
            suffix: suffix.into(),
            written: Vec::new(),
        }
    }

    pub fn ensure_output_dir(&self) -> Result<(), GenerateError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| GenerateError::io(&self.output_dir, e))
    }

    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", table_name, self.suffix))
    }

    pub fn write_table(&mut self, table_name: &str, contents: &str) -> Result<(), GenerateError> {
        let path = write_artifact(&self.table_path(table_name), contents)?;
        self.written.push(path);
        Ok(())
    }

    /// Paths written, in write order
    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}
