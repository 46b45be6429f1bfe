use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use digest_core::{Output, OutputPayload};
use digest_logging::digest_info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize scores: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Receives each output as soon as the router produces it.
pub trait OutputSink: Send + Sync {
    fn emit(&self, output: Output) -> Result<(), PersistError>;
}

/// Writes outputs next to their inputs, or under `base_dir` when they have none.
pub struct FileOutputSink {
    base_dir: PathBuf,
}

impl FileOutputSink {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn target_dir(&self, output: &Output) -> PathBuf {
        match &output.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }
}

impl OutputSink for FileOutputSink {
    fn emit(&self, output: Output) -> Result<(), PersistError> {
        let content = render_payload(&output.payload)?;
        let writer = AtomicFileWriter::new(self.target_dir(&output));
        let path = writer.write(output.kind.filename(), &content)?;
        digest_info!("Wrote {:?} ({} bytes)", path, content.len());
        Ok(())
    }
}

/// Collects outputs in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    outputs: Mutex<Vec<Output>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_outputs(self) -> Vec<Output> {
        self.outputs.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OutputSink for MemorySink {
    fn emit(&self, output: Output) -> Result<(), PersistError> {
        self.outputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(output);
        Ok(())
    }
}

/// Text payloads are written verbatim, scores as a JSON array.
pub fn render_payload(payload: &OutputPayload) -> Result<String, PersistError> {
    match payload {
        OutputPayload::Text(text) => Ok(text.clone()),
        OutputPayload::Scores(scores) => Ok(serde_json::to_string(scores)?),
    }
}
