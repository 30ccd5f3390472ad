use super::data_uri::{AudioClip, AudioFormat};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Candidate audio written to a temporary file for upload.
///
/// The file is removed when this value is dropped.
pub struct AudioFile {
    file: NamedTempFile,
    pub format: AudioFormat,
    pub size_bytes: usize,
}

impl AudioFile {
    pub fn write(clip: &AudioClip) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("candidate-audio-")
            .suffix(&format!(".{}", clip.format.extension()))
            .tempfile()
            .context("Failed to create temporary audio file")?;

        file.write_all(&clip.bytes)
            .context("Failed to write temporary audio file")?;
        file.flush().context("Failed to flush temporary audio file")?;

        debug!(
            "Wrote {} bytes of {} audio to {}",
            clip.bytes.len(),
            clip.format.mime_type(),
            file.path().display()
        );

        Ok(Self {
            file,
            format: clip.format,
            size_bytes: clip.bytes.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
