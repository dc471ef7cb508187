/// Duration probe implementation using lofty
use async_trait::async_trait;
use lofty::{AudioFile, Probe};
use mixtape_core::{DurationProbe, TrackFile};
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

/// Probe-specific errors
#[derive(Error, Debug)]
pub enum ProbeError {
    /// File type could not be detected
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Blocking task panicked or was cancelled
    #[error("Probe task failed: {0}")]
    Task(String),
}

impl From<ProbeError> for mixtape_core::MixtapeError {
    fn from(err: ProbeError) -> Self {
        mixtape_core::MixtapeError::probe(err.to_string())
    }
}

/// Reads the audio duration from the in-memory file with lofty
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyProbe;

impl LoftyProbe {
    pub fn new() -> Self {
        Self
    }

    /// Duration in seconds of an in-memory audio file.
    pub fn read_duration(bytes: &[u8]) -> Result<f64, ProbeError> {
        let tagged_file = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;
        Ok(tagged_file.properties().duration().as_secs_f64())
    }
}

#[async_trait]
impl DurationProbe for LoftyProbe {
    async fn probe(&self, file: &TrackFile) -> mixtape_core::Result<f64> {
        let bytes = file.bytes.clone();
        let seconds = tokio::task::spawn_blocking(move || Self::read_duration(&bytes))
            .await
            .map_err(|e| ProbeError::Task(e.to_string()))??;

        debug!(file = %file.name, seconds, "Probed duration");
        Ok(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bytes_fail() {
        assert!(LoftyProbe::read_duration(b"definitely not audio").is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(LoftyProbe::read_duration(&[]).is_err());
    }

    #[tokio::test]
    async fn test_probe_maps_to_core_error() {
        let file = TrackFile::new("noise.mp3", vec![0u8; 8]);
        match LoftyProbe::new().probe(&file).await {
            Err(mixtape_core::MixtapeError::Probe(_)) => {}
            other => panic!("Expected Probe error, got: {:?}", other),
        }
    }
}
