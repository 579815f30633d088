//! Pretrained model artifacts.
//!
//! Each product ships with a serialized regression model. Best-price lookup
//! works entirely from historical data, so the artifact is only read and
//! sanity-checked, never deserialized or evaluated.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PriceError, Result};

/// First byte of a pickle stream using protocol 2 or later.
const PICKLE_PROTO_OPCODE: u8 = 0x80;

/// An opaque model artifact loaded from disk.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl ModelArtifact {
    /// Read an artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Io`] if the file cannot be read, or
    /// [`PriceError::ModelArtifact`] if it is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PriceError::io(path, e))?;
        let artifact = Self::from_bytes(path, bytes)?;
        debug!(
            path = %artifact.path.display(),
            size_bytes = artifact.size_bytes(),
            pickle_protocol = ?artifact.pickle_protocol(),
            "loaded model artifact"
        );
        Ok(artifact)
    }

    /// Wrap bytes that were already read.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::ModelArtifact`] if `bytes` is empty.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        if bytes.is_empty() {
            return Err(PriceError::ModelArtifact(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(Self { path, bytes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Pickle protocol version from the stream header, if it has one.
    /// Protocols 0 and 1 carry no header and report `None`.
    pub fn pickle_protocol(&self) -> Option<u8> {
        match self.bytes.as_slice() {
            [PICKLE_PROTO_OPCODE, version, ..] => Some(*version),
            _ => None,
        }
    }
}
