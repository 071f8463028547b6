//! Decoding of legacy single-byte source files.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::CensusError;

/// Character encoding of a family of source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceEncoding(&'static Encoding);

impl Default for SourceEncoding {
    fn default() -> Self {
        Self(encoding_rs::WINDOWS_1251)
    }
}

impl SourceEncoding {
    /// Look up an encoding by its WHATWG label (`windows-1251`, `cp1251`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`CensusError::UnknownEncoding`] for unrecognised labels.
    pub fn for_label(label: &str) -> Result<Self, CensusError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| CensusError::UnknownEncoding(label.to_string()))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decode `bytes`, replacing malformed sequences.
    ///
    /// Malformed input is reported once for the whole file.
    #[must_use]
    pub fn decode<'b>(self, bytes: &'b [u8], path: &Path) -> Cow<'b, str> {
        let (text, had_errors) = self.0.decode_without_bom_handling(bytes);
        if had_errors {
            tracing::warn!(
                path = %path.display(),
                encoding = self.name(),
                "malformed bytes replaced while decoding"
            );
        }
        text
    }

    /// Read and decode a whole file.
    ///
    /// # Errors
    ///
    /// Returns [`CensusError::Io`] when the file cannot be read.
    pub fn read(self, path: &Path) -> Result<String, CensusError> {
        let bytes = std::fs::read(path).map_err(|source| CensusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.decode(&bytes, path).into_owned())
    }
}
