//! Text encoding detection for visit files.
//!
//! A byte order mark wins when present. Otherwise input that is valid UTF-8
//! is taken as UTF-8 and everything else goes through `chardetng`. Every
//! guess is checked by decoding without replacement before it is accepted.

use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{IngestError, Result};

/// What to do when the encoding of a file cannot be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFallback {
    /// Decode with the given encoding, replacing malformed sequences.
    Default(&'static Encoding),
    /// Fail the load with [`IngestError::EncodingDetection`].
    Abort,
}

impl Default for EncodingFallback {
    fn default() -> Self {
        EncodingFallback::Default(UTF_8)
    }
}

/// How the encoding of a file was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    Bom,
    Detected,
    Fallback,
}

/// Encoding chosen for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEncoding {
    pub encoding: &'static Encoding,
    pub source: EncodingSource,
}

impl ResolvedEncoding {
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

/// Looks up an encoding by WHATWG label (`utf-8`, `windows-1251`, `koi8-r`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| IngestError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Returns the most likely encoding of `bytes`.
///
/// `path` is only used for error reporting.
pub fn detect_encoding(path: &Path, bytes: &[u8]) -> Result<(&'static Encoding, EncodingSource)> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        verify(path, encoding, &bytes[bom_len..])?;
        return Ok((encoding, EncodingSource::Bom));
    }

    if bytes.contains(&0) {
        return Err(IngestError::EncodingDetection {
            path: path.to_path_buf(),
            reason: "input contains NUL bytes".to_string(),
        });
    }

    if std::str::from_utf8(bytes).is_ok() {
        return Ok((UTF_8, EncodingSource::Detected));
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    verify(path, encoding, bytes)?;
    Ok((encoding, EncodingSource::Detected))
}

/// Detects the encoding of `bytes`, applying `fallback` when detection fails.
pub fn resolve_encoding(
    path: &Path,
    bytes: &[u8],
    fallback: EncodingFallback,
) -> Result<ResolvedEncoding> {
    match detect_encoding(path, bytes) {
        Ok((encoding, source)) => {
            tracing::debug!(path = %path.display(), encoding = encoding.name(), ?source, "detected encoding");
            Ok(ResolvedEncoding { encoding, source })
        }
        Err(error) => match fallback {
            EncodingFallback::Default(encoding) => {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    fallback = encoding.name(),
                    "falling back to default encoding"
                );
                Ok(ResolvedEncoding {
                    encoding,
                    source: EncodingSource::Fallback,
                })
            }
            EncodingFallback::Abort => Err(error),
        },
    }
}

fn verify(path: &Path, encoding: &'static Encoding, bytes: &[u8]) -> Result<()> {
    if encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .is_none()
    {
        return Err(IngestError::EncodingDetection {
            path: path.to_path_buf(),
            reason: format!("input is not valid {}", encoding.name()),
        });
    }
    Ok(())
}
