//! Case file persistence.
//!
//! A case file is a UTF-8 JSON envelope:
//!
//! ```json
//! {"format":"digicase","format_version":1,"saved_at":"2024-05-01T09:30:00Z","case":{...}}
//! ```
//!
//! The envelope carries an explicit format tag and version so files can be
//! rejected cleanly when they were written by something else, cut short, or
//! produced by a newer release. `save_location` is not part of the payload.

mod atomic;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

use crate::model::Case;

pub use atomic::write_atomic;

/// File extension used for case files (without the dot).
pub const CASE_FILE_EXTENSION: &str = "digicase";

/// Value of the envelope's `format` field.
pub const FORMAT_TAG: &str = "digicase";

/// Latest case file format this crate reads and writes.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Oldest case file format this crate can still read.
const MIN_SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Error type for reading and writing case files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input ended before a complete case file was read.
    #[error("Case file {path} is truncated (unexpected end of data)")]
    TruncatedData { path: PathBuf },

    /// The input is not a case file this crate understands.
    #[error("Case file {path} has an invalid format: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// The file was written by a newer format version.
    #[error(
        "Unsupported case file format version {found}; supported range is {min_supported}..={max_supported}"
    )]
    UnsupportedFormatVersion { found: u32, min_supported: u32, max_supported: u32 },

    /// Serializing the case failed.
    #[error("Failed to encode case: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Whether the error means "the file exists but is not a usable case file".
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StoreError::TruncatedData { .. }
                | StoreError::InvalidFormat { .. }
                | StoreError::UnsupportedFormatVersion { .. }
        )
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A decoded case file: the case plus envelope metadata.
#[derive(Debug, Clone)]
pub struct CaseFile {
    pub format_version: u32,
    /// When the file was written (RFC 3339, UTC), if recorded.
    pub saved_at: Option<String>,
    pub case: Case,
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    format: &'static str,
    format_version: u32,
    saved_at: String,
    case: &'a Case,
}

// `case` stays untyped until the version has been checked.
#[derive(Deserialize)]
struct EnvelopeIn {
    format: String,
    format_version: u32,
    #[serde(default)]
    saved_at: Option<String>,
    case: serde_json::Value,
}

/// Append the case file extension when `path` has none.
pub fn with_case_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(CASE_FILE_EXTENSION)
    }
}

/// Serialize a case into case file bytes.
pub fn encode_case(case: &Case) -> StoreResult<Vec<u8>> {
    let envelope = EnvelopeOut {
        format: FORMAT_TAG,
        format_version: CURRENT_FORMAT_VERSION,
        saved_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        case,
    };
    serde_json::to_vec_pretty(&envelope).map_err(StoreError::Encode)
}

/// Decode case file bytes. `origin` is only used in error messages.
pub fn decode_case(bytes: &[u8], origin: &Path) -> StoreResult<CaseFile> {
    let envelope: EnvelopeIn =
        serde_json::from_slice(bytes).map_err(|err| classify_json_error(err, origin))?;

    if envelope.format != FORMAT_TAG {
        return Err(StoreError::InvalidFormat {
            path: origin.to_path_buf(),
            reason: format!("expected format '{}', found '{}'", FORMAT_TAG, envelope.format),
        });
    }
    if !(MIN_SUPPORTED_FORMAT_VERSION..=CURRENT_FORMAT_VERSION).contains(&envelope.format_version)
    {
        return Err(StoreError::UnsupportedFormatVersion {
            found: envelope.format_version,
            min_supported: MIN_SUPPORTED_FORMAT_VERSION,
            max_supported: CURRENT_FORMAT_VERSION,
        });
    }

    let case: Case =
        serde_json::from_value(envelope.case).map_err(|err| classify_json_error(err, origin))?;

    Ok(CaseFile { format_version: envelope.format_version, saved_at: envelope.saved_at, case })
}

fn classify_json_error(err: serde_json::Error, origin: &Path) -> StoreError {
    match err.classify() {
        Category::Eof => StoreError::TruncatedData { path: origin.to_path_buf() },
        Category::Io => StoreError::Io {
            path: origin.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, err.to_string()),
        },
        Category::Syntax | Category::Data => {
            StoreError::InvalidFormat { path: origin.to_path_buf(), reason: err.to_string() }
        }
    }
}

/// Write `case` to `path`, replacing whatever is there.
pub fn save_case(case: &Case, path: &Path) -> StoreResult<()> {
    let bytes = encode_case(case)?;
    write_atomic(path, &bytes)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    tracing::debug!(
        path = %path.display(),
        events = case.events().len(),
        evidence = case.physical_evidence().len(),
        "case saved"
    );
    Ok(())
}

/// Read and decode the case file at `path`, keeping envelope metadata.
///
/// The returned case is bound to `path`.
pub fn read_case_file(path: &Path) -> StoreResult<CaseFile> {
    let bytes =
        std::fs::read(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    let mut file = decode_case(&bytes, path)?;
    file.case.set_save_location(path);
    tracing::debug!(
        path = %path.display(),
        format_version = file.format_version,
        "case opened"
    );
    Ok(file)
}

/// Read the case at `path`; the returned case is bound to `path`.
pub fn open_case(path: &Path) -> StoreResult<Case> {
    read_case_file(path).map(|file| file.case)
}
