//! Core types for j1939-dl

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ValidationError;

/// J1939 Parameter Group Number as selected by the user
///
/// Treated as an opaque identifier: the generation server decides what it
/// accepts. Surrounding whitespace is trimmed and blank identifiers are
/// rejected.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PgnId(String);

impl PgnId {
    /// Create a PGN identifier, trimming whitespace
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankPgn);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PgnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PgnId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u32> for PgnId {
    fn from(pgn: u32) -> Self {
        Self(pgn.to_string())
    }
}

/// Checked PGN identifiers in the order they were checked
///
/// Serializes as a plain JSON array of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(Vec<PgnId>);

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier; returns false if it was already selected
    pub fn insert(&mut self, pgn: PgnId) -> bool {
        if self.0.contains(&pgn) {
            return false;
        }
        self.0.push(pgn);
        true
    }

    /// Remove an identifier; returns false if it was not selected
    pub fn remove(&mut self, pgn: &PgnId) -> bool {
        let before = self.0.len();
        self.0.retain(|p| p != pgn);
        self.0.len() != before
    }

    /// Whether `pgn` is selected
    pub fn contains(&self, pgn: &PgnId) -> bool {
        self.0.contains(pgn)
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected identifiers
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in selection order
    pub fn iter(&self) -> impl Iterator<Item = &PgnId> {
        self.0.iter()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<PgnId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = PgnId>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for pgn in iter {
            set.insert(pgn);
        }
        set
    }
}

/// Output file format rendered by the generation server
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Comma separated values, one row per frame
    #[default]
    Csv,
    /// PEAK CAN trace
    Trc,
    /// Plain text dump
    Txt,
}

impl Format {
    /// Every format in selector order
    pub const ALL: [Format; 3] = [Format::Csv, Format::Trc, Format::Txt];

    /// Wire name, also the file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Trc => "trc",
            Format::Txt => "txt",
        }
    }

    /// File extension for downloads in this format
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// MIME type the generation server answers with
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::Trc | Format::Txt => "text/plain",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "trc" => Ok(Format::Trc),
            "txt" => Ok(Format::Txt),
            _ => Err(ValidationError::UnknownFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Requested dataset duration, exactly as entered
///
/// Serializes untagged: a JSON number for [`DatasetDuration::Seconds`] and a
/// JSON string for [`DatasetDuration::Text`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetDuration {
    /// Numeric entry
    Seconds(u64),
    /// Raw text from an input control
    Text(String),
}

impl DatasetDuration {
    /// Positive whole number of seconds, if the value is one
    pub fn as_seconds(&self) -> Option<u64> {
        let secs = match self {
            DatasetDuration::Seconds(secs) => *secs,
            DatasetDuration::Text(text) => text.trim().parse::<u64>().ok()?,
        };
        (secs > 0).then_some(secs)
    }
}

impl Default for DatasetDuration {
    fn default() -> Self {
        DatasetDuration::Text("10".to_string())
    }
}

impl std::fmt::Display for DatasetDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetDuration::Seconds(secs) => write!(f, "{}", secs),
            DatasetDuration::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for DatasetDuration {
    fn from(secs: u64) -> Self {
        DatasetDuration::Seconds(secs)
    }
}

impl From<&str> for DatasetDuration {
    fn from(text: &str) -> Self {
        DatasetDuration::Text(text.to_string())
    }
}

impl From<String> for DatasetDuration {
    fn from(text: String) -> Self {
        DatasetDuration::Text(text)
    }
}

/// JSON body POSTed to the generation endpoint
///
/// Built fresh for every invocation and dropped once the exchange settles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Selected PGN identifiers
    pub pgns: SelectionSet,
    /// Selected output format
    pub format: Format,
    /// Requested duration
    pub duration: DatasetDuration,
}

/// Successful response from the generation server
#[derive(Clone, Debug)]
pub struct GenerationResult {
    /// Opaque file contents
    pub body: Bytes,
    /// File name from `Content-Disposition`, if the server sent one
    pub server_filename: Option<String>,
    /// `Content-Type` header, if present
    pub content_type: Option<String>,
}

/// A materialized download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Where the file was written
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: u64,
}

/// Events emitted by the request dispatcher
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A request is about to be sent
    Submitted {
        /// Selected PGN identifiers
        pgns: Vec<String>,
        /// Requested format
        format: Format,
        /// Requested duration as entered
        duration: String,
    },
    /// The response body was saved
    Downloaded {
        /// Destination path
        path: PathBuf,
        /// Number of bytes written
        bytes: u64,
    },
    /// The server answered with a non-success status
    Rejected {
        /// HTTP status code
        status: u16,
    },
    /// Network or processing failure
    TransportFailed {
        /// Error description
        error: String,
    },
    /// The form state failed validation; nothing was sent
    Invalid {
        /// Validation failure description
        reason: String,
    },
}
