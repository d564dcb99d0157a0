//! Error types for model construction, JSON loading and file I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// A violated rule while building or loading a model entity.
///
/// JSON-derived variants carry the location of the offending value as a
/// JSONPath-like string (e.g. `$.plants[1].min-powers`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Wrong JSON type or wrong object size.
    #[error("at `{path}`: expected {expected}")]
    Shape { path: String, expected: String },

    /// A required key is absent from a JSON object.
    #[error("at `{path}`: missing key \"{key}\"")]
    MissingKey { path: String, key: &'static str },

    /// An array length does not match the timeline length.
    #[error("at `{path}`: expected {expected} values, found {found}")]
    SizeMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    /// No zone with the given identifier is registered.
    #[error("at `{path}`: no zone with identifier \"{id}\"")]
    UnresolvedReference { path: String, id: String },

    /// An embedded zone identifier differs from the resolved zone.
    #[error("at `{path}`: different zone identifiers \"{found}\" and \"{expected}\"")]
    IdentifierMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// A scenario collection is full.
    #[error("cannot add more than {capacity} {kind} to a scenario")]
    CapacityExceeded { kind: &'static str, capacity: usize },

    /// An identifier is longer than [`crate::component::ID_MAX_LENGTH`].
    #[error("at `{path}`: identifier \"{id}\" is longer than {max} bytes")]
    IdentifierTooLong {
        path: String,
        id: String,
        max: usize,
    },

    /// A timestep index lies outside the timeline.
    #[error("timestep {timestep} is outside a timeline of {len} timesteps")]
    TimestepOutOfRange { timestep: usize, len: usize },
}

impl ModelError {
    pub(crate) fn shape(path: &str, expected: impl Into<String>) -> Self {
        Self::Shape {
            path: path.to_string(),
            expected: expected.into(),
        }
    }
}

/// Top-level error for loading, writing and exporting documents.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid model content.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// File could not be read or written.
    #[error("cannot access \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed JSON text.
    #[error("problem while loading JSON file \"{}\": {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failure while writing an output stream.
    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),

    /// Failure while writing CSV.
    #[error("cannot write CSV: {0}")]
    Csv(#[from] csv::Error),
}
