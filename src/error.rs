//! Error types for the MRTD witness library

/// Error types for the MRTD witness library
#[derive(Debug, thiserror::Error)]
pub enum WitnessError {
    /// Input could not be decoded into a document tree at all
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    /// A tree search found no matching substructure
    #[error("Structure not found in {component}: expected {expected}")]
    StructureNotFound { component: String, expected: String },

    /// A digest output length outside the supported set was requested
    #[error("Unsupported digest length: {len} bytes (supported: 20, 28, 32, 48, 64)")]
    UnsupportedDigestLength { len: usize },

    /// Digest-substring search failed; the supplied sub-document bytes are
    /// inconsistent with the signed document
    #[error("Offset not found for {component}: digest does not occur in its container")]
    OffsetNotFound { component: String },

    /// A scalar inside an otherwise well-shaped tree could not be parsed
    #[error("Malformed value in {context}: {details}")]
    MalformedValue { context: String, details: String },

    /// IO operation failed
    #[error("IO error: {0}")]
    IO(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WitnessError {
    /// Shorthand for a `StructureNotFound` error
    pub fn structure(component: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::StructureNotFound {
            component: component.into(),
            expected: expected.into(),
        }
    }

    /// Shorthand for a `MalformedValue` error
    pub fn value(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedValue {
            context: context.into(),
            details: details.into(),
        }
    }
}

impl From<std::io::Error> for WitnessError {
    fn from(e: std::io::Error) -> Self {
        Self::IO(e.to_string())
    }
}

impl From<serde_json::Error> for WitnessError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience Result type for witness derivation operations
pub type Result<T> = std::result::Result<T, WitnessError>;
