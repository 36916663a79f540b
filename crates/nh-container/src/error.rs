//! Error types for container parsing, writing, and merging.

use thiserror::Error;

/// Container error type.
#[derive(Error, Debug)]
pub enum ContainerError {
    /// I/O error opening, reading, or writing a container file.
    /// Propagated as-is; no retry policy here.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not start with the NDC magic bytes.
    #[error("bad magic: not an NDC container (found {found:02x?})")]
    BadMagic {
        /// The four bytes found where the magic was expected.
        found: [u8; 4],
    },

    /// Format version this reader does not understand.
    #[error("unsupported container format version {0}")]
    UnsupportedVersion(u8),

    /// Read past the end of the file buffer.
    #[error("buffer underflow at offset {offset}: need {need} bytes, have {have}")]
    BufferUnderflow {
        /// Read position where the shortfall occurred.
        offset: usize,
        /// Bytes requested.
        need: usize,
        /// Bytes remaining.
        have: usize,
    },

    /// Entry kind byte that is neither group nor dataset.
    #[error("unknown entry kind {0:#04x}")]
    UnknownEntryKind(u8),

    /// Attribute cell tag that is not a known value type.
    #[error("unknown value tag {0:#04x}")]
    UnknownValueTag(u8),

    /// Structurally invalid content that passed the byte-level reads.
    #[error("corrupt container: {0}")]
    Corrupt(String),

    /// Dense payload could not be shaped to its declared dimensions.
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// A dataset expected to be a histogram carries no `axes` attribute.
    #[error("`{name}` doesn't seem to be a histogram (no axes attribute)")]
    NotAHistogram {
        /// Entry name or path.
        name: String,
    },

    /// An axis record in the `axes` attribute is missing a required field
    /// or carries the wrong type for it.
    #[error("malformed axis record: field `{field}` missing or mistyped")]
    MalformedAxis {
        /// The offending field name.
        field: String,
    },

    /// Write attempted where an entry of that name already exists, or a
    /// merge found the same path used as both a histogram and a group.
    #[error("structural conflict at `{path}`: entry already exists")]
    StructuralConflict {
        /// The conflicting path.
        path: String,
    },

    /// Data-model failure (incompatible accumulation, bad axis metadata).
    #[error(transparent)]
    Core(#[from] nh_core::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, ContainerError>;
