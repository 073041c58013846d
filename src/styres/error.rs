use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a style file: expected magic {expected:?}, found {found:?}")]
    Format { expected: [u8; 4], found: [u8; 4] },

    #[error("truncated input at offset {offset:#x} (need {need} bytes, have {have})")]
    TruncatedInput {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("chunk {chunk}: declared length {declared} does not match expected {expected}")]
    SizeMismatch {
        chunk: String,
        declared: usize,
        expected: usize,
    },

    #[error("unknown chunk {tag} at offset {offset:#x}")]
    UnknownChunk { tag: String, offset: usize },

    #[error("{what} index {index} out of range (have {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("cannot unpack {what}: {message}")]
    Layout { what: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
