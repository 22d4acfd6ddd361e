//! Mapping decoded token IDs back to text.
//!
//! The evaluator itself only sees text; this module covers the decoding
//! collaborator for pipelines that hand over raw token-ID sequences
//! instead.

mod vocab;

pub use vocab::Vocabulary;

#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("token id {0} is not in the vocabulary")]
    UnknownToken(u32),
    #[error("vocabulary must not be empty")]
    EmptyVocabulary,
    #[error("failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse vocabulary: {0}")]
    Parse(#[from] serde_json::Error),
}
