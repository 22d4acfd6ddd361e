//! Reference/hypothesis pair input for the evaluator.
//!
//! Transcript files are tab-separated, one sample per line:
//! `id<TAB>reference<TAB>hypothesis`. Blank lines and `#` comments are
//! skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failed to read transcripts: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record at line {line}: expected id<TAB>reference<TAB>hypothesis")]
    BadRecord { line: usize },
}

/// One sample: a ground-truth transcript and the model's prediction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptPair {
    pub id: String,
    pub reference: String,
    pub hypothesis: String,
}

/// Read all transcript pairs from a tab-separated file.
pub fn read_pairs_file(path: &Path) -> Result<Vec<TranscriptPair>, DatasetError> {
    read_pairs(BufReader::new(File::open(path)?))
}

/// Read transcript pairs from any buffered reader.
pub fn read_pairs<R: BufRead>(reader: R) -> Result<Vec<TranscriptPair>, DatasetError> {
    let mut pairs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.splitn(3, '\t');
        let (id, reference, hypothesis) = match (fields.next(), fields.next(), fields.next()) {
            (Some(id), Some(reference), Some(hypothesis)) => (id, reference, hypothesis),
            _ => return Err(DatasetError::BadRecord { line: idx + 1 }),
        };

        pairs.push(TranscriptPair {
            id: id.to_owned(),
            reference: reference.to_owned(),
            hypothesis: hypothesis.to_owned(),
        });
    }
    Ok(pairs)
}
