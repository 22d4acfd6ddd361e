use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const ENV_LOG_LEVEL: &str = "ASR_EVAL_LOG";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("transcripts path must not be empty")]
    EmptyTranscriptsPath,
    #[error("vocabulary path must not be empty")]
    EmptyVocabPath,
}

/// Where the vocabulary file comes from and how to parse it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VocabSource {
    /// One token per line.
    Text(PathBuf),
    /// JSON token-to-id map.
    Json(PathBuf),
}

impl VocabSource {
    pub fn new(path: PathBuf, json: bool) -> Result<Self, ConfigError> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyVocabPath);
        }
        Ok(if json {
            Self::Json(path)
        } else {
            Self::Text(path)
        })
    }
}

/// Settings for one evaluation run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvalConfig {
    /// Tab-separated `id / reference / hypothesis` file.
    pub transcripts: PathBuf,
    /// Decode hypothesis fields as token-id sequences through this
    /// vocabulary instead of taking them as text.
    pub vocab: Option<VocabSource>,
    /// Write the ordered prediction CSV here after evaluating.
    pub predictions_out: Option<PathBuf>,
    /// Lowercase both sides before aligning.
    pub lowercase: bool,
}

impl EvalConfig {
    pub fn new(transcripts: PathBuf) -> Result<Self, ConfigError> {
        if transcripts.as_os_str().is_empty() {
            return Err(ConfigError::EmptyTranscriptsPath);
        }
        Ok(Self {
            transcripts,
            vocab: None,
            predictions_out: None,
            lowercase: false,
        })
    }
}
