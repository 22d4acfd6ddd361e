use super::TranscriptError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const START_TOKENS: [&str; 3] = ["<s>", "<bos>", "[BOS]"];
const END_TOKENS: [&str; 3] = ["</s>", "<eos>", "[EOS]"];

/// Ordered token table for decoding model output IDs into text.
///
/// Symbols are concatenated as-is, so a character vocabulary yields plain
/// text while a subword vocabulary yields its surface form. Start/end
/// symbols, when present, drive the autoregressive decode variant.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    tokens: Vec<String>,
    token_to_id: HashMap<String, u32>,
    start_id: Option<u32>,
    end_id: Option<u32>,
}

impl Vocabulary {
    pub fn new(tokens: Vec<String>) -> Result<Self, TranscriptError> {
        if tokens.is_empty() {
            return Err(TranscriptError::EmptyVocabulary);
        }
        let token_to_id: HashMap<String, u32> = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();

        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| token_to_id.get(*name))
                .copied()
        };
        let start_id = find(&START_TOKENS);
        let end_id = find(&END_TOKENS);

        Ok(Self {
            tokens,
            token_to_id,
            start_id,
            end_id,
        })
    }

    /// Load a vocabulary from a text file, one token per line.
    pub fn from_text_file(path: &Path) -> Result<Self, TranscriptError> {
        let reader = BufReader::new(File::open(path)?);
        let mut tokens = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                tokens.push(line);
            }
        }
        Self::new(tokens)
    }

    /// Load a vocabulary from a JSON token-to-id map, ordered by id.
    pub fn from_json_file(path: &Path) -> Result<Self, TranscriptError> {
        let map: HashMap<String, u32> = serde_json::from_reader(File::open(path)?)?;
        let mut pairs: Vec<_> = map.into_iter().collect();
        pairs.sort_by_key(|(_, id)| *id);
        Self::new(pairs.into_iter().map(|(token, _)| token).collect())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    pub fn start_id(&self) -> Option<u32> {
        self.start_id
    }

    pub fn end_id(&self) -> Option<u32> {
        self.end_id
    }

    /// Concatenate the symbols for `ids` into text.
    pub fn decode(&self, ids: &[u32]) -> Result<String, TranscriptError> {
        let mut text = String::new();
        for &id in ids {
            text.push_str(
                self.token(id)
                    .ok_or(TranscriptError::UnknownToken(id))?,
            );
        }
        Ok(text)
    }

    /// Decode autoregressive output: skip the start symbol and stop at
    /// the first end symbol.
    pub fn decode_autoregressive(&self, ids: &[u32]) -> Result<String, TranscriptError> {
        let mut text = String::new();
        for &id in ids {
            if self.end_id == Some(id) {
                break;
            }
            if self.start_id == Some(id) {
                continue;
            }
            text.push_str(
                self.token(id)
                    .ok_or(TranscriptError::UnknownToken(id))?,
            );
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_vocab() -> Vocabulary {
        let tokens = ["<s>", "</s>", " ", "a", "b", "c"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        Vocabulary::new(tokens).expect("non-empty vocab")
    }

    #[test]
    fn lookup_both_directions() {
        let vocab = char_vocab();
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.token(3), Some("a"));
        assert_eq!(vocab.id("c"), Some(5));
        assert_eq!(vocab.start_id(), Some(0));
        assert_eq!(vocab.end_id(), Some(1));
    }

    #[test]
    fn decode_concatenates_symbols() {
        let vocab = char_vocab();
        let text = vocab.decode(&[3, 4, 2, 5]).expect("known ids");
        assert_eq!(text, "ab c");
    }

    #[test]
    fn decode_rejects_unknown_id() {
        let vocab = char_vocab();
        let err = vocab.decode(&[3, 42]).expect_err("id out of range");
        assert!(matches!(err, TranscriptError::UnknownToken(42)));
    }

    #[test]
    fn autoregressive_decode_clips_at_end_symbol() {
        let vocab = char_vocab();
        let text = vocab
            .decode_autoregressive(&[0, 3, 4, 1, 5, 5])
            .expect("known ids");
        assert_eq!(text, "ab");
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        let err = Vocabulary::new(Vec::new()).expect_err("empty vocab");
        assert!(matches!(err, TranscriptError::EmptyVocabulary));
    }
}
