//! Inference output collection and serialization.
//!
//! Batches can arrive in any order, so every prediction carries the
//! source id assigned by the data layer; dataset order is restored by
//! sorting on it before anything is written out.

use std::io::Write;

#[derive(thiserror::Error, Debug)]
pub enum InferError {
    #[error("failed to write predictions: {0}")]
    Io(#[from] std::io::Error),
}

/// One decoded prediction tied back to its source audio file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prediction {
    pub source_id: u64,
    pub wav_filename: String,
    pub transcript: String,
}

/// Gathers predictions across batches for a whole inference run.
#[derive(Clone, Debug, Default)]
pub struct InferenceCollector {
    rows: Vec<Prediction>,
}

impl InferenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prediction: Prediction) {
        self.rows.push(prediction);
    }

    pub fn push_batch(&mut self, batch: impl IntoIterator<Item = Prediction>) {
        self.rows.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All collected predictions in dataset order.
    pub fn into_ordered(mut self) -> Vec<Prediction> {
        self.rows.sort_by_key(|p| p.source_id);
        self.rows
    }

    /// Restore dataset order and write the two-column prediction CSV.
    pub fn write_csv<W: Write>(self, writer: W) -> Result<(), InferError> {
        write_csv(&self.into_ordered(), writer)
    }
}

/// Write predictions as `wav_filename,predicted_transcript` rows.
pub fn write_csv<W: Write>(rows: &[Prediction], mut writer: W) -> Result<(), InferError> {
    writeln!(writer, "wav_filename,predicted_transcript")?;
    for row in rows {
        writeln!(
            writer,
            "{},{}",
            escape_field(&row.wav_filename),
            escape_field(&row.transcript)
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(source_id: u64, file: &str, transcript: &str) -> Prediction {
        Prediction {
            source_id,
            wav_filename: file.to_owned(),
            transcript: transcript.to_owned(),
        }
    }

    #[test]
    fn order_restored_across_batches() {
        let mut collector = InferenceCollector::new();
        collector.push_batch([prediction(2, "c.wav", "three"), prediction(0, "a.wav", "one")]);
        collector.push(prediction(1, "b.wav", "two"));

        let ordered = collector.into_ordered();
        let ids: Vec<u64> = ordered.iter().map(|p| p.source_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(ordered[0].transcript, "one");
    }

    #[test]
    fn csv_has_header_and_rows() {
        let rows = vec![
            prediction(0, "a.wav", "hello world"),
            prediction(1, "b.wav", "goodbye"),
        ];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).expect("write to buffer");
        let text = String::from_utf8(out).expect("utf-8");
        assert_eq!(
            text,
            "wav_filename,predicted_transcript\na.wav,hello world\nb.wav,goodbye\n"
        );
    }

    #[test]
    fn csv_quotes_fields_with_separators() {
        let rows = vec![prediction(0, "a,b.wav", "he said \"hi\"")];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).expect("write to buffer");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("\"a,b.wav\",\"he said \"\"hi\"\"\""));
    }

    #[test]
    fn collector_write_csv_sorts_first() {
        let mut collector = InferenceCollector::new();
        collector.push(prediction(1, "b.wav", "second"));
        collector.push(prediction(0, "a.wav", "first"));

        let mut out = Vec::new();
        collector.write_csv(&mut out).expect("write to buffer");
        let text = String::from_utf8(out).expect("utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "a.wav,first");
        assert_eq!(lines[2], "b.wav,second");
    }
}
