#![deny(warnings)]

use anyhow::Context;
use asr_eval_core::config::{
    EvalConfig, VocabSource, DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL,
};
use asr_eval_core::dataset::{read_pairs_file, TranscriptPair};
use asr_eval_core::infer::{InferenceCollector, Prediction};
use asr_eval_core::metrics::{MetricAggregator, SampleMetrics};
use asr_eval_core::report::{log_sample, log_summary};
use asr_eval_core::transcript::Vocabulary;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "asr-eval")]
#[command(about = "Score ASR hypotheses against reference transcripts (WER/CER/MER/WIL/WIP)")]
struct Args {
    /// Tab-separated file: id<TAB>reference<TAB>hypothesis.
    #[arg(long)]
    transcripts: PathBuf,

    /// Vocabulary file; when given, hypothesis fields are parsed as
    /// whitespace-separated token ids and decoded through it.
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Parse the vocabulary as a JSON token-to-id map instead of one
    /// token per line.
    #[arg(long, default_value_t = false)]
    vocab_json: bool,

    /// Write the ordered prediction CSV here.
    #[arg(long)]
    predictions_out: Option<PathBuf>,

    /// Lowercase both sides before aligning.
    #[arg(long, default_value_t = false)]
    lowercase: bool,

    /// Log each sample's transcripts and rates, not just the summary.
    #[arg(long, default_value_t = false)]
    show_samples: bool,

    #[arg(long, env = ENV_LOG_LEVEL, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let show_samples = args.show_samples;
    let cfg = build_config(args)?;

    tracing::info!(
        transcripts = %cfg.transcripts.display(),
        lowercase = cfg.lowercase,
        "config loaded"
    );

    run_eval(cfg, show_samples)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn build_config(args: Args) -> anyhow::Result<EvalConfig> {
    let mut cfg = EvalConfig::new(args.transcripts)?;
    cfg.vocab = match args.vocab {
        Some(path) => Some(VocabSource::new(path, args.vocab_json)?),
        None => None,
    };
    cfg.predictions_out = args.predictions_out;
    cfg.lowercase = args.lowercase;
    Ok(cfg)
}

fn run_eval(cfg: EvalConfig, show_samples: bool) -> anyhow::Result<()> {
    let pairs = read_pairs_file(&cfg.transcripts)
        .with_context(|| format!("reading {}", cfg.transcripts.display()))?;
    tracing::info!(samples = pairs.len(), "transcripts loaded");

    let vocab = match &cfg.vocab {
        Some(VocabSource::Text(path)) => Some(
            Vocabulary::from_text_file(path)
                .with_context(|| format!("loading vocabulary {}", path.display()))?,
        ),
        Some(VocabSource::Json(path)) => Some(
            Vocabulary::from_json_file(path)
                .with_context(|| format!("loading vocabulary {}", path.display()))?,
        ),
        None => None,
    };

    let mut aggregator = MetricAggregator::new();
    let mut collector = InferenceCollector::new();

    for (index, pair) in pairs.iter().enumerate() {
        let hypothesis = hypothesis_text(pair, vocab.as_ref())?;
        let (reference, hypothesis) = if cfg.lowercase {
            (pair.reference.to_lowercase(), hypothesis.to_lowercase())
        } else {
            (pair.reference.clone(), hypothesis)
        };

        let sample = SampleMetrics::measure(&reference, &hypothesis);
        if show_samples {
            match sample.rates() {
                Ok(rates) => log_sample(&pair.id, &reference, &hypothesis, &rates),
                Err(e) => tracing::warn!(sample = %pair.id, error = %e, "sample rates undefined"),
            }
        }
        aggregator.accumulate(&sample);

        collector.push(Prediction {
            source_id: index as u64,
            wav_filename: pair.id.clone(),
            transcript: hypothesis,
        });
    }

    let report = aggregator.finalize().context("finalizing metrics")?;
    log_summary(aggregator.samples(), &report);

    if let Some(path) = &cfg.predictions_out {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        collector.write_csv(BufWriter::new(file))?;
        tracing::info!(path = %path.display(), "predictions written");
    }

    Ok(())
}

fn hypothesis_text(pair: &TranscriptPair, vocab: Option<&Vocabulary>) -> anyhow::Result<String> {
    let Some(vocab) = vocab else {
        return Ok(pair.hypothesis.clone());
    };

    let mut ids = Vec::new();
    for token in pair.hypothesis.split_whitespace() {
        let id: u32 = token
            .parse()
            .with_context(|| format!("sample {}: bad token id {token:?}", pair.id))?;
        ids.push(id);
    }

    let text = if vocab.end_id().is_some() {
        vocab.decode_autoregressive(&ids)?
    } else {
        vocab.decode(&ids)?
    };
    Ok(text)
}
