use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::dataset;
use crate::dictionary::SequenceDictionary;
use crate::report::SizeReport;
use crate::substitute::{UsedSet, substitute_pass};
use crate::{DEFAULT_DICTIONARY_FILE, DEFAULT_LENGTHS, DEFAULT_OUTPUT_FILE};

/// File locations and window lengths for one compression run.
#[derive(Debug, Clone)]
pub struct CompressConfig {
    /// Input dataset, one transaction per line.
    pub input: PathBuf,
    /// Where the pruned key -> code map is written.
    pub dictionary_path: PathBuf,
    /// Where the rewritten dataset is written.
    pub output_path: PathBuf,
    /// Window lengths, strictly decreasing, each >= 1.
    pub lengths: Vec<usize>,
}

impl CompressConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            dictionary_path: DEFAULT_DICTIONARY_FILE.into(),
            output_path: DEFAULT_OUTPUT_FILE.into(),
            lengths: DEFAULT_LENGTHS.to_vec(),
        }
    }
}

/// Run the full pipeline: read, identify, substitute, prune, persist,
/// measure.
///
/// Phase ordering is a hard contract:
/// - Every identification pass scans the *original* dataset, longest window
///   first, so a shorter pass never records a key containing a code emitted
///   by a longer one.
/// - Substitution passes then chain, longest first, each rewriting the
///   previous pass's output. A code token in that stream is indistinguishable
///   from an item identifier of the same value; runs whose item identifiers
///   overlap the assigned code range can produce spurious shorter-length
///   matches. Callers needing exact decode should keep item identifiers above
///   the code range (codes count up from 0).
///
/// An unreadable or empty input aborts the run. A failed output write is
/// reported to stderr and skipped; the run continues and the final report
/// then measures whatever actually reached disk.
pub fn compress(config: &CompressConfig) -> Result<SizeReport> {
    validate_lengths(&config.lengths)?;

    let mut dataset = dataset::read_transactions(&config.input)?;
    eprintln!(
        "Read {} transactions from {}",
        dataset.len(),
        config.input.display()
    );

    let mut dictionary = SequenceDictionary::new();
    for &length in &config.lengths {
        let before = dictionary.len();
        dictionary.record_windows(&dataset, length);
        eprintln!(
            "   length {}: {} new sequences",
            length,
            dictionary.len() - before
        );
    }

    let mut used = UsedSet::default();
    for &length in &config.lengths {
        substitute_pass(&mut dataset, &dictionary, length, &mut used);
    }

    let recorded = dictionary.len();
    dictionary.prune(&used);
    eprintln!(
        "   {} of {} sequences kept after pruning",
        dictionary.len(),
        recorded
    );

    if let Err(e) = dictionary.save_to_file(&config.dictionary_path) {
        eprintln!(
            "Error writing sequence map {}: {}",
            config.dictionary_path.display(),
            e
        );
    }
    if let Err(e) = dataset::write_transactions(&dataset, &config.output_path) {
        eprintln!(
            "Error writing updated dataset {}: {}",
            config.output_path.display(),
            e
        );
    }

    Ok(SizeReport::measure(
        &config.input,
        &config.dictionary_path,
        &config.output_path,
    ))
}

fn validate_lengths(lengths: &[usize]) -> Result<()> {
    if lengths.is_empty() {
        bail!("at least one window length is required");
    }
    if lengths.contains(&0) {
        bail!("window lengths must be at least 1");
    }
    if !lengths.windows(2).all(|pair| pair[0] > pair[1]) {
        bail!("window lengths must be strictly decreasing: {:?}", lengths);
    }
    Ok(())
}
