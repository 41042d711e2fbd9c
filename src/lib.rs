// Defaults for the compression pipeline
/// Window lengths substituted by default, longest first. Both the
/// identification and the substitution phases walk these in this order;
/// running the longest length first keeps shorter windows from shadowing
/// longer matches.
pub const DEFAULT_LENGTHS: [usize; 3] = [5, 4, 3];

/// Default location of the persisted key -> code map.
pub const DEFAULT_DICTIONARY_FILE: &str = "sequence_map.txt";

/// Default location of the rewritten dataset.
pub const DEFAULT_OUTPUT_FILE: &str = "updated_transactions.txt";

pub mod dataset;
pub mod dictionary;
pub mod pipeline;
pub mod report;
pub mod substitute;

// Re-export main types for public API
pub use dataset::{DatasetError, Transaction};
pub use dictionary::{SequenceDictionary, SequenceKey};
pub use pipeline::{CompressConfig, compress};
pub use report::SizeReport;
pub use substitute::{UsedSet, decode_transaction, substitute_pass};
