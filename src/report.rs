use std::fmt;
use std::fs;
use std::path::Path;

/// Byte sizes of the three on-disk artifacts and the derived reduction
/// figures. Pure measurement: nothing here mutates pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub original_bytes: u64,
    pub dictionary_bytes: u64,
    pub rewritten_bytes: u64,
}

impl SizeReport {
    /// Stat all three files. A missing or unreadable file counts as zero
    /// bytes, so a skipped output write shows up as an implausibly large
    /// "reduction" rather than an error here.
    pub fn measure(original: &Path, dictionary: &Path, rewritten: &Path) -> Self {
        Self {
            original_bytes: file_size(original),
            dictionary_bytes: file_size(dictionary),
            rewritten_bytes: file_size(rewritten),
        }
    }

    /// Combined size of the artifacts needed to reconstruct the dataset.
    pub fn reduced_bytes(&self) -> u64 {
        self.dictionary_bytes + self.rewritten_bytes
    }

    /// Signed: negative when the dictionary overhead outweighs the savings.
    pub fn saved_bytes(&self) -> i64 {
        self.original_bytes as i64 - self.reduced_bytes() as i64
    }

    /// `(original - reduced) / original * 100`; zero for an empty original.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.saved_bytes() as f64 / self.original_bytes as f64 * 100.0
    }
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original size: {} bytes", self.original_bytes)?;
        writeln!(f, "Reduced size: {} bytes", self.reduced_bytes())?;
        writeln!(f, "Size reduction: {} bytes", self.saved_bytes())?;
        write!(f, "Reduction percentage: {:.2}%", self.reduction_percent())
    }
}
