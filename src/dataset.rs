use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One transaction: an ordered run of item identifiers parsed from a single
/// input line. Substitution passes rewrite it in place, so after the first
/// pass a value may be either an item identifier or a dictionary code.
pub type Transaction = Vec<u64>;

/// Failures while loading the input dataset. All of these are fatal: the
/// pipeline refuses to run against an unreadable, malformed, or empty input.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read transaction dataset {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transaction dataset {} contains no transactions", path.display())]
    EmptyDataset { path: PathBuf },

    #[error("{}:{line}: invalid item identifier {token:?}", path.display())]
    MalformedItem {
        path: PathBuf,
        line: usize,
        token: String,
    },
}

/// Read the whole dataset into memory, one transaction per line, items as
/// whitespace-separated non-negative integers. Blank lines become empty
/// transactions and survive to the output unchanged.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>, DatasetError> {
    let unreadable = |source| DatasetError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;

    let mut dataset = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(unreadable)?;
        let transaction = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u64>()
                    .map_err(|_| DatasetError::MalformedItem {
                        path: path.to_path_buf(),
                        line: index + 1,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Transaction, _>>()?;
        dataset.push(transaction);
    }

    if dataset.is_empty() {
        return Err(DatasetError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }
    Ok(dataset)
}

/// Write the (possibly rewritten) dataset back out, one space-separated
/// newline-terminated line per transaction.
pub fn write_transactions(dataset: &[Transaction], path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for transaction in dataset {
        writeln!(out, "{}", transaction.iter().join(" "))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn dataset_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_transactions() {
        let file = dataset_file("1 2 3\n10 20\n\n7\n");
        let dataset = read_transactions(file.path()).unwrap();
        assert_eq!(
            dataset,
            vec![vec![1, 2, 3], vec![10, 20], vec![], vec![7]]
        );
    }

    #[test]
    fn test_missing_input_is_unreadable() {
        let err = read_transactions(Path::new("no_such_dataset.dat")).unwrap_err();
        assert!(matches!(err, DatasetError::InputUnreadable { .. }));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let file = dataset_file("");
        let err = read_transactions(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyDataset { .. }));
    }

    #[test]
    fn test_malformed_item_reports_line() {
        let file = dataset_file("1 2 3\n4 x 6\n");
        let err = read_transactions(file.path()).unwrap_err();
        match err {
            DatasetError::MalformedItem { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_transactions_round_trip() {
        let dataset = vec![vec![1, 2, 3], vec![], vec![42]];
        let file = NamedTempFile::new().unwrap();
        write_transactions(&dataset, file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, "1 2 3\n\n42\n");
        assert_eq!(read_transactions(file.path()).unwrap(), dataset);
    }
}
