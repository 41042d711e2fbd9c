use rustc_hash::{FxHashMap, FxHashSet};

use crate::dataset::Transaction;
use crate::dictionary::{SequenceDictionary, SequenceKey};

/// Keys whose code was emitted at least once. Accumulated across every
/// substitution pass, consulted once at the end to prune the dictionary.
pub type UsedSet = FxHashSet<SequenceKey>;

/// Rewrite every transaction in place with a greedy, leftmost-first,
/// single-pass scan for one window length.
///
/// At each cursor position with at least `length` tokens remaining, the
/// window starting there either matches a dictionary key (emit its code,
/// mark the key used, consume the whole window) or it does not, and the
/// single token at the cursor is emitted literally. The tail shorter than
/// `length` is always emitted literally. No backtracking, no lookahead:
/// a match blocks every window starting inside it.
///
/// Passes chain: each invocation scans the previous invocation's output, so
/// later (shorter) passes see code tokens interleaved with untouched item
/// identifiers. Nothing tags a code apart from an item of the same value;
/// see `pipeline` for how the run orders passes to keep this stable.
pub fn substitute_pass(
    dataset: &mut [Transaction],
    dictionary: &SequenceDictionary,
    length: usize,
    used: &mut UsedSet,
) {
    for transaction in dataset.iter_mut() {
        let mut rewritten = Vec::with_capacity(transaction.len());
        let mut cursor = 0;
        while cursor < transaction.len() {
            if cursor + length <= transaction.len() {
                let window = &transaction[cursor..cursor + length];
                if let Some(code) = dictionary.code_for_window(window) {
                    rewritten.push(code);
                    used.insert(SequenceKey::new(window));
                    cursor += length;
                    continue;
                }
            }
            rewritten.push(transaction[cursor]);
            cursor += 1;
        }
        *transaction = rewritten;
    }
}

/// Expand every code token back to its key's items, leaving unrecognized
/// tokens as literals. Keys always contain original item identifiers (the
/// identification phase scans the unmodified dataset), so one level of
/// expansion suffices. Only meaningful when codes and item identifiers
/// occupy disjoint value ranges; a token equal to both a code and a genuine
/// item is decoded as the code.
pub fn decode_transaction(tokens: &[u64], dictionary: &SequenceDictionary) -> Transaction {
    let by_code: FxHashMap<u64, &SequenceKey> =
        dictionary.iter().map(|(key, code)| (code, key)).collect();

    let mut items = Vec::new();
    for token in tokens {
        match by_code.get(token) {
            Some(key) => items.extend_from_slice(key.items()),
            None => items.push(*token),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary_for(dataset: &[Transaction], lengths: &[usize]) -> SequenceDictionary {
        let mut dictionary = SequenceDictionary::new();
        for &length in lengths {
            dictionary.record_windows(dataset, length);
        }
        dictionary
    }

    #[test]
    fn test_repeated_window_collapses_to_codes() {
        // Two identical length-5 windows back to back.
        let mut dataset = vec![vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5]];
        let dictionary = dictionary_for(&dataset, &[5]);
        let mut used = UsedSet::default();

        substitute_pass(&mut dataset, &dictionary, 5, &mut used);

        assert_eq!(dataset, vec![vec![0, 0]]);
        assert!(used.contains(&SequenceKey::new(&[1, 2, 3, 4, 5])));
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_unmatched_tokens_pass_through() {
        let mut dataset = vec![vec![7, 8, 9]];
        let dictionary = SequenceDictionary::new();
        let mut used = UsedSet::default();

        substitute_pass(&mut dataset, &dictionary, 3, &mut used);

        assert_eq!(dataset, vec![vec![7, 8, 9]]);
        assert!(used.is_empty());
    }

    #[test]
    fn test_short_tail_is_emitted_literally() {
        // 1,2,3 matches; the trailing 4,5 is shorter than the window.
        let mut dataset = vec![vec![1, 2, 3, 4, 5]];
        let dictionary = dictionary_for(&[vec![1, 2, 3]], &[3]);
        let mut used = UsedSet::default();

        substitute_pass(&mut dataset, &dictionary, 3, &mut used);

        assert_eq!(dataset, vec![vec![0, 4, 5]]);
    }

    #[test]
    fn test_match_blocks_overlapping_windows() {
        // Every length-2 window of 3,3,3,3 is in the dictionary, but the
        // greedy scan consumes positions 0-1 and 2-3 only.
        let mut dataset = vec![vec![3, 3, 3, 3]];
        let dictionary = dictionary_for(&dataset, &[2]);
        let mut used = UsedSet::default();

        substitute_pass(&mut dataset, &dictionary, 2, &mut used);

        assert_eq!(dataset, vec![vec![0, 0]]);
    }

    #[test]
    fn test_used_set_accumulates_across_passes() {
        let mut dataset = vec![vec![1, 2, 3, 4, 5, 6, 7]];
        let dictionary = dictionary_for(&dataset, &[5, 4, 3]);
        let mut used = UsedSet::default();

        // Length 5 consumes 1..5, leaving 6,7: too short for 4 or 3.
        substitute_pass(&mut dataset, &dictionary, 5, &mut used);
        substitute_pass(&mut dataset, &dictionary, 4, &mut used);
        substitute_pass(&mut dataset, &dictionary, 3, &mut used);

        assert_eq!(dataset, vec![vec![0, 6, 7]]);
        assert_eq!(used.len(), 1);
        assert!(used.contains(&SequenceKey::new(&[1, 2, 3, 4, 5])));
    }

    #[test]
    fn test_decode_restores_items_without_value_overlap() {
        // Item identifiers start well above any code this run can assign.
        let original = vec![vec![100, 101, 102, 103, 104, 100, 101, 102]];
        let mut dataset = original.clone();
        let dictionary = dictionary_for(&dataset, &[5, 4, 3]);
        let mut used = UsedSet::default();

        for length in [5, 4, 3] {
            substitute_pass(&mut dataset, &dictionary, length, &mut used);
        }

        for (encoded, expected) in dataset.iter().zip(&original) {
            assert_eq!(&decode_transaction(encoded, &dictionary), expected);
        }
    }

    #[test]
    fn test_decode_leaves_unknown_tokens_alone() {
        let dictionary = dictionary_for(&[vec![100, 101, 102]], &[3]);
        assert_eq!(decode_transaction(&[0, 9], &dictionary), vec![100, 101, 102, 9]);
    }
}
