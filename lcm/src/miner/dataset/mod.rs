pub mod batch;
pub mod parse;

pub use batch::BatchLoader;

use super::error::{LcmError, Result};
use super::transaction::Transaction;
use ndarray::ArrayView2;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A transactional database: every transaction plus the items seen in it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    transactions: Vec<Transaction>,
    unique_items: BTreeSet<usize>,
    max_item: Option<usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the text format: one transaction per line, items separated by
    /// whitespace, lines starting with `#`, `%` or `@` and blank lines skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            transactions = dataset.len(),
            items = dataset.unique_items.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut dataset = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(items) = parse::parse_line(&line, idx + 1)? {
                dataset.push_sorted(items);
            }
        }
        dataset.sort_by_last_item();
        Ok(dataset)
    }

    /// Builds a dataset from explicit item lists; row `i` is reported as line `i + 1`.
    pub fn from_transactions(rows: Vec<Vec<usize>>) -> Result<Self> {
        let mut dataset = Self::new();
        for (idx, row) in rows.into_iter().enumerate() {
            dataset.push_sorted(parse::sort_checked(row, idx + 1)?);
        }
        dataset.sort_by_last_item();
        Ok(dataset)
    }

    /// Dense 0/1 matrix: rows are transactions, column `j` is item `j`.
    pub fn from_matrix(matrix: ArrayView2<i32>) -> Self {
        let mut dataset = Self::new();
        dataset.extend_from_matrix(matrix);
        dataset.sort_by_last_item();
        dataset
    }

    pub(crate) fn extend_from_matrix(&mut self, matrix: ArrayView2<i32>) {
        for row in matrix.rows() {
            let items: Vec<usize> = row
                .iter()
                .enumerate()
                .filter_map(|(item, &flag)| (flag != 0).then_some(item))
                .collect();
            self.push_sorted(items);
        }
    }

    pub(crate) fn push_sorted(&mut self, items: Vec<usize>) {
        if let Some(&last) = items.last() {
            self.max_item = Some(self.max_item.map_or(last, |max| max.max(last)));
        }
        self.unique_items.extend(items.iter().copied());
        self.transactions.push(Transaction::from_sorted(items));
    }

    /// Orders transactions by their last item so buckets fill in item order.
    pub(crate) fn sort_by_last_item(&mut self) {
        self.transactions.sort_by_key(|t| t.last_item());
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn unique_items(&self) -> &BTreeSet<usize> {
        &self.unique_items
    }

    pub fn max_item(&self) -> Option<usize> {
        self.max_item
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// One-time pruning pass run before the search starts.
    pub(crate) fn remove_infrequent_items(&mut self, supports: &[usize], min_count: usize) {
        for transaction in &mut self.transactions {
            transaction.remove_infrequent_items(supports, min_count);
        }
    }
}

impl TryFrom<Vec<Vec<usize>>> for Dataset {
    type Error = LcmError;

    fn try_from(rows: Vec<Vec<usize>>) -> Result<Self> {
        Self::from_transactions(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::buckets::Buckets;
    use ndarray::array;

    #[test]
    fn test_from_reader_skips_comments_and_blanks() {
        let input = "# header\n1 2 3\n\n@CONVERTED\n% note\n3 1\n";
        let dataset = Dataset::from_reader(input.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.max_item(), Some(3));
        assert_eq!(dataset.unique_items().len(), 3);
        let rows: Vec<&[usize]> = dataset.transactions().iter().map(|t| t.items()).collect();
        assert!(rows.contains(&&[1, 3][..]));
        assert!(rows.contains(&&[1, 2, 3][..]));
    }

    #[test]
    fn test_from_reader_rejects_bad_token() {
        let err = Dataset::from_reader("1 2\n3 x 4\n".as_bytes()).unwrap_err();
        match err {
            LcmError::MalformedInput { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_reader_rejects_duplicate_item() {
        let err = Dataset::from_reader("4 2 4\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LcmError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_sorted_by_last_item() {
        let dataset = Dataset::from_transactions(vec![vec![1, 9], vec![2, 3], vec![5]]).unwrap();
        let lasts: Vec<_> = dataset.transactions().iter().map(|t| t.last_item()).collect();
        assert_eq!(lasts, vec![Some(3), Some(5), Some(9)]);
    }

    #[test]
    fn test_from_matrix() {
        let matrix = array![[1, 1, 0], [0, 0, 1], [1, 0, 1]];
        let dataset = Dataset::from_matrix(matrix.view());
        assert_eq!(dataset.len(), 3);
        assert_eq!(Buckets::build(&dataset).supports(), vec![2, 1, 2]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::from_reader("".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.max_item(), None);
        assert!(Buckets::build(&dataset).supports().is_empty());
    }

    #[test]
    fn test_out_of_range_item_is_malformed() {
        let err = Dataset::from_reader("1 2\n18446744073709551615\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LcmError::MalformedInput { line: 2, .. }));

        let err = Dataset::from_reader("10000000000\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LcmError::MalformedInput { line: 1, .. }));

        let err = Dataset::from_transactions(vec![vec![0], vec![usize::MAX, 1]]).unwrap_err();
        assert!(matches!(err, LcmError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_sparse_item_ids_mine() {
        let dataset = Dataset::from_reader("100000 7\n100000\n".as_bytes()).unwrap();
        assert_eq!(dataset.max_item(), Some(100_000));
        let (itemsets, _) = crate::miner::mine_to_memory(dataset, &crate::miner::MiningConfig::new(0.5)).unwrap();
        assert_eq!(itemsets.to_sorted_vec(), vec![(vec![7, 100_000], 1), (vec![100_000], 2)]);
    }
}
