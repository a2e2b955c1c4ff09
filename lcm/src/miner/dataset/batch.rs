use super::{parse, Dataset};
use crate::miner::error::Result;
use ndarray::ArrayView2;

/// Accumulates a dataset one batch at a time before mining.
///
/// Rows keep a running line number so duplicate-item errors point at the
/// offending row across batches.
#[derive(Debug, Default)]
pub struct BatchLoader {
    dataset: Dataset,
    rows_seen: usize,
    batches: usize,
}

impl BatchLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dense 0/1 batch; columns must index the same items across batches.
    pub fn add_matrix(&mut self, matrix: ArrayView2<i32>) {
        self.rows_seen += matrix.nrows();
        self.batches += 1;
        self.dataset.extend_from_matrix(matrix);
    }

    pub fn add_transactions(&mut self, rows: Vec<Vec<usize>>) -> Result<()> {
        let mut sorted = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            sorted.push(parse::sort_checked(row, self.rows_seen + idx + 1)?);
        }
        self.rows_seen += sorted.len();
        self.batches += 1;
        for items in sorted {
            self.dataset.push_sorted(items);
        }
        Ok(())
    }

    pub fn num_transactions(&self) -> usize {
        self.rows_seen
    }

    pub fn num_batches(&self) -> usize {
        self.batches
    }

    pub fn finish(mut self) -> Dataset {
        self.dataset.sort_by_last_item();
        self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::buckets::Buckets;
    use ndarray::array;

    #[test]
    fn test_batches_accumulate() {
        let mut loader = BatchLoader::new();
        loader.add_matrix(array![[1, 0, 1], [0, 1, 1]].view());
        loader.add_transactions(vec![vec![2, 0]]).unwrap();
        assert_eq!(loader.num_transactions(), 3);
        assert_eq!(loader.num_batches(), 2);

        let dataset = loader.finish();
        assert_eq!(dataset.len(), 3);
        assert_eq!(Buckets::build(&dataset).supports(), vec![2, 1, 3]);
    }

    #[test]
    fn test_failed_batch_is_not_applied() {
        let mut loader = BatchLoader::new();
        loader.add_transactions(vec![vec![1]]).unwrap();
        assert!(loader.add_transactions(vec![vec![2], vec![3, 3]]).is_err());
        assert_eq!(loader.num_transactions(), 1);
        assert_eq!(loader.finish().len(), 1);
    }
}
