use super::dataset::Dataset;
use super::transaction::TransactionView;

/// Occurrence-delivery index: for every item, the transactions currently known
/// to contain it in the active search context.
#[derive(Debug, Clone)]
pub struct Buckets<'a> {
    buckets: Vec<Vec<TransactionView<'a>>>,
    in_scope: Vec<bool>,
}

impl<'a> Buckets<'a> {
    /// Empty index able to hold every item id up to `max_item`.
    ///
    /// Datasets only hold ids up to `MAX_ITEM`, so the slot count fits.
    pub fn empty(max_item: Option<usize>) -> Self {
        let len = max_item.and_then(|max| max.checked_add(1)).unwrap_or(0);
        Self {
            buckets: vec![Vec::new(); len],
            in_scope: vec![false; len],
        }
    }

    /// First occurrence delivery over the whole dataset.
    pub fn build(dataset: &'a Dataset) -> Self {
        let mut buckets = Self::empty(dataset.max_item());
        for transaction in dataset.transactions() {
            let view = transaction.view();
            for &item in transaction.items() {
                buckets.buckets[item].push(view);
            }
        }
        buckets
    }

    pub fn support(&self, item: usize) -> usize {
        self.buckets.get(item).map_or(0, Vec::len)
    }

    pub fn get(&self, item: usize) -> &[TransactionView<'a>] {
        self.buckets.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn supports(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Anytime database reduction: rebuilds the buckets of the items in
    /// `scope` from the projected transactions only.
    ///
    /// Each transaction is scanned from its last item down to, but not
    /// including, its projection item. Buckets outside `scope` are untouched.
    pub fn reduce(&mut self, transactions: &[TransactionView<'a>], scope: &[usize]) {
        for &item in scope {
            self.buckets[item].clear();
            self.in_scope[item] = true;
        }

        for transaction in transactions {
            for &item in transaction.tail().iter().rev() {
                if self.in_scope[item] {
                    self.buckets[item].push(*transaction);
                }
            }
        }

        for &item in scope {
            self.in_scope[item] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_transactions(vec![vec![1, 2, 3], vec![1, 2], vec![2, 3], vec![1, 3]]).unwrap()
    }

    #[test]
    fn test_build_counts_true_support() {
        let dataset = sample();
        let buckets = Buckets::build(&dataset);
        assert_eq!(buckets.supports(), vec![0, 3, 3, 3]);
        assert_eq!(buckets.support(7), 0);
        assert!(buckets.get(0).is_empty());
    }

    #[test]
    fn test_reduce_only_touches_scope() {
        let dataset = sample();
        let mut buckets = Buckets::build(&dataset);

        let with_one: Vec<_> = dataset
            .transactions()
            .iter()
            .filter_map(|t| t.view().contains_from_offset(1).map(|pos| t.view().project(pos)))
            .collect();
        buckets.reduce(&with_one, &[3]);

        assert_eq!(buckets.support(3), 2);
        assert_eq!(buckets.support(2), 3);
        assert!(buckets.get(3).iter().all(|t| t.contains_in_original(1)));
    }

    #[test]
    fn test_reduce_skips_projection_item() {
        let dataset = Dataset::from_transactions(vec![vec![4, 5]]).unwrap();
        let mut buckets = Buckets::empty(dataset.max_item());
        let projected = dataset.transactions()[0].view().project(0);
        buckets.reduce(&[projected], &[4, 5]);
        assert_eq!(buckets.support(4), 0);
        assert_eq!(buckets.support(5), 1);
    }
}
