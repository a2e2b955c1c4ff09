/// Flat itemset storage: all items in one array, `(start, len)` per itemset.
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    pub items: Vec<usize>,
    pub offsets: Vec<(usize, usize)>,
    pub supports: Vec<usize>,
}

/// All itemsets of one length.
#[derive(Debug, Clone)]
pub struct FrequentLevel {
    pub storage: ItemsetStorage,
    pub itemset_size: usize,
}

impl ItemsetStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Expects `items` sorted and duplicate-free, as the search emits them.
    pub(crate) fn add_itemset_with_support(&mut self, items: &[usize], support: usize) {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        let start = self.items.len();
        self.items.extend_from_slice(items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);
    }

    pub(crate) fn get_itemset(&self, idx: usize) -> &[usize] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub(crate) fn len(&self) -> usize {
        self.offsets.len()
    }
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self { storage: ItemsetStorage::new(), itemset_size }
    }

    pub fn add_itemset_with_support(&mut self, items: &[usize], support: usize) -> usize {
        debug_assert_eq!(items.len(), self.itemset_size);
        self.storage.add_itemset_with_support(items, support);
        self.storage.len() - 1
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        self.storage.get_itemset(idx)
    }

    pub fn get_support(&self, idx: usize) -> usize {
        self.storage.supports[idx]
    }

    pub fn iter_with_support(&self) -> impl Iterator<Item = (&[usize], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.get_support(idx)))
    }

    /// Appends every itemset of `other`, rebasing its offsets.
    pub fn append(&mut self, other: &FrequentLevel) {
        debug_assert_eq!(other.itemset_size, self.itemset_size);
        for (itemset, support) in other.iter_with_support() {
            self.storage.add_itemset_with_support(itemset, support);
        }
    }
}
