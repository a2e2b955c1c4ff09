/// A transaction as loaded: a strictly increasing list of item ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    items: Box<[usize]>,
}

/// A read-only view of a transaction, projected onto the items after `offset`.
///
/// Views never copy the item array; projecting only records the position of
/// the item the view was projected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionView<'a> {
    items: &'a [usize],
    projected_at: Option<usize>,
}

impl Transaction {
    /// Caller guarantees `items` is strictly increasing.
    pub(crate) fn from_sorted(items: Vec<usize>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self { items: items.into_boxed_slice() }
    }

    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_item(&self) -> Option<usize> {
        self.items.last().copied()
    }

    pub fn view(&self) -> TransactionView<'_> {
        TransactionView { items: &self.items, projected_at: None }
    }

    /// Drops every item whose support is below `min_count`, keeping order.
    pub fn remove_infrequent_items(&mut self, supports: &[usize], min_count: usize) {
        let kept: Vec<usize> = self
            .items
            .iter()
            .copied()
            .filter(|&item| supports.get(item).map_or(false, |&count| count >= min_count))
            .collect();
        self.items = kept.into_boxed_slice();
    }
}

impl<'a> TransactionView<'a> {
    pub fn items(&self) -> &'a [usize] {
        self.items
    }

    /// Position of the projection item, `0` when unprojected.
    pub fn offset(&self) -> usize {
        self.projected_at.unwrap_or(0)
    }

    pub fn is_projected(&self) -> bool {
        self.projected_at.is_some()
    }

    /// Items strictly after the projection item; the whole transaction when unprojected.
    pub fn tail(&self) -> &'a [usize] {
        match self.projected_at {
            Some(position) => &self.items[position + 1..],
            None => self.items,
        }
    }

    /// Items strictly before the offset.
    pub fn head(&self) -> &'a [usize] {
        &self.items[..self.offset()]
    }

    /// Absolute position of `item` at or after the offset.
    pub fn contains_from_offset(&self, item: usize) -> Option<usize> {
        let offset = self.offset();
        self.items[offset..]
            .binary_search(&item)
            .ok()
            .map(|pos| pos + offset)
    }

    /// Looks `item` up in the full, unprojected transaction.
    pub fn contains_in_original(&self, item: usize) -> bool {
        self.items.binary_search(&item).is_ok()
    }

    pub fn project(&self, position: usize) -> TransactionView<'a> {
        debug_assert!(position < self.items.len());
        TransactionView { items: self.items, projected_at: Some(position) }
    }

    pub fn original(&self) -> TransactionView<'a> {
        TransactionView { items: self.items, projected_at: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_from_offset() {
        let t = Transaction::from_sorted(vec![1, 3, 5, 8]);
        let view = t.view();
        assert_eq!(view.contains_from_offset(5), Some(2));
        assert_eq!(view.contains_from_offset(4), None);

        let projected = view.project(2);
        assert_eq!(projected.contains_from_offset(1), None);
        assert_eq!(projected.contains_from_offset(8), Some(3));
        assert!(projected.contains_in_original(1));
    }

    #[test]
    fn test_tail_excludes_projection_item() {
        let t = Transaction::from_sorted(vec![2, 4, 6]);
        assert_eq!(t.view().tail(), &[2, 4, 6]);
        assert_eq!(t.view().project(1).tail(), &[6]);
        assert_eq!(t.view().project(0).tail(), &[4, 6]);
        assert!(t.view().project(2).tail().is_empty());
        assert_eq!(t.view().project(2).head(), &[2, 4]);
    }

    #[test]
    fn test_original_is_idempotent() {
        let t = Transaction::from_sorted(vec![1, 2, 3]);
        let projected = t.view().project(1);
        assert_eq!(projected.original(), projected.original().original());
        assert!(!projected.original().is_projected());
    }

    #[test]
    fn test_remove_infrequent_items() {
        let mut t = Transaction::from_sorted(vec![0, 1, 2, 3]);
        let supports = [5, 1, 3, 2];
        t.remove_infrequent_items(&supports, 2);
        assert_eq!(t.items(), &[0, 2, 3]);
    }
}
