use crate::miner::transaction::TransactionView;

/// What separates closed mining from exhaustive mining: which extensions
/// are accepted and which itemset a node reports.
pub trait ExtensionPolicy {
    fn is_valid_extension(&self, prefix: &[usize], transactions_pe: &[TransactionView<'_>], e: usize) -> bool;

    /// `later_candidates` are the candidates ordered after `e` at this level.
    fn build_reported_itemset(
        &self,
        prefix: &[usize],
        e: usize,
        transactions_pe: &[TransactionView<'_>],
        later_candidates: &[usize],
    ) -> Vec<usize>;
}

/// Prefix-preserving closure extension: each closed itemset is reached once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedExtension;

/// Every extension is taken and reported as `prefix ∪ {e}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequentExtension;

impl ExtensionPolicy for ClosedExtension {
    /// Rejects `prefix ∪ {e}` when some item below `e` outside the prefix
    /// occurs in every transaction containing it; that closure was already
    /// reached along another branch.
    fn is_valid_extension(&self, prefix: &[usize], transactions_pe: &[TransactionView<'_>], e: usize) -> bool {
        let Some((first, rest)) = transactions_pe.split_first() else {
            return false;
        };
        !first.head().iter().any(|&item| {
            item < e
                && prefix.binary_search(&item).is_err()
                && rest.iter().all(|t| t.contains_in_original(item))
        })
    }

    fn build_reported_itemset(
        &self,
        prefix: &[usize],
        e: usize,
        transactions_pe: &[TransactionView<'_>],
        later_candidates: &[usize],
    ) -> Vec<usize> {
        let mut itemset: Vec<usize> = prefix.iter().copied().take_while(|&item| item < e).collect();
        itemset.push(e);
        itemset.extend(later_candidates.iter().copied().filter(|&k| {
            transactions_pe.iter().all(|t| t.contains_from_offset(k).is_some())
        }));
        itemset
    }
}

impl ExtensionPolicy for FrequentExtension {
    fn is_valid_extension(&self, _prefix: &[usize], transactions_pe: &[TransactionView<'_>], _e: usize) -> bool {
        !transactions_pe.is_empty()
    }

    fn build_reported_itemset(
        &self,
        prefix: &[usize],
        e: usize,
        _transactions_pe: &[TransactionView<'_>],
        _later_candidates: &[usize],
    ) -> Vec<usize> {
        let mut itemset = Vec::with_capacity(prefix.len() + 1);
        itemset.extend_from_slice(prefix);
        itemset.push(e);
        itemset
    }
}
