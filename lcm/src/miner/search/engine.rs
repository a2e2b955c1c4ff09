use super::policy::ExtensionPolicy;
use crate::miner::buckets::Buckets;
use crate::miner::config::MiningConfig;
use crate::miner::error::Result;
use crate::miner::sink::ItemsetSink;
use crate::miner::stats::SearchCounters;
use crate::miner::transaction::TransactionView;
use tracing::trace;

/// Depth-first LCM backtracking shared by the closed and exhaustive modes.
///
/// The bucket index is the only state mutated between recursive calls; a
/// level only reads buckets it has just rebuilt.
pub(crate) struct Search<'a, 's, P, S: ?Sized> {
    policy: P,
    config: &'s MiningConfig,
    min_count: usize,
    buckets: Buckets<'a>,
    sink: &'s mut S,
    counters: SearchCounters,
}

impl<'a, 's, P: ExtensionPolicy, S: ItemsetSink + ?Sized> Search<'a, 's, P, S> {
    pub(crate) fn new(
        policy: P,
        config: &'s MiningConfig,
        min_count: usize,
        buckets: Buckets<'a>,
        sink: &'s mut S,
    ) -> Self {
        Self {
            policy,
            config,
            min_count,
            buckets,
            sink,
            counters: SearchCounters::default(),
        }
    }

    pub(crate) fn counters(&self) -> SearchCounters {
        self.counters
    }

    /// Tries every candidate in order. `tail` is the position in `prefix` of
    /// the item the prefix was last extended with.
    pub(crate) fn backtrack(
        &mut self,
        prefix: &[usize],
        tail: Option<usize>,
        transactions: &[TransactionView<'a>],
        candidates: &[usize],
        depth: usize,
    ) -> Result<()> {
        for j in 0..candidates.len() {
            self.extend(prefix, tail, transactions, candidates, j, depth)?;
        }
        Ok(())
    }

    /// Explores `prefix ∪ {candidates[j]}` and everything below it.
    pub(crate) fn extend(
        &mut self,
        prefix: &[usize],
        tail: Option<usize>,
        transactions: &[TransactionView<'a>],
        candidates: &[usize],
        j: usize,
        depth: usize,
    ) -> Result<()> {
        let e = candidates[j];

        // candidates all sort after the tail, so only closure items can collide
        if let Some(tail) = tail {
            if prefix[tail + 1..].binary_search(&e).is_ok() {
                return Ok(());
            }
        }

        let transactions_pe = project(transactions, e);
        if !self.policy.is_valid_extension(prefix, &transactions_pe, e) {
            trace!(item = e, depth, "extension rejected");
            return Ok(());
        }

        let later_candidates = &candidates[j + 1..];
        let itemset = self
            .policy
            .build_reported_itemset(prefix, e, &transactions_pe, later_candidates);
        let support = transactions_pe.len();

        self.counters.nodes_visited += 1;
        self.counters.max_depth = self.counters.max_depth.max(depth + 1);
        if self.config.reports_len(itemset.len()) {
            self.sink.emit(&itemset, support)?;
            self.counters.emitted += 1;
        }

        if later_candidates.is_empty() || !self.config.descends_past(itemset.len()) {
            return Ok(());
        }

        self.buckets.reduce(&transactions_pe, later_candidates);
        let next_candidates: Vec<usize> = later_candidates
            .iter()
            .copied()
            .filter(|&k| self.buckets.support(k) >= self.min_count)
            .collect();
        if next_candidates.is_empty() {
            return Ok(());
        }

        let tail = itemset.binary_search(&e).ok();
        self.backtrack(&itemset, tail, &transactions_pe, &next_candidates, depth + 1)
    }
}

/// Transactions containing `e`, each re-projected onto `e`.
pub(crate) fn project<'a>(transactions: &[TransactionView<'a>], e: usize) -> Vec<TransactionView<'a>> {
    transactions
        .iter()
        .filter_map(|t| t.contains_from_offset(e).map(|position| t.project(position)))
        .collect()
}
