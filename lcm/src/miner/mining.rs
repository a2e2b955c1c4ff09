use super::buckets::Buckets;
use super::config::MiningConfig;
use super::dataset::Dataset;
use super::error::Result;
use super::search::engine::Search;
use super::search::{ClosedExtension, ExtensionPolicy, FrequentExtension};
use super::sink::{FrequentItemsets, ItemsetSink, ItemsetWriter};
use super::stats::{MiningStats, SearchCounters};
use super::transaction::{Transaction, TransactionView};
use ndarray::ArrayView2;
use rayon::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of [`run`]: itemsets are returned only when no output file was given.
#[derive(Debug)]
pub struct MiningOutcome {
    pub itemsets: Option<FrequentItemsets>,
    pub stats: MiningStats,
}

/// Dataset after the infrequent-item pass, with its frequent items in order.
struct Prepared {
    dataset: Dataset,
    frequent_items: Vec<usize>,
    stats: MiningStats,
}

impl Prepared {
    fn new(mut dataset: Dataset, config: &MiningConfig) -> Self {
        let min_count = config.min_count(dataset.len());
        let mut stats = MiningStats::start(dataset.len(), min_count);

        let supports = Buckets::build(&dataset).supports();
        dataset.remove_infrequent_items(&supports, min_count);

        let frequent_items: Vec<usize> = dataset
            .unique_items()
            .iter()
            .copied()
            .filter(|&item| supports[item] >= min_count)
            .collect();
        stats.frequent_item_count = frequent_items.len();

        debug!(
            transactions = dataset.len(),
            min_count,
            frequent_items = frequent_items.len(),
            "infrequent items removed"
        );
        Self { dataset, frequent_items, stats }
    }

    fn views(&self) -> Vec<TransactionView<'_>> {
        self.dataset
            .transactions()
            .iter()
            .filter(|t| !t.is_empty())
            .map(Transaction::view)
            .collect()
    }
}

/// Mines `dataset` into `sink`, closed or exhaustive per `config`.
///
/// The search runs on the calling thread; `config.parallel` only applies to
/// [`mine_to_memory`].
pub fn mine(dataset: Dataset, config: &MiningConfig, sink: &mut dyn ItemsetSink) -> Result<MiningStats> {
    config.validate()?;
    if config.parallel {
        warn!("parallel search needs an in-memory result; running sequentially");
    }

    let prepared = Prepared::new(dataset, config);
    let views = prepared.views();
    let min_count = prepared.stats.min_count;
    let buckets = Buckets::empty(prepared.dataset.max_item());

    let counters = if config.closed_only {
        search_sequential(ClosedExtension, config, min_count, buckets, sink, &views, &prepared.frequent_items)?
    } else {
        search_sequential(FrequentExtension, config, min_count, buckets, sink, &views, &prepared.frequent_items)?
    };
    sink.finish()?;

    let mut stats = prepared.stats;
    stats.finish(counters);
    log_finished(&stats, config);
    Ok(stats)
}

/// Mines into a [`FrequentItemsets`], splitting the top-level branches across
/// the rayon pool when `config.parallel` is set.
pub fn mine_to_memory(dataset: Dataset, config: &MiningConfig) -> Result<(FrequentItemsets, MiningStats)> {
    if !config.parallel {
        let mut itemsets = FrequentItemsets::new();
        let stats = mine(dataset, config, &mut itemsets)?;
        return Ok((itemsets, stats));
    }

    config.validate()?;
    let prepared = Prepared::new(dataset, config);
    let views = prepared.views();
    let min_count = prepared.stats.min_count;
    let max_item = prepared.dataset.max_item();

    let (itemsets, counters) = if config.closed_only {
        search_parallel(ClosedExtension, config, min_count, max_item, &views, &prepared.frequent_items)?
    } else {
        search_parallel(FrequentExtension, config, min_count, max_item, &views, &prepared.frequent_items)?
    };

    let mut stats = prepared.stats;
    stats.finish(counters);
    log_finished(&stats, config);
    Ok((itemsets, stats))
}

/// Mines a dense 0/1 matrix (rows are transactions, columns items).
pub fn mine_matrix(matrix: ArrayView2<i32>, config: &MiningConfig) -> Result<(FrequentItemsets, MiningStats)> {
    mine_to_memory(Dataset::from_matrix(matrix), config)
}

/// Loads `dataset_path` and mines it, streaming to `output_path` when given.
///
/// Itemsets already flushed stay in the output file if the run fails midway.
pub fn run(dataset_path: impl AsRef<Path>, output_path: Option<&Path>, config: &MiningConfig) -> Result<MiningOutcome> {
    config.validate()?;
    let dataset = Dataset::load(dataset_path)?;

    match output_path {
        Some(path) => {
            let mut writer = ItemsetWriter::new(File::create(path)?);
            let stats = mine(dataset, config, &mut writer)?;
            info!(path = %path.display(), written = writer.written(), "itemsets written");
            Ok(MiningOutcome { itemsets: None, stats })
        }
        None => {
            let (itemsets, stats) = mine_to_memory(dataset, config)?;
            Ok(MiningOutcome { itemsets: Some(itemsets), stats })
        }
    }
}

fn search_sequential<'a, P: ExtensionPolicy>(
    policy: P,
    config: &MiningConfig,
    min_count: usize,
    buckets: Buckets<'a>,
    sink: &mut dyn ItemsetSink,
    views: &[TransactionView<'a>],
    frequent_items: &[usize],
) -> Result<SearchCounters> {
    let mut search = Search::new(policy, config, min_count, buckets, sink);
    search.backtrack(&[], None, views, frequent_items, 0)?;
    Ok(search.counters())
}

/// Each top-level branch gets its own bucket index: a branch rebuilds every
/// bucket before reading it, so it never needs a sibling's state.
fn search_parallel<P: ExtensionPolicy + Copy + Send + Sync>(
    policy: P,
    config: &MiningConfig,
    min_count: usize,
    max_item: Option<usize>,
    views: &[TransactionView<'_>],
    frequent_items: &[usize],
) -> Result<(FrequentItemsets, SearchCounters)> {
    let branches: Vec<(FrequentItemsets, SearchCounters)> = (0..frequent_items.len())
        .into_par_iter()
        .map(|j| -> Result<(FrequentItemsets, SearchCounters)> {
            let mut local = FrequentItemsets::new();
            let counters = {
                let mut search = Search::new(policy, config, min_count, Buckets::empty(max_item), &mut local);
                search.extend(&[], None, views, frequent_items, j, 0)?;
                search.counters()
            };
            Ok((local, counters))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut itemsets = FrequentItemsets::new();
    let mut counters = SearchCounters::default();
    for (branch, branch_counters) in branches {
        itemsets.merge(branch);
        counters.merge(branch_counters);
    }
    Ok((itemsets, counters))
}

fn log_finished(stats: &MiningStats, config: &MiningConfig) {
    info!(
        closed_only = config.closed_only,
        transactions = stats.transaction_count,
        min_count = stats.min_count,
        itemsets = stats.frequent_count,
        nodes = stats.nodes_visited,
        max_depth = stats.max_depth,
        elapsed_ms = stats.elapsed_ms(),
        "mining finished"
    );
}
