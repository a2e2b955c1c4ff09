pub mod buckets;
pub mod config;
pub mod dataset;
pub mod error;
pub mod mining;
pub mod search;
pub mod sink;
pub mod stats;
pub mod transaction;
pub mod utils;


pub use buckets::Buckets;
pub use config::MiningConfig;
pub use dataset::{BatchLoader, Dataset};
pub use error::{LcmError, Result};
pub use mining::{mine, mine_matrix, mine_to_memory, run, MiningOutcome};
pub use search::{ClosedExtension, ExtensionPolicy, FrequentExtension};
pub use sink::{FrequentItemsets, ItemsetSink, ItemsetWriter};
pub use stats::{MiningStats, SearchCounters};
pub use transaction::{Transaction, TransactionView};
pub use utils::{FrequentLevel, ItemsetStorage};
