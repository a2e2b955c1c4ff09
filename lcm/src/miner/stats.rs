use chrono::{DateTime, Utc};

/// Counters gathered while the search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    /// Extensions that passed the extension test
    pub nodes_visited: usize,
    /// Itemsets handed to the sink
    pub emitted: usize,
    pub max_depth: usize,
}

impl SearchCounters {
    pub fn merge(&mut self, other: SearchCounters) {
        self.nodes_visited += other.nodes_visited;
        self.emitted += other.emitted;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Summary of one mining run, returned to the caller instead of kept globally.
#[derive(Debug, Clone)]
pub struct MiningStats {
    pub transaction_count: usize,
    pub min_count: usize,
    pub frequent_item_count: usize,
    /// Reported itemsets
    pub frequent_count: usize,
    pub nodes_visited: usize,
    pub max_depth: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl MiningStats {
    pub(crate) fn start(transaction_count: usize, min_count: usize) -> Self {
        let now = Utc::now();
        Self {
            transaction_count,
            min_count,
            frequent_item_count: 0,
            frequent_count: 0,
            nodes_visited: 0,
            max_depth: 0,
            started_at: now,
            finished_at: now,
        }
    }

    pub(crate) fn finish(&mut self, counters: SearchCounters) {
        self.frequent_count = counters.emitted;
        self.nodes_visited = counters.nodes_visited;
        self.max_depth = counters.max_depth;
        self.finished_at = Utc::now();
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
