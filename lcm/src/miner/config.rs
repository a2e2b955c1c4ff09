use super::error::{LcmError, Result};

/// Parameters of a single mining run.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningConfig {
    /// Relative support threshold in `(0, 1]`
    pub min_support: f64,
    /// Report only closed itemsets (PPC-extension search) instead of every frequent one
    pub closed_only: bool,
    /// Shortest itemset that gets reported
    pub min_len: usize,
    /// Longest itemset that gets reported; the search stops descending once reached
    pub max_len: Option<usize>,
    /// Run the top-level branches on the rayon pool (in-memory results only)
    pub parallel: bool,
}

impl MiningConfig {
    pub fn new(min_support: f64) -> Self {
        Self {
            min_support,
            closed_only: true,
            min_len: 1,
            max_len: None,
            parallel: false,
        }
    }

    pub fn closed_only(mut self, closed_only: bool) -> Self {
        self.closed_only = closed_only;
        self
    }

    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_support.is_nan() || self.min_support <= 0.0 || self.min_support > 1.0 {
            return Err(LcmError::Config(format!(
                "minimum support must be in (0, 1], got {}",
                self.min_support
            )));
        }
        match self.max_len {
            Some(0) => Err(LcmError::Config("maximum length must be at least 1".into())),
            Some(max) if self.min_len > max => Err(LcmError::Config(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_len, max
            ))),
            _ => Ok(()),
        }
    }

    /// Absolute threshold for `num_transactions` transactions, never below one.
    pub fn min_count(&self, num_transactions: usize) -> usize {
        let min_count = (self.min_support * num_transactions as f64).ceil() as usize;
        min_count.max(1)
    }

    pub(crate) fn reports_len(&self, len: usize) -> bool {
        len >= self.min_len && self.max_len.map_or(true, |max| len <= max)
    }

    pub(crate) fn descends_past(&self, len: usize) -> bool {
        self.max_len.map_or(true, |max| len < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_count_rounds_up() {
        let config = MiningConfig::new(0.5);
        assert_eq!(config.min_count(4), 2);
        assert_eq!(config.min_count(5), 3);
        assert_eq!(MiningConfig::new(0.01).min_count(10), 1);
    }

    #[test]
    fn test_min_count_clamped_to_one() {
        assert_eq!(MiningConfig::new(0.3).min_count(0), 1);
    }

    #[test]
    fn test_validate_rejects_out_of_range_support() {
        assert!(MiningConfig::new(0.0).validate().is_err());
        assert!(MiningConfig::new(1.5).validate().is_err());
        assert!(MiningConfig::new(f64::NAN).validate().is_err());
        assert!(MiningConfig::new(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(MiningConfig::new(0.5).max_len(Some(0)).validate().is_err());
        assert!(MiningConfig::new(0.5).min_len(3).max_len(Some(2)).validate().is_err());
        assert!(MiningConfig::new(0.5).min_len(2).max_len(Some(2)).validate().is_ok());
    }
}
