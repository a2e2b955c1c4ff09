use super::error::Result;
use super::utils::FrequentLevel;
use std::io::{BufWriter, Write};

/// Destination of mined itemsets.
pub trait ItemsetSink {
    /// `itemset` is sorted in increasing item order.
    fn emit(&mut self, itemset: &[usize], support: usize) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory result, grouped by itemset length.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    levels: Vec<FrequentLevel>,
}

impl FrequentItemsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, itemset: &[usize], support: usize) {
        let size = itemset.len();
        if size == 0 {
            return;
        }
        while self.levels.len() < size {
            self.levels.push(FrequentLevel::new(self.levels.len() + 1));
        }
        self.levels[size - 1].add_itemset_with_support(itemset, support);
    }

    /// Levels indexed by `itemset_size - 1`; a level may be empty.
    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], usize)> {
        self.levels.iter().flat_map(|level| level.iter_with_support())
    }

    /// Support of `itemset` if it was reported; `itemset` must be sorted.
    pub fn support_of(&self, itemset: &[usize]) -> Option<usize> {
        let level = self.levels.get(itemset.len().checked_sub(1)?)?;
        level
            .iter_with_support()
            .find(|(candidate, _)| *candidate == itemset)
            .map(|(_, support)| support)
    }

    pub fn merge(&mut self, other: FrequentItemsets) {
        for level in &other.levels {
            if level.is_empty() {
                continue;
            }
            let size = level.itemset_size;
            while self.levels.len() < size {
                self.levels.push(FrequentLevel::new(self.levels.len() + 1));
            }
            self.levels[size - 1].append(level);
        }
    }

    /// Owned `(itemset, support)` pairs sorted by itemset, handy for comparisons.
    pub fn to_sorted_vec(&self) -> Vec<(Vec<usize>, usize)> {
        let mut pairs: Vec<(Vec<usize>, usize)> =
            self.iter().map(|(itemset, support)| (itemset.to_vec(), support)).collect();
        pairs.sort_unstable();
        pairs
    }
}

impl ItemsetSink for FrequentItemsets {
    fn emit(&mut self, itemset: &[usize], support: usize) -> Result<()> {
        self.add(itemset, support);
        Ok(())
    }
}

/// Streams itemsets as `1 2 3 #SUP: 4` lines.
pub struct ItemsetWriter<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: Write> ItemsetWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { writer: BufWriter::new(inner), written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> ItemsetSink for ItemsetWriter<W> {
    fn emit(&mut self, itemset: &[usize], support: usize) -> Result<()> {
        let mut items = itemset.iter();
        if let Some(first) = items.next() {
            write!(self.writer, "{first}")?;
        }
        for item in items {
            write!(self.writer, " {item}")?;
        }
        writeln!(self.writer, " #SUP: {support}")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequent_itemsets_levels() {
        let mut result = FrequentItemsets::new();
        result.add(&[1, 2], 4);
        result.add(&[3], 5);
        result.add(&[1, 2, 7], 2);
        result.add(&[], 9);

        assert_eq!(result.len(), 3);
        assert_eq!(result.levels().len(), 3);
        assert_eq!(result.levels()[0].itemset_size, 1);
        assert_eq!(result.support_of(&[1, 2]), Some(4));
        assert_eq!(result.support_of(&[2]), None);
        assert_eq!(result.support_of(&[]), None);
    }

    #[test]
    fn test_merge_rebases_offsets() {
        let mut left = FrequentItemsets::new();
        left.add(&[1], 3);
        left.add(&[1, 4], 2);
        let mut right = FrequentItemsets::new();
        right.add(&[2, 5], 2);
        right.add(&[2, 6, 8], 2);

        left.merge(right);
        assert_eq!(
            left.to_sorted_vec(),
            vec![
                (vec![1], 3),
                (vec![1, 4], 2),
                (vec![2, 5], 2),
                (vec![2, 6, 8], 2),
            ]
        );
    }

    #[test]
    fn test_writer_format() {
        let mut writer = ItemsetWriter::new(Vec::new());
        writer.emit(&[1, 2, 3], 2).unwrap();
        writer.emit(&[7], 5).unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.written(), 2);

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "1 2 3 #SUP: 2\n7 #SUP: 5\n");
    }
}
