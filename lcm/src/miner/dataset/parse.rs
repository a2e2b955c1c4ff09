use crate::miner::error::{LcmError, Result};

const COMMENT_MARKERS: [char; 3] = ['#', '%', '@'];

/// Largest accepted item id. The bucket index holds one slot per id up to the
/// largest one seen, so ids are kept in the `i32` range.
pub const MAX_ITEM: usize = i32::MAX as usize;

/// Parses one input line into a strictly increasing item list.
///
/// Returns `None` for blank and metadata lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Vec<usize>>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKERS) {
        return Ok(None);
    }

    let items = trimmed
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| LcmError::malformed(line_no, format!("invalid item '{token}'")))
        })
        .collect::<Result<Vec<usize>>>()?;

    sort_checked(items, line_no).map(Some)
}

/// Sorts `items` and rejects a transaction that lists the same item twice or
/// names an id above [`MAX_ITEM`].
pub fn sort_checked(mut items: Vec<usize>, line_no: usize) -> Result<Vec<usize>> {
    items.sort_unstable();
    if let Some(&last) = items.last().filter(|&&last| last > MAX_ITEM) {
        return Err(LcmError::malformed(
            line_no,
            format!("item {last} is out of range (max {MAX_ITEM})"),
        ));
    }
    if let Some(pair) = items.windows(2).find(|w| w[0] == w[1]) {
        return Err(LcmError::malformed(
            line_no,
            format!("item {} appears more than once", pair[0]),
        ));
    }
    Ok(items)
}
