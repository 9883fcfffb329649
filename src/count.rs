use crate::common::{CountMap, Row};

/// Decides which rows count toward the totals.
///
/// The two variants mirror the two dataset shapes in circulation: one
/// ships headerless and every row is a record, the other starts with a
/// header row whose first field holds a known sentinel.
#[derive(Debug, Clone)]
pub enum RowPolicy {
    /// Every row with a first field counts, the first one included.
    CountAll,
    /// Rows whose first field is empty or equals `sentinel` are skipped.
    SkipHeader { sentinel: String },
}

impl RowPolicy {
    /// The one header sentinel observed in the datasets themselves.
    pub const DEFAULT_SENTINEL: &'static str = "Passenger ID";

    fn counts(&self, id: &str) -> bool {
        match self {
            RowPolicy::CountAll => true,
            RowPolicy::SkipHeader { sentinel } => !id.is_empty() && id != sentinel.as_str(),
        }
    }
}

/// Map phase: flights per passenger within a single chunk.
///
/// Rows with no fields at all never count; whether an empty or sentinel
/// first field counts is the policy's call.
pub fn count_chunk(rows: &[Row], policy: &RowPolicy) -> CountMap {
    let mut counts = CountMap::new();
    for row in rows {
        let Some(id) = row.get(0) else {
            continue;
        };
        if !policy.counts(id) {
            continue;
        }
        *counts.entry(id.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Reduce phase: key-wise sum of per-chunk counts. A key absent from a
/// chunk contributes zero, so input order is irrelevant.
pub fn merge_counts(maps: Vec<CountMap>) -> CountMap {
    let mut totals = CountMap::new();
    for counts in maps {
        for (id, n) in counts {
            *totals.entry(id).or_insert(0) += n;
        }
    }
    totals
}

/// The maximum flight count and every passenger reaching it, sorted by
/// id so ties always print in the same order. `None` when there is
/// nothing to report.
pub fn top_passengers(totals: &CountMap) -> Option<(u64, Vec<String>)> {
    let max = totals.values().copied().max()?;
    let mut top: Vec<String> = totals
        .iter()
        .filter(|&(_, &count)| count == max)
        .map(|(id, _)| id.clone())
        .collect();
    top.sort();
    Some((max, top))
}
