use std::collections::HashMap;

use tracing::{debug, warn};

use crate::accessor::MetaSource;
use crate::block::{BlockId, TimeRange};
use crate::error::{AccessError, LocateError};

/// Probe is one metadata fetch performed during a search: which list index
/// was examined and the range it reported.
#[derive(Debug, Clone)]
pub struct Probe {
    pub index: usize,
    pub range: TimeRange,
}

/// LocateOutcome reports the blocks whose range contains the target, in
/// discovery order, along with every probe the search performed.
#[derive(Debug)]
pub struct LocateOutcome {
    pub hits: Vec<BlockId>,
    pub probes: Vec<Probe>,
}

impl LocateOutcome {
    /// fetch_count returns the number of metadata fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.probes.len()
    }
}

/// locate finds the block(s) whose time range contains `target`.
///
/// Binary search over the listing order, one metadata fetch per step, each
/// awaited before the next narrowing decision. A call performs at most
/// ceil(log2 n) + 2 distinct fetches, search and neighbor check combined.
/// When the listing is not time-sorted with non-overlapping ranges the
/// call still terminates within that bound and without panicking, but
/// blocks off the visited path can be missed.
///
/// After the search the immediate neighbors of the final position are also
/// tested. Block coverage is not guaranteed gap-free or strictly
/// partitioned, so a target sitting on a boundary can live in a neighbor
/// the narrowing already passed over.
///
/// Zero hits is a valid outcome: the target falls in a gap or outside all
/// coverage. An empty listing fails with `LocateError::EmptyIndex` before
/// any fetch.
pub async fn locate<S>(
    source: &S,
    blocks: &[BlockId],
    target: i64,
) -> Result<LocateOutcome, LocateError>
where
    S: MetaSource + ?Sized,
{
    if blocks.is_empty() {
        return Err(LocateError::EmptyIndex);
    }

    let mut fetched: HashMap<usize, TimeRange> = HashMap::new();
    let mut probes: Vec<Probe> = Vec::new();
    let mut hits: Vec<BlockId> = Vec::new();

    let mut left = 0;
    let mut right = blocks.len();
    let mut mid = 0;

    while left < right {
        mid = (left + right) / 2;
        let range = range_at(source, blocks, mid, &mut fetched, &mut probes).await?;
        if range.contains(target) {
            hits.push(blocks[mid].clone());
            break;
        } else if target < range.min {
            right = mid;
        } else {
            left = mid + 1;
        }
    }

    // The listing is non-empty, so the loop ran at least once and `mid` is
    // the last examined index. Both neighbor fetches go through the
    // per-call cache; an index the search already visited costs nothing.
    if mid > 0 {
        let range = range_at(source, blocks, mid - 1, &mut fetched, &mut probes).await?;
        if range.contains(target) {
            hits.push(blocks[mid - 1].clone());
        }
    }
    if mid + 1 < blocks.len() {
        let range = range_at(source, blocks, mid + 1, &mut fetched, &mut probes).await?;
        if range.contains(target) {
            hits.push(blocks[mid + 1].clone());
        }
    }

    warn_on_disorder(&probes);

    Ok(LocateOutcome { hits, probes })
}

/// range_at fetches the range of the block at `index`, at most once per
/// locate call.
async fn range_at<S>(
    source: &S,
    blocks: &[BlockId],
    index: usize,
    fetched: &mut HashMap<usize, TimeRange>,
    probes: &mut Vec<Probe>,
) -> Result<TimeRange, AccessError>
where
    S: MetaSource + ?Sized,
{
    if let Some(range) = fetched.get(&index) {
        return Ok(range.clone());
    }

    let range = source.fetch_range(&blocks[index]).await?;
    debug!(index, min = range.min, max = range.max, "fetched block range");

    fetched.insert(index, range.clone());
    probes.push(Probe {
        index,
        range: range.clone(),
    });

    Ok(range)
}

/// warn_on_disorder cross-checks the ranges the search observed, in index
/// order. A violation among visited blocks means the listing is not
/// time-sorted and the result may be incomplete. Costs no extra fetches.
/// Shared boundaries (max of one block equal to min of a later one) are
/// legitimate and stay silent.
fn warn_on_disorder(probes: &[Probe]) {
    let mut seen: Vec<&Probe> = probes.iter().collect();
    seen.sort_by_key(|p| p.index);
    for pair in seen.windows(2) {
        if pair[1].range.min < pair[0].range.max {
            warn!(
                left_index = pair[0].index,
                right_index = pair[1].index,
                "observed block ranges overlap or are out of order; listing is not time-sorted"
            );
        }
    }
}
