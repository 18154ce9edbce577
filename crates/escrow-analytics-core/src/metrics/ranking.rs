use serde::Serialize;

use super::segmentation::{classify, RiskTier};
use crate::dataset::EscrowRecord;

/// One page of the shortage outreach queue.
#[derive(Debug, Clone, Serialize)]
pub struct ShortageQueuePage<'a> {
    pub tier: Option<RiskTier>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Records matching the tier filter, across all pages
    pub matching: usize,
    /// Records with any shortage, before the tier filter
    pub queue_size: usize,
    pub records: Vec<&'a EscrowRecord>,
}

/// The `limit` largest positive shortages, largest first. Ties keep input order.
pub fn top_shortages(records: &[EscrowRecord], limit: usize) -> Vec<&EscrowRecord> {
    let mut queue = by_shortage_desc(records);
    queue.truncate(limit);
    queue
}

/// Shortage outreach queue: positive shortages sorted largest first,
/// optionally narrowed to one tier, then paginated.
///
/// `page` is 1-based and clamped into `[1, total_pages]`; there is always at
/// least one (possibly empty) page. A `page_size` of zero is treated as one.
pub fn shortage_queue(
    records: &[EscrowRecord],
    tier: Option<RiskTier>,
    page: usize,
    page_size: usize,
) -> ShortageQueuePage<'_> {
    let page_size = page_size.max(1);
    let queue = by_shortage_desc(records);
    let queue_size = queue.len();

    let filtered: Vec<&EscrowRecord> = match tier {
        Some(t) => queue.into_iter().filter(|r| classify(r) == t).collect(),
        None => queue,
    };

    let matching = filtered.len();
    let total_pages = matching.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;

    let records = filtered.into_iter().skip(offset).take(page_size).collect();

    ShortageQueuePage {
        tier,
        page,
        page_size,
        total_pages,
        matching,
        queue_size,
        records,
    }
}

fn by_shortage_desc(records: &[EscrowRecord]) -> Vec<&EscrowRecord> {
    let mut queue: Vec<&EscrowRecord> = records.iter().filter(|r| r.shortage() > 0.0).collect();
    // stable: equal shortages keep their input order
    queue.sort_by(|a, b| b.shortage().total_cmp(&a.shortage()));
    queue
}
