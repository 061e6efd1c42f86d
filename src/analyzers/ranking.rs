use std::cmp::Ordering;

/// A zone total keyed by the raw zone bytes.
pub type RawZoneCount<'a> = (&'a [u8], u64);

/// A (zone, hour) total keyed by the raw zone bytes.
pub type RawSlotCount<'a> = (&'a [u8], u8, u64);

/// Busiest first, then zone bytes ascending.
pub fn zone_rank(a: &RawZoneCount<'_>, b: &RawZoneCount<'_>) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Busiest first, then zone bytes ascending, then hour ascending.
pub fn slot_rank(a: &RawSlotCount<'_>, b: &RawSlotCount<'_>) -> Ordering {
    b.2.cmp(&a.2)
        .then_with(|| a.0.cmp(b.0))
        .then_with(|| a.1.cmp(&b.1))
}

/// Returns the first `k` items of `items` under `compare`, sorted.
///
/// Partitions with `select_nth_unstable_by` so only the retained prefix is
/// fully sorted. For a total order the result is identical to sorting
/// everything and truncating to `k`.
pub fn top_k_by<T, F>(mut items: Vec<T>, k: usize, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if k == 0 {
        return Vec::new();
    }

    if k < items.len() {
        items.select_nth_unstable_by(k - 1, &mut compare);
        items.truncate(k);
    }
    items.sort_unstable_by(compare);
    items
}
