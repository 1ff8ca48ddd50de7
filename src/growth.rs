//! Staged capacities for the hash table's bucket array.

/// Bucket counts, smallest first. Each is a prime just below a power of two.
pub const GROWTH_TABLE: &[usize] = &[509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

/// Capacity a new table starts at.
pub const INITIAL_CAPACITY: usize = GROWTH_TABLE[0];

/// Next `(growth_index, bucket_count)` after `growth_index`, or `None` once the
/// last entry has been reached.
#[inline]
pub(crate) fn next_stage(growth_index: usize) -> Option<(usize, usize)> {
    let next = growth_index + 1;
    GROWTH_TABLE.get(next).map(|&count| (next, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictly_ascending() {
        assert!(GROWTH_TABLE.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(INITIAL_CAPACITY, 509);
        assert_eq!(*GROWTH_TABLE.last().unwrap(), 65521);
    }

    #[test]
    fn next_stage_walks_then_stops() {
        assert_eq!(next_stage(0), Some((1, 1021)));
        assert_eq!(next_stage(GROWTH_TABLE.len() - 2), Some((7, 65521)));
        assert_eq!(next_stage(GROWTH_TABLE.len() - 1), None);
    }
}
