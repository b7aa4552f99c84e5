//! Set of still-active special tiles.
//!
//! Special tiles are numbered in row-major discovery order when the grid is
//! parsed, so a set of them is a bitmask over those indices. Iterating the
//! bits in order yields the tiles in sorted coordinate order.

/// Bitset over special-tile indices.
///
/// Bit `i` set means special tile `i` has not been covered yet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileSet {
    words: Vec<u64>,
}

impl TileSet {
    /// Creates a set with tiles `0..count` all active.
    pub fn full(count: usize) -> Self {
        let mut words = vec![u64::MAX; count.div_ceil(64)];
        let remainder = count % 64;
        if remainder != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << remainder) - 1;
            }
        }
        Self { words }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|word| word & (1u64 << (index % 64)) != 0)
    }

    /// Clears tile `index`. Returns whether it was active.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        match self.words.get_mut(index / 64) {
            Some(word) => {
                let bit = 1u64 << (index % 64);
                let was_set = *word & bit != 0;
                *word &= !bit;
                was_set
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Iterates active tile indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(word_index * 64 + bit)
            })
        })
    }

    /// Returns whether every tile in `self` is also in `other`.
    pub fn is_subset(&self, other: &TileSet) -> bool {
        self.words
            .iter()
            .zip(other.words.iter().chain(std::iter::repeat(&0)))
            .all(|(mine, theirs)| mine & !theirs == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sets_exactly_count_bits() {
        for count in [0, 1, 63, 64, 65, 130] {
            let set = TileSet::full(count);
            assert_eq!(set.len(), count, "count {count}");
            assert!(!set.contains(count));
        }
    }

    #[test]
    fn test_remove_reports_previous_membership() {
        let mut set = TileSet::full(70);
        assert!(set.remove(66));
        assert!(!set.remove(66));
        assert!(!set.contains(66));
        assert!(!set.remove(500));
        assert_eq!(set.len(), 69);
    }

    #[test]
    fn test_iter_is_ascending() {
        let mut set = TileSet::full(5);
        set.remove(1);
        set.remove(3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn test_subset() {
        let full = TileSet::full(10);
        let mut partial = full.clone();
        partial.remove(4);
        assert!(partial.is_subset(&full));
        assert!(!full.is_subset(&partial));
        assert!(TileSet::full(0).is_empty());
    }
}
