//! Growable bit vector over permission indices.

use super::slot::PermissionSlot;

const WORD_BITS: usize = u64::BITS as usize;

/// A set of permission indices, stored as 64-bit words.
///
/// Bits are only ever added: storage grows on demand in [`BitSet::set`] and
/// nothing shrinks or clears. Reads past the end of storage report `false`.
///
/// A mask is usually built once per authorization context and then read by
/// many filters. Reading from several threads is fine once it is built;
/// mutation needs external synchronization.
#[derive(Clone, Debug)]
pub struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    /// Creates an empty mask with a single zeroed word.
    #[must_use]
    pub fn new() -> Self {
        Self { words: vec![0] }
    }

    /// Creates an empty mask with room for indices below `bits`.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(WORD_BITS).max(1)],
        }
    }

    /// Marks `index` as present, growing storage if needed.
    pub fn set(&mut self, index: usize) {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (index % WORD_BITS);
    }

    /// Reports whether `index` is present.
    pub fn has(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Reports whether the index bound to `slot` is present.
    ///
    /// A slot that has not been bound yet holds no index, so the answer is
    /// `false` and the guarded field is cleared.
    pub fn has_slot(&self, slot: &PermissionSlot) -> bool {
        slot.index().is_some_and(|index| self.has(index))
    }

    /// Returns `true` if no index is present.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Iterates over present indices in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word: 0,
            pending: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<usize> for BitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.set(index);
        }
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the indices present in a [`BitSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [u64],
    word: usize,
    pending: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.pending != 0 {
                let bit = self.pending.trailing_zeros() as usize;
                // Clear the lowest set bit.
                self.pending &= self.pending - 1;
                return Some(self.word * WORD_BITS + bit);
            }
            self.word += 1;
            self.pending = *self.words.get(self.word)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_nothing() {
        let set = BitSet::new();
        assert!(set.is_empty());
        for index in [0, 1, 63, 64, 1_000, usize::MAX] {
            assert!(!set.has(index));
        }
    }

    #[test]
    fn set_marks_only_that_index() {
        let mut set = BitSet::new();
        set.set(5);
        assert!(set.has(5));
        assert!(!set.has(4));
        assert!(!set.has(6));
        assert!(!set.has(69));
    }

    #[test]
    fn set_grows_across_word_boundaries() {
        let mut set = BitSet::new();
        set.set(130);
        assert!(set.has(130));
        assert!(!set.has(2));
        assert!(!set.has(66));
        assert!(!set.has(129));
        assert!(!set.has(131));
        assert_eq!(set.words.len(), 3);
    }

    #[test]
    fn word_edges() {
        let mut set = BitSet::new();
        set.set(63);
        set.set(64);
        assert!(set.has(63));
        assert!(set.has(64));
        assert!(!set.has(62));
        assert!(!set.has(65));
    }

    #[test]
    fn far_out_of_range_read_is_false() {
        let mut set = BitSet::new();
        set.set(1);
        assert!(!set.has(1 << 40));
    }

    #[test]
    fn set_is_idempotent() {
        let mut set = BitSet::new();
        set.set(7);
        set.set(7);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn with_capacity_preallocates() {
        let set = BitSet::with_capacity(129);
        assert_eq!(set.words.len(), 3);
        assert!(set.is_empty());
        assert_eq!(BitSet::with_capacity(0).words.len(), 1);
    }

    #[test]
    fn iter_yields_ascending_indices() {
        let set: BitSet = [200, 3, 64, 0, 63].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3, 63, 64, 200]);
    }

    #[test]
    fn unbound_slot_is_not_held() {
        let slot = PermissionSlot::new();
        let set: BitSet = (0..128).collect();
        assert!(!set.has_slot(&slot));
        slot.bind(12);
        assert!(set.has_slot(&slot));
    }
}
