//! Linear algebra over GF(2).
//!
//! Vectors are packed into `u64` words; addition is XOR. Rank is computed by
//! Gaussian elimination keyed on each pivot row's leading (highest) set bit.
//!
//! ## Elimination
//!
//! For each incoming vector, while its leading bit collides with an existing
//! pivot, XOR that pivot into it. A vector that reaches zero lies in the span
//! and adds no rank; otherwise it becomes the pivot for its leading bit.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const WORD_BITS: usize = 64;

/// Bit-vector over GF(2) with a fixed logical length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Gf2Vector {
    len: usize,
    words: Vec<u64>,
}

impl Gf2Vector {
    /// All-zero vector of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self { len, words: vec![0; len.div_ceil(WORD_BITS)] }
    }

    /// Unit vector with only bit `index` set.
    pub fn unit(len: usize, index: usize) -> Self {
        let mut v = Self::zeros(len);
        v.set(index, true);
        v
    }

    /// Build from a slice of bits, bit `i` taken from `bits[i]`.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut v = Self::zeros(bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            v.set(i, bit);
        }
        v
    }

    /// Logical length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read bit `index`; bits past the end read as zero.
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .map(|w| (w >> (index % WORD_BITS)) & 1 == 1)
            .unwrap_or(false)
    }

    /// Write bit `index`, growing the vector if needed.
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.len {
            self.len = index + 1;
            self.words.resize(self.len.div_ceil(WORD_BITS), 0);
        }
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            self.words[index / WORD_BITS] |= mask;
        } else {
            self.words[index / WORD_BITS] &= !mask;
        }
    }

    /// Whether every bit is zero.
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Index of the highest set bit.
    pub fn leading_bit(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, w)| **w != 0)
            .map(|(i, &w)| i * WORD_BITS + (WORD_BITS - 1 - w.leading_zeros() as usize))
    }

    /// In-place GF(2) addition. A shorter operand is zero-extended.
    pub fn xor_assign(&mut self, other: &Gf2Vector) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        self.len = self.len.max(other.len);
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst ^= src;
        }
    }

    /// Indices of the set bits, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }
}

impl fmt::Display for Gf2Vector {
    /// Bits in index order, e.g. `0110`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.get(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Incrementally built row-echelon basis.
///
/// Pivot rows are keyed by their leading bit, so at most one row owns any
/// given leading position.
#[derive(Debug, Clone, Default)]
pub struct Gf2Basis {
    pivots: BTreeMap<usize, Gf2Vector>,
}

impl Gf2Basis {
    /// Empty basis (rank 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Basis of the span of `vectors`.
    pub fn from_vectors<'a>(vectors: impl IntoIterator<Item = &'a Gf2Vector>) -> Self {
        let mut basis = Self::new();
        for v in vectors {
            basis.insert(v.clone());
        }
        basis
    }

    /// Dimension of the spanned subspace.
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Reduce `vector` against the pivots until its leading bit is free or it vanishes.
    pub fn reduce(&self, mut vector: Gf2Vector) -> Gf2Vector {
        while let Some(lead) = vector.leading_bit() {
            match self.pivots.get(&lead) {
                Some(pivot) => vector.xor_assign(pivot),
                None => break,
            }
        }
        vector
    }

    /// Add a vector. Returns `true` when it was independent and raised the rank.
    pub fn insert(&mut self, vector: Gf2Vector) -> bool {
        let reduced = self.reduce(vector);
        match reduced.leading_bit() {
            Some(lead) => {
                self.pivots.insert(lead, reduced);
                true
            }
            None => false,
        }
    }

    /// Whether `vector` lies in the span of the basis.
    pub fn spans(&self, vector: &Gf2Vector) -> bool {
        self.reduce(vector.clone()).is_zero()
    }
}

/// Rank over GF(2) of a set of bit-vectors.
///
/// Zero vectors and duplicates contribute nothing; the result does not
/// depend on input order.
pub fn rank_gf2(vectors: &[Gf2Vector]) -> usize {
    Gf2Basis::from_vectors(vectors).rank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(bits: &str) -> Gf2Vector {
        Gf2Vector::from_bits(&bits.chars().map(|c| c == '1').collect::<Vec<_>>())
    }

    #[test]
    fn test_rank_of_empty_set() {
        assert_eq!(rank_gf2(&[]), 0);
    }

    #[test]
    fn test_rank_ignores_zero_vector() {
        let vectors = vec![v("110"), v("000"), v("011")];
        assert_eq!(rank_gf2(&vectors), 2);
        assert_eq!(rank_gf2(&[v("000")]), 0);
    }

    #[test]
    fn test_rank_detects_dependence() {
        // 110 + 011 = 101
        assert_eq!(rank_gf2(&[v("110"), v("011"), v("101")]), 2);
        assert_eq!(rank_gf2(&[v("100"), v("010"), v("001")]), 3);
    }

    #[test]
    fn test_leading_bit_across_words() {
        let mut x = Gf2Vector::zeros(130);
        assert_eq!(x.leading_bit(), None);
        x.set(3, true);
        x.set(129, true);
        assert_eq!(x.leading_bit(), Some(129));
        assert_eq!(x.count_ones(), 2);
        assert_eq!(x.ones().collect::<Vec<_>>(), vec![3, 129]);
    }

    #[test]
    fn test_xor_zero_extends() {
        let mut a = v("1");
        a.xor_assign(&v("011"));
        assert_eq!(a.to_string(), "111");
    }

    #[test]
    fn test_basis_spans() {
        let basis = Gf2Basis::from_vectors(&[v("1100"), v("0110")]);
        assert!(basis.spans(&v("1010")));
        assert!(basis.spans(&v("0000")));
        assert!(!basis.spans(&v("0001")));
    }

    fn arb_vectors() -> impl Strategy<Value = Vec<Gf2Vector>> {
        prop::collection::vec(prop::collection::vec(any::<bool>(), 12), 0..10)
            .prop_map(|rows| rows.iter().map(|r| Gf2Vector::from_bits(r)).collect())
    }

    proptest! {
        #[test]
        fn prop_rank_is_order_invariant(vectors in arb_vectors()) {
            let mut reversed = vectors.clone();
            reversed.reverse();
            prop_assert_eq!(rank_gf2(&vectors), rank_gf2(&reversed));
        }

        #[test]
        fn prop_adding_a_vector_raises_rank_by_at_most_one(
            vectors in arb_vectors(),
            extra in prop::collection::vec(any::<bool>(), 12),
        ) {
            let before = rank_gf2(&vectors);
            let mut extended = vectors.clone();
            extended.push(Gf2Vector::from_bits(&extra));
            let after = rank_gf2(&extended);
            prop_assert!(after == before || after == before + 1);
        }

        #[test]
        fn prop_rank_bounded_by_dimension(vectors in arb_vectors()) {
            let rank = rank_gf2(&vectors);
            prop_assert!(rank <= 12);
            prop_assert!(rank <= vectors.len());
        }
    }
}
