//! Canonical serialization for deterministic fingerprints.
//!
//! Graph fingerprints, configuration hashes and sweep report hashes all go
//! through this module so the same input always yields the same hex string.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap in hashed data: use BTreeMap/BTreeSet

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    // Hashed types are derive(Serialize) structs without non-string map keys.
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize + ?Sized>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize + ?Sized>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Graph;

    #[test]
    fn test_determinism() {
        let g = Graph::from_pairs(4, &[(0, 1), (2, 3)]).unwrap();

        let h1 = canonical_hash(&g);
        let h2 = canonical_hash(&g.clone());
        assert_eq!(h1, h2);
        assert_eq!(canonical_hash_hex(&g).len(), 16);
    }

    #[test]
    fn test_edge_insertion_order_irrelevant() {
        let a = Graph::from_pairs(3, &[(0, 1), (1, 2)]).unwrap();
        let b = Graph::from_pairs(3, &[(2, 1), (1, 0)]).unwrap();
        assert_eq!(canonical_hash_hex(&a), canonical_hash_hex(&b));
    }
}
