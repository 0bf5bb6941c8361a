//! Secrecy oracle for relayed keys.
//!
//! The derived key of a pair is the GF(2) sum of the local keys on its path.
//! A wiretap adversary knows the local keys of its edges, and therefore every
//! GF(2) combination of them. The derived key leaks exactly when the path
//! vector lies in the span of the wiretap vectors; otherwise it is uniform and
//! independent of everything the adversary saw.

use serde::Serialize;

use crate::gf2::{Gf2Basis, Gf2Vector};

/// Outcome of one secrecy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecrecyVerdict {
    /// Rank of the adversary's wiretap vectors.
    pub rank_without_path: usize,
    /// Rank after adding the path vector.
    pub rank_with_path: usize,
    /// `rank_with_path == rank_without_path + 1`.
    pub holds: bool,
}

impl SecrecyVerdict {
    /// Whether the adversary can reconstruct the key.
    pub fn is_breach(&self) -> bool {
        !self.holds
    }
}

/// Compare the rank of the wiretap vectors with and without the path vector.
pub fn verify_secrecy(adversary_vectors: &[Gf2Vector], path_vector: &Gf2Vector) -> SecrecyVerdict {
    let mut basis = Gf2Basis::from_vectors(adversary_vectors);
    let rank_without_path = basis.rank();
    basis.insert(path_vector.clone());
    let rank_with_path = basis.rank();

    SecrecyVerdict {
        rank_without_path,
        rank_with_path,
        holds: rank_with_path == rank_without_path + 1,
    }
}

/// Whether the path vector is independent of the adversary's span.
pub fn secrecy_holds(adversary_vectors: &[Gf2Vector], path_vector: &Gf2Vector) -> bool {
    verify_secrecy(adversary_vectors, path_vector).holds
}
