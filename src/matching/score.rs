//! Vector score and comparison utilities
//!
//! Hashing matches the project's historical comparison tooling: SHA-1 over
//! the comma-joined vector values, so two runs against the same image can be
//! compared by digest alone.

use std::fmt::Write as _;

use sha1::Digest;
use sha1::Sha1;

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 for degenerate (zero-norm) inputs rather than NaN.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "vector length mismatch");

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (dot / denom) as f32
}

/// L1 norm (sum of absolute values).
#[must_use]
pub fn l1_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(x.abs())).sum()
}

/// L2 (Euclidean) norm.
#[must_use]
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt()
}

/// Hex SHA-1 digest of the comma-joined vector values.
#[must_use]
pub fn hash_vector(v: &[f32]) -> String {
    let mut joined = String::with_capacity(v.len() * 12);
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            joined.push(',');
        }
        let _ = write!(joined, "{x}");
    }

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.3f32, -0.5, 0.8, 0.1];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero_not_nan() {
        let a = vec![0.0f32; 8];
        let b = vec![1.0f32; 8];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn l1_norm_matches_hand_computed_value() {
        let v = vec![1.5f32, -2.5, 3.0];
        assert!((l1_norm(&v) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn l2_norm_matches_hand_computed_value() {
        let v = vec![3.0f32, 4.0];
        assert!((l2_norm(&v) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn hash_is_deterministic_and_content_sensitive() {
        let a = vec![0.125f32, -1.0, 42.0];
        let b = a.clone();
        assert_eq!(hash_vector(&a), hash_vector(&b));

        let mut c = a;
        c[2] = 42.000_004;
        assert_ne!(hash_vector(&c), hash_vector(&b));
    }

    #[test]
    fn anchor_similarity_separates_same_from_different_individuals() {
        // Synthetic stand-ins: photos of the same individual produce nearby
        // vectors, different individuals point elsewhere.
        let anchor = vec![1.0f32, 0.2, 0.1, 0.0];
        let same_individual = vec![0.9f32, 0.25, 0.08, 0.02];
        let different_a = vec![-0.3f32, 0.9, -0.1, 0.4];
        let different_b = vec![0.0f32, -0.2, 1.0, 0.3];

        let same = cosine_similarity(&anchor, &same_individual);
        let diff_a = cosine_similarity(&anchor, &different_a);
        let diff_b = cosine_similarity(&anchor, &different_b);

        assert!(same > 0.99, "same-individual pair scored {same}");
        assert!(same > diff_a && same > diff_b);
        assert!(diff_a < 0.5 && diff_b < 0.5);
    }

    #[test]
    fn hash_is_40_hex_chars() {
        let h = hash_vector(&[1.0f32, 2.0]);
        assert_eq!(h.len(), 40);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
