mod feature;
mod hashers;
mod sim_hash;
mod vector;

pub use self::feature::Feature;
pub use self::hashers::{Fnv1BuildHasher, Fnv1Hasher64, HashAlgorithm, Sha1Hasher};
pub use self::sim_hash::SimHash;
pub use self::vector::{vectorize, vectorize_bytes, vectorize_bytes_with, Vector, FINGERPRINT_BITS};

use crate::text::FeatureSet;

/// Returns the 64-bit simhash of a feature set.
pub fn simhash<F: FeatureSet + ?Sized>(feature_set: &F) -> u64 {
    fingerprint(&vectorize(feature_set.get_features()))
}

/// Returns the 64-bit simhash of raw byte features, each with weight 1.
/// ```
/// use simprint::simhash::simhash_bytes;
///
/// assert_eq!(simhash_bytes(["this", "is", "a", "test"]), 0x8c3b7f7e9fcbbffd);
/// ```
pub fn simhash_bytes<I>(features: I) -> u64
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    fingerprint(&vectorize_bytes(features))
}

/// Collapses a vector into a fingerprint.
///
/// Bit i of the fingerprint is 1 if `v[i] >= 0` and 0 otherwise. A zero
/// dimension sets its bit, so the zero vector maps to `u64::MAX`; existing
/// fingerprints depend on this tie-break.
pub fn fingerprint(v: &Vector) -> u64 {
    let mut f = 0u64;
    for (i, count) in v.iter().enumerate() {
        if *count >= 0 {
            f |= 1u64 << i;
        }
    }
    f
}

/// Hamming distance between two fingerprints, in `0..=64`.
#[inline]
pub fn compare(a: u64, b: u64) -> usize {
    (a ^ b).count_ones() as usize
}

#[inline]
pub fn hamming_distance(a: u64, b: u64) -> usize {
    compare(a, b)
}

/// Fraction of equal bits, 1.0 for identical fingerprints and 0.0 for complements.
pub fn similarity(a: u64, b: u64) -> f64 {
    1.0 - compare(a, b) as f64 / FINGERPRINT_BITS as f64
}

/// Bitwise majority vote over a set of fingerprints. A bit is set in the
/// centroid when it is set in more than half of the fingerprints.
pub fn create_centroid<I>(fingerprints: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut counts = [0usize; FINGERPRINT_BITS];
    let mut len = 0;
    for fingerprint in fingerprints {
        for (i, count) in counts.iter_mut().enumerate() {
            if (fingerprint >> i) & 1 == 1 {
                *count += 1;
            }
        }
        len += 1;
    }
    let mut centroid = 0u64;
    for (i, count) in counts.iter().enumerate() {
        if *count > len / 2 {
            centroid |= 1u64 << i;
        }
    }
    centroid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::WordFeatureSet;
    use proptest::prelude::*;

    static S1: &'static str = "Returns the number of bits necessary to represent an integer in binary, excluding the sign and leading zero";
    static S2: &'static str = "Returns the number of bits necessary to represent an integer in binary, excluding the sign and leading zero bit";

    #[test]
    pub fn test_zero_vector_sets_every_bit() {
        assert_eq!(fingerprint(&[0i64; FINGERPRINT_BITS]), u64::MAX);
        assert_eq!(fingerprint(&vectorize(Vec::<Feature>::new())), 0xFFFFFFFFFFFFFFFF);
    }

    #[test]
    pub fn test_fingerprint_thresholds_each_dimension() {
        let mut v = [-1i64; FINGERPRINT_BITS];
        v[0] = 0;
        v[3] = 7;
        v[63] = 1;
        assert_eq!(fingerprint(&v), (1u64 << 63) | (1 << 3) | 1);
    }

    #[test]
    pub fn test_unit_feature_agrees_with_bytes_path() {
        for word in ["", "a", "simhash", "near-duplicate detection"] {
            assert_eq!(
                fingerprint(&vectorize([Feature::new(word)])),
                fingerprint(&vectorize_bytes([word]))
            );
        }
        // a single feature's fingerprint is its own hash
        assert_eq!(simhash_bytes(["a"]), 0xaf63bd4c8601b7be);
    }

    #[test]
    pub fn test_compare() {
        assert_eq!(compare(0, 0), 0);
        assert_eq!(compare(0b1011, 0b0001), 2);
        assert_eq!(compare(0x5555555555555555, 0xAAAAAAAAAAAAAAAA), 64);
        assert_eq!(hamming_distance(u64::MAX, 0), 64);
        assert_eq!(similarity(42, 42), 1.0);
        assert_eq!(similarity(0, u64::MAX), 0.0);
    }

    #[test]
    pub fn test_word_feature_set_fingerprints() {
        let a = simhash(&WordFeatureSet::new("The quick brown fox jumps over the lazy dog"));
        let b = simhash(&WordFeatureSet::new("The quick brown fox jumped over the lazy dog"));
        let c = simhash(&WordFeatureSet::new("Completely unrelated text about distributed databases"));
        assert_eq!(a, 0xd8dcc6186b793c3e);
        assert_eq!(b, 0xd84cc618eb793c7e);
        assert_eq!(compare(a, b), 4);
        assert!(compare(a, c) > 16);
    }

    #[test]
    pub fn test_sim_hash_basics() {
        let s1 = simhash(&WordFeatureSet::new(S1));
        let s2 = simhash(&WordFeatureSet::new(S2));
        assert!(compare(s1, s2) < 16, "distance {}", compare(s1, s2));
    }

    #[test]
    pub fn test_create_centroid() {
        assert_eq!(create_centroid(vec![0b0111, 0b0011, 0b0001]), 0b0011);
        assert_eq!(create_centroid(vec![0b01, 0b10]), 0);
        assert_eq!(create_centroid(Vec::<u64>::new()), 0);
        assert_eq!(create_centroid(vec![u64::MAX]), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_compare_is_a_metric_on_bits(a in any::<u64>(), b in any::<u64>()) {
            prop_assert_eq!(compare(a, a), 0);
            prop_assert_eq!(compare(a, b), compare(b, a));
            prop_assert!(compare(a, b) <= 64);
            prop_assert_eq!(compare(a, !a), 64);
            prop_assert_eq!(compare(a, b) == 0, a == b);
        }

        #[test]
        fn prop_compare_matches_kernighan(a in any::<u64>(), b in any::<u64>()) {
            let mut v = a ^ b;
            let mut c = 0;
            while v != 0 {
                v &= v - 1;
                c += 1;
            }
            prop_assert_eq!(compare(a, b), c);
        }

        #[test]
        fn prop_single_feature_fingerprint_is_its_sum(sum in any::<u64>(), weight in 1i64..100) {
            prop_assert_eq!(fingerprint(&vectorize([Feature::from_sum(sum, weight)])), sum);
        }
    }
}
