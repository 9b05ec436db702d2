use crate::simhash::feature::Feature;
use crate::simhash::hashers::HashAlgorithm;
use std::borrow::Borrow;

/// Number of bits in a fingerprint, and dimensions in a [`Vector`].
pub const FINGERPRINT_BITS: usize = 64;

/// Signed accumulator with one dimension per fingerprint bit.
pub type Vector = [i64; FINGERPRINT_BITS];

/// Generates a 64 dimension vector from a set of features.
///
/// The vector starts at zero. For every feature the i-th dimension is
/// incremented by the feature weight when the i-th bit of its sum is set,
/// and decremented by the weight otherwise. The result does not depend on
/// the order of the features.
pub fn vectorize<I>(features: I) -> Vector
where
    I: IntoIterator,
    I::Item: Borrow<Feature>,
{
    let mut v = [0i64; FINGERPRINT_BITS];
    for feature in features {
        let feature = feature.borrow();
        let sum = feature.sum();
        let weight = feature.weight();
        for (i, count) in v.iter_mut().enumerate() {
            if (sum >> i) & 1 == 1 {
                *count = count.wrapping_add(weight);
            } else {
                *count = count.wrapping_sub(weight);
            }
        }
    }
    v
}

/// Generates a 64 dimension vector from raw byte features of equal weight,
/// hashing each with FNV-1.
///
/// Equivalent to `vectorize` over `Feature::new` of every item, without
/// materializing the features.
pub fn vectorize_bytes<I>(features: I) -> Vector
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    vectorize_bytes_with(HashAlgorithm::Fnv1, features)
}

pub fn vectorize_bytes_with<I>(algorithm: HashAlgorithm, features: I) -> Vector
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut v = [0i64; FINGERPRINT_BITS];
    for feature in features {
        let mut hash = algorithm.hash_bytes(feature.as_ref());
        for count in v.iter_mut() {
            if hash & 1 == 1 {
                *count += 1;
            } else {
                *count -= 1;
            }
            hash >>= 1;
        }
    }
    v
}
