use crate::simhash::hashers::HashAlgorithm;

/// A single hashed, weighted signal extracted from a document, usually one word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Feature {
    sum: u64,
    weight: i64,
}

impl Feature {
    /// Constructs a feature of weight 1 from the FNV-1 hash of `bytes`.
    /// ```
    /// use simprint::simhash::Feature;
    ///
    /// let feature = Feature::new("a");
    /// assert_eq!(feature.sum(), 0xaf63bd4c8601b7be);
    /// assert_eq!(feature.weight(), 1);
    /// ```
    pub fn new<B: AsRef<[u8]>>(bytes: B) -> Self {
        Feature::with_weight(bytes, 1)
    }

    pub fn with_weight<B: AsRef<[u8]>>(bytes: B, weight: i64) -> Self {
        Feature::with_hasher(bytes, weight, HashAlgorithm::Fnv1)
    }

    pub fn with_hasher<B: AsRef<[u8]>>(bytes: B, weight: i64, algorithm: HashAlgorithm) -> Self {
        Feature {
            sum: algorithm.hash_bytes(bytes.as_ref()),
            weight,
        }
    }

    /// Wraps a hash computed elsewhere.
    pub fn from_sum(sum: u64, weight: i64) -> Self {
        Feature { sum, weight }
    }

    #[inline]
    pub fn sum(&self) -> u64 {
        self.sum
    }

    #[inline]
    pub fn weight(&self) -> i64 {
        self.weight
    }
}
