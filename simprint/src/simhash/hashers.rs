use crate::error::SimHashError;
use fnv::FnvHasher;
use seahash::SeaHasher;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use siphasher::sip::SipHasher;
use std::fmt;
use std::hash::{BuildHasherDefault, Hasher};
use std::str::FromStr;

const FNV1_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV1_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1 hasher: multiply by the prime, then xor in the byte.
///
/// The `fnv` crate implements the FNV-1a variant (xor first), which produces
/// different sums. Fingerprints are compatible with other SimHash
/// implementations only when features are hashed with FNV-1.
#[derive(Clone, Copy, Debug)]
pub struct Fnv1Hasher64(u64);

impl Default for Fnv1Hasher64 {
    #[inline]
    fn default() -> Self {
        Fnv1Hasher64(FNV1_OFFSET_BASIS)
    }
}

impl Hasher for Fnv1Hasher64 {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = self.0.wrapping_mul(FNV1_PRIME);
            self.0 ^= *byte as u64;
        }
    }
}

pub type Fnv1BuildHasher = BuildHasherDefault<Fnv1Hasher64>;

/// Hashes the buffered bytes with SHA-1 and keeps the first 8 bytes of the digest.
pub struct Sha1Hasher {
    bytes: Vec<u8>,
}

impl Sha1Hasher {
    pub fn new() -> Self {
        Sha1Hasher { bytes: Vec::new() }
    }
}

impl Default for Sha1Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Sha1Hasher {
    fn finish(&self) -> u64 {
        let digest = Sha1::digest(self.bytes.as_slice());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[0..8]);
        u64::from_be_bytes(head)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

/// The 64-bit hash functions a feature can be hashed with.
///
/// Every variant hashes the raw bytes of a feature, without the length prefix
/// `std::hash::Hash` would add for slices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Fnv1,
    Fnv1a,
    Sip,
    Sea,
    Sha1,
}

impl HashAlgorithm {
    /// Returns a fresh hasher. Hashers carry state between `write` and
    /// `finish`, so each thread must use its own.
    pub fn new_hasher(&self) -> Box<dyn Hasher> {
        match self {
            HashAlgorithm::Fnv1 => Box::new(Fnv1Hasher64::default()),
            HashAlgorithm::Fnv1a => Box::new(FnvHasher::default()),
            HashAlgorithm::Sip => Box::new(SipHasher::new_with_keys(1, 2)),
            HashAlgorithm::Sea => Box::new(SeaHasher::new()),
            HashAlgorithm::Sha1 => Box::new(Sha1Hasher::new()),
        }
    }

    #[inline]
    pub fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        match self {
            HashAlgorithm::Fnv1 => finish_with(Fnv1Hasher64::default(), bytes),
            HashAlgorithm::Fnv1a => finish_with(FnvHasher::default(), bytes),
            HashAlgorithm::Sip => finish_with(SipHasher::new_with_keys(1, 2), bytes),
            HashAlgorithm::Sea => finish_with(SeaHasher::new(), bytes),
            HashAlgorithm::Sha1 => finish_with(Sha1Hasher::new(), bytes),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Fnv1 => "fnv1",
            HashAlgorithm::Fnv1a => "fnv1a",
            HashAlgorithm::Sip => "sip",
            HashAlgorithm::Sea => "sea",
            HashAlgorithm::Sha1 => "sha1",
        }
    }
}

#[inline]
fn finish_with<H: Hasher>(mut hasher: H, bytes: &[u8]) -> u64 {
    hasher.write(bytes);
    hasher.finish()
}

impl FromStr for HashAlgorithm {
    type Err = SimHashError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "fnv1" | "fnv" => Ok(HashAlgorithm::Fnv1),
            "fnv1a" => Ok(HashAlgorithm::Fnv1a),
            "sip" => Ok(HashAlgorithm::Sip),
            "sea" => Ok(HashAlgorithm::Sea),
            "sha1" => Ok(HashAlgorithm::Sha1),
            _ => Err(SimHashError::UnknownHashAlgorithm(input.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_fnv1_reference_values() {
        assert_eq!(HashAlgorithm::Fnv1.hash_bytes(b""), 0xcbf29ce484222325);
        assert_eq!(HashAlgorithm::Fnv1.hash_bytes(b"a"), 0xaf63bd4c8601b7be);
        assert_eq!(HashAlgorithm::Fnv1.hash_bytes(b"foobar"), 0x340d8765a4dda9c2);
    }

    #[test]
    pub fn test_fnv1a_differs_from_fnv1() {
        assert_eq!(HashAlgorithm::Fnv1a.hash_bytes(b"a"), 0xaf63dc4c8601ec8c);
        assert_ne!(
            HashAlgorithm::Fnv1a.hash_bytes(b"foobar"),
            HashAlgorithm::Fnv1.hash_bytes(b"foobar")
        );
    }

    #[test]
    pub fn test_sha1_takes_digest_prefix() {
        // sha1("abc") = a9993e36 4706816a ...
        assert_eq!(HashAlgorithm::Sha1.hash_bytes(b"abc"), 0xa9993e364706816a);
    }

    #[test]
    pub fn test_boxed_hasher_matches_hash_bytes() {
        for algorithm in [
            HashAlgorithm::Fnv1,
            HashAlgorithm::Fnv1a,
            HashAlgorithm::Sip,
            HashAlgorithm::Sea,
            HashAlgorithm::Sha1,
        ] {
            let mut hasher = algorithm.new_hasher();
            hasher.write(b"near duplicate");
            assert_eq!(hasher.finish(), algorithm.hash_bytes(b"near duplicate"), "{}", algorithm);
        }
    }

    #[test]
    pub fn test_parse_algorithm() {
        assert_eq!("FNV1".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Fnv1));
        assert_eq!("sea".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sea));
        assert_eq!(
            "md5".parse::<HashAlgorithm>(),
            Err(SimHashError::UnknownHashAlgorithm("md5".to_string()))
        );
        assert_eq!(HashAlgorithm::Fnv1a.to_string(), "fnv1a");
    }
}
