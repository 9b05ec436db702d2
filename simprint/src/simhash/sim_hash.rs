use crate::config::{SimHashConfig, Tokenizer};
use crate::error::Result;
use crate::simhash::feature::Feature;
use crate::simhash::vector::{vectorize, vectorize_bytes_with};
use crate::simhash::{fingerprint, HashAlgorithm};
use crate::text::{whitespace_split, Shingles, UnicodeWordFeatureSet, WordFeatureSet};
use rayon::prelude::*;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// Document fingerprinting pipeline: tokenizer, optional word shingling,
/// feature hashing and SimHash, as described by a [`SimHashConfig`].
///
/// ```
/// use simprint::config::SimHashConfig;
/// use simprint::simhash::{compare, SimHash};
///
/// let sim_hash = SimHash::new(SimHashConfig::default()).unwrap();
/// let a = sim_hash.fingerprint(b"The quick brown fox jumps over the lazy dog");
/// let b = sim_hash.fingerprint(b"The quick brown fox jumped over the lazy dog");
/// assert_eq!(compare(a, b), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SimHash {
    config: SimHashConfig,
    shingle_width: NonZeroUsize,
}

impl SimHash {
    pub fn new(config: SimHashConfig) -> Result<Self> {
        let shingle_width = config.non_zero_shingle_width()?;
        debug!(
            tokenizer = ?config.tokenizer,
            hash = %config.hash,
            shingle_width = config.shingle_width,
            "configured simhash pipeline"
        );
        Ok(SimHash {
            config,
            shingle_width,
        })
    }

    pub fn config(&self) -> &SimHashConfig {
        &self.config
    }

    /// Returns the 64-bit fingerprint of a document.
    pub fn fingerprint(&self, document: &[u8]) -> u64 {
        let features = self.features(document);
        trace!(bytes = document.len(), features = features.len(), "fingerprinting document");
        fingerprint(&vectorize(&features))
    }

    /// Returns the fingerprint of a document that is already split into tokens.
    /// Tokens are shingled according to the configuration, but not normalized.
    pub fn fingerprint_tokens<T>(&self, tokens: &[T]) -> u64
    where
        T: AsRef<[u8]>,
    {
        let hash = self.config.hash;
        let v = if self.shingle_width.get() > 1 {
            vectorize_bytes_with(hash, Shingles::with_width(self.shingle_width, tokens))
        } else {
            vectorize_bytes_with(hash, tokens)
        };
        fingerprint(&v)
    }

    /// Extracts the features a document is fingerprinted from.
    pub fn features(&self, document: &[u8]) -> Vec<Feature> {
        let hash = self.config.hash;
        match self.config.tokenizer {
            Tokenizer::Word => {
                let feature_set = WordFeatureSet::with_hasher(document, hash);
                self.hash_words(feature_set.words())
            }
            Tokenizer::UnicodeWord { form } => {
                let feature_set = UnicodeWordFeatureSet::with_hasher(document, form, hash);
                self.hash_words(feature_set.words())
            }
            Tokenizer::Whitespace => {
                let text = String::from_utf8_lossy(document);
                self.hash_words(whitespace_split(&text))
            }
        }
    }

    fn hash_words<'a, I>(&self, words: I) -> Vec<Feature>
    where
        I: Iterator<Item = &'a str>,
    {
        let hash = self.config.hash;
        if self.shingle_width.get() > 1 {
            let words: Vec<&str> = words.collect();
            Shingles::with_width(self.shingle_width, &words)
                .map(|shingle| Feature::with_hasher(shingle, 1, hash))
                .collect()
        } else {
            words.map(|word| Feature::with_hasher(word, 1, hash)).collect()
        }
    }

    /// Fingerprints many documents in parallel.
    pub fn par_bulk_fingerprint<D>(&self, documents: &[D]) -> Vec<u64>
    where
        D: AsRef<[u8]> + Sync,
    {
        debug!(documents = documents.len(), "bulk fingerprinting documents");
        documents
            .par_iter()
            .map(|document| self.fingerprint(document.as_ref()))
            .collect()
    }

    /// Fingerprints many tokenized documents in parallel.
    pub fn par_bulk_fingerprint_tokens<U>(&self, batch: &[Vec<U>]) -> Vec<u64>
    where
        U: AsRef<[u8]> + Sync,
    {
        debug!(documents = batch.len(), "bulk fingerprinting token lists");
        batch
            .par_iter()
            .map(|tokens| self.fingerprint_tokens(tokens))
            .collect()
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.config.hash
    }
}

#[cfg(test)]
mod tests {
    use super::SimHash;
    use crate::config::{SimHashConfig, Tokenizer};
    use crate::error::SimHashError;
    use crate::simhash::{compare, simhash, simhash_bytes, HashAlgorithm};
    use crate::text::{shingle, NormalizationForm, UnicodeWordFeatureSet, WordFeatureSet};
    use rand::distributions::{Alphanumeric, Distribution};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    static DOC: &'static str = "At the time of writing this article, the named tensor functionality is in experimental mode";

    #[test]
    pub fn test_invalid_config_is_rejected() {
        let result = SimHash::new(SimHashConfig::default().with_shingle_width(0));
        assert!(matches!(result, Err(SimHashError::InvalidConfig(_))));
        let sim_hash = SimHash::new(SimHashConfig::default().with_shingle_width(3)).unwrap();
        assert_eq!(sim_hash.config().shingle_width, 3);
    }

    #[test]
    pub fn test_default_pipeline_matches_word_feature_set() {
        let sim_hash = SimHash::new(SimHashConfig::default()).unwrap();
        assert_eq!(sim_hash.fingerprint(DOC.as_bytes()), simhash(&WordFeatureSet::new(DOC)));
    }

    #[test]
    pub fn test_unicode_pipeline_matches_unicode_feature_set() {
        let config = SimHashConfig::default()
            .with_tokenizer(Tokenizer::UnicodeWord { form: NormalizationForm::Nfkc });
        let sim_hash = SimHash::new(config).unwrap();
        let doc = "Ｃafé-au-lait is served at the ﬁrst table";
        assert_eq!(
            sim_hash.fingerprint(doc.as_bytes()),
            simhash(&UnicodeWordFeatureSet::new(doc, NormalizationForm::Nfkc))
        );
    }

    #[test]
    pub fn test_shingled_pipeline_hashes_word_ngrams() {
        let config = SimHashConfig::default()
            .with_tokenizer(Tokenizer::Whitespace)
            .with_shingle_width(2);
        let sim_hash = SimHash::new(config).unwrap();
        let expected = simhash_bytes(shingle(2, &["this", "is", "a", "test"]).unwrap());
        assert_eq!(expected, 0xa9ad19dedc252b7a);
        assert_eq!(sim_hash.fingerprint(b"this is a test"), expected);
        assert_eq!(sim_hash.fingerprint_tokens(&["this", "is", "a", "test"]), expected);
        assert_eq!(sim_hash.features(b"this is a test").len(), 3);
    }

    #[test]
    pub fn test_hash_algorithm_changes_fingerprint() {
        let fnv = SimHash::new(SimHashConfig::default()).unwrap();
        let sip = SimHash::new(SimHashConfig::default().with_hash(HashAlgorithm::Sip)).unwrap();
        assert_eq!(sip.hash(), HashAlgorithm::Sip);
        assert_ne!(fnv.fingerprint(DOC.as_bytes()), sip.fingerprint(DOC.as_bytes()));
        assert_eq!(sip.fingerprint(DOC.as_bytes()), sip.fingerprint(DOC.as_bytes()));
    }

    #[test]
    pub fn test_bulk_fingerprint_matches_serial() {
        let sim_hash = SimHash::new(SimHashConfig::default()).unwrap();
        let docs = vec![DOC, "local sensitive hashing is awesome", ""];
        let expected: Vec<u64> = docs.iter().map(|d| sim_hash.fingerprint(d.as_bytes())).collect();
        assert_eq!(sim_hash.par_bulk_fingerprint(&docs), expected);

        let batch: Vec<Vec<&str>> = docs.iter().map(|d| d.split(' ').collect()).collect();
        let expected: Vec<u64> = batch.iter().map(|t| simhash_bytes(t)).collect();
        assert_eq!(sim_hash.par_bulk_fingerprint_tokens(&batch), expected);
    }

    #[test]
    pub fn test_near_duplicates_have_small_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let vocabulary: Vec<String> = (0..5000)
            .map(|_| Alphanumeric.sample_iter(&mut rng).take(8).map(char::from).collect())
            .collect();
        let sim_hash = SimHash::new(SimHashConfig::default()).unwrap();

        let mut total_near = 0;
        let mut total_random = 0;
        let trials = 200;
        for _ in 0..trials {
            let doc: Vec<&str> = (0..20)
                .map(|_| vocabulary.choose(&mut rng).unwrap().as_str())
                .collect();
            let mut edited = doc.clone();
            if rng.gen_bool(0.5) {
                edited.remove(rng.gen_range(0..edited.len()));
            } else {
                edited.insert(rng.gen_range(0..=edited.len()), "the");
            }
            let other: Vec<&str> = (0..20)
                .map(|_| vocabulary.choose(&mut rng).unwrap().as_str())
                .collect();

            let fp = sim_hash.fingerprint_tokens(&doc);
            total_near += compare(fp, sim_hash.fingerprint_tokens(&edited));
            total_random += compare(fp, sim_hash.fingerprint_tokens(&other));
        }
        let avg_near = total_near as f64 / trials as f64;
        let avg_random = total_random as f64 / trials as f64;
        assert!(avg_near < 16.0, "average near-duplicate distance {}", avg_near);
        assert!(avg_random > 24.0, "average random distance {}", avg_random);
        assert!(avg_near < avg_random / 2.0);
    }
}
