//! Configuration of the [`SimHash`](crate::simhash::SimHash) pipeline.
//!
//! The configuration is plain data: it can be built in code, or deserialized
//! from JSON or any other serde format. Two pipelines built from equal
//! configurations produce identical fingerprints for identical documents.

use crate::error::{Result, SimHashError};
use crate::simhash::HashAlgorithm;
use crate::text::NormalizationForm;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// How a document is split into words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tokenizer {
    /// Lower-cased ASCII word runs, keeping URL-like suffixes attached.
    #[default]
    Word,
    /// Unicode normalized, lower-cased runs of letters, hyphens, underscores and apostrophes.
    UnicodeWord {
        #[serde(default)]
        form: NormalizationForm,
    },
    /// Whitespace and ASCII punctuation separated tokens, case preserved.
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimHashConfig {
    pub tokenizer: Tokenizer,
    /// Hash function applied to every feature.
    pub hash: HashAlgorithm,
    /// Number of consecutive words per feature. 1 uses single words.
    pub shingle_width: usize,
}

impl Default for SimHashConfig {
    fn default() -> Self {
        SimHashConfig {
            tokenizer: Tokenizer::Word,
            hash: HashAlgorithm::Fnv1,
            shingle_width: 1,
        }
    }
}

impl SimHashConfig {
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_shingle_width(mut self, shingle_width: usize) -> Self {
        self.shingle_width = shingle_width;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.non_zero_shingle_width().map(|_| ())
    }

    pub(crate) fn non_zero_shingle_width(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.shingle_width).ok_or_else(|| {
            SimHashError::InvalidConfig(format!(
                "shingle_width must be >= 1 (got {})",
                self.shingle_width
            ))
        })
    }
}
