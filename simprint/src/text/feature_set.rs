use crate::simhash::{Feature, HashAlgorithm};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Alphanumeric/apostrophe runs, optionally followed by a `://` URL suffix.
static WORD_BOUNDARIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9A-Za-z_']+(?:://[0-9A-Za-z_./]+)?").expect("word pattern is valid")
});

/// Runs of Unicode letters, hyphens, underscores and apostrophes.
static UNICODE_BOUNDARIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\pL\-_']+").expect("unicode word pattern is valid"));

/// A set of features extracted from one document.
///
/// `get_features` must be deterministic: calling it repeatedly returns the same
/// features in the same order.
pub trait FeatureSet {
    fn get_features(&self) -> Vec<Feature>;
}

impl FeatureSet for [Feature] {
    fn get_features(&self) -> Vec<Feature> {
        self.to_vec()
    }
}

impl FeatureSet for Vec<Feature> {
    fn get_features(&self) -> Vec<Feature> {
        self.clone()
    }
}

/// Lower-cases one character at a time with the simple case mapping, so a
/// final sigma stays `σ` and `İ` becomes a plain `i`.
fn lowercase(text: &str) -> String {
    let mut lower = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{130}' => lower.push('i'),
            c => lower.extend(c.to_lowercase()),
        }
    }
    lower
}

fn features_from_matches(text: &str, pattern: &Regex, hash: HashAlgorithm) -> Vec<Feature> {
    pattern
        .find_iter(text)
        .map(|m| Feature::with_hasher(m.as_str(), 1, hash))
        .collect()
}

/// Feature set in which every word is a feature, all of equal weight.
///
/// The document is lower-cased once on construction. Words are ASCII letters,
/// digits, underscores and apostrophes; a following `://path` is kept as part
/// of the word so URLs stay whole. Invalid UTF-8 is replaced before matching.
/// ```
/// use simprint::text::{FeatureSet, WordFeatureSet};
///
/// let feature_set = WordFeatureSet::new("Visit http://example.com/a.b now, it's GREAT");
/// let words: Vec<&str> = feature_set.words().collect();
/// assert_eq!(words, vec!["visit", "http://example.com/a.b", "now", "it's", "great"]);
/// assert_eq!(feature_set.get_features().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct WordFeatureSet {
    text: String,
    hash: HashAlgorithm,
}

impl WordFeatureSet {
    pub fn new<B: AsRef<[u8]>>(document: B) -> Self {
        Self::with_hasher(document, HashAlgorithm::Fnv1)
    }

    pub fn with_hasher<B: AsRef<[u8]>>(document: B, hash: HashAlgorithm) -> Self {
        WordFeatureSet {
            text: lowercase(&String::from_utf8_lossy(document.as_ref())),
            hash,
        }
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        WORD_BOUNDARIES.find_iter(&self.text).map(|m| m.as_str())
    }
}

impl FeatureSet for WordFeatureSet {
    fn get_features(&self) -> Vec<Feature> {
        features_from_matches(&self.text, &WORD_BOUNDARIES, self.hash)
    }
}

/// Unicode normalization form applied before splitting words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NormalizationForm {
    #[default]
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl NormalizationForm {
    pub fn normalize(&self, text: &str) -> String {
        match self {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// Feature set in which every Unicode word is a feature, all of equal weight.
///
/// The document is normalized with the given form and lower-cased once on
/// construction. Words are runs of letters, hyphens, underscores and apostrophes.
#[derive(Debug, Clone)]
pub struct UnicodeWordFeatureSet {
    text: String,
    form: NormalizationForm,
    hash: HashAlgorithm,
}

impl UnicodeWordFeatureSet {
    pub fn new<B: AsRef<[u8]>>(document: B, form: NormalizationForm) -> Self {
        Self::with_hasher(document, form, HashAlgorithm::Fnv1)
    }

    pub fn with_hasher<B: AsRef<[u8]>>(document: B, form: NormalizationForm, hash: HashAlgorithm) -> Self {
        let decoded = String::from_utf8_lossy(document.as_ref());
        UnicodeWordFeatureSet {
            text: lowercase(&form.normalize(&decoded)),
            form,
            hash,
        }
    }

    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        UNICODE_BOUNDARIES.find_iter(&self.text).map(|m| m.as_str())
    }
}

impl FeatureSet for UnicodeWordFeatureSet {
    fn get_features(&self) -> Vec<Feature> {
        features_from_matches(&self.text, &UNICODE_BOUNDARIES, self.hash)
    }
}
