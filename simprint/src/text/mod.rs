mod feature_set;
mod shingles;
mod tokenizers;

pub use self::feature_set::{FeatureSet, NormalizationForm, UnicodeWordFeatureSet, WordFeatureSet};
pub use self::shingles::{shingle, Shingles};
pub use self::tokenizers::whitespace_split;
