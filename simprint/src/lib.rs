/*!
This library implements Charikar's [SimHash](https://en.wikipedia.org/wiki/SimHash)
for fingerprinting text documents.

A document is split into features, each feature is hashed to 64 bits, and the
hashes vote bit by bit into a 64-dimension accumulator. The signs of the
accumulator form the fingerprint. Similar documents get fingerprints with a
small Hamming distance, which makes simprint suitable for near-duplicate
detection without comparing documents directly.


## Example

 ```
 use simprint::simhash::{compare, simhash, simhash_bytes};
 use simprint::text::{shingle, WordFeatureSet};

 let a = simhash(&WordFeatureSet::new("The quick brown fox jumps over the lazy dog"));
 let b = simhash(&WordFeatureSet::new("The quick brown fox jumped over the lazy dog"));
 let c = simhash(&WordFeatureSet::new("Completely unrelated text about distributed databases"));
 assert!(compare(a, b) < compare(a, c));

 let tokens = ["this", "is", "a", "test"];
 let shingled = simhash_bytes(shingle(2, &tokens).unwrap());
 assert_ne!(shingled, simhash_bytes(tokens));
 ```

## References
[[1] Similarity Estimation Techniques from Rounding Algorithms](https://www.cs.princeton.edu/courses/archive/spr04/cos598B/bib/CharikarEstim.pdf)

[[2] Detecting Near-Duplicates for Web Crawling](https://static.googleusercontent.com/media/research.google.com/en//pubs/archive/33026.pdf)

 */

pub mod config;
pub mod error;
pub mod simhash;
pub mod text;

pub use self::error::{Result, SimHashError};
