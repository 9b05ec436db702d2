use clap::ValueEnum;
use rand::distributions::Uniform;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

pub struct GeneratedCluster {
    pub id: usize,
    pub points: Vec<(u32, Vec<String>)>,

    // The document from which the other documents were generated
    pub centroid: Vec<String>,
}

/// EditMode selects the edit applied to a cluster's base document to produce
/// every near-duplicate.
///
/// Substitute replaces a word with a random vocabulary word, Insert adds a
/// random word at a random position, Delete removes a random word. Mixed picks
/// one of the three for every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EditMode {
    Substitute,
    Insert,
    Delete,
    Mixed,
}

/// Spells a vocabulary index with lowercase letters, so generated words are
/// whole words for every tokenizer.
fn spell(mut index: usize) -> String {
    let mut word = String::new();
    loop {
        word.push((b'a' + (index % 26) as u8) as char);
        index /= 26;
        if index == 0 {
            break;
        }
    }
    word
}

pub struct ClusterGenerator {
    pub cluster_size: usize,
    pub num_words: usize,
    pub num_clusters: usize,
    pub vocabulary_size: usize,
    pub num_changes: usize,
    pub mode: EditMode,
    pub seed: u64,
}

impl ClusterGenerator {

    pub fn new(cluster_size: usize, num_words: usize, num_clusters: usize,
               vocabulary_size: usize, num_changes: usize,
               mode: EditMode, seed: u64) -> Self {

        ClusterGenerator {
            cluster_size,
            num_words,
            num_clusters,
            vocabulary_size,
            num_changes,
            mode,
            seed,
        }
    }

    /// Generates the clusters in parallel. Every cluster has its own rng
    /// derived from the seed, so the output does not depend on scheduling.
    pub fn generate(&self) -> Vec<GeneratedCluster> {
        debug!(clusters = self.num_clusters, cluster_size = self.cluster_size, "generating clusters");
        (0..self.num_clusters)
            .into_par_iter()
            .map(|i| self.generate_cluster(i))
            .collect()
    }

    fn word(&self, rng: &mut StdRng) -> String {
        spell(rng.gen_range(0..self.vocabulary_size.max(1)))
    }

    pub fn generate_cluster(&self, cluster_id: usize) -> GeneratedCluster {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(cluster_id as u64));
        let sample: Vec<String> = (0..self.num_words).map(|_| self.word(&mut rng)).collect();
        let modes = Uniform::new(0, 3);

        let mut points = Vec::with_capacity(self.cluster_size);
        for j in 0..self.cluster_size {
            let mut point_items = sample.clone();
            for _ in 0..self.num_changes {
                let mode = match self.mode {
                    EditMode::Mixed => match modes.sample(&mut rng) {
                        0 => EditMode::Substitute,
                        1 => EditMode::Insert,
                        _ => EditMode::Delete,
                    },
                    mode => mode,
                };
                self.apply_edit(&mut point_items, mode, &mut rng);
            }
            let point_id = (cluster_id * self.cluster_size + j) as u32;
            points.push((point_id, point_items));
        }

        GeneratedCluster {
            id: cluster_id,
            points,
            centroid: sample,
        }
    }

    fn apply_edit(&self, items: &mut Vec<String>, mode: EditMode, rng: &mut StdRng) {
        match mode {
            EditMode::Insert => {
                let index = rng.gen_range(0..=items.len());
                let word = self.word(rng);
                items.insert(index, word);
            }
            EditMode::Delete if !items.is_empty() => {
                let index = rng.gen_range(0..items.len());
                items.remove(index);
            }
            EditMode::Substitute if !items.is_empty() => {
                let index = rng.gen_range(0..items.len());
                items[index] = self.word(rng);
            }
            _ => (),
        }
    }
}
