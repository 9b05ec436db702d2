mod metrics;
mod generate_clusters;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use fnv::FnvHashSet;
use itertools::Itertools;
use rayon::prelude::*;
use simprint::config::SimHashConfig;
use simprint::simhash::{compare, create_centroid, SimHash};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::generate_clusters::*;
use crate::metrics::Metrics;

/// Measures how well SimHash distance separates generated near-duplicate clusters.
#[derive(Parser, Debug)]
#[command(name = "simprint-bench", version, about)]
struct Args {
    /// Number of generated clusters
    #[arg(long, default_value_t = 200)]
    num_clusters: usize,

    /// Documents per cluster
    #[arg(long, default_value_t = 10)]
    cluster_size: usize,

    /// Words in every cluster's base document
    #[arg(long, default_value_t = 50)]
    num_words: usize,

    /// Edits applied to the base document for every cluster member
    #[arg(long, default_value_t = 2)]
    num_changes: usize,

    #[arg(long, value_enum, default_value_t = EditMode::Mixed)]
    mode: EditMode,

    #[arg(long, default_value_t = 10_000)]
    vocabulary_size: usize,

    /// Documents within this Hamming distance are reported as near-duplicates
    #[arg(long, default_value_t = 6)]
    max_distance: usize,

    /// JSON file with a SimHashConfig. Defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 3)]
    seed: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimHashConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            let config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            Ok(config)
        }
        None => Ok(SimHashConfig::default()),
    }
}

fn run_evaluation(generated_clusters: &[GeneratedCluster], sim_hash: &SimHash, max_distance: usize) {
    let mut ids = Vec::new();
    let mut cluster_ids = Vec::new();
    let mut docs = Vec::new();
    for cluster in generated_clusters {
        for (id, words) in cluster.points.iter() {
            ids.push(*id);
            cluster_ids.push(cluster.id);
            docs.push(words.join(" "));
        }
    }

    let now = Instant::now();
    let fingerprints = sim_hash.par_bulk_fingerprint(&docs);
    info!(documents = docs.len(), elapsed_ms = now.elapsed().as_millis() as u64, "fingerprinted documents");

    let now = Instant::now();
    let results: Vec<(FnvHashSet<u32>, FnvHashSet<u32>)> = (0..fingerprints.len())
        .into_par_iter()
        .map(|i| {
            let mut found = FnvHashSet::default();
            let mut reference = FnvHashSet::default();
            for j in 0..fingerprints.len() {
                if i == j {
                    continue;
                }
                if compare(fingerprints[i], fingerprints[j]) <= max_distance {
                    found.insert(ids[j]);
                }
                if cluster_ids[i] == cluster_ids[j] {
                    reference.insert(ids[j]);
                }
            }
            (found, reference)
        })
        .collect();
    debug!(elapsed_ms = now.elapsed().as_millis() as u64, "brute-force search finished");

    let mut metrics = Metrics::new();
    for (found, reference) in results.iter() {
        metrics.update_metrics(found, reference);
    }
    info!(queries = metrics.len(), max_distance, "{:?}", metrics.get_result());

    let mut intra_total = 0;
    let mut intra_pairs = 0;
    let mut centroid_total = 0;
    let mut offset = 0;
    for cluster in generated_clusters {
        let members = &fingerprints[offset..offset + cluster.points.len()];
        offset += cluster.points.len();
        for (a, b) in members.iter().tuple_combinations() {
            intra_total += compare(*a, *b);
            intra_pairs += 1;
        }
        let centroid = create_centroid(members.iter().cloned());
        let base = sim_hash.fingerprint(cluster.centroid.join(" ").as_bytes());
        centroid_total += compare(centroid, base);
    }
    let inter_pairs = fingerprints.len().min(1000);
    let inter_total: usize = fingerprints.iter()
        .take(inter_pairs)
        .zip(fingerprints.iter().rev())
        .map(|(a, b)| compare(*a, *b))
        .sum();
    info!(
        intra_cluster = intra_total as f64 / intra_pairs.max(1) as f64,
        inter_cluster = inter_total as f64 / inter_pairs.max(1) as f64,
        centroid_to_base = centroid_total as f64 / generated_clusters.len().max(1) as f64,
        "average hamming distances"
    );
}


fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .init();

    let config = load_config(args.config.as_ref())?;
    let sim_hash = SimHash::new(config).context("invalid simhash config")?;
    info!("{:?}", sim_hash.config());

    let generator = ClusterGenerator::new(args.cluster_size, args.num_words, args.num_clusters,
                                          args.vocabulary_size, args.num_changes, args.mode, args.seed);
    let generated_clusters = generator.generate();
    info!("Generated {} clusters", generated_clusters.len());

    run_evaluation(&generated_clusters, &sim_hash, args.max_distance);
    Ok(())
}
