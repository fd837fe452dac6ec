//! Writes a layered fixture graph.
//!
//! Each COUNT is the number of nodes in one layer, first layer first. The graph
//! is printed to stdout unless `--out` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use neugraph_store::{generate_layered_graph, save_graph};
use rand::rngs::StdRng;
use rand::SeedableRng;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a fully connected layered graph", long_about = None)]
struct Args {
    /// Write the graph to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Seed for reproducible weights
    #[arg(short, long)]
    seed: Option<u64>,

    /// Node count of each layer, first layer first
    #[arg(required = true, value_name = "COUNT")]
    counts: Vec<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = generate_layered_graph(&args.counts, &mut rng);

    match args.out {
        Some(path) => {
            save_graph(&path, &graph)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} nodes and {} links to {}",
                graph.nodes.len(),
                graph.links.len(),
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&graph)?),
    }

    Ok(())
}
