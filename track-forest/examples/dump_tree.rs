//! Standalone track tree dump tool
//!
//! Reads a JSON event file, resolves the genealogy, applies the pruning
//! thresholds, and prints the kept tree as indented text.
//!
//! Usage:
//!   cargo run --example dump_tree -- <event.json> [--em <MeV>] [--nucleon <MeV>]
//!
//! Example:
//!   cargo run --example dump_tree -- event.json --em 1.0

use std::env;
use std::path::PathBuf;
use std::process;
use track_forest::{build_forest, EventFile, KeepPolicy, TrackNode};

fn print_node(node: &TrackNode, depth: usize) {
    println!("{}{}  [id {}]", "  ".repeat(depth), node.text, node.id);
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn count_nodes(nodes: &[TrackNode]) -> usize {
    nodes.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}

fn parse_mev(args: &[String], i: usize, flag: &str) -> f64 {
    args.get(i + 1)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("{} takes a threshold in MeV", flag);
            process::exit(1);
        })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: dump_tree <event.json> [--em <MeV>] [--nucleon <MeV>]");
        process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let mut policy = KeepPolicy::new();
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--em" => policy = policy.with_em_threshold(parse_mev(&args, i, "--em")),
            "--nucleon" => policy = policy.with_nucleon_threshold(parse_mev(&args, i, "--nucleon")),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 2;
    }

    let event = match EventFile::read(&path) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            process::exit(1);
        }
    };
    println!("Loaded {} tracks from {:?}", event.len(), path);

    let forest = match build_forest(&event.tracks, &policy) {
        Ok(forest) => forest,
        Err(e) => {
            eprintln!("Failed to resolve genealogy: {}", e);
            process::exit(1);
        }
    };

    println!("\n=== PRUNED TREE ===");
    for root in &forest {
        print_node(root, 0);
    }

    println!(
        "\nKept {} of {} tracks ({} primaries)",
        count_nodes(&forest),
        event.len(),
        forest.len()
    );
}
