//! # Inspect CLI — print the collected facts for a dataset.
//!
//! Parses a dataset file, runs the fact collector, and prints what the
//! tree actually carries: node counts, every dynamic trait key with its
//! spread of values, and the mutation genes. Inspection never judges; a
//! dataset that would fail validation still inspects fine as long as it
//! parses.
//!
//! ## Usage
//!
//! ```bash
//! arbor inspect builds/flu_h3n2.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use arbor_core::{collect, Dataset};

/// Inspect subcommand arguments.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset JSON file to inspect.
    pub dataset: PathBuf,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let dataset = Dataset::from_path(&args.dataset)?;
    let facts = collect(&dataset.tree);

    println!("  version:  {}", dataset.version);
    println!("  updated:  {}", dataset.meta.updated);
    if let Some(title) = &dataset.meta.title {
        println!("  title:    {title}");
    }
    println!("  panels:   {}", dataset.meta.panels.join(", "));
    println!(
        "  nodes:    {} ({} leaves, max depth {})",
        facts.node_count(),
        facts.leaf_count(),
        facts.max_depth()
    );

    let keys: Vec<&str> = facts.trait_keys().collect();
    if keys.is_empty() {
        println!("  traits:   none");
    } else {
        println!("  traits:");
        for key in keys {
            if let Some(observations) = facts.trait_observations(key) {
                println!(
                    "    {:<20} {} nodes, {} distinct values",
                    key,
                    observations.occurrences,
                    observations.values.len()
                );
            }
        }
    }

    if !facts.mutation_genes().is_empty() {
        let genes: Vec<&str> = facts
            .mutation_genes()
            .iter()
            .map(String::as_str)
            .collect();
        println!("  mutation genes: {}", genes.join(", "));
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_input(dir: &tempfile::TempDir, value: serde_json::Value) -> PathBuf {
        let path = dir.path().join("input.json");
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn inspect_reports_facts_for_a_valid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            json!({
                "version": "v2",
                "meta": { "updated": "2024-06-01", "panels": ["tree"] },
                "tree": {
                    "name": "ROOT",
                    "children": [
                        { "name": "tip_a", "node_attrs": { "country": { "value": "china" } } },
                        { "name": "tip_b" }
                    ]
                }
            }),
        );
        let args = InspectArgs { dataset: input };
        assert_eq!(run_inspect(&args).unwrap(), 0);
    }

    #[test]
    fn inspection_does_not_judge_an_invalid_dataset() {
        // Unknown panel and a bad date: invalid, but it parses, so the
        // facts are still printable.
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            &dir,
            json!({
                "version": "v2",
                "meta": { "updated": "whenever", "panels": ["phylo"] },
                "tree": { "name": "ROOT" }
            }),
        );
        let args = InspectArgs { dataset: input };
        assert_eq!(run_inspect(&args).unwrap(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = InspectArgs {
            dataset: dir.path().join("missing.json"),
        };
        assert!(run_inspect(&args).is_err());
    }
}
