//! # Export CLI — validate, then write canonical JSON.
//!
//! Runs the full validation pipeline and writes the serialized dataset
//! only when the report is clean; an invalid dataset leaves the output
//! path untouched. `--minify` drops the pretty-printing whitespace but
//! keeps the same canonical field order.
//!
//! ## Usage
//!
//! ```bash
//! arbor export builds/flu_h3n2.json --output dist/flu_h3n2.json
//! arbor export builds/flu_h3n2.json --output dist/flu_h3n2.min.json --minify
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use arbor_core::{serialize, Dataset};

/// Export subcommand arguments.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset JSON file to validate and export.
    pub dataset: PathBuf,

    /// Where to write the canonical JSON.
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    pub minify: bool,
}

/// Execute the export subcommand. Returns `0` on success, `1` when the
/// dataset failed validation (in which case nothing is written).
pub fn run_export(args: &ExportArgs) -> Result<u8> {
    let dataset = Dataset::from_path(&args.dataset)?;

    let report = arbor_schema::validate(&dataset);
    if !report.is_valid() {
        println!("{}: {report}", args.dataset.display());
        return Ok(1);
    }

    let bytes = if args.minify {
        serialize::to_bytes_compact(&dataset)?
    } else {
        serialize::to_bytes(&dataset)?
    };
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write output: {}", args.output.display()))?;

    println!("  dataset: {}", args.dataset.display());
    println!("  output:  {}", args.output.display());
    println!("  bytes:   {}", bytes.len());
    for advisory in report.advisories() {
        println!("  note:    {advisory}");
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_dataset() -> serde_json::Value {
        json!({
            "version": "v2",
            "meta": { "updated": "2024-06-01", "panels": ["tree"] },
            "tree": { "name": "ROOT", "children": [{ "name": "tip_a" }, { "name": "tip_b" }] }
        })
    }

    fn write_input(dir: &tempfile::TempDir, value: serde_json::Value) -> PathBuf {
        let path = dir.path().join("input.json");
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn export_writes_parseable_canonical_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, valid_dataset());
        let output = dir.path().join("out.json");
        let args = ExportArgs {
            dataset: input,
            output: output.clone(),
            minify: false,
        };
        assert_eq!(run_export(&args).unwrap(), 0);

        let written = std::fs::read(&output).unwrap();
        let back: Dataset = serde_json::from_slice(&written).unwrap();
        assert_eq!(back.version, "v2");
    }

    #[test]
    fn minified_export_is_smaller_but_equivalent() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, valid_dataset());

        let pretty_path = dir.path().join("pretty.json");
        let minified_path = dir.path().join("min.json");
        run_export(&ExportArgs {
            dataset: input.clone(),
            output: pretty_path.clone(),
            minify: false,
        })
        .unwrap();
        run_export(&ExportArgs {
            dataset: input,
            output: minified_path.clone(),
            minify: true,
        })
        .unwrap();

        let pretty = std::fs::read(&pretty_path).unwrap();
        let minified = std::fs::read(&minified_path).unwrap();
        assert!(minified.len() < pretty.len());
        let a: serde_json::Value = serde_json::from_slice(&pretty).unwrap();
        let b: serde_json::Value = serde_json::from_slice(&minified).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_dataset_writes_nothing_and_exits_one() {
        let mut doc = valid_dataset();
        doc["meta"]["panels"] = json!([]);
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, doc);
        let output = dir.path().join("out.json");
        let args = ExportArgs {
            dataset: input,
            output: output.clone(),
            minify: false,
        };
        assert_eq!(run_export(&args).unwrap(), 1);
        assert!(!output.exists(), "rejected dataset must not be written");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            dataset: dir.path().join("missing.json"),
            output: dir.path().join("out.json"),
            minify: false,
        };
        assert!(run_export(&args).is_err());
    }
}
