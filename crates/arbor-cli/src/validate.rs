//! # Validate CLI — run the pipeline over dataset files.
//!
//! Prints one block per input file: `valid` for clean documents, otherwise
//! every violation the engine collected, plus any non-fatal advisories.
//! Unreadable or unparseable files are reported inline and the run
//! continues with the remaining inputs.
//!
//! ## Usage
//!
//! ```bash
//! arbor validate builds/flu_h3n2.json
//! arbor validate builds/*.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use arbor_core::Dataset;

/// Validate subcommand arguments.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Dataset JSON files to validate.
    #[arg(required = true)]
    pub datasets: Vec<PathBuf>,
}

/// Execute the validate subcommand. Returns the process exit code: `0`
/// when every dataset passed, `1` otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mut passed = 0usize;

    for path in &args.datasets {
        let dataset = match Dataset::from_path(path) {
            Ok(dataset) => dataset,
            Err(e) => {
                println!("{}: error: {e}", path.display());
                continue;
            }
        };

        let report = arbor_schema::validate(&dataset);
        println!("{}: {report}", path.display());
        if report.is_valid() {
            passed += 1;
        }
    }

    let total = args.datasets.len();
    if total > 1 {
        println!();
        println!("{passed}/{total} datasets valid");
    }

    Ok(if passed == total { 0 } else { 1 })
}
