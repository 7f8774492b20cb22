//! # arbor-cli — CLI Tool for Arbor Datasets
//!
//! Provides the `arbor` command-line interface over the validation and
//! serialization engine.
//!
//! ## Subcommands
//!
//! - `arbor validate` — run the full validation pipeline over one or more
//!   dataset files and print every violation and advisory.
//! - `arbor export` — validate a dataset and, when clean, write its
//!   canonical JSON to a file.
//! - `arbor inspect` — print the collected tree facts for a dataset
//!   without judging it.
//!
//! ## Exit Codes
//!
//! Handlers return the process exit code: `0` when every input passed,
//! `1` when any dataset was invalid or unreadable. Usage errors exit via
//! clap with its own code.
//!
//! ```bash
//! arbor validate builds/flu_h3n2.json builds/rsv_a.json
//! arbor export builds/flu_h3n2.json --output dist/flu_h3n2.json --minify
//! arbor inspect builds/flu_h3n2.json
//! ```

pub mod export;
pub mod inspect;
pub mod validate;
