//! # Schema Descriptors
//!
//! The shape rules of the dataset format, expressed as native constants:
//! compiled patterns, closed vocabularies, and numeric ranges. Validators
//! consult these descriptors instead of hard-coding literals so that every
//! rule lives in exactly one place and violation messages can quote the
//! pattern they were checked against.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// The one schema generation this engine understands.
pub const SUPPORTED_VERSION: &str = "v2";

/// Well-formed schema generation labels: `v` followed by digits.
pub static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v[0-9]+$").unwrap());

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Masked dates, `YYYY-MM-DD` with `X` standing in for unknown digits.
pub static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9X]{4}-[0-9X]{2}-[0-9X]{2}$").unwrap());

/// Deme names under a geographic resolution: lowercase with underscores.
pub static DEME_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z_]+$").unwrap());

/// Six-digit hex color with a leading `#`.
pub static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// Nucleotide mutation tokens: an IUPAC substitution like `A123T`, or an
/// `insertion`/`deletion` with a position range.
pub static NUC_MUTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([ATCGNYRWSKMDVHB-][0-9]+[ATCGNYRWSKMDVHB-]|insertion [0-9]+-[0-9]+|deletion [0-9]+-[0-9]+)$",
    )
    .unwrap()
});

/// Amino-acid mutation tokens like `N501Y`, with `*` for stop and `-` for gap.
pub static AA_MUTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z*-][0-9]+[A-Z*-]$").unwrap());

/// http or https URLs.
pub static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+$").unwrap());

/// Sequence accession identifiers.
pub static ACCESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]+$").unwrap());

// ---------------------------------------------------------------------------
// Closed vocabularies
// ---------------------------------------------------------------------------

/// Panels a dataset may declare.
pub const PANELS: &[&str] = &["tree", "map", "frequencies", "entropy"];

/// Coloring scale types.
pub const COLORING_TYPES: &[&str] = &["continuous", "ordinal", "categorical", "boolean"];

/// Values of the `hidden` node attribute.
pub const HIDDEN_VALUES: &[&str] = &["always", "divtree", "timetree"];

/// Genome annotation strands.
pub const STRANDS: &[&str] = &["+", "-"];

/// Tree layouts accepted by `display_defaults.layout`.
pub const LAYOUTS: &[&str] = &["rect", "radial", "unrooted", "clock"];

/// Distance measures accepted by `display_defaults.distance_measure`.
pub const DISTANCE_MEASURES: &[&str] = &["num_date", "div"];

/// The reserved genome annotation key for the nucleotide coordinate system.
pub const NUC_ANNOTATION: &str = "nuc";

/// The reserved coloring key for genotype coloring, computed from mutations
/// rather than node attributes.
pub const GENOTYPE_COLORING: &str = "gt";

// ---------------------------------------------------------------------------
// Numeric ranges and cardinalities
// ---------------------------------------------------------------------------

/// Valid latitudes, degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitudes, degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Valid confidence probabilities.
pub const PROBABILITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// A continuous coloring needs at least this many scale anchors to
/// interpolate between.
pub const MIN_CONTINUOUS_SCALE_ANCHORS: usize = 2;

/// Confidence intervals are exactly `[lower, upper]`.
pub const INTERVAL_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Message helpers
// ---------------------------------------------------------------------------

/// `"value" does not match pattern "^...$"`, quoting the descriptor that
/// rejected the value.
pub(crate) fn pattern_mismatch(value: &str, pattern: &Regex) -> String {
    format!("\"{value}\" does not match pattern \"{}\"", pattern.as_str())
}

/// `"value" is not one of [a, b, c]`.
pub(crate) fn not_one_of(value: &str, allowed: &[&str]) -> String {
    format!("\"{value}\" is not one of [{}]", allowed.join(", "))
}

/// `latitude -91 is out of range [-90, 90]`.
pub(crate) fn out_of_range(label: &str, value: f64, range: &RangeInclusive<f64>) -> String {
    format!(
        "{label} {value} is out of range [{}, {}]",
        range.start(),
        range.end()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
