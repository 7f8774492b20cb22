//! # Dataset Document Model — `version` + `meta` + `tree`
//!
//! Implements [`Dataset`], the top-level aggregate handed to the engine for
//! one validate+serialize pass, and the `meta` vocabulary block that declares
//! every visualizable attribute: color scales, geographic resolutions, genome
//! annotations, and filters.
//!
//! ```text
//! Dataset
//! ├── version ("v2")
//! ├── meta (Meta)
//! │   ├── updated / title / description / build_url / tree_name
//! │   ├── maintainers / data_provenance (Contact)
//! │   ├── panels
//! │   ├── colorings (ColoringSpec ── scale / legend)
//! │   ├── geo_resolutions (GeoResolution ── demes)
//! │   ├── genome_annotations (GenomeAnnotation, "nuc" reserved)
//! │   ├── filters
//! │   └── display_defaults (DisplayDefaults)
//! └── tree (TreeNode, recursive)
//! ```
//!
//! The shape mirrors the external dataset schema: objects the schema closes
//! carry `deny_unknown_fields`, optional fields are omitted when absent, and
//! keyed mappings are `BTreeMap`s so output is deterministic. Constraints the
//! type system cannot carry (patterns, ranges, enum strings, uniqueness) are
//! enforced by the validators in `arbor-schema`, not here.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArborError;
use crate::tree::{TraitValue, TreeNode};

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Top-level dataset document: schema version, vocabulary, and tree.
///
/// All three fields are required and no extra top-level fields are accepted.
/// The document is built once by the external pipeline (or parsed from a
/// JSON file at the CLI boundary), validated and serialized in one pass, and
/// discarded; the engine holds no state across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    /// Schema generation, pattern `v[0-9]+`. The single supported value is
    /// checked first and gates all other validation.
    pub version: String,
    /// Vocabulary block declaring the visualizable attributes.
    pub meta: Meta,
    /// Root of the recursive sample tree.
    pub tree: TreeNode,
}

impl Dataset {
    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error when the JSON is malformed, a required
    /// field is missing, or a closed object carries an unknown field.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Read`] when the file cannot be read and
    /// [`ArborError::Parse`] when its contents are not a well-formed
    /// dataset document.
    pub fn from_path(path: &Path) -> Result<Self, ArborError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArborError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|e| ArborError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

/// The `meta` vocabulary block.
///
/// `updated` and `panels` are required; everything else is optional and
/// omitted from output when absent. The object is closed: an unknown key is
/// rejected at the parse boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Meta {
    /// Date the dataset was last updated, `[0-9X]{4}-[0-9X]{2}-[0-9X]{2}`.
    /// `X` digits denote unknown precision (e.g. `2024-06-XX`).
    pub updated: String,
    /// Panels the client should draw. Non-empty set drawn from
    /// {tree, map, frequencies, entropy}.
    pub panels: Vec<String>,
    /// Dataset title, display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-text description, display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL of the build pipeline that produced this dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_url: Option<String>,
    /// Name distinguishing this tree when several are published together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_name: Option<String>,
    /// Dataset maintainers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<Contact>>,
    /// Upstream sources of the sequence/metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_provenance: Option<Vec<Contact>>,
    /// Declared colorings, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colorings: Option<Vec<ColoringSpec>>,
    /// Declared geographic resolutions, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_resolutions: Option<Vec<GeoResolution>>,
    /// Genomic features keyed by gene name; the `nuc` entry is mandatory
    /// whenever the section is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genome_annotations: Option<BTreeMap<String, GenomeAnnotation>>,
    /// Trait keys offered as filters; each must occur on at least one node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
    /// Initial view settings, display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_defaults: Option<DisplayDefaults>,
}

/// A named contact with an optional link; used for `maintainers` and
/// `data_provenance` entries alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    /// Display name.
    pub name: String,
    /// Optional `http(s)` link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Colorings
// ---------------------------------------------------------------------------

/// One declared coloring: a trait the client can color the tree by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColoringSpec {
    /// Trait key this coloring reads from node attributes. Unique across
    /// the `colorings` sequence.
    pub key: String,
    /// Scale type: one of {continuous, ordinal, categorical, boolean}.
    #[serde(rename = "type")]
    pub coloring_type: String,
    /// Human-readable title shown instead of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit value-to-color anchors, in order. A continuous scale needs
    /// at least two anchors to interpolate between.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec<ScaleEntry>>,
    /// Explicit legend entries, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Vec<LegendEntry>>,
}

/// One scale anchor: a `[value, "#rrggbb"]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry(pub TraitValue, pub String);

impl ScaleEntry {
    /// The anchor value.
    pub fn value(&self) -> &TraitValue {
        &self.0
    }

    /// The anchor color (expected `#[0-9A-Fa-f]{6}`).
    pub fn color(&self) -> &str {
        &self.1
    }
}

/// One legend entry. `bounds`, when given, is the half-open value interval
/// (lower, upper] this entry covers; only meaningful on continuous colorings
/// and must not overlap its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendEntry {
    /// Value this entry stands for.
    pub value: TraitValue,
    /// Text shown in the legend instead of the raw value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<TraitValue>,
    /// Half-open interval (lower, upper] as a 2-element array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Vec<f64>>,
}

// ---------------------------------------------------------------------------
// Geographic resolutions
// ---------------------------------------------------------------------------

/// One geographic resolution: a trait key (e.g. `country`) plus the
/// coordinates of every deme the tree may reference under that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoResolution {
    /// Trait key this resolution reads from node attributes. Unique across
    /// the `geo_resolutions` sequence.
    pub key: String,
    /// Human-readable title shown instead of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Coordinates per deme name (deme names match `[a-z_]+`). Every value
    /// observed in the tree under `key` must have an entry here; unused
    /// entries are fine.
    pub demes: BTreeMap<String, DemeCoordinates>,
}

/// WGS84 coordinates of one deme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemeCoordinates {
    /// Degrees north, in [-90, 90].
    pub latitude: f64,
    /// Degrees east, in [-180, 180].
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Genome annotations
// ---------------------------------------------------------------------------

/// One genomic feature. The reserved `nuc` entry spans the whole alignment;
/// gene entries give amino-acid mutation keys their coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenomeAnnotation {
    /// Sequence/contig identifier the coordinates refer to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seqid: Option<String>,
    /// Feature type (e.g. `gene`, `source`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    /// 1-based start coordinate.
    pub start: i64,
    /// End coordinate, inclusive.
    pub end: i64,
    /// Strand, `+` or `-`.
    pub strand: String,
}

// ---------------------------------------------------------------------------
// Display defaults
// ---------------------------------------------------------------------------

/// Initial view settings. Display-only: structurally validated, never
/// cross-referenced against the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayDefaults {
    /// Coloring key selected on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_by: Option<String>,
    /// Geographic resolution key selected on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_resolution: Option<String>,
    /// Tree distance metric on load: `num_date` or `div`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_measure: Option<String>,
    /// Tree layout on load: one of {rect, radial, unrooted, clock}.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Draw the map tiled three times side by side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_triplicate: Option<bool>,
    /// Branch label set shown on load (e.g. `clade`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_label: Option<String>,
    /// Draw transmission lines on the map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_lines: Option<bool>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
