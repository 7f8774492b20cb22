//! # Semantic Validation
//!
//! Cross-reference checks between `meta` and the tree, fed by the fact
//! collector: filters must be observed traits, observed demes must have
//! coordinates, mutation genes must be declared annotations, node names
//! must be unique, and legend bound intervals must not overlap. None of
//! these can be expressed by a per-field schema; all of them need the
//! whole-tree working set.
//!
//! [`advisories`] is the non-fatal sibling: hints about declarations that
//! are almost certainly mistakes (an entropy panel with no annotations to
//! draw) but do not make the document invalid.

use arbor_core::{ColoringSpec, Facts, Meta};

use crate::descriptors::{GENOTYPE_COLORING, NUC_ANNOTATION};
use crate::violation::{Location, Violation};

/// Runs every cross-reference check and returns the collected violations.
///
/// Standalone entry point: includes the re-flag of legend bounds on a
/// non-continuous coloring, so a run without the structural stage still
/// surfaces it.
pub fn validate_semantics(meta: &Meta, facts: &Facts) -> Vec<Violation> {
    run_cross_checks(meta, facts, true)
}

/// The same checks minus the non-continuous-bounds re-flag, which the
/// structural stage has already reported when both stages run. The engine
/// always runs the structural stage first and uses this variant.
pub fn validate_semantics_after_structural(meta: &Meta, facts: &Facts) -> Vec<Violation> {
    run_cross_checks(meta, facts, false)
}

fn run_cross_checks(meta: &Meta, facts: &Facts, reflag_bounds_type: bool) -> Vec<Violation> {
    let mut out = Vec::new();
    check_name_uniqueness(facts, &mut out);
    check_filters(meta, facts, &mut out);
    check_deme_coverage(meta, facts, &mut out);
    check_legend_bounds(meta, reflag_bounds_type, &mut out);
    check_mutation_genes(meta, facts, &mut out);
    tracing::debug!(violations = out.len(), "semantic validation finished");
    out
}

// ---------------------------------------------------------------------------
// Name uniqueness
// ---------------------------------------------------------------------------

/// One violation per duplicated name, whatever its multiplicity.
fn check_name_uniqueness(facts: &Facts, out: &mut Vec<Violation>) {
    for (name, count) in facts.duplicate_names() {
        out.push(Violation::semantic(
            Location::tree(vec![name.to_string()]),
            format!("node name \"{name}\" occurs {count} times; names must be unique across the tree"),
        ));
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Every declared filter key must occur as a dynamic trait on at least one
/// node; a filter over nothing can never match.
fn check_filters(meta: &Meta, facts: &Facts, out: &mut Vec<Violation>) {
    let Some(filters) = &meta.filters else { return };
    for (i, filter) in filters.iter().enumerate() {
        if !facts.has_trait(filter) {
            out.push(Violation::semantic(
                Location::meta(format!("filters[{i}]")),
                format!("filter \"{filter}\" does not appear as a trait on any node"),
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Deme coverage
// ---------------------------------------------------------------------------

/// Every distinct value the tree records under a geo resolution's key must
/// have coordinates. The reverse direction is fine: unused demes stay.
fn check_deme_coverage(meta: &Meta, facts: &Facts, out: &mut Vec<Violation>) {
    let Some(resolutions) = &meta.geo_resolutions else { return };
    for (i, resolution) in resolutions.iter().enumerate() {
        for deme in facts.observed_demes(&resolution.key) {
            if !resolution.demes.contains_key(deme) {
                out.push(Violation::semantic(
                    Location::meta(format!("geo_resolutions[{i}].demes")),
                    format!(
                        "deme \"{deme}\" is observed under \"{}\" in the tree but has no coordinates",
                        resolution.key
                    ),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Legend bounds
// ---------------------------------------------------------------------------

fn check_legend_bounds(meta: &Meta, reflag_bounds_type: bool, out: &mut Vec<Violation>) {
    let Some(colorings) = &meta.colorings else { return };
    for (i, spec) in colorings.iter().enumerate() {
        let Some(legend) = &spec.legend else { continue };
        let has_bounds = legend.iter().any(|entry| entry.bounds.is_some());
        if !has_bounds {
            continue;
        }
        if spec.coloring_type != "continuous" {
            // The structural stage reports this; re-flag only when asked,
            // for runs that skip that stage.
            if reflag_bounds_type {
                out.push(Violation::semantic(
                    Location::meta(format!("colorings[{i}].legend")),
                    format!(
                        "legend bounds declared on non-continuous coloring \"{}\"",
                        spec.key
                    ),
                ));
            }
            continue;
        }
        check_bounds_overlap(i, spec, out);
    }
}

/// Sorted-interval sweep over one coloring's legend bounds. Intervals are
/// half-open (lower, upper], so an upper bound may equal the next lower
/// bound; any other intersection is a violation. Malformed intervals were
/// already rejected by the structural stage and are skipped here.
fn check_bounds_overlap(index: usize, spec: &ColoringSpec, out: &mut Vec<Violation>) {
    let legend = spec.legend.as_deref().unwrap_or(&[]);
    let mut intervals: Vec<(f64, f64)> = legend
        .iter()
        .filter_map(|entry| entry.bounds.as_deref())
        .filter(|b| b.len() == 2 && b.iter().all(|v| v.is_finite()) && b[0] <= b[1])
        .map(|b| (b[0], b[1]))
        .collect();
    intervals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let Some(mut widest) = intervals.first().copied() else { return };
    for &(lower, upper) in &intervals[1..] {
        if lower < widest.1 {
            out.push(Violation::semantic(
                Location::meta(format!("colorings[{index}].legend")),
                format!(
                    "legend bounds ({}, {}] and ({lower}, {upper}] overlap; an interval may start where another ends but may not intersect it",
                    widest.0, widest.1
                ),
            ));
        }
        if upper > widest.1 {
            widest = (lower, upper);
        }
    }
}

// ---------------------------------------------------------------------------
// Mutation genes
// ---------------------------------------------------------------------------

/// Every gene key carrying mutations must be declared under
/// `genome_annotations`; nucleotide mutations require the section (and its
/// reserved `nuc` entry) to exist at all.
fn check_mutation_genes(meta: &Meta, facts: &Facts, out: &mut Vec<Violation>) {
    for gene in facts.mutation_genes() {
        let declared = meta
            .genome_annotations
            .as_ref()
            .is_some_and(|annotations| annotations.contains_key(gene));
        if !declared {
            out.push(Violation::semantic(
                Location::meta("genome_annotations"),
                format!("gene \"{gene}\" carries mutations in the tree but is not declared in genome_annotations"),
            ));
        }
    }
    if facts.saw_nuc_mutations() && meta.genome_annotations.is_none() {
        out.push(Violation::semantic(
            Location::meta("genome_annotations"),
            format!(
                "nuc mutations are present in the tree but genome_annotations (and its reserved \"{NUC_ANNOTATION}\" entry) is not declared"
            ),
        ));
    }
}

// ---------------------------------------------------------------------------
// Advisories
// ---------------------------------------------------------------------------

/// Non-fatal hints: declarations that will render as empty panels or dead
/// dropdowns. Never block serialization.
pub fn advisories(meta: &Meta, facts: &Facts) -> Vec<String> {
    let mut out = Vec::new();

    if meta.panels.iter().any(|p| p == "entropy") && meta.genome_annotations.is_none() {
        out.push(
            "the entropy panel is declared but genome_annotations is missing; the panel will have nothing to draw"
                .to_string(),
        );
    }
    if meta.panels.iter().any(|p| p == "map")
        && meta
            .geo_resolutions
            .as_ref()
            .map_or(true, |resolutions| resolutions.is_empty())
    {
        out.push(
            "the map panel is declared but no geo_resolutions are defined; the panel will be empty"
                .to_string(),
        );
    }
    if let Some(colorings) = &meta.colorings {
        for spec in colorings {
            // "gt" is computed from mutations, never stored on nodes.
            if spec.key == GENOTYPE_COLORING {
                continue;
            }
            if !facts.has_node_attribute(&spec.key) {
                out.push(format!(
                    "coloring \"{}\" does not appear on any node",
                    spec.key
                ));
            }
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
