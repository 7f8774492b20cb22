//! # Structural Validation
//!
//! Field-shape checks: every constraint that can be decided by looking at
//! one field in isolation. Patterns, closed vocabularies, numeric ranges,
//! interval shapes, per-sequence uniqueness, and cardinality rules all live
//! here; cross-references between `meta` and `tree` belong to the semantic
//! stage.
//!
//! All findings are collected into the caller's sink. Nothing here stops at
//! the first problem: a dataset with ten bad hex colors reports ten
//! violations.

use std::collections::{BTreeMap, BTreeSet};

use arbor_core::{
    walk, BranchAttrs, ColoringSpec, Confidence, Contact, Dataset, DisplayDefaults,
    GenomeAnnotation, GeoResolution, Meta, Mutations, NodeAttrs, Visit,
};

use crate::descriptors::{
    not_one_of, out_of_range, pattern_mismatch, AA_MUTATION_RE, ACCESSION_RE, COLORING_TYPES,
    DATE_RE, DEME_NAME_RE, DISTANCE_MEASURES, HEX_COLOR_RE, HIDDEN_VALUES, INTERVAL_LEN,
    LATITUDE_RANGE, LAYOUTS, LONGITUDE_RANGE, MIN_CONTINUOUS_SCALE_ANCHORS, NUC_ANNOTATION,
    NUC_MUTATION_RE, PANELS, PROBABILITY_RANGE, STRANDS, URL_RE,
};
use crate::violation::{Location, Violation};

/// Runs every structural check over the whole document and returns the
/// collected violations. The schema version gate is not re-checked here;
/// the engine applies it before any other stage runs.
pub fn validate_structure(dataset: &Dataset) -> Vec<Violation> {
    let mut out = Vec::new();
    check_meta(&dataset.meta, &mut out);
    for visit in walk(&dataset.tree) {
        check_node(&visit, &mut out);
    }
    tracing::debug!(violations = out.len(), "structural validation finished");
    out
}

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

fn check_meta(meta: &Meta, out: &mut Vec<Violation>) {
    if !DATE_RE.is_match(&meta.updated) {
        out.push(Violation::structural(
            Location::meta("updated"),
            pattern_mismatch(&meta.updated, &DATE_RE),
        ));
    }
    check_panels(&meta.panels, out);
    check_contacts("maintainers", meta.maintainers.as_deref(), out);
    check_contacts("data_provenance", meta.data_provenance.as_deref(), out);
    if let Some(colorings) = &meta.colorings {
        check_colorings(colorings, out);
    }
    if let Some(resolutions) = &meta.geo_resolutions {
        check_geo_resolutions(resolutions, out);
    }
    if let Some(annotations) = &meta.genome_annotations {
        check_genome_annotations(annotations, out);
    }
    if let Some(filters) = &meta.filters {
        check_filters(filters, out);
    }
    if let Some(defaults) = &meta.display_defaults {
        check_display_defaults(defaults, out);
    }
}

fn check_panels(panels: &[String], out: &mut Vec<Violation>) {
    if panels.is_empty() {
        out.push(Violation::structural(
            Location::meta("panels"),
            "panels must declare at least one panel",
        ));
    }
    let mut seen = BTreeSet::new();
    for (i, panel) in panels.iter().enumerate() {
        if !PANELS.contains(&panel.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("panels[{i}]")),
                not_one_of(panel, PANELS),
            ));
        }
        if !seen.insert(panel.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("panels[{i}]")),
                format!("duplicate panel \"{panel}\""),
            ));
        }
    }
}

fn check_contacts(section: &str, contacts: Option<&[Contact]>, out: &mut Vec<Violation>) {
    let Some(contacts) = contacts else { return };
    for (i, contact) in contacts.iter().enumerate() {
        if let Some(url) = &contact.url {
            if !URL_RE.is_match(url) {
                out.push(Violation::structural(
                    Location::meta(format!("{section}[{i}].url")),
                    pattern_mismatch(url, &URL_RE),
                ));
            }
        }
    }
}

fn check_colorings(colorings: &[ColoringSpec], out: &mut Vec<Violation>) {
    let mut seen = BTreeSet::new();
    for (i, spec) in colorings.iter().enumerate() {
        if spec.key.is_empty() {
            out.push(Violation::structural(
                Location::meta(format!("colorings[{i}].key")),
                "coloring keys must be non-empty",
            ));
        } else if !seen.insert(spec.key.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("colorings[{i}].key")),
                format!("duplicate coloring key \"{}\"", spec.key),
            ));
        }
        if !COLORING_TYPES.contains(&spec.coloring_type.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("colorings[{i}].type")),
                not_one_of(&spec.coloring_type, COLORING_TYPES),
            ));
        }

        let continuous = spec.coloring_type == "continuous";
        if let Some(scale) = &spec.scale {
            if continuous && scale.len() < MIN_CONTINUOUS_SCALE_ANCHORS {
                out.push(Violation::structural(
                    Location::meta(format!("colorings[{i}].scale")),
                    format!(
                        "a continuous scale needs at least {MIN_CONTINUOUS_SCALE_ANCHORS} anchors to interpolate between, found {}",
                        scale.len()
                    ),
                ));
            }
            for (j, anchor) in scale.iter().enumerate() {
                if !HEX_COLOR_RE.is_match(anchor.color()) {
                    out.push(Violation::structural(
                        Location::meta(format!("colorings[{i}].scale[{j}]")),
                        pattern_mismatch(anchor.color(), &HEX_COLOR_RE),
                    ));
                }
            }
        }
        if let Some(legend) = &spec.legend {
            for (j, entry) in legend.iter().enumerate() {
                let Some(bounds) = &entry.bounds else { continue };
                check_interval(
                    Location::meta(format!("colorings[{i}].legend[{j}].bounds")),
                    "bounds",
                    bounds,
                    out,
                );
                if !continuous {
                    out.push(Violation::structural(
                        Location::meta(format!("colorings[{i}].legend[{j}].bounds")),
                        format!(
                            "legend bounds are only valid on continuous colorings, not \"{}\"",
                            spec.coloring_type
                        ),
                    ));
                }
            }
        }
    }
}

fn check_geo_resolutions(resolutions: &[GeoResolution], out: &mut Vec<Violation>) {
    let mut seen = BTreeSet::new();
    for (i, resolution) in resolutions.iter().enumerate() {
        if resolution.key.is_empty() {
            out.push(Violation::structural(
                Location::meta(format!("geo_resolutions[{i}].key")),
                "geographic resolution keys must be non-empty",
            ));
        } else if !seen.insert(resolution.key.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("geo_resolutions[{i}].key")),
                format!("duplicate geographic resolution key \"{}\"", resolution.key),
            ));
        }
        for (deme, coordinates) in &resolution.demes {
            if !DEME_NAME_RE.is_match(deme) {
                out.push(Violation::structural(
                    Location::meta(format!("geo_resolutions[{i}].demes.{deme}")),
                    pattern_mismatch(deme, &DEME_NAME_RE),
                ));
            }
            if !LATITUDE_RANGE.contains(&coordinates.latitude) {
                out.push(Violation::structural(
                    Location::meta(format!("geo_resolutions[{i}].demes.{deme}.latitude")),
                    out_of_range("latitude", coordinates.latitude, &LATITUDE_RANGE),
                ));
            }
            if !LONGITUDE_RANGE.contains(&coordinates.longitude) {
                out.push(Violation::structural(
                    Location::meta(format!("geo_resolutions[{i}].demes.{deme}.longitude")),
                    out_of_range("longitude", coordinates.longitude, &LONGITUDE_RANGE),
                ));
            }
        }
    }
}

fn check_genome_annotations(
    annotations: &BTreeMap<String, GenomeAnnotation>,
    out: &mut Vec<Violation>,
) {
    if !annotations.contains_key(NUC_ANNOTATION) {
        out.push(Violation::structural(
            Location::meta("genome_annotations"),
            format!("the reserved \"{NUC_ANNOTATION}\" annotation is required whenever annotations are declared"),
        ));
    }
    for (gene, annotation) in annotations {
        if gene.is_empty() {
            out.push(Violation::structural(
                Location::meta("genome_annotations"),
                "annotation keys must be non-empty",
            ));
        }
        if !STRANDS.contains(&annotation.strand.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("genome_annotations.{gene}.strand")),
                not_one_of(&annotation.strand, STRANDS),
            ));
        }
    }
}

fn check_filters(filters: &[String], out: &mut Vec<Violation>) {
    let mut seen = BTreeSet::new();
    for (i, filter) in filters.iter().enumerate() {
        if !seen.insert(filter.as_str()) {
            out.push(Violation::structural(
                Location::meta(format!("filters[{i}]")),
                format!("duplicate filter \"{filter}\""),
            ));
        }
    }
}

fn check_display_defaults(defaults: &DisplayDefaults, out: &mut Vec<Violation>) {
    if let Some(measure) = &defaults.distance_measure {
        if !DISTANCE_MEASURES.contains(&measure.as_str()) {
            out.push(Violation::structural(
                Location::meta("display_defaults.distance_measure"),
                not_one_of(measure, DISTANCE_MEASURES),
            ));
        }
    }
    if let Some(layout) = &defaults.layout {
        if !LAYOUTS.contains(&layout.as_str()) {
            out.push(Violation::structural(
                Location::meta("display_defaults.layout"),
                not_one_of(layout, LAYOUTS),
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Tree nodes
// ---------------------------------------------------------------------------

fn node_location(visit: &Visit<'_>) -> Location {
    Location::tree(visit.path.clone())
}

fn check_node(visit: &Visit<'_>, out: &mut Vec<Violation>) {
    let node = visit.node;

    if node.name.is_empty() {
        out.push(Violation::structural(
            node_location(visit),
            "node names must be non-empty",
        ));
    } else if node.name.chars().any(char::is_whitespace) {
        out.push(Violation::structural(
            node_location(visit),
            format!("node name \"{}\" must not contain whitespace", node.name),
        ));
    }

    if let Some(attrs) = &node.node_attrs {
        check_node_attrs(attrs, visit, out);
    }
    if let Some(branch) = &node.branch_attrs {
        check_branch_attrs(branch, visit, out);
    }
    if node.children.as_ref().is_some_and(|c| c.is_empty()) {
        out.push(Violation::structural(
            node_location(visit),
            "children must be non-empty when present; leaves omit the field",
        ));
    }
}

fn check_node_attrs(attrs: &NodeAttrs, visit: &Visit<'_>, out: &mut Vec<Violation>) {
    if let Some(div) = attrs.div {
        if !div.is_finite() {
            out.push(Violation::structural(
                node_location(visit),
                format!("div must be a finite number, got {div}"),
            ));
        }
    }
    if let Some(num_date) = &attrs.num_date {
        if !num_date.value.is_finite() {
            out.push(Violation::structural(
                node_location(visit),
                format!("num_date value must be a finite number, got {}", num_date.value),
            ));
        }
        if let Some(confidence) = &num_date.confidence {
            check_interval(node_location(visit), "num_date confidence", confidence, out);
        }
    }
    if let Some(vaccine) = &attrs.vaccine {
        check_date_field("vaccine.selected", vaccine.selected.as_deref(), visit, out);
        check_date_field("vaccine.start_date", vaccine.start_date.as_deref(), visit, out);
        check_date_field("vaccine.end_date", vaccine.end_date.as_deref(), visit, out);
    }
    if let Some(hidden) = &attrs.hidden {
        if !HIDDEN_VALUES.contains(&hidden.as_str()) {
            out.push(Violation::structural(
                node_location(visit),
                format!("hidden value {}", not_one_of(hidden, HIDDEN_VALUES)),
            ));
        }
    }
    if let Some(url) = &attrs.url {
        if !URL_RE.is_match(url) {
            out.push(Violation::structural(
                node_location(visit),
                format!("url {}", pattern_mismatch(url, &URL_RE)),
            ));
        }
    }
    if let Some(author) = &attrs.author {
        if let Some(paper_url) = &author.paper_url {
            if !URL_RE.is_match(paper_url) {
                out.push(Violation::structural(
                    node_location(visit),
                    format!("author.paper_url {}", pattern_mismatch(paper_url, &URL_RE)),
                ));
            }
        }
    }
    if let Some(accession) = &attrs.accession {
        if !ACCESSION_RE.is_match(accession) {
            out.push(Violation::structural(
                node_location(visit),
                format!("accession {}", pattern_mismatch(accession, &ACCESSION_RE)),
            ));
        }
    }

    for (key, entry) in &attrs.traits {
        if key.is_empty() {
            out.push(Violation::structural(
                node_location(visit),
                "trait keys must be non-empty",
            ));
        }
        if let Some(confidence) = &entry.confidence {
            check_trait_confidence(key, confidence, visit, out);
        }
        if let Some(entropy) = entry.entropy {
            if !entropy.is_finite() {
                out.push(Violation::structural(
                    node_location(visit),
                    format!("entropy of trait \"{key}\" must be a finite number, got {entropy}"),
                ));
            }
        }
    }
}

fn check_date_field(label: &str, date: Option<&str>, visit: &Visit<'_>, out: &mut Vec<Violation>) {
    let Some(date) = date else { return };
    if !DATE_RE.is_match(date) {
        out.push(Violation::structural(
            node_location(visit),
            format!("{label} {}", pattern_mismatch(date, &DATE_RE)),
        ));
    }
}

fn check_trait_confidence(
    key: &str,
    confidence: &Confidence,
    visit: &Visit<'_>,
    out: &mut Vec<Violation>,
) {
    match confidence {
        Confidence::Interval(interval) => {
            check_interval(
                node_location(visit),
                &format!("confidence of trait \"{key}\""),
                interval,
                out,
            );
        }
        Confidence::Distribution(distribution) => {
            for (alternative, probability) in distribution {
                if !PROBABILITY_RANGE.contains(probability) {
                    out.push(Violation::structural(
                        node_location(visit),
                        format!(
                            "confidence of trait \"{key}\" for \"{alternative}\": {}",
                            out_of_range("probability", *probability, &PROBABILITY_RANGE)
                        ),
                    ));
                }
            }
        }
    }
}

fn check_branch_attrs(branch: &BranchAttrs, visit: &Visit<'_>, out: &mut Vec<Violation>) {
    if let Some(labels) = &branch.labels {
        for key in labels.keys() {
            if key.is_empty() {
                out.push(Violation::structural(
                    node_location(visit),
                    "branch label keys must be non-empty",
                ));
            }
        }
    }
    if let Some(mutations) = &branch.mutations {
        check_mutations(mutations, visit, out);
    }
}

fn check_mutations(mutations: &Mutations, visit: &Visit<'_>, out: &mut Vec<Violation>) {
    if let Some(nuc) = &mutations.nuc {
        for token in nuc {
            if !NUC_MUTATION_RE.is_match(token) {
                out.push(Violation::structural(
                    node_location(visit),
                    format!("nuc mutation {}", pattern_mismatch(token, &NUC_MUTATION_RE)),
                ));
            }
        }
    }
    for (gene, tokens) in &mutations.genes {
        if gene.is_empty() {
            out.push(Violation::structural(
                node_location(visit),
                "mutation gene keys must be non-empty",
            ));
        }
        for token in tokens {
            if !AA_MUTATION_RE.is_match(token) {
                out.push(Violation::structural(
                    node_location(visit),
                    format!("{gene} mutation {}", pattern_mismatch(token, &AA_MUTATION_RE)),
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shared interval check
// ---------------------------------------------------------------------------

/// Intervals are `[lower, upper]`: exactly two finite entries, ordered.
/// One violation per interval; the first failed rule wins.
fn check_interval(location: Location, label: &str, interval: &[f64], out: &mut Vec<Violation>) {
    if interval.len() != INTERVAL_LEN {
        out.push(Violation::structural(
            location,
            format!(
                "{label} must be a 2-element [lower, upper] interval, found {} entries",
                interval.len()
            ),
        ));
        return;
    }
    if interval.iter().any(|v| !v.is_finite()) {
        out.push(Violation::structural(
            location,
            format!("{label} entries must be finite numbers"),
        ));
        return;
    }
    if interval[0] > interval[1] {
        out.push(Violation::structural(
            location,
            format!(
                "{label} interval is inverted: {} > {}",
                interval[0], interval[1]
            ),
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
