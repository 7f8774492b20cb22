//! Integration test: full pipeline runs over a realistic dataset.
//!
//! Exercises `engine::validate` and `engine::process` end to end: a
//! fully-featured document passes and round-trips byte-identically, and
//! each class of defect (version gate, structural shape, semantic
//! cross-reference) surfaces exactly the violations it should.

use arbor_core::Dataset;
use arbor_schema::{process, validate, Location, Outcome, ViolationKind};
use serde_json::json;

/// A small but fully-featured influenza-style dataset: colorings with
/// scales and legends, geographic resolutions, genome annotations,
/// filters, display defaults, and a tree carrying dates, traits with both
/// confidence encodings, authorship, vaccine status, labels, and
/// mutations.
fn flu_dataset() -> serde_json::Value {
    json!({
        "version": "v2",
        "meta": {
            "updated": "2024-06-01",
            "title": "Influenza A/H3N2 surveillance",
            "description": "Demonstration build over public sequences.",
            "build_url": "https://github.com/arbor-bio/arbor",
            "maintainers": [
                { "name": "the surveillance team", "url": "https://example.org/team" }
            ],
            "data_provenance": [
                { "name": "GenBank", "url": "https://www.ncbi.nlm.nih.gov/genbank/" }
            ],
            "panels": ["tree", "map", "entropy"],
            "colorings": [
                { "key": "gt", "type": "categorical", "title": "Genotype" },
                {
                    "key": "country",
                    "type": "categorical",
                    "title": "Country",
                    "scale": [["china", "#4C90C0"], ["mongolia", "#CC3344"]]
                },
                {
                    "key": "age",
                    "type": "continuous",
                    "title": "Host age",
                    "scale": [[0, "#0000FF"], [90, "#FF0000"]],
                    "legend": [
                        { "value": 10, "display": "child", "bounds": [0.0, 18.0] },
                        { "value": 40, "display": "adult", "bounds": [18.0, 120.0] }
                    ]
                }
            ],
            "geo_resolutions": [
                {
                    "key": "country",
                    "title": "Country",
                    "demes": {
                        "china": { "latitude": 35.0, "longitude": 103.0 },
                        "mongolia": { "latitude": 46.9, "longitude": 103.5 }
                    }
                }
            ],
            "genome_annotations": {
                "nuc": { "start": 1, "end": 1701, "strand": "+", "type": "source" },
                "HA1": { "seqid": "reference.gb", "start": 49, "end": 1035, "strand": "+", "type": "gene" }
            },
            "filters": ["country"],
            "display_defaults": {
                "color_by": "country",
                "geo_resolution": "country",
                "distance_measure": "num_date",
                "layout": "rect",
                "map_triplicate": false,
                "branch_label": "clade"
            }
        },
        "tree": {
            "name": "NODE_0000000",
            "node_attrs": {
                "div": 0.0,
                "num_date": { "value": 2019.8, "confidence": [2019.6, 2020.0] }
            },
            "children": [
                {
                    "name": "NODE_0000001",
                    "node_attrs": {
                        "div": 0.0021,
                        "num_date": { "value": 2020.9, "confidence": [2020.7, 2021.1] },
                        "country": {
                            "value": "china",
                            "confidence": { "china": 0.88, "mongolia": 0.12 },
                            "entropy": 0.37
                        }
                    },
                    "branch_attrs": {
                        "labels": { "clade": "3C.2a1b" },
                        "mutations": { "nuc": ["A187G", "C1050T"], "HA1": ["N121K"] }
                    },
                    "children": [
                        {
                            "name": "A/Fujian/24/2021",
                            "node_attrs": {
                                "div": 0.0042,
                                "num_date": { "value": 2021.417 },
                                "country": { "value": "china" },
                                "age": { "value": 34 },
                                "accession": "EPI_ISL_402124",
                                "url": "https://example.org/samples/fujian-24",
                                "author": {
                                    "value": "Zhang et al",
                                    "title": "H3N2 circulation in Fujian",
                                    "journal": "J Surveillance",
                                    "paper_url": "https://doi.org/10.0000/example"
                                }
                            },
                            "branch_attrs": {
                                "mutations": { "nuc": ["G702A"] }
                            }
                        },
                        {
                            "name": "A/Ulaanbaatar/3/2021",
                            "node_attrs": {
                                "div": 0.0039,
                                "num_date": { "value": 2021.2 },
                                "country": { "value": "mongolia" },
                                "age": { "value": 7 },
                                "vaccine": { "serum": true, "selected": "2021-09-XX" },
                                "hidden": "timetree"
                            }
                        }
                    ]
                }
            ]
        }
    })
}

fn dataset(value: serde_json::Value) -> Dataset {
    serde_json::from_value(value).expect("fixture must parse")
}

fn serialized_bytes(value: serde_json::Value) -> Vec<u8> {
    match process(&dataset(value)).expect("process must not error") {
        Outcome::Serialized { bytes, .. } => bytes,
        Outcome::Rejected(report) => panic!("fixture must validate, got:\n{report}"),
    }
}

// ---------------------------------------------------------------------------
// The happy path
// ---------------------------------------------------------------------------

#[test]
fn test_full_featured_dataset_validates_cleanly() {
    let report = validate(&dataset(flu_dataset()));
    assert!(report.is_valid(), "unexpected violations:\n{report}");
    assert!(
        report.advisories().is_empty(),
        "unexpected advisories: {:?}",
        report.advisories()
    );
}

#[test]
fn test_serialized_bytes_round_trip_losslessly() {
    let bytes = serialized_bytes(flu_dataset());
    let back: Dataset = serde_json::from_slice(&bytes).expect("output must parse");
    assert_eq!(back, dataset(flu_dataset()));
}

#[test]
fn test_processing_is_idempotent_byte_for_byte() {
    assert_eq!(serialized_bytes(flu_dataset()), serialized_bytes(flu_dataset()));
}

#[test]
fn test_children_order_survives_the_pipeline() {
    let bytes = serialized_bytes(flu_dataset());
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let children = value["tree"]["children"][0]["children"].as_array().unwrap();
    assert_eq!(children[0]["name"], "A/Fujian/24/2021");
    assert_eq!(children[1]["name"], "A/Ulaanbaatar/3/2021");
}

#[test]
fn test_absent_optionals_are_omitted_not_null() {
    let bytes = serialized_bytes(flu_dataset());
    let text = String::from_utf8(bytes).unwrap();
    assert!(
        !text.contains("null"),
        "serialized dataset must omit absent fields entirely"
    );
}

// ---------------------------------------------------------------------------
// Schema-version gate
// ---------------------------------------------------------------------------

#[test]
fn test_unsupported_generation_is_the_only_violation_reported() {
    let mut doc = flu_dataset();
    doc["version"] = json!("v1");
    // Break plenty of other things; the gate must hide all of them.
    doc["meta"]["updated"] = json!("last tuesday");
    doc["meta"]["filters"] = json!(["host"]);

    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.kind, ViolationKind::SchemaVersion);
    assert_eq!(violation.location, Location::document("version"));
}

#[test]
fn test_malformed_generation_label_is_rejected_as_malformed() {
    let mut doc = flu_dataset();
    doc["version"] = json!("2");
    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 1);
    assert!(report.violations()[0].message.contains("does not match pattern"));
}

// ---------------------------------------------------------------------------
// Structural defects
// ---------------------------------------------------------------------------

#[test]
fn test_structural_defects_are_all_collected_in_one_pass() {
    let mut doc = flu_dataset();
    doc["meta"]["updated"] = json!("June 2024");
    doc["meta"]["colorings"][1]["scale"][0][1] = json!("blue");
    doc["tree"]["children"][0]["node_attrs"]["hidden"] = json!("sometimes");

    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 3);
    assert!(report
        .violations()
        .iter()
        .all(|v| v.kind == ViolationKind::Structural));
}

#[test]
fn test_rejected_dataset_produces_no_bytes() {
    let mut doc = flu_dataset();
    doc["meta"]["panels"] = json!([]);
    match process(&dataset(doc)).unwrap() {
        Outcome::Serialized { .. } => panic!("invalid dataset must be rejected"),
        Outcome::Rejected(report) => {
            assert_eq!(report.len(), 1);
            assert_eq!(report.violations()[0].location, Location::meta("panels"));
        }
    }
}

// ---------------------------------------------------------------------------
// Semantic cross-references
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_node_name_yields_exactly_one_violation() {
    let mut doc = flu_dataset();
    doc["tree"]["children"][0]["children"][1]["name"] = json!("A/Fujian/24/2021");

    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.kind, ViolationKind::Semantic);
    assert!(violation.message.contains("\"A/Fujian/24/2021\""));
    assert!(violation.message.contains("occurs 2 times"));
}

#[test]
fn test_unobserved_filter_yields_exactly_one_violation_naming_it() {
    let mut doc = flu_dataset();
    doc["meta"]["filters"] = json!(["country", "host"]);

    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.kind, ViolationKind::Semantic);
    assert_eq!(violation.location, Location::meta("filters[1]"));
    assert!(violation.message.contains("\"host\""));
}

#[test]
fn test_observed_deme_without_coordinates_fails_until_added() {
    let mut doc = flu_dataset();
    doc["tree"]["children"][0]["children"][1]["node_attrs"]["country"]["value"] =
        json!("canada");

    let report = validate(&dataset(doc.clone()));
    assert_eq!(report.len(), 1);
    assert!(report.violations()[0].message.contains("deme \"canada\""));

    doc["meta"]["geo_resolutions"][0]["demes"]["canada"] =
        json!({ "latitude": 56.1, "longitude": -106.3 });
    assert!(validate(&dataset(doc)).is_valid());
}

#[test]
fn test_numeric_value_under_a_geo_key_fails_deme_coverage() {
    let mut doc = flu_dataset();
    doc["tree"]["children"][0]["children"][1]["node_attrs"]["country"]["value"] = json!(12);

    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.kind, ViolationKind::Semantic);
    assert_eq!(
        violation.location,
        Location::meta("geo_resolutions[0].demes")
    );
    assert!(violation.message.contains("deme \"12\""));
}

#[test]
fn test_mutations_on_undeclared_gene_fail_until_declared() {
    let mut doc = flu_dataset();
    doc["tree"]["children"][0]["branch_attrs"]["mutations"]["NA"] = json!(["K150E"]);

    let report = validate(&dataset(doc.clone()));
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.violations()[0].location,
        Location::meta("genome_annotations")
    );
    assert!(report.violations()[0].message.contains("gene \"NA\""));

    doc["meta"]["genome_annotations"]["NA"] =
        json!({ "start": 1, "end": 1410, "strand": "+" });
    assert!(validate(&dataset(doc)).is_valid());
}

#[test]
fn test_legend_bounds_share_endpoints_but_do_not_overlap() {
    let mut doc = flu_dataset();
    // (0, 18] and (18, 120] touch at 18: allowed.
    assert!(validate(&dataset(doc.clone())).is_valid());

    doc["meta"]["colorings"][2]["legend"] = json!([
        { "value": 10, "bounds": [0.0, 18.0] },
        { "value": 40, "bounds": [5.0, 120.0] }
    ]);
    let report = validate(&dataset(doc));
    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.kind, ViolationKind::Semantic);
    assert!(violation.message.contains("overlap"));
}

// ---------------------------------------------------------------------------
// Report determinism
// ---------------------------------------------------------------------------

#[test]
fn test_equal_documents_yield_identical_reports() {
    let mut doc = flu_dataset();
    doc["meta"]["updated"] = json!("soon");
    doc["meta"]["filters"] = json!(["host"]);
    doc["tree"]["children"][0]["node_attrs"]["hidden"] = json!("sometimes");

    let first = validate(&dataset(doc.clone())).to_string();
    let second = validate(&dataset(doc)).to_string();
    assert_eq!(first, second);
}

#[test]
fn test_mixed_violations_sort_document_then_meta_then_tree() {
    let mut doc = flu_dataset();
    doc["meta"]["updated"] = json!("soon");
    doc["tree"]["children"][0]["children"][1]["node_attrs"]["hidden"] = json!("sometimes");
    doc["meta"]["filters"] = json!(["host"]);

    let report = validate(&dataset(doc));
    let locations: Vec<String> = report
        .violations()
        .iter()
        .map(|v| v.location.to_string())
        .collect();
    assert_eq!(
        locations,
        vec![
            "meta.filters[0]".to_string(),
            "meta.updated".to_string(),
            "tree[NODE_0000000 > NODE_0000001 > A/Ulaanbaatar/3/2021]".to_string(),
        ]
    );
}
