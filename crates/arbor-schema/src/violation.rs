//! # Violation and Report Types
//!
//! Every problem the validators find is a [`Violation`]: a location inside
//! the dataset, a [`ViolationKind`] classifying which stage raised it, and a
//! human-readable message. Violations are collected, never thrown, so a
//! single run reports everything that is wrong with a document.
//!
//! [`ValidationReport`] accumulates violations together with non-fatal
//! advisories. Reports are sorted before display so that the same document
//! always produces the same output, byte for byte.

use std::fmt;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Where in the dataset a violation was found.
///
/// Locations order document-level problems first, then `meta` sub-paths,
/// then tree nodes by their root-to-node name path. That ordering, together
/// with [`ValidationReport::sort`], is what makes report output
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Location {
    /// A top-level document field, e.g. `version`.
    Document(String),
    /// A dotted sub-path under `meta`, e.g. `colorings[1].scale[0]`.
    Meta(String),
    /// The name path from the root node to the offending node, inclusive.
    Tree(Vec<String>),
}

impl Location {
    /// Location of a top-level document field.
    pub fn document(field: impl Into<String>) -> Self {
        Location::Document(field.into())
    }

    /// Location of a field under `meta`.
    pub fn meta(path: impl Into<String>) -> Self {
        Location::Meta(path.into())
    }

    /// Location of a tree node, given its root-to-node name path.
    pub fn tree(path: Vec<String>) -> Self {
        Location::Tree(path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Document(field) => write!(f, "{field}"),
            Location::Meta(path) => write!(f, "meta.{path}"),
            Location::Tree(path) => write!(f, "tree[{}]", path.join(" > ")),
        }
    }
}

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// Which validation stage raised a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ViolationKind {
    /// The document's schema generation is malformed or unsupported. A
    /// violation of this kind short-circuits the pipeline: nothing else
    /// about the document can be trusted.
    SchemaVersion,
    /// A single field breaks its shape constraint: a pattern, an enum
    /// membership, a range, or a cardinality rule.
    Structural,
    /// A cross-reference between document parts does not hold, e.g. a
    /// filter key that no node carries.
    Semantic,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViolationKind::SchemaVersion => "schema-version",
            ViolationKind::Structural => "structural",
            ViolationKind::Semantic => "semantic",
        };
        write!(f, "{label}")
    }
}

/// A single validation finding.
///
/// The derived ordering (location, then kind, then message) is the report
/// ordering, so sorting a `Vec<Violation>` yields the canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// Where the problem sits.
    pub location: Location,
    /// Which stage found it.
    pub kind: ViolationKind,
    /// What is wrong, phrased for the dataset author.
    pub message: String,
}

impl Violation {
    /// A schema-version violation at the given location.
    pub fn schema_version(location: Location, message: impl Into<String>) -> Self {
        Violation {
            location,
            kind: ViolationKind::SchemaVersion,
            message: message.into(),
        }
    }

    /// A structural violation at the given location.
    pub fn structural(location: Location, message: impl Into<String>) -> Self {
        Violation {
            location,
            kind: ViolationKind::Structural,
            message: message.into(),
        }
    }

    /// A semantic violation at the given location.
    pub fn semantic(location: Location, message: impl Into<String>) -> Self {
        Violation {
            location,
            kind: ViolationKind::Semantic,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  [{}] {}: {}", self.kind, self.location, self.message)
    }
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// The accumulated result of validating one dataset.
///
/// Violations make the document invalid; advisories flag likely mistakes
/// that do not. An empty report means the document passed every check.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    advisories: Vec<String>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no violations were recorded. Advisories do not count
    /// against validity.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations recorded.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations, in their current order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// All advisories, in insertion order.
    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    /// Records a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Records a non-fatal advisory.
    pub fn add_advisory(&mut self, advisory: impl Into<String>) {
        self.advisories.push(advisory.into());
    }

    /// Sorts violations into their canonical order: location, then kind,
    /// then message. Advisories keep insertion order.
    pub fn sort(&mut self) {
        self.violations.sort();
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            write!(f, "valid")?;
        } else {
            writeln!(
                f,
                "{} violation{}:",
                self.violations.len(),
                if self.violations.len() == 1 { "" } else { "s" }
            )?;
            for (i, violation) in self.violations.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "{violation}")?;
            }
        }
        if !self.advisories.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "{} advisor{}:",
                self.advisories.len(),
                if self.advisories.len() == 1 { "y" } else { "ies" }
            )?;
            for (i, advisory) in self.advisories.iter().enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "  {advisory}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_covers_all_variants() {
        assert_eq!(Location::document("version").to_string(), "version");
        assert_eq!(
            Location::meta("colorings[1].scale[0]").to_string(),
            "meta.colorings[1].scale[0]"
        );
        assert_eq!(
            Location::tree(vec!["ROOT".into(), "clade_a".into(), "tip_1".into()]).to_string(),
            "tree[ROOT > clade_a > tip_1]"
        );
    }

    #[test]
    fn locations_order_document_then_meta_then_tree() {
        let mut locations = vec![
            Location::tree(vec!["ROOT".into()]),
            Location::meta("updated"),
            Location::document("version"),
            Location::meta("panels"),
        ];
        locations.sort();
        assert_eq!(locations[0], Location::document("version"));
        assert_eq!(locations[1], Location::meta("panels"));
        assert_eq!(locations[2], Location::meta("updated"));
        assert_eq!(locations[3], Location::tree(vec!["ROOT".into()]));
    }

    #[test]
    fn tree_locations_order_by_name_path() {
        let mut locations = vec![
            Location::tree(vec!["ROOT".into(), "b".into()]),
            Location::tree(vec!["ROOT".into(), "a".into(), "leaf".into()]),
            Location::tree(vec!["ROOT".into()]),
        ];
        locations.sort();
        assert_eq!(locations[0], Location::tree(vec!["ROOT".into()]));
        assert_eq!(
            locations[1],
            Location::tree(vec!["ROOT".into(), "a".into(), "leaf".into()])
        );
        assert_eq!(locations[2], Location::tree(vec!["ROOT".into(), "b".into()]));
    }

    #[test]
    fn violation_display_includes_kind_location_and_message() {
        let violation = Violation::structural(
            Location::meta("updated"),
            "\"yesterday\" does not match pattern \"^[0-9X]{4}-[0-9X]{2}-[0-9X]{2}$\"",
        );
        let rendered = violation.to_string();
        assert!(rendered.starts_with("  [structural] meta.updated:"));
        assert!(rendered.contains("yesterday"));
    }

    #[test]
    fn report_starts_valid_and_flips_on_first_violation() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.is_empty());

        report.add_advisory("the map panel is declared but geo_resolutions is missing");
        assert!(report.is_valid(), "advisories must not invalidate");

        report.add_violation(Violation::semantic(
            Location::meta("filters[0]"),
            "filter \"country\" does not appear as a trait on any node",
        ));
        assert!(!report.is_valid());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn sort_orders_by_location_then_kind_then_message() {
        let mut report = ValidationReport::new();
        report.add_violation(Violation::semantic(
            Location::tree(vec!["ROOT".into()]),
            "z",
        ));
        report.add_violation(Violation::structural(
            Location::tree(vec!["ROOT".into()]),
            "a",
        ));
        report.add_violation(Violation::structural(Location::meta("panels"), "m"));
        report.sort();

        let kinds: Vec<_> = report.violations().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::Structural,
                ViolationKind::Structural,
                ViolationKind::Semantic,
            ]
        );
        assert_eq!(report.violations()[0].location, Location::meta("panels"));
    }

    #[test]
    fn display_renders_violations_and_advisories() {
        let mut report = ValidationReport::new();
        report.add_violation(Violation::structural(
            Location::meta("panels"),
            "panels must declare at least one panel",
        ));
        report.add_advisory("coloring \"region\" does not appear on any node");

        let rendered = report.to_string();
        assert!(rendered.starts_with("1 violation:"));
        assert!(rendered.contains("  [structural] meta.panels:"));
        assert!(rendered.contains("1 advisory:"));
        assert!(rendered.contains("  coloring \"region\""));
    }

    #[test]
    fn display_for_clean_report_is_valid() {
        assert_eq!(ValidationReport::new().to_string(), "valid");
    }
}
