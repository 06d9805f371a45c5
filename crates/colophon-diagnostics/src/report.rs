//! The installation-details report.
//!
//! The report is plain text meant to be pasted into bug reports. Its layout
//! is stable: for the same input the output is byte-identical.
//!
//! ```text
//! Generated at 2024-03-01T09:30:00.000
//!
//! System Properties:
//!
//! os.arch: x86_64
//! os.name: linux
//!
//!
//! Components:
//!
//! colophon-core (2.1.0) [signed by Release Bot] [trusted]
//! colophon-extra (0.4.0)
//! ```
//!
//! Properties are sorted by key and components by name. Signer common names
//! follow certificate order; a certificate whose subject cannot be parsed is
//! skipped without failing the report.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::dn::extract_common_names;
use crate::snapshot::{ComponentInfo, EnvironmentSnapshot};

/// Heading of the properties section.
pub const PROPERTIES_HEADING: &str = "System Properties:";

/// Heading of the components section.
pub const COMPONENTS_HEADING: &str = "Components:";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Builds the report from its parts.
///
/// `is_trusted` decides whether a component is marked `[trusted]`.
pub fn build<K, V, F>(
    generated_at: NaiveDateTime,
    properties: impl IntoIterator<Item = (K, V)>,
    components: &[ComponentInfo],
    is_trusted: F,
) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
    F: Fn(&ComponentInfo) -> bool,
{
    let mut out = String::new();
    out.push_str(&format!(
        "Generated at {}",
        generated_at.format(TIMESTAMP_FORMAT)
    ));

    out.push_str("\n\n");
    out.push_str(PROPERTIES_HEADING);
    out.push_str("\n\n");

    let mut properties: Vec<(K, V)> = properties.into_iter().collect();
    properties.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));
    for (key, value) in &properties {
        out.push_str(&format!("{}: {}\n", key.as_ref(), value.as_ref()));
    }

    out.push_str("\n\n");
    out.push_str(COMPONENTS_HEADING);
    out.push_str("\n\n");

    let mut sorted: Vec<&ComponentInfo> = components.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    for component in sorted {
        out.push_str(&component_line(component, is_trusted(component)));
        out.push('\n');
    }

    out
}

/// Builds the report for a snapshot with a custom trust predicate.
pub fn build_report<F>(snapshot: &EnvironmentSnapshot, is_trusted: F) -> String
where
    F: Fn(&ComponentInfo) -> bool,
{
    build(
        snapshot.generated_at,
        &snapshot.properties,
        &snapshot.components,
        is_trusted,
    )
}

impl EnvironmentSnapshot {
    /// Builds the report, treating a component as trusted when any of its
    /// signer certificates is trusted.
    pub fn report(&self) -> String {
        build_report(self, ComponentInfo::has_trusted_signer)
    }
}

/// Formats `name (version)` with the signer and trust annotations.
fn component_line(component: &ComponentInfo, trusted: bool) -> String {
    let mut line = format!("{} ({})", component.name, component.version);

    if !component.signers.is_empty() {
        line.push_str(" [signed by ");
        line.push_str(&signer_names(component).join(", "));
        line.push(']');
    }

    if trusted {
        line.push_str(" [trusted]");
    }

    line
}

/// Collects the common names of every signer, in certificate order.
pub fn signer_names(component: &ComponentInfo) -> Vec<String> {
    let mut names = Vec::new();
    for certificate in &component.signers {
        match extract_common_names(&certificate.subject) {
            Ok(common_names) => names.extend(common_names),
            Err(err) => {
                debug!(component = %component.name, error = %err, "skipping signer certificate");
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SignerCertificate;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_milli_opt(9, 30, 5, 42))
            .unwrap()
    }

    fn no_trust(_: &ComponentInfo) -> bool {
        false
    }

    #[test]
    fn properties_sorted_by_key() {
        let mut props = HashMap::new();
        props.insert("b", "2");
        props.insert("a", "1");
        let report = build(at(), props, &[], no_trust);
        let a = report.find("a: 1").unwrap();
        let b = report.find("b: 2").unwrap();
        assert!(a < b);
    }

    #[test]
    fn property_order_is_bytewise() {
        let props = vec![("beta", "x"), ("Zulu", "y"), ("alpha", "z")];
        let report = build(at(), props, &[], no_trust);
        assert!(report.contains("Zulu: y\nalpha: z\nbeta: x\n"));
    }

    #[test]
    fn empty_report_layout() {
        let report = build(at(), Vec::<(String, String)>::new(), &[], no_trust);
        assert_eq!(
            report,
            "Generated at 2024-03-01T09:30:05.042\n\nSystem Properties:\n\n\n\nComponents:\n\n"
        );
    }

    #[test]
    fn components_sorted_by_name() {
        let components = vec![
            ComponentInfo::new("zeta", "1.0"),
            ComponentInfo::new("alpha", "2.0"),
        ];
        let report = build(at(), Vec::<(&str, &str)>::new(), &components, no_trust);
        assert!(report.ends_with("alpha (2.0)\nzeta (1.0)\n"));
    }

    #[test]
    fn malformed_signer_is_skipped() {
        let component = ComponentInfo::new("core", "1")
            .signer(SignerCertificate::new("this is not a dn"))
            .signer(SignerCertificate::new("CN=Alice, O=Example"));
        assert_eq!(component_line(&component, false), "core (1) [signed by Alice]");
    }

    #[test]
    fn signer_without_cn_contributes_nothing() {
        let component = ComponentInfo::new("core", "1")
            .signer(SignerCertificate::new("O=Example"))
            .signer(SignerCertificate::new("CN=Bob"));
        assert_eq!(component_line(&component, false), "core (1) [signed by Bob]");
    }

    #[test]
    fn all_signers_skipped_keeps_brackets() {
        let component = ComponentInfo::new("core", "1").signer(SignerCertificate::new("???"));
        assert_eq!(component_line(&component, false), "core (1) [signed by ]");
    }

    #[test]
    fn multiple_cns_joined_in_order() {
        let component = ComponentInfo::new("core", "1")
            .signer(SignerCertificate::new("CN=Leaf,CN=Intermediate"))
            .signer(SignerCertificate::new("CN=Other"));
        assert_eq!(
            signer_names(&component),
            vec!["Leaf".to_string(), "Intermediate".to_string(), "Other".to_string()]
        );
        assert_eq!(
            component_line(&component, true),
            "core (1) [signed by Leaf, Intermediate, Other] [trusted]"
        );
    }

    #[test]
    fn unsigned_component_has_no_annotation() {
        assert_eq!(component_line(&ComponentInfo::new("x", "0"), false), "x (0)");
    }

    #[test]
    fn custom_trust_predicate() {
        let components = vec![ComponentInfo::new("core", "1"), ComponentInfo::new("ext", "1")];
        let report = build(at(), Vec::<(&str, &str)>::new(), &components, |c| {
            c.name == "core"
        });
        assert!(report.contains("core (1) [trusted]\next (1)\n"));
    }

    #[test]
    fn snapshot_report_uses_certificate_trust() {
        let snapshot = EnvironmentSnapshot::new(at()).component(
            ComponentInfo::new("core", "1")
                .signer(SignerCertificate::new("CN=Root").trusted(true)),
        );
        assert!(snapshot.report().ends_with("core (1) [signed by Root] [trusted]\n"));
    }
}
