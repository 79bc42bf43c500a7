use sha2::{Digest, Sha256};

use crate::engine::evidence::{format_packages, ID_DELIMITER};
use crate::models::FindingRecord;

/// Computes the stable instance identifier for a finding: the SHA-256 digest
/// of the sorted canonical package strings joined with the CVE id, hex-encoded.
///
/// Sorting makes the id invariant to the scanner re-ordering its package
/// array; keying on CVE plus all packages keeps the id stable across re-scans
/// of an unchanged image.
pub fn compute_instance_id(finding: &FindingRecord) -> String {
    let packages = format_packages(&finding.packages, ID_DELIMITER);
    let cve = finding.nvd_finding.cve.as_deref().unwrap_or_default().trim();
    let mut hasher = Sha256::new();
    hasher.update(packages.as_bytes());
    hasher.update(ID_DELIMITER.as_bytes());
    hasher.update(cve.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Package;

    fn finding(cve: &str, packages: Vec<Package>) -> FindingRecord {
        let mut f = FindingRecord::default();
        f.nvd_finding.cve = Some(cve.to_string());
        f.packages = packages;
        f
    }

    #[test]
    fn id_is_deterministic() {
        let f = finding("CVE-2021-1234", vec![Package::new("openssl", "1.1.1")]);
        assert_eq!(compute_instance_id(&f), compute_instance_id(&f));
    }

    #[test]
    fn id_is_invariant_to_package_order() {
        let a = finding(
            "CVE-2021-1234",
            vec![Package::new("zlib", "1.2.11"), Package::new("openssl", "1.1.1")],
        );
        let b = finding(
            "CVE-2021-1234",
            vec![Package::new("openssl", "1.1.1"), Package::new("zlib", "1.2.11")],
        );
        assert_eq!(compute_instance_id(&a), compute_instance_id(&b));
    }

    #[test]
    fn id_changes_with_cve() {
        let pkgs = vec![Package::new("openssl", "1.1.1")];
        let a = finding("CVE-2021-1234", pkgs.clone());
        let b = finding("CVE-2021-1235", pkgs);
        assert_ne!(compute_instance_id(&a), compute_instance_id(&b));
    }

    #[test]
    fn id_changes_with_package_version() {
        let a = finding("CVE-2021-1234", vec![Package::new("openssl", "1.1.1")]);
        let b = finding("CVE-2021-1234", vec![Package::new("openssl", "1.1.1a")]);
        assert_ne!(compute_instance_id(&a), compute_instance_id(&b));
    }

    #[test]
    fn id_is_defined_for_empty_package_list() {
        let a = finding("CVE-2021-1234", Vec::new());
        let id = compute_instance_id(&a);
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
