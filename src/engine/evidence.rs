use crate::models::Package;

/// Delimiter used when composing the identity hash input.
pub const ID_DELIMITER: &str = "|";
/// Delimiter used when rendering the packages evidence attribute.
pub const DISPLAY_DELIMITER: &str = "\n";

/// Placeholder standing in for an empty package list.
pub const NO_PACKAGES: &str = "<none>";

const CWE_RAW_PREFIX: &str = "CWE-";
const CWE_DISPLAY_PREFIX: &str = "CWE ID ";

/// Renders a package list into a stable string: each package in canonical
/// form, sorted lexicographically, joined with `delimiter`. An empty list
/// yields the `"<none>"` placeholder.
pub fn format_packages(packages: &[Package], delimiter: &str) -> String {
    if packages.is_empty() {
        return NO_PACKAGES.to_string();
    }
    let mut names: Vec<String> = packages.iter().map(Package::canonical).collect();
    names.sort();
    names.join(delimiter)
}

/// Rewrites a raw CWE value into its display label, e.g. `"CWE-79"` into
/// `"CWE ID 79"`. Callers are expected to have filtered out blank values.
pub fn format_cwe(cwe: &str) -> String {
    cwe.replace(CWE_RAW_PREFIX, CWE_DISPLAY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_yields_placeholder() {
        assert_eq!(format_packages(&[], ","), "<none>");
    }

    #[test]
    fn packages_are_sorted_before_joining() {
        let packages = vec![Package::new("b", "2"), Package::new("a", "1")];
        assert_eq!(format_packages(&packages, ","), "a 1,b 2");

        let reversed = vec![Package::new("a", "1"), Package::new("b", "2")];
        assert_eq!(
            format_packages(&packages, ","),
            format_packages(&reversed, ",")
        );
    }

    #[test]
    fn display_delimiter_renders_one_per_line() {
        let packages = vec![
            Package::new("openssl", "1.1.1"),
            Package::new("zlib", "1.2.11"),
        ];
        assert_eq!(
            format_packages(&packages, DISPLAY_DELIMITER),
            "openssl 1.1.1\nzlib 1.2.11"
        );
    }

    #[test]
    fn cwe_prefix_is_rewritten() {
        assert_eq!(format_cwe("CWE-79"), "CWE ID 79");
        assert_eq!(format_cwe("CWE-200"), "CWE ID 200");
    }
}
