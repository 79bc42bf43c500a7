use std::fs;

use tempfile::TempDir;

use tenable_cs_parser::models::{Priority, Vulnerability};
use tenable_cs_parser::pipeline::{ParseRun, RunStatus};
use tenable_cs_parser::sink::{JsonSink, VulnerabilitySink};

fn run_report(doc: &str) -> (Vec<Vulnerability>, tenable_cs_parser::pipeline::RunReport) {
    let mut sink = JsonSink::new(Vec::new(), false);
    let mut run = ParseRun::new();
    let report = run.execute(doc.as_bytes(), &mut sink).unwrap();
    assert_eq!(run.status(), RunStatus::Completed);
    (sink.vulnerabilities().to_vec(), report)
}

#[test]
fn single_finding_end_to_end() {
    let doc = r#"{
        "image_name": "library/debian",
        "tag": "buster",
        "updated_at": "2021-03-01T12:00:00Z",
        "installed_packages": [{"name": "openssl"}, {"name": "zlib"}],
        "findings": [{
            "nvd_finding": {
                "cve": "CVE-2021-1234",
                "description": "Information disclosure in openssl",
                "cvss_score": 9.5,
                "cwe": "CWE-200",
                "access_vector": "NETWORK",
                "access_complexity": "LOW"
            },
            "packages": [{"name": "openssl", "version": "1.1.1"}]
        }]
    }"#;

    let (vulns, report) = run_report(doc);
    assert_eq!(vulns.len(), 1);
    let vuln = &vulns[0];

    assert_eq!(vuln.priority, Priority::Critical);
    assert_eq!(vuln.mapped_category.as_deref(), Some("CWE ID 200"));
    assert_eq!(vuln.file_name.as_deref(), Some("openssl 1.1.1"));
    assert!(vuln.cve_url.ends_with("CVE-2021-1234"));
    assert_eq!(vuln.sub_category, "CVE-2021-1234");
    assert_eq!(vuln.category, "Insecure Deployment");
    assert_eq!(vuln.vulnerability_abstract, "Information disclosure in openssl");
    assert_eq!(vuln.access_vector.as_deref(), Some("NETWORK"));
    assert_eq!(vuln.access_complexity.as_deref(), Some("LOW"));
    assert_eq!(vuln.confidentiality_impact, None);

    assert_eq!(report.scan.build_id.as_deref(), Some("library/debian"));
    assert_eq!(report.scan.scan_label.as_deref(), Some("buster"));
    assert_eq!(report.scan.num_files, Some(2));
    assert_eq!(report.scan.engine_version, "Unknown");
    assert_eq!(report.findings_seen, 1);
    assert_eq!(report.skipped, 0);
}

#[test]
fn findings_without_cve_yield_no_records() {
    let doc = r#"{
        "findings": [
            {"nvd_finding": {"description": "no cve here"}, "packages": []},
            {"nvd_finding": {"cve": ""}, "packages": [{"name": "a", "version": "1"}]},
            {"nvd_finding": {"cve": "   "}, "packages": []}
        ]
    }"#;

    let (vulns, report) = run_report(doc);
    assert!(vulns.is_empty());
    assert_eq!(report.findings_seen, 3);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.submitted, 0);
}

#[test]
fn duplicate_findings_produce_one_record() {
    // Same CVE and same package set in either order: one instance id.
    let doc = r#"{
        "findings": [
            {
                "nvd_finding": {"cve": "CVE-2020-5555", "cvss_score": 2.0},
                "packages": [
                    {"name": "zlib", "version": "1.2.11"},
                    {"name": "openssl", "version": "1.1.1"}
                ]
            },
            {
                "nvd_finding": {"cve": "CVE-2020-5555", "cvss_score": 9.0},
                "packages": [
                    {"name": "openssl", "version": "1.1.1"},
                    {"name": "zlib", "version": "1.2.11"}
                ]
            }
        ]
    }"#;

    let (vulns, report) = run_report(doc);
    assert_eq!(vulns.len(), 1);
    assert_eq!(report.merged, 1);
    assert_eq!(report.delivered(), 1);
    // The higher-priority duplicate wins.
    assert_eq!(vulns[0].priority, Priority::Critical);
}

#[test]
fn instance_ids_are_stable_across_runs() {
    let doc = r#"{
        "findings": [{
            "nvd_finding": {"cve": "CVE-2021-1234"},
            "packages": [{"name": "openssl", "version": "1.1.1"}]
        }]
    }"#;

    let (first, _) = run_report(doc);
    let (second, _) = run_report(doc);
    assert_eq!(first[0].instance_id, second[0].instance_id);
    assert_eq!(first[0].instance_id.len(), 64);
}

#[test]
fn output_document_omits_absent_attributes() {
    let doc = r#"{
        "findings": [{
            "nvd_finding": {"cve": "CVE-2020-0001"},
            "packages": []
        }]
    }"#;

    let (vulns, _) = run_report(doc);
    let json = serde_json::to_value(&vulns).unwrap();
    let record = &json[0];
    assert!(record.get("cwe").is_none());
    assert!(record.get("mapped_category").is_none());
    assert!(record.get("cvss_score").is_none());
    assert!(record.get("file_name").is_none());
    assert_eq!(record["packages"], "<none>");
    assert_eq!(record["priority"], "medium");
}

#[test]
fn convert_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("report.json");
    let output_path = dir.path().join("normalized.json");

    fs::write(
        &input_path,
        r#"{
            "image_name": "library/nginx",
            "tag": "1.19",
            "findings": [{
                "nvd_finding": {"cve": "CVE-2021-1234", "cvss_score": 7.0},
                "packages": [{"name": "pcre", "version": "8.44"}]
            }]
        }"#,
    )
    .unwrap();

    let input = fs::File::open(&input_path).unwrap();
    let output = fs::File::create(&output_path).unwrap();
    let mut sink = JsonSink::new(std::io::BufWriter::new(output), true);
    let mut run = ParseRun::new();
    let report = run.execute(std::io::BufReader::new(input), &mut sink).unwrap();
    sink.set_scan_info(report.scan);
    sink.finish().unwrap();

    let written = fs::read_to_string(&output_path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["scan"]["build_id"], "library/nginx");
    assert_eq!(doc["scan"]["scan_label"], "1.19");
    assert_eq!(doc["vulnerabilities"].as_array().unwrap().len(), 1);
    assert_eq!(doc["vulnerabilities"][0]["priority"], "high");
    assert_eq!(doc["vulnerabilities"][0]["file_name"], "pcre 8.44");
}

#[test]
fn malformed_document_aborts_without_output() {
    let mut sink = JsonSink::new(Vec::new(), false);
    let mut run = ParseRun::new();
    let result = run.execute("not json at all".as_bytes(), &mut sink);
    assert!(result.is_err());
    assert_eq!(run.status(), RunStatus::Parsing);
    assert!(sink.vulnerabilities().is_empty());
}
