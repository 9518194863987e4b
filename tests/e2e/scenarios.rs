use super::helpers::{stderr, stdout, TestProject, SAMPLE_GRAPH};
use std::fs;

#[test]
fn test_audit_without_denylist_lists_dependencies() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    let output = test_env.run(&["audit", "--print-licenses"]);
    assert!(output.status.success());

    let log = stderr(&output);
    assert!(log.contains("Found project: com.acme:service:1.4.0"));
    assert!(log.contains("BASE DEPENDENCIES"));
    assert!(log.contains(" - artifact org.gpl:engine:2.0:compile"));
    assert!(log.contains("TRANSITIVE DEPENDENCIES"));
    assert!(log.contains(" - artifact org.dual:codec:1.1:compile"));
    assert!(log.contains("   with license: Apache-2.0"));
    assert!(log.contains("   with license: n/a"));
    // test scope is outside the default runtime classpath
    assert!(!log.contains("junit"));
    assert!(!log.contains("FORBIDDEN LICENSES"));
}

#[test]
fn test_audit_writes_json_and_html_reports() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);
    test_env.write_config("forbidden_licenses = [\"MIT\"]\n");

    let output = test_env.run(&["audit"]);
    assert!(output.status.success());

    let json_path = test_env.results_dir().join("license-scan-report.json");
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let results = &report["licenseScanResults"];

    assert_eq!(
        results["licenseMap"]["org.dual:codec:1.1:compile"],
        serde_json::json!(["MIT", "Apache-2.0"])
    );
    assert_eq!(results["violationsMap"]["MIT"], serde_json::json!([]));
    assert_eq!(
        results["violationsMap"]["NONE"],
        serde_json::json!(["org.bare:util:0.3:compile"])
    );

    let html = fs::read_to_string(test_env.results_dir().join("index.html")).unwrap();
    assert!(html.contains("Acme Service"));
    assert!(html.contains("org.gpl:engine:2.0:compile"));
    assert!(stderr(&output).contains("JSON report generated"));
}

#[test]
fn test_audit_no_reports() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    let output = test_env.run(&["audit", "--no-reports"]);
    assert!(output.status.success());
    assert!(!test_env.results_dir().exists());
}

#[test]
fn test_audit_fails_on_forbidden_license() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    let output = test_env.run(&[
        "audit",
        "--forbid",
        "regex:General Public",
        "--fail-on-violation",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let log = stderr(&output);
    assert!(log.contains("FORBIDDEN LICENSES"));
    assert!(log.contains("Found 1 violations for license 'regex:General Public':"));
    assert!(log.contains(" - org.gpl:engine:2.0:compile"));
}

#[test]
fn test_violations_without_fail_flag_exit_zero() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    let output = test_env.run(&["audit", "--forbid", "regex:General Public"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("forbidden license violations found"));
}

#[test]
fn test_dual_licensed_artifact_needs_every_license_forbidden() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    test_env.write_config("forbidden_licenses = [\"MIT\"]\nfail_on_violation = true\n");
    let output = test_env.run(&["audit", "--no-reports"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Found 0 violations for license 'MIT':"));

    test_env.write_config(
        "forbidden_licenses = [\"mit\", \"regex:^apache\"]\nfail_on_violation = true\n",
    );
    let output = test_env.run(&["audit", "--no-reports"]);
    assert_eq!(output.status.code(), Some(1));
    let log = stderr(&output);
    assert!(log.contains("Found 1 violations for license 'mit':"));
    assert!(log.contains("Found 1 violations for license 'regex:^apache':"));
}

#[test]
fn test_unlicensed_artifacts_fail_only_when_none_is_forbidden() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    test_env.write_config("forbidden_licenses = [\"Beerware\"]\nfail_on_violation = true\n");
    let output = test_env.run(&["audit", "--no-reports"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("1 artifacts declare no license"));

    test_env.write_config("forbidden_licenses = [\"NONE\"]\nfail_on_violation = true\n");
    let output = test_env.run(&["audit", "--no-reports"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(" - org.bare:util:0.3:compile"));
}

#[test]
fn test_deprecated_keys_still_apply() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);
    test_env.write_config(
        "blacklisted_licenses = [\"regex:General Public\"]\nfail_build_on_blacklisted = true\n",
    );

    let output = test_env.run(&["audit", "--no-reports"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("deprecated"));
}

#[test]
fn test_test_scope_included_when_configured() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);
    test_env.write_config("forbidden_licenses = [\"GPL-2.0\"]\nscopes = [\"compile\", \"test\"]\n");

    let output = test_env.run(&["audit", "--no-reports"]);
    assert!(output.status.success());
    let log = stderr(&output);
    assert!(log.contains(" - artifact junit:junit:4.13.2:test"));
    assert!(log.contains("Found 1 violations for license 'GPL-2.0':"));
}

#[test]
fn test_invalid_pattern_aborts_audit() {
    let test_env = TestProject::new();
    test_env.write_graph(SAMPLE_GRAPH);

    let output = test_env.run(&["audit", "--forbid", "regex:(unclosed"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid forbidden license pattern 'regex:(unclosed'"));
    assert!(!test_env.results_dir().exists());
}

#[test]
fn test_missing_license_metadata_aborts_audit() {
    let test_env = TestProject::new();
    test_env.write_graph(
        r#"[[artifact]]
group = "org.mystery"
artifact = "blob"
version = "1.0"
direct = true
"#,
    );

    let output = test_env.run(&["audit"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot resolve licenses of org.mystery:blob:1.0:compile"));
}

#[test]
fn test_missing_graph() {
    let test_env = TestProject::new();

    let output = test_env.run(&["audit"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No dependency-graph.toml found"));
}

#[test]
fn test_init_and_config_commands() {
    let test_env = TestProject::new();

    let init_output = test_env.run(&["init", "copyleft"]);
    assert!(init_output.status.success());
    assert!(test_env.path().join("licensescan.toml").exists());

    let again = test_env.run(&["init", "strict"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("already exists"));

    let show = test_env.run(&["config", "--show"]);
    assert!(show.status.success());
    let shown: serde_json::Value = serde_json::from_str(&stdout(&show)).unwrap();
    assert_eq!(shown["fail_on_violation"], serde_json::json!(true));
    assert_eq!(shown["forbidden_licenses"].as_array().unwrap().len(), 2);

    let validate = test_env.run(&["config", "--validate"]);
    assert!(validate.status.success());
    assert!(stderr(&validate).contains("Configuration is valid"));
}

#[test]
fn test_config_validate_rejects_bad_pattern() {
    let test_env = TestProject::new();
    test_env.write_config("forbidden_licenses = ['MIT', 'regex:(unclosed']\n");

    let output = test_env.run(&["config", "--validate"]);
    assert_eq!(output.status.code(), Some(1));
    let log = stderr(&output);
    assert!(log.contains("Configuration validation failed"));
    assert!(log.contains("regex:(unclosed"));
}

#[test]
fn test_lookbehind_pattern_spares_dual_licensed_gpl() {
    let test_env = TestProject::new();
    test_env.write_graph(
        r#"[[artifact]]
group = "org.plain"
artifact = "gpl"
version = "1.0"
direct = true
licenses = ["GNU General Public License v2"]

[[artifact]]
group = "org.glassfish"
artifact = "jaxb"
version = "2.3"
licenses = ["CDDL + GNU General Public License v2"]
"#,
    );
    test_env.write_config(
        "forbidden_licenses = ['regex:.*(?&lt;!\\+\\s?)GNU General Public License.*']\nfail_on_violation = true\n",
    );

    let validate = test_env.run(&["config", "--validate"]);
    assert!(validate.status.success(), "{}", stderr(&validate));

    let output = test_env.run(&["audit", "--no-reports"]);
    assert_eq!(output.status.code(), Some(1));
    let log = stderr(&output);
    assert!(log.contains("Found 1 violations for license"));
    assert!(log.contains(" - org.plain:gpl:1.0:compile"));
    assert!(!log.contains(" - org.glassfish:jaxb:2.3:compile"));
}

#[test]
fn test_config_requires_flag() {
    let test_env = TestProject::new();

    let output = test_env.run(&["config"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Use --show or --validate"));
}
