//! End-to-end loading of the sample modules in `test-fixtures/modules`

use fileset_core::{
    Fileset, FilesetConfig, ModuleConfig, ResolvedFileset, StaticHost, VarValue,
};
use fileset_test_utils::fixtures::modules_root;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn load(module: &str, fileset: &str, os: &str, config: FilesetConfig) -> ResolvedFileset {
    Fileset::new(modules_root(), fileset, &ModuleConfig::new(module), config)
        .unwrap()
        .with_host(StaticHost::new("web01.example.com"))
        .with_os(os)
        .read()
        .unwrap()
}

#[rstest]
#[case("linux", "/var/log/nginx/access.log*")]
#[case("darwin", "/usr/local/var/log/nginx/access.log*")]
#[case("windows", "c:/programdata/nginx/logs/*access.log*")]
#[case("freebsd", "/var/log/nginx/access.log*")]
fn nginx_access_paths_follow_the_os(#[case] os: &str, #[case] expected: &str) {
    let fileset = load("nginx", "access", os, FilesetConfig::default());

    assert_eq!(
        fileset.vars().get("paths"),
        Some(&VarValue::Sequence(vec![json!(expected)]))
    );
    assert_eq!(fileset.prospector_config().unwrap()["paths"], json!([expected]));
}

#[test]
fn nginx_access_prospector() {
    let fileset = load("nginx", "access", "linux", FilesetConfig::default());

    assert_eq!(
        fileset.prospector_config().unwrap(),
        json!({
            "input_type": "log",
            "paths": ["/var/log/nginx/access.log*"],
            "exclude_files": [".gz$"],
            "fields": {"source_host": "web01"},
            "pipeline": "nginx-access-default",
        })
    );
}

#[test]
fn nginx_access_pipeline_keeps_escaped_ingest_templates() {
    let fileset = load("nginx", "access", "linux", FilesetConfig::default());
    let (id, body) = fileset.pipeline().unwrap();

    assert_eq!(id, "nginx-access-default");
    assert_eq!(body["processors"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        body["on_failure"][0]["set"]["value"],
        json!("{{ _ingest.on_failure_message }}")
    );
}

#[test]
fn pipeline_variable_override_changes_the_id() {
    // The override only changes the derived id; the file must still exist
    // for the body to load.
    let config = FilesetConfig::default().with_var("pipeline", json!("custom"));
    let fileset = load("nginx", "access", "linux", config);

    assert_eq!(fileset.pipeline_id(), "nginx-access-custom");
    assert!(matches!(
        fileset.pipeline().unwrap_err(),
        fileset_core::Error::FileRead { .. }
    ));
}

#[test]
fn syslog_system_chains_builtins_through_variables() {
    let fileset = load("syslog", "system", "linux", FilesetConfig::default());

    assert_eq!(
        fileset.vars().get("tags"),
        Some(&VarValue::Sequence(vec![json!("syslog"), json!("web01"), json!(7)]))
    );

    assert_eq!(
        fileset.prospector_config().unwrap(),
        json!({
            "input_type": "log",
            "paths": ["/var/log/messages*", "/var/log/syslog*"],
            "exclude_files": [".gz$"],
            "tags": ["syslog", "web01", "7"],
            "multiline": {"pattern": "^\\s", "negate": false, "match": "after"},
            "fields": {"host": "web01", "domain": "example.com"},
        })
    );
    assert_eq!(fileset.pipeline_id(), "syslog-system-pipeline");
}

#[test]
fn module_config_overrides_flow_through() {
    let module: ModuleConfig = serde_yaml::from_str(
        r#"
module: syslog
filesets:
  system:
    var:
      paths: ["/srv/log/syslog"]
    prospector:
      multiline:
        match: before
      close_eof: true
"#,
    )
    .unwrap();

    let fileset = Fileset::new(modules_root(), "system", &module, module.fileset("system"))
        .unwrap()
        .with_host(StaticHost::new("db02"))
        .with_os("linux")
        .read()
        .unwrap();
    let prospector = fileset.prospector_config().unwrap();

    assert_eq!(prospector["paths"], json!(["/srv/log/syslog"]));
    assert_eq!(
        prospector["multiline"],
        json!({"pattern": "^\\s", "negate": false, "match": "before"})
    );
    assert_eq!(prospector["close_eof"], json!(true));
    assert_eq!(prospector["fields"], json!({"host": "db02", "domain": ""}));
}
