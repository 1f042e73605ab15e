//! Scenario tests over generated module trees

use fileset_core::template::MissingKey;
use fileset_core::{Error, Fileset, FilesetConfig, ModuleConfig, StaticHost, VarValue};
use fileset_test_utils::TestModules;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn untemplated_sequence_default_is_returned_verbatim() {
    let modules = TestModules::new();
    modules.write_manifest(
        "nginx",
        "access",
        "var:\n  - name: paths\n    default: [\"/var/log/nginx/*.log\"]\n",
    );

    let fileset = Fileset::new(
        modules.root(),
        "access",
        &ModuleConfig::new("nginx"),
        FilesetConfig::default(),
    )
    .unwrap()
    .with_host(StaticHost::new("host"))
    .read()
    .unwrap();

    assert_eq!(
        fileset.vars().get("paths"),
        Some(&VarValue::Sequence(vec![json!("/var/log/nginx/*.log")]))
    );
}

#[test]
fn filesets_of_one_module_resolve_independently() {
    let modules = TestModules::new();
    modules.write_simple_fileset("nginx", "access", &["/var/log/nginx/access.log"]);
    modules.write_simple_fileset("nginx", "error", &["/var/log/nginx/error.log"]);
    let module = ModuleConfig::new("nginx");

    let ids: Vec<String> = ["access", "error"]
        .into_iter()
        .map(|name| {
            Fileset::new(modules.root(), name, &module, module.fileset(name))
                .unwrap()
                .with_host(StaticHost::new("host"))
                .read()
                .unwrap()
                .pipeline_id()
                .to_string()
        })
        .collect();

    assert_eq!(ids, vec!["nginx-access-default", "nginx-error-default"]);
}

#[test]
fn lenient_missing_keys_apply_to_config_templates() {
    let modules = TestModules::new();
    modules.write_simple_fileset("app", "main", &["/var/log/app.log"]);
    modules.write_file(
        "app",
        "main",
        "config/input.yml",
        "input_type: log\nsuffix: \"{{.not_declared}}\"\n",
    );

    let strict = Fileset::new(modules.root(), "main", &ModuleConfig::new("app"), FilesetConfig::default())
        .unwrap()
        .with_host(StaticHost::new("host"))
        .read()
        .unwrap();
    assert!(matches!(
        strict.prospector_config().unwrap_err(),
        Error::Template { .. }
    ));

    let lenient = Fileset::new(modules.root(), "main", &ModuleConfig::new("app"), FilesetConfig::default())
        .unwrap()
        .with_host(StaticHost::new("host"))
        .with_missing_key(MissingKey::Empty)
        .read()
        .unwrap();
    assert_eq!(
        lenient.prospector_config().unwrap(),
        json!({"input_type": "log", "suffix": ""})
    );
}

#[test]
fn host_resolution_failure_aborts_read() {
    let modules = TestModules::new();
    modules.write_simple_fileset("app", "main", &["/var/log/app.log"]);

    let err = Fileset::new(modules.root(), "main", &ModuleConfig::new("app"), FilesetConfig::default())
        .unwrap()
        .with_host(StaticHost::new(""))
        .read()
        .unwrap_err();
    assert!(matches!(err, Error::HostResolution { .. }));
}

#[test]
fn system_host_is_the_default() {
    let modules = TestModules::new();
    modules.write_simple_fileset("app", "main", &["/var/log/app.log"]);

    let fileset = Fileset::new(modules.root(), "main", &ModuleConfig::new("app"), FilesetConfig::default())
        .unwrap()
        .read()
        .unwrap();

    let builtin = fileset.vars().get("builtin").unwrap().to_value();
    assert!(builtin["hostname"].as_str().is_some_and(|h| !h.is_empty()));
}
