use visgostruct::errors::VisError;
use visgostruct::utils::config::{self};
use std::fs;
use std::path::Path;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    fs::write(path, content).unwrap();
}

#[test]
fn parses_full_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg_path = tmp.path().join("visgostruct.toml");
    let data = r#"
[filter]
include = "^Api"
exclude = "Test$"
root = "ApiServer"

[render]
fields = true
comment = false
tag = true
note = true
format = "tsv"
relations = "per-field"

[input]
strict = true
include_tests = false
"#;
    write(&cfg_path, data);

    let cfg = config::load_config_at(&cfg_path).expect("config parsed");
    let filter = cfg.filter.as_ref().expect("filter section");
    assert_eq!(filter.include.as_deref(), Some("^Api"));
    assert_eq!(filter.exclude.as_deref(), Some("Test$"));
    assert_eq!(filter.root.as_deref(), Some("ApiServer"));

    let render = cfg.render.as_ref().expect("render section");
    assert_eq!(render.fields, Some(true));
    assert_eq!(render.comment, Some(false));
    assert_eq!(render.tag, Some(true));
    assert_eq!(render.note, Some(true));
    assert_eq!(render.format.as_deref(), Some("tsv"));
    assert_eq!(render.relations.as_deref(), Some("per-field"));

    assert_eq!(cfg.input.as_ref().and_then(|i| i.strict), Some(true));
    assert_eq!(cfg.input.as_ref().and_then(|i| i.include_tests), Some(false));
}

#[test]
fn load_config_near_looks_for_default_name() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(config::load_config_near(tmp.path()).unwrap().is_none());

    write(&tmp.path().join("visgostruct.toml"), "[render]\nformat = 'csv'\n");
    let cfg = config::load_config_near(tmp.path()).unwrap().expect("found default config");
    assert_eq!(cfg.render.and_then(|r| r.format), Some("csv".to_string()));
}

#[test]
fn unknown_keys_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg_path = tmp.path().join("visgostruct.toml");
    write(&cfg_path, "[render]\nfeilds = true\n");

    let err = config::load_config_at(&cfg_path).unwrap_err();
    assert!(matches!(err, VisError::Config(_)));
    assert_eq!(err.exit_code(), 2);
}
