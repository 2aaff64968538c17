use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use visgostruct::app::{run, run_cli, Settings};
use visgostruct::cli::{Cli, RelationModeArg};
use visgostruct::graph::RelationMode;
use visgostruct::visualization::{OutputFormat, UmlOptions};

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() { let _ = fs::create_dir_all(parent); }
    fs::write(path, content).unwrap();
}

#[test]
fn app_run_cli_success_and_missing_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.go");
    write_file(&file, "package a\ntype A struct { B *B }\ntype B struct { X int }\n");

    let cli = Cli { paths: vec![file.clone()], fields: true, quiet: true, ..Cli::default() };
    assert_eq!(run_cli(cli), 0);

    let cli = Cli { paths: vec![file.clone()], root: Some("Z".into()), quiet: true, ..Cli::default() };
    assert_eq!(run_cli(cli), 1);

    let cli = Cli { paths: vec![file], exclude: Some("*".into()), quiet: true, ..Cli::default() };
    assert_eq!(run_cli(cli), 2);
}

#[test]
fn app_run_cli_with_explicit_config() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.go");
    write_file(&file, "package a\ntype A struct { B *B }\ntype B struct { X int }\n");
    let cfg = dir.path().join("custom.toml");
    write_file(&cfg, "[filter]\nroot = \"A\"\n[render]\nformat = \"csv\"\n");

    let cli = Cli { paths: vec![file.clone()], config: Some(cfg), quiet: true, ..Cli::default() };
    assert_eq!(run_cli(cli), 0);

    let broken = dir.path().join("broken.toml");
    write_file(&broken, "[render]\nfields = \"yes\"\n");
    let cli = Cli { paths: vec![file], config: Some(broken), quiet: true, ..Cli::default() };
    assert_eq!(run_cli(cli), 2);
}

#[test]
fn settings_from_flags() {
    let cli = Cli {
        paths: vec![PathBuf::from("x.go")],
        tsv: true,
        note: true,
        relations: Some(RelationModeArg::PerField),
        ..Cli::default()
    };
    let s = Settings::resolve(&cli, None).unwrap();
    assert_eq!(s.format, OutputFormat::Tsv);
    assert_eq!(s.relations, RelationMode::PerField);
    assert_eq!(s.uml, UmlOptions { note: true, ..UmlOptions::default() });
}

#[test]
fn run_scans_directories() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("pkg/a.go"), "package pkg\ntype A struct { B B }\n");
    write_file(&dir.path().join("pkg/sub/b.go"), "package sub\ntype B struct { N int }\n");
    write_file(&dir.path().join("pkg/readme.txt"), "type Nope struct { X int }\n");

    let settings = Settings { paths: vec![dir.path().join("pkg")], ..Settings::default() };
    let out = run(&settings).unwrap();
    assert!(out.contains("class A {"));
    assert!(out.contains("class B {"));
    assert!(out.contains("B --* A"));
    assert!(!out.contains("Nope"));
}
