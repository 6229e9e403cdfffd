//! End-to-end tests: run a stand-in generator script inside a scratch
//! repository and check what it wrote.
#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use generate_my_projects::Options;
use generate_my_projects::cli::Cli;
use generate_my_projects::config::{self, SourceListsConfig};
use generate_my_projects::locations::Locations;
use generate_my_projects::runner::ProcessRunner;

/// Writes `<name> <path>` into the output file, run by `sh`.
const RECORDING_GENERATOR: &str = "printf '%s %s\\n' \"$1\" \"$3\" > \"$2\"\n";

/// Fails for the engine list without writing anything.
const FAILING_GENERATOR: &str = "\
if [ \"$1\" = plugin_engine_java ]; then exit 4; fi
printf '%s\\n' \"$1\" > \"$2\"
";

fn scratch_repo(generator: &str) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let scripts = tmp.path().join("tools/compiler_scripts");
    fs::create_dir_all(&scripts).unwrap();
    fs::create_dir_all(tmp.path().join("editor")).unwrap();
    fs::write(scripts.join("generate_source_list.py"), generator).unwrap();
    tmp
}

fn options(root: &Path, no_gyp: bool) -> Options {
    Options {
        locations: Locations::from_root(root),
        config: SourceListsConfig::builtin().unwrap(),
        interpreter: Some("sh".into()),
        no_gyp,
    }
}

#[test]
fn writes_both_source_lists() {
    let repo = scratch_repo(RECORDING_GENERATOR);
    let mut out = Vec::new();

    let code = generate_my_projects::run(&options(repo.path(), true), &ProcessRunner, &mut out)
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "--no-gyp is deprecated.\n");

    let editor = repo.path().join("editor");
    assert_eq!(
        fs::read_to_string(editor.join("plugin_engine_sources")).unwrap(),
        "plugin_engine_java tools/plugins/com.google.dart.engine\n"
    );
    assert_eq!(
        fs::read_to_string(editor.join("plugin_command_analyze_sources")).unwrap(),
        "plugin_command_analyze_java tools/plugins/com.google.dart.command.analyze\n"
    );
}

#[test]
fn failing_generator_stops_the_run() {
    let repo = scratch_repo(FAILING_GENERATOR);
    let mut out = Vec::new();

    let code = generate_my_projects::run(&options(repo.path(), true), &ProcessRunner, &mut out)
        .unwrap();

    assert_eq!(code, 4);
    assert!(out.is_empty(), "notice printed after failure");
    let editor = repo.path().join("editor");
    assert!(!editor.join("plugin_engine_sources").exists());
    assert!(
        !editor.join("plugin_command_analyze_sources").exists(),
        "second generator ran after the first failed"
    );
}

#[test]
fn fixture_config_drives_the_run() {
    let fixture =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/single_list.toml");
    let cfg = config::load_config(&fixture).unwrap();
    assert_eq!(cfg.interpreter, "python3");

    let repo = scratch_repo(RECORDING_GENERATOR);
    let opts = Options {
        config: cfg,
        ..options(repo.path(), false)
    };
    let mut out = Vec::new();

    let code = generate_my_projects::run(&opts, &ProcessRunner, &mut out).unwrap();

    assert_eq!(code, 0);
    assert!(out.is_empty());
    assert_eq!(
        fs::read_to_string(repo.path().join("editor/plugin_services_sources")).unwrap(),
        "plugin_services_java tools/plugins/com.google.dart.services\n"
    );
}

#[test]
fn stray_arguments_still_run_both_generators() {
    let repo = scratch_repo(RECORDING_GENERATOR);
    let root = repo.path().to_str().unwrap();
    let opts = Cli::parse_lenient([
        "generate-my-projects",
        "--root",
        root,
        "--interpreter",
        "sh",
        "--no-gyp",
        "--extra",
    ])
    .into_options()
    .unwrap();
    let mut out = Vec::new();

    let code = generate_my_projects::run(&opts, &ProcessRunner, &mut out).unwrap();

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "--no-gyp is deprecated.\n");
    let editor = repo.path().join("editor");
    assert!(editor.join("plugin_engine_sources").exists());
    assert!(editor.join("plugin_command_analyze_sources").exists());
}

#[test]
fn missing_config_reports_path() {
    let err = config::load_config(Path::new("/nonexistent/source_lists.toml")).unwrap_err();
    assert!(
        err.to_string()
            .contains("failed to read config file /nonexistent/source_lists.toml"),
        "got: {err}"
    );
}
