//! End-to-end tests for the `peasant` binary
//!
//! Builds use `transpiler = "copy"` so no node tooling is needed.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    let hour_ago = SystemTime::now() - Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(hour_ago)
        .unwrap();
}

/// A package with two sources and the copy transpiler
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", "{\n  \"name\": \"widget\"\n}\n");
    write(root, "peasant.toml", "[build]\ntranspiler = \"copy\"\n");
    write(root, "src/index.js", "export { two } from './util/math';\n");
    write(root, "src/util/math.es6", "export const two = 2;\n");
    temp_dir
}

fn peasant(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("peasant");
    cmd.arg("-C")
        .arg(dir)
        .env("NO_COLOR", "1")
        .env_remove("PEASANT_LOG")
        .env_remove("PEASANT_SOURCE_MAPS")
        .env_remove("PEASANT_SOURCE_DIR")
        .env_remove("PEASANT_OUTPUT_DIR");
    cmd
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn test_help_lists_commands() {
    assert_cmd::cargo::cargo_bin_cmd!("peasant")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("lint"))
        .stdout(predicate::str::contains("cover"))
        .stdout(predicate::str::contains("--sourcemaps"));
}

#[test]
fn test_requires_a_command() {
    assert_cmd::cargo::cargo_bin_cmd!("peasant").assert().failure();
}

#[test]
fn test_unknown_command_fails() {
    let project = create_test_project();
    peasant(project.path())
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("deploy"));
    assert!(!project.path().join("lib").exists());
}

// ============================================================================
// peasant build
// ============================================================================

#[test]
fn test_build_transpiles_sources() {
    let project = create_test_project();
    let root = project.path();

    peasant(root)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/index.js -> lib/index.js"))
        .stdout(predicate::str::contains("src/util/math.es6 -> lib/util/math.js"));

    assert_eq!(
        fs::read_to_string(root.join("lib/util/math.js")).unwrap(),
        "export const two = 2;\n"
    );
    assert!(!root.join("lib/index.map").exists());
}

#[test]
fn test_build_with_source_maps() {
    let project = create_test_project();
    let root = project.path();

    peasant(root).args(["-s", "build"]).assert().success();

    let code = fs::read_to_string(root.join("lib/index.js")).unwrap();
    assert!(code.ends_with("\n//# sourceMappingURL=index.map"));
    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("lib/index.map")).unwrap()).unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "index.js");
}

#[test]
fn test_second_build_rewrites_nothing() {
    let project = create_test_project();
    let root = project.path();

    peasant(root).arg("build").assert().success();
    peasant(root)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("->").not());
}

#[test]
fn test_build_picks_up_touched_source() {
    let project = create_test_project();
    let root = project.path();

    peasant(root).arg("build").assert().success();

    // Written now, so newer than the output from the first build
    fs::write(root.join("src/index.js"), "export default 3;\n").unwrap();
    let future = SystemTime::now() + Duration::from_secs(60);
    fs::File::options()
        .write(true)
        .open(root.join("src/index.js"))
        .unwrap()
        .set_modified(future)
        .unwrap();

    peasant(root)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/index.js -> lib/index.js"))
        .stdout(predicate::str::contains("math").not());
    assert_eq!(
        fs::read_to_string(root.join("lib/index.js")).unwrap(),
        "export default 3;\n"
    );
}

#[test]
fn test_build_without_sources_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "package.json", "{}");

    peasant(temp_dir.path()).arg("build").assert().success();
    assert!(!temp_dir.path().join("lib").exists());
}

#[test]
fn test_env_overrides_output_dir() {
    let project = create_test_project();
    let root = project.path();

    peasant(root)
        .env("PEASANT_OUTPUT_DIR", "dist")
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/index.js -> dist/index.js"));
    assert!(root.join("dist/util/math.js").is_file());
}

#[test]
fn test_invalid_config_fails() {
    let project = create_test_project();
    let root = project.path();
    write(root, "peasant.toml", "[build]\nextensions = []\n");

    peasant(root)
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_failing_transpiler_stops_the_run() {
    let project = create_test_project();
    let root = project.path();
    write(
        root,
        "peasant.toml",
        "[build]\ntranspiler = \"node_modules/.bin/no-such-transpiler\"\n",
    );

    peasant(root)
        .args(["build", "link"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Build failed"));
    assert!(!root.join("lib/index.js").exists());
}

// ============================================================================
// peasant link
// ============================================================================

#[cfg(unix)]
#[test]
fn test_link_creates_missing_links() {
    let project = create_test_project();
    let root = project.path();
    write(root, "node_modules/peasant/node_modules/eslint/package.json", "{}");

    peasant(root).arg("link").assert().success();

    let link = root.join("node_modules/eslint");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
}
