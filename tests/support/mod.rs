//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("liberty")
}

/// Copies a fixture project into a fresh temporary directory so tests can
/// write project metadata without touching the checked-in files.
///
/// The copy keeps the fixture's directory name, which becomes the project name.
pub fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let dest = temp.path().join(name);
    copy_dir(&fixtures_root().join(name), &dest);
    (temp, dest)
}

fn copy_dir(src: &Path, dest: &Path) {
    fs::create_dir_all(dest).expect("Failed to create fixture copy");
    for entry in fs::read_dir(src).expect("Fixture directory missing") {
        let entry = entry.expect("Failed to read fixture entry");
        let target = dest.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy fixture file");
        }
    }
}

pub fn read_project_file(project: &Path) -> Option<String> {
    fs::read_to_string(project.join(".project")).ok()
}
