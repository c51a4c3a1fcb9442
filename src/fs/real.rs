use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).context(format!("Failed to write file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("subdir")).unwrap();
        fs::File::create(base.join("pom.xml"))
            .unwrap()
            .write_all(b"<project/>")
            .unwrap();

        dir
    }

    #[test]
    fn test_exists() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.exists(&temp.path().join("pom.xml")));
        assert!(!fs.exists(&temp.path().join("build.gradle")));
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(&temp.path().join("subdir")));
        assert!(!fs.is_dir(&temp.path().join("pom.xml")));
        assert!(fs.is_file(&temp.path().join("pom.xml")));
        assert!(!fs.is_file(temp.path()));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.read_to_string(&temp.path().join("missing.xml")).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let path = temp.path().join(".project");

        fs.write(&path, "<projectDescription/>").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "<projectDescription/>");
    }
}
