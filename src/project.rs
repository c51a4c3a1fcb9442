//! Workspace project handles

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A reference to a workspace project
///
/// The handle only names the project; descriptor content and the nature list
/// are fetched through the classifier's collaborators on every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectHandle {
    name: String,
    root: PathBuf,
}

impl ProjectHandle {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Names the project after its directory
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        Self { name, root }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_directory_name() {
        let project = ProjectHandle::from_path("/workspace/inventory-service");
        assert_eq!(project.name(), "inventory-service");
        assert_eq!(
            project.file("pom.xml"),
            PathBuf::from("/workspace/inventory-service/pom.xml")
        );
    }

    #[test]
    fn test_from_root_path() {
        let project = ProjectHandle::from_path("/");
        assert_eq!(project.name(), "/");
    }
}
