//! Build system registry

use super::{BuildSystemAnalyzer, BuildSystemId, GradleAnalyzer, MavenAnalyzer};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A descriptor found in a project directory and the analyzer that owns it
#[derive(Clone)]
pub struct ProbedDescriptor {
    pub analyzer: Arc<dyn BuildSystemAnalyzer>,
    pub path: PathBuf,
}

impl ProbedDescriptor {
    pub fn build_system(&self) -> BuildSystemId {
        self.analyzer.id()
    }
}

/// Registry of analyzers, probed in registration order
#[derive(Clone)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn BuildSystemAnalyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Maven first: a project carrying both descriptors is treated as Maven.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MavenAnalyzer));
        registry.register(Arc::new(GradleAnalyzer));
        registry
    }

    pub fn register(&mut self, analyzer: Arc<dyn BuildSystemAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn get(&self, id: BuildSystemId) -> Option<Arc<dyn BuildSystemAnalyzer>> {
        self.analyzers.iter().find(|a| a.id() == id).cloned()
    }

    /// Finds the descriptor that decides the project's build system
    pub fn probe(&self, fs: &dyn FileSystem, project_root: &Path) -> Option<ProbedDescriptor> {
        self.analyzers.iter().find_map(|analyzer| {
            analyzer
                .descriptor_names()
                .iter()
                .map(|name| project_root.join(name))
                .find(|path| fs.is_file(path))
                .map(|path| ProbedDescriptor {
                    analyzer: Arc::clone(analyzer),
                    path,
                })
        })
    }

    /// Whether `project_root` holds a descriptor for `id`
    pub fn has_descriptor(&self, fs: &dyn FileSystem, project_root: &Path, id: BuildSystemId) -> bool {
        self.get(id).is_some_and(|analyzer| {
            analyzer
                .descriptor_names()
                .iter()
                .any(|name| fs.is_file(&project_root.join(name)))
        })
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn test_registry_with_defaults() {
        let registry = AnalyzerRegistry::with_defaults();
        assert_eq!(registry.analyzers.len(), 2);
        assert!(registry.get(BuildSystemId::Maven).is_some());
        assert!(registry.get(BuildSystemId::Gradle).is_some());
    }

    #[test]
    fn test_probe_maven_before_gradle() {
        let fs = MockFileSystem::new();
        fs.add_file("pom.xml", "<project/>");
        fs.add_file("build.gradle", "");

        let probed = AnalyzerRegistry::with_defaults()
            .probe(&fs, Path::new("/mock"))
            .unwrap();
        assert_eq!(probed.build_system(), BuildSystemId::Maven);
        assert_eq!(probed.path, PathBuf::from("/mock/pom.xml"));
    }

    #[test]
    fn test_probe_kotlin_gradle() {
        let fs = MockFileSystem::new();
        fs.add_file("build.gradle.kts", "");

        let probed = AnalyzerRegistry::with_defaults()
            .probe(&fs, Path::new("/mock"))
            .unwrap();
        assert_eq!(probed.build_system(), BuildSystemId::Gradle);
        assert_eq!(probed.path, PathBuf::from("/mock/build.gradle.kts"));
    }

    #[test]
    fn test_probe_ignores_directories_and_empty_projects() {
        let fs = MockFileSystem::new();
        fs.add_dir("pom.xml");

        let registry = AnalyzerRegistry::with_defaults();
        assert!(registry.probe(&fs, Path::new("/mock")).is_none());
        assert!(!registry.has_descriptor(&fs, Path::new("/mock"), BuildSystemId::Maven));
    }
}
