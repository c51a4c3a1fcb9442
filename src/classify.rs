//! Liberty dev-mode classification
//!
//! The [`Classifier`] answers whether a project is configured for Liberty
//! dev mode and keeps the project's Liberty nature in step with the answer.
//! Descriptors are re-read on every uncached call; nothing about their
//! content is remembered between calls.

use crate::buildsystem::{
    AnalyzerRegistry, BuildSystemId, Detection, DevModeGate, PluginMatch, ProbedDescriptor,
};
use crate::config::DetectConfig;
use crate::error::{ClassifyError, DescriptorError, NatureError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::nature::{
    EclipseProjectStore, NatureSet, NatureStore, GRADLE_NATURE_ID, LIBERTY_NATURE_ID,
    MAVEN_NATURE_ID,
};
use crate::project::ProjectHandle;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Where a classification answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// The persisted Liberty nature, descriptors not read
    Marker,
    /// A freshly analyzed build descriptor
    Descriptor,
    /// Neither `pom.xml` nor a Gradle build script exists
    NoDescriptor,
}

/// What reconciliation did to the Liberty nature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerChange {
    Added,
    Removed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub project: String,
    pub build_system: Option<BuildSystemId>,
    pub descriptor: Option<PathBuf>,
    pub is_liberty: bool,
    /// `None` when the answer was served from the marker
    pub supports_containers: Option<bool>,
    pub plugin: Option<PluginMatch>,
    pub source: ClassificationSource,
    pub marker: MarkerChange,
}

impl Classification {
    pub fn version(&self) -> Option<&str> {
        self.plugin
            .as_ref()
            .and_then(|m| m.declaration.version.as_deref())
    }
}

/// Classifies projects and reconciles their Liberty nature
pub struct Classifier {
    fs: Arc<dyn FileSystem>,
    store: Arc<dyn NatureStore>,
    registry: AnalyzerRegistry,
    nature_id: String,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Classifier {
    pub fn new(fs: Arc<dyn FileSystem>, store: Arc<dyn NatureStore>) -> Self {
        Self {
            fs,
            store,
            registry: AnalyzerRegistry::with_defaults(),
            nature_id: LIBERTY_NATURE_ID.to_string(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Real file system with natures kept in each project's metadata file
    pub fn from_config(config: &DetectConfig) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
        let store = Arc::new(EclipseProjectStore::with_file_name(
            Arc::clone(&fs),
            config.metadata_file.clone(),
        ));
        Self::new(fs, store).with_nature_id(config.nature_id.clone())
    }

    pub fn with_nature_id(mut self, nature_id: impl Into<String>) -> Self {
        self.nature_id = nature_id.into();
        self
    }

    pub fn with_registry(mut self, registry: AnalyzerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn nature_id(&self) -> &str {
        &self.nature_id
    }

    /// Whether the project carries the Maven nature or a `pom.xml`
    pub fn is_maven(&self, project: &ProjectHandle) -> bool {
        self.has_nature_hint(project, MAVEN_NATURE_ID)
            || self
                .registry
                .has_descriptor(self.fs.as_ref(), project.root(), BuildSystemId::Maven)
    }

    /// Whether the project carries the Gradle nature or a Gradle build script
    pub fn is_gradle(&self, project: &ProjectHandle) -> bool {
        self.has_nature_hint(project, GRADLE_NATURE_ID)
            || self
                .registry
                .has_descriptor(self.fs.as_ref(), project.root(), BuildSystemId::Gradle)
    }

    /// Build system decided by descriptor presence, `pom.xml` first
    pub fn build_system(&self, project: &ProjectHandle) -> Option<BuildSystemId> {
        self.probe(project).map(|p| p.build_system())
    }

    /// Analyzes the project's descriptor without touching its natures
    pub fn analyze(&self, project: &ProjectHandle) -> Classification {
        let Some(probed) = self.probe(project) else {
            debug!(project = project.name(), "No build descriptor found");
            return Classification {
                project: project.name().to_string(),
                build_system: None,
                descriptor: None,
                is_liberty: false,
                supports_containers: Some(false),
                plugin: None,
                source: ClassificationSource::NoDescriptor,
                marker: MarkerChange::Unchanged,
            };
        };

        let detection = match self.detect(&probed) {
            Ok(detection) => detection,
            Err(e) => {
                warn!(
                    project = project.name(),
                    descriptor = %probed.path.display(),
                    error = %e,
                    "Treating project as not Liberty"
                );
                Detection::not_found()
            }
        };

        Classification {
            project: project.name().to_string(),
            build_system: Some(probed.build_system()),
            descriptor: Some(probed.path),
            is_liberty: detection.found,
            supports_containers: Some(detection.supports_containers),
            plugin: detection.plugin,
            source: ClassificationSource::Descriptor,
            marker: MarkerChange::Unchanged,
        }
    }

    /// Returns whether the project runs in Liberty dev mode, persisting the
    /// answer as the Liberty nature.
    ///
    /// With `force_refresh` false an existing nature is trusted and no
    /// descriptor is read.
    pub fn classify(
        &self,
        project: &ProjectHandle,
        force_refresh: bool,
    ) -> Result<bool, ClassifyError> {
        self.classify_detailed(project, force_refresh)
            .map(|c| c.is_liberty)
    }

    pub fn classify_detailed(
        &self,
        project: &ProjectHandle,
        force_refresh: bool,
    ) -> Result<Classification, ClassifyError> {
        let lock = self.project_lock(project);
        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            self.reconcile(project, force_refresh)
        };
        drop(lock);
        self.release_lock(project);
        result
    }

    /// Read-analyze-write sequence; callers hold the project lock
    fn reconcile(
        &self,
        project: &ProjectHandle,
        force_refresh: bool,
    ) -> Result<Classification, ClassifyError> {
        let mut natures = self.load_natures(project)?;
        let marked = natures.has(&self.nature_id);

        if marked && !force_refresh {
            debug!(project = project.name(), "Liberty nature present, skipping analysis");
            return Ok(Classification {
                project: project.name().to_string(),
                build_system: self.build_system(project),
                descriptor: None,
                is_liberty: true,
                supports_containers: None,
                plugin: None,
                source: ClassificationSource::Marker,
                marker: MarkerChange::Unchanged,
            });
        }

        let mut classification = self.analyze(project);
        if classification.source == ClassificationSource::NoDescriptor {
            return Ok(classification);
        }

        let change = if classification.is_liberty {
            if natures.insert(&self.nature_id) {
                MarkerChange::Added
            } else {
                MarkerChange::Unchanged
            }
        } else if natures.remove(&self.nature_id) {
            MarkerChange::Removed
        } else {
            MarkerChange::Unchanged
        };

        if change != MarkerChange::Unchanged {
            self.store_natures(project, &natures)?;
            info!(
                project = project.name(),
                nature = %self.nature_id,
                change = ?change,
                "Reconciled Liberty nature"
            );
        }

        classification.marker = change;
        Ok(classification)
    }

    fn probe(&self, project: &ProjectHandle) -> Option<ProbedDescriptor> {
        self.registry.probe(self.fs.as_ref(), project.root())
    }

    fn detect(&self, probed: &ProbedDescriptor) -> Result<Detection, DescriptorError> {
        let content =
            self.fs
                .read_to_string(&probed.path)
                .map_err(|e| DescriptorError::Unreadable {
                    path: probed.path.clone(),
                    message: e.to_string(),
                })?;

        probed.analyzer.detect(&content, DevModeGate::Plugin)
    }

    fn has_nature_hint(&self, project: &ProjectHandle, nature: &str) -> bool {
        self.store
            .load(project)
            .map(|natures| natures.has(nature))
            .unwrap_or(false)
    }

    fn load_natures(&self, project: &ProjectHandle) -> Result<NatureSet, ClassifyError> {
        self.store
            .load(project)
            .map_err(|source| self.persistence_error(project, source))
    }

    fn store_natures(&self, project: &ProjectHandle, natures: &NatureSet) -> Result<(), ClassifyError> {
        self.store
            .store(project, natures)
            .map_err(|source| self.persistence_error(project, source))
    }

    fn persistence_error(&self, project: &ProjectHandle, source: NatureError) -> ClassifyError {
        ClassifyError::MarkerPersistence {
            project: project.name().to_string(),
            source,
        }
    }

    fn project_lock(&self, project: &ProjectHandle) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(project.root().to_path_buf()).or_default())
    }

    /// Drops the project's entry once no other caller holds or waits on it,
    /// so the table only tracks projects being classified right now.
    fn release_lock(&self, project: &ProjectHandle) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(project.root())
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(project.root());
        }
    }
}
