use super::{NatureSet, NatureStore};
use crate::error::NatureError;
use crate::project::ProjectHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Nature lists kept in memory, keyed by project root
#[derive(Default)]
pub struct InMemoryNatureStore {
    natures: RwLock<HashMap<PathBuf, NatureSet>>,
    writes: AtomicUsize,
}

impl InMemoryNatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, project: &ProjectHandle, natures: NatureSet) {
        self.natures
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(project.root().to_path_buf(), natures);
    }

    /// Number of `store` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl NatureStore for InMemoryNatureStore {
    fn load(&self, project: &ProjectHandle) -> Result<NatureSet, NatureError> {
        Ok(self
            .natures
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(project.root())
            .cloned()
            .unwrap_or_default())
    }

    fn store(&self, project: &ProjectHandle, natures: &NatureSet) -> Result<(), NatureError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.natures
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(project.root().to_path_buf(), natures.clone());
        Ok(())
    }
}
