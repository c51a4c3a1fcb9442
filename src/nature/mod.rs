//! Project nature markers
//!
//! A nature is a capability tag stored with a project's metadata. The Liberty
//! nature records that a previous classification found dev-mode support, so
//! later lookups can skip descriptor parsing.

use crate::error::NatureError;
use crate::project::ProjectHandle;
use serde::{Deserialize, Serialize};

mod eclipse;
mod memory;

pub use eclipse::{EclipseProjectStore, DEFAULT_METADATA_FILE};
pub use memory::InMemoryNatureStore;

/// Nature id marking a project as runnable in Liberty dev mode
pub const LIBERTY_NATURE_ID: &str = "io.openliberty.tools.eclipse.libertyNature";
/// Natures contributed by the Maven and Gradle IDE integrations
pub const MAVEN_NATURE_ID: &str = "org.eclipse.m2e.core.maven2Nature";
pub const GRADLE_NATURE_ID: &str = "org.eclipse.buildship.core.gradleprojectnature";

/// Ordered nature ids, each present at most once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NatureSet {
    ids: Vec<String>,
}

impl NatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &str) -> bool {
        self.ids.iter().any(|n| n == id)
    }

    /// Appends `id` unless present; returns whether the set changed
    pub fn insert(&mut self, id: &str) -> bool {
        if self.has(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Removes `id`; returns whether the set changed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|n| n != id);
        self.ids.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NatureSet::new();
        for id in iter {
            let id = id.into();
            set.insert(&id);
        }
        set
    }
}

impl From<Vec<String>> for NatureSet {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<NatureSet> for Vec<String> {
    fn from(set: NatureSet) -> Self {
        set.ids
    }
}

/// Durable storage for a project's nature list
///
/// Implementations do not need to serialize concurrent callers; the
/// classifier holds a per-project lock across each load/store pair.
pub trait NatureStore: Send + Sync {
    fn load(&self, project: &ProjectHandle) -> Result<NatureSet, NatureError>;

    fn store(&self, project: &ProjectHandle, natures: &NatureSet) -> Result<(), NatureError>;
}
