//! Build descriptor analyzers
//!
//! Each supported build system inspects its descriptor for a Liberty dev-mode
//! plugin declaration. Analyzers are stateless: every call parses the content
//! it is handed and keeps nothing between calls.

use crate::error::DescriptorError;
use crate::version::satisfies_minimum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod gradle;
pub mod maven;
pub mod registry;

pub use gradle::GradleAnalyzer;
pub use maven::MavenAnalyzer;
pub use registry::{AnalyzerRegistry, ProbedDescriptor};

/// Group id shared by the Liberty build plugins
pub const LIBERTY_GROUP_ID: &str = "io.openliberty.tools";
pub const LIBERTY_MAVEN_PLUGIN: &str = "liberty-maven-plugin";
pub const LIBERTY_GRADLE_PLUGIN: &str = "liberty-gradle-plugin";
pub const LIBERTY_ANT_TASKS: &str = "liberty-ant-tasks";
/// Plugin id used in Gradle `plugins { }` blocks
pub const LIBERTY_GRADLE_PLUGIN_ID: &str = "io.openliberty.tools.gradle.Liberty";

/// First liberty-maven-plugin release with container dev mode
pub const MAVEN_CONTAINER_MIN_VERSION: &str = "3.3-M1";
/// First liberty-gradle-plugin release with container dev mode
pub const GRADLE_CONTAINER_MIN_VERSION: &str = "3.1-M1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystemId {
    Maven,
    Gradle,
}

impl BuildSystemId {
    pub fn name(&self) -> &'static str {
        match self {
            BuildSystemId::Maven => "Maven",
            BuildSystemId::Gradle => "Gradle",
        }
    }
}

impl fmt::Display for BuildSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plugin coordinate found in a build descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDeclaration {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

/// Where in the descriptor a declaration was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationSite {
    /// `<build>/<plugins>`
    Build,
    /// `<build>/<pluginManagement>/<plugins>`, typical of parent POMs
    PluginManagement,
    /// `<profiles>/<profile>/<build>`
    Profile { id: Option<String> },
    /// A Gradle `dependencies { }` block
    Dependencies,
}

impl fmt::Display for DeclarationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationSite::Build => f.write_str("build plugins"),
            DeclarationSite::PluginManagement => f.write_str("plugin management"),
            DeclarationSite::Profile { id: Some(id) } => write!(f, "profile '{}'", id),
            DeclarationSite::Profile { id: None } => f.write_str("unnamed profile"),
            DeclarationSite::Dependencies => f.write_str("dependencies block"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMatch {
    pub declaration: PluginDeclaration,
    pub site: DeclarationSite,
}

/// What a detection has to establish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevModeGate {
    /// The Liberty plugin is declared
    Plugin,
    /// The Liberty plugin is declared at a version that supports container dev mode
    Container,
}

/// Outcome of analyzing one descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    /// Whether a declaration satisfying the requested gate exists
    pub found: bool,
    /// The declaration satisfying the gate, or the first one located when none does
    pub plugin: Option<PluginMatch>,
    /// Whether any declaration supports container dev mode
    pub supports_containers: bool,
}

impl Detection {
    pub fn not_found() -> Self {
        Self {
            found: false,
            plugin: None,
            supports_containers: false,
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.plugin
            .as_ref()
            .and_then(|m| m.declaration.version.as_deref())
    }
}

/// One build system's view of its descriptor
pub trait BuildSystemAnalyzer: Send + Sync {
    fn id(&self) -> BuildSystemId;

    /// Descriptor file names, most preferred first
    fn descriptor_names(&self) -> &[&'static str];

    /// Minimum plugin version for container dev mode
    fn min_container_version(&self) -> &'static str;

    /// Liberty plugin declarations in search order
    fn find_plugins(&self, content: &str) -> Result<Vec<PluginMatch>, DescriptorError>;

    fn supports_containers(&self, declaration: &PluginDeclaration) -> bool {
        satisfies_minimum(
            declaration.version.as_deref(),
            self.min_container_version(),
        )
    }

    fn detect(&self, content: &str, gate: DevModeGate) -> Result<Detection, DescriptorError> {
        let matches = self.find_plugins(content)?;

        let container_match = matches
            .iter()
            .position(|m| self.supports_containers(&m.declaration));

        let chosen = match gate {
            DevModeGate::Plugin => (!matches.is_empty()).then_some(0),
            DevModeGate::Container => container_match,
        };

        Ok(Detection {
            found: chosen.is_some(),
            plugin: chosen
                .or((!matches.is_empty()).then_some(0))
                .map(|i| matches[i].clone()),
            supports_containers: container_match.is_some(),
        })
    }
}
