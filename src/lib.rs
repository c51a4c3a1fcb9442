//! liberty-detect - Liberty dev-mode detection for Maven and Gradle projects
//!
//! Decides whether a project is configured to run in Open Liberty dev mode by
//! looking for the Liberty build plugin in its `pom.xml` or Gradle build
//! script, and records the answer as the Liberty nature in the project's
//! metadata so later lookups skip descriptor parsing.
//!
//! # Core Concepts
//!
//! - **Analyzers**: one per build system, each reporting the Liberty plugin
//!   declaration found in its descriptor
//! - **Natures**: capability tags persisted with a project; the Liberty nature
//!   caches a positive classification
//! - **Container dev mode**: supported from liberty-maven-plugin 3.3-M1 and
//!   liberty-gradle-plugin 3.1-M1 on
//!
//! # Example Usage
//!
//! ```no_run
//! use liberty_detect::{Classifier, DetectConfig, ProjectHandle};
//!
//! let classifier = Classifier::from_config(&DetectConfig::default());
//! let project = ProjectHandle::from_path("/work/inventory-service");
//!
//! match classifier.classify(&project, false) {
//!     Ok(true) => println!("Liberty dev mode"),
//!     Ok(false) => println!("not a Liberty project"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod buildsystem;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod nature;
pub mod project;
pub mod util;
pub mod version;

pub use buildsystem::{
    AnalyzerRegistry, BuildSystemAnalyzer, BuildSystemId, DeclarationSite, Detection,
    DevModeGate, PluginDeclaration, PluginMatch,
};
pub use classify::{Classification, ClassificationSource, Classifier, MarkerChange};
pub use config::{ConfigError, DetectConfig};
pub use error::{ClassifyError, DescriptorError, NatureError, VersionError};
pub use nature::{EclipseProjectStore, InMemoryNatureStore, NatureSet, NatureStore};
pub use project::ProjectHandle;
pub use util::{init_from_env, init_logging, LoggingConfig};
pub use version::Version;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
