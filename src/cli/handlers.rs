//! Subcommand handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 on error.

use super::commands::{ClassifyArgs, CompareArgs, ConfigArgs, InspectArgs, OutputFormatArg};
use super::output::{OutputFormatter, VersionComparison};
use crate::classify::Classifier;
use crate::config::DetectConfig;
use crate::project::ProjectHandle;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error, info};

pub fn handle_classify(args: &ClassifyArgs, quiet: bool) -> i32 {
    info!("Starting Liberty classification");

    let (config, project) = match prepare(args.project_path.as_ref()) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let classifier = Classifier::from_config(&config);
    let classification = match classifier.classify_detailed(&project, args.refresh) {
        Ok(classification) => classification,
        Err(e) => {
            error!("Classification failed: {:#}", anyhow::Error::new(e));
            return 1;
        }
    };

    emit(
        OutputFormatter::new(args.format.into()).format(&classification),
        quiet && args.format == OutputFormatArg::Human,
    )
}

pub fn handle_inspect(args: &InspectArgs, quiet: bool) -> i32 {
    let (config, project) = match prepare(args.project_path.as_ref()) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let classification = Classifier::from_config(&config).analyze(&project);

    emit(
        OutputFormatter::new(args.format.into()).format(&classification),
        quiet && args.format == OutputFormatArg::Human,
    )
}

pub fn handle_compare(args: &CompareArgs) -> i32 {
    let comparison = VersionComparison::new(&args.left, &args.right);
    debug!(?comparison, "Compared versions");

    emit(
        OutputFormatter::new(args.format.into()).format_comparison(&comparison),
        false,
    )
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = DetectConfig::default();
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return 1;
    }

    emit(
        OutputFormatter::new(args.format.into()).format_config(&config),
        false,
    )
}

/// Loads configuration and resolves the project directory
fn prepare(path: Option<&PathBuf>) -> Result<(DetectConfig, ProjectHandle)> {
    let config = DetectConfig::default();
    config.validate().context("Configuration error")?;

    let project_path = match path {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    debug!("Project path: {}", project_path.display());

    if !project_path.exists() {
        bail!("Project path does not exist: {}", project_path.display());
    }
    if !project_path.is_dir() {
        bail!("Project path is not a directory: {}", project_path.display());
    }

    let project_path = project_path
        .canonicalize()
        .context("Failed to canonicalize project path")?;

    Ok((config, ProjectHandle::from_path(project_path)))
}

fn emit(rendered: Result<String>, suppress: bool) -> i32 {
    match rendered {
        Ok(output) => {
            if !suppress {
                print!("{}", output);
                if !output.ends_with('\n') {
                    println!();
                }
            }
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_prepare_rejects_missing_path() {
        let err = prepare(Some(&PathBuf::from("/definitely/not/here"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    #[serial]
    fn test_prepare_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pom.xml");
        std::fs::write(&file, "<project/>").unwrap();

        let err = prepare(Some(&file)).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    #[serial]
    fn test_prepare_names_project_after_directory() {
        let dir = TempDir::new().unwrap();
        let project_dir = dir.path().join("inventory-service");
        std::fs::create_dir(&project_dir).unwrap();

        let (_, project) = prepare(Some(&project_dir)).unwrap();
        assert_eq!(project.name(), "inventory-service");
    }

    #[test]
    fn test_compare_exit_code() {
        let args = CompareArgs {
            left: "3.3-M1".to_string(),
            right: "3.2".to_string(),
            format: OutputFormatArg::Json,
        };
        assert_eq!(handle_compare(&args), 0);
    }
}
