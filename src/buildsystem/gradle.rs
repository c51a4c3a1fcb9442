//! Gradle descriptor analysis (build.gradle, build.gradle.kts)
//!
//! Matching is a best-effort heuristic over the script text, not a Gradle
//! parser. Plugins applied through convention plugins, version catalogs or
//! `apply from:` scripts are not seen.

use super::{
    BuildSystemAnalyzer, BuildSystemId, DeclarationSite, PluginDeclaration, PluginMatch,
    GRADLE_CONTAINER_MIN_VERSION, LIBERTY_GRADLE_PLUGIN, LIBERTY_GROUP_ID,
};
use crate::error::DescriptorError;
use crate::version::satisfies_minimum;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

pub struct GradleAnalyzer;

fn apply_plugin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"apply\s*\(?\s*plugin\s*[:=]\s*['"](?:liberty|io\.openliberty\.tools\.gradle\.Liberty)['"]|\bid\s*\(?\s*['"]io\.openliberty\.tools\.gradle\.Liberty['"]"#,
        )
        .expect("valid regex")
    })
}

fn dependencies_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bdependencies\s*\{").expect("valid regex"))
}

fn group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bio\.openliberty\.tools\b").expect("valid regex"))
}

fn artifact_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(liberty-gradle-plugin|liberty-ant-tasks)\b").expect("valid regex")
    })
}

fn coordinate_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"io\.openliberty\.tools:(?:liberty-gradle-plugin|liberty-ant-tasks):([^:'"\s)]+)"#,
        )
        .expect("valid regex")
    })
}

fn map_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\bversion\s*[:=]\s*['"]([^'"]+)['"]"#).expect("valid regex"))
}

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?m)^\s*(?:def\s+|val\s+|ext\.|extra\.)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*['"]([^'"$]+)['"]"#,
        )
        .expect("valid regex")
    })
}

impl BuildSystemAnalyzer for GradleAnalyzer {
    fn id(&self) -> BuildSystemId {
        BuildSystemId::Gradle
    }

    fn descriptor_names(&self) -> &[&'static str] {
        &["build.gradle", "build.gradle.kts"]
    }

    fn min_container_version(&self) -> &'static str {
        GRADLE_CONTAINER_MIN_VERSION
    }

    /// Declarations count only when the script also applies the Liberty
    /// plugin; a dependency on the plugin alone does not enable dev mode.
    fn find_plugins(&self, content: &str) -> Result<Vec<PluginMatch>, DescriptorError> {
        let script = strip_comments(content);

        if !apply_plugin_re().is_match(&script) {
            debug!("Liberty Gradle plugin is not applied");
            return Ok(Vec::new());
        }

        let variables = collect_variables(&script);
        let mut matches = Vec::new();

        for block in dependency_blocks(&script) {
            for line in block.lines() {
                if !group_re().is_match(line) {
                    continue;
                }
                let Some(artifact) = artifact_re().captures(line).and_then(|c| c.get(1)) else {
                    continue;
                };

                let version = coordinate_version_re()
                    .captures(line)
                    .or_else(|| map_version_re().captures(line))
                    .and_then(|c| c.get(1))
                    .map(|v| resolve_variable(v.as_str(), &variables));

                debug!(
                    artifact = artifact.as_str(),
                    version = ?version,
                    "Found Liberty Gradle dependency"
                );

                matches.push(PluginMatch {
                    declaration: PluginDeclaration {
                        group_id: LIBERTY_GROUP_ID.to_string(),
                        artifact_id: artifact.as_str().to_string(),
                        version,
                    },
                    site: DeclarationSite::Dependencies,
                });
            }
        }

        Ok(matches)
    }

    /// Ant tasks versions follow their own scheme and never qualify.
    fn supports_containers(&self, declaration: &PluginDeclaration) -> bool {
        declaration.artifact_id == LIBERTY_GRADLE_PLUGIN
            && satisfies_minimum(declaration.version.as_deref(), GRADLE_CONTAINER_MIN_VERSION)
    }
}

/// Removes `//` and `/* */` comments outside string literals.
///
/// Newlines inside block comments are kept so line-oriented matching still
/// sees the original line structure.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || c == '\n' {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Bodies of every top-level `dependencies { }` block, nested ones included.
fn dependency_blocks(script: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut covered_until = 0;

    for m in dependencies_re().find_iter(script) {
        if m.start() < covered_until {
            continue;
        }

        let body_start = m.end();
        let mut depth = 1;
        let mut body_end = script.len();
        for (offset, c) in script[body_start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        body_end = body_start + offset;
                        break;
                    }
                }
                _ => {}
            }
        }

        blocks.push(&script[body_start..body_end]);
        covered_until = body_end;
    }

    blocks
}

/// Simple string assignments (`def x = '..'`, `ext.x = '..'`, `val x = ".."`).
fn collect_variables(script: &str) -> HashMap<String, String> {
    assignment_re()
        .captures_iter(script)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// Resolves `$name` / `${name}` against script variables.
fn resolve_variable(version: &str, variables: &HashMap<String, String>) -> String {
    let name = version
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .or_else(|| version.strip_prefix('$'));

    name.and_then(|n| variables.get(n))
        .cloned()
        .unwrap_or_else(|| version.to_string())
}
