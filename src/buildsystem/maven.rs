//! Maven descriptor analysis (pom.xml)

use super::{
    BuildSystemAnalyzer, BuildSystemId, DeclarationSite, PluginDeclaration, PluginMatch,
    LIBERTY_GROUP_ID, LIBERTY_MAVEN_PLUGIN, MAVEN_CONTAINER_MIN_VERSION,
};
use crate::error::DescriptorError;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use tracing::debug;

pub struct MavenAnalyzer;

impl BuildSystemAnalyzer for MavenAnalyzer {
    fn id(&self) -> BuildSystemId {
        BuildSystemId::Maven
    }

    fn descriptor_names(&self) -> &[&'static str] {
        &["pom.xml"]
    }

    fn min_container_version(&self) -> &'static str {
        MAVEN_CONTAINER_MIN_VERSION
    }

    /// Searches `<build>`, then `<build>/<pluginManagement>`, then every
    /// profile's `<build>` in document order.
    ///
    /// Declarations under `<pluginManagement>` count even though managed
    /// plugins are not necessarily applied: parent POMs that only manage the
    /// Liberty plugin are still reported as Liberty projects.
    fn find_plugins(&self, content: &str) -> Result<Vec<PluginMatch>, DescriptorError> {
        let doc = Document::parse(content)?;
        let project = doc.root_element();
        let properties = collect_properties(project);

        let mut matches = Vec::new();

        if let Some(build) = child(project, "build") {
            collect_plugins(child(build, "plugins"), DeclarationSite::Build, &mut matches);
            collect_plugins(
                child(build, "pluginManagement").and_then(|pm| child(pm, "plugins")),
                DeclarationSite::PluginManagement,
                &mut matches,
            );
        }

        for profile in children(project, "profiles").flat_map(|p| children(p, "profile")) {
            let Some(build) = child(profile, "build") else {
                continue;
            };
            let site = DeclarationSite::Profile {
                id: child_text(profile, "id"),
            };

            collect_plugins(child(build, "plugins"), site.clone(), &mut matches);
            collect_plugins(
                child(build, "pluginManagement").and_then(|pm| child(pm, "plugins")),
                site,
                &mut matches,
            );
        }

        for m in &mut matches {
            if let Some(version) = m.declaration.version.take() {
                m.declaration.version = Some(interpolate(&version, &properties));
            }
            debug!(
                site = ?m.site,
                version = ?m.declaration.version,
                "Found liberty-maven-plugin declaration"
            );
        }

        Ok(matches)
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| c.has_tag_name(name))
}

fn child_text(node: Node, name: &str) -> Option<String> {
    child(node, name)
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn collect_plugins(plugins: Option<Node>, site: DeclarationSite, out: &mut Vec<PluginMatch>) {
    let Some(plugins) = plugins else {
        return;
    };

    for plugin in children(plugins, "plugin") {
        let group_id = child_text(plugin, "groupId");
        let artifact_id = child_text(plugin, "artifactId");

        if group_id.as_deref() == Some(LIBERTY_GROUP_ID)
            && artifact_id.as_deref() == Some(LIBERTY_MAVEN_PLUGIN)
        {
            out.push(PluginMatch {
                declaration: PluginDeclaration {
                    group_id: LIBERTY_GROUP_ID.to_string(),
                    artifact_id: LIBERTY_MAVEN_PLUGIN.to_string(),
                    version: child_text(plugin, "version"),
                },
                site: site.clone(),
            });
        }
    }
}

/// Top-level `<properties>` plus `project.version`.
fn collect_properties(project: Node) -> HashMap<String, String> {
    let mut properties: HashMap<String, String> = child(project, "properties")
        .into_iter()
        .flat_map(|p| p.children().filter(|c| c.is_element()))
        .map(|p| {
            let value = p.text().map(str::trim).unwrap_or_default();
            (p.tag_name().name().to_string(), value.to_string())
        })
        .collect();

    let project_version = child_text(project, "version")
        .or_else(|| child(project, "parent").and_then(|parent| child_text(parent, "version")));
    if let Some(version) = project_version {
        properties.insert("project.version".to_string(), version);
    }

    properties
}

/// Resolves a whole-value `${name}` reference; anything else is returned as is.
fn interpolate(value: &str, properties: &HashMap<String, String>) -> String {
    value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .and_then(|name| properties.get(name))
        .cloned()
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildsystem::{DevModeGate, Detection};

    fn pom(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>demo</artifactId>
    <version>1.0-SNAPSHOT</version>
    {}
</project>"#,
            body
        )
    }

    fn liberty_plugin(version: Option<&str>) -> String {
        let version = version
            .map(|v| format!("<version>{}</version>", v))
            .unwrap_or_default();
        format!(
            "<plugin><groupId>io.openliberty.tools</groupId><artifactId>liberty-maven-plugin</artifactId>{}</plugin>",
            version
        )
    }

    fn detect(content: &str, gate: DevModeGate) -> Detection {
        MavenAnalyzer.detect(content, gate).unwrap()
    }

    #[test]
    fn test_plugin_under_build() {
        let content = pom(&format!(
            r#"<build><plugins>
                <plugin><groupId>org.apache.maven.plugins</groupId><artifactId>maven-war-plugin</artifactId><version>3.3.2</version></plugin>
                {}
            </plugins></build>"#,
            liberty_plugin(Some("3.10"))
        ));

        let detection = detect(&content, DevModeGate::Plugin);
        assert!(detection.found);
        assert!(detection.supports_containers);
        assert_eq!(detection.version(), Some("3.10"));
        assert_eq!(detection.plugin.unwrap().site, DeclarationSite::Build);
    }

    #[test]
    fn test_plugin_in_plugin_management() {
        let content = pom(&format!(
            "<build><pluginManagement><plugins>{}</plugins></pluginManagement></build>",
            liberty_plugin(Some("3.3.4"))
        ));

        let detection = detect(&content, DevModeGate::Plugin);
        assert!(detection.found);
        assert_eq!(
            detection.plugin.unwrap().site,
            DeclarationSite::PluginManagement
        );
    }

    #[test]
    fn test_plugin_in_profile() {
        let content = pom(&format!(
            r#"<profiles>
                <profile><id>ci</id></profile>
                <profile><id>liberty</id><build><plugins>{}</plugins></build></profile>
            </profiles>"#,
            liberty_plugin(Some("3.4"))
        ));

        let detection = detect(&content, DevModeGate::Container);
        assert!(detection.found);
        assert_eq!(
            detection.plugin.unwrap().site,
            DeclarationSite::Profile {
                id: Some("liberty".to_string())
            }
        );
    }

    #[test]
    fn test_build_wins_over_profile() {
        let content = pom(&format!(
            "<profiles><profile><id>p</id><build><plugins>{}</plugins></build></profile></profiles>\
             <build><plugins>{}</plugins></build>",
            liberty_plugin(Some("3.5")),
            liberty_plugin(Some("3.6"))
        ));

        let matches = MavenAnalyzer.find_plugins(&content).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].site, DeclarationSite::Build);
        assert_eq!(matches[0].declaration.version.as_deref(), Some("3.6"));
    }

    #[test]
    fn test_missing_version_is_container_compatible() {
        let content = pom(&format!("<build><plugins>{}</plugins></build>", liberty_plugin(None)));

        let detection = detect(&content, DevModeGate::Container);
        assert!(detection.found);
        assert_eq!(detection.version(), None);
    }

    #[test]
    fn test_old_version_fails_container_gate_only() {
        let content = pom(&format!(
            "<build><plugins>{}</plugins></build>",
            liberty_plugin(Some("3.2"))
        ));

        assert!(detect(&content, DevModeGate::Plugin).found);

        let detection = detect(&content, DevModeGate::Container);
        assert!(!detection.found);
        assert!(!detection.supports_containers);
        assert_eq!(detection.version(), Some("3.2"));
    }

    #[test]
    fn test_container_gate_keeps_searching() {
        let content = pom(&format!(
            "<build><plugins>{}</plugins></build>\
             <profiles><profile><id>new</id><build><plugins>{}</plugins></build></profile></profiles>",
            liberty_plugin(Some("3.0")),
            liberty_plugin(Some("3.3-M1"))
        ));

        let detection = detect(&content, DevModeGate::Container);
        assert!(detection.found);
        assert_eq!(detection.version(), Some("3.3-M1"));
    }

    #[test]
    fn test_property_version_is_resolved() {
        let content = pom(&format!(
            "<properties><liberty.plugin.version>3.8.2</liberty.plugin.version></properties>\
             <build><plugins>{}</plugins></build>",
            liberty_plugin(Some("${liberty.plugin.version}"))
        ));

        let detection = detect(&content, DevModeGate::Container);
        assert!(detection.found);
        assert_eq!(detection.version(), Some("3.8.2"));
    }

    #[test]
    fn test_unresolved_property_fails_closed() {
        let content = pom(&format!(
            "<build><plugins>{}</plugins></build>",
            liberty_plugin(Some("${undefined.version}"))
        ));

        assert!(detect(&content, DevModeGate::Plugin).found);
        assert!(!detect(&content, DevModeGate::Container).found);
    }

    #[test]
    fn test_other_group_is_ignored() {
        let content = pom(
            "<build><plugins><plugin><groupId>net.wasdev.wlp.maven.plugins</groupId>\
             <artifactId>liberty-maven-plugin</artifactId></plugin></plugins></build>",
        );

        assert!(!detect(&content, DevModeGate::Plugin).found);
    }

    #[test]
    fn test_dependency_mentions_are_ignored() {
        let content = pom(
            "<dependencies><dependency><groupId>io.openliberty.tools</groupId>\
             <artifactId>liberty-maven-plugin</artifactId></dependency></dependencies>",
        );

        assert!(!detect(&content, DevModeGate::Plugin).found);
    }

    #[test]
    fn test_malformed_xml() {
        let err = MavenAnalyzer
            .detect("<project><build></project>", DevModeGate::Plugin)
            .unwrap_err();
        assert!(matches!(err, DescriptorError::Malformed(_)));
    }

    #[test]
    fn test_interpolate() {
        let mut properties = HashMap::new();
        properties.insert("v".to_string(), "3.4".to_string());

        assert_eq!(interpolate("${v}", &properties), "3.4");
        assert_eq!(interpolate("${w}", &properties), "${w}");
        assert_eq!(interpolate("3.1", &properties), "3.1");
    }
}
