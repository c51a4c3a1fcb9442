//! Natures stored in an Eclipse `.project` descriptor

use super::{NatureSet, NatureStore};
use crate::error::NatureError;
use crate::fs::FileSystem;
use crate::project::ProjectHandle;
use roxmltree::Document;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_METADATA_FILE: &str = ".project";

/// Reads and rewrites the `<natures>` block of a project's `.project` file
///
/// Everything outside `<natures>` is left byte-for-byte intact. A project
/// without a metadata file reads as having no natures; the file is created
/// on the first write.
pub struct EclipseProjectStore {
    fs: Arc<dyn FileSystem>,
    file_name: String,
}

impl EclipseProjectStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_file_name(fs, DEFAULT_METADATA_FILE)
    }

    pub fn with_file_name(fs: Arc<dyn FileSystem>, file_name: impl Into<String>) -> Self {
        Self {
            fs,
            file_name: file_name.into(),
        }
    }

    fn path(&self, project: &ProjectHandle) -> PathBuf {
        project.file(&self.file_name)
    }

    fn read(&self, path: &Path) -> Result<Option<String>, NatureError> {
        if !self.fs.exists(path) {
            return Ok(None);
        }
        self.fs
            .read_to_string(path)
            .map(Some)
            .map_err(|e| NatureError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

impl NatureStore for EclipseProjectStore {
    fn load(&self, project: &ProjectHandle) -> Result<NatureSet, NatureError> {
        let path = self.path(project);
        let Some(content) = self.read(&path)? else {
            return Ok(NatureSet::new());
        };

        let doc = Document::parse(&content).map_err(|e| NatureError::Malformed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let natures = doc
            .root_element()
            .children()
            .filter(|c| c.has_tag_name("natures"))
            .flat_map(|n| n.children().filter(|c| c.has_tag_name("nature")))
            .filter_map(|n| n.text())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .collect();

        Ok(natures)
    }

    fn store(&self, project: &ProjectHandle, natures: &NatureSet) -> Result<(), NatureError> {
        let path = self.path(project);
        let updated = match self.read(&path)? {
            Some(content) => splice_natures(&content, natures).map_err(|message| {
                NatureError::Malformed {
                    path: path.clone(),
                    message,
                }
            })?,
            None => new_descriptor(project.name(), natures),
        };

        debug!(path = %path.display(), natures = natures.len(), "Writing project natures");

        self.fs
            .write(&path, &updated)
            .map_err(|e| NatureError::WriteRejected {
                path: path.clone(),
                message: e.to_string(),
            })
    }
}

fn render_natures(natures: &NatureSet) -> String {
    let mut block = String::from("<natures>\n");
    for id in natures.iter() {
        block.push_str(&format!("\t\t<nature>{}</nature>\n", escape(id)));
    }
    block.push_str("\t</natures>");
    block
}

fn new_descriptor(name: &str, natures: &NatureSet) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <projectDescription>\n\
         \t<name>{}</name>\n\
         \t<comment></comment>\n\
         \t<projects>\n\
         \t</projects>\n\
         \t{}\n\
         </projectDescription>\n",
        escape(name),
        render_natures(natures)
    )
}

/// Replaces the existing `<natures>` element, or inserts one before the
/// closing `</projectDescription>` tag.
fn splice_natures(content: &str, natures: &NatureSet) -> Result<String, String> {
    let doc = Document::parse(content).map_err(|e| e.to_string())?;
    let root = doc.root_element();
    let block = render_natures(natures);

    if let Some(existing) = root.children().find(|c| c.has_tag_name("natures")) {
        let range = existing.range();
        return Ok(format!(
            "{}{}{}",
            &content[..range.start],
            block,
            &content[range.end..]
        ));
    }

    let root_range = root.range();
    let close = content[root_range.clone()]
        .rfind("</")
        .map(|offset| root_range.start + offset)
        .ok_or_else(|| "project description has no closing tag".to_string())?;

    Ok(format!(
        "{}\t{}\n{}",
        &content[..close],
        block,
        &content[close..]
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
