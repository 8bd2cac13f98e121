// src/core/call_graph/source_tree.rs
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{AnalyzerError, Result};

/// The set of project source files under a root directory
pub struct SourceTree {
    root: PathBuf,
    extension: String,
    follow_links: bool,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>, follow_links: bool) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            follow_links,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and list every source file, sorted by path.
    ///
    /// Fails only when the root itself cannot be read. Unreadable entries
    /// below the root are logged and left out.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        std::fs::metadata(&self.root).map_err(|source| AnalyzerError::RootUnreadable {
            path: self.root.clone(),
            source,
        })?;

        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(AnalyzerError::RootUnreadable {
                        path: self.root.clone(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_source(entry.path()) {
                files.push(entry.into_path());
            }
        }

        debug!("Found {} .{} files under {}", files.len(), self.extension, self.root.display());
        Ok(files)
    }

    fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

/// Read a source file, replacing invalid UTF-8 rather than failing
pub fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app/actions")).unwrap();
        std::fs::write(dir.path().join("app/actions/LoginAction.java"), "").unwrap();
        std::fs::write(dir.path().join("app/actions/notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("Base.java"), "").unwrap();

        let files = SourceTree::new(dir.path(), "java", false).files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Base.java", "LoginAction.java"]);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourceTree::new(dir.path().join("missing"), "java", false).files();
        assert!(matches!(result, Err(AnalyzerError::RootUnreadable { .. })));
    }

    #[test]
    fn test_read_source_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Latin1.java");
        std::fs::write(&path, b"package app;\n// caf\xe9\n").unwrap();

        let content = read_source(&path).unwrap();
        assert!(content.starts_with("package app;"));
    }
}
