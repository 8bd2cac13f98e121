// src/core/call_graph/package_collector.rs
use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::super::languages::JavaPatterns;
use super::source_tree::read_source;

/// Packages declared anywhere in the project. Read-only once collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPackages {
    names: BTreeSet<String>,
}

impl ProjectPackages {
    pub fn contains(&self, package: &str) -> bool {
        self.names.contains(package)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ProjectPackages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// First pass: gather every declared package name
pub struct PackageCollector<'a> {
    patterns: &'a JavaPatterns,
}

impl<'a> PackageCollector<'a> {
    pub fn new(patterns: &'a JavaPatterns) -> Self {
        Self { patterns }
    }

    pub fn collect(&self, files: &[PathBuf]) -> ProjectPackages {
        let mut names = BTreeSet::new();

        for path in files {
            match read_source(path) {
                Ok(content) => {
                    if let Some(package) = self.patterns.package_name(&content) {
                        names.insert(package.to_string());
                    }
                }
                Err(e) => warn!("Error collecting package from {}: {}", path.display(), e),
            }
        }

        debug!("Collected {} project packages", names.len());
        ProjectPackages { names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_packages_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("A.java");
        let b = dir.path().join("B.java");
        let c = dir.path().join("C.java");
        std::fs::write(&a, "package app.actions;\npublic class A {}").unwrap();
        std::fs::write(&b, "public class B {}").unwrap();
        std::fs::write(&c, "package app.helpers;\nclass C {}").unwrap();
        let missing = dir.path().join("Gone.java");

        let patterns = JavaPatterns::new("Action").unwrap();
        let packages = PackageCollector::new(&patterns).collect(&[a, b, missing, c]);

        assert_eq!(packages.len(), 2);
        assert!(packages.contains("app.actions"));
        assert!(packages.contains("app.helpers"));
        assert!(!packages.contains("app"));
    }
}
