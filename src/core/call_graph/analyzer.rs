// src/core/call_graph/analyzer.rs
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::core::Blacklist;
use crate::error::Result;
use super::super::languages::JavaPatterns;
use super::source_tree::{read_source, SourceTree};
use super::{
    AnalysisState, CallGraph, CallResolver, GraphSummary, PackageCollector, SourceScanner,
};

/// Runs the two scanning passes over a source tree.
///
/// An `Analyzer` carries only configuration; every call to
/// [`Analyzer::analyze_directory`] builds its tables from scratch, so one
/// instance can serve any number of runs.
pub struct Analyzer {
    config: AnalysisConfig,
    patterns: JavaPatterns,
    blacklist: Blacklist,
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub graph: CallGraph,
    pub summary: GraphSummary,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub analysis_time_ms: u128,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig, blacklist: Blacklist) -> Result<Self> {
        let patterns = JavaPatterns::new(&config.action_suffix)?;
        Ok(Self {
            config,
            patterns,
            blacklist,
        })
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn analyze_directory<P: AsRef<Path>>(&self, root: P) -> Result<AnalysisResult> {
        let start_time = Instant::now();
        let tree = SourceTree::new(
            root.as_ref(),
            self.config.source_extension.as_str(),
            self.config.follow_links,
        );
        info!("Analyzing {}", tree.root().display());

        // Pass one must finish before any call is resolved
        let files = tree.files()?;
        let project_packages = PackageCollector::new(&self.patterns).collect(&files);
        info!(
            "Pass 1: {} packages in {} source files",
            project_packages.len(),
            files.len()
        );

        let resolver = CallResolver::new(&self.patterns, &project_packages, &self.blacklist, &self.config);
        let scanner = SourceScanner::new(
            &self.patterns,
            &resolver,
            &self.blacklist,
            &self.config.action_suffix,
            self.config.annotation_lookback,
        );

        let mut state = AnalysisState::new();
        for path in tree.files()? {
            match read_source(&path) {
                Ok(content) => {
                    state.files_scanned += 1;
                    if let Some(class) = scanner.scan(&content, &mut state) {
                        debug!("{} -> {}", path.display(), class);
                    }
                }
                Err(e) => {
                    state.files_skipped += 1;
                    warn!("Error analyzing file {}: {}", path.display(), e);
                }
            }
        }

        let files_scanned = state.files_scanned;
        let files_skipped = state.files_skipped;
        let graph = CallGraph::assemble(state);
        let summary = graph.summary();
        let analysis_time_ms = start_time.elapsed().as_millis();

        info!(
            "Pass 2: {} classes, {} nodes ({} declared), {} links in {}ms",
            summary.classes, summary.nodes, summary.declared_nodes, summary.links, analysis_time_ms
        );
        if files_skipped > 0 {
            warn!("{} files could not be read and were skipped", files_skipped);
        }

        Ok(AnalysisResult {
            graph,
            summary,
            files_scanned,
            files_skipped,
            analysis_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_two_runs_share_nothing() {
        let first = tempfile::tempdir().unwrap();
        write(
            first.path(),
            "a/LoginAction.java",
            "package a;\npublic class LoginAction {\n    public void execute() { audit(); }\n}",
        );
        let second = tempfile::tempdir().unwrap();
        write(
            second.path(),
            "b/LogoutAction.java",
            "package b;\npublic class LogoutAction {\n    public void execute() {}\n}",
        );

        let analyzer = Analyzer::new(AnalysisConfig::default(), Blacklist::default()).unwrap();
        analyzer.analyze_directory(first.path()).unwrap();
        let result = analyzer.analyze_directory(second.path()).unwrap();

        let ids: Vec<_> = result.graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b.LogoutAction.execute"]);
        assert!(result.graph.links.is_empty());
        assert_eq!(result.files_scanned, 1);
    }

    #[test]
    fn test_missing_root_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = Analyzer::new(AnalysisConfig::default(), Blacklist::default()).unwrap();

        let result = analyzer.analyze_directory(dir.path().join("nope"));
        assert!(matches!(result, Err(AnalyzerError::RootUnreadable { .. })));
    }

    #[test]
    fn test_custom_suffix() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "web/LoginController.java",
            "package web;\npublic class LoginController {\n    public void handle() {}\n}",
        );

        let config = AnalysisConfig {
            action_suffix: "Controller".to_string(),
            ..AnalysisConfig::default()
        };
        let result = Analyzer::new(config, Blacklist::default())
            .unwrap()
            .analyze_directory(dir.path())
            .unwrap();

        assert!(result.graph.node("web.LoginController.handle").is_some());
        assert!(result.graph.classes[0].is_action);
    }
}
