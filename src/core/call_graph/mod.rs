// src/core/call_graph/mod.rs
//! Static call graph extraction for action-oriented Java projects
//!
//! Two passes over the source tree: the first collects every declared
//! package, the second scans files whose public class carries the action
//! suffix, declares their methods as nodes and resolves the calls in each
//! method body by name against the collected packages. The resulting tables
//! are closed into a graph and serialized as one JSON document.

mod analyzer;
mod call_graph;
mod call_resolver;
mod json_emitter;
mod package_collector;
mod source_scanner;
mod source_tree;

pub use analyzer::{AnalysisResult, Analyzer};
pub use call_graph::{
    AnalysisState, CallEdge, CallGraph, CallStatistics, CallTarget, ClassRecord, GraphSummary,
    MethodNode, PackageRecord,
};
pub use call_resolver::{CallResolver, ResolutionContext};
pub use json_emitter::JsonEmitter;
pub use package_collector::{PackageCollector, ProjectPackages};
pub use source_scanner::SourceScanner;
pub use source_tree::{read_source, SourceTree};
