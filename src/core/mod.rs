mod blacklist;
mod engine;

// Call graph analysis
pub mod call_graph;

// Language-specific matchers
pub mod languages;

pub use blacklist::{Blacklist, BlacklistStore};
pub use call_graph::{
    AnalysisResult, Analyzer, CallEdge, CallGraph, CallStatistics, ClassRecord, GraphSummary,
    JsonEmitter, MethodNode, PackageRecord,
};
pub use languages::AccessLevel;

// Export the main engine
pub use engine::Engine;
