// src/core/call_graph/call_graph.rs - Graph model and assembly
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::super::languages::{AccessLevel, MethodDeclaration};

/// Package-level totals for packages that contain at least one Action class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub name: String,
    pub total_methods: usize,
    pub total_classes: usize,
    /// Packages this package calls into
    pub dependencies: BTreeSet<String>,
    /// Packages calling into this package
    pub dependents: BTreeSet<String>,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_methods: 0,
            total_classes: 0,
            dependencies: BTreeSet::new(),
            dependents: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub name: String,
    pub package_name: String,
    pub is_action: bool,
    pub super_class: Option<String>,
    pub interfaces: BTreeSet<String>,
    /// Every annotation in the file, not only the ones on the class
    pub annotations: BTreeSet<String>,
}

impl ClassRecord {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package_name, self.name)
    }
}

/// Fan-in and fan-out of a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStatistics {
    pub incoming_calls: usize,
    pub outgoing_calls: usize,
    pub called_by: BTreeSet<String>,
    pub calls: BTreeSet<String>,
}

/// Node in the call graph representing a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNode {
    /// `package.Class.method`, or `package.method` for same-package guesses
    pub id: String,
    pub package_name: String,
    pub class_name: String,
    pub method_name: String,
    pub is_action: bool,
    pub access_level: AccessLevel,
    pub is_static: bool,
    pub statistics: CallStatistics,
    pub annotations: BTreeSet<String>,
}

impl MethodNode {
    /// Node for a method declared in an Action class
    pub fn declared(class: &ClassRecord, declaration: &MethodDeclaration<'_>) -> Self {
        Self {
            id: format!("{}.{}", class.qualified_name(), declaration.name),
            package_name: class.package_name.clone(),
            class_name: class.name.clone(),
            method_name: declaration.name.to_string(),
            is_action: class.is_action,
            access_level: declaration.access_level,
            is_static: declaration.is_static,
            statistics: CallStatistics::default(),
            annotations: declaration.annotations.clone(),
        }
    }

    /// Node known only as a call target, with empty metadata
    pub fn synthesized(target: &CallTarget) -> Self {
        Self {
            id: target.id(),
            package_name: target.package_name.clone(),
            class_name: target.class_name.clone().unwrap_or_default(),
            method_name: target.method_name.clone(),
            is_action: false,
            access_level: AccessLevel::default(),
            is_static: false,
            statistics: CallStatistics::default(),
            annotations: BTreeSet::new(),
        }
    }
}

/// Resolved destination of a call
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallTarget {
    pub package_name: String,
    /// Known only when the call resolves to a method of the calling class
    pub class_name: Option<String>,
    pub method_name: String,
}

impl CallTarget {
    pub fn in_package(package_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            class_name: None,
            method_name: method_name.into(),
        }
    }

    pub fn in_class(
        package_name: impl Into<String>,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            class_name: Some(class_name.into()),
            method_name: method_name.into(),
        }
    }

    /// Split a dotted id at its last segment; the class is left unknown
    pub fn from_qualified(id: &str) -> Self {
        match id.rsplit_once('.') {
            Some((package, method)) => Self::in_package(package, method),
            None => Self::in_package(String::new(), id),
        }
    }

    pub fn id(&self) -> String {
        match (&self.class_name, self.package_name.is_empty()) {
            (Some(class), _) => format!("{}.{}.{}", self.package_name, class, self.method_name),
            (None, true) => self.method_name.clone(),
            (None, false) => format!("{}.{}", self.package_name, self.method_name),
        }
    }
}

/// Edge in the call graph, deduplicated per (source, target)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub source: String,
    pub target: String,
}

/// Tables filled while scanning a single tree. Owned by one run.
#[derive(Debug, Default)]
pub struct AnalysisState {
    packages: BTreeMap<String, PackageRecord>,
    classes: BTreeMap<String, ClassRecord>,
    nodes: BTreeMap<String, MethodNode>,
    calls: BTreeMap<String, BTreeSet<CallTarget>>,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an Action class; a later file with the same qualified name replaces it
    pub fn record_class(&mut self, class: ClassRecord) {
        self.packages
            .entry(class.package_name.clone())
            .or_insert_with(|| PackageRecord::new(class.package_name.clone()))
            .total_classes += 1;
        self.classes.insert(class.qualified_name(), class);
    }

    /// Register a declaration. Overloads share the first node but each one
    /// counts towards the package total.
    pub fn declare_method(&mut self, node: MethodNode) {
        if let Some(package) = self.packages.get_mut(&node.package_name) {
            package.total_methods += 1;
        }
        self.calls.entry(node.id.clone()).or_default();
        self.nodes.entry(node.id.clone()).or_insert(node);
    }

    pub fn add_calls(&mut self, source: &str, targets: impl IntoIterator<Item = CallTarget>) {
        self.calls.entry(source.to_string()).or_default().extend(targets);
    }

    pub fn node(&self, id: &str) -> Option<&MethodNode> {
        self.nodes.get(id)
    }

    pub fn calls_from(&self, source: &str) -> Option<&BTreeSet<CallTarget>> {
        self.calls.get(source)
    }
}

/// The complete graph, in the shape written to JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraph {
    pub packages: Vec<PackageRecord>,
    pub classes: Vec<ClassRecord>,
    pub nodes: Vec<MethodNode>,
    pub links: Vec<CallEdge>,
}

impl CallGraph {
    /// Close the node set over the call table and derive statistics.
    pub fn assemble(state: AnalysisState) -> Self {
        let AnalysisState {
            mut packages,
            classes,
            mut nodes,
            calls,
            ..
        } = state;

        let mut links = Vec::new();

        for (source, targets) in &calls {
            let source_package = {
                let node = nodes
                    .entry(source.clone())
                    .or_insert_with(|| MethodNode::synthesized(&CallTarget::from_qualified(source)));
                node.statistics.outgoing_calls = targets.len();
                node.statistics.calls = targets.iter().map(CallTarget::id).collect();
                node.package_name.clone()
            };

            for target in targets {
                let target_id = target.id();
                let node = nodes
                    .entry(target_id.clone())
                    .or_insert_with(|| MethodNode::synthesized(target));
                if node.statistics.called_by.insert(source.clone()) {
                    node.statistics.incoming_calls += 1;
                }

                if target.package_name != source_package {
                    if let Some(record) = packages.get_mut(&source_package) {
                        record.dependencies.insert(target.package_name.clone());
                    }
                    if let Some(record) = packages.get_mut(&target.package_name) {
                        record.dependents.insert(source_package.clone());
                    }
                }

                links.push(CallEdge {
                    source: source.clone(),
                    target: target_id,
                });
            }
        }

        links.sort();
        links.dedup();

        Self {
            packages: packages.into_values().collect(),
            classes: classes.into_values().collect(),
            nodes: nodes.into_values().collect(),
            links,
        }
    }

    pub fn node(&self, id: &str) -> Option<&MethodNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn package(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn has_link(&self, source: &str, target: &str) -> bool {
        self.links.iter().any(|l| l.source == source && l.target == target)
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            packages: self.packages.len(),
            classes: self.classes.len(),
            nodes: self.nodes.len(),
            declared_nodes: self.nodes.iter().filter(|n| n.is_action).count(),
            links: self.links.len(),
            max_in_degree: self.nodes.iter().map(|n| n.statistics.incoming_calls).max().unwrap_or(0),
            max_out_degree: self.nodes.iter().map(|n| n.statistics.outgoing_calls).max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub packages: usize,
    pub classes: usize,
    pub nodes: usize,
    pub declared_nodes: usize,
    pub links: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}
