// src/core/call_graph/call_resolver.rs
use std::collections::{BTreeSet, HashSet};

use crate::config::AnalysisConfig;
use crate::core::Blacklist;
use super::super::languages::JavaPatterns;
use super::{CallTarget, ProjectPackages};

/// What the resolver knows about the file a body came from
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub package_name: &'a str,
    pub class_name: &'a str,
    pub imports: &'a [String],
    /// Method names declared in the calling class
    pub local_methods: &'a BTreeSet<&'a str>,
}

/// Maps call names found in a method body to project methods.
///
/// Resolution is by name only: nothing checks that the target method exists.
pub struct CallResolver<'a> {
    patterns: &'a JavaPatterns,
    project_packages: &'a ProjectPackages,
    blacklist: &'a Blacklist,
    builtin_methods: HashSet<&'a str>,
    accessor_prefixes: &'a [String],
}

impl<'a> CallResolver<'a> {
    pub fn new(
        patterns: &'a JavaPatterns,
        project_packages: &'a ProjectPackages,
        blacklist: &'a Blacklist,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            patterns,
            project_packages,
            blacklist,
            builtin_methods: config.builtin_methods.iter().map(String::as_str).collect(),
            accessor_prefixes: &config.accessor_prefixes,
        }
    }

    /// Distinct targets called from `body`
    pub fn resolve_body(&self, body: &str, context: &ResolutionContext<'_>) -> BTreeSet<CallTarget> {
        self.patterns
            .call_names(body)
            .filter(|name| !self.is_ignored(name))
            .filter_map(|name| self.resolve(name, context))
            .collect()
    }

    /// Built-ins, accessors and blacklisted names never become edges
    pub fn is_ignored(&self, name: &str) -> bool {
        self.builtin_methods.contains(name)
            || self.accessor_prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
            || self.blacklist.contains(name)
    }

    pub fn resolve(&self, name: &str, context: &ResolutionContext<'_>) -> Option<CallTarget> {
        if context.local_methods.contains(name) {
            return Some(CallTarget::in_class(context.package_name, context.class_name, name));
        }

        if self.project_packages.contains(context.package_name) {
            return Some(CallTarget::in_package(context.package_name, name));
        }

        for import in context.imports {
            if let Some(package) = import.strip_suffix(".*") {
                if self.project_packages.contains(package) {
                    return Some(CallTarget::in_package(package, name));
                }
            } else if let Some(package) = import.strip_suffix(name).and_then(|p| p.strip_suffix('.')) {
                if self.project_packages.contains(package) {
                    return Some(CallTarget::in_package(package, name));
                }
            }
        }

        None
    }
}
