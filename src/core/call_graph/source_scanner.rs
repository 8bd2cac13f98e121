// src/core/call_graph/source_scanner.rs
use std::collections::BTreeSet;

use tracing::debug;

use crate::core::Blacklist;
use super::super::languages::JavaPatterns;
use super::{AnalysisState, CallResolver, ClassRecord, MethodNode, ResolutionContext};

/// Second pass: turns one Action file into class, node and call entries
pub struct SourceScanner<'a> {
    patterns: &'a JavaPatterns,
    resolver: &'a CallResolver<'a>,
    blacklist: &'a Blacklist,
    action_suffix: &'a str,
    annotation_lookback: usize,
}

impl<'a> SourceScanner<'a> {
    pub fn new(
        patterns: &'a JavaPatterns,
        resolver: &'a CallResolver<'a>,
        blacklist: &'a Blacklist,
        action_suffix: &'a str,
        annotation_lookback: usize,
    ) -> Self {
        Self {
            patterns,
            resolver,
            blacklist,
            action_suffix,
            annotation_lookback,
        }
    }

    /// Scan one file's content into `state`.
    ///
    /// Returns the qualified class name when the file declares an Action
    /// class inside a package; other files contribute nothing.
    pub fn scan(&self, content: &str, state: &mut AnalysisState) -> Option<String> {
        let package_name = self.patterns.package_name(content)?;
        let class_name = self.patterns.action_class(content)?;
        let imports = self.patterns.imports(content);
        let header = self.patterns.class_header(content);

        let class = ClassRecord {
            name: class_name.to_string(),
            package_name: package_name.to_string(),
            is_action: class_name.ends_with(self.action_suffix),
            super_class: header.super_class,
            interfaces: header.interfaces,
            annotations: self.patterns.annotations(content),
        };
        let qualified_name = class.qualified_name();
        state.record_class(class.clone());

        let declarations: Vec<_> = self
            .patterns
            .method_declarations(content, self.annotation_lookback)
            .into_iter()
            .filter(|declaration| !self.blacklist.contains(declaration.name))
            .collect();
        let local_methods: BTreeSet<&str> = declarations.iter().map(|d| d.name).collect();

        let context = ResolutionContext {
            package_name,
            class_name,
            imports: &imports,
            local_methods: &local_methods,
        };

        for declaration in &declarations {
            let node = MethodNode::declared(&class, declaration);
            let source = node.id.clone();
            state.declare_method(node);

            let targets = self.resolver.resolve_body(declaration.body, &context);
            debug!("{} calls {} project methods", source, targets.len());
            state.add_calls(&source, targets);
        }

        debug!("Scanned {} with {} declarations", qualified_name, declarations.len());
        Some(qualified_name)
    }
}
