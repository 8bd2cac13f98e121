// src/core/languages/java.rs - Lexical matchers for Java sources
//
// Known limitations of the pattern approach, all accepted:
// - nested and secondary classes are folded into the file's Action class
// - generic return types or type parameters can hide the access modifier
// - a declaration without a body (abstract, interface) borrows the next `{` as its body
// - braces inside string literals or comments are counted when delimiting bodies
use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Words that look like identifiers to the patterns but never name a method
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "break", "case", "catch", "class", "continue", "default", "do",
    "else", "enum", "extends", "final", "finally", "for", "if", "implements", "import",
    "instanceof", "interface", "native", "new", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "synchronized", "this", "throw", "throws", "try",
    "volatile", "while", "yield",
];

/// Access level of a declared method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
    #[default]
    PackagePrivate,
}

impl AccessLevel {
    fn from_modifiers(modifiers: &str) -> Self {
        let mut words = modifiers.split_whitespace();
        match words.find(|w| matches!(*w, "public" | "protected" | "private")) {
            Some("public") => AccessLevel::Public,
            Some("protected") => AccessLevel::Protected,
            Some("private") => AccessLevel::Private,
            _ => AccessLevel::PackagePrivate,
        }
    }
}

/// Supertype information taken from the first class declaration in a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassHeader {
    pub super_class: Option<String>,
    pub interfaces: BTreeSet<String>,
}

/// A method declaration found by the declaration pattern
#[derive(Debug, Clone)]
pub struct MethodDeclaration<'a> {
    pub name: &'a str,
    pub access_level: AccessLevel,
    pub is_static: bool,
    /// Annotations found in the lookback window before the declaration
    pub annotations: BTreeSet<String>,
    /// Text between the body's braces, empty when unbalanced
    pub body: &'a str,
    /// Byte offset of the match in the file
    pub offset: usize,
}

/// Compiled pattern set used by both scanning passes
pub struct JavaPatterns {
    package_regex: Regex,
    action_class_regex: Regex,
    import_regex: Regex,
    class_regex: Regex,
    annotation_regex: Regex,
    method_regex: Regex,
    call_regex: Regex,
}

impl JavaPatterns {
    pub fn new(action_suffix: &str) -> Result<Self> {
        Ok(Self {
            package_regex: Regex::new(r"package\s+([\w.]+)\s*;")?,
            action_class_regex: Regex::new(&format!(
                r"public\s+(?:(?:abstract|final)\s+)*(?:class|interface)\s+(\w*{})\b",
                regex::escape(action_suffix)
            ))?,
            import_regex: Regex::new(r"import\s+([\w.]+\*?)\s*;")?,
            class_regex: Regex::new(
                r"(?:public|protected|private)?\s+(?:abstract\s+)?class\s+(\w+)(?:\s+extends\s+(\w+))?(?:\s+implements\s+([^{]+))?",
            )?,
            annotation_regex: Regex::new(r"@(\w+)(?:\([^)]*\))?")?,
            method_regex: Regex::new(
                r"(?P<mods>(?:\b(?:public|protected|private|static|final|abstract|synchronized|native|strictfp)\s+)*)(?:(?P<ret>[\w.<>\[\]?]+)\s+)?(?P<name>\w+)\s*\([^)]*\)",
            )?,
            call_regex: Regex::new(r"\b(\w+)\s*\(")?,
        })
    }

    /// Declared package, if any
    pub fn package_name<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.package_regex
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Name of the first public class or interface carrying the action suffix
    pub fn action_class<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.action_class_regex
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Import targets in file order, wildcards keep their `.*`
    pub fn imports(&self, content: &str) -> Vec<String> {
        let mut imports: Vec<String> = Vec::new();
        for caps in self.import_regex.captures_iter(content) {
            let import = caps[1].to_string();
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
        imports
    }

    pub fn class_header(&self, content: &str) -> ClassHeader {
        let Some(caps) = self.class_regex.captures(content) else {
            return ClassHeader::default();
        };

        let interfaces = caps
            .get(3)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        ClassHeader {
            super_class: caps.get(2).map(|m| m.as_str().to_string()),
            interfaces,
        }
    }

    /// Annotation names (without `@`) anywhere in the given text
    pub fn annotations(&self, text: &str) -> BTreeSet<String> {
        self.annotation_regex
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Every declaration-shaped match in the file, in source order
    pub fn method_declarations<'a>(&self, content: &'a str, lookback: usize) -> Vec<MethodDeclaration<'a>> {
        let mut declarations = Vec::new();

        for caps in self.method_regex.captures_iter(content) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            let modifiers = caps.name("mods").map_or("", |m| m.as_str());
            let return_type = caps.name("ret").map(|m| m.as_str());

            // A bare call statement has neither modifiers nor a type in front of it
            if modifiers.is_empty() && return_type.is_none() {
                continue;
            }
            if is_keyword(name.as_str()) || return_type.is_some_and(is_keyword) {
                continue;
            }

            let window_start = floor_char_boundary(content, whole.start().saturating_sub(lookback));
            declarations.push(MethodDeclaration {
                name: name.as_str(),
                access_level: AccessLevel::from_modifiers(modifiers),
                is_static: modifiers.split_whitespace().any(|w| w == "static"),
                annotations: self.annotations(&content[window_start..whole.start()]),
                body: method_body(content, whole.end()),
                offset: whole.start(),
            });
        }

        declarations
    }

    /// Identifiers directly followed by an argument list
    pub fn call_names<'a>(&'a self, body: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.call_regex
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| !is_keyword(name) && !name.starts_with(|c: char| c.is_ascii_digit()))
    }
}

/// Body of the first brace block starting at or after `from`.
///
/// Returns an empty string when there is no opening brace or the block never
/// closes.
pub fn method_body(content: &str, from: usize) -> &str {
    let Some(open) = content[from..].find('{').map(|i| from + i) else {
        return "";
    };

    let mut depth = 0usize;
    for (i, byte) in content.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return &content[open + 1..open + i];
                }
            }
            _ => {}
        }
    }

    ""
}

fn is_keyword(word: &str) -> bool {
    JAVA_KEYWORDS.contains(&word)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> JavaPatterns {
        JavaPatterns::new("Action").unwrap()
    }

    const LOGIN_ACTION: &str = r#"package app.actions;

import app.services.*;
import app.util.Formatter;
import java.io.Serializable;

@Controller
public class LoginAction extends BaseAction implements Serializable, Auditable {

    @Override
    public String execute() {
        this.validate();
        System.out.println(msg);
        return "success";
    }

    private static void validate() {
        if (user == null) {
            throw new IllegalStateException("no user");
        }
    }
}
"#;

    #[test]
    fn test_package_and_action_class() {
        let p = patterns();
        assert_eq!(p.package_name(LOGIN_ACTION), Some("app.actions"));
        assert_eq!(p.action_class(LOGIN_ACTION), Some("LoginAction"));
        assert_eq!(p.action_class("public class LoginActionForm {}"), None);
        assert_eq!(p.action_class("public class LoginService {}"), None);
        assert_eq!(p.action_class("public interface AuditAction {}"), Some("AuditAction"));
    }

    #[test]
    fn test_imports_keep_order_and_wildcards() {
        assert_eq!(
            patterns().imports(LOGIN_ACTION),
            vec!["app.services.*", "app.util.Formatter", "java.io.Serializable"]
        );
    }

    #[test]
    fn test_class_header() {
        let header = patterns().class_header(LOGIN_ACTION);
        assert_eq!(header.super_class.as_deref(), Some("BaseAction"));
        assert_eq!(
            header.interfaces.into_iter().collect::<Vec<_>>(),
            vec!["Auditable", "Serializable"]
        );
    }

    #[test]
    fn test_file_annotations_collapse() {
        let annotations = patterns().annotations(LOGIN_ACTION);
        assert!(annotations.contains("Controller"));
        assert!(annotations.contains("Override"));
    }

    #[test]
    fn test_method_declarations() {
        let p = patterns();
        let methods = p.method_declarations(LOGIN_ACTION, 200);
        let names: Vec<_> = methods.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["execute", "validate"]);

        let execute = &methods[0];
        assert_eq!(execute.access_level, AccessLevel::Public);
        assert!(!execute.is_static);
        assert!(execute.annotations.contains("Override"));
        assert!(execute.body.contains("this.validate()"));

        let validate = &methods[1];
        assert_eq!(validate.access_level, AccessLevel::Private);
        assert!(validate.is_static);
        assert!(validate.body.contains("throw new IllegalStateException"));
    }

    #[test]
    fn test_lookback_window_is_bounded() {
        let p = patterns();
        let padding = " ".repeat(300);
        let source = format!("@Deprecated{}public void run() {{}}", padding);
        let methods = p.method_declarations(&source, 200);
        assert_eq!(methods.len(), 1);
        assert!(methods[0].annotations.is_empty());

        let methods = p.method_declarations(&source, 400);
        assert!(methods[0].annotations.contains("Deprecated"));
    }

    #[test]
    fn test_package_private_declaration() {
        let methods = patterns().method_declarations("class A {\n    String render(int x) { return x; }\n}", 200);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "render");
        assert_eq!(methods[0].access_level, AccessLevel::PackagePrivate);
    }

    #[test]
    fn test_call_statements_are_not_declarations() {
        let source = "void run() {\n    doWork(a);\n    return helper(b);\n    Foo f = new Foo(c);\n}";
        let names: Vec<_> = patterns()
            .method_declarations(source, 200)
            .iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["run"]);
    }

    #[test]
    fn test_method_body_balances_braces() {
        let source = "void a() { if (x) { y(); } z(); } void b() {}";
        assert_eq!(method_body(source, 0), " if (x) { y(); } z(); ");
    }

    #[test]
    fn test_unbalanced_body_is_empty() {
        assert_eq!(method_body("void a() { if (x) { y();", 0), "");
        assert_eq!(method_body("abstract void a();", 0), "");
    }

    #[test]
    fn test_call_names_skip_keywords() {
        let p = patterns();
        let names: Vec<_> = p
            .call_names("if (ok) { this.validate(); save(load(id)); } while (x) {}")
            .collect();
        assert_eq!(names, vec!["validate", "save", "load"]);
    }

    #[test]
    fn test_access_level_serializes_like_an_enum_constant() {
        assert_eq!(serde_json::to_string(&AccessLevel::PackagePrivate).unwrap(), "\"PACKAGE_PRIVATE\"");
        assert_eq!(serde_json::to_string(&AccessLevel::Public).unwrap(), "\"PUBLIC\"");
    }
}
