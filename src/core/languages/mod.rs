//! Language-specific lexical matchers
//!
//! Only Java is understood. The matchers are regular expressions over raw
//! source text rather than a grammar, trading precision for speed.

mod java;

pub use java::{method_body, AccessLevel, ClassHeader, JavaPatterns, MethodDeclaration};
