//! Static call graphs for action-oriented Java web projects.
//!
//! Classes whose name ends in `Action` are treated as entry points. Their
//! methods become graph nodes, and the calls inside each method body are
//! resolved by name against the packages declared in the project. The result
//! is a JSON document of packages, classes, nodes and links.
//!
//! ```no_run
//! # async fn run() -> actiongraph::error::Result<()> {
//! use actiongraph::{config::Config, core::Engine};
//!
//! let engine = Engine::new(Config::default());
//! engine.set_blacklist(["log", "trace"]).await;
//! let json = engine.analyze("path/to/struts-app/src").await?;
//! # let _ = json;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

pub use crate::core::{Analyzer, Blacklist, CallGraph, Engine};
pub use crate::error::{AnalyzerError, Result};
