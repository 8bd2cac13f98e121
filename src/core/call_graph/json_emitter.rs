// src/core/call_graph/json_emitter.rs
use std::io::Write;

use crate::error::Result;
use super::CallGraph;

/// Writes the network document consumed by the visualisation front end:
/// `packages`, `classes`, `nodes` and `links`, in that order.
#[derive(Debug, Clone, Copy)]
pub struct JsonEmitter {
    pretty: bool,
}

impl JsonEmitter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn emit(&self, graph: &CallGraph) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(graph)?
        } else {
            serde_json::to_string(graph)?
        };
        Ok(json)
    }

    pub fn emit_to<W: Write>(&self, graph: &CallGraph, writer: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(writer, graph)?;
        } else {
            serde_json::to_writer(writer, graph)?;
        }
        Ok(())
    }
}

impl Default for JsonEmitter {
    fn default() -> Self {
        Self::new(true)
    }
}
