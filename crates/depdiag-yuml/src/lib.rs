//! Encoding a `DependencyDiagram` as yUML class-diagram notation.
//!
//! Every edge becomes `[from]label->[to], ` (or `label-.->` for dashed
//! links), written source entity by source entity in creation order. The
//! separator after the final edge is part of the format, and a diagram
//! without edges encodes to the empty string.
//!
//! # Module Structure
//!
//! - [`yuml`]: notation primitives and the [`YumlBuilder`]

mod yuml;

use std::time::Instant;

use tracing::debug;

use depdiag_core::{DependencyDiagram, Diagrammable, Result};

pub use yuml::{SEPARATOR, YumlBuilder, write_entity, write_relation};

// ============================================================================
// Options
// ============================================================================

/// Options for notation encoding.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// If true, entities with no relationships at all are appended as
    /// `[name], ` after the edges.
    /// If false (default), only entities that take part in an edge appear.
    pub show_orphan_nodes: bool,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_orphan_nodes(mut self, show: bool) -> Self {
        self.show_orphan_nodes = show;
        self
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Encode the diagram with default options.
pub fn render_yuml(diagram: &DependencyDiagram) -> String {
    render_yuml_with_options(diagram, &EncodeOptions::default())
}

/// Encode the diagram.
///
/// Output depends only on the diagram's current state, so encoding an
/// unchanged diagram twice yields the same string.
pub fn render_yuml_with_options(diagram: &DependencyDiagram, options: &EncodeOptions) -> String {
    let render_start = Instant::now();
    let mut builder = YumlBuilder::with_capacity(diagram.relation_count());

    for edge in diagram.edges() {
        builder.edge(edge.from, edge.relation, edge.to);
    }

    if options.show_orphan_nodes {
        for entity in diagram.entities().filter(|e| e.is_isolated()) {
            builder.entity(entity).separator();
        }
    }

    let output = builder.build();
    debug!(
        bytes = output.len(),
        secs = render_start.elapsed().as_secs_f64(),
        "encoded yuml"
    );
    output
}

/// Shortcut from a domain object straight to notation.
pub trait ToYuml {
    fn to_yuml_string(&self) -> Result<String>;
}

impl<T: Diagrammable + ?Sized> ToYuml for T {
    fn to_yuml_string(&self) -> Result<String> {
        Ok(render_yuml(&self.to_diagram()?))
    }
}
