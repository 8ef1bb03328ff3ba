//! yUML notation primitives.

use depdiag_core::{Entity, LinkKind, Relationship};

/// Written after every edge, including the last one.
pub const SEPARATOR: &str = ", ";

/// Append `[name]` or `[name{bg:color}]`.
pub fn write_entity(output: &mut String, entity: &Entity) {
    output.push('[');
    output.push_str(entity.name());
    if let Some(color) = entity.color() {
        output.push_str("{bg:");
        output.push_str(color);
        output.push('}');
    }
    output.push(']');
}

/// Append the arrow for a relationship: `label->` or `label-.->`.
pub fn write_relation(output: &mut String, relation: &Relationship) {
    output.push_str(relation.label());
    output.push('-');
    if relation.kind() == LinkKind::DependencyDashed {
        output.push_str(".-");
    }
    output.push('>');
}

/// Incremental builder for a yUML class-diagram string.
pub struct YumlBuilder {
    output: String,
}

impl Default for YumlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl YumlBuilder {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Reserve room for roughly `edges` edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            output: String::with_capacity(edges * 48),
        }
    }

    /// Add `[name]` with no separator.
    pub fn entity(&mut self, entity: &Entity) -> &mut Self {
        write_entity(&mut self.output, entity);
        self
    }

    /// Add the arrow of `relation` with no separator.
    pub fn relation(&mut self, relation: &Relationship) -> &mut Self {
        write_relation(&mut self.output, relation);
        self
    }

    /// Add `[from]label->[to]` followed by the separator.
    pub fn edge(&mut self, from: &Entity, relation: &Relationship, to: &Entity) -> &mut Self {
        self.entity(from).relation(relation).entity(to).separator()
    }

    pub fn separator(&mut self) -> &mut Self {
        self.output.push_str(SEPARATOR);
        self
    }

    /// Finish building and return the notation string.
    pub fn build(self) -> String {
        self.output
    }
}
