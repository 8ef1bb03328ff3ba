pub mod describe;
pub mod diagram;
pub mod entity;
pub mod pattern;
pub mod relation;

pub use depdiag_error::{Error, ErrorKind, Result};

pub use describe::Diagrammable;
pub use diagram::{DependencyDiagram, Edge};
pub use entity::{Entity, EntityId, normalize_name};
pub use pattern::pattern;
pub use relation::{LinkKind, RelationId, RelationKey, Relationship};
pub use regex::Regex;
