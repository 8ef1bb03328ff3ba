//! depdiag: build a dependency diagram, encode it as yUML, render it to an image.
//!
//! ```no_run
//! use depdiag::{DependencyDiagram, DiagramRenderer, LinkKind, RenderConfig, pattern};
//!
//! # fn main() -> depdiag::Result<()> {
//! let mut diagram = DependencyDiagram::new();
//! diagram.link("Service", "Repository", "uses", LinkKind::Dependency)?;
//! diagram.link("Repository", "Database", "", LinkKind::DependencyDashed)?;
//! diagram.set_color_where_name_matches(&pattern("^Data")?, "orange");
//!
//! assert_eq!(
//!     depdiag::render_yuml(&diagram),
//!     "[Service]uses->[Repository], [Repository]-.->[Database{bg:orange}], "
//! );
//!
//! DiagramRenderer::http(RenderConfig::default())?.generate_scruffy(&diagram, "layers.png")?;
//! # Ok(())
//! # }
//! ```

pub use depdiag_core::{
    DependencyDiagram, Diagrammable, Edge, Entity, EntityId, LinkKind, Regex, RelationId,
    RelationKey, Relationship, normalize_name, pattern,
};
pub use depdiag_error::{Error, ErrorKind, Result};
pub use depdiag_render::{
    DiagramRenderer, FileSink, HttpRenderClient, RenderClient, RenderConfig, Style, request_url,
};
pub use depdiag_yuml::{EncodeOptions, ToYuml, YumlBuilder, render_yuml, render_yuml_with_options};
