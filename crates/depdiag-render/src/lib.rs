//! Sending encoded diagrams to a yUML renderer and saving the image.
//!
//! The flow is: encode the diagram ([`depdiag_yuml`]) → fetch the image from a
//! [`RenderClient`] → stream it into a [`FileSink`]. [`DiagramRenderer`] wires
//! the three together. Failures propagate unchanged; nothing is retried.

pub mod client;
pub mod config;
pub mod renderer;
pub mod sink;
pub mod style;

pub use client::{HttpRenderClient, RenderClient, request_url};
pub use config::{DEFAULT_URL_TEMPLATE, RenderConfig, STYLE_PLACEHOLDER};
pub use renderer::DiagramRenderer;
pub use sink::FileSink;
pub use style::Style;
