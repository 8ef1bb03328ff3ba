//! Render-and-save: encode, fetch, write.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use depdiag_core::{DependencyDiagram, Result};
use depdiag_yuml::{EncodeOptions, render_yuml_with_options};

use crate::client::{HttpRenderClient, RenderClient};
use crate::config::RenderConfig;
use crate::sink::FileSink;
use crate::style::Style;

/// Renders diagrams to image files through a [`RenderClient`].
#[derive(Debug, Clone)]
pub struct DiagramRenderer<C = HttpRenderClient> {
    client: C,
    config: RenderConfig,
    encode: EncodeOptions,
}

impl DiagramRenderer<HttpRenderClient> {
    /// Renderer talking HTTP to `config.url_template`.
    pub fn http(config: RenderConfig) -> Result<Self> {
        let client = HttpRenderClient::new(&config)?;
        Ok(Self::with_client(client, config))
    }
}

impl<C: RenderClient> DiagramRenderer<C> {
    pub fn with_client(client: C, config: RenderConfig) -> Self {
        Self {
            client,
            config,
            encode: EncodeOptions::default(),
        }
    }

    pub fn with_encode_options(mut self, encode: EncodeOptions) -> Self {
        self.encode = encode;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render in the configured style.
    pub fn generate(&self, diagram: &DependencyDiagram, path: impl AsRef<Path>) -> Result<u64> {
        self.generate_with_style(diagram, path, self.config.style)
    }

    pub fn generate_plain(&self, diagram: &DependencyDiagram, path: impl AsRef<Path>) -> Result<u64> {
        self.generate_with_style(diagram, path, Style::Plain)
    }

    pub fn generate_scruffy(
        &self,
        diagram: &DependencyDiagram,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        self.generate_with_style(diagram, path, Style::Scruffy)
    }

    /// Encode `diagram`, fetch its image in `style` and write it to `path`.
    ///
    /// Returns the number of bytes written. Client and sink errors are
    /// returned as-is with this operation appended.
    pub fn generate_with_style(
        &self,
        diagram: &DependencyDiagram,
        path: impl AsRef<Path>,
        style: Style,
    ) -> Result<u64> {
        let notation = render_yuml_with_options(diagram, &self.encode);
        self.render_notation(&notation, style, path.as_ref())
    }

    /// Fetch and save already-encoded notation.
    pub fn render_notation(&self, notation: &str, style: Style, path: &Path) -> Result<u64> {
        let render_start = Instant::now();
        let sink = FileSink::new(path).with_atomic(self.config.atomic_write);

        let mut response = self
            .client
            .fetch(notation, style)
            .map_err(|err| err.with_operation("renderer::generate"))?;
        let written = sink
            .write_from(&mut response)
            .map_err(|err| err.with_operation("renderer::generate"))?;

        info!(
            path = %path.display(),
            %style,
            written,
            secs = render_start.elapsed().as_secs_f64(),
            "diagram rendered"
        );
        Ok(written)
    }
}
