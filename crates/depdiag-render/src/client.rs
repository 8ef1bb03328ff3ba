//! Fetching rendered images from a yUML service.

use std::io::Read;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use depdiag_core::{Error, ErrorKind, Result};

use crate::config::{RenderConfig, STYLE_PLACEHOLDER};
use crate::style::Style;

/// Turns encoded notation into an image byte stream.
pub trait RenderClient {
    fn fetch(&self, notation: &str, style: Style) -> Result<Box<dyn Read>>;
}

/// Build the request target: the template with its style placeholder
/// substituted, followed by the notation exactly as encoded.
pub fn request_url(template: &str, style: Style, notation: &str) -> String {
    let mut url = template.replace(STYLE_PLACEHOLDER, style.as_str());
    url.push_str(notation);
    url
}

/// Blocking HTTP GET against a yUML-compatible endpoint.
#[derive(Debug, Clone)]
pub struct HttpRenderClient {
    url_template: String,
    client: Client,
}

impl HttpRenderClient {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        // No environment-driven configuration, proxy variables included.
        // No deadline either: a slow renderer is waited for.
        let client = Client::builder()
            .no_proxy()
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| {
                Error::new(ErrorKind::Network, err.to_string())
                    .with_operation("render::client")
                    .set_source(err)
            })?;
        Ok(Self {
            url_template: config.url_template.clone(),
            client,
        })
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }
}

impl RenderClient for HttpRenderClient {
    fn fetch(&self, notation: &str, style: Style) -> Result<Box<dyn Read>> {
        let url = request_url(&self.url_template, style, notation);
        debug!(url = url.as_str(), %style, "requesting diagram");

        let response = self.client.get(url.as_str()).send().map_err(|err| {
            warn!(url = url.as_str(), error = %err, "render request failed");
            Error::network(url.as_str(), err.to_string())
                .with_operation("render::fetch")
                .set_source(err)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(url = url.as_str(), "renderer returned 404");
            return Err(Error::not_found(url).with_operation("render::fetch"));
        }
        if !status.is_success() {
            warn!(url = url.as_str(), %status, "renderer returned an error status");
            return Err(Error::network(url, format!("renderer answered {status}"))
                .with_operation("render::fetch")
                .with_context("status", status.as_str()));
        }

        Ok(Box::new(response))
    }
}
