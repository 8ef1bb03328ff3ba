use std::cell::RefCell;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

use depdiag_core::{DependencyDiagram, Error, ErrorKind, LinkKind, Result};
use depdiag_render::{DiagramRenderer, HttpRenderClient, RenderClient, RenderConfig, Style};
use depdiag_yuml::EncodeOptions;
use pretty_assertions::assert_eq;

/// Records every request and answers with fixed bytes.
#[derive(Default)]
struct RecordingClient {
    calls: RefCell<Vec<(String, Style)>>,
}

impl RenderClient for RecordingClient {
    fn fetch(&self, notation: &str, style: Style) -> Result<Box<dyn Read>> {
        self.calls.borrow_mut().push((notation.to_string(), style));
        Ok(Box::new(Cursor::new(b"PNGDATA".to_vec())))
    }
}

struct UnreachableClient;

impl RenderClient for UnreachableClient {
    fn fetch(&self, _notation: &str, _style: Style) -> Result<Box<dyn Read>> {
        Err(Error::network("http://renderer.invalid/", "connection refused"))
    }
}

fn sample() -> DependencyDiagram {
    let mut diagram = DependencyDiagram::new();
    diagram.link("A", "B", "uses", LinkKind::Dependency).unwrap();
    diagram.get_or_create("Orphan").unwrap();
    diagram
}

/// Serve exactly one HTTP response on a local port; the handle yields the
/// raw request head.
fn serve_once(status_line: &'static str, body: &'static [u8]) -> (u16, JoinHandle<String>) {
    serve_once_after(Duration::ZERO, status_line, body)
}

/// Like `serve_once`, but waits `delay` after reading the request.
fn serve_once_after(
    delay: Duration,
    status_line: &'static str,
    body: &'static [u8],
) -> (u16, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        std::thread::sleep(delay);
        let response = format!(
            "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });
    (port, handle)
}

fn local_config(port: u16) -> RenderConfig {
    RenderConfig::new().with_url_template(format!("http://127.0.0.1:{port}/diagram/{{style}}/class/"))
}

#[test]
fn generate_uses_configured_style_and_writes_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let renderer = DiagramRenderer::with_client(
        RecordingClient::default(),
        RenderConfig::new().with_style(Style::Boring),
    );

    let written = renderer.generate(&sample(), &path).unwrap();
    assert_eq!(written, 7);
    assert_eq!(std::fs::read(&path).unwrap(), b"PNGDATA");
    assert_eq!(
        renderer.client().calls.borrow().as_slice(),
        &[("[A]uses->[B], ".to_string(), Style::Boring)]
    );
}

#[test]
fn style_shortcuts_and_encode_options() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = DiagramRenderer::with_client(RecordingClient::default(), RenderConfig::new())
        .with_encode_options(EncodeOptions::new().with_show_orphan_nodes(true));

    renderer
        .generate_scruffy(&sample(), dir.path().join("a.png"))
        .unwrap();
    renderer
        .generate_plain(&sample(), dir.path().join("b.png"))
        .unwrap();

    let calls = renderer.client().calls.borrow();
    assert_eq!(calls[0].1, Style::Scruffy);
    assert_eq!(calls[1].1, Style::Plain);
    assert_eq!(calls[0].0, "[A]uses->[B], [Orphan], ");
}

#[test]
fn client_failure_propagates_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let renderer = DiagramRenderer::with_client(UnreachableClient, RenderConfig::new());

    let err = renderer.generate(&sample(), &path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.operation(), "renderer::generate");
    assert!(!path.exists());
}

#[test]
fn sink_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.png");
    let renderer = DiagramRenderer::with_client(RecordingClient::default(), RenderConfig::new());

    let err = renderer.generate(&sample(), &path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn http_client_streams_response_to_file() {
    let (port, server) = serve_once("HTTP/1.1 200 OK", b"\x89PNG-body");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");

    let renderer = DiagramRenderer::http(local_config(port)).unwrap();
    let written = renderer.generate_scruffy(&sample(), &path).unwrap();

    assert_eq!(written, 9);
    assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG-body");
    let head = server.join().unwrap();
    assert!(head.starts_with("GET /diagram/scruffy/class/"), "{head}");
    assert!(head.contains("uses"), "{head}");
}

#[test]
fn http_404_is_not_found() {
    let (port, server) = serve_once("HTTP/1.1 404 Not Found", b"");
    let client = HttpRenderClient::new(&local_config(port)).unwrap();

    let err = client.fetch("[A]->[B], ", Style::Plain).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    server.join().unwrap();
}

#[test]
fn http_error_status_is_network() {
    let (port, server) = serve_once("HTTP/1.1 500 Internal Server Error", b"boom");
    let client = HttpRenderClient::new(&local_config(port)).unwrap();

    let err = client.fetch("[A]->[B], ", Style::Plain).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.context().iter().any(|(key, value)| *key == "status" && value == "500"));
    server.join().unwrap();
}

#[test]
fn refused_connection_is_network() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = HttpRenderClient::new(&local_config(port)).unwrap();

    let err = client.fetch("[A]->[B], ", Style::Plain).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.is_retryable());
}

#[test]
fn slow_renderer_is_waited_for() {
    // Longer than reqwest's default 30s request deadline.
    let (port, server) = serve_once_after(Duration::from_secs(35), "HTTP/1.1 200 OK", b"late");
    let client = HttpRenderClient::new(&local_config(port)).unwrap();

    let mut body = Vec::new();
    client
        .fetch("[A]->[B], ", Style::Plain)
        .unwrap()
        .read_to_end(&mut body)
        .unwrap();
    assert_eq!(body, b"late");
    server.join().unwrap();
}

#[test]
fn dropped_connection_is_network() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        drop(stream);
    });
    let client = HttpRenderClient::new(&local_config(port)).unwrap();

    let err = client.fetch("[A]->[B], ", Style::Plain).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.operation(), "render::fetch");
    server.join().unwrap();
}
