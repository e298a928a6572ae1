//! Diagnostics
//!
//! Wire dumps of every request and response, written to a pluggable sink
//! when debug mode is on.

use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::core::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::NetworkError;

/// Destination for wire dumps.
pub trait DiagnosticSink: Send + Sync {
    /// Record one dump.
    fn record(&self, dump: &str) -> std::io::Result<()>;
}

/// Sink that emits dumps as `tracing` debug events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn record(&self, dump: &str) -> std::io::Result<()> {
        tracing::debug!(target: "mercadopago_client::wire", "\n{}", dump);
        Ok(())
    }
}

/// Sink writing dumps to any writer, e.g. stderr or a file.
pub struct WriterDiagnosticSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterDiagnosticSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WriterDiagnosticSink<std::io::Stderr> {
    /// Sink writing to standard error.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> DiagnosticSink for WriterDiagnosticSink<W> {
    fn record(&self, dump: &str) -> std::io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "writer lock poisoned"))?;
        writer.write_all(dump.as_bytes())?;
        writer.write_all(b"\n\n")?;
        writer.flush()
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct InMemoryDiagnosticSink {
    entries: Mutex<Vec<String>>,
}

impl InMemoryDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded dumps, in order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl DiagnosticSink for InMemoryDiagnosticSink {
    fn record(&self, dump: &str) -> std::io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "sink lock poisoned"))?
            .push(dump.to_string());
        Ok(())
    }
}

/// Render a request in HTTP/1.1 wire form.
pub fn dump_request(request: &HttpRequest) -> String {
    let (target, host) = match url::Url::parse(&request.url) {
        Ok(url) => {
            let mut target = url.path().to_string();
            if let Some(query) = url.query() {
                target.push('?');
                target.push_str(query);
            }
            let host = match (url.host_str(), url.port()) {
                (Some(host), Some(port)) => format!("{}:{}", host, port),
                (Some(host), None) => host.to_string(),
                _ => String::new(),
            };
            (target, host)
        }
        Err(_) => (request.url.clone(), String::new()),
    };

    let mut out = format!("{} {} HTTP/1.1\r\nHost: {}\r\n", request.method, target, host);
    push_headers(&mut out, request.headers.iter());
    out.push_str("\r\n");
    if let Some(body) = &request.body {
        out.push_str(body);
    }
    out
}

/// Render a response in HTTP/1.1 wire form.
pub fn dump_response(response: &HttpResponse) -> String {
    let mut out = format!("HTTP/1.1 {}\r\n", response.status_line());
    push_headers(&mut out, response.headers.iter());
    out.push_str("\r\n");
    out.push_str(&response.body);
    out
}

fn push_headers<'a>(out: &mut String, headers: impl Iterator<Item = (&'a String, &'a String)>) {
    let mut headers: Vec<_> = headers.collect();
    headers.sort();
    for (name, value) in headers {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("\r\n");
    }
}

/// Transport decorator that dumps traffic to a [`DiagnosticSink`].
///
/// A failing sink is logged and never fails the request.
pub struct DiagnosticTransport<T: HttpTransport + ?Sized = dyn HttpTransport> {
    inner: Arc<T>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<T: HttpTransport + ?Sized> DiagnosticTransport<T> {
    pub fn new(inner: Arc<T>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { inner, sink }
    }

    fn record(&self, kind: &'static str, dump: String) {
        if let Err(error) = self.sink.record(&dump) {
            tracing::warn!(%error, kind, "failed to write diagnostic dump");
        }
    }
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for DiagnosticTransport<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        self.record("request", dump_request(&request));

        let response = self.inner.send(request).await;
        match &response {
            Ok(response) => self.record("response", dump_response(response)),
            Err(error) => tracing::debug!(%error, "no response to dump"),
        }
        response
    }
}
