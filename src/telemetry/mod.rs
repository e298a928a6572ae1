//! Telemetry
//!
//! Structured logging goes through `tracing`. This module adds the debug
//! wire dumps.

pub mod diagnostics;

pub use diagnostics::{
    dump_request, dump_response, DiagnosticSink, DiagnosticTransport, InMemoryDiagnosticSink,
    TracingDiagnosticSink, WriterDiagnosticSink,
};
