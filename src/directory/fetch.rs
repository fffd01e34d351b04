//! Fetch tickets, request context and response decoding.
//!
//! Zellij performs web requests on the host and reports the result through a
//! `WebRequestResult` event that echoes back a string context map. The
//! request's [`FetchTicket`] rides in that map, together with the trace
//! context of the span that issued it, so the result can be matched to the
//! request and linked to its trace.

use crate::domain::{FetchFailure, UserRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Context key carrying the fetch ticket.
const TICKET_KEY: &str = "rollcall_ticket";
/// Context key carrying the OpenTelemetry trace id.
const TRACE_ID_KEY: &str = "trace_id";
/// Context key carrying the parent span id.
const PARENT_SPAN_KEY: &str = "parent_span_id";

/// Result of one directory request.
pub type FetchOutcome = std::result::Result<Vec<UserRecord>, FetchFailure>;

/// Identifies one directory request.
///
/// Tickets are minted in increasing order by the directory store; only the
/// ticket currently in flight may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Extracts the ticket from a web request context map.
    ///
    /// Returns `None` for results that were not issued by this plugin.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        context
            .get(TICKET_KEY)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Self)
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Distributed tracing context carried across the host round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the request, as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry context is active, which is
    /// the case whenever tracing has not been initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Reads a trace context previously written by [`FetchRequest::context`].
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(TRACE_ID_KEY)?.clone(),
            parent_span_id: context.get(PARENT_SPAN_KEY)?.clone(),
        })
    }

    /// Makes the issuing span the remote parent of spans created while the
    /// returned guard is alive.
    ///
    /// Returns `None` if the ids are not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// A directory request ready to be issued by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub endpoint: String,
    pub ticket: FetchTicket,
    pub trace_context: Option<TraceContext>,
}

impl FetchRequest {
    /// Builds a request and captures the current trace context.
    #[must_use]
    pub fn new(endpoint: String, ticket: FetchTicket) -> Self {
        Self {
            endpoint,
            ticket,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Context map echoed back by the host with the result.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(TICKET_KEY.to_string(), self.ticket.value().to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        context
    }
}

/// Turns an HTTP status and body into the directory records.
///
/// # Errors
///
/// - [`FetchFailure::Status`] for any status outside `200..300`
/// - [`FetchFailure::Malformed`] if the body is not a JSON array of objects
///   with an integer `id` and a string `name`
pub fn decode_users(status: u16, body: &[u8]) -> FetchOutcome {
    if !(200..300).contains(&status) {
        return Err(FetchFailure::Status(status));
    }

    serde_json::from_slice::<Vec<UserRecord>>(body)
        .map_err(|e| FetchFailure::Malformed(e.to_string()))
}

/// Interprets a `WebRequestResult` from the host.
///
/// Zellij reports requests that never produced an HTTP response (DNS,
/// connection or TLS errors) as a non-2xx status with no headers and the
/// error text as body; those become [`FetchFailure::Host`]. Everything else
/// goes through [`decode_users`].
///
/// # Errors
///
/// See [`decode_users`].
pub fn decode_response(
    status: u16,
    headers: &BTreeMap<String, String>,
    body: &[u8],
) -> FetchOutcome {
    if headers.is_empty() && !(200..300).contains(&status) {
        let message = String::from_utf8_lossy(body).trim().to_string();
        return Err(FetchFailure::Host(message));
    }
    decode_users(status, body)
}
