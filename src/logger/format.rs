//! Event formatter that tags log lines with the current request id.
//!
//! Wraps any `tracing-subscriber` event formatter. When the current context
//! record carries a non-empty `requestId`, text output is prefixed with
//! `requestId=<id>` and JSON output gains a top-level `"requestId"` key.
//! Outside any request scope the inner formatter runs unchanged.

use std::fmt::{self, Write as _};

use serde_json::{Map, Value};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::context::context;
use crate::request_id::REQUEST_ID_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct RequestIdFormat<E> {
    inner: E,
    style: Style,
}

impl<E> RequestIdFormat<E> {
    /// Wrap a line-oriented formatter (`full`, `compact`).
    pub fn text(inner: E) -> Self {
        Self {
            inner,
            style: Style::Text,
        }
    }

    /// Wrap a formatter that emits one JSON object per line.
    pub fn json(inner: E) -> Self {
        Self {
            inner,
            style: Style::Json,
        }
    }
}

impl<S, N, E> FormatEvent<S, N> for RequestIdFormat<E>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    E: FormatEvent<S, N>,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let Some(request_id) = context().request_id() else {
            return self.inner.format_event(ctx, writer, event);
        };

        match self.style {
            Style::Text => {
                write!(writer, "{}={} ", REQUEST_ID_KEY, request_id)?;
                self.inner.format_event(ctx, writer, event)
            }
            Style::Json => {
                let mut line = String::new();
                self.inner.format_event(ctx, Writer::new(&mut line), event)?;

                match serde_json::from_str::<Map<String, Value>>(line.trim_end()) {
                    Ok(mut object) => {
                        object.insert(REQUEST_ID_KEY.to_string(), Value::String(request_id));
                        let encoded = serde_json::to_string(&object).map_err(|_| fmt::Error)?;
                        writeln!(writer, "{}", encoded)
                    }
                    // Not a single JSON object; pass it through untouched.
                    Err(_) => writer.write_str(&line),
                }
            }
        }
    }
}
