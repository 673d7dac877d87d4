// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event journal.
//!
//! [`JournalSink`] implements [`TraceSink`] and records every event as a JSON
//! object with an `"event"` tag. [`JournalSink::write_json`] writes the
//! recording as one JSON array, suitable for attaching to bug reports or
//! diffing between runs.

use std::io::{self, Write};

use serde_json::{Value, json};

use proscenium_core::scene::ReconcileError;
use proscenium_core::trace::{ReconcileBeginEvent, ReconcileSummary, SceneEvent, TraceSink};

/// A [`TraceSink`] that records events as JSON values.
#[derive(Debug, Default)]
pub struct JournalSink {
    events: Vec<Value>,
}

impl JournalSink {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Writes the recorded events to `writer` as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `writer`.
    pub fn write_json(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.events)?;
        writer.write_all(b"\n")
    }
}

impl TraceSink for JournalSink {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        self.events.push(json!({
            "event": "begin",
            "input_scenes": e.input_scenes,
            "next_children": e.next_children,
            "prev_children": e.prev_children,
            "focus_index": e.focus_index,
        }));
    }

    fn on_reconcile_end(&mut self, s: &ReconcileSummary) {
        self.events.push(json!({
            "event": "summary",
            "output_scenes": s.output_scenes,
            "fresh": s.fresh,
            "stale": s.stale,
            "reused": s.reused,
            "revived": s.revived,
            "unchanged": s.unchanged,
        }));
    }

    fn on_reconcile_error(&mut self, e: &ReconcileError) {
        let detail = match e {
            ReconcileError::DuplicateKey { index, key } => json!({
                "kind": "duplicate_key",
                "index": index,
                "key": key,
            }),
            ReconcileError::ActiveCount { count } => json!({
                "kind": "active_count",
                "count": count,
            }),
        };
        self.events.push(json!({
            "event": "error",
            "error": detail,
            "message": e.to_string(),
        }));
    }

    fn on_scene(&mut self, e: &SceneEvent<'_>) {
        self.events.push(json!({
            "event": "scene",
            "key": e.key,
            "index": e.index,
            "is_active": e.is_active,
            "is_stale": e.is_stale,
            "reused": e.reused,
        }));
    }
}
