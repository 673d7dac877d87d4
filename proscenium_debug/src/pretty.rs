// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use proscenium_core::scene::ReconcileError;
use proscenium_core::trace::{ReconcileBeginEvent, ReconcileSummary, SceneEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn flag(set: bool, name: &'static str) -> &'static str {
    if set { name } else { "-" }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        let prev = match e.prev_children {
            Some(n) => n.to_string(),
            None => "none".to_string(),
        };
        let _ = writeln!(
            self.writer,
            "[begin] scenes={} next={} prev={prev} focus={}",
            e.input_scenes, e.next_children, e.focus_index,
        );
    }

    fn on_reconcile_end(&mut self, s: &ReconcileSummary) {
        let outcome = if s.unchanged { "unchanged" } else { "changed" };
        let _ = writeln!(
            self.writer,
            "[summary] scenes={} fresh={} stale={} reused={} revived={} {outcome}",
            s.output_scenes, s.fresh, s.stale, s.reused, s.revived,
        );
    }

    fn on_reconcile_error(&mut self, e: &ReconcileError) {
        let _ = writeln!(self.writer, "[error] {e}");
    }

    fn on_scene(&mut self, e: &SceneEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[scene] {} index={} {} {} {}",
            e.key,
            e.index,
            flag(e.is_active, "active"),
            flag(e.is_stale, "stale"),
            flag(e.reused, "reused"),
        );
    }
}
