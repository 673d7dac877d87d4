// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for reconciliation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`reconcile_traced`](crate::scene::reconcile_traced) calls at each stage.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`SceneEvent`] and the
//!   corresponding `TraceSink` method.

use crate::scene::ReconcileError;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a reconciliation starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconcileBeginEvent {
    /// Number of scenes passed in.
    pub input_scenes: usize,
    /// Number of children in the next tree.
    pub next_children: usize,
    /// Number of children in the previous tree, if one was supplied.
    pub prev_children: Option<usize>,
    /// Focus index of the next tree.
    pub focus_index: usize,
}

/// Per-reconciliation summary, emitted on success.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Number of scenes in the returned list.
    pub output_scenes: usize,
    /// Scenes derived from the next tree.
    pub fresh: usize,
    /// Scenes carried as stale.
    pub stale: usize,
    /// Output scenes that are the same allocation as an input scene.
    pub reused: usize,
    /// Previously stale scenes that reappeared in the next tree.
    pub revived: usize,
    /// Whether the input list was returned as-is.
    pub unchanged: bool,
}

/// A per-scene record of the reconciled output.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneEvent<'a> {
    /// Scene key.
    pub key: &'a str,
    /// Scene index.
    pub index: usize,
    /// Whether the scene is active.
    pub is_active: bool,
    /// Whether the scene is stale.
    pub is_stale: bool,
    /// Whether the input scene object was reused.
    pub reused: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from reconciliation.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a reconciliation starts.
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        _ = e;
    }

    /// Called with the summary of a successful reconciliation.
    fn on_reconcile_end(&mut self, s: &ReconcileSummary) {
        _ = s;
    }

    /// Called when a reconciliation fails.
    fn on_reconcile_error(&mut self, e: &ReconcileError) {
        _ = e;
    }

    /// Called once per output scene (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_scene(&mut self, e: &SceneEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ReconcileBeginEvent`].
    #[inline]
    pub fn reconcile_begin(&mut self, e: &ReconcileBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reconcile_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReconcileSummary`].
    #[inline]
    pub fn reconcile_end(&mut self, s: &ReconcileSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_reconcile_end(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`ReconcileError`].
    #[inline]
    pub fn reconcile_error(&mut self, e: &ReconcileError) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reconcile_error(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SceneEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn scene(&mut self, e: &SceneEvent<'_>) {
        if let Some(s) = &mut self.sink {
            s.on_scene(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
