// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON journaling for proscenium diagnostics.
//!
//! This crate provides [`TraceSink`](proscenium_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`journal::JournalSink`]: records events as JSON objects and writes
//!   them out as a single JSON array.

pub mod journal;
pub mod pretty;
