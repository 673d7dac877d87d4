// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene reconciliation for stack navigation trees.
//!
//! `proscenium_core` turns successive versions of a navigation tree (a parent
//! state holding an ordered list of child states) into a stable, ordered list
//! of scenes that a rendering layer can mount, keep, or retire. It is
//! `no_std` compatible (with `alloc`) and shares child states and scenes
//! through [`Arc`](alloc::sync::Arc) so that "unchanged" can be detected by
//! pointer comparison.
//!
//! # Architecture
//!
//! The crate is organized around a transition loop that turns navigation
//! actions into incremental scene updates:
//!
//! ```text
//!   ParentState ──► ParentState::push()/pop()/jump_to()/... ──► ParentState'
//!                                                                  │
//!                 ┌────────────────────────────────────────────────┘
//!                 ▼
//!   reconcile(scenes, next, prev) ──► SceneList ──► SceneChanges::between()
//!                                                          │
//!                 ┌────────────────────────────────────────┘
//!                 ▼
//!   SceneHost::apply() ──► exit transition done ──► Navigator::retire()
//! ```
//!
//! **[`state`]**: The [`NavigationState`](state::NavigationState) trait,
//! the [`ParentState`](state::ParentState) container and its stack-style
//! operations.
//!
//! **[`scene`]**: [`Scene`](scene::Scene) records, the immutable
//! [`SceneList`](scene::SceneList), the [`reconcile`](scene::reconcile)
//! core and [`SceneChanges`](scene::SceneChanges) derivation.
//!
//! **[`host`]**: The [`SceneHost`](host::SceneHost) trait that rendering
//! layers implement to apply scene changes to their view trees.
//!
//! **[`navigator`]**: [`Navigator`](navigator::Navigator), a stateful driver
//! holding the current tree and scene list between transitions.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! reconciliation instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-scene
//!   events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod host;
pub mod navigator;
pub mod scene;
pub mod state;
pub mod trace;
