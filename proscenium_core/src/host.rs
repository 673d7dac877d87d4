// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for rendering integrations.
//!
//! Proscenium leaves views, animation, and input to the host. A host provides
//! the following pieces:
//!
//! - **Scene host**: Implements the [`SceneHost`] trait to mount, update, and
//!   tear down views keyed by [`Scene::key`](crate::scene::Scene::key), render
//!   exit transitions for stale scenes, and treat the active scene as the
//!   focus signal.
//!
//! - **Exit driver**: Reports finished exit transitions back with
//!   [`Navigator::retire`](crate::navigator::Navigator::retire), so the scene
//!   is no longer passed into the next reconciliation.
//!
//! # Crate boundaries
//!
//! `proscenium_core` owns the data model, reconciliation, and this contract
//! module. Host crates depend on `proscenium_core` and provide view glue.
//! Application code depends on both and wires them together.

use crate::scene::{SceneChanges, SceneList};

/// Applies reconciled scene changes to a view tree.
///
/// Both real view layers and test doubles implement this trait.
///
/// # Transition pseudocode
///
/// A typical navigation handler wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_back(navigator: &mut Navigator<Route>, host: &mut MyHost) {
///     // Navigate: edit the tree and reconcile
///     let changes = navigator.navigate(|state| {
///         state.pop();
///         Ok(())
///     })?;
///
///     // Present: mount, update, and start exit transitions
///     navigator.present(host, &changes);
/// }
///
/// fn on_exit_finished(navigator: &mut Navigator<Route>, host: &mut MyHost, key: &str) {
///     // Retire: stop tracking the stale scene and tear down its view
///     if let Some(changes) = navigator.retire(key) {
///         navigator.present(host, &changes);
///     }
/// }
/// ```
pub trait SceneHost<S> {
    /// Applies `changes` to the backing view tree, reading current scene
    /// values from `scenes` as needed.
    fn apply(&mut self, scenes: &SceneList<S>, changes: &SceneChanges);
}
