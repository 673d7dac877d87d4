// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene change sets.
//!
//! [`SceneChanges`] describes what a rendering host has to do to move from
//! one [`SceneList`] to the next. It relies on the reuse guarantees of
//! [`reconcile`](super::reconcile): a scene whose object is unchanged needs no
//! work at all.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{SceneList, SceneRef};

/// The changes between two scene lists, keyed by scene key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneChanges {
    /// Scenes present only in the next list. Views should be mounted.
    pub mounted: Vec<String>,
    /// Scenes present only in the previous list. Views should be torn down.
    pub unmounted: Vec<String>,
    /// Scenes present in both lists whose scene object was replaced.
    pub updated: Vec<String>,
    /// Scenes that are stale in the next list but were not stale before.
    /// Their exit transitions should start.
    pub staled: Vec<String>,
    /// Scenes that were stale and are live again.
    pub revived: Vec<String>,
    /// The newly active scene, if focus moved.
    pub activated: Option<String>,
    /// Whether both lists are the same allocation.
    pub unchanged: bool,
}

impl SceneChanges {
    /// Computes the changes from `prev` to `next`.
    ///
    /// Keys are reported in `next` order, except `unmounted` which follows
    /// `prev` order.
    #[must_use]
    pub fn between<S>(prev: &SceneList<S>, next: &SceneList<S>) -> Self {
        let mut changes = Self::default();
        if prev.ptr_eq(next) {
            changes.unchanged = true;
            return changes;
        }

        let before: BTreeMap<&str, &SceneRef<S>> =
            prev.iter().map(|s| (s.key.as_str(), s)).collect();
        let after: BTreeSet<&str> = next.iter().map(|s| s.key.as_str()).collect();

        for scene in next {
            let Some(old) = before.get(scene.key.as_str()) else {
                changes.mounted.push(scene.key.clone());
                if scene.is_stale {
                    changes.staled.push(scene.key.clone());
                }
                continue;
            };
            if Arc::ptr_eq(*old, scene) {
                continue;
            }
            changes.updated.push(scene.key.clone());
            match (old.is_stale, scene.is_stale) {
                (false, true) => changes.staled.push(scene.key.clone()),
                (true, false) => changes.revived.push(scene.key.clone()),
                _ => {}
            }
        }

        changes.unmounted = prev
            .iter()
            .filter(|s| !after.contains(s.key.as_str()))
            .map(|s| s.key.clone())
            .collect();

        let old_active = prev.active().map(|s| s.key.as_str());
        changes.activated = next
            .active()
            .filter(|s| Some(s.key.as_str()) != old_active)
            .map(|s| s.key.clone());

        changes
    }

    /// Returns `true` if nothing needs to be applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
            && self.unmounted.is_empty()
            && self.updated.is_empty()
            && self.activated.is_none()
    }
}
