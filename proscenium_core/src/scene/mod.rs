// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene data model and reconciliation.
//!
//! A *scene* wraps one child of a navigation tree with the metadata a
//! rendering layer needs:
//!
//! - A key ([`Scene::key`]): [`SCENE_KEY_PREFIX`] followed by the child's own
//!   key. Views are mounted and updated by this key.
//! - An index: the child's position in the tree it was derived from. Stale
//!   scenes keep the index they had in the tree they were removed from.
//! - A stale flag: set while the child is gone from the tree but its view
//!   may still be running an exit transition.
//! - An active flag: set on exactly one non-stale scene, the focused child.
//!
//! Scenes are shared as [`SceneRef`]s and grouped into an immutable
//! [`SceneList`]. [`reconcile`] produces the next list from the previous one,
//! reusing every scene (and the list itself) that did not change, so callers
//! can detect "no change" with [`Arc::ptr_eq`] /
//! [`SceneList::ptr_eq`].
//!
//! # Ordering
//!
//! Lists are sorted by index, then by key (see [`compare_keys`]). A stale
//! scene therefore sits next to the live scene that took its position.

mod changes;
mod compare;
mod reconcile;

pub use changes::SceneChanges;
pub use compare::{compare_keys, compare_scenes, shallow_eq};
pub use reconcile::{ReconcileError, reconcile, reconcile_traced};

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Deref;

use crate::state::NavigationState;

/// Prefix prepended to a child's key to form its scene key.
pub const SCENE_KEY_PREFIX: &str = "scene_";

/// Derives the scene key for a navigation state.
#[must_use]
pub fn scene_key<S: NavigationState + ?Sized>(state: &S) -> String {
    let mut key = String::with_capacity(SCENE_KEY_PREFIX.len() + state.key().len());
    key.push_str(SCENE_KEY_PREFIX);
    key.push_str(state.key());
    key
}

/// A rendering record for one child of a navigation tree.
#[derive(Debug)]
pub struct Scene<S> {
    /// Scene key, unique within a [`SceneList`].
    pub key: String,
    /// Position of the child in the tree it was derived from.
    pub index: usize,
    /// Whether this is the focused, non-stale scene.
    pub is_active: bool,
    /// Whether the child is no longer part of the current tree.
    pub is_stale: bool,
    /// The child state, shared with the tree.
    pub navigation_state: Arc<S>,
}

impl<S> Clone for Scene<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            index: self.index,
            is_active: self.is_active,
            is_stale: self.is_stale,
            navigation_state: Arc::clone(&self.navigation_state),
        }
    }
}

impl<S: NavigationState> Scene<S> {
    /// Creates an inactive scene for `navigation_state` at `index`.
    #[must_use]
    pub fn new(navigation_state: Arc<S>, index: usize, is_stale: bool) -> Self {
        Self {
            key: scene_key(&*navigation_state),
            index,
            is_active: false,
            is_stale,
            navigation_state,
        }
    }
}

/// Shared handle to a [`Scene`].
///
/// Reconciliation hands back the same `SceneRef` for a scene that did not
/// change, so pointer equality means "nothing to re-render".
pub type SceneRef<S> = Arc<Scene<S>>;

/// An immutable, ordered list of scenes.
///
/// Cloning is cheap and shares the underlying slice. [`reconcile`] returns a
/// clone of its input list when nothing changed; use
/// [`ptr_eq`](Self::ptr_eq) to detect that in O(1).
#[derive(Debug)]
pub struct SceneList<S>(Arc<[SceneRef<S>]>);

impl<S> Clone for SceneList<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S> Default for SceneList<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> From<Vec<SceneRef<S>>> for SceneList<S> {
    fn from(scenes: Vec<SceneRef<S>>) -> Self {
        Self(scenes.into())
    }
}

impl<S> Deref for SceneList<S> {
    type Target = [SceneRef<S>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, S> IntoIterator for &'a SceneList<S> {
    type Item = &'a SceneRef<S>;
    type IntoIter = core::slice::Iter<'a, SceneRef<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S> SceneList<S> {
    /// Creates an empty list.
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Returns `true` if both lists share the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the scene with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SceneRef<S>> {
        self.0.iter().find(|scene| scene.key == key)
    }

    /// Returns the active scene, if any.
    #[must_use]
    pub fn active(&self) -> Option<&SceneRef<S>> {
        self.0.iter().find(|scene| scene.is_active)
    }

    /// Iterates over the stale scenes in list order.
    pub fn stale(&self) -> impl Iterator<Item = &SceneRef<S>> + '_ {
        self.0.iter().filter(|scene| scene.is_stale)
    }

    /// Returns a new list without the scenes for which `keep` returns
    /// `false`, or `None` if every scene is kept.
    pub(crate) fn without(&self, mut keep: impl FnMut(&Scene<S>) -> bool) -> Option<Self> {
        let kept: Vec<SceneRef<S>> = self
            .0
            .iter()
            .filter(|scene| keep(scene))
            .cloned()
            .collect();
        (kept.len() != self.0.len()).then(|| kept.into())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::state::Route;

    fn scene(key: &str, index: usize, is_stale: bool) -> SceneRef<Route> {
        Arc::new(Scene::new(Arc::new(Route::new(key)), index, is_stale))
    }

    #[test]
    fn scene_key_is_prefixed() {
        assert_eq!(scene_key(&Route::new("a")), "scene_a");
        assert_eq!(scene_key(&Route::new("")), "scene_");
    }

    #[test]
    fn new_scene_is_inactive() {
        let s = Scene::new(Arc::new(Route::new("x")), 3, true);
        assert_eq!(s.key, "scene_x");
        assert_eq!(s.index, 3);
        assert!(s.is_stale);
        assert!(!s.is_active);
    }

    #[test]
    fn clone_shares_the_list() {
        let list: SceneList<Route> = vec![scene("a", 0, false)].into();
        let copy = list.clone();
        assert!(list.ptr_eq(&copy));
        assert!(!list.ptr_eq(&SceneList::from(vec![Arc::clone(&list[0])])));
    }

    #[test]
    fn lookups() {
        let mut active = Scene::new(Arc::new(Route::new("b")), 1, false);
        active.is_active = true;
        let list: SceneList<Route> =
            vec![scene("a", 0, true), Arc::new(active), scene("c", 2, true)].into();

        assert_eq!(list.len(), 3);
        assert_eq!(list.get("scene_c").map(|s| s.index), Some(2));
        assert!(list.get("c").is_none(), "lookup is by scene key");
        assert_eq!(list.active().map(|s| s.key.as_str()), Some("scene_b"));
        let stale: Vec<&str> = list.stale().map(|s| s.key.as_str()).collect();
        assert_eq!(stale, ["scene_a", "scene_c"]);
    }

    #[test]
    fn without_returns_none_when_nothing_is_dropped() {
        let list: SceneList<Route> = vec![scene("a", 0, false), scene("b", 1, true)].into();
        assert!(list.without(|_| true).is_none());

        let trimmed = list.without(|s| !s.is_stale).unwrap();
        assert_eq!(trimmed.len(), 1);
        assert!(Arc::ptr_eq(&trimmed[0], &list[0]), "kept scenes are shared");
    }
}
