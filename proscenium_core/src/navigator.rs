// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateful transition driver.
//!
//! [`reconcile`] is a pure function; callers have to carry the previous tree
//! and scene list between calls and serialize transitions for one tree.
//! [`Navigator`] does that bookkeeping: it owns the current [`ParentState`]
//! and [`SceneList`], reconciles every transition against them, and commits
//! the result only on success.

use core::fmt;

use crate::host::SceneHost;
use crate::scene::{ReconcileError, SceneChanges, SceneList, reconcile, reconcile_traced};
use crate::state::{NavigationState, ParentState, StateError};
use crate::trace::Tracer;

/// Errors from [`Navigator::navigate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigatorError {
    /// The navigation operation was rejected.
    State(StateError),
    /// The resulting tree could not be reconciled.
    Reconcile(ReconcileError),
}

impl fmt::Display for NavigatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(e) => write!(f, "navigation failed: {e}"),
            Self::Reconcile(e) => write!(f, "reconciliation failed: {e}"),
        }
    }
}

impl core::error::Error for NavigatorError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::State(e) => Some(e),
            Self::Reconcile(e) => Some(e),
        }
    }
}

impl From<StateError> for NavigatorError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

impl From<ReconcileError> for NavigatorError {
    fn from(e: ReconcileError) -> Self {
        Self::Reconcile(e)
    }
}

/// Owns a navigation tree and its reconciled scenes.
#[derive(Debug)]
pub struct Navigator<S> {
    state: ParentState<S>,
    scenes: SceneList<S>,
    revision: u64,
}

impl<S: NavigationState> Navigator<S> {
    /// Creates a navigator and reconciles `initial` with no history.
    ///
    /// # Errors
    ///
    /// Returns the [`ReconcileError`] if `initial` cannot be reconciled.
    pub fn new(initial: ParentState<S>) -> Result<Self, ReconcileError> {
        let scenes = reconcile(&SceneList::empty(), &initial, None)?;
        Ok(Self {
            state: initial,
            scenes,
            revision: 0,
        })
    }

    /// Returns the current navigation tree.
    #[must_use]
    pub fn state(&self) -> &ParentState<S> {
        &self.state
    }

    /// Returns the current scene list.
    #[must_use]
    pub fn scenes(&self) -> &SceneList<S> {
        &self.scenes
    }

    /// Returns a counter that increments every time the scene list changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Moves to `next`, reconciling against the current tree and scenes.
    ///
    /// # Errors
    ///
    /// Returns the [`ReconcileError`] if `next` cannot be reconciled. Nothing
    /// is committed in that case.
    pub fn transition(&mut self, next: ParentState<S>) -> Result<SceneChanges, ReconcileError> {
        self.transition_traced(next, &mut Tracer::none())
    }

    /// Like [`transition`](Self::transition), but reports to `tracer`.
    ///
    /// # Errors
    ///
    /// See [`transition`](Self::transition).
    pub fn transition_traced(
        &mut self,
        next: ParentState<S>,
        tracer: &mut Tracer<'_>,
    ) -> Result<SceneChanges, ReconcileError> {
        let scenes = reconcile_traced(&self.scenes, &next, Some(&self.state), tracer)?;
        self.state = next;
        Ok(self.commit(scenes))
    }

    /// Applies `op` to a copy of the current tree, then transitions to it.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::State`] if `op` fails, or
    /// [`NavigatorError::Reconcile`] if the edited tree cannot be reconciled.
    /// Nothing is committed in either case.
    pub fn navigate<F>(&mut self, op: F) -> Result<SceneChanges, NavigatorError>
    where
        F: FnOnce(&mut ParentState<S>) -> Result<(), StateError>,
    {
        let mut next = self.state.clone();
        op(&mut next)?;
        Ok(self.transition(next)?)
    }

    /// Stops tracking the stale scene with `key`.
    ///
    /// Call this when the scene's exit transition has finished. Returns the
    /// resulting changes, or `None` if `key` is unknown or not stale.
    pub fn retire(&mut self, key: &str) -> Option<SceneChanges> {
        if !self.scenes.get(key).is_some_and(|s| s.is_stale) {
            return None;
        }
        let scenes = self.scenes.without(|s| s.key != key)?;
        Some(self.commit(scenes))
    }

    /// Stops tracking every stale scene.
    pub fn retire_stale(&mut self) -> SceneChanges {
        match self.scenes.without(|s| !s.is_stale) {
            Some(scenes) => self.commit(scenes),
            None => self.commit(self.scenes.clone()),
        }
    }

    /// Forwards the current scenes and `changes` to `host`.
    pub fn present<H: SceneHost<S> + ?Sized>(&self, host: &mut H, changes: &SceneChanges) {
        host.apply(&self.scenes, changes);
    }

    fn commit(&mut self, scenes: SceneList<S>) -> SceneChanges {
        let changes = SceneChanges::between(&self.scenes, &scenes);
        if !changes.unchanged {
            self.revision += 1;
            self.scenes = scenes;
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::state::Route;

    fn route(key: &str) -> Arc<Route> {
        Arc::new(Route::new(key))
    }

    fn navigator(keys: &[&str]) -> Navigator<Route> {
        let children = keys.iter().map(|k| route(k)).collect::<Vec<_>>();
        let index = children.len() - 1;
        Navigator::new(ParentState::new(children, index).unwrap()).unwrap()
    }

    fn scene_keys(nav: &Navigator<Route>) -> Vec<(&str, bool, bool)> {
        nav.scenes()
            .iter()
            .map(|s| (s.key.as_str(), s.is_active, s.is_stale))
            .collect()
    }

    #[derive(Default)]
    struct RecordingHost {
        mounted: Vec<String>,
        unmounted: Vec<String>,
        focus: Option<String>,
        applied: usize,
    }

    impl SceneHost<Route> for RecordingHost {
        fn apply(&mut self, scenes: &SceneList<Route>, changes: &SceneChanges) {
            self.applied += 1;
            self.mounted.extend(changes.mounted.iter().cloned());
            self.unmounted.extend(changes.unmounted.iter().cloned());
            if let Some(active) = scenes.active() {
                self.focus = Some(active.key.clone());
            }
        }
    }

    #[test]
    fn new_reconciles_initial_tree() {
        let nav = navigator(&["home"]);
        assert_eq!(scene_keys(&nav), [("scene_home", true, false)]);
        assert_eq!(nav.revision(), 0);
    }

    #[test]
    fn new_rejects_bad_initial_tree() {
        let state = ParentState {
            index: 0,
            children: vec![route("a"), route("a")],
        };
        assert!(matches!(
            Navigator::new(state),
            Err(ReconcileError::DuplicateKey { index: 1, .. })
        ));
    }

    #[test]
    fn push_then_pop_leaves_a_stale_scene() {
        let mut nav = navigator(&["home"]);
        let changes = nav.navigate(|s| s.push(route("detail"))).unwrap();
        assert_eq!(changes.mounted, ["scene_detail"]);
        assert_eq!(nav.revision(), 1);

        let changes = nav
            .navigate(|s| {
                s.pop();
                Ok(())
            })
            .unwrap();
        assert_eq!(changes.staled, ["scene_detail"]);
        assert_eq!(
            scene_keys(&nav),
            [("scene_home", true, false), ("scene_detail", false, true)]
        );
        assert_eq!(nav.state().len(), 1);
    }

    #[test]
    fn retire_drops_only_stale_scenes() {
        let mut nav = navigator(&["home", "detail"]);
        nav.navigate(|s| {
            s.pop();
            Ok(())
        })
        .unwrap();

        assert!(nav.retire("scene_home").is_none(), "live scenes stay");
        assert!(nav.retire("scene_missing").is_none());

        let revision = nav.revision();
        let changes = nav.retire("scene_detail").unwrap();
        assert_eq!(changes.unmounted, ["scene_detail"]);
        assert_eq!(scene_keys(&nav), [("scene_home", true, false)]);
        assert_eq!(nav.revision(), revision + 1);

        // The retired scene is not resurrected by the next transition.
        let changes = nav.navigate(|s| s.jump_to("home")).unwrap();
        assert!(changes.unchanged);
        assert_eq!(nav.scenes().len(), 1);
    }

    #[test]
    fn retire_stale_drops_all_exiting_scenes() {
        let mut nav = navigator(&["a", "b", "c"]);
        nav.navigate(|s| s.reset(vec![route("a")], None)).unwrap();
        assert_eq!(nav.scenes().stale().count(), 2);

        let changes = nav.retire_stale();
        assert_eq!(changes.unmounted, ["scene_b", "scene_c"]);
        assert_eq!(nav.scenes().stale().count(), 0);

        let changes = nav.retire_stale();
        assert!(changes.unchanged);
    }

    #[test]
    fn failed_navigation_commits_nothing() {
        let mut nav = navigator(&["a", "b"]);
        let before = nav.scenes().clone();

        let err = nav.navigate(|s| s.jump_to("zzz")).unwrap_err();
        assert_eq!(err, NavigatorError::State(StateError::KeyNotFound("zzz".to_string())));

        let err = nav
            .navigate(|s| {
                s.index = 7;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            NavigatorError::Reconcile(ReconcileError::ActiveCount { count: 0 })
        );

        assert!(nav.scenes().ptr_eq(&before));
        assert_eq!(nav.state().index, 1);
        assert_eq!(nav.revision(), 0);
    }

    #[test]
    fn unchanged_transition_keeps_revision() {
        let mut nav = navigator(&["a", "b"]);
        let same = nav.state().clone();
        let changes = nav.transition(same).unwrap();
        assert!(changes.unchanged);
        assert_eq!(nav.revision(), 0);
    }

    #[test]
    fn present_forwards_to_host() {
        let mut host = RecordingHost::default();
        let mut nav = navigator(&["home"]);
        let initial = SceneChanges::between(&SceneList::empty(), nav.scenes());
        nav.present(&mut host, &initial);

        let changes = nav.navigate(|s| s.push(route("detail"))).unwrap();
        nav.present(&mut host, &changes);
        let changes = nav.navigate(|s| s.jump_to("home")).unwrap();
        nav.present(&mut host, &changes);

        assert_eq!(host.applied, 3);
        assert_eq!(host.mounted, ["scene_home", "scene_detail"]);
        assert!(host.unmounted.is_empty());
        assert_eq!(host.focus.as_deref(), Some("scene_home"));
    }

    #[test]
    fn navigator_error_display_and_source() {
        use core::error::Error;

        let err = NavigatorError::from(StateError::EmptyRoutes);
        assert_eq!(
            err.to_string(),
            "navigation failed: cannot reset to an empty list of routes"
        );
        assert!(err.source().is_some());
    }
}
