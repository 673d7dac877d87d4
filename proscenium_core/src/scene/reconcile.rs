// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene list reconciliation.
//!
//! Reconciliation runs in five passes over the previous scene list and the
//! next (and optionally previous) navigation tree:
//!
//! 1. **Classify**: Build a fresh scene for every child of the next tree and
//!    collect stale candidates: scenes that were already stale, plus children
//!    of the previous tree missing from the next one (at their old index).
//!    A stale key that reappears in the next tree is revived and dropped
//!    from the stale set.
//! 2. **Merge**: For every stale then fresh candidate, reuse the previous
//!    scene with the same key if it is [shallow-equal](super::shallow_eq),
//!    otherwise adopt the candidate.
//! 3. **Order**: Sort by index, then key (see
//!    [`compare_scenes`](super::compare_scenes)).
//! 4. **Flag**: Mark the non-stale scene at the focus index active. Exactly
//!    one scene must end up active when the next tree has children.
//! 5. **Gate**: If the result is element-wise shallow-equal to the input,
//!    return the input list itself.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use super::{Scene, SceneList, SceneRef, compare_scenes, scene_key, shallow_eq};
use crate::state::{NavigationState, ParentState};
use crate::trace::{ReconcileBeginEvent, ReconcileSummary, Tracer};

/// Errors from [`reconcile`].
///
/// Both variants are contract violations by the caller; no partial scene
/// list is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileError {
    /// Two children of the next tree derive the same scene key.
    DuplicateKey {
        /// Index of the second child with the key.
        index: usize,
        /// The conflicting scene key.
        key: String,
    },
    /// After flagging, the number of active scenes was not exactly one.
    ActiveCount {
        /// Number of active scenes observed.
        count: usize,
    },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { index, key } => {
                write!(f, "child {index} has scene key \"{key}\" which conflicts with another child")
            }
            Self::ActiveCount { count } => {
                write!(f, "there should always be exactly one active scene, not {count}")
            }
        }
    }
}

impl core::error::Error for ReconcileError {}

/// Reconciles `scenes` against a navigation tree transition.
///
/// `scenes` is the list previously returned for `prev` (or an empty list on
/// the first call). The result holds one scene per child of `next` plus the
/// stale scenes still being tracked, sorted by index and key.
///
/// Scenes that did not change are returned as the same [`SceneRef`]; if no
/// scene changed, the returned list is a clone of `scenes` sharing its
/// allocation (see [`SceneList::ptr_eq`]).
///
/// # Errors
///
/// Returns [`ReconcileError::DuplicateKey`] if two children of `next` share a
/// key, or [`ReconcileError::ActiveCount`] if `next` has children but its
/// focus index does not yield exactly one active scene.
pub fn reconcile<S: NavigationState>(
    scenes: &SceneList<S>,
    next: &ParentState<S>,
    prev: Option<&ParentState<S>>,
) -> Result<SceneList<S>, ReconcileError> {
    reconcile_traced(scenes, next, prev, &mut Tracer::none())
}

/// Like [`reconcile`], but reports progress to `tracer`.
///
/// # Errors
///
/// See [`reconcile`]. Errors are also reported to the tracer.
pub fn reconcile_traced<S: NavigationState>(
    scenes: &SceneList<S>,
    next: &ParentState<S>,
    prev: Option<&ParentState<S>>,
    tracer: &mut Tracer<'_>,
) -> Result<SceneList<S>, ReconcileError> {
    tracer.reconcile_begin(&ReconcileBeginEvent {
        input_scenes: scenes.len(),
        next_children: next.children.len(),
        prev_children: prev.map(|p| p.children.len()),
        focus_index: next.index,
    });
    let result = run(scenes, next, prev, tracer);
    if let Err(e) = &result {
        tracer.reconcile_error(e);
    }
    result
}

/// A stale or fresh scene awaiting the merge pass.
enum Candidate<S> {
    /// An input scene carried forward unchanged.
    Carried(SceneRef<S>),
    /// A scene built from a tree child.
    Built(Scene<S>),
}

struct Classified<S> {
    stale: BTreeMap<String, Candidate<S>>,
    fresh: BTreeMap<String, Candidate<S>>,
    revived: usize,
}

fn run<S: NavigationState>(
    scenes: &SceneList<S>,
    next: &ParentState<S>,
    prev: Option<&ParentState<S>>,
    tracer: &mut Tracer<'_>,
) -> Result<SceneList<S>, ReconcileError> {
    let prev_scenes: BTreeMap<&str, &SceneRef<S>> = scenes
        .iter()
        .map(|scene| (scene.key.as_str(), scene))
        .collect();
    let reuse = |candidate: Scene<S>| -> SceneRef<S> {
        match prev_scenes.get(candidate.key.as_str()) {
            Some(prev) if shallow_eq(prev, &candidate) => Arc::clone(*prev),
            _ => Arc::new(candidate),
        }
    };

    let Classified {
        stale,
        fresh,
        revived,
    } = classify(scenes, next, prev)?;
    let mut summary = ReconcileSummary {
        fresh: fresh.len(),
        stale: stale.len(),
        revived,
        ..ReconcileSummary::default()
    };

    // Merge. Emission order is irrelevant; the sort below decides placement.
    let mut merged: Vec<SceneRef<S>> = stale
        .into_values()
        .chain(fresh.into_values())
        .map(|candidate| match candidate {
            Candidate::Carried(scene) => scene,
            Candidate::Built(scene) => reuse(scene),
        })
        .collect();

    merged.sort_by(|a, b| compare_scenes(a, b));

    // Flag the focused scene.
    let mut active = 0;
    for scene in &mut merged {
        let is_active = !scene.is_stale && scene.index == next.index;
        if is_active != scene.is_active {
            *scene = reuse(Scene {
                is_active,
                ..Scene::clone(&**scene)
            });
        }
        if is_active {
            active += 1;
        }
    }
    if !next.children.is_empty() && active != 1 {
        return Err(ReconcileError::ActiveCount { count: active });
    }

    for scene in &merged {
        let reused = prev_scenes
            .get(scene.key.as_str())
            .is_some_and(|prev| Arc::ptr_eq(*prev, scene));
        if reused {
            summary.reused += 1;
        }
        #[cfg(feature = "trace-rich")]
        tracer.scene(&crate::trace::SceneEvent {
            key: &scene.key,
            index: scene.index,
            is_active: scene.is_active,
            is_stale: scene.is_stale,
            reused,
        });
    }

    let unchanged = merged.len() == scenes.len()
        && merged
            .iter()
            .zip(scenes.iter())
            .all(|(next, prev)| shallow_eq(prev, next));
    summary.output_scenes = merged.len();
    summary.unchanged = unchanged;
    tracer.reconcile_end(&summary);

    if unchanged {
        Ok(scenes.clone())
    } else {
        Ok(merged.into())
    }
}

fn classify<S: NavigationState>(
    scenes: &SceneList<S>,
    next: &ParentState<S>,
    prev: Option<&ParentState<S>>,
) -> Result<Classified<S>, ReconcileError> {
    let mut stale: BTreeMap<String, Candidate<S>> = scenes
        .stale()
        .map(|scene| (scene.key.clone(), Candidate::Carried(Arc::clone(scene))))
        .collect();

    let mut fresh = BTreeMap::new();
    let mut revived = 0;
    for (index, child) in next.children.iter().enumerate() {
        let key = scene_key(&**child);
        if fresh.contains_key(&key) {
            return Err(ReconcileError::DuplicateKey { index, key });
        }
        if stale.remove(&key).is_some() {
            revived += 1;
        }
        let scene = Scene {
            key: key.clone(),
            index,
            is_active: false,
            is_stale: false,
            navigation_state: Arc::clone(child),
        };
        fresh.insert(key, Candidate::Built(scene));
    }

    // Children removed by this transition render once more while exiting.
    if let Some(prev) = prev {
        for (index, child) in prev.children.iter().enumerate() {
            let key = scene_key(&**child);
            if fresh.contains_key(&key) {
                continue;
            }
            let scene = Scene {
                key: key.clone(),
                index,
                is_active: false,
                is_stale: true,
                navigation_state: Arc::clone(child),
            };
            stale.insert(key, Candidate::Built(scene));
        }
    }

    Ok(Classified {
        stale,
        fresh,
        revived,
    })
}
