// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation tree data model.
//!
//! A navigation tree is a [`ParentState`] holding an ordered list of child
//! states and the index of the focused child. Child states are caller-owned
//! values implementing [`NavigationState`]; the tree shares them as
//! [`Arc`]s and never mutates them, so a child that has not been replaced
//! keeps its pointer identity across transitions.
//!
//! # Operations
//!
//! Stack-style operations ([`push`](ParentState::push),
//! [`pop`](ParentState::pop), [`jump_to`](ParentState::jump_to),
//! [`replace_at`](ParentState::replace_at), [`reset`](ParentState::reset),
//! ...) edit the tree in place. Each one validates before it writes, so a
//! failed operation leaves the state untouched. Keys stay unique among
//! children after every successful operation.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// A child state in a navigation tree.
///
/// The only requirement is a key that identifies the state among its
/// siblings. Everything else is an opaque payload owned by the caller.
pub trait NavigationState {
    /// Returns the key identifying this state among its siblings.
    fn key(&self) -> &str;
}

/// A keyed navigation state with an arbitrary payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Route<P = ()> {
    /// Key identifying the route among its siblings.
    pub key: String,
    /// Caller-defined payload.
    pub params: P,
}

impl Route {
    /// Creates a route with no payload.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: (),
        }
    }
}

impl<P> Route<P> {
    /// Creates a route carrying `params`.
    #[must_use]
    pub fn with_params(key: impl Into<String>, params: P) -> Self {
        Self {
            key: key.into(),
            params,
        }
    }
}

impl<P> NavigationState for Route<P> {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Errors from [`ParentState`] operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// A child with this key already exists.
    DuplicateKey(String),
    /// No child has this key.
    KeyNotFound(String),
    /// The index does not address a child.
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of children.
        len: usize,
    },
    /// A reset was requested with no routes.
    EmptyRoutes,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "a child with key \"{key}\" already exists"),
            Self::KeyNotFound(key) => write!(f, "no child with key \"{key}\""),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for {len} children")
            }
            Self::EmptyRoutes => f.write_str("cannot reset to an empty list of routes"),
        }
    }
}

impl core::error::Error for StateError {}

/// A parent navigation state: ordered children plus the focused index.
///
/// When `children` is non-empty, `index` addresses one of them. An empty
/// tree keeps `index` at 0.
#[derive(Debug)]
pub struct ParentState<S> {
    /// Index of the focused child.
    pub index: usize,
    /// Ordered child states.
    pub children: Vec<Arc<S>>,
}

impl<S> Clone for ParentState<S> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            children: self.children.clone(),
        }
    }
}

impl<S> Default for ParentState<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> ParentState<S> {
    /// Creates a tree with no children.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            index: 0,
            children: Vec::new(),
        }
    }

    /// Returns the number of children.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the tree has no children.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the focused child, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&Arc<S>> {
        self.children.get(self.index)
    }

    /// Moves focus to `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfBounds`] if `index` does not address
    /// a child.
    pub fn jump_to_index(&mut self, index: usize) -> Result<(), StateError> {
        self.check_index(index)?;
        self.index = index;
        Ok(())
    }

    /// Moves focus one child towards the front. Returns whether it moved.
    pub fn back(&mut self) -> bool {
        if self.index == 0 || self.children.is_empty() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves focus one child towards the back. Returns whether it moved.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.children.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Removes the last child and focuses the new last child.
    ///
    /// Popping while the first child is focused is a no-op and returns
    /// `None`, so over-popping never empties the tree.
    pub fn pop(&mut self) -> Option<Arc<S>> {
        if self.index == 0 {
            return None;
        }
        let popped = self.children.pop()?;
        self.index = self.children.len().saturating_sub(1);
        Some(popped)
    }

    fn check_index(&self, index: usize) -> Result<(), StateError> {
        if index < self.children.len() {
            Ok(())
        } else {
            Err(StateError::IndexOutOfBounds {
                index,
                len: self.children.len(),
            })
        }
    }
}

impl<S: NavigationState> ParentState<S> {
    /// Creates a tree from `children`, focusing `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateKey`] if two children share a key, or
    /// [`StateError::IndexOutOfBounds`] if `children` is non-empty and
    /// `index` does not address one of them.
    pub fn new(children: Vec<Arc<S>>, index: usize) -> Result<Self, StateError> {
        check_unique(&children)?;
        if children.is_empty() {
            return Ok(Self::empty());
        }
        let state = Self { index, children };
        state.check_index(index)?;
        Ok(state)
    }

    /// Returns the position of the child with `key`.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.children.iter().position(|child| child.key() == key)
    }

    /// Returns `true` if a child has `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Returns the child with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<S>> {
        self.children.iter().find(|child| child.key() == key)
    }

    /// Appends `child` and focuses it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateKey`] if a child with the same key
    /// already exists.
    pub fn push(&mut self, child: Arc<S>) -> Result<(), StateError> {
        if self.contains(child.key()) {
            return Err(StateError::DuplicateKey(child.key().into()));
        }
        self.children.push(child);
        self.index = self.children.len() - 1;
        Ok(())
    }

    /// Moves focus to the child with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::KeyNotFound`] if no child has `key`.
    pub fn jump_to(&mut self, key: &str) -> Result<(), StateError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| StateError::KeyNotFound(key.into()))?;
        self.index = index;
        Ok(())
    }

    /// Replaces the child at `index` with `child` and focuses it.
    ///
    /// Replacing a child with the same `Arc` leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfBounds`] if `index` does not address a
    /// child, or [`StateError::DuplicateKey`] if another child already uses
    /// the key of `child`.
    pub fn replace_at_index(&mut self, index: usize, child: Arc<S>) -> Result<(), StateError> {
        self.check_index(index)?;
        if Arc::ptr_eq(&self.children[index], &child) {
            return Ok(());
        }
        if let Some(existing) = self.index_of(child.key()) {
            if existing != index {
                return Err(StateError::DuplicateKey(child.key().into()));
            }
        }
        self.children[index] = child;
        self.index = index;
        Ok(())
    }

    /// Replaces the child with `key` and focuses the replacement.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::KeyNotFound`] if no child has `key`, or the
    /// errors of [`replace_at_index`](Self::replace_at_index).
    pub fn replace_at(&mut self, key: &str, child: Arc<S>) -> Result<(), StateError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| StateError::KeyNotFound(key.into()))?;
        self.replace_at_index(index, child)
    }

    /// Replaces all children with `children`, focusing `index` or, when
    /// `None`, the last child.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyRoutes`] if `children` is empty,
    /// [`StateError::DuplicateKey`] if two of them share a key, or
    /// [`StateError::IndexOutOfBounds`] if `index` does not address one.
    pub fn reset(&mut self, children: Vec<Arc<S>>, index: Option<usize>) -> Result<(), StateError> {
        if children.is_empty() {
            return Err(StateError::EmptyRoutes);
        }
        check_unique(&children)?;
        let index = index.unwrap_or(children.len() - 1);
        if index >= children.len() {
            return Err(StateError::IndexOutOfBounds {
                index,
                len: children.len(),
            });
        }
        self.children = children;
        self.index = index;
        Ok(())
    }
}

fn check_unique<S: NavigationState>(children: &[Arc<S>]) -> Result<(), StateError> {
    for (i, child) in children.iter().enumerate() {
        if children[..i].iter().any(|prev| prev.key() == child.key()) {
            return Err(StateError::DuplicateKey(child.key().into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn route(key: &str) -> Arc<Route> {
        Arc::new(Route::new(key))
    }

    fn stack(keys: &[&str]) -> ParentState<Route> {
        let children = keys.iter().map(|k| route(k)).collect::<Vec<_>>();
        let index = children.len().saturating_sub(1);
        ParentState::new(children, index).unwrap()
    }

    fn keys(state: &ParentState<Route>) -> Vec<&str> {
        state.children.iter().map(|c| c.key()).collect()
    }

    #[test]
    fn new_rejects_duplicate_keys() {
        let err = ParentState::new(vec![route("a"), route("b"), route("a")], 0).unwrap_err();
        assert_eq!(err, StateError::DuplicateKey("a".to_string()));
    }

    #[test]
    fn new_rejects_out_of_bounds_focus() {
        let err = ParentState::new(vec![route("a")], 1).unwrap_err();
        assert_eq!(err, StateError::IndexOutOfBounds { index: 1, len: 1 });
    }

    #[test]
    fn new_accepts_empty_tree() {
        let state = ParentState::<Route>::new(Vec::new(), 0).unwrap();
        assert!(state.is_empty());
        assert!(state.focused().is_none());
    }

    #[test]
    fn lookups() {
        let state = stack(&["a", "b", "c"]);
        assert_eq!(state.index_of("b"), Some(1));
        assert!(state.contains("c"));
        assert!(!state.contains("z"));
        assert_eq!(state.get("a").map(|r| r.key()), Some("a"));
        assert_eq!(state.focused().map(|r| r.key()), Some("c"));
    }

    #[test]
    fn push_appends_and_focuses() {
        let mut state = stack(&["a"]);
        state.push(route("b")).unwrap();
        assert_eq!(keys(&state), ["a", "b"]);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn push_existing_key_is_rejected_without_change() {
        let mut state = stack(&["a", "b"]);
        state.jump_to_index(0).unwrap();
        let err = state.push(route("b")).unwrap_err();
        assert_eq!(err, StateError::DuplicateKey("b".to_string()));
        assert_eq!(keys(&state), ["a", "b"]);
        assert_eq!(state.index, 0, "failed push must not move focus");
    }

    #[test]
    fn pop_removes_last_and_focuses_new_last() {
        let mut state = stack(&["a", "b", "c"]);
        let popped = state.pop().unwrap();
        assert_eq!(popped.key(), "c");
        assert_eq!(keys(&state), ["a", "b"]);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn over_pop_is_a_no_op() {
        let mut state = stack(&["a"]);
        assert!(state.pop().is_none());
        assert_eq!(keys(&state), ["a"]);

        let mut state = stack(&["a", "b"]);
        state.jump_to_index(0).unwrap();
        assert!(state.pop().is_none(), "pop with focus at 0 keeps children");
        assert_eq!(keys(&state), ["a", "b"]);
    }

    #[test]
    fn jump_to_key_and_index() {
        let mut state = stack(&["a", "b", "c"]);
        state.jump_to("a").unwrap();
        assert_eq!(state.index, 0);
        state.jump_to_index(2).unwrap();
        assert_eq!(state.index, 2);

        assert_eq!(
            state.jump_to("z").unwrap_err(),
            StateError::KeyNotFound("z".to_string())
        );
        assert_eq!(
            state.jump_to_index(3).unwrap_err(),
            StateError::IndexOutOfBounds { index: 3, len: 3 }
        );
        assert_eq!(state.index, 2);
    }

    #[test]
    fn back_and_forward_stop_at_the_ends() {
        let mut state = stack(&["a", "b"]);
        assert!(!state.forward());
        assert!(state.back());
        assert_eq!(state.index, 0);
        assert!(!state.back());
        assert!(state.forward());
        assert_eq!(state.index, 1);

        let mut empty = ParentState::<Route>::empty();
        assert!(!empty.back());
        assert!(!empty.forward());
    }

    #[test]
    fn replace_at_swaps_child_and_focuses_it() {
        let mut state = stack(&["a", "b", "c"]);
        state.replace_at("a", route("x")).unwrap();
        assert_eq!(keys(&state), ["x", "b", "c"]);
        assert_eq!(state.index, 0);
    }

    #[test]
    fn replace_with_same_key_is_allowed() {
        let mut state = stack(&["a", "b"]);
        let replacement = Arc::new(Route::new("b"));
        state.replace_at_index(1, Arc::clone(&replacement)).unwrap();
        assert!(Arc::ptr_eq(&state.children[1], &replacement));
    }

    #[test]
    fn replace_with_sibling_key_is_rejected() {
        let mut state = stack(&["a", "b"]);
        let err = state.replace_at("a", route("b")).unwrap_err();
        assert_eq!(err, StateError::DuplicateKey("b".to_string()));
        assert_eq!(keys(&state), ["a", "b"]);
    }

    #[test]
    fn replace_with_same_arc_keeps_focus() {
        let mut state = stack(&["a", "b"]);
        let same = Arc::clone(&state.children[0]);
        state.replace_at_index(0, same).unwrap();
        assert_eq!(state.index, 1);
    }

    #[test]
    fn reset_replaces_children() {
        let mut state = stack(&["a", "b"]);
        state.reset(vec![route("x"), route("y"), route("z")], None).unwrap();
        assert_eq!(keys(&state), ["x", "y", "z"]);
        assert_eq!(state.index, 2);

        state.reset(vec![route("p"), route("q")], Some(0)).unwrap();
        assert_eq!(state.index, 0);
    }

    #[test]
    fn reset_validates_routes() {
        let mut state = stack(&["a"]);
        assert_eq!(
            state.reset(Vec::new(), None).unwrap_err(),
            StateError::EmptyRoutes
        );
        assert_eq!(
            state.reset(vec![route("x"), route("x")], None).unwrap_err(),
            StateError::DuplicateKey("x".to_string())
        );
        assert_eq!(
            state.reset(vec![route("x")], Some(4)).unwrap_err(),
            StateError::IndexOutOfBounds { index: 4, len: 1 }
        );
        assert_eq!(keys(&state), ["a"]);
    }

    #[test]
    fn route_params_are_carried() {
        let route = Route::with_params("detail", 42_u32);
        assert_eq!(route.key(), "detail");
        assert_eq!(route.params, 42);
    }
}
