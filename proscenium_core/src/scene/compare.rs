// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene ordering and equality predicates.

use alloc::sync::Arc;
use core::cmp::Ordering;

use super::Scene;
use crate::state::NavigationState;

/// Compares two keys by length first, then lexicographically.
///
/// Ordering by length first sorts numeric suffixes naturally (`"9"` before
/// `"11"`). For arbitrary mixed keys it is only a deterministic total order,
/// not a natural one.
///
/// Lengths and contents are measured in UTF-16 code units so that lists
/// produced here order identically to lists produced by JavaScript hosts.
#[must_use]
pub fn compare_keys(one: &str, two: &str) -> Ordering {
    one.encode_utf16()
        .count()
        .cmp(&two.encode_utf16().count())
        .then_with(|| one.encode_utf16().cmp(two.encode_utf16()))
}

/// Orders scenes by index, then by [`compare_keys`].
#[must_use]
pub fn compare_scenes<S>(one: &Scene<S>, two: &Scene<S>) -> Ordering {
    one.index
        .cmp(&two.index)
        .then_with(|| compare_keys(&one.key, &two.key))
}

/// Returns `true` if two scenes describe the same render.
///
/// Flags, index and key must match, and both must wrap the *same* navigation
/// state allocation. Structurally equal but distinct states are considered
/// different.
#[must_use]
pub fn shallow_eq<S: NavigationState>(one: &Scene<S>, two: &Scene<S>) -> bool {
    one.key == two.key
        && one.index == two.index
        && one.is_stale == two.is_stale
        && one.is_active == two.is_active
        && Arc::ptr_eq(&one.navigation_state, &two.navigation_state)
        && one.navigation_state.key() == two.navigation_state.key()
}
