/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Hub labels and the distance queries over them.
//!
//! A label is a per-vertex, per-direction list of `(hub, distance)` pairs;
//! for every reachable pair `(s, t)` some hub common to the forward list of
//! `s` and the backward list of `t` realizes the shortest-path distance as
//! the sum of its two entries (the 2-hop cover property). Two concrete list
//! variants share the [`LabelList`] surface: the plain [`Label`] produced by
//! the engines and the refined [`BitParallelLabel`].

mod label;
pub use label::Label;

mod bit_parallel;
pub use bit_parallel::{query_bit_parallel, BitParallelLabel, HubBitset};

mod store;
pub use store::{HubLabels, LabelStats};

use crate::types::{Distance, Vertex, INFINITY};

/// The operations common to all label variants.
pub trait LabelList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The hub at position `i`.
    fn hub(&self, i: usize) -> Vertex;

    /// The distance at position `i`.
    fn dist(&self, i: usize) -> Distance;

    /// Sorts all parallel arrays by hub.
    fn sort(&mut self);

    /// Collapses runs of equal hubs, keeping the minimum distance.
    ///
    /// Requires the list to be sorted.
    fn dedup_min(&mut self);

    fn clear(&mut self);

    /// Linear-scan membership test.
    fn contains(&self, hub: Vertex) -> bool {
        (0..self.len()).any(|i| self.hub(i) == hub)
    }
}

fn is_sorted<L: LabelList>(label: &L) -> bool {
    (1..label.len()).all(|i| label.hub(i - 1) <= label.hub(i))
}

/// The sorted-merge distance query.
///
/// Both lists must be sorted ascending by hub. Returns [`INFINITY`] when no
/// common hub exists or every common hub overshoots it.
pub fn query<L: LabelList, R: LabelList>(left: &L, right: &R) -> Distance {
    debug_assert!(is_sorted(left));
    debug_assert!(is_sorted(right));

    let mut result = INFINITY;
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left.hub(i) == right.hub(j) {
            result = result.min(left.dist(i) + right.dist(j));
            i += 1;
            j += 1;
        } else if left.hub(i) < right.hub(j) {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// The pruning variant of [`query`]: a matched hub contributes only when
/// both of its distances are strictly below `cutoff`.
///
/// The strictness matters: entries at distance `cutoff` are the ones being
/// decided in the current round and must not prune one another.
pub fn sub_query<L: LabelList, R: LabelList>(left: &L, right: &R, cutoff: Distance) -> Distance {
    debug_assert!(is_sorted(left));
    debug_assert!(is_sorted(right));

    let mut result = INFINITY;
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left.hub(i) == right.hub(j) {
            if left.dist(i) < cutoff && right.dist(j) < cutoff {
                result = result.min(left.dist(i) + right.dist(j));
            }
            i += 1;
            j += 1;
        } else if left.hub(i) < right.hub(j) {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}
