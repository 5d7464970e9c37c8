/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::labels::LabelList;
use crate::types::{Distance, Vertex, INFINITY};
use crate::utils::{apply_permutation_in_place, sort_permutation};

/// The bitset word attached to every bit-parallel label entry.
pub type HubBitset = u64;

/// A hub label carrying, per entry, two bitsets over a fixed batch of roots:
/// one for roots at distance `dist - 1` from the hub and one for roots at
/// distance `dist`.
///
/// [`query_bit_parallel`] exploits the bitsets to tighten the plain distance
/// sum by up to two hops without extra entries. This variant is an optional
/// refinement of [`Label`](crate::labels::Label); the engines do not produce
/// it.
#[derive(Debug, Clone, Default)]
pub struct BitParallelLabel {
    hubs: Vec<Vertex>,
    dists: Vec<Distance>,
    /// `bitsets[1][i]` covers distance `dists[i] - 1`, `bitsets[0][i]`
    /// distance `dists[i]`.
    bitsets: [Vec<HubBitset>; 2],
}

impl BitParallelLabel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn add(&mut self, hub: Vertex, dist: Distance, set_minus_one: HubBitset, set_zero: HubBitset) {
        self.hubs.push(hub);
        self.dists.push(dist);
        self.bitsets[1].push(set_minus_one);
        self.bitsets[0].push(set_zero);
    }

    #[inline(always)]
    pub fn bitset_minus_one(&self, i: usize) -> HubBitset {
        self.bitsets[1][i]
    }

    #[inline(always)]
    pub fn bitset_zero(&self, i: usize) -> HubBitset {
        self.bitsets[0][i]
    }

    pub fn or_bitset_minus_one(&mut self, i: usize, other: HubBitset) {
        self.bitsets[1][i] |= other;
    }

    pub fn or_bitset_zero(&mut self, i: usize, other: HubBitset) {
        self.bitsets[0][i] |= other;
    }
}

impl LabelList for BitParallelLabel {
    fn len(&self) -> usize {
        debug_assert_eq!(self.hubs.len(), self.dists.len());
        debug_assert_eq!(self.hubs.len(), self.bitsets[0].len());
        debug_assert_eq!(self.hubs.len(), self.bitsets[1].len());
        self.hubs.len()
    }

    #[inline(always)]
    fn hub(&self, i: usize) -> Vertex {
        self.hubs[i]
    }

    #[inline(always)]
    fn dist(&self, i: usize) -> Distance {
        self.dists[i]
    }

    fn sort(&mut self) {
        let perm = sort_permutation(&self.hubs);
        apply_permutation_in_place(&mut self.hubs, &perm);
        apply_permutation_in_place(&mut self.dists, &perm);
        apply_permutation_in_place(&mut self.bitsets[1], &perm);
        apply_permutation_in_place(&mut self.bitsets[0], &perm);
    }

    fn dedup_min(&mut self) {
        debug_assert!(self.hubs.windows(2).all(|w| w[0] <= w[1]));
        if self.hubs.is_empty() {
            return;
        }
        let mut new_len = 1;
        for i in 1..self.hubs.len() {
            if self.hubs[new_len - 1] != self.hubs[i] {
                self.hubs[new_len] = self.hubs[i];
                self.dists[new_len] = self.dists[i];
                self.bitsets[1][new_len] = self.bitsets[1][i];
                self.bitsets[0][new_len] = self.bitsets[0][i];
                new_len += 1;
            } else {
                self.dists[new_len - 1] = self.dists[new_len - 1].min(self.dists[i]);
            }
        }
        self.hubs.truncate(new_len);
        self.dists.truncate(new_len);
        self.bitsets[1].truncate(new_len);
        self.bitsets[0].truncate(new_len);
    }

    fn clear(&mut self) {
        self.hubs.clear();
        self.dists.clear();
        self.bitsets[1].clear();
        self.bitsets[0].clear();
    }
}

/// The sorted-merge distance query for bit-parallel labels.
///
/// On a matched hub, a non-empty intersection of the distance `d - 1`
/// bitsets shortens the plain sum by two, and a crossed intersection
/// (`d - 1` against `d`) by one.
pub fn query_bit_parallel(left: &BitParallelLabel, right: &BitParallelLabel) -> Distance {
    let mut result = INFINITY;
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left.hub(i) == right.hub(j) {
            let sum = left.dist(i) + right.dist(j);
            let correction = if left.bitset_minus_one(i) & right.bitset_minus_one(j) != 0 {
                2
            } else if (left.bitset_zero(i) & right.bitset_minus_one(j))
                | (left.bitset_minus_one(i) & right.bitset_zero(j))
                != 0
            {
                1
            } else {
                0
            };
            result = result.min(sum - correction);
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
