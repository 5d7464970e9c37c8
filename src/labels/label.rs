/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::labels::LabelList;
use crate::types::{Distance, Vertex};
use crate::utils::{apply_permutation_in_place, sort_permutation};

/// A hub label: parallel arrays of hubs and distances.
///
/// After [`sort`](LabelList::sort) and [`dedup_min`](LabelList::dedup_min)
/// the hubs are strictly ascending, which the query merge relies on. There
/// is no interior synchronization: during a labeling round each list has a
/// single writer, and readers only observe lists sorted at the end of a
/// previous round.
#[derive(Debug, Clone, Default)]
pub struct Label {
    hubs: Vec<Vertex>,
    dists: Vec<Distance>,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `(hub, dist)` without any ordering check.
    #[inline(always)]
    pub fn add(&mut self, hub: Vertex, dist: Distance) {
        self.hubs.push(hub);
        self.dists.push(dist);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.hubs.reserve(additional);
        self.dists.reserve(additional);
    }

    pub fn hubs(&self) -> &[Vertex] {
        &self.hubs
    }

    pub fn dists(&self) -> &[Distance] {
        &self.dists
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vertex, Distance)> + '_ {
        self.hubs.iter().copied().zip(self.dists.iter().copied())
    }

    /// Heap footprint in bytes, for the statistics report.
    pub fn heap_bytes(&self) -> usize {
        self.hubs.capacity() * std::mem::size_of::<Vertex>()
            + self.dists.capacity() * std::mem::size_of::<Distance>()
    }
}

impl LabelList for Label {
    fn len(&self) -> usize {
        debug_assert_eq!(self.hubs.len(), self.dists.len());
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
                new_len += 1;
            } else {
                self.dists[new_len - 1] = self.dists[new_len - 1].min(self.dists[i]);
            }
        }
        self.hubs.truncate(new_len);
        self.dists.truncate(new_len);
    }

    fn clear(&mut self) {
        self.hubs.clear();
        self.dists.clear();
    }
}
