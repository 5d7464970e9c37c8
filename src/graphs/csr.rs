/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::types::{Vertex, NO_VERTEX};
use std::fmt::{Display, Formatter};
use sux::prelude::*;

/// A compact immutable directed graph.
///
/// Adjacency is stored CSR-style: `offsets[v]..offsets[v + 1]` delimits the
/// successors of `v` inside `targets`. Every per-vertex slice is strictly
/// ascending and duplicate-free; [`Graph::from_arcs`] establishes this and
/// all transformations preserve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    offsets: Vec<usize>,
    targets: Vec<Vertex>,
}

impl Graph {
    /// Builds a graph from an arc list.
    ///
    /// Arcs are sorted and deduplicated; every endpoint must be `< num_nodes`.
    pub fn from_arcs(num_nodes: usize, arcs: impl IntoIterator<Item = (Vertex, Vertex)>) -> Self {
        let mut arcs: Vec<_> = arcs.into_iter().collect();
        debug_assert!(arcs
            .iter()
            .all(|&(u, v)| (u as usize) < num_nodes && (v as usize) < num_nodes));
        arcs.sort_unstable();
        arcs.dedup();

        let mut offsets = vec![0; num_nodes + 1];
        for &(u, _) in &arcs {
            offsets[u as usize + 1] += 1;
        }
        for v in 1..offsets.len() {
            offsets[v] += offsets[v - 1];
        }
        let targets = arcs.into_iter().map(|(_, v)| v).collect();

        Graph { offsets, targets }
    }

    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn num_arcs(&self) -> usize {
        self.targets.len()
    }

    pub fn outdegree(&self, v: Vertex) -> usize {
        self.offsets[v as usize + 1] - self.offsets[v as usize]
    }

    /// The successors of `v`, strictly ascending.
    #[inline(always)]
    pub fn successors(&self, v: Vertex) -> &[Vertex] {
        &self.targets[self.offsets[v as usize]..self.offsets[v as usize + 1]]
    }

    /// All arcs in lexicographic order.
    pub fn arcs(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        (0..self.num_nodes() as Vertex)
            .flat_map(move |u| self.successors(u).iter().map(move |&v| (u, v)))
    }

    /// Checks the CSR invariants: monotone offsets, in-range targets, and
    /// strictly ascending duplicate-free successor slices.
    pub fn is_well_formed(&self) -> bool {
        let n = self.num_nodes();
        self.offsets[0] == 0
            && self.offsets[n] == self.num_arcs()
            && self.offsets.windows(2).all(|w| w[0] <= w[1])
            && self.targets.iter().all(|&v| (v as usize) < n)
            && (0..n as Vertex).all(|v| self.successors(v).windows(2).all(|w| w[0] < w[1]))
    }

    /// The transpose graph.
    pub fn transpose(&self) -> Graph {
        let n = self.num_nodes();
        let mut offsets = vec![0; n + 1];
        for &v in &self.targets {
            offsets[v as usize + 1] += 1;
        }
        for v in 1..offsets.len() {
            offsets[v] += offsets[v - 1];
        }

        let mut cursor = offsets.clone();
        let mut targets = vec![NO_VERTEX; self.num_arcs()];
        for (u, v) in self.arcs() {
            targets[cursor[v as usize]] = u;
            cursor[v as usize] += 1;
        }

        // Sources are scanned in ascending order, so each slice is sorted.
        Graph { offsets, targets }
    }

    /// Relabels the graph so that vertex `rank[v]` carries the old
    /// neighborhood of `v`, with neighbor images re-sorted.
    ///
    /// `rank` must be a permutation of `0..num_nodes`.
    pub fn reorder_by_rank(&self, rank: &[Vertex]) -> Graph {
        assert_eq!(rank.len(), self.num_nodes());
        debug_assert!(is_permutation(rank));

        let n = self.num_nodes();
        let mut offsets = vec![0; n + 1];
        for v in 0..n {
            offsets[rank[v] as usize + 1] = self.outdegree(v as Vertex);
        }
        for v in 1..offsets.len() {
            offsets[v] += offsets[v - 1];
        }

        let mut cursor = offsets.clone();
        let mut targets = vec![NO_VERTEX; self.num_arcs()];
        for (u, v) in self.arcs() {
            targets[cursor[rank[u as usize] as usize]] = rank[v as usize];
            cursor[rank[u as usize] as usize] += 1;
        }
        for v in 0..n {
            targets[offsets[v]..offsets[v + 1]].sort_unstable();
        }

        Graph { offsets, targets }
    }

    /// Drops every vertex whose bit in `keep` is unset, compacting the
    /// remaining identifiers.
    ///
    /// Returns the compacted graph and the old-to-new map, with
    /// [`NO_VERTEX`] marking removed vertices.
    pub fn remove_vertices(&self, keep: &BitVec) -> (Graph, Vec<Vertex>) {
        assert_eq!(keep.len(), self.num_nodes());

        let mut old_to_new = vec![NO_VERTEX; self.num_nodes()];
        let mut new_num_nodes = 0;
        for u in 0..self.num_nodes() {
            if keep[u] {
                old_to_new[u] = new_num_nodes as Vertex;
                new_num_nodes += 1;
            }
        }

        let mut offsets = vec![0; new_num_nodes + 1];
        let mut targets = Vec::new();
        for u in 0..self.num_nodes() {
            if !keep[u] {
                continue;
            }
            for &w in self.successors(u as Vertex) {
                if keep[w as usize] {
                    targets.push(old_to_new[w as usize]);
                }
            }
            offsets[old_to_new[u] as usize + 1] = targets.len();
        }

        (Graph { offsets, targets }, old_to_new)
    }

    pub fn stats(&self) -> GraphStats {
        let n = self.num_nodes();
        let mut min_degree = usize::MAX;
        let mut max_degree = 0;
        for v in 0..n as Vertex {
            min_degree = min_degree.min(self.outdegree(v));
            max_degree = max_degree.max(self.outdegree(v));
        }
        GraphStats {
            num_nodes: n,
            num_arcs: self.num_arcs(),
            min_degree: if n == 0 { 0 } else { min_degree },
            max_degree,
        }
    }
}

/// Whether `rank` is a permutation of `0..rank.len()`.
pub fn is_permutation(rank: &[Vertex]) -> bool {
    let n = rank.len();
    let mut seen = BitVec::new(n);
    for &r in rank {
        if r as usize >= n || seen[r as usize] {
            return false;
        }
        seen.set(r as usize, true);
    }
    true
}

/// Degree statistics, printed by the `-s` flag.
#[derive(Debug, Clone, Copy)]
pub struct GraphStats {
    pub num_nodes: usize,
    pub num_arcs: usize,
    pub min_degree: usize,
    pub max_degree: usize,
}

impl Display for GraphStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let avg = if self.num_nodes == 0 {
            0.0
        } else {
            self.num_arcs as f64 / self.num_nodes as f64
        };
        writeln!(f, "Graph statistics:")?;
        writeln!(f, "  Number of vertices: {}", self.num_nodes)?;
        writeln!(f, "  Number of arcs:     {}", self.num_arcs)?;
        writeln!(f, "  Min outdegree:      {}", self.min_degree)?;
        writeln!(f, "  Max outdegree:      {}", self.max_degree)?;
        write!(f, "  Average outdegree:  {:.3}", avg)
    }
}
