/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::Graph;
use crate::labels::HubLabels;
use crate::types::{Distance, Vertex};
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::collections::HashMap;
use sux::prelude::*;

/// How a vertex relates to its neighborhood-equivalence class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PartitionClass {
    /// Shares its open neighborhood with at least one other vertex.
    SharesOpen = 1,
    /// Shares its closed neighborhood with at least one other vertex (and
    /// no open neighborhood).
    SharesClosed = 2,
    /// Neither neighborhood is shared.
    Unique = 3,
}

/// The graph reduction: vertices with identical neighborhoods are collapsed
/// onto the smallest-id member of their class, and only class
/// representatives (plus unique vertices) are labeled.
///
/// Queries on the original vertex ids go through [`Reduction::distance`],
/// which remaps both endpoints to their representatives' label records and
/// applies the class-internal constants for same-class pairs.
pub struct Reduction {
    pub partition: Vec<PartitionClass>,
    /// The smallest-id member of each vertex's class (`f` in the labeling
    /// literature); a vertex in [`PartitionClass::Unique`] maps to itself.
    pub representative: Vec<Vertex>,
    /// Maps original ids to ids in the reduced graph,
    /// [`NO_VERTEX`](crate::types::NO_VERTEX) for removed vertices.
    pub old_to_new: Vec<Vertex>,
}

impl Reduction {
    /// Collapses equivalence classes of `graph`, returning the reduced
    /// graph and the mappings needed to query it.
    pub fn compute(
        graph: &Graph,
        thread_pool: &ThreadPool,
        pl: &mut impl ProgressLog,
    ) -> (Graph, Reduction) {
        let n = graph.num_nodes();
        pl.start("Reducing the graph...");

        let (partition, representative) = partition_and_representatives(graph, thread_pool);

        let mut keep = BitVec::new(n);
        for v in 0..n {
            if partition[v] == PartitionClass::Unique || representative[v] == v as Vertex {
                keep.set(v, true);
            }
        }
        let (reduced, old_to_new) = graph.remove_vertices(&keep);

        pl.done();
        pl.info(format_args!(
            "{} vertices removed ({} remain)",
            n - reduced.num_nodes(),
            reduced.num_nodes()
        ));

        (
            reduced,
            Reduction {
                partition,
                representative,
                old_to_new,
            },
        )
    }

    /// The distance between two *original* vertex ids, answered from the
    /// reduced labeling.
    ///
    /// Same-class pairs use the class structure directly: members of a
    /// closed class are mutually adjacent, members of an open class meet
    /// through a shared neighbor. All other pairs are remapped onto their
    /// representatives.
    pub fn distance(&self, labels: &HubLabels, s: Vertex, t: Vertex) -> Distance {
        if s == t {
            return 0;
        }
        let fs = self.representative[s as usize];
        let ft = self.representative[t as usize];
        if fs == ft {
            // s != t in the same class, so the class is not Unique.
            return match self.partition[s as usize] {
                PartitionClass::SharesClosed => 1,
                _ => 2,
            };
        }
        labels.distance(
            self.old_to_new[fs as usize],
            self.old_to_new[ft as usize],
        )
    }

    /// The composed original-id to label-record map written as the `f` lines
    /// of the output file.
    pub fn label_mapping(&self) -> Vec<Vertex> {
        self.representative
            .iter()
            .map(|&rep| self.old_to_new[rep as usize])
            .collect()
    }
}

/// Groups vertices by identical open neighborhoods, then the remaining ones
/// by identical closed neighborhoods; every group of two or more gets its
/// smallest member as representative.
fn partition_and_representatives(
    graph: &Graph,
    thread_pool: &ThreadPool,
) -> (Vec<PartitionClass>, Vec<Vertex>) {
    let n = graph.num_nodes();

    // Successor slices are already sorted and duplicate-free.
    let open_adj: Vec<&[Vertex]> = (0..n as Vertex).map(|v| graph.successors(v)).collect();
    let closed_adj: Vec<Vec<Vertex>> = thread_pool.install(|| {
        (0..n as Vertex)
            .into_par_iter()
            .map(|v| {
                let successors = graph.successors(v);
                let mut closed = Vec::with_capacity(successors.len() + 1);
                let position = successors.partition_point(|&w| w < v);
                closed.extend_from_slice(&successors[..position]);
                if successors.get(position) != Some(&v) {
                    closed.push(v);
                }
                closed.extend_from_slice(&successors[position..]);
                closed
            })
            .collect()
    });

    // Scanning ids in ascending order makes the first member of every group
    // its smallest, hence the representative.
    let mut open_groups: HashMap<&[Vertex], (Vertex, usize)> = HashMap::with_capacity(n);
    let mut closed_groups: HashMap<&[Vertex], (Vertex, usize)> = HashMap::with_capacity(n);
    for v in 0..n {
        open_groups
            .entry(open_adj[v])
            .or_insert((v as Vertex, 0))
            .1 += 1;
        closed_groups
            .entry(&closed_adj[v])
            .or_insert((v as Vertex, 0))
            .1 += 1;
    }

    thread_pool.install(|| {
        (0..n)
            .into_par_iter()
            .map(|v| {
                let (open_rep, open_count) = open_groups[open_adj[v]];
                if open_count >= 2 {
                    return (PartitionClass::SharesOpen, open_rep);
                }
                let (closed_rep, closed_count) = closed_groups[&closed_adj[v][..]];
                if closed_count >= 2 {
                    return (PartitionClass::SharesClosed, closed_rep);
                }
                (PartitionClass::Unique, v as Vertex)
            })
            .unzip()
    })
}
