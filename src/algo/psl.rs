/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::Graph;
use crate::labels::{sub_query, HubLabels, Label, LabelList};
use crate::types::{Direction, Distance, PerDirection, Vertex, INFINITY};
use crate::utils::LookupSet;
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::atomic::{AtomicBool, Ordering};

/// The parallel shortest-path labeling engine.
///
/// Grows all forward and backward labels synchronously, one distance per
/// round, until a round adds nothing. Vertex identifiers double as ranks, so
/// both input graphs must already be relabeled by
/// [`reorder_by_rank`](Graph::reorder_by_rank) (or the identity order must be
/// the intended rank).
///
/// Each round partitions the vertices into one contiguous chunk per thread.
/// A chunk owner has exclusive write access to the labels of its vertices
/// and reads foreign labels freely; hubs accepted in the current round are
/// staged in per-vertex buffers and only appended and re-sorted in a second
/// chunked pass, so no worker ever observes a half-built list. Since the
/// pruning cutoff ignores distances of the current round anyway, every
/// vertex's outcome depends solely on the previous round's state, and the
/// labeling is identical for every thread count.
///
/// # Examples
///
/// ```
/// use psl_labeling::prelude::*;
/// use psl_labeling::threads;
/// use dsi_progress_logger::no_logging;
///
/// // The path 0 -> 1 -> 2.
/// let graph = Graph::from_arcs(3, [(0, 1), (1, 2)]);
/// let transpose = graph.transpose();
/// let mut psl = Psl::new(&graph, &transpose);
/// psl.run(&threads![2], no_logging![]);
/// let labels = psl.into_labels();
/// assert_eq!(labels.distance(0, 2), 2);
/// assert_eq!(labels.distance(2, 0), INFINITY);
/// ```
pub struct Psl<'a> {
    graphs: PerDirection<&'a Graph>,
    labels: PerDirection<Vec<Label>>,
}

impl<'a> Psl<'a> {
    /// Creates an engine over a graph and its transpose.
    pub fn new(graph: &'a Graph, transpose: &'a Graph) -> Self {
        assert_eq!(graph.num_nodes(), transpose.num_nodes());
        assert_eq!(graph.num_arcs(), transpose.num_arcs());
        debug_assert!(graph.is_well_formed());
        debug_assert!(transpose.is_well_formed());

        let n = graph.num_nodes();
        Psl {
            graphs: PerDirection::new(graph, transpose),
            labels: PerDirection::new(vec![Label::new(); n], vec![Label::new(); n]),
        }
    }

    /// Runs the labeling to its fixed point.
    pub fn run(&mut self, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) {
        let n = self.graphs[Direction::Fwd].num_nodes();
        if n == 0 {
            return;
        }
        let num_threads = thread_pool.current_num_threads().max(1);
        let chunk_size = n.div_ceil(num_threads);

        pl.item_name("round");
        pl.start("Computing hub labels...");

        // Distances 0 and 1: the self-label plus one entry per adjacent
        // higher-rank endpoint, deduplicated.
        for dir in Direction::BOTH {
            let graph = self.graphs[dir];
            let labels = &mut self.labels[dir];
            thread_pool.install(|| {
                labels
                    .par_chunks_mut(chunk_size)
                    .enumerate()
                    .for_each(|(chunk, labels)| {
                        let base = (chunk * chunk_size) as Vertex;
                        for (i, label) in labels.iter_mut().enumerate() {
                            let v = base + i as Vertex;
                            label.clear();
                            label.add(v, 0);
                            for &w in graph.successors(v) {
                                // The hub of a one-hop path is its
                                // higher-rank endpoint.
                                let keep = match dir {
                                    Direction::Fwd => w <= v,
                                    Direction::Bwd => w < v,
                                };
                                if keep {
                                    label.add(w, 1);
                                }
                            }
                            label.sort();
                            label.dedup_min();
                        }
                    });
            });
        }

        let mut staged: Vec<Vec<Vertex>> = vec![Vec::new(); n];
        let new_labels_found = AtomicBool::new(true);
        let mut d: Distance = 2;

        while new_labels_found.load(Ordering::Relaxed) && d < INFINITY {
            new_labels_found.store(false, Ordering::Relaxed);

            for dir in Direction::BOTH {
                self.collect_round(dir, d, chunk_size, &mut staged, &new_labels_found, thread_pool);
                self.flush_round(dir, d, chunk_size, &mut staged, thread_pool);
            }

            pl.update();
            d += 1;
        }

        pl.done();
        pl.info(format_args!("labels cover distances up to {}", d - 2));
    }

    /// One direction of a round: for every owned vertex, gather the hubs
    /// reachable in exactly `d` hops, drop the dominated ones, and stage the
    /// survivors. Labels are only read here.
    fn collect_round(
        &self,
        dir: Direction,
        d: Distance,
        chunk_size: usize,
        staged: &mut [Vec<Vertex>],
        new_labels_found: &AtomicBool,
        thread_pool: &ThreadPool,
    ) {
        let n = self.graphs[Direction::Fwd].num_nodes();
        let graph = self.graphs[dir];
        let labels = &self.labels;

        thread_pool.install(|| {
            staged.par_chunks_mut(chunk_size).enumerate().for_each_init(
                || LookupSet::new(n),
                |candidates, (chunk, staged)| {
                    let base = (chunk * chunk_size) as Vertex;
                    for (i, staged) in staged.iter_mut().enumerate() {
                        let u = base + i as Vertex;

                        // Any hub at distance d is a hub at distance d - 1
                        // of some neighbor.
                        candidates.clear();
                        for &x in graph.successors(u) {
                            for (w, dist) in labels[dir][x as usize].iter() {
                                if dist == d - 1 {
                                    candidates.add(w);
                                }
                            }
                        }

                        let own = &labels[dir][u as usize];
                        for &w in candidates.storage() {
                            if u <= w {
                                continue;
                            }
                            if sub_query(&labels[dir.flip()][w as usize], own, d) <= d {
                                continue;
                            }
                            staged.push(w);
                        }
                        if !staged.is_empty() {
                            new_labels_found.store(true, Ordering::Relaxed);
                        }
                    }
                },
            );
        });
    }

    /// The second half of a round: every owner appends its staged hubs at
    /// distance `d` and restores the hub order.
    fn flush_round(
        &mut self,
        dir: Direction,
        d: Distance,
        chunk_size: usize,
        staged: &mut [Vec<Vertex>],
        thread_pool: &ThreadPool,
    ) {
        let labels = &mut self.labels[dir];
        thread_pool.install(|| {
            labels
                .par_chunks_mut(chunk_size)
                .zip(staged.par_chunks_mut(chunk_size))
                .for_each(|(labels, staged)| {
                    for (label, staged) in labels.iter_mut().zip(staged.iter_mut()) {
                        if staged.is_empty() {
                            continue;
                        }
                        label.reserve(staged.len());
                        for &w in staged.iter() {
                            label.add(w, d);
                        }
                        staged.clear();
                        label.sort();
                    }
                });
        });
    }

    pub fn into_labels(self) -> HubLabels {
        HubLabels::new(self.labels)
    }
}
