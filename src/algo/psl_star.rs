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
use sux::prelude::*;

/// Per-direction neighbor lists driving the filtered expansion.
struct Neighborhoods {
    /// Direct neighbors that are not local maxima.
    n1: Vec<Vec<Vertex>>,
    /// Two-hop neighbors reached through local-maximum intermediaries,
    /// excluding the vertex itself.
    n2: Vec<Vec<Vertex>>,
}

/// The locality-filtered labeling engine.
///
/// A *local maximum* is a vertex all of whose in- and out-neighbors have
/// smaller identifiers (that is, outrank it). Such vertices can never serve
/// as hubs for anything but themselves, so the expansion skips them
/// entirely: the remaining vertices pull candidates from their non-maximum
/// neighbors at distance `d - 1` and, through each maximal intermediary,
/// from its neighbors at distance `d - 2`.
///
/// After the fixed point, the labels of the local maxima are materialized
/// from their neighbors' final labels (shifted by one hop and restricted to
/// smaller hubs), so queries and serialization work uniformly on all
/// vertices. The resulting labeling answers every query exactly like the
/// unfiltered engine.
pub struct PslStar<'a> {
    graphs: PerDirection<&'a Graph>,
    labels: PerDirection<Vec<Label>>,
    local_max: BitVec,
    neighborhoods: PerDirection<Neighborhoods>,
}

impl<'a> PslStar<'a> {
    /// Creates an engine over a graph and its transpose, precomputing the
    /// local-maximum mask and the filtered neighbor lists.
    pub fn new(graph: &'a Graph, transpose: &'a Graph, pl: &mut impl ProgressLog) -> Self {
        assert_eq!(graph.num_nodes(), transpose.num_nodes());
        assert_eq!(graph.num_arcs(), transpose.num_arcs());
        debug_assert!(graph.is_well_formed());
        debug_assert!(transpose.is_well_formed());

        let n = graph.num_nodes();
        let graphs = PerDirection::new(graph, transpose);

        let mut local_max = BitVec::new(n);
        let mut num_maxima = 0;
        for v in 0..n as Vertex {
            // Sorted adjacency: only the largest neighbor can exceed v.
            let is_max = graph.successors(v).last().map_or(true, |&w| w < v)
                && transpose.successors(v).last().map_or(true, |&w| w < v);
            if is_max {
                local_max.set(v as usize, true);
                num_maxima += 1;
            }
        }
        pl.info(format_args!("{} local maxima found", num_maxima));

        let neighborhoods = PerDirection::new(
            Self::build_neighborhoods(graphs[Direction::Fwd], &local_max),
            Self::build_neighborhoods(graphs[Direction::Bwd], &local_max),
        );

        PslStar {
            graphs,
            labels: PerDirection::new(vec![Label::new(); n], vec![Label::new(); n]),
            local_max,
            neighborhoods,
        }
    }

    fn build_neighborhoods(graph: &Graph, local_max: &BitVec) -> Neighborhoods {
        let n = graph.num_nodes();
        let mut n1 = vec![Vec::new(); n];
        let mut n2 = vec![Vec::new(); n];
        let mut intermediaries = LookupSet::new(n);

        for v in 0..n as Vertex {
            if local_max[v as usize] {
                continue;
            }
            intermediaries.clear();
            for &w in graph.successors(v) {
                if local_max[w as usize] {
                    intermediaries.add(w);
                } else {
                    n1[v as usize].push(w);
                }
            }
            for &m in intermediaries.storage() {
                for &w in graph.successors(m) {
                    if w != v {
                        n2[v as usize].push(w);
                    }
                }
            }
        }

        Neighborhoods { n1, n2 }
    }

    /// Runs the filtered labeling to its fixed point, then materializes the
    /// labels of the local maxima.
    pub fn run(&mut self, thread_pool: &ThreadPool, pl: &mut impl ProgressLog) {
        let n = self.graphs[Direction::Fwd].num_nodes();
        if n == 0 {
            return;
        }
        let num_threads = thread_pool.current_num_threads().max(1);
        let chunk_size = n.div_ceil(num_threads);

        pl.item_name("round");
        pl.start("Computing hub labels...");

        // Distances 0 and 1, restricted to non-maxima on both endpoints.
        for dir in Direction::BOTH {
            let n1 = &self.neighborhoods[dir].n1;
            let local_max = &self.local_max;
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
                            if local_max[v as usize] {
                                continue;
                            }
                            label.add(v, 0);
                            for &w in &n1[v as usize] {
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

        self.materialize_maxima(thread_pool);

        pl.done();
        pl.info(format_args!("labels cover distances up to {}", d - 2));
    }

    /// As the unfiltered round, but candidates come from `N1` labels at
    /// `d - 1` and `N2` labels at `d - 2`, and local maxima are skipped.
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
        let neighborhoods = &self.neighborhoods[dir];
        let local_max = &self.local_max;
        let labels = &self.labels;

        thread_pool.install(|| {
            staged.par_chunks_mut(chunk_size).enumerate().for_each_init(
                || LookupSet::new(n),
                |candidates, (chunk, staged)| {
                    let base = (chunk * chunk_size) as Vertex;
                    for (i, staged) in staged.iter_mut().enumerate() {
                        let u = base + i as Vertex;
                        if local_max[u as usize] {
                            continue;
                        }

                        candidates.clear();
                        for &x in &neighborhoods.n1[u as usize] {
                            for (w, dist) in labels[dir][x as usize].iter() {
                                if dist == d - 1 {
                                    candidates.add(w);
                                }
                            }
                        }
                        for &x in &neighborhoods.n2[u as usize] {
                            for (w, dist) in labels[dir][x as usize].iter() {
                                if dist == d - 2 {
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

    /// Builds the labels of the local maxima from their neighbors' final
    /// labels.
    ///
    /// A local maximum never lies on the interior of a canonical path, so
    /// its label is the self-label plus, for each neighbor entry `(w, dist)`
    /// with `w` smaller than the maximum, the pair `(w, dist + 1)`, keeping
    /// the minimum distance per hub. Neighbors of a local maximum are never
    /// local maxima themselves, so their labels are final after the
    /// expansion.
    fn materialize_maxima(&mut self, thread_pool: &ThreadPool) {
        let maxima: Vec<Vertex> = (0..self.graphs[Direction::Fwd].num_nodes() as Vertex)
            .filter(|&v| self.local_max[v as usize])
            .collect();

        for dir in Direction::BOTH {
            let graph = self.graphs[dir];
            let labels = &self.labels[dir];
            let computed: Vec<Label> = thread_pool.install(|| {
                maxima
                    .par_iter()
                    .map(|&v| {
                        let mut label = Label::new();
                        label.add(v, 0);
                        for &x in graph.successors(v) {
                            for (w, dist) in labels[x as usize].iter() {
                                if w < v && dist + 1 < INFINITY {
                                    label.add(w, dist + 1);
                                }
                            }
                        }
                        label.sort();
                        label.dedup_min();
                        label
                    })
                    .collect()
            });
            for (&v, label) in maxima.iter().zip(computed) {
                self.labels[dir][v as usize] = label;
            }
        }
    }

    pub fn into_labels(self) -> HubLabels {
        HubLabels::new(self.labels)
    }
}
