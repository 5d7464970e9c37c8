/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use psl_labeling::prelude::*;
use psl_labeling::threads;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

fn run_psl(graph: &Graph, num_threads: usize) -> HubLabels {
    let transpose = graph.transpose();
    let mut psl = Psl::new(graph, &transpose);
    psl.run(&threads![num_threads], no_logging![]);
    psl.into_labels()
}

fn bfs_distances(graph: &Graph, source: Vertex) -> Vec<Distance> {
    let mut dist = vec![INFINITY; graph.num_nodes()];
    let mut queue = VecDeque::new();
    dist[source as usize] = 0;
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        for &w in graph.successors(u) {
            if dist[w as usize] == INFINITY {
                dist[w as usize] = dist[u as usize] + 1;
                queue.push_back(w);
            }
        }
    }
    dist
}

/// A connected symmetric graph: a bidirected ring plus random bidirected
/// chords. The reduction's class-internal distance constants assume
/// symmetric neighborhoods.
fn symmetric_random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut arcs = Vec::new();
    for u in 0..n as Vertex {
        let v = (u + 1) % n as Vertex;
        arcs.push((u, v));
        arcs.push((v, u));
    }
    for u in 0..n as Vertex {
        for v in (u + 1)..n as Vertex {
            if rng.gen_bool(p) {
                arcs.push((u, v));
                arcs.push((v, u));
            }
        }
    }
    Graph::from_arcs(n, arcs)
}

/// Vertices 2 and 3 share the open neighborhood `{4}`; vertices 0 and 1
/// share their closed neighborhood; vertex 4 is unique.
fn class_collapse_graph() -> Graph {
    Graph::from_arcs(
        5,
        [(2, 4), (3, 4), (4, 0), (4, 1), (0, 1), (1, 0)],
    )
}

#[test]
fn test_partition_classes() -> Result<()> {
    let graph = class_collapse_graph();
    let (reduced, reduction) = Reduction::compute(&graph, &threads![2], no_logging![]);

    assert_eq!(reduction.partition[2], PartitionClass::SharesOpen);
    assert_eq!(reduction.partition[3], PartitionClass::SharesOpen);
    assert_eq!(reduction.partition[0], PartitionClass::SharesClosed);
    assert_eq!(reduction.partition[1], PartitionClass::SharesClosed);
    assert_eq!(reduction.partition[4], PartitionClass::Unique);

    assert_eq!(reduction.representative, vec![0, 0, 2, 2, 4]);

    // Only representatives and unique vertices survive.
    assert_eq!(reduced.num_nodes(), 3);
    assert_eq!(reduction.old_to_new[1], NO_VERTEX);
    assert_eq!(reduction.old_to_new[3], NO_VERTEX);
    Ok(())
}

#[test]
fn test_collapsed_vertex_answers_through_representative() -> Result<()> {
    let graph = class_collapse_graph();
    let (reduced, reduction) = Reduction::compute(&graph, &threads![2], no_logging![]);
    let labels = run_psl(&reduced, 2);

    // Both class members reach 4 in one hop.
    assert_eq!(reduction.distance(&labels, 2, 4), 1);
    assert_eq!(reduction.distance(&labels, 3, 4), 1);

    // Same-class pairs use the class structure directly.
    assert_eq!(reduction.distance(&labels, 0, 1), 1);
    assert_eq!(reduction.distance(&labels, 1, 0), 1);
    assert_eq!(reduction.distance(&labels, 3, 3), 0);

    // A pair of surviving vertices is a plain query.
    assert_eq!(reduction.distance(&labels, 4, 1), 1);
    Ok(())
}

#[test]
fn test_label_mapping_composes_representative_and_renumbering() -> Result<()> {
    let graph = class_collapse_graph();
    let (reduced, reduction) = Reduction::compute(&graph, &threads![2], no_logging![]);
    let mapping = reduction.label_mapping();

    assert_eq!(mapping.len(), graph.num_nodes());
    assert_eq!(mapping[3], reduction.old_to_new[2]);
    assert_eq!(mapping[1], reduction.old_to_new[0]);
    assert!(mapping.iter().all(|&m| (m as usize) < reduced.num_nodes()));

    let labels = run_psl(&reduced, 2);
    let mut out = Vec::new();
    labels.write(&mut out, Some(&mapping))?;
    let out = String::from_utf8(out)?;
    assert!(out.starts_with("V 3\n"));
    assert_eq!(out.matches("\nf ").count(), graph.num_nodes());
    Ok(())
}

#[test]
fn test_reduction_preserves_distances_on_symmetric_graphs() -> Result<()> {
    for seed in 0..4 {
        let graph = symmetric_random_graph(24, 0.12, seed);
        let (reduced, reduction) = Reduction::compute(&graph, &threads![4], no_logging![]);
        let labels = run_psl(&reduced, 4);

        for s in 0..graph.num_nodes() as Vertex {
            let dist = bfs_distances(&graph, s);
            for t in 0..graph.num_nodes() as Vertex {
                assert_eq!(
                    reduction.distance(&labels, s, t),
                    dist[t as usize],
                    "wrong reduced distance from {} to {} (seed {})",
                    s,
                    t,
                    seed
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_no_classes_means_no_removal() -> Result<()> {
    // A directed path has pairwise distinct neighborhoods.
    let graph = Graph::from_arcs(4, [(0, 1), (1, 2), (2, 3)]);
    let (reduced, reduction) = Reduction::compute(&graph, &threads![2], no_logging![]);

    assert_eq!(reduced.num_nodes(), 4);
    assert!(reduction
        .partition
        .iter()
        .all(|&p| p == PartitionClass::Unique));
    assert_eq!(reduction.old_to_new, vec![0, 1, 2, 3]);
    Ok(())
}
