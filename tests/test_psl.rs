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

fn label_pairs(labels: &HubLabels, dir: Direction, v: Vertex) -> Vec<(Vertex, Distance)> {
    labels.label(dir, v).iter().collect()
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

fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut arcs = Vec::new();
    for u in 0..n as Vertex {
        for v in 0..n as Vertex {
            if u != v && rng.gen_bool(p) {
                arcs.push((u, v));
            }
        }
    }
    Graph::from_arcs(n, arcs)
}

/// Invariants that must hold for every list after the engine terminates:
/// strictly ascending hubs, no hub above the vertex itself, distances below
/// the sentinel, and the self-label at distance 0.
fn check_invariants(labels: &HubLabels) {
    for v in 0..labels.num_vertices() as Vertex {
        for dir in Direction::BOTH {
            let pairs = label_pairs(labels, dir, v);
            assert!(
                pairs.windows(2).all(|w| w[0].0 < w[1].0),
                "hubs of vertex {} not strictly ascending",
                v
            );
            assert!(pairs.iter().all(|&(hub, _)| hub <= v));
            assert!(pairs.iter().all(|&(_, dist)| dist < INFINITY));
            // Under ascending hub order the self-label is the last entry.
            assert_eq!(pairs.last(), Some(&(v, 0)));
        }
    }
}

fn assert_all_distances_match(graph: &Graph, labels: &HubLabels) {
    for s in 0..graph.num_nodes() as Vertex {
        let dist = bfs_distances(graph, s);
        for t in 0..graph.num_nodes() as Vertex {
            assert_eq!(
                labels.distance(s, t),
                dist[t as usize],
                "wrong distance from {} to {}",
                s,
                t
            );
        }
    }
}

#[test]
fn test_path() -> Result<()> {
    // 0 -> 1 -> 2 -> 3 with identity rank.
    let graph = Graph::from_arcs(4, [(0, 1), (1, 2), (2, 3)]);
    let labels = run_psl(&graph, 2);
    check_invariants(&labels);

    assert_eq!(
        label_pairs(&labels, Direction::Bwd, 3),
        vec![(0, 3), (1, 2), (2, 1), (3, 0)]
    );
    assert_eq!(label_pairs(&labels, Direction::Fwd, 0), vec![(0, 0)]);
    assert_eq!(labels.distance(0, 3), 3);
    assert_eq!(labels.distance(3, 0), INFINITY);
    Ok(())
}

#[test]
fn test_directed_cycle() -> Result<()> {
    let graph = Graph::from_arcs(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
    let labels = run_psl(&graph, 2);
    check_invariants(&labels);

    assert_eq!(labels.distance(0, 2), 2);
    assert_eq!(labels.distance(3, 1), 2);
    assert_eq!(labels.distance(2, 0), 2);
    assert_all_distances_match(&graph, &labels);
    Ok(())
}

#[test]
fn test_tournament() -> Result<()> {
    let graph = Graph::from_arcs(3, [(0, 1), (0, 2), (1, 2)]);
    let labels = run_psl(&graph, 2);
    check_invariants(&labels);

    assert_eq!(labels.distance(0, 1), 1);
    assert_eq!(labels.distance(0, 2), 1);
    assert_eq!(labels.distance(1, 2), 1);
    assert_eq!(labels.distance(2, 0), INFINITY);
    Ok(())
}

#[test]
fn test_disconnected_arcs() -> Result<()> {
    let graph = Graph::from_arcs(4, [(0, 1), (2, 3)]);
    let labels = run_psl(&graph, 2);
    check_invariants(&labels);

    assert_eq!(labels.distance(0, 1), 1);
    assert_eq!(labels.distance(0, 3), INFINITY);
    assert_eq!(labels.distance(2, 1), INFINITY);
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let graph = Graph::from_arcs(0, []);
    let labels = run_psl(&graph, 2);
    assert_eq!(labels.num_vertices(), 0);

    let mut out = Vec::new();
    labels.write(&mut out, None)?;
    assert_eq!(String::from_utf8(out)?, "V 0\n");
    Ok(())
}

#[test]
fn test_single_vertex() -> Result<()> {
    let graph = Graph::from_arcs(1, []);
    let labels = run_psl(&graph, 1);
    check_invariants(&labels);

    assert_eq!(label_pairs(&labels, Direction::Fwd, 0), vec![(0, 0)]);
    assert_eq!(label_pairs(&labels, Direction::Bwd, 0), vec![(0, 0)]);
    assert_eq!(labels.distance(0, 0), 0);
    Ok(())
}

#[test]
fn test_two_cycle() -> Result<()> {
    let graph = Graph::from_arcs(2, [(0, 1), (1, 0)]);
    let labels = run_psl(&graph, 1);
    check_invariants(&labels);

    assert_eq!(label_pairs(&labels, Direction::Fwd, 1), vec![(0, 1), (1, 0)]);
    assert_eq!(label_pairs(&labels, Direction::Bwd, 1), vec![(0, 1), (1, 0)]);
    assert_eq!(labels.distance(0, 1), 1);
    assert_eq!(labels.distance(1, 0), 1);
    Ok(())
}

#[test]
fn test_self_loop() -> Result<()> {
    let graph = Graph::from_arcs(2, [(0, 0), (0, 1)]);
    let labels = run_psl(&graph, 1);
    check_invariants(&labels);

    assert_eq!(labels.distance(0, 0), 0);
    assert_eq!(labels.distance(0, 1), 1);
    Ok(())
}

#[test]
fn test_random_graphs_against_bfs() -> Result<()> {
    for seed in 0..5 {
        let graph = random_graph(30, 0.08, seed);
        let labels = run_psl(&graph, 4);
        check_invariants(&labels);
        assert_all_distances_match(&graph, &labels);
    }
    Ok(())
}

#[test]
fn test_random_graphs_reordered_by_degree() -> Result<()> {
    // Relabeling by rank must not change any answer, modulo the relabeling
    // itself.
    for seed in 5..8 {
        let graph = random_graph(25, 0.1, seed);
        let rank = degree_rank(&graph);
        let reordered = graph.reorder_by_rank(&rank);
        let labels = run_psl(&reordered, 4);
        check_invariants(&labels);

        for s in 0..graph.num_nodes() as Vertex {
            let dist = bfs_distances(&graph, s);
            for t in 0..graph.num_nodes() as Vertex {
                assert_eq!(
                    labels.distance(rank[s as usize], rank[t as usize]),
                    dist[t as usize]
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_deterministic_across_thread_counts() -> Result<()> {
    let graphs = [
        Graph::from_arcs(4, [(0, 1), (1, 2), (2, 3)]),
        Graph::from_arcs(4, [(0, 1), (1, 2), (2, 3), (3, 0)]),
        Graph::from_arcs(4, [(0, 1), (2, 3)]),
        random_graph(40, 0.07, 42),
    ];
    for graph in &graphs {
        let mut serialized_single = Vec::new();
        run_psl(graph, 1).write(&mut serialized_single, None)?;
        let mut serialized_parallel = Vec::new();
        run_psl(graph, 8).write(&mut serialized_parallel, None)?;
        assert_eq!(serialized_single, serialized_parallel);
    }
    Ok(())
}

#[test]
fn test_transpose_swaps_directions() -> Result<()> {
    // Labeling the transpose is the same labeling with the directions
    // exchanged.
    let graph = random_graph(20, 0.1, 9);
    let labels = run_psl(&graph, 2);
    let transpose = graph.transpose();
    let transpose_labels = run_psl(&transpose, 2);

    for v in 0..graph.num_nodes() as Vertex {
        assert_eq!(
            label_pairs(&labels, Direction::Fwd, v),
            label_pairs(&transpose_labels, Direction::Bwd, v)
        );
        assert_eq!(
            label_pairs(&labels, Direction::Bwd, v),
            label_pairs(&transpose_labels, Direction::Fwd, v)
        );
    }
    Ok(())
}
