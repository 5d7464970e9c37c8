use crate::graphs::Graph;
use crate::types::Vertex;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Builds the canonical hub order: descending total degree (in + out), ties
/// broken by a fixed-seed shuffle so that runs are reproducible.
///
/// The result is a permutation mapping each vertex to its new identifier;
/// the highest-degree vertex receives id 0. Feed it to
/// [`Graph::reorder_by_rank`] and use vertex ids as ranks from then on.
pub fn degree_rank(graph: &Graph) -> Vec<Vertex> {
    let n = graph.num_nodes();
    let mut degree = vec![0usize; n];
    for (u, v) in graph.arcs() {
        degree[u as usize] += 1;
        degree[v as usize] += 1;
    }

    let mut tiebreak: Vec<u32> = (0..n as u32).collect();
    tiebreak.shuffle(&mut SmallRng::seed_from_u64(42));

    let mut order: Vec<Vertex> = (0..n as Vertex).collect();
    order.sort_unstable_by(|&a, &b| {
        (degree[b as usize], tiebreak[b as usize]).cmp(&(degree[a as usize], tiebreak[a as usize]))
    });

    let mut rank = vec![0; n];
    for (position, &v) in order.iter().enumerate() {
        rank[v as usize] = position as Vertex;
    }
    rank
}
