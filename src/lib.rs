/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! 2-hop hub labeling for directed unweighted graphs.
//!
//! The crate computes, for every vertex, a forward and a backward list of
//! `(hub, distance)` pairs such that the shortest-path distance between any
//! ordered pair of vertices is the minimum sum over the hubs common to the
//! source's forward list and the target's backward list. Labels are built by
//! the parallel shortest-path labeling algorithm ([`Psl`](algo::Psl)),
//! optionally sharpened by a neighborhood-equivalence reduction
//! ([`Reduction`](algo::Reduction)) and a local-maximum filter
//! ([`PslStar`](algo::PslStar)).

pub mod algo;
pub mod graphs;
pub mod labels;
pub mod types;
pub mod utils;

pub mod prelude {
    pub use crate::algo::{PartitionClass, Psl, PslStar, Reduction};
    pub use crate::graphs::{degree_rank, Graph};
    pub use crate::labels::{query, sub_query, HubLabels, Label, LabelList};
    pub use crate::types::*;
    pub use crate::utils::Threads;
}
