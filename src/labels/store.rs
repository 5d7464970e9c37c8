/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::labels::{query, Label, LabelList};
use crate::types::{Direction, Distance, PerDirection, Vertex, INFINITY};
use std::fmt::{Display, Formatter};
use std::io::Write;

/// The complete labeling of a graph: one forward and one backward label per
/// vertex.
#[derive(Debug, Clone)]
pub struct HubLabels {
    labels: PerDirection<Vec<Label>>,
}

impl HubLabels {
    pub(crate) fn new(labels: PerDirection<Vec<Label>>) -> Self {
        debug_assert_eq!(labels[Direction::Fwd].len(), labels[Direction::Bwd].len());
        HubLabels { labels }
    }

    pub fn num_vertices(&self) -> usize {
        self.labels[Direction::Fwd].len()
    }

    pub fn label(&self, dir: Direction, v: Vertex) -> &Label {
        &self.labels[dir][v as usize]
    }

    /// The shortest-path distance from `s` to `t`, [`INFINITY`] if `t` is
    /// unreachable.
    pub fn distance(&self, s: Vertex, t: Vertex) -> Distance {
        query(self.label(Direction::Fwd, s), self.label(Direction::Bwd, t))
    }

    /// Serializes the labeling.
    ///
    /// The format is line-oriented ASCII: a `V <n>` header, then per vertex
    /// one `o` (forward) and one `i` (backward) line of `hub dist` pairs.
    /// When `vertex_map` is given (the reduction ran), one `f <old> <new>`
    /// line per original vertex follows, mapping it to the label record that
    /// answers for it.
    pub fn write(&self, writer: &mut impl Write, vertex_map: Option<&[Vertex]>) -> std::io::Result<()> {
        writeln!(writer, "V {}", self.num_vertices())?;

        for v in 0..self.num_vertices() as Vertex {
            for (tag, dir) in [("o", Direction::Fwd), ("i", Direction::Bwd)] {
                write!(writer, "{} {}", tag, v)?;
                for (hub, dist) in self.label(dir, v).iter() {
                    debug_assert!(dist < INFINITY);
                    write!(writer, " {} {}", hub, dist)?;
                }
                writeln!(writer)?;
            }
        }

        if let Some(map) = vertex_map {
            for (old, &new) in map.iter().enumerate() {
                writeln!(writer, "f {} {}", old, new)?;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> LabelStats {
        let sizes = |labels: &[Label]| {
            let mut min = usize::MAX;
            let mut max = 0;
            let mut total = 0;
            for label in labels {
                min = min.min(label.len());
                max = max.max(label.len());
                total += label.len();
            }
            (if labels.is_empty() { 0 } else { min }, max, total)
        };
        let (fwd_min, fwd_max, fwd_total) = sizes(&self.labels[Direction::Fwd]);
        let (bwd_min, bwd_max, bwd_total) = sizes(&self.labels[Direction::Bwd]);
        let heap_bytes: usize = self.labels.0.iter().flatten().map(Label::heap_bytes).sum();

        LabelStats {
            num_vertices: self.num_vertices(),
            fwd_min,
            fwd_max,
            fwd_total,
            bwd_min,
            bwd_max,
            bwd_total,
            heap_bytes,
        }
    }
}

/// Label-size statistics, printed by the `-s` flag.
#[derive(Debug, Clone, Copy)]
pub struct LabelStats {
    pub num_vertices: usize,
    pub fwd_min: usize,
    pub fwd_max: usize,
    pub fwd_total: usize,
    pub bwd_min: usize,
    pub bwd_max: usize,
    pub bwd_total: usize,
    pub heap_bytes: usize,
}

impl Display for LabelStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let avg = |total: usize| {
            if self.num_vertices == 0 {
                0.0
            } else {
                total as f64 / self.num_vertices as f64
            }
        };
        writeln!(f, "Forward labels:")?;
        writeln!(f, "  Min size:     {}", self.fwd_min)?;
        writeln!(f, "  Max size:     {}", self.fwd_max)?;
        writeln!(f, "  Avg size:     {:.3}", avg(self.fwd_total))?;
        writeln!(f, "Backward labels:")?;
        writeln!(f, "  Min size:     {}", self.bwd_min)?;
        writeln!(f, "  Max size:     {}", self.bwd_max)?;
        writeln!(f, "  Avg size:     {:.3}", avg(self.bwd_total))?;
        writeln!(f, "Total entries:  {}", self.fwd_total + self.bwd_total)?;
        write!(
            f,
            "Memory:         {:.3} MiB",
            self.heap_bytes as f64 / (1024.0 * 1024.0)
        )
    }
}
