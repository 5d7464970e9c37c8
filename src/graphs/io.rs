/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Text readers for the common ASCII graph formats.
//!
//! All readers return a well-formed [`Graph`] (sorted, duplicate-free
//! adjacency) or a [`ParseError`] pointing at the offending file and line.

use crate::graphs::Graph;
use crate::types::Vertex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("{}:{line}: vertex {vertex} out of range (graph has {num_nodes} vertices)", .path.display())]
    VertexOutOfRange {
        path: PathBuf,
        line: usize,
        vertex: u64,
        num_nodes: usize,
    },
    #[error("{}: header count mismatch (expected {expected}, found {found})", .path.display())]
    CountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("{}: missing header line", .path.display())]
    MissingHeader { path: PathBuf },
}

/// The supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// DIMACS: `c` comments, a `p <name> V E` header, `a u v` arcs, 1-based.
    Dimacs,
    /// One `u v` pair per line, 1-based.
    EdgeList,
    /// SNAP: `#` comments, `u v` pairs, 0-based, duplicates allowed.
    Snap,
    /// METIS adjacency: `V E` header, then one line of 1-based neighbors per
    /// vertex; `%` comments.
    Metis,
}

impl GraphFormat {
    /// Guesses the format from the file extension, defaulting to DIMACS.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("snap") | Some("txt") => GraphFormat::Snap,
            Some("metis") | Some("graph") => GraphFormat::Metis,
            Some("el") | Some("edges") | Some("edgelist") => GraphFormat::EdgeList,
            _ => GraphFormat::Dimacs,
        }
    }
}

/// Reads a graph in the given format.
pub fn read_graph(path: impl AsRef<Path>, format: GraphFormat) -> Result<Graph, ParseError> {
    match format {
        GraphFormat::Dimacs => read_dimacs(path),
        GraphFormat::EdgeList => read_edge_list(path),
        GraphFormat::Snap => read_snap(path),
        GraphFormat::Metis => read_metis(path),
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ParseError> {
    File::open(path).map(BufReader::new).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_line_err(path: &Path, source: std::io::Error) -> ParseError {
    ParseError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Parses a 1-based endpoint and shifts it to 0-based.
fn one_based(
    token: &str,
    num_nodes: usize,
    path: &Path,
    line: usize,
) -> Result<Vertex, ParseError> {
    let raw: u64 = token.parse().map_err(|_| ParseError::Malformed {
        path: path.to_path_buf(),
        line,
        reason: format!("expected a vertex id, found {:?}", token),
    })?;
    if raw == 0 || raw > num_nodes as u64 {
        return Err(ParseError::VertexOutOfRange {
            path: path.to_path_buf(),
            line,
            vertex: raw,
            num_nodes,
        });
    }
    Ok((raw - 1) as Vertex)
}

pub fn read_dimacs(path: impl AsRef<Path>) -> Result<Graph, ParseError> {
    let path = path.as_ref();
    let mut num_nodes = None;
    let mut declared_arcs = 0;
    let mut arcs = Vec::new();

    for (line_no, line) in open(path)?.lines().enumerate() {
        let line = line.map_err(|e| read_line_err(path, e))?;
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None | Some("c") => continue,
            Some("p") => {
                // p <name> V E
                let _name = tokens.next();
                let (v, e) = match (tokens.next(), tokens.next()) {
                    (Some(v), Some(e)) => (v, e),
                    _ => {
                        return Err(ParseError::Malformed {
                            path: path.to_path_buf(),
                            line: line_no,
                            reason: "malformed problem line".into(),
                        })
                    }
                };
                let v: usize = v.parse().map_err(|_| ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "malformed vertex count".into(),
                })?;
                let e: usize = e.parse().map_err(|_| ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "malformed arc count".into(),
                })?;
                num_nodes = Some(v);
                declared_arcs = e;
                arcs.reserve(e);
            }
            Some("a") => {
                let n = num_nodes.ok_or_else(|| ParseError::MissingHeader {
                    path: path.to_path_buf(),
                })?;
                let (u, v) = match (tokens.next(), tokens.next()) {
                    (Some(u), Some(v)) => (u, v),
                    _ => {
                        return Err(ParseError::Malformed {
                            path: path.to_path_buf(),
                            line: line_no,
                            reason: "malformed arc line".into(),
                        })
                    }
                };
                arcs.push((
                    one_based(u, n, path, line_no)?,
                    one_based(v, n, path, line_no)?,
                ));
            }
            Some(other) => {
                return Err(ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: format!("unknown line type {:?}", other),
                })
            }
        }
    }

    let num_nodes = num_nodes.ok_or_else(|| ParseError::MissingHeader {
        path: path.to_path_buf(),
    })?;
    if arcs.len() != declared_arcs {
        return Err(ParseError::CountMismatch {
            path: path.to_path_buf(),
            expected: declared_arcs,
            found: arcs.len(),
        });
    }
    Ok(Graph::from_arcs(num_nodes, arcs))
}

pub fn read_edge_list(path: impl AsRef<Path>) -> Result<Graph, ParseError> {
    let path = path.as_ref();
    let mut arcs: Vec<(Vertex, Vertex)> = Vec::new();
    let mut max_vertex = 0;

    for (line_no, line) in open(path)?.lines().enumerate() {
        let line = line.map_err(|e| read_line_err(path, e))?;
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();
        let (u, v) = match (tokens.next(), tokens.next()) {
            (None, _) => continue,
            (Some(u), Some(v)) => (u, v),
            _ => {
                return Err(ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "expected two vertex ids".into(),
                })
            }
        };
        // The vertex count is unknown up front; range-check against the
        // 1-based u32 domain and size the graph afterwards.
        let u = one_based(u, Vertex::MAX as usize, path, line_no)?;
        let v = one_based(v, Vertex::MAX as usize, path, line_no)?;
        max_vertex = max_vertex.max(u).max(v);
        arcs.push((u, v));
    }

    let num_nodes = if arcs.is_empty() { 0 } else { max_vertex as usize + 1 };
    Ok(Graph::from_arcs(num_nodes, arcs))
}

pub fn read_snap(path: impl AsRef<Path>) -> Result<Graph, ParseError> {
    let path = path.as_ref();
    let mut arcs: Vec<(Vertex, Vertex)> = Vec::new();
    let mut max_vertex = 0;

    for (line_no, line) in open(path)?.lines().enumerate() {
        let line = line.map_err(|e| read_line_err(path, e))?;
        let line_no = line_no + 1;
        if line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (u, v) = match (tokens.next(), tokens.next()) {
            (None, _) => continue,
            (Some(u), Some(v)) => (u, v),
            _ => {
                return Err(ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "expected two vertex ids".into(),
                })
            }
        };
        let parse = |token: &str| -> Result<Vertex, ParseError> {
            token.parse().map_err(|_| ParseError::Malformed {
                path: path.to_path_buf(),
                line: line_no,
                reason: format!("expected a vertex id, found {:?}", token),
            })
        };
        let (u, v) = (parse(u)?, parse(v)?);
        max_vertex = max_vertex.max(u).max(v);
        arcs.push((u, v));
    }

    let num_nodes = if arcs.is_empty() { 0 } else { max_vertex as usize + 1 };
    Ok(Graph::from_arcs(num_nodes, arcs))
}

pub fn read_metis(path: impl AsRef<Path>) -> Result<Graph, ParseError> {
    let path = path.as_ref();
    let mut header: Option<usize> = None;
    let mut arcs: Vec<(Vertex, Vertex)> = Vec::new();
    let mut current = 0;

    for (line_no, line) in open(path)?.lines().enumerate() {
        let line = line.map_err(|e| read_line_err(path, e))?;
        let line_no = line_no + 1;
        if line.starts_with('%') {
            continue;
        }
        match header {
            None => {
                let mut tokens = line.split_whitespace();
                let v = match tokens.next() {
                    None => continue,
                    Some(v) => v,
                };
                let _e = tokens.next().ok_or_else(|| ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "malformed header line".into(),
                })?;
                header = Some(v.parse().map_err(|_| ParseError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: "malformed vertex count".into(),
                })?);
            }
            Some(num_nodes) => {
                if current == num_nodes {
                    // Tolerate trailing blank lines.
                    if line.split_whitespace().next().is_none() {
                        continue;
                    }
                    return Err(ParseError::Malformed {
                        path: path.to_path_buf(),
                        line: line_no,
                        reason: "more adjacency lines than vertices".into(),
                    });
                }
                for token in line.split_whitespace() {
                    arcs.push((current as Vertex, one_based(token, num_nodes, path, line_no)?));
                }
                current += 1;
            }
        }
    }

    let num_nodes = header.ok_or_else(|| ParseError::MissingHeader {
        path: path.to_path_buf(),
    })?;
    if current != num_nodes {
        return Err(ParseError::CountMismatch {
            path: path.to_path_buf(),
            expected: num_nodes,
            found: current,
        });
    }
    Ok(Graph::from_arcs(num_nodes, arcs))
}
