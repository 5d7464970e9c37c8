/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use psl_labeling::graphs::io::{read_graph, GraphFormat};
use psl_labeling::prelude::*;
use psl_labeling::threads;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Computes 2-hop hub labels for a directed unweighted graph using \
             parallel shortest-path labeling (PSL), optionally with the \
             neighborhood reduction (PSL+) and the local-maximum filter (PSL*)."
)]
struct Args {
    /// Input graph file; the format is guessed from the extension, DIMACS by
    /// default.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Number of worker threads; defaults to the available parallelism.
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// Output file for the labels; omit (or pass an empty path) to skip
    /// writing.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print graph and label statistics to standard output.
    #[arg(short = 's', long = "stats")]
    stats: bool,

    /// Collapse vertices with identical neighborhoods before labeling
    /// (PSL+). The output file then carries the vertex mapping.
    #[arg(short = 'p', long = "reduce")]
    reduce: bool,

    /// Skip local maxima during the expansion (PSL*).
    #[arg(short = 'r', long = "local-maxima")]
    local_maxima: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let mut pl = progress_logger![display_memory = true];

    let graph = read_graph(&args.input, GraphFormat::from_path(&args.input))
        .with_context(|| format!("Cannot read graph from {}", args.input.display()))?;
    if args.stats {
        println!("{}", graph.stats());
    }

    // From here on a vertex's identifier is its rank.
    let graph = graph.reorder_by_rank(&degree_rank(&graph));

    let thread_pool = match args.threads {
        None => threads![],
        Some(num_threads) => threads![num_threads],
    };

    let (graph, reduction) = if args.reduce {
        let (reduced, reduction) = Reduction::compute(&graph, &thread_pool, &mut pl);
        if args.stats {
            println!("{}", reduced.stats());
        }
        (reduced, Some(reduction))
    } else {
        (graph, None)
    };

    let transpose = graph.transpose();

    let labels = if args.local_maxima {
        let mut engine = PslStar::new(&graph, &transpose, &mut pl);
        engine.run(&thread_pool, &mut pl);
        engine.into_labels()
    } else {
        let mut engine = Psl::new(&graph, &transpose);
        engine.run(&thread_pool, &mut pl);
        engine.into_labels()
    };

    if args.stats {
        println!("{}", labels.stats());
    }

    if let Some(path) = args.output.filter(|path| !path.as_os_str().is_empty()) {
        pl.start("Writing labels...");
        let file = File::create(&path)
            .with_context(|| format!("Cannot create output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let mapping = reduction.as_ref().map(Reduction::label_mapping);
        labels
            .write(&mut writer, mapping.as_deref())
            .with_context(|| format!("Cannot write labels to {}", path.display()))?;
        pl.done();
    }

    Ok(())
}
