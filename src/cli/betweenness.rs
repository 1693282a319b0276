/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{create_parent_dir, ArcsArgs, FloatVectorFormat, GlobalArgs, NumThreadsArg};
use crate::centrality::BetweennessCentrality;
use crate::graphs::arc_list::{read_arcs, ArcListOptions};
use crate::graphs::csr_graph::CsrGraph;
use crate::selection::{
    All, ExplicitSelection, RandomDegreeSelection, RandomSelection, SelectionStrategy,
};
use crate::traits::{Graph, Orientation};
use anyhow::{ensure, Context, Result};
use clap::{Args, ValueEnum};
use dsi_progress_logger::{concurrent_progress_logger, progress_logger, ProgressLog};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// How to choose the sources of the visits.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CliStrategy {
    /// Visit from all nodes (exact centrality).
    #[default]
    All,
    /// Visit from each node with a given probability.
    Random,
    /// Visit, with a given probability, from nodes with above-average outdegree.
    RandomDegree,
    /// Visit from the nodes given with --sources.
    Explicit,
}

#[derive(Args, Debug)]
pub struct CliArgs {
    /// The file containing the arcs of the graph; if missing, arcs are read
    /// from standard input.
    pub input: Option<PathBuf>,

    #[arg(short, long)]
    /// Where to store the centrality vector.
    pub output: PathBuf,

    #[arg(short, long)]
    /// Consider each arc as an undirected edge.
    pub undirected: bool,

    #[arg(long)]
    /// The number of nodes in the graph, if larger than the number inferred
    /// from the arcs; the additional nodes are isolated.
    pub num_nodes: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = CliStrategy::All)]
    /// The source-selection strategy.
    pub strategy: CliStrategy,

    #[arg(short, long)]
    /// The selection probability of random strategies (for random-degree, the
    /// default is log₁₀ n / e²).
    pub probability: Option<f64>,

    #[arg(long, default_value_t = 0)]
    /// The seed of the pseudorandom number generator of random strategies.
    pub seed: u64,

    #[arg(long, value_delimiter = ',')]
    /// The comma-separated sources of the explicit strategy.
    pub sources: Vec<usize>,

    #[arg(long)]
    /// Where to store the node labels, one per line, when using --labels.
    pub nodes: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FloatVectorFormat::Ascii)]
    /// The output format for the centrality vector.
    pub fmt: FloatVectorFormat,

    #[arg(long)]
    /// Decimal digits for text output formats.
    pub precision: Option<usize>,

    #[clap(flatten)]
    pub arcs_args: ArcsArgs,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    match args.strategy {
        CliStrategy::Random => ensure!(
            args.probability.is_some(),
            "The random strategy requires a probability"
        ),
        CliStrategy::Explicit => ensure!(
            !args.sources.is_empty(),
            "The explicit strategy requires a list of sources"
        ),
        CliStrategy::All | CliStrategy::RandomDegree => {}
    }
    ensure!(
        args.nodes.is_none() || args.arcs_args.labels,
        "Node labels can be stored only when reading labels"
    );

    match &args.input {
        Some(path) => {
            log::info!("Reading arcs from {}", path.display());
            let file = std::fs::File::open(path)
                .with_context(|| format!("Could not open {}", path.display()))?;
            betweenness(global_args, &args, BufReader::new(file))
        }
        None => {
            log::info!("Reading arcs from standard input...");
            betweenness(global_args, &args, std::io::stdin().lock())
        }
    }
}

pub fn betweenness(global_args: GlobalArgs, args: &CliArgs, input: impl BufRead) -> Result<()> {
    let mut pl = progress_logger![];
    pl.display_memory(true);
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let orientation = if args.undirected {
        Orientation::Undirected
    } else {
        Orientation::Directed
    };

    let mut arc_list = read_arcs(input, &ArcListOptions::from(&args.arcs_args), &mut pl)?;
    if let (Some(path), Some(labels)) = (&args.nodes, arc_list.node_labels.take()) {
        store_labels(path, &labels)?;
    }
    let graph = arc_list.into_graph(orientation, args.num_nodes)?;
    log::info!(
        "Built {} graph with {} nodes and {} arcs",
        orientation,
        graph.num_nodes(),
        graph.num_arcs()
    );

    let centrality = match args.strategy {
        CliStrategy::All => compute(global_args, args, &graph, All::default())?,
        CliStrategy::Random => {
            let probability = args.probability.unwrap_or_default();
            compute(global_args, args, &graph, RandomSelection::new(probability, args.seed)?)?
        }
        CliStrategy::RandomDegree => compute(
            global_args,
            args,
            &graph,
            RandomDegreeSelection::new(args.probability, args.seed)?,
        )?,
        CliStrategy::Explicit => compute(
            global_args,
            args,
            &graph,
            ExplicitSelection::new(args.sources.iter().copied()),
        )?,
    };

    args.fmt.store(&args.output, &centrality, args.precision)
}

fn compute(
    global_args: GlobalArgs,
    args: &CliArgs,
    graph: &CsrGraph,
    strategy: impl SelectionStrategy,
) -> Result<Box<[f64]>> {
    let mut cpl = concurrent_progress_logger![];
    cpl.display_memory(true);
    if let Some(log_interval) = global_args.log_interval {
        cpl.log_interval(log_interval);
    }

    let mut betweenness =
        BetweennessCentrality::new(graph, strategy, args.num_threads.num_threads)?;
    log::info!(
        "Using {} threads; {} expected sources",
        betweenness.concurrency(),
        betweenness.expected_sources()
    );
    let centrality = betweenness.compute_with_logging(&mut cpl)?;
    betweenness.release();
    Ok(centrality)
}

fn store_labels(path: &Path, labels: &[String]) -> Result<()> {
    create_parent_dir(path)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let mut file = BufWriter::new(file);
    log::info!("Storing {} node labels at {}", labels.len(), path.display());
    for label in labels {
        writeln!(file, "{}", label)
            .with_context(|| format!("Could not write labels to {}", path.display()))?;
    }
    file.flush()?;
    Ok(())
}
