/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use par_betweenness::cli::{init_env_logger, pretty_print_elapsed};
use par_betweenness::prelude::*;
use std::hint::black_box;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    about = "Benchmarks betweenness centrality on Erdős–Rényi random graphs",
    long_about = None
)]
struct Args {
    /// The number of nodes.
    #[arg(short, long, default_value = "10000")]
    n: usize,

    /// The arc probability.
    #[arg(short, long, default_value = "0.001")]
    p: f64,

    /// The seed of the random graph.
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// The number of test repetitions.
    #[arg(short, long, default_value = "3")]
    repeats: usize,

    /// The comma-separated numbers of threads to test.
    #[arg(short = 'j', long, value_delimiter = ',', default_values_t = [1, num_cpus::get().max(1)])]
    num_threads: Vec<usize>,

    /// Use a directed graph.
    #[arg(short, long)]
    directed: bool,

    /// Visit only from a random sample of sources with this probability.
    #[arg(long)]
    sample: Option<f64>,
}

pub fn main() -> Result<()> {
    init_env_logger()?;
    let args = Args::parse();

    let orientation = if args.directed {
        Orientation::Directed
    } else {
        Orientation::Undirected
    };
    log::info!(
        "Generating {} Erdős–Rényi graph with n = {}, p = {}",
        orientation,
        args.n,
        args.p
    );
    let graph = ErdosRenyi::new(args.n, args.p, args.seed).to_csr(orientation);
    log::info!("{} arcs", graph.num_arcs());

    for num_threads in args.num_threads.iter().copied().unique() {
        log::info!(
            "Estimated memory with {} threads: {}",
            num_threads,
            BetweennessCentrality::<&CsrGraph, All>::estimate_memory(
                graph.num_nodes(),
                Some(graph.num_arcs()),
                num_threads
            )
        );
        let mut timings = Vec::with_capacity(args.repeats);
        for _ in 0..args.repeats {
            let start = Instant::now();
            let centrality = match args.sample {
                None => BetweennessCentrality::new(&graph, All::default(), num_threads)?.compute()?,
                Some(p) => {
                    let strategy = RandomSelection::new(p, args.seed)?;
                    BetweennessCentrality::new(&graph, strategy, num_threads)?.compute()?
                }
            };
            black_box(centrality);
            timings.push(start.elapsed().as_secs_f64());
        }
        let mean = timings.iter().sum::<f64>() / timings.len().max(1) as f64;
        log::info!(
            "{} threads: mean time {} over {} repeats",
            num_threads,
            pretty_print_elapsed(mean),
            args.repeats
        );
        println!("{}\t{}", num_threads, mean);
    }

    Ok(())
}
