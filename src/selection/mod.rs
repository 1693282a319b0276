/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strategies choosing the source nodes of a betweenness computation.
//!
//! Exact betweenness centrality requires a visit from every node of the
//! graph; approximate values can be obtained by visiting only from a sample
//! of the nodes. A [`SelectionStrategy`] decides which nodes act as sources:
//!
//! - [`All`] selects every node (exact computation);
//! - [`RandomSelection`] selects each node independently with a given
//!   probability;
//! - [`RandomDegreeSelection`] selects, with a given probability, only nodes
//!   whose outdegree is above the mean outdegree;
//! - [`ExplicitSelection`] selects a given set of nodes.
//!
//! Random strategies draw their choices once, sequentially, in
//! [`init`](SelectionStrategy::init), so the set of sources depends only on
//! the seed and not on the number of threads.
//!
//! # Examples
//!
//! ```
//! # fn main() -> anyhow::Result<()> {
//! use par_betweenness::graphs::csr_graph::CsrGraph;
//! use par_betweenness::selection::{RandomSelection, SelectionStrategy};
//! use par_betweenness::traits::Orientation;
//!
//! let graph = CsrGraph::from_arcs(Orientation::Undirected, (0..99).map(|i| (i, i + 1)));
//! let mut strategy = RandomSelection::new(0.5, 0)?;
//! strategy.init(&graph, 4)?;
//! let selected = (0..100).filter(|&node| strategy.select(node)).count();
//! assert_eq!(selected, strategy.expected_size());
//! #     Ok(())
//! # }
//! ```

use crate::centrality::BetweennessError;
use crate::traits::Graph;

mod all;
pub use all::*;

mod explicit;
pub use explicit::*;

mod random;
pub use random::*;

mod random_degree;
pub use random_degree::*;

/// A policy choosing which nodes serve as sources of the visits.
///
/// The strategy is [initialized](SelectionStrategy::init) once, on a single
/// thread, before any visit starts; afterwards
/// [`select`](SelectionStrategy::select) may be called concurrently from any
/// number of threads.
pub trait SelectionStrategy: Sync {
    /// Prepares the strategy for `graph`, possibly using `concurrency`
    /// threads.
    fn init<G: Graph>(&mut self, graph: &G, concurrency: usize) -> Result<(), BetweennessError>;

    /// Returns the expected number of selected nodes.
    ///
    /// This is a hint, and it should not be used to size data structures
    /// indexed by node.
    fn expected_size(&self) -> usize;

    /// Returns whether `node` is a source.
    ///
    /// The result is meaningful only after [`init`](SelectionStrategy::init)
    /// has been called.
    fn select(&self, node: usize) -> bool;
}

/// Creates the thread pool used by strategies whose initialization runs in
/// parallel.
pub(crate) fn init_thread_pool(concurrency: usize) -> Result<rayon::ThreadPool, BetweennessError> {
    if concurrency == 0 {
        return Err(BetweennessError::InvalidConcurrency);
    }
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency)
        .build()?)
}

/// Checks that `probability` is in the interval [0 . . 1].
pub(crate) fn check_probability(probability: f64) -> anyhow::Result<f64> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&probability),
        "The probability must be in [0 . . 1], got {probability}"
    );
    Ok(probability)
}
