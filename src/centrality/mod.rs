/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Parallel betweenness centrality.
//!
//! The betweenness centrality of a node *x* is the sum, over all pairs of
//! nodes *s* ≠ *x* ≠ *t*, of the fraction of shortest paths from *s* to *t*
//! passing through *x*. [`BetweennessCentrality`] computes it using Brandes'
//! algorithm: for each source *s*, a breadth-first visit builds the DAG of
//! shortest paths from *s* and counts them, and a backward pass on the nodes
//! in reverse visit order accumulates the *dependency* of *s* on every other
//! node. The centrality of a node is the sum of the dependencies of all
//! sources on it. No normalization is applied, except that in undirected
//! graphs, where each shortest path is found from both of its endpoints,
//! sums are halved, so that each unordered pair of nodes is counted once.
//!
//! # Parallelism
//!
//! A dedicated thread pool with the given number of threads is created for
//! each computation, and each thread runs the same loop: it claims the next
//! candidate source from a shared [`Dispatcher`], skips it if the
//! [selection strategy](crate::selection) rejects it, and otherwise runs
//! both passes using private scratch arrays. Dependencies are added to a
//! shared [`AtomicF64Slice`]; since floating-point addition is not
//! associative, results computed with different numbers of threads are equal
//! only within rounding.
//!
//! # Path counts
//!
//! The number of shortest paths can grow exponentially with the distance
//! (e.g., in a chain of diamonds). Path counts are kept in `f64`s, which are
//! exact up to 2<sup>53</sup> and lose only relative precision beyond that.
//! Counts larger than [`f64::MAX`] saturate, and the dependencies computed
//! from saturated counts are no longer meaningful, but they remain finite.
//!
//! # Lifecycle
//!
//! An engine is single-use: [`compute`](BetweennessCentrality::compute) can
//! be called once, and returns the centrality vector by value. Further calls
//! fail with [`BetweennessError::AlreadyComputed`], whatever the outcome of
//! the first one. [`release`](BetweennessCentrality::release) drops the graph
//! and the strategy.

use crate::selection::{init_thread_pool, SelectionStrategy};
use crate::traits::{Graph, Orientation};
use crate::utils::{humanize_bytes, AtomicF64Slice};
use brandes::BrandesTask;
use dsi_progress_logger::{no_logging, ConcurrentProgressLog};
use std::collections::VecDeque;
use std::mem::size_of;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

mod brandes;
mod dispatch;
pub use dispatch::Dispatcher;

/// Errors of a betweenness computation.
#[derive(thiserror::Error, Debug)]
pub enum BetweennessError {
    /// [`compute`](BetweennessCentrality::compute) has already been called.
    #[error("The centrality has already been computed; create a new engine to compute it again")]
    AlreadyComputed,
    /// The engine has been [released](BetweennessCentrality::release).
    #[error("The engine has been released")]
    Released,
    /// The running flag was cleared before all sources were visited.
    #[error("The computation has been cancelled")]
    Cancelled,
    /// The requested number of threads is zero.
    #[error("The concurrency must be positive")]
    InvalidConcurrency,
    /// A source node does not exist in the graph.
    #[error("Source node {node} is out of range for a graph with {num_nodes} nodes")]
    SourceOutOfRange { node: usize, num_nodes: usize },
    #[error("Cannot build the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// An estimate of the memory used by a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryEstimate {
    /// Bytes used by the shared centrality vector.
    pub accumulator: usize,
    /// Bytes used by the scratch arrays of a single thread.
    pub per_thread: usize,
    /// The number of threads.
    pub concurrency: usize,
}

impl MemoryEstimate {
    /// Returns the estimated total number of bytes.
    pub fn total(&self) -> usize {
        self.accumulator
            .saturating_add(self.per_thread.saturating_mul(self.concurrency))
    }
}

impl core::fmt::Display for MemoryEstimate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} ({} for the centrality vector, {} for each of {} threads)",
            humanize_bytes(self.total()),
            humanize_bytes(self.accumulator),
            humanize_bytes(self.per_thread),
            self.concurrency
        )
    }
}

/// Computes betweenness centrality in parallel using Brandes' algorithm.
///
/// The engine owns the graph (which can be a reference, as [`Graph`] is
/// implemented for references) and the [selection
/// strategy](SelectionStrategy), which is initialized by the
/// [constructor](Self::new). It is configured via setters and executed via
/// [`compute`](Self::compute).
///
/// # Examples
///
/// Exact centrality of a star with four leaves:
///
/// ```
/// # fn main() -> Result<(), par_betweenness::centrality::BetweennessError> {
/// use par_betweenness::centrality::BetweennessCentrality;
/// use par_betweenness::graphs::csr_graph::CsrGraph;
/// use par_betweenness::selection::All;
/// use par_betweenness::traits::Orientation;
///
/// let graph = CsrGraph::from_arcs(Orientation::Undirected, (1..5).map(|leaf| (0, leaf)));
/// let mut betweenness = BetweennessCentrality::new(&graph, All::default(), 2)?;
/// let centrality = betweenness.compute()?;
/// // Each of the 6 pairs of leaves is connected through the center
/// assert_eq!(&*centrality, &[6.0, 0.0, 0.0, 0.0, 0.0]);
/// #     Ok(())
/// # }
/// ```
///
/// Cooperative cancellation and progress reporting:
///
/// ```
/// # fn main() -> Result<(), par_betweenness::centrality::BetweennessError> {
/// use par_betweenness::centrality::{BetweennessCentrality, BetweennessError};
/// use par_betweenness::graphs::csr_graph::CsrGraph;
/// use par_betweenness::selection::All;
/// use par_betweenness::traits::Orientation;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let graph = CsrGraph::from_arcs(Orientation::Directed, (0..99).map(|i| (i, i + 1)));
/// let running = Arc::new(AtomicBool::new(true));
/// let mut betweenness = BetweennessCentrality::new(&graph, All::default(), 1)?;
/// let flag = running.clone();
/// betweenness
///     .running_flag(running.clone())
///     .progress(move |fraction| {
///         if fraction >= 0.5 {
///             flag.store(false, Ordering::Relaxed);
///         }
///     });
/// assert!(matches!(betweenness.compute(), Err(BetweennessError::Cancelled)));
/// #     Ok(())
/// # }
/// ```
pub struct BetweennessCentrality<G: Graph, S: SelectionStrategy> {
    graph: Option<G>,
    strategy: Option<S>,
    num_nodes: usize,
    num_arcs: Option<u64>,
    expected_sources: usize,
    concurrency: usize,
    centrality: Option<AtomicF64Slice>,
    running: Option<Arc<AtomicBool>>,
    progress: Option<Box<dyn Fn(f64) + Send + Sync>>,
}

impl<G: Graph, S: SelectionStrategy> core::fmt::Debug for BetweennessCentrality<G, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BetweennessCentrality")
            .field("num_nodes", &self.num_nodes)
            .field("expected_sources", &self.expected_sources)
            .field("concurrency", &self.concurrency)
            .field("computed", &self.centrality.is_none())
            .field("released", &self.graph.is_none())
            .finish_non_exhaustive()
    }
}

impl<G: Graph, S: SelectionStrategy> BetweennessCentrality<G, S> {
    /// Creates a new engine that will use `concurrency` threads.
    ///
    /// The strategy is [initialized](SelectionStrategy::init) on `graph`, and
    /// the centrality vector is allocated.
    pub fn new(graph: G, mut strategy: S, concurrency: usize) -> Result<Self, BetweennessError> {
        if concurrency == 0 {
            return Err(BetweennessError::InvalidConcurrency);
        }
        strategy.init(&graph, concurrency)?;
        let num_nodes = graph.num_nodes();
        Ok(Self {
            num_nodes,
            num_arcs: graph.num_arcs_hint(),
            expected_sources: strategy.expected_size(),
            concurrency,
            centrality: Some(AtomicF64Slice::new(num_nodes)),
            graph: Some(graph),
            strategy: Some(strategy),
            running: None,
            progress: None,
        })
    }

    /// Sets a flag that stops the computation when cleared.
    ///
    /// The flag is checked each time a thread claims a new candidate source,
    /// so the computation stops after the visits in progress are completed.
    /// A stopped computation returns [`BetweennessError::Cancelled`], and the
    /// partial results are discarded.
    pub fn running_flag(&mut self, running: Arc<AtomicBool>) -> &mut Self {
        self.running = Some(running);
        self
    }

    /// Sets a callback receiving the progress of the computation.
    ///
    /// Each thread, before visiting from source *s*, passes *s* / (*n* − 1)
    /// to the callback (1 if *n* ≤ 1). The callback is invoked
    /// concurrently, and values coming from different threads are not
    /// necessarily increasing.
    pub fn progress(&mut self, progress: impl Fn(f64) + Send + Sync + 'static) -> &mut Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Returns the number of nodes of the graph.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of threads.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the expected number of sources, as estimated by the strategy.
    pub fn expected_sources(&self) -> usize {
        self.expected_sources
    }

    /// Estimates the memory needed by a computation on a graph with
    /// `num_nodes` nodes and, if known, `num_arcs` arcs, using `concurrency`
    /// threads.
    ///
    /// Without the number of arcs, predecessor lists are assumed to contain
    /// one entry per node.
    pub fn estimate_memory(
        num_nodes: usize,
        num_arcs: Option<u64>,
        concurrency: usize,
    ) -> MemoryEstimate {
        // Each arc yields at most one predecessor entry per visit
        let predecessors = num_arcs
            .map_or(num_nodes, |m| usize::try_from(m).unwrap_or(usize::MAX))
            .saturating_mul(size_of::<usize>());
        let per_node = size_of::<usize>() // distance
            + size_of::<f64>() // sigma
            + size_of::<f64>() // delta
            + size_of::<Vec<usize>>() // predecessor list header
            + 2 * size_of::<usize>(); // queue and stack
        MemoryEstimate {
            accumulator: num_nodes.saturating_mul(size_of::<f64>()),
            per_thread: num_nodes
                .saturating_mul(per_node)
                .saturating_add(predecessors)
                .saturating_add(size_of::<VecDeque<usize>>()),
            concurrency,
        }
    }

    /// Computes the betweenness centrality of all nodes, summing the
    /// dependencies of the sources selected by the strategy.
    pub fn compute(&mut self) -> Result<Box<[f64]>, BetweennessError> {
        self.compute_with_logging(no_logging![])
    }

    /// Computes the betweenness centrality of all nodes, logging progress.
    ///
    /// Each thread clones `cpl` and updates it once per visited source. The
    /// options of `cpl` will be preserved, making thus possible to customize
    /// the logs.
    pub fn compute_with_logging(
        &mut self,
        cpl: &mut impl ConcurrentProgressLog,
    ) -> Result<Box<[f64]>, BetweennessError> {
        let (Some(graph), Some(strategy)) = (self.graph.as_ref(), self.strategy.as_ref()) else {
            return Err(BetweennessError::Released);
        };
        if self.centrality.is_none() {
            return Err(BetweennessError::AlreadyComputed);
        }
        let thread_pool = init_thread_pool(self.concurrency)?;
        let Some(centrality) = self.centrality.take() else {
            return Err(BetweennessError::AlreadyComputed);
        };

        let num_nodes = self.num_nodes;
        let orientation = graph.orientation();
        log::info!("Orientation: {}", orientation);
        log::info!(
            "Estimated memory: {}",
            Self::estimate_memory(num_nodes, self.num_arcs, self.concurrency)
        );

        let dispatcher = Dispatcher::new(num_nodes, self.running.as_deref());
        let progress = self.progress.as_deref();
        let scale = if num_nodes > 1 {
            1.0 / (num_nodes - 1) as f64
        } else {
            1.0
        };

        cpl.item_name("source");
        cpl.expected_updates(Some(self.expected_sources));
        cpl.start(format!(
            "Computing betweenness centrality with {} threads...",
            self.concurrency
        ));

        thread_pool.broadcast(|ctx| {
            let mut local_cpl = cpl.clone();
            let mut task = BrandesTask::new(graph.traversal(), num_nodes);
            let mut visits = 0_usize;
            let mut reached = 0_usize;

            while let Some(source) = dispatcher.claim() {
                if !strategy.select(source) {
                    continue;
                }
                if let Some(progress) = progress {
                    progress((source as f64 * scale).min(1.0));
                }
                reached += task.process(source, &centrality);
                visits += 1;
                local_cpl.light_update();
            }
            log::debug!(
                "Thread {} visited from {} sources, reaching {} nodes",
                ctx.index(),
                visits,
                reached
            );
        });

        cpl.done();

        if dispatcher.is_interrupted() {
            log::info!("Computation cancelled");
            return Err(BetweennessError::Cancelled);
        }
        let mut centrality = centrality.into_boxed_slice();
        if orientation == Orientation::Undirected {
            centrality.iter_mut().for_each(|c| *c /= 2.0);
        }
        Ok(centrality)
    }

    /// Drops the graph and the strategy.
    ///
    /// Results already returned by [`compute`](Self::compute) are not
    /// affected; further computations fail with
    /// [`BetweennessError::Released`].
    pub fn release(&mut self) {
        self.graph = None;
        self.strategy = None;
        self.centrality = None;
    }
}
