/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_probability, init_thread_pool, SelectionStrategy};
use crate::centrality::BetweennessError;
use crate::traits::Graph;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rayon::prelude::*;

/// Selects, with a given probability, nodes whose outdegree is larger than
/// the mean outdegree.
///
/// High-degree nodes are the sources whose visits contribute the most to
/// betweenness, so sampling among them yields better approximations than
/// [uniform sampling](super::RandomSelection) for the same number of visits.
///
/// Outdegrees are computed in parallel during
/// [`init`](SelectionStrategy::init), using as many threads as the given
/// concurrency.
#[derive(Debug, Clone)]
pub struct RandomDegreeSelection {
    probability: Option<f64>,
    seed: u64,
    selected: Box<[bool]>,
    size: usize,
}

impl RandomDegreeSelection {
    /// Creates a strategy selecting with probability `probability` the nodes
    /// with above-average outdegree, using `seed` to initialize the
    /// [pseudorandom number generator](SmallRng).
    ///
    /// If `probability` is [`None`], the [default
    /// probability](Self::default_probability) for the graph will be used.
    ///
    /// Fails if `probability` is not in [0 . . 1].
    pub fn new(probability: Option<f64>, seed: u64) -> anyhow::Result<Self> {
        Ok(Self {
            probability: probability.map(check_probability).transpose()?,
            seed,
            selected: Box::default(),
            size: 0,
        })
    }

    /// Returns the default selection probability for a graph with `num_nodes`
    /// nodes, that is, log₁₀ *n* / *e*², clamped to [0 . . 1].
    pub fn default_probability(num_nodes: usize) -> f64 {
        if num_nodes == 0 {
            return 0.0;
        }
        ((num_nodes as f64).log10() / std::f64::consts::E.powi(2)).clamp(0.0, 1.0)
    }
}

impl SelectionStrategy for RandomDegreeSelection {
    fn init<G: Graph>(&mut self, graph: &G, concurrency: usize) -> Result<(), BetweennessError> {
        let num_nodes = graph.num_nodes();
        let probability = self
            .probability
            .unwrap_or_else(|| Self::default_probability(num_nodes));

        let thread_pool = init_thread_pool(concurrency)?;
        let outdegrees: Vec<usize> = thread_pool.install(|| {
            (0..num_nodes)
                .into_par_iter()
                .map(|node| graph.outdegree(node))
                .collect()
        });
        let mean = if num_nodes == 0 {
            0.0
        } else {
            outdegrees.iter().map(|&d| d as f64).sum::<f64>() / num_nodes as f64
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        // One draw per node, so that the choice for a node does not depend on
        // the degrees of the previous ones
        self.selected = outdegrees
            .iter()
            .map(|&d| rng.random_bool(probability) && d as f64 > mean)
            .collect();
        self.size = self.selected.iter().filter(|&&s| s).count();

        log::debug!(
            "Mean outdegree {}; selected {} sources out of {} nodes (probability {})",
            mean,
            self.size,
            num_nodes,
            probability
        );
        Ok(())
    }

    fn expected_size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn select(&self, node: usize) -> bool {
        self.selected.get(node).copied().unwrap_or(false)
    }
}
