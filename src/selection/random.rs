/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_probability, SelectionStrategy};
use crate::centrality::BetweennessError;
use crate::traits::Graph;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Selects each node independently with a given probability.
#[derive(Debug, Clone)]
pub struct RandomSelection {
    probability: f64,
    seed: u64,
    selected: Box<[bool]>,
    size: usize,
}

impl RandomSelection {
    /// Creates a strategy selecting each node with probability `probability`,
    /// using `seed` to initialize the [pseudorandom number
    /// generator](SmallRng).
    ///
    /// Fails if `probability` is not in [0 . . 1].
    pub fn new(probability: f64, seed: u64) -> anyhow::Result<Self> {
        Ok(Self {
            probability: check_probability(probability)?,
            seed,
            selected: Box::default(),
            size: 0,
        })
    }

    /// Returns the selection probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl SelectionStrategy for RandomSelection {
    fn init<G: Graph>(&mut self, graph: &G, _concurrency: usize) -> Result<(), BetweennessError> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.selected = (0..graph.num_nodes())
            .map(|_| rng.random_bool(self.probability))
            .collect();
        self.size = self.selected.iter().filter(|&&s| s).count();
        log::debug!(
            "Selected {} sources out of {} nodes (probability {})",
            self.size,
            graph.num_nodes(),
            self.probability
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
