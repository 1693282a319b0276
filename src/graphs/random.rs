/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::csr_graph::CsrGraph;
use crate::traits::Orientation;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Erdös-Rényi random graphs.
///
/// The Erdös-Rényi random graph model is a simple model for generating random
/// graphs. It is parameterized by the number of nodes `n` and the probability
/// `p` of an arc between any two nodes. In this implementation, loops are never
/// included.
///
/// In the undirected case, each unordered pair of nodes is considered once.
///
/// Note that the time required to generate the graph is quadratic in `n`.
#[derive(Debug, Clone)]
pub struct ErdosRenyi {
    n: usize,
    p: f64,
    seed: u64,
}

impl ErdosRenyi {
    /// Creates a new Erdös-Rényi random graph, given the number of
    /// nodes, the probability of an edge between any two nodes, and a
    /// seed for the [pseudorandom number generator](SmallRng).
    pub fn new(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
        Self { n, p, seed }
    }

    /// Returns the arcs of the graph with the given orientation.
    pub fn arcs(&self, orientation: Orientation) -> Vec<(usize, usize)> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut arcs = vec![];
        for x in 0..self.n {
            let first = match orientation {
                Orientation::Directed => 0,
                Orientation::Undirected => x + 1,
            };
            for y in first..self.n {
                if y != x && rng.random_bool(self.p) {
                    arcs.push((x, y));
                }
            }
        }
        arcs
    }

    /// Materializes the graph as a [`CsrGraph`].
    pub fn to_csr(&self, orientation: Orientation) -> CsrGraph {
        CsrGraph::from_arcs_with_num_nodes(self.n, orientation, self.arcs(orientation))
    }
}
