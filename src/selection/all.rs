/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::SelectionStrategy;
use crate::centrality::BetweennessError;
use crate::traits::Graph;

/// Selects all nodes, yielding exact betweenness centrality.
#[derive(Debug, Clone, Copy, Default)]
pub struct All {
    num_nodes: usize,
}

impl SelectionStrategy for All {
    fn init<G: Graph>(&mut self, graph: &G, _concurrency: usize) -> Result<(), BetweennessError> {
        self.num_nodes = graph.num_nodes();
        Ok(())
    }

    fn expected_size(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn select(&self, _node: usize) -> bool {
        true
    }
}
