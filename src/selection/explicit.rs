/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::SelectionStrategy;
use crate::centrality::BetweennessError;
use crate::traits::Graph;

/// Selects a given set of nodes.
///
/// Repeated nodes are selected once. [`init`](SelectionStrategy::init) fails
/// if a node is not a node of the graph.
#[derive(Debug, Clone, Default)]
pub struct ExplicitSelection {
    sources: Vec<usize>,
    selected: Box<[bool]>,
    size: usize,
}

impl ExplicitSelection {
    /// Creates a strategy selecting the given nodes.
    pub fn new(sources: impl IntoIterator<Item = usize>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            selected: Box::default(),
            size: 0,
        }
    }
}

impl SelectionStrategy for ExplicitSelection {
    fn init<G: Graph>(&mut self, graph: &G, _concurrency: usize) -> Result<(), BetweennessError> {
        let num_nodes = graph.num_nodes();
        let mut selected = vec![false; num_nodes].into_boxed_slice();
        for &node in &self.sources {
            if node >= num_nodes {
                return Err(BetweennessError::SourceOutOfRange { node, num_nodes });
            }
            selected[node] = true;
        }
        self.size = selected.iter().filter(|&&s| s).count();
        self.selected = selected;
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
