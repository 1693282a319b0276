/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use core::ops::ControlFlow::{self, Continue};

/// An immutable compressed sparse-row graph.
///
/// The graph stores the degree-cumulative function (DCF), that is, the
/// sequence of offsets at which the successors of each node start, and the
/// concatenation of all successor lists.
///
/// Graphs are built from a sequence of arcs, which are stored verbatim:
/// parallel arcs and self-loops are neither removed nor merged, and the
/// successors of a node are enumerated in the order in which the
/// corresponding arcs were provided. In [undirected](Orientation::Undirected)
/// graphs every arc (*u*, *v*) is stored both as *u* → *v* and *v* → *u*,
/// except for self-loops, which are stored once.
///
/// # Examples
///
/// ```
/// use par_betweenness::graphs::csr_graph::CsrGraph;
/// use par_betweenness::traits::{Graph, Orientation};
///
/// let graph = CsrGraph::from_arcs(Orientation::Undirected, [(0, 1), (1, 2), (1, 2)]);
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.successors(1), &[0, 2, 2]);
/// assert_eq!(graph.num_arcs(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct CsrGraph {
    orientation: Orientation,
    dcf: Box<[usize]>,
    successors: Box<[usize]>,
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::empty(0, Orientation::default())
    }
}

impl CsrGraph {
    /// Creates a graph with `num_nodes` nodes and no arcs.
    pub fn empty(num_nodes: usize, orientation: Orientation) -> Self {
        Self {
            orientation,
            dcf: vec![0; num_nodes + 1].into_boxed_slice(),
            successors: Box::default(),
        }
    }

    /// Creates a graph from a sequence of arcs.
    ///
    /// The number of nodes is one plus the largest node appearing in an arc.
    ///
    /// # Panics
    ///
    /// Panics if an arc has [`usize::MAX`] as an endpoint.
    pub fn from_arcs(
        orientation: Orientation,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        let num_nodes = arcs
            .iter()
            .map(|&(u, v)| {
                u.max(v)
                    .checked_add(1)
                    .unwrap_or_else(|| panic!("Node identifier {} is too large", u.max(v)))
            })
            .max()
            .unwrap_or(0);
        Self::build(num_nodes, orientation, arcs)
    }

    /// Creates a graph with a given number of nodes from a sequence of arcs.
    ///
    /// # Panics
    ///
    /// Panics if an arc has an endpoint greater than or equal to `num_nodes`.
    pub fn from_arcs_with_num_nodes(
        num_nodes: usize,
        orientation: Orientation,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        for &(u, v) in &arcs {
            assert!(
                u < num_nodes && v < num_nodes,
                "Arc ({u}, {v}) is out of range for a graph with {num_nodes} nodes"
            );
        }
        Self::build(num_nodes, orientation, arcs)
    }

    fn build(num_nodes: usize, orientation: Orientation, arcs: Vec<(usize, usize)>) -> Self {
        let mut dcf = vec![0_usize; num_nodes + 1];
        for &(u, v) in &arcs {
            dcf[u + 1] += 1;
            if orientation == Orientation::Undirected && u != v {
                dcf[v + 1] += 1;
            }
        }
        for i in 0..num_nodes {
            dcf[i + 1] += dcf[i];
        }

        // Counting sort: `next` is the first free position of each node
        let mut next = dcf[..num_nodes].to_vec();
        let mut successors = vec![0_usize; dcf[num_nodes]];
        for (u, v) in arcs {
            successors[next[u]] = v;
            next[u] += 1;
            if orientation == Orientation::Undirected && u != v {
                successors[next[v]] = u;
                next[v] += 1;
            }
        }

        Self {
            orientation,
            dcf: dcf.into_boxed_slice(),
            successors: successors.into_boxed_slice(),
        }
    }

    /// Returns the successors of `node`, with multiplicity.
    #[inline(always)]
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.successors[self.dcf[node]..self.dcf[node + 1]]
    }

    /// Returns the number of arcs in the graph.
    pub fn num_arcs(&self) -> u64 {
        self.successors.len() as u64
    }

    /// Returns an iterator over the stored arcs, in node order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.dcf.len() - 1)
            .flat_map(move |u| self.successors(u).iter().map(move |&v| (u, v)))
    }
}

/// The [`Traversal`] of a [`CsrGraph`].
///
/// The representation is fully materialized, so handles carry no state but a
/// reference to the graph.
#[derive(Debug, Clone, Copy)]
pub struct CsrTraversal<'a> {
    graph: &'a CsrGraph,
}

impl Traversal for CsrTraversal<'_> {
    #[inline]
    fn for_each_successor<F>(&mut self, node: usize, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(usize, usize) -> ControlFlow<()>,
    {
        for &succ in self.graph.successors(node) {
            visit(node, succ)?;
        }
        Continue(())
    }
}

impl Graph for CsrGraph {
    type Traversal<'a> = CsrTraversal<'a>;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.dcf.len() - 1
    }

    fn num_arcs_hint(&self) -> Option<u64> {
        Some(self.num_arcs())
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn traversal(&self) -> Self::Traversal<'_> {
        CsrTraversal { graph: self }
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.dcf[node + 1] - self.dcf[node]
    }
}
