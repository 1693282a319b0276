/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Basic traits to access graphs during parallel visits.

A [`Graph`] is an immutable adjacency structure whose nodes are identified by
integers in the interval [0 . . *n*), where *n* is returned by
[`Graph::num_nodes`]. Successors are never enumerated directly on the graph:
every thread must first obtain its own [traversal handle](Graph::traversal),
as the enumeration state of some representations (e.g., compressed ones) is
not reentrant.

*/

use core::ops::ControlFlow::{self, Continue};
use impl_tools::autoimpl;

/// The orientation of a graph, which is fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Arcs are followed only from their source to their target.
    #[default]
    Directed,
    /// Every arc can be followed in both directions.
    Undirected,
}

impl core::fmt::Display for Orientation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Orientation::Directed => f.write_str("directed"),
            Orientation::Undirected => f.write_str("undirected"),
        }
    }
}

/// A per-thread handle enumerating the outgoing arcs of nodes.
///
/// Arcs are enumerated with their multiplicity: if a node has *k* parallel
/// arcs towards the same target, the visitor will be invoked *k* times.
/// Self-loops are enumerated as any other arc.
pub trait Traversal {
    /// Calls `visit` with `(node, succ)` for each arc leaving `node`.
    ///
    /// The enumeration stops as soon as `visit` returns
    /// [`Break`](ControlFlow::Break), in which case `Break` is returned.
    fn for_each_successor<F>(&mut self, node: usize, visit: F) -> ControlFlow<()>
    where
        F: FnMut(usize, usize) -> ControlFlow<()>;
}

/// A read-only graph that can be shared among threads.
///
/// Implementations must be safe to read concurrently as long as each thread
/// uses its own [`Traversal`], as returned by [`traversal`](Graph::traversal).
#[autoimpl(for<S: trait + ?Sized> &S, &mut S, Box<S>)]
pub trait Graph: Sync {
    /// The type of the independent traversal handles returned by
    /// [`traversal`](Graph::traversal).
    type Traversal<'a>: Traversal
    where
        Self: 'a;

    /// Returns the number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs in the graph, if available.
    ///
    /// In undirected graphs, each edge (but loops) counts as two arcs.
    fn num_arcs_hint(&self) -> Option<u64> {
        None
    }

    /// Returns the orientation of the graph.
    fn orientation(&self) -> Orientation;

    /// Returns a new traversal handle, independent from all the others.
    fn traversal(&self) -> Self::Traversal<'_>;

    /// Returns the number of arcs leaving `node`.
    ///
    /// The default implementation counts the arcs using a fresh traversal
    /// handle.
    fn outdegree(&self, node: usize) -> usize {
        let mut outdegree = 0;
        let _ = self.traversal().for_each_successor(node, |_, _| {
            outdegree += 1;
            Continue(())
        });
        outdegree
    }
}
