/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::Traversal;
use crate::utils::AtomicF64Slice;
use core::ops::ControlFlow::Continue;
use std::collections::VecDeque;

/// Distance of nodes not reached by the current visit.
const UNVISITED: usize = usize::MAX;

/// The private state of a worker: a traversal handle and the scratch arrays
/// of Brandes' algorithm for a single source.
///
/// All arrays, including the predecessor lists, have one entry per node of
/// the graph, as any reachable node can acquire predecessors, whether it is a
/// selected source or not.
///
/// Between two sources the arrays are all-unvisited: instead of refilling
/// them, the backward pass restores each node it pops, which touches exactly
/// the nodes reached by the visit.
///
/// Path counts are `f64`s: they are exact up to 2<sup>53</sup>, carry a
/// relative error of at most 2<sup>−53</sup> per addition beyond that, and
/// saturate at [`f64::MAX`], so that the ratios of the backward pass remain
/// finite.
pub(crate) struct BrandesTask<T: Traversal> {
    traversal: T,
    /// Distance from the source, or [`UNVISITED`].
    distance: Box<[usize]>,
    /// Number of shortest paths from the source.
    sigma: Box<[f64]>,
    /// Dependency of the source on each node.
    delta: Box<[f64]>,
    /// Predecessors on shortest paths, with repetitions for parallel arcs.
    predecessors: Box<[Vec<usize>]>,
    /// The visit queue.
    queue: VecDeque<usize>,
    /// Nodes in order of visit, popped in nonincreasing order of distance.
    stack: Vec<usize>,
}

impl<T: Traversal> BrandesTask<T> {
    pub(crate) fn new(traversal: T, num_nodes: usize) -> Self {
        Self {
            traversal,
            distance: vec![UNVISITED; num_nodes].into_boxed_slice(),
            sigma: vec![0.0; num_nodes].into_boxed_slice(),
            delta: vec![0.0; num_nodes].into_boxed_slice(),
            predecessors: (0..num_nodes).map(|_| Vec::new()).collect(),
            queue: VecDeque::new(),
            stack: Vec::new(),
        }
    }

    /// Visits the graph from `source` and adds the dependencies of `source`
    /// on every other node to `centrality`.
    ///
    /// Returns the number of nodes reached.
    pub(crate) fn process(&mut self, source: usize, centrality: &AtomicF64Slice) -> usize {
        self.forward(source);
        self.backward(source, centrality)
    }

    /// Breadth-first visit from `source` building the shortest-path DAG.
    fn forward(&mut self, source: usize) {
        let Self {
            traversal,
            distance,
            sigma,
            predecessors,
            queue,
            stack,
            ..
        } = self;

        debug_assert!(stack.is_empty());
        distance[source] = 0;
        sigma[source] = 1.0;
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            stack.push(node);
            let next_distance = distance[node] + 1;
            let sigma_node = sigma[node];

            let _ = traversal.for_each_successor(node, |node, succ| {
                if distance[succ] == UNVISITED {
                    distance[succ] = next_distance;
                    queue.push_back(succ);
                }
                if distance[succ] == next_distance {
                    sigma[succ] = (sigma[succ] + sigma_node).min(f64::MAX);
                    predecessors[succ].push(node);
                }
                Continue(())
            });
        }
    }

    /// Accumulates dependencies in nonincreasing order of distance, restoring
    /// the scratch arrays along the way.
    fn backward(&mut self, source: usize, centrality: &AtomicF64Slice) -> usize {
        let reached = self.stack.len();
        while let Some(node) = self.stack.pop() {
            let delta_node = self.delta[node];
            let sigma_node = self.sigma[node];

            for &pred in &self.predecessors[node] {
                self.delta[pred] += self.sigma[pred] / sigma_node * (delta_node + 1.0);
            }

            if node != source && delta_node != 0.0 {
                centrality.add(node, delta_node);
            }

            // All successors of node on the DAG have been popped already
            self.distance[node] = UNVISITED;
            self.sigma[node] = 0.0;
            self.delta[node] = 0.0;
            self.predecessors[node].clear();
        }
        reached
    }
}
