/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A lock-free dispenser of candidate source nodes.
///
/// Workers repeatedly [`claim`](Dispatcher::claim) a node: each node in
/// [0 . . *n*) is handed out exactly once, in increasing order, to exactly one
/// worker. Claiming stops when the nodes are exhausted or when the external
/// running flag has been cleared.
///
/// Cancellation is polled at each claim, so a worker never stops in the
/// middle of the visit of a source. A dispatcher that refused to hand out a
/// node because the flag was cleared is
/// [interrupted](Dispatcher::is_interrupted).
#[derive(Debug)]
pub struct Dispatcher<'a> {
    cursor: AtomicUsize,
    num_nodes: usize,
    running: Option<&'a AtomicBool>,
    interrupted: AtomicBool,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher for `num_nodes` nodes.
    ///
    /// If `running` is not [`None`], clearing the flag stops all workers at
    /// their next claim.
    pub fn new(num_nodes: usize, running: Option<&'a AtomicBool>) -> Self {
        Self {
            cursor: AtomicUsize::new(0),
            num_nodes,
            running,
            interrupted: AtomicBool::new(false),
        }
    }

    /// Claims the next node, or returns [`None`] if the worker must stop.
    ///
    /// The counter is incremented before checking for cancellation, so a
    /// claim attempt always consumes an identifier.
    #[inline]
    pub fn claim(&self) -> Option<usize> {
        let node = self.cursor.fetch_add(1, Ordering::Relaxed);
        if node >= self.num_nodes {
            return None;
        }
        if self
            .running
            .is_some_and(|running| !running.load(Ordering::Relaxed))
        {
            self.interrupted.store(true, Ordering::Relaxed);
            return None;
        }
        Some(node)
    }

    /// Returns true if some node has not been handed out because the
    /// running flag was cleared.
    ///
    /// A running flag cleared after the last node has been claimed does not
    /// interrupt the dispatcher.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }
}
