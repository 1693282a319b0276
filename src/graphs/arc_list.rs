/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reading graphs from textual lists of arcs.
//!
//! Each line of the input contains an arc, specified by a source and a target
//! column separated by a separator character (a TAB by default). Sources and
//! targets are either node identifiers starting from zero or, if
//! [`labels`](ArcListOptions::labels) is set, arbitrary strings to which
//! identifiers are assigned in order of appearance.

use super::csr_graph::CsrGraph;
use crate::traits::Orientation;
use anyhow::{anyhow, ensure, Context, Result};
use dsi_progress_logger::ProgressLog;
use std::collections::HashMap;
use std::io::BufRead;

/// Options for parsing a list of arcs.
#[derive(Debug, Clone)]
pub struct ArcListOptions {
    /// Lines starting with this symbol (after trimming) are ignored.
    pub line_comment_symbol: char,
    /// How many lines to skip, ignoring comment lines.
    pub lines_to_skip: usize,
    /// How many arcs to parse, after skipping the first lines.
    pub max_arcs: Option<usize>,
    /// The column separator.
    pub separator: char,
    /// The index of the column containing the source node of an arc.
    pub source_column: usize,
    /// The index of the column containing the target node of an arc.
    pub target_column: usize,
    /// Sources and targets are labels rather than node identifiers.
    pub labels: bool,
}

impl Default for ArcListOptions {
    fn default() -> Self {
        Self {
            line_comment_symbol: '#',
            lines_to_skip: 0,
            max_arcs: None,
            separator: '\t',
            source_column: 0,
            target_column: 1,
            labels: false,
        }
    }
}

/// A list of arcs read by [`read_arcs`].
#[derive(Debug, Clone, Default)]
pub struct ArcList {
    /// The number of nodes, that is, one plus the largest node identifier.
    pub num_nodes: usize,
    /// The arcs, in reading order.
    pub arcs: Vec<(usize, usize)>,
    /// If the input contained labels, the label of each node.
    pub node_labels: Option<Vec<String>>,
}

impl ArcList {
    /// Builds a [`CsrGraph`] with the given orientation.
    ///
    /// If `num_nodes` is larger than the number of nodes of the list, the
    /// additional nodes are isolated.
    pub fn into_graph(
        self,
        orientation: Orientation,
        num_nodes: Option<usize>,
    ) -> Result<CsrGraph> {
        let num_nodes = match num_nodes {
            Some(n) => {
                ensure!(
                    n >= self.num_nodes,
                    "The number of nodes specified ({}) is smaller than the number of nodes found in the arcs ({})",
                    n,
                    self.num_nodes
                );
                n
            }
            None => self.num_nodes,
        };
        Ok(CsrGraph::from_arcs_with_num_nodes(
            num_nodes,
            orientation,
            self.arcs,
        ))
    }
}

/// Reads a list of arcs, logging progress on `pl`.
pub fn read_arcs(
    input: impl BufRead,
    options: &ArcListOptions,
    pl: &mut impl ProgressLog,
) -> Result<ArcList> {
    let mut ids = HashMap::<String, usize>::new();
    let mut node_labels = vec![];
    let mut num_nodes = 0;
    let mut arcs = vec![];

    let biggest_idx = options.source_column.max(options.target_column);

    pl.item_name("arc");
    pl.expected_updates(options.max_arcs);
    pl.start("Reading arcs...");

    let mut skipped = 0;
    for (line_num, line) in input.lines().enumerate() {
        if options.max_arcs.is_some_and(|max_arcs| arcs.len() >= max_arcs) {
            break;
        }
        let line = line.with_context(|| format!("Could not read line {}", line_num + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(options.line_comment_symbol) {
            continue;
        }
        if skipped < options.lines_to_skip {
            skipped += 1;
            continue;
        }

        let vals = line.split(options.separator).collect::<Vec<_>>();
        if vals.len() <= biggest_idx {
            log::warn!(
                "Line {}: {:?} does not have enough columns: got {} columns but expected at least {} columns separated by {:?}",
                line_num + 1,
                line,
                vals.len(),
                biggest_idx + 1,
                options.separator,
            );
            continue;
        }

        let mut node_id = |value: &str, column: &str| -> Result<usize> {
            let value = value.trim();
            if options.labels {
                let next_id = ids.len();
                Ok(*ids.entry(value.to_owned()).or_insert_with(|| {
                    node_labels.push(value.to_owned());
                    next_id
                }))
            } else {
                value.parse::<usize>().map_err(|e| {
                    anyhow!(
                        "Error parsing as integer {} column value {:?} at line {}: {}",
                        column,
                        value,
                        line_num + 1,
                        e
                    )
                })
            }
        };

        let src = node_id(vals[options.source_column], "source")?;
        let dst = node_id(vals[options.target_column], "target")?;

        let end = src.max(dst).checked_add(1).ok_or_else(|| {
            anyhow!(
                "Node identifier {} at line {} is too large",
                src.max(dst),
                line_num + 1
            )
        })?;
        num_nodes = num_nodes.max(end);
        arcs.push((src, dst));
        pl.light_update();
    }
    pl.done();

    log::info!("Arcs read: {} Nodes: {}", arcs.len(), num_nodes);

    Ok(ArcList {
        num_nodes,
        arcs,
        node_labels: options.labels.then_some(node_labels),
    })
}
