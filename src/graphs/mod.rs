/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! In-memory graphs and ways to build them.

pub mod arc_list;
pub mod csr_graph;
pub mod random;

pub mod prelude {
    pub use super::arc_list::{read_arcs, ArcList, ArcListOptions};
    pub use super::csr_graph::CsrGraph;
    pub use super::random::ErdosRenyi;
}
