/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]
#![allow(clippy::type_complexity)]

pub mod centrality;
pub mod graphs;
pub mod selection;
pub mod traits;
pub mod utils;

#[cfg(feature = "cli")]
pub mod cli;

pub mod prelude {
    pub use crate::centrality::{BetweennessCentrality, BetweennessError, MemoryEstimate};
    pub use crate::graphs::prelude::*;
    pub use crate::selection::*;
    pub use crate::traits::*;
}
