/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Traits
//! This modules contains the traits that are used throughout the crate.
//! They are collected into a module so you can do `use par_betweenness::traits::*;`
//! for ease of use.

mod graph;
pub use graph::*;
