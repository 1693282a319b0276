/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use par_betweenness::cli::{cli_main, init_env_logger};

pub fn main() -> Result<()> {
    init_env_logger()?;
    cli_main(std::env::args_os())
}
