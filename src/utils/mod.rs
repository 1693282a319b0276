/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Miscellaneous utilities.

mod atomic_f64;
pub use atomic_f64::*;

/// Formats a number of bytes using binary multiples.
///
/// ```
/// use par_betweenness::utils::humanize_bytes;
///
/// assert_eq!(humanize_bytes(512), "512 B");
/// assert_eq!(humanize_bytes(3 << 20), "3.00 MiB");
/// ```
pub fn humanize_bytes(bytes: usize) -> String {
    const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
