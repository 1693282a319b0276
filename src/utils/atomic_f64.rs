/*
 * SPDX-FileCopyrightText: 2026 The par-betweenness authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicU64, Ordering};

/// A slice of `f64` values supporting concurrent additive updates.
///
/// Values are stored as the bit patterns of `f64` inside [`AtomicU64`]s, and
/// [`add`](AtomicF64Slice::add) is a compare-and-swap loop, so concurrent
/// updates to the same slot are never lost. Since floating-point addition is
/// not associative, the final values depend (within rounding) on the order
/// in which updates happen.
///
/// # Examples
///
/// ```
/// use par_betweenness::utils::AtomicF64Slice;
///
/// let slice = AtomicF64Slice::new(2);
/// std::thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| {
///             for _ in 0..1000 {
///                 slice.add(1, 0.5);
///             }
///         });
///     }
/// });
/// assert_eq!(&*slice.into_boxed_slice(), &[0.0, 2000.0]);
/// ```
#[derive(Debug)]
pub struct AtomicF64Slice {
    bits: Box<[AtomicU64]>,
}

impl AtomicF64Slice {
    /// Creates a new slice of `len` zeroes.
    pub fn new(len: usize) -> Self {
        // The bit pattern of 0.0 is zero
        Self {
            bits: (0..len).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the slice contains no values.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Atomically adds `value` to the value at `index`.
    #[inline]
    pub fn add(&self, index: usize, value: f64) {
        let slot = &self.bits[index];
        let mut current = slot.load(Ordering::Relaxed);
        loop {
            let new = (f64::from_bits(current) + value).to_bits();
            match slot.compare_exchange_weak(current, new, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    /// Consumes the slice, returning the values.
    pub fn into_boxed_slice(self) -> Box<[f64]> {
        self.bits
            .into_vec()
            .into_iter()
            .map(|slot| f64::from_bits(slot.into_inner()))
            .collect()
    }
}
