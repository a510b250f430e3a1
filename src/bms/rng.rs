//! Random number generation for chart control flow parsing.
//!
//! This module provides the [`Rng`] trait and implementations for resolving `#RANDOM` blocks,
//! which decide the `#IF` and `#SWITCH` branch a chart takes.
//!
//! # Implementations
//!
//! ## [`FirstBranch`]
//!
//! The default resolver. Always picks the lowest value of the range, so a chart always takes its
//! first branch and analysis results are reproducible.
//!
//! ## [`RngMock`]
//!
//! A deterministic mock implementation for testing that returns predefined values in rotation.
//!
//! ## [`RandRng`]
//!
//! An implementation using the [`rand`] crate for true random number generation.
//!
//! [`rand`]: https://crates.io/crates/rand

use core::ops::RangeInclusive;

/// A random number generator for chart control flow parsing.
///
/// # Contract
///
/// - The generated number must be within the specified `range` (inclusive)
/// - Returning a number outside the range selects no branch of the block
pub trait Rng {
    /// Generates a random integer within the specified `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pms_density::bms::rng::{Rng, RngMock};
    ///
    /// let mut rng = RngMock([5u64]);
    /// let result = rng.generate(1u64..=10u64);
    /// assert_eq!(result, 5u64);
    /// ```
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64;
}

impl<T: Rng + ?Sized> Rng for Box<T> {
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64 {
        T::generate(self, range)
    }
}

impl<T: Rng + ?Sized> Rng for &mut T {
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64 {
        T::generate(self, range)
    }
}

/// The default resolver, which always yields the start of the range.
///
/// ```rust
/// use pms_density::bms::rng::{FirstBranch, Rng};
///
/// assert_eq!(FirstBranch.generate(1..=4), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FirstBranch;

impl Rng for FirstBranch {
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64 {
        *range.start()
    }
}

/// A deterministic mock random number generator for testing.
///
/// This implementation returns values from a predefined array in rotation.
///
/// # Examples
///
/// ```rust
/// use pms_density::bms::rng::{Rng, RngMock};
///
/// let mut rng = RngMock([1u64, 2u64]);
///
/// // Returns values in rotation: 1, 2, 1, 2, ...
/// assert_eq!(rng.generate(0u64..=10u64), 1u64);
/// assert_eq!(rng.generate(0u64..=10u64), 2u64);
/// assert_eq!(rng.generate(0u64..=10u64), 1u64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RngMock<const N: usize>(pub [u64; N]);

impl<const N: usize> Rng for RngMock<N> {
    fn generate(&mut self, _range: RangeInclusive<u64>) -> u64 {
        let Some(first) = self.0.first().copied() else {
            return 0;
        };
        self.0.rotate_left(1);
        first
    }
}

/// A random number generator using the [`rand`] crate.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "rand")]
/// # {
/// use pms_density::bms::rng::{Rng, RandRng};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = RandRng(StdRng::seed_from_u64(42));
/// let n = rng.generate(1u64..=10u64);
/// assert!(n >= 1u64 && n <= 10u64);
/// # }
/// ```
///
/// [`rand`]: https://crates.io/crates/rand
#[cfg(feature = "rand")]
#[derive(Debug, Clone)]
pub struct RandRng<R>(pub R);

#[cfg(feature = "rand")]
impl<R: rand::RngCore> Rng for RandRng<R> {
    fn generate(&mut self, range: RangeInclusive<u64>) -> u64 {
        let start = *range.start();
        let end = *range.end();
        if end < start {
            return start;
        }
        match (end - start).checked_add(1) {
            Some(width) => (self.0.next_u64() % width) + start,
            // Full u64 range
            None => self.0.next_u64(),
        }
    }
}
