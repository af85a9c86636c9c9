//! Prices

use std::fmt;

/// A price in minor currency units (pence/cents).
///
/// All arithmetic saturates rather than wrapping; totals can reach the top
/// of the `u64` range only in pathological carts and must never wrap into
/// small values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    minor: u64,
}

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self { minor: 0 };

    /// Creates a price from minor units.
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self { minor }
    }

    /// Returns the price in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.minor
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.minor == 0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            minor: self.minor.saturating_add(other.minor),
        }
    }

    /// Saturating subtraction; floors at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            minor: self.minor.saturating_sub(other.minor),
        }
    }

    /// Saturating multiplication by a unit count.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self {
            minor: self.minor.saturating_mul(quantity as u64),
        }
    }

    /// The smaller of two prices.
    #[must_use]
    pub fn clamp_to(self, ceiling: Self) -> Self {
        self.min(ceiling)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.minor / 100, self.minor % 100)
    }
}
