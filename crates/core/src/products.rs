//! Products

use std::fmt;

use crate::prices::Price;

/// Catalog identifier of a product; the key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product id from its raw catalog value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw catalog value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Denormalized catalog data carried by a cart line.
///
/// A snapshot is whatever the catalog said last time the line was created or
/// refreshed; it can drift from the server until the next reconciliation.
/// Display strings are empty when the catalog has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    /// Product display name.
    pub name: String,
    /// Brand display name.
    pub brand: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    pub image: String,
    /// Tire width in millimetres.
    pub width: Option<u32>,
    /// Tire profile (aspect ratio).
    pub profile: Option<u32>,
    /// Rim diameter in inches.
    pub diameter: Option<u32>,
}

impl ProductSnapshot {
    /// Creates a snapshot with the given name and price and no other data.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            brand: String::new(),
            price,
            image: String::new(),
            width: None,
            profile: None,
            diameter: None,
        }
    }

    /// Sets the brand name.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the tire dimensions.
    #[must_use]
    pub fn with_dimensions(
        mut self,
        width: Option<u32>,
        profile: Option<u32>,
        diameter: Option<u32>,
    ) -> Self {
        self.width = width;
        self.profile = profile;
        self.diameter = diameter;
        self
    }
}
