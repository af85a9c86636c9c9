//! Persisted cart records.
//!
//! Wire shape of the stored line list: a JSON array of camelCase objects,
//! one per line, optional tire dimensions omitted when absent. Core models
//! stay serde-free; this module owns the conversions.

use serde::{Deserialize, Serialize};
use treadline::{
    lines::CartLine,
    prices::Price,
    products::{ProductId, ProductSnapshot},
};

/// One persisted cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLine {
    /// Product id keying the line.
    pub product_id: u64,
    /// Product display name.
    pub name: String,
    /// Brand display name.
    #[serde(default)]
    pub brand: String,
    /// Unit price in minor units.
    pub price: u64,
    /// Product image URL.
    #[serde(default)]
    pub image: String,
    /// Tire width in millimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Tire profile (aspect ratio).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<u32>,
    /// Rim diameter in inches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<u32>,
    /// Line quantity.
    pub quantity: u32,
}

impl From<&CartLine> for StoredLine {
    fn from(line: &CartLine) -> Self {
        let snapshot = line.snapshot();

        Self {
            product_id: line.product_id().value(),
            name: snapshot.name.clone(),
            brand: snapshot.brand.clone(),
            price: snapshot.price.minor_units(),
            image: snapshot.image.clone(),
            width: snapshot.width,
            profile: snapshot.profile,
            diameter: snapshot.diameter,
            quantity: line.quantity(),
        }
    }
}

impl StoredLine {
    /// Rebuilds the core line. Returns `None` for a zero-quantity record;
    /// such a line must not exist in a cart.
    #[must_use]
    pub fn into_line(self) -> Option<CartLine> {
        if self.quantity == 0 {
            return None;
        }

        let snapshot = ProductSnapshot {
            name: self.name,
            brand: self.brand,
            price: Price::from_minor(self.price),
            image: self.image,
            width: self.width,
            profile: self.profile,
            diameter: self.diameter,
        };

        Some(CartLine::new(
            ProductId::new(self.product_id),
            snapshot,
            self.quantity,
        ))
    }
}

/// Serializes a line list to the persisted JSON form.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn encode_lines(lines: &[CartLine]) -> Result<Vec<u8>, serde_json::Error> {
    let records: Vec<StoredLine> = lines.iter().map(StoredLine::from).collect();

    serde_json::to_vec(&records)
}

/// Deserializes a persisted blob back into cart lines, dropping
/// zero-quantity records.
///
/// # Errors
///
/// Returns a `serde_json::Error` when the blob is not a well-formed line
/// array; callers treat that as an empty cart.
pub fn decode_lines(blob: &[u8]) -> Result<Vec<CartLine>, serde_json::Error> {
    let records: Vec<StoredLine> = serde_json::from_slice(blob)?;

    Ok(records
        .into_iter()
        .filter_map(StoredLine::into_line)
        .collect())
}
