//! Quantity tier table
//!
//! Maps a canonical quantity string ("250", "20000") to a per-unit base price.
//! Lookups are by exact string: a custom quantity such as "300" has no tier and
//! the pricing function falls back to its default base price.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CatalogError;

/// One row of the tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityTier {
    pub quantity: String,
    /// Base price per unit
    pub price: Decimal,
}

impl QuantityTier {
    pub fn new(quantity: &str, price: Decimal) -> Self {
        Self {
            quantity: quantity.to_string(),
            price,
        }
    }
}

/// Tier table in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantityTiers(Vec<QuantityTier>);

impl QuantityTiers {
    pub fn new(tiers: Vec<QuantityTier>) -> Self {
        Self(tiers)
    }

    /// Base price for an exact quantity key
    pub fn base_price(&self, quantity: &str) -> Option<Decimal> {
        self.0
            .iter()
            .find(|tier| tier.quantity == quantity)
            .map(|tier| tier.price)
    }

    /// The first declared tier, used as the session's starting quantity
    pub fn first(&self) -> Option<&QuantityTier> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuantityTier> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn validate(&self) -> Result<(), CatalogError> {
        if self.0.is_empty() {
            return Err(CatalogError::EmptyTiers);
        }
        let mut seen = HashSet::new();
        for tier in &self.0 {
            if !seen.insert(tier.quantity.as_str()) {
                return Err(CatalogError::DuplicateTier {
                    quantity: tier.quantity.clone(),
                });
            }
        }
        Ok(())
    }
}
