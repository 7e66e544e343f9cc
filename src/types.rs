//! Type-safe enums shared across the configurator
//!
//! String-valued settings (catalog pricing modes, step states shown to the
//! presentation layer) are modelled as enums with `strum` conversions so they
//! can be parsed, printed and iterated without stringly-typed matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How an option's price delta is charged.
///
/// Catalog options may carry this explicitly. When they don't, the delta's
/// magnitude decides: below 1 is per-unit, 1 and above is a flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum PricingMode {
    /// Added to the unit price, multiplied by quantity
    #[strum(serialize = "perUnit")]
    PerUnit,
    /// Added once to the order total
    #[strum(serialize = "fixed")]
    Fixed,
}

/// Display state of a wizard step relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StepStatus {
    /// Step is after the cursor and cannot be edited yet
    Locked,
    /// Step is the one the cursor points at
    Active,
    /// Step is before the cursor
    Completed,
}

impl StepStatus {
    /// Status of `step` when the cursor sits at `cursor`.
    pub fn for_step(step: usize, cursor: usize) -> Self {
        match step.cmp(&cursor) {
            std::cmp::Ordering::Less => Self::Completed,
            std::cmp::Ordering::Equal => Self::Active,
            std::cmp::Ordering::Greater => Self::Locked,
        }
    }
}
