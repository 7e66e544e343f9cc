//! Pricing function
//!
//! Derives the unit price, quantity and total from the current selections.
//! The computation is pure and runs over whatever is stored, complete or not;
//! missing or unknown selections contribute nothing.
//!
//! # Order of accumulation
//!
//! | Step | Source | Lands on |
//! |------|--------|----------|
//! | 1 | quantity tier base price (default 0.60) | unit price |
//! | 2 | size option | unit price |
//! | 3 | material / thickness option | unit price |
//! | 4 | finish option | unit price |
//! | 5 | every premium option | unit price |
//! | 6 | every extras subsection option, per-unit charges only | unit price |
//! | 7 | plates option, fixed charges only | fixed costs |
//!
//! `total = unit_price * quantity + fixed_costs`

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{ids, Catalog, Charge, OptionItem};
use crate::selection::{SelectionValue, Selections};

/// Quantity used when the stored value does not parse to a non-zero integer
pub const DEFAULT_QUANTITY: i64 = 250;

/// Base unit price when the quantity string is not a tier key: 0.60
pub const DEFAULT_BASE_PRICE: Decimal = Decimal::from_parts(60, 0, 0, false, 2);

/// Derived pricing for a set of selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Per-unit price including all per-unit surcharges
    pub unit_price: Decimal,
    pub quantity: i64,
    /// One-off fees not multiplied by quantity
    pub fixed_costs: Decimal,
    pub total: Decimal,
}

/// Parse the leading integer of `raw` the way a browser's `parseInt` does:
/// leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. `None` when there are no digits.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Effective order quantity: the parsed value, or [`DEFAULT_QUANTITY`] when
/// it is missing or zero.
pub fn parse_quantity(raw: &str) -> i64 {
    match parse_leading_int(raw) {
        Some(0) | None => DEFAULT_QUANTITY,
        Some(n) => n,
    }
}

/// Base unit price for the exact quantity string.
pub fn base_price(catalog: &Catalog, quantity: &str) -> Decimal {
    catalog
        .quantity_tiers()
        .base_price(quantity)
        .filter(|price| !price.is_zero())
        .unwrap_or(DEFAULT_BASE_PRICE)
}

fn per_unit(option: Option<&OptionItem>) -> Option<Decimal> {
    match option.and_then(OptionItem::charge) {
        Some(Charge::PerUnit(delta)) => Some(delta),
        _ => None,
    }
}

fn fixed(option: Option<&OptionItem>) -> Option<Decimal> {
    match option.and_then(OptionItem::charge) {
        Some(Charge::Fixed(delta)) => Some(delta),
        _ => None,
    }
}

/// Compute the quote for `selections` against `catalog`.
pub fn compute_quote(selections: &Selections, catalog: &Catalog) -> Quote {
    // 1. Quantity and tier base price
    let quantity_key = selections.quantity();
    let quantity = parse_quantity(quantity_key);
    let mut unit_price = base_price(catalog, quantity_key);

    // 2. Size
    let size = catalog.section(ids::SIZE);
    if let Some(delta) = selections
        .single(ids::SIZE)
        .and_then(|id| size.and_then(|s| s.find_option(id)))
        .and_then(OptionItem::price_delta)
    {
        unit_price += delta;
    }

    // 3. Material thickness
    let thickness = catalog
        .section(ids::MATERIAL)
        .and_then(|s| s.find_subsection(ids::THICKNESS));
    if let Some(delta) = selections
        .single(ids::THICKNESS)
        .and_then(|id| thickness.and_then(|s| s.find_option(id)))
        .and_then(OptionItem::price_delta)
    {
        unit_price += delta;
    }

    // 4. Finish
    let finish = catalog.section(ids::FINISH);
    if let Some(delta) = selections
        .single(ids::FINISH)
        .and_then(|id| finish.and_then(|s| s.find_option(id)))
        .and_then(OptionItem::price_delta)
    {
        unit_price += delta;
    }

    // 5. Premium add-ons
    if let Some(premium) = catalog.section(ids::PREMIUM) {
        unit_price += selections
            .multi(ids::PREMIUM)
            .iter()
            .filter_map(|id| premium.find_option(id))
            .filter_map(OptionItem::price_delta)
            .sum::<Decimal>();
    }

    // 6. Extras: per-unit charges only, flat fees are handled below
    let extras = catalog.section(ids::EXTRAS);
    for sub in extras.map(|s| s.subsections()).unwrap_or_default() {
        match selections.get(&sub.id) {
            Some(SelectionValue::Multi(values)) if sub.multi_select => {
                for id in values {
                    if let Some(delta) = per_unit(sub.find_option(id)) {
                        unit_price += delta;
                    }
                }
            }
            Some(SelectionValue::Single(id)) => {
                if let Some(delta) = per_unit(sub.find_option(id)) {
                    unit_price += delta;
                }
            }
            _ => {}
        }
    }

    // 7. Fixed costs from plates
    let mut fixed_costs = Decimal::ZERO;
    let plates = extras.and_then(|s| s.find_subsection(ids::PLATES));
    if let Some(delta) = fixed(
        selections
            .single(ids::PLATES)
            .and_then(|id| plates.and_then(|p| p.find_option(id))),
    ) {
        fixed_costs += delta;
    }

    let total = unit_price * Decimal::from(quantity) + fixed_costs;

    Quote {
        unit_price,
        quantity,
        fixed_costs,
        total,
    }
}
