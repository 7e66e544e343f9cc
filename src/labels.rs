//! Human-readable labels for selections and prices
//!
//! These strings feed completed-step rows and the order summary. An empty
//! label means "nothing to show" and the caller omits the row.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::{OptionItem, Section};
use crate::pricing::parse_leading_int;
use crate::selection::{SelectionValue, Selections};

/// Shown for a flat multi-select section with nothing picked
pub const NO_SELECTION_LABEL: &str = "None";

/// Separator between subsection labels of one section
pub const SUBSECTION_SEPARATOR: &str = " · ";

/// Compact quantity: values of 1000 and above get a "k" suffix
/// ("1000" -> "1k", "1500" -> "1.5k"). Anything else is returned unchanged.
pub fn format_quantity(raw: &str) -> String {
    match parse_leading_int(raw) {
        Some(n) if n >= 1000 => {
            let thousands = (Decimal::from(n) / Decimal::from(1000)).normalize();
            format!("{}k", thousands)
        }
        _ => raw.to_string(),
    }
}

/// Two decimals, half away from zero, euro suffix: `0.51 €`
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2} €", rounded)
}

fn labels_of(options: &[OptionItem], value: Option<&SelectionValue>) -> Vec<String> {
    let find = |id: &str| options.iter().find(|o| o.id == id).map(|o| o.label.clone());
    match value {
        Some(SelectionValue::Single(id)) => find(id).into_iter().collect(),
        Some(SelectionValue::Multi(ids)) => ids.iter().filter_map(|id| find(id)).collect(),
        None => Vec::new(),
    }
}

/// Summary text for a section's current selection.
pub fn selection_label(section: &Section, selections: &Selections) -> String {
    if section.is_quantity() {
        return format_quantity(selections.quantity());
    }

    if section.has_subsections() {
        return section
            .subsections()
            .iter()
            .map(|sub| labels_of(&sub.options, selections.get(&sub.id)).join(", "))
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(SUBSECTION_SEPARATOR);
    }

    let value = selections.get(&section.id);
    let labels = labels_of(section.options(), value);
    match value {
        Some(SelectionValue::Multi(_)) if labels.is_empty() => NO_SELECTION_LABEL.to_string(),
        _ => labels.join(", "),
    }
}

impl OptionItem {
    /// Price tag shown next to an option: "Included", "+0.05 €", or nothing.
    pub fn price_badge(&self) -> String {
        if self.included {
            return "Included".to_string();
        }
        match self.price_add {
            Some(delta) if delta > Decimal::ZERO => format!("+{}", format_price(delta)),
            _ => String::new(),
        }
    }
}
