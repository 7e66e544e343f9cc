//! Order summary
//!
//! One row per section that has something to show, in step order, plus the
//! current quote. Each row carries its step so the presentation layer can
//! offer an "edit" action that reopens it.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::labels::{format_price, selection_label};
use crate::pricing::{compute_quote, Quote};
use crate::selection::Selections;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub step: usize,
    pub section_id: String,
    pub title: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub rows: Vec<SummaryRow>,
    pub quote: Quote,
}

impl OrderSummary {
    /// Build the summary for `selections`. Sections whose label is empty are
    /// left out.
    pub fn build(selections: &Selections, catalog: &Catalog) -> Self {
        let rows = catalog
            .sections()
            .iter()
            .filter_map(|section| {
                let label = selection_label(section, selections);
                (!label.is_empty()).then(|| SummaryRow {
                    step: section.step,
                    section_id: section.id.clone(),
                    title: section.title.clone(),
                    label,
                })
            })
            .collect();

        Self {
            rows,
            quote: compute_quote(selections, catalog),
        }
    }

    pub fn row(&self, section_id: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.section_id == section_id)
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.iter().map(|r| r.title.chars().count()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(f, "{}. {:<width$}  {}", row.step, row.title, row.label)?;
        }
        writeln!(f)?;
        writeln!(f, "Unit price:  {}", format_price(self.quote.unit_price))?;
        writeln!(f, "Quantity:    {}", self.quote.quantity)?;
        if !self.quote.fixed_costs.is_zero() {
            writeln!(f, "Fixed costs: {}", format_price(self.quote.fixed_costs))?;
        }
        write!(f, "Total:       {}", format_price(self.quote.total))
    }
}
