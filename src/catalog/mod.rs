//! Configuration catalog
//!
//! The catalog is the static tree of sections, subsections and options that
//! drives the wizard, plus the quantity tier table used as the base-price
//! lookup. It is immutable once built: the built-in catalog lives behind a
//! process-wide `OnceLock`, and catalogs read from JSON are validated at load
//! time and only ever borrowed afterwards.
//!
//! # Shape
//!
//! ```text
//! Catalog
//!  ├── Section (step 1..N, dense)
//!  │    ├── OptionItem*            (flat section)
//!  │    └── Subsection*            (sectioned section)
//!  │         └── OptionItem*
//!  └── QuantityTiers ("250" -> 0.60, ...)
//! ```

mod builtin;
mod tiers;

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::types::PricingMode;

pub use tiers::{QuantityTier, QuantityTiers};

/// Well-known section and subsection ids the pricing function reads.
pub mod ids {
    pub const QUANTITY: &str = "quantity";
    pub const SIZE: &str = "size";
    pub const MATERIAL: &str = "material";
    pub const THICKNESS: &str = "thickness";
    pub const FINISH: &str = "finish";
    pub const PREMIUM: &str = "premium";
    pub const EXTRAS: &str = "extras";
    pub const PLATES: &str = "plates";
}

// ============================================================================
// Options
// ============================================================================

/// How a price delta lands on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    /// Added to the unit price
    PerUnit(Decimal),
    /// Added once to the total
    Fixed(Decimal),
}

/// A selectable option inside a section or subsection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    /// Unique within the owning section/subsection
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additive price contribution, currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_add: Option<Decimal>,
    /// Included in the base price; the delta is treated as zero
    #[serde(default)]
    pub included: bool,
    /// Preselected when a session starts
    #[serde(default)]
    pub default: bool,
    /// Explicit charge mode; inferred from the delta's magnitude when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl OptionItem {
    /// Create a new option with only an id and a label
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            description: None,
            price_add: None,
            included: false,
            default: false,
            pricing: None,
            icon: None,
            details: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_price(mut self, price_add: Decimal) -> Self {
        self.price_add = Some(price_add);
        self
    }

    pub fn with_pricing(mut self, pricing: PricingMode) -> Self {
        self.pricing = Some(pricing);
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_details(mut self, details: &[&str]) -> Self {
        self.details = details.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn included(mut self) -> Self {
        self.included = true;
        self
    }

    pub fn preselected(mut self) -> Self {
        self.default = true;
        self
    }

    /// Effective price delta: `None` for included options and zero deltas.
    pub fn price_delta(&self) -> Option<Decimal> {
        if self.included {
            return None;
        }
        self.price_add.filter(|delta| !delta.is_zero())
    }

    /// Classify the delta as a per-unit surcharge or a flat fee.
    ///
    /// Without an explicit [`PricingMode`], deltas strictly below 1 are
    /// per-unit and deltas of 1 or more are fixed.
    pub fn charge(&self) -> Option<Charge> {
        let delta = self.price_delta()?;
        let mode = self.pricing.unwrap_or(if delta < Decimal::ONE {
            PricingMode::PerUnit
        } else {
            PricingMode::Fixed
        });
        Some(match mode {
            PricingMode::PerUnit => Charge::PerUnit(delta),
            PricingMode::Fixed => Charge::Fixed(delta),
        })
    }
}

// ============================================================================
// Sections
// ============================================================================

/// A group of options nested inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    /// Unique across the whole catalog
    pub id: String,
    pub title: String,
    pub options: Vec<OptionItem>,
    #[serde(default)]
    pub multi_select: bool,
}

impl Subsection {
    pub fn find_option(&self, option_id: &str) -> Option<&OptionItem> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Contents of a section: flat options or subsections, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Options(Vec<OptionItem>),
    Subsections(Vec<Subsection>),
}

/// One wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct Section {
    pub id: String,
    /// 1-based position in the wizard
    pub step: usize,
    pub title: String,
    pub subtitle: String,
    pub multi_select: bool,
    pub body: SectionBody,
}

impl Section {
    /// Flat options; empty for sectioned sections
    pub fn options(&self) -> &[OptionItem] {
        match &self.body {
            SectionBody::Options(options) => options,
            SectionBody::Subsections(_) => &[],
        }
    }

    /// Subsections; empty for flat sections
    pub fn subsections(&self) -> &[Subsection] {
        match &self.body {
            SectionBody::Options(_) => &[],
            SectionBody::Subsections(subsections) => subsections,
        }
    }

    pub fn has_subsections(&self) -> bool {
        matches!(self.body, SectionBody::Subsections(_))
    }

    pub fn is_quantity(&self) -> bool {
        self.id == ids::QUANTITY
    }

    pub fn find_option(&self, option_id: &str) -> Option<&OptionItem> {
        self.options().iter().find(|o| o.id == option_id)
    }

    pub fn find_subsection(&self, subsection_id: &str) -> Option<&Subsection> {
        self.subsections().iter().find(|s| s.id == subsection_id)
    }

    /// Whether picking a single option here should move the wizard forward
    /// on its own. Multi-select, sectioned and quantity steps wait for an
    /// explicit continue.
    pub fn auto_advances(&self) -> bool {
        !self.multi_select && !self.has_subsections() && !self.is_quantity()
    }
}

/// Wire shape of a section: `options` XOR `subsections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    id: String,
    step: usize,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    multi_select: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<OptionItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subsections: Option<Vec<Subsection>>,
}

impl TryFrom<RawSection> for Section {
    type Error = CatalogError;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        let body = match (raw.options, raw.subsections) {
            (Some(options), None) => SectionBody::Options(options),
            (None, Some(subsections)) => SectionBody::Subsections(subsections),
            (Some(_), Some(_)) => return Err(CatalogError::AmbiguousBody { section: raw.id }),
            (None, None) => return Err(CatalogError::EmptyOptions { owner: raw.id }),
        };
        Ok(Self {
            id: raw.id,
            step: raw.step,
            title: raw.title,
            subtitle: raw.subtitle,
            multi_select: raw.multi_select,
            body,
        })
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        let (options, subsections) = match section.body {
            SectionBody::Options(options) => (Some(options), None),
            SectionBody::Subsections(subsections) => (None, Some(subsections)),
        };
        Self {
            id: section.id,
            step: section.step,
            title: section.title,
            subtitle: section.subtitle,
            multi_select: section.multi_select,
            options,
            subsections,
        }
    }
}

/// A selection target: what a selection key refers to in the catalog.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Section(&'a Section),
    Subsection(&'a Subsection),
}

impl Target<'_> {
    pub fn is_multi_select(&self) -> bool {
        match self {
            Self::Section(section) => section.multi_select,
            Self::Subsection(subsection) => subsection.multi_select,
        }
    }
}

// ============================================================================
// Validation errors
// ============================================================================

/// Structural problems found while building a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog has no sections")]
    NoSections,

    #[error("Id '{id}' is used more than once (section and subsection ids share one namespace)")]
    DuplicateId { id: String },

    #[error("Steps must be dense starting at 1: expected step {expected}, found {found}")]
    StepGap { expected: usize, found: usize },

    #[error("'{owner}' has no options")]
    EmptyOptions { owner: String },

    #[error("Section '{section}' declares both options and subsections")]
    AmbiguousBody { section: String },

    #[error("Option '{option}' appears more than once in '{owner}'")]
    DuplicateOption { owner: String, option: String },

    #[error("Option '{option}' in '{owner}' has a negative price")]
    NegativePrice { owner: String, option: String },

    #[error("Catalog has no '{}' section", ids::QUANTITY)]
    MissingQuantitySection,

    #[error("Quantity tier table is empty")]
    EmptyTiers,

    #[error("Quantity tier '{quantity}' is listed more than once")]
    DuplicateTier { quantity: String },
}

fn check_options(owner: &str, options: &[OptionItem]) -> Result<(), CatalogError> {
    if options.is_empty() {
        return Err(CatalogError::EmptyOptions {
            owner: owner.to_string(),
        });
    }
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.id.as_str()) {
            return Err(CatalogError::DuplicateOption {
                owner: owner.to_string(),
                option: option.id.clone(),
            });
        }
        if option.price_add.is_some_and(|p| p.is_sign_negative() && !p.is_zero()) {
            return Err(CatalogError::NegativePrice {
                owner: owner.to_string(),
                option: option.id.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Catalog
// ============================================================================

/// The complete, validated catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument", into = "CatalogDocument")]
pub struct Catalog {
    /// Sorted by step
    sections: Vec<Section>,
    quantity_tiers: QuantityTiers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    sections: Vec<Section>,
    quantity_tiers: QuantityTiers,
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        Catalog::new(doc.sections, doc.quantity_tiers)
    }
}

impl From<Catalog> for CatalogDocument {
    fn from(catalog: Catalog) -> Self {
        Self {
            sections: catalog.sections,
            quantity_tiers: catalog.quantity_tiers,
        }
    }
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Build a catalog, ordering sections by step and validating structure.
    pub fn new(
        mut sections: Vec<Section>,
        quantity_tiers: QuantityTiers,
    ) -> Result<Self, CatalogError> {
        sections.sort_by_key(|s| s.step);
        let catalog = Self {
            sections,
            quantity_tiers,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The packaging catalog compiled into the crate.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(builtin::packaging_catalog)
    }

    /// Load and validate a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog: Self =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        info!(
            "Loaded catalog from {:?}: {} sections, {} quantity tiers",
            path.as_ref(),
            catalog.total_steps(),
            catalog.quantity_tiers.len()
        );
        Ok(catalog)
    }

    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.sections.is_empty() {
            return Err(CatalogError::NoSections);
        }

        for (index, section) in self.sections.iter().enumerate() {
            let expected = index + 1;
            if section.step != expected {
                return Err(CatalogError::StepGap {
                    expected,
                    found: section.step,
                });
            }
        }

        let mut seen_ids = HashSet::new();
        for section in &self.sections {
            if !seen_ids.insert(section.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: section.id.clone(),
                });
            }
        }
        for section in &self.sections {
            match &section.body {
                SectionBody::Options(options) => check_options(&section.id, options)?,
                SectionBody::Subsections(subsections) => {
                    if subsections.is_empty() {
                        return Err(CatalogError::EmptyOptions {
                            owner: section.id.clone(),
                        });
                    }
                    for sub in subsections {
                        if !seen_ids.insert(sub.id.as_str()) {
                            return Err(CatalogError::DuplicateId { id: sub.id.clone() });
                        }
                        check_options(&sub.id, &sub.options)?;
                    }
                }
            }
        }

        if self.section(ids::QUANTITY).is_none() {
            return Err(CatalogError::MissingQuantitySection);
        }
        self.quantity_tiers.validate()
    }

    /// All sections in step order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of wizard steps (N)
    pub fn total_steps(&self) -> usize {
        self.sections.len()
    }

    pub fn quantity_tiers(&self) -> &QuantityTiers {
        &self.quantity_tiers
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_by_step(&self, step: usize) -> Option<&Section> {
        step.checked_sub(1).and_then(|i| self.sections.get(i))
    }

    /// Find a subsection anywhere in the catalog
    pub fn subsection(&self, id: &str) -> Option<&Subsection> {
        self.sections
            .iter()
            .flat_map(|s| s.subsections())
            .find(|sub| sub.id == id)
    }

    /// Resolve a selection key to the section or subsection it names.
    pub fn target(&self, id: &str) -> Option<Target<'_>> {
        if let Some(section) = self.section(id) {
            return Some(Target::Section(section));
        }
        self.subsection(id).map(Target::Subsection)
    }
}
