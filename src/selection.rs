//! User selections
//!
//! Selections map a section or subsection id to the option(s) currently
//! chosen for it. Single-select targets hold one option id, multi-select
//! targets hold an ordered set, and the quantity section holds a free-form
//! numeric string (a preset tier or whatever the user typed).
//!
//! Nothing here validates ids against the catalog: unknown ids are stored as
//! given and simply contribute nothing when priced.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{ids, Catalog, OptionItem};

/// Default quantity when the catalog declares no tiers
pub const FALLBACK_QUANTITY: &str = "250";

/// The value stored for one selection key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    /// One option id (or the quantity string)
    Single(String),
    /// Option ids in the order they were picked, no duplicates
    Multi(Vec<String>),
}

impl SelectionValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> &[String] {
        match self {
            Self::Single(_) => &[],
            Self::Multi(values) => values,
        }
    }
}

/// Current selections for a session, keyed by section/subsection id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections {
    values: BTreeMap<String, SelectionValue>,
}

/// Option a single-select target starts on: flagged default, else first
/// included, else first.
fn default_option(options: &[OptionItem]) -> Option<&OptionItem> {
    options
        .iter()
        .find(|o| o.default)
        .or_else(|| options.iter().find(|o| o.included))
        .or_else(|| options.first())
}

impl Selections {
    /// Create an empty selection map
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting selections for a new session on `catalog`.
    pub fn defaults_for(catalog: &Catalog) -> Self {
        let mut selections = Self::new();
        for section in catalog.sections() {
            if section.is_quantity() {
                let quantity = catalog
                    .quantity_tiers()
                    .first()
                    .map_or(FALLBACK_QUANTITY, |tier| tier.quantity.as_str());
                selections.set_single(ids::QUANTITY, quantity);
            } else if section.has_subsections() {
                for sub in section.subsections() {
                    if sub.multi_select {
                        selections.values.insert(sub.id.clone(), SelectionValue::Multi(Vec::new()));
                    } else if let Some(option) = default_option(&sub.options) {
                        selections.set_single(&sub.id, &option.id);
                    }
                }
            } else if section.multi_select {
                selections
                    .values
                    .insert(section.id.clone(), SelectionValue::Multi(Vec::new()));
            } else if let Some(option) = default_option(section.options()) {
                selections.set_single(&section.id, &option.id);
            }
        }
        selections
    }

    /// Load a selection preset from a JSON object of id -> option(s)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read selections from {:?}", path.as_ref()))?;

        let selections: Self =
            serde_json::from_str(&content).context("Failed to parse selections JSON")?;

        Ok(selections)
    }

    /// Apply one user choice.
    ///
    /// - quantity: the value is replaced verbatim
    /// - multi-select: `option_id` is toggled in the ordered set
    /// - otherwise: the scalar value is replaced
    pub fn apply(&mut self, target_id: &str, option_id: &str, is_multi: bool) {
        if target_id == ids::QUANTITY {
            debug!("Quantity set to {:?}", option_id);
            self.set_single(ids::QUANTITY, option_id);
        } else if is_multi {
            let added = self.toggle(target_id, option_id);
            debug!(
                "{} {} {}",
                if added { "Added" } else { "Removed" },
                option_id,
                target_id
            );
        } else {
            debug!("{} set to {}", target_id, option_id);
            self.set_single(target_id, option_id);
        }
    }

    /// Replace the scalar value at `target_id`
    pub fn set_single(&mut self, target_id: &str, option_id: &str) {
        self.values.insert(
            target_id.to_string(),
            SelectionValue::Single(option_id.to_string()),
        );
    }

    /// Toggle membership of `option_id` in the set at `target_id`.
    ///
    /// A scalar value already stored there is discarded. Returns `true` when
    /// the option was added.
    pub fn toggle(&mut self, target_id: &str, option_id: &str) -> bool {
        let entry = self
            .values
            .entry(target_id.to_string())
            .or_insert_with(|| SelectionValue::Multi(Vec::new()));
        if let SelectionValue::Single(_) = entry {
            *entry = SelectionValue::Multi(Vec::new());
        }
        let SelectionValue::Multi(values) = entry else {
            return false;
        };
        if let Some(pos) = values.iter().position(|v| v == option_id) {
            values.remove(pos);
            false
        } else {
            values.push(option_id.to_string());
            true
        }
    }

    /// Reshape every stored value to match its target's `multi_select` flag.
    ///
    /// - multi-select target holding a scalar: wrapped into a one-element set
    ///   (an empty scalar becomes an empty set)
    /// - single-select target holding a set: its lone element, or removed when
    ///   the set is empty or ambiguous
    ///
    /// Ids unknown to the catalog are left as they are.
    pub fn conform_to(&mut self, catalog: &Catalog) {
        let mut ambiguous = Vec::new();
        for (target_id, value) in self.values.iter_mut() {
            let Some(target) = catalog.target(target_id) else {
                continue;
            };
            let reshaped = match (target.is_multi_select(), &*value) {
                (true, SelectionValue::Single(option_id)) => {
                    debug!("Wrapping '{}' into a set for {}", option_id, target_id);
                    let options = if option_id.is_empty() {
                        Vec::new()
                    } else {
                        vec![option_id.clone()]
                    };
                    SelectionValue::Multi(options)
                }
                (false, SelectionValue::Multi(options)) => match options.as_slice() {
                    [option_id] => {
                        debug!("Unwrapping '{}' for single-select {}", option_id, target_id);
                        SelectionValue::Single(option_id.clone())
                    }
                    _ => {
                        warn!(
                            "Dropping {} options stored for single-select {}",
                            options.len(),
                            target_id
                        );
                        ambiguous.push(target_id.clone());
                        continue;
                    }
                },
                _ => continue,
            };
            *value = reshaped;
        }
        for target_id in ambiguous {
            self.values.remove(&target_id);
        }
    }

    pub fn get(&self, target_id: &str) -> Option<&SelectionValue> {
        self.values.get(target_id)
    }

    /// The scalar value at `target_id`, if one is stored
    pub fn single(&self, target_id: &str) -> Option<&str> {
        self.get(target_id).and_then(SelectionValue::as_single)
    }

    /// The selected set at `target_id`; empty when absent or scalar
    pub fn multi(&self, target_id: &str) -> &[String] {
        match self.get(target_id) {
            Some(value) => value.as_multi(),
            None => &[],
        }
    }

    /// The raw quantity string; empty when never set
    pub fn quantity(&self) -> &str {
        self.single(ids::QUANTITY).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
