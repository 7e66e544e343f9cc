//! packconf library
//!
//! Selection and pricing engine for a step-by-step packaging configurator:
//! a static catalog, user selections, a wizard cursor with deferred
//! auto-advance, and a pure pricing function.

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod error;
pub mod labels;
pub mod pricing;
pub mod replay;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod summary;
pub mod types;
pub mod wizard;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, Charge, OptionItem, Section, Subsection};
pub use completion::is_section_completed;
pub use error::ConfiguratorError;
pub use labels::{format_price, format_quantity, selection_label};
pub use pricing::{compute_quote, parse_quantity, Quote};
pub use selection::{SelectionValue, Selections};
pub use session::{Session, AUTO_ADVANCE_DELAY};
pub use summary::{OrderSummary, SummaryRow};
pub use types::{PricingMode, StepStatus};
pub use wizard::WizardCursor;
