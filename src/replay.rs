//! Scripted session replay
//!
//! Drives a [`Session`] from a JSON list of user actions, recording the
//! cursor and price after each one. Waits advance the session's logical
//! clock, so auto-advance behaves exactly as it would interactively.
//!
//! ```json
//! [
//!   {"select": {"target": "type", "option": "flat"}},
//!   {"wait": 400},
//!   {"select": {"target": "quantity", "option": "1000"}},
//!   "continue",
//!   {"reopen": 1}
//! ]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{ConfiguratorError, Result};
use crate::session::Session;
use crate::summary::OrderSummary;
use crate::types::StepStatus;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayAction {
    Select { target: String, option: String },
    Continue,
    Reopen(usize),
    /// Milliseconds of logical time
    Wait(u64),
}

impl fmt::Display for ReplayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select { target, option } => write!(f, "select {}={}", target, option),
            Self::Continue => write!(f, "continue"),
            Self::Reopen(step) => write!(f, "reopen {}", step),
            Self::Wait(ms) => write!(f, "wait {}ms", ms),
        }
    }
}

/// State observed after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEvent {
    pub action: ReplayAction,
    pub active_step: usize,
    pub statuses: Vec<StepStatus>,
    pub total: Decimal,
}

/// Outcome of a full replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub events: Vec<ReplayEvent>,
    pub all_completed: bool,
    pub summary: OrderSummary,
}

/// Parse and check a replay script.
pub fn parse_script(json: &str) -> Result<Vec<ReplayAction>> {
    let actions: Vec<ReplayAction> = serde_json::from_str(json)?;
    for (index, action) in actions.iter().enumerate() {
        if let ReplayAction::Select { target, .. } = action {
            if target.trim().is_empty() {
                return Err(ConfiguratorError::replay(format!(
                    "action {} selects an empty target",
                    index + 1
                )));
            }
        }
    }
    Ok(actions)
}

/// Load a replay script from a JSON file
pub fn load_script<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ReplayAction>> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read replay script from {:?}", path.as_ref()))?;
    let actions = parse_script(&content)
        .with_context(|| format!("Invalid replay script {:?}", path.as_ref()))?;
    Ok(actions)
}

/// Run `actions` against a fresh session.
pub fn run(catalog: &Catalog, actions: &[ReplayAction], auto_advance: Duration) -> ReplayReport {
    let mut session = Session::new(catalog).with_auto_advance_delay(auto_advance);
    let mut events = Vec::with_capacity(actions.len());

    for action in actions {
        debug!("Replaying: {}", action);
        match action {
            ReplayAction::Select { target, option } => session.select(target, option),
            ReplayAction::Continue => {
                session.continue_step();
            }
            ReplayAction::Reopen(step) => {
                session.reopen(*step);
            }
            ReplayAction::Wait(ms) => {
                session.advance_time(Duration::from_millis(*ms));
            }
        }
        events.push(ReplayEvent {
            action: action.clone(),
            active_step: session.active_step(),
            statuses: (1..=catalog.total_steps())
                .map(|step| session.status_of(step))
                .collect(),
            total: session.quote().total,
        });
    }

    ReplayReport {
        events,
        all_completed: session.is_all_completed(),
        summary: session.summary(),
    }
}
