//! Wizard cursor
//!
//! A single integer cursor walks the catalog's steps. Every step before the
//! cursor is completed, the step at the cursor is active, every step after it
//! is locked. The cursor ranges over `1..=N+1`; `N+1` means the whole flow is
//! done and the order summary is shown.
//!
//! # Transitions
//!
//! ```text
//! 1 -continue-> 2 -continue-> ... -continue-> N -continue-> N+1 (complete)
//!                                                            |  continue: stays
//! any <-------------------------- reopen(step) --------------+
//! ```
//!
//! The cursor never touches selections: reopening a step only moves the
//! pointer so the step can be edited again.

use tracing::{info, warn};

use crate::types::StepStatus;

/// Cursor over `total_steps` wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardCursor {
    /// Active step, 1-based, `total_steps + 1` when complete
    active: usize,
    total_steps: usize,
}

impl WizardCursor {
    /// Create a cursor on step 1.
    pub fn new(total_steps: usize) -> Self {
        Self {
            active: 1,
            total_steps,
        }
    }

    /// Returns the active step (1-based; `N+1` once everything is complete)
    #[inline]
    pub fn active_step(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Terminal position, `N+1`
    #[inline]
    pub fn end(&self) -> usize {
        self.total_steps + 1
    }

    /// Returns true once the cursor has moved past the last step
    #[inline]
    pub fn is_all_completed(&self) -> bool {
        self.active > self.total_steps
    }

    /// Status of `step` relative to the cursor
    pub fn status_of(&self, step: usize) -> StepStatus {
        StepStatus::for_step(step, self.active)
    }

    /// Move forward one step, clamped at `N+1`.
    ///
    /// Returns the new active step.
    pub fn continue_step(&mut self) -> usize {
        let next = (self.active + 1).min(self.end());
        if next != self.active {
            info!("Wizard advanced to step {}/{}", next, self.total_steps);
        }
        self.active = next;
        self.active
    }

    /// Jump to `step` to edit it again.
    ///
    /// Out-of-range targets are clamped into `1..=N+1`.
    pub fn reopen(&mut self, step: usize) -> usize {
        let clamped = step.clamp(1, self.end());
        if clamped != step {
            warn!(
                "Reopen target {} outside 1..={}, using {}",
                step,
                self.end(),
                clamped
            );
        }
        info!("Wizard reopened at step {}", clamped);
        self.active = clamped;
        self.active
    }
}
