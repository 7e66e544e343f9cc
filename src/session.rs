//! Configurator session
//!
//! A [`Session`] owns everything that changes while a user walks the wizard:
//! the selections, the step cursor and the pending auto-advance. The catalog
//! is borrowed and never modified. All mutation goes through three entry
//! points (`select`, `continue_step`, `reopen`); everything else is derived.
//!
//! # Auto-advance
//!
//! Picking an option in a single-select, flat, non-quantity section that is
//! currently active schedules a cursor advance after [`AUTO_ADVANCE_DELAY`].
//! Time is logical: nothing fires until [`Session::advance_time`] is called.
//! The advance only applies if the cursor is still on the step that scheduled
//! it, and dropping the session abandons it.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Section, Target};
use crate::completion::is_section_completed;
use crate::labels::selection_label;
use crate::pricing::{compute_quote, Quote};
use crate::scheduler::Scheduler;
use crate::selection::Selections;
use crate::summary::OrderSummary;
use crate::types::StepStatus;
use crate::wizard::WizardCursor;

/// Delay between a single-select choice and the automatic step advance
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

/// Pending auto-advance, tagged with the step that requested it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AutoAdvance {
    from_step: usize,
}

/// One user's pass through the configurator.
#[derive(Debug)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    selections: Selections,
    cursor: WizardCursor,
    scheduler: Scheduler<AutoAdvance>,
    auto_advance_delay: Duration,
}

impl<'c> Session<'c> {
    /// Start a session with the catalog's default selections on step 1.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_selections(catalog, Selections::defaults_for(catalog))
    }

    /// Start a session from explicit selections (e.g. a saved preset).
    ///
    /// Values whose shape disagrees with their target's `multi_select` flag
    /// are reshaped first, so labels and pricing read the same data.
    pub fn with_selections(catalog: &'c Catalog, mut selections: Selections) -> Self {
        selections.conform_to(catalog);
        Self {
            catalog,
            selections,
            cursor: WizardCursor::new(catalog.total_steps()),
            scheduler: Scheduler::new(),
            auto_advance_delay: AUTO_ADVANCE_DELAY,
        }
    }

    /// Override the auto-advance delay
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn cursor(&self) -> &WizardCursor {
        &self.cursor
    }

    #[inline]
    pub fn active_step(&self) -> usize {
        self.cursor.active_step()
    }

    #[inline]
    pub fn is_all_completed(&self) -> bool {
        self.cursor.is_all_completed()
    }

    /// Whether an auto-advance is waiting to fire
    pub fn has_pending_advance(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Current logical time of the session
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Record a choice for `target_id` (a section or subsection id).
    ///
    /// Multi-select targets toggle `option_id`; everything else replaces the
    /// stored value. Unknown targets are stored as single-select values.
    pub fn select(&mut self, target_id: &str, option_id: &str) {
        let catalog = self.catalog;
        let target = catalog.target(target_id);
        if target.is_none() {
            warn!("Selection for unknown target '{}' stored as-is", target_id);
        }
        let is_multi = target.is_some_and(|t| t.is_multi_select());
        self.selections.apply(target_id, option_id, is_multi);

        if let Some(Target::Section(section)) = target {
            self.maybe_schedule_advance(section);
        }
    }

    fn maybe_schedule_advance(&mut self, section: &Section) {
        if !section.auto_advances() || section.step != self.cursor.active_step() {
            return;
        }
        let replaced = self.scheduler.schedule(
            self.auto_advance_delay,
            AutoAdvance {
                from_step: section.step,
            },
        );
        debug!(
            "Auto-advance from step {} scheduled in {:?}{}",
            section.step,
            self.auto_advance_delay,
            if replaced.is_some() { " (replacing pending)" } else { "" }
        );
    }

    /// Explicitly move to the next step (multi-select, quantity and
    /// sectioned steps). Clamped at `N+1`.
    pub fn continue_step(&mut self) -> usize {
        self.cursor.continue_step()
    }

    /// Jump back (or forward) to `step` to edit it. Selections are untouched.
    pub fn reopen(&mut self, step: usize) -> usize {
        self.cursor.reopen(step)
    }

    /// Move logical time forward, firing a due auto-advance.
    ///
    /// Returns `true` if the cursor moved.
    pub fn advance_time(&mut self, elapsed: Duration) -> bool {
        let Some(task) = self.scheduler.advance(elapsed) else {
            return false;
        };
        if self.cursor.active_step() != task.from_step {
            debug!(
                "Dropping stale auto-advance from step {} (cursor now at {})",
                task.from_step,
                self.cursor.active_step()
            );
            return false;
        }
        self.cursor.continue_step();
        true
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Current pricing
    pub fn quote(&self) -> Quote {
        compute_quote(&self.selections, self.catalog)
    }

    /// Display status of `step`
    pub fn status_of(&self, step: usize) -> StepStatus {
        self.cursor.status_of(step)
    }

    /// Whether the section holds a usable selection
    pub fn section_completed(&self, section_id: &str) -> bool {
        self.catalog
            .section(section_id)
            .is_some_and(|s| is_section_completed(s, &self.selections))
    }

    /// Summary text for a section; empty when unknown or nothing is selected
    pub fn label(&self, section_id: &str) -> String {
        self.catalog
            .section(section_id)
            .map(|s| selection_label(s, &self.selections))
            .unwrap_or_default()
    }

    /// Order summary for the current selections
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::build(&self.selections, self.catalog)
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if let Some(task) = self.scheduler.cancel() {
            debug!(
                "Session closed with auto-advance from step {} pending; abandoned",
                task.payload.from_step
            );
        }
        info!("Session closed at step {}", self.cursor.active_step());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ids;

    #[test]
    fn test_new_session_starts_on_step_one_with_defaults() {
        let session = Session::new(Catalog::builtin());
        assert_eq!(session.active_step(), 1);
        assert_eq!(session.selections().single("type"), Some("doypack"));
        assert!(!session.has_pending_advance());
    }

    #[test]
    fn test_single_select_on_active_step_schedules() {
        let mut session = Session::new(Catalog::builtin());
        session.select("type", "flat");
        assert!(session.has_pending_advance());
        assert!(!session.advance_time(Duration::from_millis(399)));
        assert!(session.advance_time(Duration::from_millis(1)));
        assert_eq!(session.active_step(), 2);
    }

    #[test]
    fn test_select_on_inactive_step_does_not_schedule() {
        let mut session = Session::new(Catalog::builtin());
        session.select(ids::SIZE, "m");
        assert!(!session.has_pending_advance());
        assert_eq!(session.selections().single(ids::SIZE), Some("m"));
    }

    #[test]
    fn test_stale_advance_is_dropped() {
        let mut session = Session::new(Catalog::builtin());
        session.reopen(3);
        session.select(ids::SIZE, "l");
        session.reopen(1);
        assert!(!session.advance_time(AUTO_ADVANCE_DELAY));
        assert_eq!(session.active_step(), 1);
    }

    #[test]
    fn test_custom_delay() {
        let mut session =
            Session::new(Catalog::builtin()).with_auto_advance_delay(Duration::ZERO);
        session.select("type", "shape");
        assert!(session.advance_time(Duration::ZERO));
        assert_eq!(session.active_step(), 2);
    }

    #[test]
    fn test_preset_is_reshaped_to_catalog() {
        let mut preset = Selections::new();
        preset.toggle(ids::SIZE, "l");
        preset.set_single(ids::PREMIUM, "metallic");
        let session = Session::with_selections(Catalog::builtin(), preset);
        assert_eq!(session.selections().single(ids::SIZE), Some("l"));
        assert_eq!(session.selections().multi(ids::PREMIUM), ["metallic"]);
    }

    #[test]
    fn test_unknown_target_stored_without_scheduling() {
        let mut session = Session::new(Catalog::builtin());
        session.select("gift-wrap", "yes");
        assert_eq!(session.selections().single("gift-wrap"), Some("yes"));
        assert!(!session.has_pending_advance());
    }

    #[test]
    fn test_label_and_completion_accessors() {
        let session = Session::new(Catalog::builtin());
        assert_eq!(session.label(ids::SIZE), "XS");
        assert_eq!(session.label("unknown"), "");
        assert!(session.section_completed(ids::EXTRAS));
        assert!(!session.section_completed("unknown"));
    }
}
