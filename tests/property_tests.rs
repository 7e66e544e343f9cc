//! Property-based tests for packconf
//!
//! These tests verify:
//! - Enum string round-trips (parse → to_string → parse)
//! - Pricing invariants over arbitrary selections
//! - Cursor bounds under arbitrary continue/reopen sequences
//! - Multi-select toggle is an involution

use proptest::prelude::*;
use rust_decimal::Decimal;

use packconf::catalog::ids;
use packconf::{compute_quote, parse_quantity, Catalog, Selections, WizardCursor};

// =============================================================================
// Enum Property Tests
// =============================================================================

use packconf::{PricingMode, StepStatus};

fn pricing_mode_strategy() -> impl Strategy<Value = PricingMode> {
    prop_oneof![Just(PricingMode::PerUnit), Just(PricingMode::Fixed)]
}

fn step_status_strategy() -> impl Strategy<Value = StepStatus> {
    prop_oneof![
        Just(StepStatus::Locked),
        Just(StepStatus::Active),
        Just(StepStatus::Completed),
    ]
}

proptest! {
    /// PricingMode: to_string → parse round-trip is identity
    #[test]
    fn pricing_mode_roundtrip(mode in pricing_mode_strategy()) {
        let s = mode.to_string();
        let parsed: PricingMode = s.parse().expect("Should parse");
        prop_assert_eq!(mode, parsed);
    }

    /// StepStatus: Display output is non-empty lowercase and parses back
    #[test]
    fn step_status_roundtrip(status in step_status_strategy()) {
        let s = status.to_string();
        prop_assert!(!s.is_empty());
        prop_assert_eq!(s.clone(), s.to_lowercase());
        let parsed: StepStatus = s.parse().expect("Should parse");
        prop_assert_eq!(status, parsed);
    }
}

// =============================================================================
// Pricing Property Tests
// =============================================================================

/// Any option id from a section's flat list, or something unknown
fn option_of(section: &'static str) -> impl Strategy<Value = String> {
    let ids: Vec<String> = Catalog::builtin()
        .section(section)
        .map(|s| s.options().iter().map(|o| o.id.clone()).collect())
        .unwrap_or_default();
    prop_oneof![
        4 => proptest::sample::select(ids),
        1 => "[a-z]{1,6}",
    ]
}

fn subsection_option(subsection: &'static str) -> impl Strategy<Value = String> {
    let ids: Vec<String> = Catalog::builtin()
        .subsection(subsection)
        .map(|s| s.options.iter().map(|o| o.id.clone()).collect())
        .unwrap_or_default();
    proptest::sample::select(ids)
}

fn quantity_strategy() -> impl Strategy<Value = String> {
    let tiers: Vec<String> = Catalog::builtin()
        .quantity_tiers()
        .iter()
        .map(|t| t.quantity.clone())
        .collect();
    prop_oneof![
        3 => proptest::sample::select(tiers),
        2 => (1u32..100_000).prop_map(|n| n.to_string()),
        1 => ".{0,8}",
    ]
}

/// Arbitrary selections over the built-in catalog
fn selections_strategy() -> impl Strategy<Value = Selections> {
    (
        quantity_strategy(),
        option_of(ids::SIZE),
        subsection_option(ids::THICKNESS),
        option_of(ids::FINISH),
        proptest::collection::vec(option_of(ids::PREMIUM), 0..6),
        subsection_option("closure"),
        subsection_option(ids::PLATES),
        proptest::collection::vec(subsection_option("technical-extras"), 0..4),
    )
        .prop_map(
            |(quantity, size, thickness, finish, premium, closure, plates, technical)| {
                let mut s = Selections::new();
                s.apply(ids::QUANTITY, &quantity, false);
                s.apply(ids::SIZE, &size, false);
                s.apply(ids::THICKNESS, &thickness, false);
                s.apply(ids::FINISH, &finish, false);
                for id in &premium {
                    s.apply(ids::PREMIUM, id, true);
                }
                s.apply("closure", &closure, false);
                s.apply(ids::PLATES, &plates, false);
                for id in &technical {
                    s.apply("technical-extras", id, true);
                }
                s
            },
        )
}

proptest! {
    /// total = unit_price × quantity + fixed_costs, exactly
    #[test]
    fn total_identity(selections in selections_strategy()) {
        let quote = compute_quote(&selections, Catalog::builtin());
        prop_assert_eq!(
            quote.total,
            quote.unit_price * Decimal::from(quote.quantity) + quote.fixed_costs
        );
    }

    /// Unit price never drops below the smallest possible base price
    #[test]
    fn unit_price_at_least_base(selections in selections_strategy()) {
        let catalog = Catalog::builtin();
        let floor = catalog
            .quantity_tiers()
            .iter()
            .map(|t| t.price)
            .min()
            .expect("tiers are non-empty");
        let quote = compute_quote(&selections, catalog);
        prop_assert!(quote.unit_price >= floor);
        prop_assert!(quote.fixed_costs >= Decimal::ZERO);
    }

    /// Pricing is a pure function of the selections
    #[test]
    fn quote_is_deterministic(selections in selections_strategy()) {
        let catalog = Catalog::builtin();
        prop_assert_eq!(
            compute_quote(&selections, catalog),
            compute_quote(&selections.clone(), catalog)
        );
    }

    /// Toggling the same premium option twice leaves the price unchanged
    #[test]
    fn premium_double_toggle_restores_quote(
        selections in selections_strategy(),
        extra in option_of(ids::PREMIUM),
    ) {
        let catalog = Catalog::builtin();
        let before = compute_quote(&selections, catalog);
        let mut toggled = selections.clone();
        toggled.apply(ids::PREMIUM, &extra, true);
        toggled.apply(ids::PREMIUM, &extra, true);
        prop_assert_eq!(compute_quote(&toggled, catalog), before);
    }

    /// The effective quantity is never zero
    #[test]
    fn parse_quantity_never_zero(raw in ".{0,12}") {
        prop_assert_ne!(parse_quantity(&raw), 0);
    }

    /// Positive integers parse to themselves
    #[test]
    fn parse_quantity_positive_identity(n in 1i64..10_000_000) {
        prop_assert_eq!(parse_quantity(&n.to_string()), n);
    }
}

// =============================================================================
// Selection Property Tests
// =============================================================================

proptest! {
    /// Multi-select sets stay duplicate-free and double toggles cancel out
    #[test]
    fn toggle_is_involution(
        picks in proptest::collection::vec("[a-c]", 0..12),
        extra in "[a-d]",
    ) {
        let mut s = Selections::new();
        for id in &picks {
            s.apply("premium", id, true);
        }
        let values = s.multi("premium").to_vec();
        let mut deduped = values.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), values.len());

        let snapshot = s.clone();
        s.apply("premium", &extra, true);
        s.apply("premium", &extra, true);
        prop_assert_eq!(s.multi("premium").contains(&extra), snapshot.multi("premium").contains(&extra));
        let mut a = s.multi("premium").to_vec();
        let mut b = snapshot.multi("premium").to_vec();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// Cursor Property Tests
// =============================================================================

#[derive(Debug, Clone)]
enum Move {
    Continue,
    Reopen(usize),
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![
        2 => Just(Move::Continue),
        1 => (0usize..12).prop_map(Move::Reopen),
    ]
}

proptest! {
    /// The cursor stays in 1..=N+1 and exactly one step is active before N+1
    #[test]
    fn cursor_stays_in_bounds(
        total in 1usize..10,
        moves in proptest::collection::vec(move_strategy(), 0..40),
    ) {
        let mut cursor = WizardCursor::new(total);
        for m in moves {
            match m {
                Move::Continue => { cursor.continue_step(); }
                Move::Reopen(step) => { cursor.reopen(step); }
            }
            let active = cursor.active_step();
            prop_assert!((1..=total + 1).contains(&active));

            let active_count = (1..=total)
                .filter(|&step| cursor.status_of(step) == StepStatus::Active)
                .count();
            if cursor.is_all_completed() {
                prop_assert_eq!(active, total + 1);
                prop_assert_eq!(active_count, 0);
            } else {
                prop_assert_eq!(active_count, 1);
            }
        }
    }
}
