//! Property-based tests for balance reconstruction.

use std::sync::Arc;

use chrono::Duration;
use proptest::prelude::*;
use quartermaster_shared::types::{BaseId, EquipmentTypeId};
use uuid::Uuid;

use super::aggregator::{BalanceAggregator, BalanceQuery};
use super::memory::{InMemoryLedger, day};
use super::window::DateWindow;
use crate::access::BaseScope;
use crate::ledger::Movement;

const BASES: u128 = 3;

fn base(n: u128) -> BaseId {
    BaseId::from_uuid(Uuid::from_u128(n + 1))
}

/// A movement between the fixed set of bases.
fn movement() -> impl Strategy<Value = Movement> {
    (0..4u8, 0..BASES, 1..BASES).prop_map(|(kind, a, offset)| {
        let from_base = base(a);
        let to_base = base((a + offset) % BASES);
        match kind {
            0 => Movement::Purchase { to_base },
            1 => Movement::Transfer { from_base, to_base },
            2 => Movement::Assignment {
                from_base,
                personnel: "Spc. Laine".to_string(),
            },
            _ => Movement::Expenditure { from_base },
        }
    })
}

/// Movements with a quantity and a day offset into a 90-day span from 2024-01-01.
fn ledger() -> impl Strategy<Value = Vec<(Movement, i64, i64)>> {
    prop::collection::vec((movement(), 1i64..500, 0i64..90), 0..40)
}

fn scope() -> impl Strategy<Value = BaseScope> {
    prop_oneof![
        Just(BaseScope::All),
        (0..BASES).prop_map(|n| BaseScope::Base(base(n))),
    ]
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn seeded(records: &[(Movement, i64, i64)], equipment: EquipmentTypeId) -> Arc<InMemoryLedger> {
    let store = Arc::new(InMemoryLedger::default());
    for (movement, quantity, offset) in records {
        store.push(
            movement.clone(),
            equipment,
            *quantity,
            day(1, 1) + Duration::days(*offset),
        );
    }
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// closing == opening + purchases + transfer_in - transfer_out, for any ledger.
    #[test]
    fn prop_closing_identity(
        records in ledger(),
        scope in scope(),
        start in 0i64..90,
        len in 0i64..60,
    ) {
        let equipment = EquipmentTypeId::new();
        let store = seeded(&records, equipment);
        let begin = day(1, 1) + Duration::days(start);
        let window = DateWindow::new(begin, begin + Duration::days(len)).unwrap();

        let summary = run(BalanceAggregator::new(store).summarize(&BalanceQuery {
            window,
            scope,
            equipment_type_id: None,
        }))
        .unwrap();

        prop_assert_eq!(
            summary.closing_balance,
            summary.opening_balance + summary.purchases + summary.transfer_in - summary.transfer_out
        );
    }

    /// Across all bases, every transfer is counted on both legs.
    #[test]
    fn prop_all_scope_transfers_cancel(records in ledger(), start in 0i64..90) {
        let store = seeded(&records, EquipmentTypeId::new());
        let begin = day(1, 1) + Duration::days(start);
        let window = DateWindow::new(begin, begin + Duration::days(30)).unwrap();

        let summary = run(BalanceAggregator::new(store).summarize(&BalanceQuery {
            window,
            scope: BaseScope::All,
            equipment_type_id: None,
        }))
        .unwrap();

        prop_assert_eq!(summary.transfer_in, summary.transfer_out);
    }

    /// The per-base figures add up to the all-bases figures.
    #[test]
    fn prop_per_base_sums_to_total(records in ledger(), start in 0i64..90) {
        let store = seeded(&records, EquipmentTypeId::new());
        let begin = day(1, 1) + Duration::days(start);
        let window = DateWindow::new(begin, begin + Duration::days(30)).unwrap();
        let aggregator = BalanceAggregator::new(store);
        let summarize = |scope| {
            run(aggregator.summarize(&BalanceQuery {
                window,
                scope,
                equipment_type_id: None,
            }))
            .unwrap()
        };

        let total = summarize(BaseScope::All);
        let per_base: Vec<_> = (0..BASES).map(|n| summarize(BaseScope::Base(base(n)))).collect();

        prop_assert_eq!(per_base.iter().map(|s| s.opening_balance).sum::<i64>(), total.opening_balance);
        prop_assert_eq!(per_base.iter().map(|s| s.purchases).sum::<i64>(), total.purchases);
        prop_assert_eq!(per_base.iter().map(|s| s.closing_balance).sum::<i64>(), total.closing_balance);
    }
}
